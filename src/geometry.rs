//! Geometry primitives. Pure math, no game state.
//!
//! Positions are room-local: the origin is the room's top-left corner,
//! `x` grows rightward and `y` grows downward.

use std::ops::Sub;

// ── Point ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A new point moved by `v`.
    pub fn translate(self, v: Vector2D) -> Self {
        Self::new(self.x + v.dx, self.y + v.dy)
    }

    pub fn distance(self, other: Point2D) -> f64 {
        (other - self).module()
    }
}

/// `a - b` is the vector pointing from `b` to `a`.
impl Sub for Point2D {
    type Output = Vector2D;

    fn sub(self, rhs: Point2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ── Vector ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector2D {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D::new(0.0, 0.0);

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Vector from `from` to `to`.
    pub fn from_points(from: Point2D, to: Point2D) -> Self {
        to - from
    }

    /// Magnitude.
    pub fn module(self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Unit vector with the same heading. The zero vector stays zero.
    pub fn normalize(self) -> Self {
        let len = self.module();
        if len <= f64::EPSILON {
            Self::ZERO
        } else {
            Self::new(self.dx / len, self.dy / len)
        }
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.dx * k, self.dy * k)
    }

    pub fn is_zero(self) -> bool {
        self.module() <= f64::EPSILON
    }
}

// ── Bounding boxes ────────────────────────────────────────────────────────────

/// Collision shape centred on its owner's coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundingBox {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl BoundingBox {
    pub fn circle(radius: f64) -> Self {
        BoundingBox::Circle { radius }
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        BoundingBox::Rectangle { width, height }
    }

    /// True when this box, centred at `center`, overlaps the circle of
    /// `other_radius` centred at `other_center`.
    pub fn is_colliding_with(
        &self,
        center: Point2D,
        other_center: Point2D,
        other_radius: f64,
    ) -> bool {
        match *self {
            BoundingBox::Circle { radius } => {
                center.distance(other_center) <= radius + other_radius
            }
            BoundingBox::Rectangle { width, height } => {
                // Closest point of the rectangle to the circle centre.
                let half_w = width / 2.0;
                let half_h = height / 2.0;
                let nearest = Point2D::new(
                    other_center.x.clamp(center.x - half_w, center.x + half_w),
                    other_center.y.clamp(center.y - half_h, center.y + half_h),
                );
                nearest.distance(other_center) <= other_radius
            }
        }
    }

    /// Circle-vs-circle overlap; `other` must be a circle, a rectangle is
    /// treated through its closest point like [`Self::is_colliding_with`].
    pub fn is_colliding_with_circle(
        &self,
        center: Point2D,
        other_center: Point2D,
        other: &BoundingBox,
    ) -> bool {
        match *other {
            BoundingBox::Circle { radius } => self.is_colliding_with(center, other_center, radius),
            BoundingBox::Rectangle { .. } => {
                other.is_colliding_with(other_center, center, self.reach())
            }
        }
    }

    /// Whether a box centred at `center` touches the inner perimeter of a
    /// `width` x `height` rectangle anchored at the origin.
    ///
    /// The box is assumed to lie inside the rectangle.
    pub fn is_colliding_with_rect_perimeter(
        &self,
        center: Point2D,
        width: f64,
        height: f64,
    ) -> bool {
        let (half_w, half_h) = match *self {
            BoundingBox::Circle { radius } => (radius, radius),
            BoundingBox::Rectangle { width, height } => (width / 2.0, height / 2.0),
        };
        center.x <= half_w
            || center.y <= half_h
            || width - center.x <= half_w
            || height - center.y <= half_h
    }

    /// Radius of the smallest circle around the centre that covers the box
    /// along an axis; the circle radius itself for circles.
    pub fn reach(&self) -> f64 {
        match *self {
            BoundingBox::Circle { radius } => radius,
            BoundingBox::Rectangle { width, height } => width.max(height) / 2.0,
        }
    }
}
