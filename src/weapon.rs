//! Weapons and the projectiles they spawn.
//!
//! A weapon owns its live shots. Firing is gated by a fixed interval on the
//! simulation clock; `tick_shots` advances every shot and drops the ones
//! that left the room, ran out of range or hit something.

use crate::entities::MapElement;
use crate::geometry::{Point2D, Vector2D};

#[derive(Clone, Debug, PartialEq)]
pub struct WeaponShot {
    pub element: MapElement,
    /// Unit heading.
    direction: Vector2D,
    /// Units per second.
    speed: f64,
    travelled: f64,
    max_range: Option<f64>,
}

impl WeaponShot {
    pub const SIZE: f64 = 0.6;

    pub fn new(start: Point2D, direction: Vector2D, speed: f64, max_range: Option<f64>) -> Self {
        Self {
            element: MapElement::round(Self::SIZE, start),
            direction: direction.normalize(),
            speed,
            travelled: 0.0,
            max_range,
        }
    }

    pub fn direction(&self) -> Vector2D {
        self.direction
    }

    pub fn travelled(&self) -> f64 {
        self.travelled
    }

    pub fn advance(&mut self, dt_ms: u64) {
        let step = self.speed * dt_ms as f64 / 1_000.0;
        self.element.translate(self.direction.scale(step));
        self.travelled += step;
    }

    pub fn is_expired(&self) -> bool {
        self.max_range.map_or(false, |range| self.travelled >= range)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    interval_ms: u64,
    last_shot_ms: Option<u64>,
    shot_speed: f64,
    range: Option<f64>,
    shots: Vec<WeaponShot>,
}

impl Weapon {
    pub fn new(interval_ms: u64, shot_speed: f64, range: Option<f64>) -> Self {
        Self {
            interval_ms,
            last_shot_ms: None,
            shot_speed,
            range,
            shots: Vec::new(),
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn range(&self) -> Option<f64> {
        self.range
    }

    pub fn set_range(&mut self, range: Option<f64>) {
        self.range = range;
    }

    /// Whether the interval since the previous shot has elapsed at `now_ms`.
    pub fn is_ready(&self, now_ms: u64) -> bool {
        self.last_shot_ms
            .map_or(true, |last| now_ms.saturating_sub(last) >= self.interval_ms)
    }

    /// Fires one shot from `start` along `direction`.
    ///
    /// Returns `false` (and spawns nothing) while the weapon is cooling down
    /// or when `direction` is the zero vector.
    pub fn shoot(&mut self, now_ms: u64, start: Point2D, direction: Vector2D) -> bool {
        if direction.is_zero() || !self.is_ready(now_ms) {
            return false;
        }
        self.shots
            .push(WeaponShot::new(start, direction, self.shot_speed, self.range));
        self.last_shot_ms = Some(now_ms);
        true
    }

    /// Advance every shot by `dt_ms` and purge the dead ones.
    ///
    /// A shot dies when it expires or when its box touches the perimeter of
    /// the `width` x `height` room.
    pub fn tick_shots(&mut self, dt_ms: u64, width: f64, height: f64) {
        for shot in self.shots.iter_mut().filter(|s| s.element.is_alive()) {
            shot.advance(dt_ms);
            let center = shot.element.coord();
            let outside = center.x < 0.0 || center.y < 0.0 || center.x > width || center.y > height;
            if shot.is_expired()
                || outside
                || shot
                    .element
                    .bounding_box()
                    .is_colliding_with_rect_perimeter(center, width, height)
            {
                shot.element.kill();
            }
        }
        self.purge();
    }

    /// Drop shots already marked dead (e.g. after striking a target).
    pub fn purge(&mut self) {
        self.shots.retain(|s| s.element.is_alive());
    }

    pub fn shots(&self) -> &[WeaponShot] {
        &self.shots
    }

    pub fn shots_mut(&mut self) -> &mut [WeaponShot] {
        &mut self.shots
    }

    pub fn clear_shots(&mut self) {
        self.shots.clear();
    }
}
