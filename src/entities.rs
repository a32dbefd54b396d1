//! Game entity types: mostly plain data, with the few helpers that only
//! touch their own fields.

use crate::config::PlayerDefaults;
use crate::geometry::{BoundingBox, Point2D, Vector2D};
use crate::weapon::Weapon;

// ── Map element ───────────────────────────────────────────────────────────────

/// Anything placed inside a room.
#[derive(Clone, Debug, PartialEq)]
pub struct MapElement {
    pub width: f64,
    pub height: f64,
    coord: Point2D,
    bounding_box: BoundingBox,
    alive: bool,
}

impl MapElement {
    pub fn new(width: f64, height: f64, coord: Point2D, bounding_box: BoundingBox) -> Self {
        Self {
            width,
            height,
            coord,
            bounding_box,
            alive: true,
        }
    }

    /// Square element with a circular box of half its side.
    pub fn round(size: f64, coord: Point2D) -> Self {
        Self::new(size, size, coord, BoundingBox::circle(size / 2.0))
    }

    pub fn coord(&self) -> Point2D {
        self.coord
    }

    pub fn set_coord(&mut self, coord: Point2D) {
        self.coord = coord;
    }

    pub fn translate(&mut self, v: Vector2D) {
        self.coord = self.coord.translate(v);
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Marks the element for removal from its containing list.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

// ── Room layout ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoomType {
    Start,
    Shop,
    Treasure,
    Boss,
    Standard,
}

impl RoomType {
    /// Every room type in generation order. A level holds at least one
    /// room per entry.
    pub const ALL: [RoomType; 5] = [
        RoomType::Start,
        RoomType::Shop,
        RoomType::Treasure,
        RoomType::Boss,
        RoomType::Standard,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid step for this direction; `Up` decreases `y`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector in room space.
    pub fn vector(self) -> Vector2D {
        let (dx, dy) = self.offset();
        Vector2D::new(dx as f64, dy as f64)
    }
}

/// Integer position of a room inside the level grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const ORIGIN: GridCoord = GridCoord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Inside the non-negative quadrant.
    pub fn is_valid(self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Door {
    pub element: MapElement,
    /// Wall the door sits on.
    pub direction: Direction,
    pub leads_to: GridCoord,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStats {
    pub hearts: u32,
    pub max_hearts: u32,
    pub speed: f64,
    pub range: f64,
    /// Shots per second.
    pub tears: u32,
    pub coins: u32,
}

impl PlayerStats {
    pub fn from_defaults(defaults: &PlayerDefaults) -> Self {
        Self {
            hearts: defaults.hearts,
            max_hearts: defaults.hearts,
            speed: defaults.speed,
            range: defaults.range,
            tears: defaults.tears,
            coins: 0,
        }
    }

    /// Milliseconds between two player shots.
    pub fn fire_interval_ms(&self) -> u64 {
        1_000 / u64::from(self.tears.max(1))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub element: MapElement,
    pub stats: PlayerStats,
    pub weapon: Weapon,
}

impl Player {
    pub const SIZE: f64 = 1.6;
    pub const SHOT_SPEED: f64 = 30.0;

    pub fn new(coord: Point2D, defaults: &PlayerDefaults) -> Self {
        let stats = PlayerStats::from_defaults(defaults);
        let weapon = Weapon::new(stats.fire_interval_ms(), Self::SHOT_SPEED, Some(stats.range));
        Self {
            element: MapElement::round(Self::SIZE, coord),
            stats,
            weapon,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.stats.hearts == 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.stats.hearts = self.stats.hearts.saturating_sub(amount);
    }

    /// Re-derives weapon cadence and range after a stat change.
    pub fn refresh_weapon(&mut self) {
        self.weapon.set_interval(self.stats.fire_interval_ms());
        self.weapon.set_range(Some(self.stats.range));
    }
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Restores one heart, up to the maximum.
    Heart,
    /// One coin to spend in the shop.
    Coin,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub element: MapElement,
    pub kind: ItemKind,
}

impl Item {
    pub const SIZE: f64 = 1.0;

    pub fn new(kind: ItemKind, coord: Point2D) -> Self {
        Self {
            element: MapElement::round(Self::SIZE, coord),
            kind,
        }
    }

    pub fn collect(&self, stats: &mut PlayerStats) {
        match self.kind {
            ItemKind::Heart => stats.hearts = (stats.hearts + 1).min(stats.max_hearts),
            ItemKind::Coin => stats.coins += 1,
        }
    }
}
