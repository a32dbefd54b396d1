//! Tunable parameters for level generation and the simulation loop.
//!
//! Everything here is plain data with defaults, so tests and the terminal
//! front end can tweak a field without touching game logic.

use std::ops::RangeInclusive;

use crate::entities::RoomType;
use crate::error::{GameError, GameResult};

/// Per-category collision radius, measured from the reference element.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionRadii {
    pub item_pickup: f64,
    pub player_shot: f64,
    pub enemy_contact: f64,
    pub enemy_shot: f64,
    /// Distance at which the player enters a door.
    pub door: f64,
}

impl Default for CollisionRadii {
    fn default() -> Self {
        Self {
            item_pickup: 1.0,
            player_shot: 0.4,
            enemy_contact: 1.2,
            enemy_shot: 0.8,
            door: 1.0,
        }
    }
}

/// Starting stats of a freshly spawned player.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerDefaults {
    pub hearts: u32,
    /// Units travelled per move input.
    pub speed: f64,
    /// Maximum shot travel distance.
    pub range: f64,
    /// Shots per second.
    pub tears: u32,
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            hearts: 6,
            speed: 1.0,
            range: 12.0,
            tears: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub room_width: f64,
    pub room_height: f64,
    pub standard_enemies: RangeInclusive<usize>,
    pub standard_items: RangeInclusive<usize>,
    /// Probability in `[0, 1]` that a generated power-up is super.
    pub super_power_up_chance: f64,
    /// Coins needed to pick up a power-up in the shop.
    pub shop_price: u32,
    pub radii: CollisionRadii,
    pub player: PlayerDefaults,
}

impl GameConfig {
    // ===== timing, all in simulation milliseconds =====
    pub const HIT_COOLDOWN_MS: u64 = 1_000;
    pub const BOSS_CHANGE_TIME_MS: u64 = 10_000;
    pub const BOSS_WEAPON_INTERVAL_MS: u64 = 1_000;
    pub const SPITTER_WEAPON_INTERVAL_MS: u64 = 1_500;

    /// One room per room type, at least.
    pub const MIN_ROOMS: usize = RoomType::ALL.len();

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROOM_WIDTH: f64 = 60.0;
    pub const DEFAULT_ROOM_HEIGHT: f64 = 18.0;
    pub const DEFAULT_SHOP_PRICE: u32 = 3;
    pub const DEFAULT_SUPER_CHANCE: f64 = 0.2;

    pub fn new() -> Self {
        Self {
            room_width: Self::DEFAULT_ROOM_WIDTH,
            room_height: Self::DEFAULT_ROOM_HEIGHT,
            standard_enemies: 1..=4,
            standard_items: 0..=3,
            super_power_up_chance: Self::DEFAULT_SUPER_CHANCE,
            shop_price: Self::DEFAULT_SHOP_PRICE,
            radii: CollisionRadii::default(),
            player: PlayerDefaults::default(),
        }
    }

    pub fn with_room_size(mut self, width: f64, height: f64) -> Self {
        self.room_width = width;
        self.room_height = height;
        self
    }

    pub fn with_standard_enemies(mut self, range: RangeInclusive<usize>) -> Self {
        self.standard_enemies = range;
        self
    }

    pub fn with_standard_items(mut self, range: RangeInclusive<usize>) -> Self {
        self.standard_items = range;
        self
    }

    pub fn with_super_power_up_chance(mut self, chance: f64) -> Self {
        self.super_power_up_chance = chance.clamp(0.0, 1.0);
        self
    }

    pub fn with_shop_price(mut self, price: u32) -> Self {
        self.shop_price = price;
        self
    }

    /// Rejects values level generation cannot sample from.
    ///
    /// Fields are public, so a config can be malformed without going
    /// through the setters; NaN also survives `clamp`.
    pub fn validate(&self) -> GameResult<()> {
        if !(self.room_width.is_finite() && self.room_width > 0.0)
            || !(self.room_height.is_finite() && self.room_height > 0.0)
        {
            return Err(GameError::InvalidArgument(format!(
                "room size must be positive, got {} x {}",
                self.room_width, self.room_height
            )));
        }
        if self.standard_enemies.is_empty() {
            return Err(GameError::InvalidArgument(format!(
                "empty standard enemy range {:?}",
                self.standard_enemies
            )));
        }
        if self.standard_items.is_empty() {
            return Err(GameError::InvalidArgument(format!(
                "empty standard item range {:?}",
                self.standard_items
            )));
        }
        if !(0.0..=1.0).contains(&self.super_power_up_chance) {
            return Err(GameError::InvalidArgument(format!(
                "super power-up chance must be in [0, 1], got {}",
                self.super_power_up_chance
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
