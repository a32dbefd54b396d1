//! Power-ups found in treasure rooms and sold in shops.

use crate::entities::{MapElement, PlayerStats};
use crate::geometry::Point2D;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    RangeUp,
    SpeedUp,
    TearsUp,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::RangeUp,
        PowerUpKind::SpeedUp,
        PowerUpKind::TearsUp,
    ];
}

// Each kind owns its bonus; super power-ups grant the doubled value.
const RANGE_UP: f64 = 1.0;
const RANGE_SUPER_UP: f64 = 2.0;
const SPEED_UP: f64 = 1.0;
const SPEED_SUPER_UP: f64 = 2.0;
const TEARS_UP: u32 = 1;
const TEARS_SUPER_UP: u32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub element: MapElement,
    pub kind: PowerUpKind,
    pub is_super: bool,
    /// Coins required to take it; `None` when free.
    pub price: Option<u32>,
}

impl PowerUp {
    pub const SIZE: f64 = 1.2;

    pub fn new(kind: PowerUpKind, coord: Point2D, is_super: bool) -> Self {
        Self {
            element: MapElement::round(Self::SIZE, coord),
            kind,
            is_super,
            price: None,
        }
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }

    /// Whether `stats` can pay for this power-up.
    pub fn is_affordable(&self, stats: &PlayerStats) -> bool {
        self.price.map_or(true, |price| stats.coins >= price)
    }

    /// Apply the stat bonus.
    pub fn interact(&self, stats: &mut PlayerStats) {
        match self.kind {
            PowerUpKind::RangeUp => {
                stats.range += if self.is_super { RANGE_SUPER_UP } else { RANGE_UP };
            }
            PowerUpKind::SpeedUp => {
                stats.speed += if self.is_super { SPEED_SUPER_UP } else { SPEED_UP };
            }
            PowerUpKind::TearsUp => {
                stats.tears += if self.is_super { TEARS_SUPER_UP } else { TEARS_UP };
            }
        }
    }
}
