//! Pluggable enemy behaviour: how an enemy moves and how it attacks.
//!
//! Both policies come in exactly two flavours, shooting and non-shooting.
//! They are plain values, so swapping behaviour means replacing the value.
//! Timing uses the simulation clock passed in by the caller.

use crate::config::GameConfig;
use crate::entities::MapElement;
use crate::geometry::Point2D;
use crate::weapon::Weapon;

// ── Attack ────────────────────────────────────────────────────────────────────

/// What a single `hit` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Still cooling down; nothing happened.
    Idle,
    /// A melee strike fired the caller's callback.
    Struck,
    /// A shot was spawned toward the target.
    Fired,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HitStrategy {
    /// Melee strike at most once per [`GameConfig::HIT_COOLDOWN_MS`].
    NonShooting { last_hit_ms: u64 },
    /// Fires the owner's weapon; cadence is the weapon's own interval.
    Shooting,
}

impl HitStrategy {
    /// The cooldown starts running at `now_ms`.
    pub fn non_shooting(now_ms: u64) -> Self {
        HitStrategy::NonShooting {
            last_hit_ms: now_ms,
        }
    }

    pub fn shooting() -> Self {
        HitStrategy::Shooting
    }

    pub fn is_shooting(&self) -> bool {
        matches!(self, HitStrategy::Shooting)
    }

    /// Attempt an attack from `origin` at `target`.
    ///
    /// Each call while the cooldown is running is a no-op; the attack is not
    /// queued for later.
    pub fn hit<F: FnOnce()>(
        &mut self,
        now_ms: u64,
        origin: Point2D,
        target: Point2D,
        weapon: &mut Weapon,
        on_hit: F,
    ) -> HitOutcome {
        match self {
            HitStrategy::NonShooting { last_hit_ms } => {
                if now_ms.saturating_sub(*last_hit_ms) >= GameConfig::HIT_COOLDOWN_MS {
                    on_hit();
                    *last_hit_ms = now_ms;
                    HitOutcome::Struck
                } else {
                    HitOutcome::Idle
                }
            }
            HitStrategy::Shooting => {
                if weapon.shoot(now_ms, origin, target - origin) {
                    HitOutcome::Fired
                } else {
                    HitOutcome::Idle
                }
            }
        }
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovementStrategy {
    /// Head straight for the player.
    NonShooting,
    /// Hold a firing distance from the player.
    Shooting { keep_distance: f64 },
}

impl MovementStrategy {
    pub const DEFAULT_KEEP_DISTANCE: f64 = 8.0;
    /// Dead band around `keep_distance` where a shooter stands still.
    const KEEP_TOLERANCE: f64 = 0.5;

    pub fn non_shooting() -> Self {
        MovementStrategy::NonShooting
    }

    pub fn shooting() -> Self {
        MovementStrategy::Shooting {
            keep_distance: Self::DEFAULT_KEEP_DISTANCE,
        }
    }

    pub fn is_shooting(&self) -> bool {
        matches!(self, MovementStrategy::Shooting { .. })
    }

    /// Move `element` one step relative to `player` inside a
    /// `room_width` x `room_height` room.
    ///
    /// A step that would touch the room perimeter is rejected. Returns
    /// whether the element moved.
    pub fn step(
        &self,
        element: &mut MapElement,
        player: Point2D,
        speed: f64,
        dt_ms: u64,
        room_width: f64,
        room_height: f64,
    ) -> bool {
        let pos = element.coord();
        let to_player = player - pos;
        let distance = to_player.module();
        let budget = speed * dt_ms as f64 / 1_000.0;

        let delta = match *self {
            MovementStrategy::NonShooting => to_player.normalize().scale(budget.min(distance)),
            MovementStrategy::Shooting { keep_distance } => {
                if distance > keep_distance + Self::KEEP_TOLERANCE {
                    to_player.normalize().scale(budget.min(distance - keep_distance))
                } else if distance < keep_distance - Self::KEEP_TOLERANCE {
                    to_player.normalize().scale(-budget.min(keep_distance - distance))
                } else {
                    return false;
                }
            }
        };
        if delta.is_zero() {
            return false;
        }

        let candidate = pos.translate(delta);
        if element
            .bounding_box()
            .is_colliding_with_rect_perimeter(candidate, room_width, room_height)
        {
            return false;
        }
        element.set_coord(candidate);
        true
    }
}
