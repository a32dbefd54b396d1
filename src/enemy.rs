//! Enemies, the boss mode timer and the per-room enemy controller.

use log::debug;

use crate::config::GameConfig;
use crate::entities::MapElement;
use crate::geometry::Point2D;
use crate::strategy::{HitOutcome, HitStrategy, MovementStrategy};
use crate::weapon::{Weapon, WeaponShot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Runs at the player and strikes on contact.
    Chaser,
    /// Keeps its distance and shoots.
    Spitter,
    /// Alternates between both behaviours on a timer.
    Boss,
}

impl EnemyKind {
    pub fn hearts(self) -> u32 {
        match self {
            EnemyKind::Chaser => 2,
            EnemyKind::Spitter => 3,
            EnemyKind::Boss => 12,
        }
    }

    /// Units per second.
    pub fn speed(self) -> f64 {
        match self {
            EnemyKind::Chaser => 6.0,
            EnemyKind::Spitter => 4.0,
            EnemyKind::Boss => 5.0,
        }
    }

    pub fn size(self) -> f64 {
        match self {
            EnemyKind::Chaser => 1.4,
            EnemyKind::Spitter => 1.6,
            EnemyKind::Boss => 3.0,
        }
    }

    fn shot_speed(self) -> f64 {
        match self {
            EnemyKind::Boss => 14.0,
            _ => 10.0,
        }
    }

    fn weapon_interval_ms(self) -> u64 {
        match self {
            EnemyKind::Boss => GameConfig::BOSS_WEAPON_INTERVAL_MS,
            _ => GameConfig::SPITTER_WEAPON_INTERVAL_MS,
        }
    }
}

// ── Boss mode timer ───────────────────────────────────────────────────────────

/// Flips between non-shooting and shooting every
/// [`GameConfig::BOSS_CHANGE_TIME_MS`] of simulation time.
#[derive(Clone, Debug, PartialEq)]
pub struct BossMode {
    last_change_ms: u64,
    shooting: bool,
}

impl BossMode {
    /// Starts in non-shooting mode with the timer running from `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_change_ms: now_ms,
            shooting: false,
        }
    }

    /// Toggles the mode once a full interval has elapsed since the last flip
    /// and restarts the timer. Returns whether a flip happened on this call.
    ///
    /// A second call at the same `now_ms` never flips again.
    pub fn change_mode(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_change_ms) >= GameConfig::BOSS_CHANGE_TIME_MS {
            self.shooting = !self.shooting;
            self.last_change_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn is_shooting(&self) -> bool {
        self.shooting
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub element: MapElement,
    pub kind: EnemyKind,
    pub weapon: Weapon,
    hearts: u32,
    hit_strategy: HitStrategy,
    movement: MovementStrategy,
    boss: Option<BossMode>,
}

impl Enemy {
    fn with_strategies(
        kind: EnemyKind,
        coord: Point2D,
        hit_strategy: HitStrategy,
        movement: MovementStrategy,
        boss: Option<BossMode>,
    ) -> Self {
        Self {
            element: MapElement::round(kind.size(), coord),
            kind,
            weapon: Weapon::new(kind.weapon_interval_ms(), kind.shot_speed(), None),
            hearts: kind.hearts(),
            hit_strategy,
            movement,
            boss,
        }
    }

    pub fn chaser(coord: Point2D, now_ms: u64) -> Self {
        Self::with_strategies(
            EnemyKind::Chaser,
            coord,
            HitStrategy::non_shooting(now_ms),
            MovementStrategy::non_shooting(),
            None,
        )
    }

    pub fn spitter(coord: Point2D) -> Self {
        Self::with_strategies(
            EnemyKind::Spitter,
            coord,
            HitStrategy::shooting(),
            MovementStrategy::shooting(),
            None,
        )
    }

    pub fn boss(coord: Point2D, now_ms: u64) -> Self {
        Self::with_strategies(
            EnemyKind::Boss,
            coord,
            HitStrategy::non_shooting(now_ms),
            MovementStrategy::non_shooting(),
            Some(BossMode::new(now_ms)),
        )
    }

    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    pub fn is_dead(&self) -> bool {
        !self.element.is_alive()
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    pub fn boss_mode(&self) -> Option<&BossMode> {
        self.boss.as_ref()
    }

    pub fn hit_strategy(&self) -> &HitStrategy {
        &self.hit_strategy
    }

    pub fn movement_strategy(&self) -> &MovementStrategy {
        &self.movement
    }

    /// Removes `amount` hearts; returns `true` when this blow killed it.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.hearts = self.hearts.saturating_sub(amount);
        if self.hearts == 0 {
            self.element.kill();
            return true;
        }
        false
    }

    /// Runs the boss timer once and, on a flip, replaces both strategies
    /// together. Call at most once per tick. Non-boss enemies never flip.
    pub fn update_mode(&mut self, now_ms: u64) -> bool {
        let Some(mode) = self.boss.as_mut() else {
            return false;
        };
        if !mode.change_mode(now_ms) {
            return false;
        }
        if mode.is_shooting() {
            self.hit_strategy = HitStrategy::shooting();
            self.movement = MovementStrategy::shooting();
        } else {
            self.hit_strategy = HitStrategy::non_shooting(now_ms);
            self.movement = MovementStrategy::non_shooting();
        }
        let label = if mode.is_shooting() {
            "shooting"
        } else {
            "melee"
        };
        debug!("boss switched to {} mode at {}ms", label, now_ms);
        true
    }

    pub fn move_towards(
        &mut self,
        player: Point2D,
        dt_ms: u64,
        room_width: f64,
        room_height: f64,
    ) -> bool {
        let speed = self.kind.speed();
        self.movement.step(
            &mut self.element,
            player,
            speed,
            dt_ms,
            room_width,
            room_height,
        )
    }

    /// Whether this enemy's box overlaps a circle of `radius` around
    /// `player`.
    pub fn is_touching(&self, player: Point2D, radius: f64) -> bool {
        self.element
            .bounding_box()
            .is_colliding_with(self.element.coord(), player, radius)
    }

    pub fn hit<F: FnOnce()>(&mut self, now_ms: u64, player: Point2D, on_hit: F) -> HitOutcome {
        let origin = self.element.coord();
        self.hit_strategy.hit(now_ms, origin, player, &mut self.weapon, on_hit)
    }
}

// ── Room controller ───────────────────────────────────────────────────────────

/// What the enemies of a room did during one update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AiReport {
    /// Indices of enemies whose melee strike fired this tick.
    pub strikes: Vec<usize>,
    pub shots_fired: usize,
    pub mode_flips: usize,
}

/// The set of enemies attached to a room; the room is complete once none
/// of them is alive.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AIEnemy {
    enemies: Vec<Enemy>,
}

impl AIEnemy {
    pub fn new(enemies: Vec<Enemy>) -> Self {
        Self { enemies }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.enemies.iter().filter(|e| !e.is_dead())
    }

    pub fn is_completed(&self) -> bool {
        self.living_enemies().next().is_none()
    }

    /// Every enemy shot currently in flight.
    pub fn shots(&self) -> impl Iterator<Item = &WeaponShot> + '_ {
        self.enemies.iter().flat_map(|e| e.weapon.shots())
    }

    /// Advance all enemies by one tick: boss timers, movement, attacks and
    /// in-flight shots.
    ///
    /// A melee enemy only swings, and restarts its cooldown, while touching
    /// the circle of `contact_radius` around the player.
    pub fn update(
        &mut self,
        now_ms: u64,
        dt_ms: u64,
        player: Point2D,
        room_size: (f64, f64),
        contact_radius: f64,
    ) -> AiReport {
        let (room_width, room_height) = room_size;
        let mut report = AiReport::default();
        for (i, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.weapon.tick_shots(dt_ms, room_width, room_height);
            if enemy.is_dead() {
                continue;
            }
            if enemy.update_mode(now_ms) {
                report.mode_flips += 1;
            }
            enemy.move_towards(player, dt_ms, room_width, room_height);
            if !enemy.hit_strategy().is_shooting() && !enemy.is_touching(player, contact_radius) {
                continue;
            }
            let mut struck = false;
            match enemy.hit(now_ms, player, || struck = true) {
                HitOutcome::Fired => report.shots_fired += 1,
                HitOutcome::Struck | HitOutcome::Idle => {}
            }
            if struck {
                report.strikes.push(i);
            }
        }
        report
    }

    /// Drops dead enemies together with their shots.
    pub fn remove_dead(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.is_dead());
        before - self.enemies.len()
    }
}
