//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`. A renderer holding the
//! old snapshot never observes a half-applied tick.

use log::{info, trace, warn};
use rand::Rng;

use crate::collision::CollisionCheckFactory;
use crate::config::GameConfig;
use crate::entities::{Direction, Player};
use crate::error::GameResult;
use crate::geometry::Point2D;
use crate::level::{Level, LevelFactory};
use crate::room::Room;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Every room with enemies has been cleared.
    Won,
    GameOver,
}

/// Discrete commands delivered by the front end before a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    Fire(Direction),
    TogglePause,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub level: Level,
    pub config: GameConfig,
    pub status: GameStatus,
    pub paused: bool,
    /// Simulation clock.
    pub now_ms: u64,
    pub frame: u64,
}

// ── Read-only snapshot ────────────────────────────────────────────────────────

impl GameState {
    pub fn current_room(&self) -> &Room {
        self.level.current_room()
    }

    pub fn rooms(&self) -> &[Room] {
        self.level.rooms()
    }

    pub fn completed_rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.level.completed_rooms()
    }

    pub fn uncompleted_rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.level.uncompleted_rooms()
    }

    pub fn player(&self) -> Option<&Player> {
        self.level.player()
    }

    pub fn is_level_complete(&self) -> bool {
        self.level.is_complete()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

/// Generate a level and wrap it in a fresh, running game.
pub fn init_state(
    config: GameConfig,
    number_of_rooms: usize,
    rng: &mut impl Rng,
) -> GameResult<GameState> {
    let level = LevelFactory::new(config.clone()).create_level(number_of_rooms, rng)?;
    Ok(GameState {
        level,
        config,
        status: GameStatus::Playing,
        paused: false,
        now_ms: 0,
        frame: 0,
    })
}

// ── Input-driven state transitions (pure) ─────────────────────────────────────

/// Gap kept between the player's box and the walls.
const WALL_GAP: f64 = 0.05;

pub fn apply_input(state: &GameState, input: &InputEvent) -> GameState {
    match *input {
        InputEvent::TogglePause => {
            if state.status != GameStatus::Playing {
                return state.clone();
            }
            GameState {
                paused: !state.paused,
                ..state.clone()
            }
        }
        InputEvent::Move(dir) => move_player(state, dir),
        InputEvent::Fire(dir) => player_shoot(state, dir),
    }
}

/// Step the player by its speed stat, staying inside the room.
pub fn move_player(state: &GameState, dir: Direction) -> GameState {
    let mut next = state.clone();
    if next.paused || next.status != GameStatus::Playing {
        return next;
    }
    let room = next.level.current_room_mut();
    let (width, height) = (room.width(), room.height());
    if let Some(player) = room.player_mut() {
        let reach = player.element.bounding_box().reach() + WALL_GAP;
        let target = player
            .element
            .coord()
            .translate(dir.vector().scale(player.stats.speed));
        let clamped = Point2D::new(
            target.x.clamp(reach, (width - reach).max(reach)),
            target.y.clamp(reach, (height - reach).max(reach)),
        );
        player.element.set_coord(clamped);
    }
    next
}

/// Fire the player's weapon along `dir` if it has cooled down.
pub fn player_shoot(state: &GameState, dir: Direction) -> GameState {
    let mut next = state.clone();
    if next.paused || next.status != GameStatus::Playing {
        return next;
    }
    let now = next.now_ms;
    if let Some(player) = next.level.current_room_mut().player_mut() {
        let origin = player.element.coord();
        player.weapon.shoot(now, origin, dir.vector());
    }
    next
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// What happened inside the current room during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
struct RoomEvents {
    damage_taken: u32,
    enemies_killed: usize,
    door: Option<Direction>,
}

/// Advance the simulation by `dt_ms` milliseconds.
///
/// Paused or finished games come back unchanged.
pub fn tick(state: &GameState, dt_ms: u64) -> GameState {
    let mut next = state.clone();
    if next.paused || next.status != GameStatus::Playing {
        return next;
    }
    next.now_ms += dt_ms;
    next.frame += 1;
    trace!("tick: frame={} now={}ms", next.frame, next.now_ms);

    let checks = CollisionCheckFactory::new(next.config.radii.clone());
    let events = step_room(next.level.current_room_mut(), &checks, next.now_ms, dt_ms);
    if events.enemies_killed > 0 {
        trace!("{} enemies killed", events.enemies_killed);
    }

    if let Some(dir) = events.door {
        if let Err(err) = next.level.move_through_door(dir) {
            warn!("door transition refused: {err}");
        }
    }

    if next.level.player().map_or(false, Player::is_dead) {
        info!("game over after {} frames", next.frame);
        next.status = GameStatus::GameOver;
    } else if next.level.is_complete() {
        info!("level complete after {} frames", next.frame);
        next.status = GameStatus::Won;
    }
    next
}

/// Runs enemies, shots and every collision category inside one room.
fn step_room(
    room: &mut Room,
    checks: &CollisionCheckFactory,
    now_ms: u64,
    dt_ms: u64,
) -> RoomEvents {
    let (width, height) = (room.width(), room.height());
    let mut events = RoomEvents::default();

    let (player, items, power_ups, mut ai) = room.parts_mut();
    let Some(player) = player else {
        return events;
    };

    // ── 1. Enemies move and attack ────────────────────────────────────────────
    let contact_radius = checks.radii().enemy_contact;
    let strikes = match ai.as_mut() {
        Some(ai) => {
            let at = player.element.coord();
            ai.update(now_ms, dt_ms, at, (width, height), contact_radius)
                .strikes
        }
        None => Vec::new(),
    };

    // ── 2. Player shots advance ───────────────────────────────────────────────
    player.weapon.tick_shots(dt_ms, width, height);

    // ── 3. Item pickup ────────────────────────────────────────────────────────
    if let Some(items) = items {
        let picked: Vec<usize> = checks
            .item_checker(player, items.as_slice())
            .tick_indices()
            .collect();
        for i in picked {
            items[i].collect(&mut player.stats);
            items[i].element.kill();
        }
        items.retain(|item| item.element.is_alive());
    }

    // ── 4. Power-up pickup (shop items only when affordable) ──────────────────
    if let Some(power_ups) = power_ups {
        let touched: Vec<usize> = checks
            .item_checker(player, power_ups.as_slice())
            .tick_indices()
            .collect();
        let mut changed = false;
        for i in touched {
            let power_up = &mut power_ups[i];
            if !power_up.is_affordable(&player.stats) {
                continue;
            }
            player.stats.coins -= power_up.price.unwrap_or(0);
            power_up.interact(&mut player.stats);
            power_up.element.kill();
            changed = true;
        }
        if changed {
            player.refresh_weapon();
        }
        power_ups.retain(|p| p.element.is_alive());
    }

    if let Some(ai) = ai.as_mut() {
        // ── 5. Player shots → enemies ─────────────────────────────────────────
        let hits: Vec<(usize, usize)> = player
            .weapon
            .shots()
            .iter()
            .enumerate()
            .filter_map(|(si, shot)| {
                checks
                    .player_shot_checker(shot, ai.enemies())
                    .tick_indices()
                    .next()
                    .map(|ei| (si, ei))
            })
            .collect();
        for (si, ei) in hits {
            player.weapon.shots_mut()[si].element.kill();
            if ai.enemies_mut()[ei].take_damage(1) {
                events.enemies_killed += 1;
            }
        }
        player.weapon.purge();

        // ── 6. Enemy strikes land only on contact ─────────────────────────────
        let touching: Vec<usize> = checks
            .enemy_checker(player, ai.enemies())
            .tick_indices()
            .collect();
        events.damage_taken += strikes.iter().filter(|&i| touching.contains(i)).count() as u32;

        // ── 7. Enemy shots → player ───────────────────────────────────────────
        for enemy in ai.enemies_mut() {
            let landed: Vec<usize> = checks
                .enemy_shot_checker(player, enemy.weapon.shots())
                .tick_indices()
                .collect();
            for i in &landed {
                enemy.weapon.shots_mut()[*i].element.kill();
            }
            events.damage_taken += landed.len() as u32;
            enemy.weapon.purge();
        }

        ai.remove_dead();
    }

    player.take_damage(events.damage_taken);

    // ── 8. Doors open once the room is cleared ────────────────────────────────
    if room.is_completed() {
        if let Some(player) = room.player() {
            events.door = checks
                .door_checker(player, room.doors())
                .tick()
                .next()
                .map(|door| door.direction);
        }
    }
    events
}
