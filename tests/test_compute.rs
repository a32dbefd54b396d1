use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use room_shooter::compute::*;
use room_shooter::config::GameConfig;
use room_shooter::entities::{Direction, RoomType};
use room_shooter::error::GameError;
use room_shooter::geometry::Point2D;
use room_shooter::powerup::PowerUpKind;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn new_state(config: GameConfig, rooms: usize) -> GameState {
    init_state(config, rooms, &mut seeded_rng()).expect("level")
}

fn player_coord(state: &GameState) -> Point2D {
    state.player().expect("player").element.coord()
}

fn place_player(state: &mut GameState, at: Point2D) {
    state
        .level
        .current_room_mut()
        .player_mut()
        .expect("player")
        .element
        .set_coord(at);
}

/// Stands the player on the right-hand door and ticks once.
fn walk_right(state: &GameState) -> GameState {
    let mut s = state.clone();
    let room = s.current_room();
    let at = Point2D::new(room.width() - 2.0, room.height() / 2.0);
    place_player(&mut s, at);
    tick(&s, 10)
}

fn kill_boss(state: &mut GameState) {
    for room in state.level.rooms_mut() {
        if room.room_type() != RoomType::Boss {
            continue;
        }
        if let Some(ai) = room.room_ai_mut() {
            for enemy in ai.enemies_mut() {
                enemy.take_damage(u32::MAX);
            }
        }
    }
}

/// Five-room level with the player standing in its single standard room.
fn in_standard_room(config: GameConfig) -> GameState {
    let mut s = new_state(config, 5);
    kill_boss(&mut s);
    for _ in 0..4 {
        s = walk_right(&s);
    }
    assert_eq!(s.current_room().room_type(), RoomType::Standard);
    s
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_starts_in_start_room() {
    let s = new_state(GameConfig::default(), 8);
    assert_eq!(s.status, GameStatus::Playing);
    assert!(!s.is_paused());
    assert_eq!(s.now_ms, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.rooms().len(), 8);
    assert_eq!(s.current_room().room_type(), RoomType::Start);
    assert_eq!(s.player().map(|p| p.stats.hearts), Some(6));
}

#[test]
fn init_state_rejects_small_levels() {
    let result = init_state(GameConfig::default(), 4, &mut seeded_rng());
    assert!(matches!(result, Err(GameError::InvalidArgument(_))));
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn pause_freezes_the_simulation() {
    let s = new_state(GameConfig::default(), 5);
    let paused = apply_input(&s, &InputEvent::TogglePause);
    assert!(paused.is_paused());

    let ticked = tick(&paused, 33);
    assert_eq!(ticked.now_ms, 0);
    assert_eq!(ticked.frame, 0);

    let moved = apply_input(&paused, &InputEvent::Move(Direction::Right));
    assert_eq!(player_coord(&moved), player_coord(&s));

    let resumed = apply_input(&paused, &InputEvent::TogglePause);
    assert!(!resumed.is_paused());
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn move_steps_by_player_speed() {
    let s = new_state(GameConfig::default(), 5);
    let start = player_coord(&s);
    let moved = apply_input(&s, &InputEvent::Move(Direction::Right));
    assert_relative_eq!(player_coord(&moved).x, start.x + 1.0);
    assert_relative_eq!(player_coord(&moved).y, start.y);

    let up = apply_input(&s, &InputEvent::Move(Direction::Up));
    assert_relative_eq!(player_coord(&up).y, start.y - 1.0);
}

#[test]
fn move_is_clamped_to_the_room() {
    let mut s = new_state(GameConfig::default(), 5);
    for _ in 0..100 {
        s = apply_input(&s, &InputEvent::Move(Direction::Left));
    }
    assert_relative_eq!(player_coord(&s).x, 0.85, epsilon = 1e-9);
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn fire_is_throttled_by_the_weapon() {
    let s = new_state(GameConfig::default(), 5);
    let once = apply_input(&s, &InputEvent::Fire(Direction::Right));
    let twice = apply_input(&once, &InputEvent::Fire(Direction::Right));
    assert_eq!(twice.player().map(|p| p.weapon.shots().len()), Some(1));
}

#[test]
fn player_shots_advance_each_tick() {
    let s = new_state(GameConfig::default(), 5);
    let start = player_coord(&s);
    let fired = apply_input(&s, &InputEvent::Fire(Direction::Right));
    let next = tick(&fired, 100);
    let shot = &next.player().expect("player").weapon.shots()[0];
    assert_relative_eq!(shot.element.coord().x, start.x + 3.0, epsilon = 1e-9);
}

#[test]
fn player_shots_expire_at_range() {
    let s = new_state(GameConfig::default(), 5);
    let fired = apply_input(&s, &InputEvent::Fire(Direction::Right));
    let next = tick(&fired, 500);
    assert_eq!(next.player().map(|p| p.weapon.shots().len()), Some(0));
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_leaves_input_state_untouched() {
    let s = apply_input(&new_state(GameConfig::default(), 5), &InputEvent::Fire(Direction::Down));
    let before = player_coord(&s);
    let shot_before = s.player().expect("player").weapon.shots()[0].element.coord();

    let next = tick(&s, 33);
    assert_eq!(s.now_ms, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(next.now_ms, 33);
    assert_eq!(next.frame, 1);
    assert_eq!(player_coord(&s), before);
    assert_eq!(s.player().expect("player").weapon.shots()[0].element.coord(), shot_before);
}

#[test]
fn door_moves_player_to_next_room() {
    let s = new_state(GameConfig::default(), 5);
    let next = walk_right(&s);
    assert_eq!(next.level.current_index(), 1);
    assert_eq!(next.current_room().room_type(), RoomType::Shop);
    assert!(next.rooms()[0].player().is_none());
    assert_eq!(player_coord(&next), next.current_room().entry_point(Direction::Left));
}

#[test]
fn door_transition_drops_shots_in_flight() {
    let s = new_state(GameConfig::default(), 5);
    let fired = apply_input(&s, &InputEvent::Fire(Direction::Up));
    let next = walk_right(&fired);
    assert_eq!(next.current_room().room_type(), RoomType::Shop);
    assert_eq!(next.player().map(|p| p.weapon.shots().len()), Some(0));
}

#[test]
fn boss_room_doors_stay_locked() {
    let mut s = new_state(GameConfig::default(), 5);
    for _ in 0..3 {
        s = walk_right(&s);
    }
    assert_eq!(s.current_room().room_type(), RoomType::Boss);
    let next = walk_right(&s);
    assert_eq!(next.current_room().room_type(), RoomType::Boss);
    assert_eq!(next.status, GameStatus::Playing);
}

#[test]
fn dead_player_ends_the_game() {
    let mut s = new_state(GameConfig::default(), 5);
    s.level.current_room_mut().player_mut().expect("player").stats.hearts = 0;
    let over = tick(&s, 33);
    assert_eq!(over.status, GameStatus::GameOver);

    let after = tick(&over, 33);
    assert_eq!(after.frame, over.frame);
    let paused = apply_input(&over, &InputEvent::TogglePause);
    assert!(!paused.is_paused());
}

#[test]
fn clearing_every_room_wins() {
    let mut s = new_state(GameConfig::default(), 6);
    for room in s.level.rooms_mut() {
        if let Some(ai) = room.room_ai_mut() {
            for enemy in ai.enemies_mut() {
                enemy.take_damage(u32::MAX);
            }
        }
    }
    let next = tick(&s, 33);
    assert!(next.is_level_complete());
    assert_eq!(next.status, GameStatus::Won);
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn shop_power_up_costs_coins() {
    let mut s = walk_right(&new_state(GameConfig::default().with_shop_price(3), 5));
    assert_eq!(s.current_room().room_type(), RoomType::Shop);

    let offer = s.current_room().power_ups().expect("shop")[0].clone();
    let before = s.player().expect("player").stats.clone();
    s.level.current_room_mut().player_mut().expect("player").stats.coins = 3;
    place_player(&mut s, offer.element.coord());

    let next = tick(&s, 10);
    assert_eq!(next.current_room().power_ups().map(<[_]>::len), Some(2));
    let player = next.player().expect("player");
    assert_eq!(player.stats.coins, 0);
    match offer.kind {
        PowerUpKind::RangeUp => assert!(player.stats.range > before.range),
        PowerUpKind::SpeedUp => assert!(player.stats.speed > before.speed),
        PowerUpKind::TearsUp => assert!(player.stats.tears > before.tears),
    }
    assert_eq!(player.weapon.interval_ms(), player.stats.fire_interval_ms());
    assert_eq!(player.weapon.range(), Some(player.stats.range));
}

#[test]
fn shop_power_up_stays_without_coins() {
    let mut s = walk_right(&new_state(GameConfig::default(), 5));
    let at = s.current_room().power_ups().expect("shop")[0].element.coord();
    place_player(&mut s, at);
    let next = tick(&s, 10);
    assert_eq!(next.current_room().power_ups().map(<[_]>::len), Some(3));
}

#[test]
fn treasure_power_up_is_free() {
    let mut s = new_state(GameConfig::default(), 5);
    s = walk_right(&walk_right(&s));
    assert_eq!(s.current_room().room_type(), RoomType::Treasure);

    let at = s.current_room().power_ups().expect("treasure")[0].element.coord();
    place_player(&mut s, at);
    let next = tick(&s, 10);
    assert_eq!(next.current_room().power_ups().map(<[_]>::len), Some(0));
    assert_eq!(next.player().map(|p| p.stats.coins), Some(0));
}

#[test]
fn items_are_collected_on_contact() {
    let config = GameConfig::default()
        .with_standard_enemies(1..=1)
        .with_standard_items(1..=1);
    let mut s = in_standard_room(config);

    // Park the enemy in a corner where nothing spawns.
    let room = s.level.current_room_mut();
    let far = Point2D::new(room.width() - 1.5, room.height() - 1.5);
    room.room_ai_mut().expect("enemies").enemies_mut()[0].element.set_coord(far);

    let item = s.current_room().items().expect("items")[0].clone();
    place_player(&mut s, item.element.coord());
    let next = tick(&s, 10);

    assert_eq!(next.current_room().items().map(<[_]>::len), Some(0));
    let stats = &next.player().expect("player").stats;
    match item.kind {
        room_shooter::entities::ItemKind::Coin => assert_eq!(stats.coins, 1),
        room_shooter::entities::ItemKind::Heart => assert_eq!(stats.hearts, stats.max_hearts),
    }
}

// ── Combat ────────────────────────────────────────────────────────────────────

fn one_enemy_room() -> GameState {
    let config = GameConfig::default()
        .with_standard_enemies(1..=1)
        .with_standard_items(0..=0);
    in_standard_room(config)
}

#[test]
fn enemy_next_to_player_deals_one_heart() {
    let mut s = one_enemy_room();
    let center = s.current_room().center();
    place_player(&mut s, center);
    s.level.current_room_mut().room_ai_mut().expect("enemies").enemies_mut()[0]
        .element
        .set_coord(Point2D::new(center.x + 0.5, center.y));
    s.now_ms = 5_000;

    let next = tick(&s, 10);
    assert_eq!(next.player().map(|p| p.stats.hearts), Some(5));
}

#[test]
fn player_shot_damages_enemy() {
    let mut s = one_enemy_room();
    let center = s.current_room().center();
    place_player(&mut s, center);
    s.level.current_room_mut().room_ai_mut().expect("enemies").enemies_mut()[0]
        .element
        .set_coord(Point2D::new(center.x + 10.0, center.y));
    let full = s.current_room().room_ai().expect("enemies").enemies()[0].hearts();

    s = apply_input(&s, &InputEvent::Fire(Direction::Right));
    for _ in 0..30 {
        s = tick(&s, 33);
        let hearts = s.current_room().room_ai().expect("enemies").enemies()[0].hearts();
        if hearts < full {
            break;
        }
    }
    let enemy = &s.current_room().room_ai().expect("enemies").enemies()[0];
    assert_eq!(enemy.hearts(), full - 1);
    assert_eq!(s.player().map(|p| p.weapon.shots().len()), Some(0));
}
