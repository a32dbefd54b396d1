use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use room_shooter::config::GameConfig;
use room_shooter::entities::{Direction, GridCoord, RoomType};
use room_shooter::geometry::Point2D;
use room_shooter::level::LevelFactory;
use room_shooter::room::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn build(config: GameConfig, room_type: RoomType) -> Room {
    RoomFactory::new(config).build_room_of_type(room_type, GridCoord::ORIGIN, &mut seeded_rng())
}

// ── Population by type ────────────────────────────────────────────────────────

#[test]
fn start_room_holds_only_the_player() {
    let room = build(GameConfig::default(), RoomType::Start);
    let player = room.player().expect("start room has the player");
    assert_eq!(player.element.coord(), room.center());
    assert!(room.items().is_none());
    assert!(room.power_ups().is_none());
    assert!(room.room_ai().is_none());
    assert!(room.is_completed());
}

#[test]
fn shop_sells_priced_power_ups() {
    let config = GameConfig::default().with_shop_price(5);
    let room = build(config, RoomType::Shop);
    let power_ups = room.power_ups().expect("shop has power-ups");
    assert_eq!(power_ups.len(), RoomFactory::SHOP_POWER_UPS);
    assert!(power_ups.iter().all(|p| p.price == Some(5)));
    assert!(room.player().is_none());
    assert!(room.room_ai().is_none());
}

#[test]
fn treasure_room_has_one_free_power_up() {
    let room = build(GameConfig::default(), RoomType::Treasure);
    let power_ups = room.power_ups().expect("treasure has a power-up");
    assert_eq!(power_ups.len(), RoomFactory::TREASURE_POWER_UPS);
    assert_eq!(power_ups[0].price, None);
    assert!(room.is_completed());
}

#[test]
fn boss_room_holds_a_single_boss() {
    let room = build(GameConfig::default(), RoomType::Boss);
    let ai = room.room_ai().expect("boss room has enemies");
    assert_eq!(ai.enemies().len(), 1);
    assert!(ai.enemies()[0].is_boss());
    assert_eq!(ai.enemies()[0].element.coord(), room.center());
    assert!(!room.is_completed());
}

#[test]
fn standard_room_respects_configured_counts() {
    let config = GameConfig::default()
        .with_standard_enemies(2..=2)
        .with_standard_items(3..=3);
    let room = build(config, RoomType::Standard);
    let ai = room.room_ai().expect("standard room has enemies");
    assert_eq!(ai.enemies().len(), 2);
    assert!(ai.enemies().iter().all(|e| !e.is_boss()));
    assert_eq!(room.items().map(<[_]>::len), Some(3));
    assert!(room.power_ups().is_none());
    assert!(room.player().is_none());
    assert!(!room.is_completed());
}

#[test]
fn population_follows_room_type_for_every_level() {
    let factory = LevelFactory::new(GameConfig::default());
    for seed in [1, 7, 42, 1234] {
        for n in 5..=20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let level = factory.create_level(n, &mut rng).expect("level");
            for room in level.rooms() {
                let room_type = room.room_type();
                assert_eq!(room.player().is_some(), room_type == RoomType::Start);
                assert_eq!(room.items().is_some(), room_type == RoomType::Standard);

                let power_ups = room.power_ups().map(<[_]>::len).unwrap_or(0);
                let expected = match room_type {
                    RoomType::Shop => RoomFactory::SHOP_POWER_UPS,
                    RoomType::Treasure => RoomFactory::TREASURE_POWER_UPS,
                    _ => 0,
                };
                assert_eq!(power_ups, expected, "seed {seed}, {room_type:?}");

                let fights = matches!(room_type, RoomType::Standard | RoomType::Boss);
                assert_eq!(room.room_ai().is_some(), fights);
                assert_eq!(room.is_completed(), !fights);
            }
        }
    }
}

#[test]
fn standard_room_spawns_away_from_walls() {
    let config = GameConfig::default()
        .with_standard_enemies(4..=4)
        .with_standard_items(3..=3);
    let factory = RoomFactory::new(config);
    let mut rng = seeded_rng();
    for _ in 0..20 {
        let room = factory.build_standard_room(GridCoord::ORIGIN, &mut rng);
        let inside = |p: Point2D| {
            p.x >= 3.0 && p.x <= room.width() - 3.0 && p.y >= 3.0 && p.y <= room.height() - 3.0
        };
        assert!(room.items().unwrap_or_default().iter().all(|i| inside(i.element.coord())));
        let ai = room.room_ai().expect("standard room has enemies");
        assert!(ai.enemies().iter().all(|e| inside(e.element.coord())));
    }
}

#[test]
fn super_chance_extremes() {
    let always = build(GameConfig::default().with_super_power_up_chance(1.0), RoomType::Shop);
    assert!(always.power_ups().unwrap_or_default().iter().all(|p| p.is_super));

    let never = build(GameConfig::default().with_super_power_up_chance(0.0), RoomType::Shop);
    assert!(never.power_ups().unwrap_or_default().iter().all(|p| !p.is_super));
}

#[test]
fn room_takes_configured_size() {
    let room = build(GameConfig::default().with_room_size(30.0, 12.0), RoomType::Start);
    assert_relative_eq!(room.width(), 30.0);
    assert_relative_eq!(room.height(), 12.0);
    assert_eq!(room.center(), Point2D::new(15.0, 6.0));
}

// ── Doors ─────────────────────────────────────────────────────────────────────

#[test]
fn doors_sit_on_their_walls() {
    let factory = RoomFactory::new(GameConfig::default());
    let room = factory
        .build_room_of_type(RoomType::Start, GridCoord::new(1, 0), &mut seeded_rng())
        .with_doors(&[Direction::Left, Direction::Right]);
    assert_eq!(room.doors().len(), 2);
    assert!(room.door_towards(Direction::Up).is_none());

    let left = room.door_towards(Direction::Left).expect("left door");
    assert_eq!(left.leads_to, GridCoord::new(0, 0));
    assert_eq!(left.element.coord(), Point2D::new(1.0, room.height() / 2.0));

    let right = room.door_towards(Direction::Right).expect("right door");
    assert_eq!(right.leads_to, GridCoord::new(2, 0));
    assert_eq!(right.element.coord(), Point2D::new(room.width() - 1.0, room.height() / 2.0));
}

#[test]
fn entry_point_is_inside_the_wall() {
    let room = build(GameConfig::default(), RoomType::Start);
    assert_eq!(
        room.entry_point(Direction::Left),
        Point2D::new(Room::ENTRY_DEPTH, room.height() / 2.0)
    );
    assert_eq!(
        room.entry_point(Direction::Down),
        Point2D::new(room.width() / 2.0, room.height() - Room::ENTRY_DEPTH)
    );
}

#[test]
fn player_can_be_taken_and_placed() {
    let mut room = build(GameConfig::default(), RoomType::Start);
    let player = room.take_player().expect("player");
    assert!(room.player().is_none());
    room.place_player(player);
    assert!(room.player().is_some());
}
