//! Rooms and the factory that populates them by type.

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::enemy::{AIEnemy, Enemy};
use crate::entities::{Direction, Door, GridCoord, Item, ItemKind, MapElement, Player, RoomType};
use crate::geometry::{BoundingBox, Point2D};
use crate::powerup::{PowerUp, PowerUpKind};

/// A bounded rectangular area of the level.
///
/// Optional content is `None` when the room type never carries it, and
/// `Some` (possibly empty) when it does.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub element: MapElement,
    coord: GridCoord,
    room_type: RoomType,
    doors: Vec<Door>,
    player: Option<Player>,
    items: Option<Vec<Item>>,
    power_ups: Option<Vec<PowerUp>>,
    ai: Option<AIEnemy>,
}

impl Room {
    pub const DOOR_SIZE: f64 = 2.0;
    /// How far inside the wall a player lands after crossing a door.
    pub const ENTRY_DEPTH: f64 = 3.5;

    fn empty(room_type: RoomType, coord: GridCoord, width: f64, height: f64) -> Self {
        Self {
            element: MapElement::new(
                width,
                height,
                Point2D::new(coord.x as f64, coord.y as f64),
                BoundingBox::rectangle(width, height),
            ),
            coord,
            room_type,
            doors: Vec::new(),
            player: None,
            items: None,
            power_ups: None,
            ai: None,
        }
    }

    /// Attaches one door per direction in `towards`, each leading to the
    /// neighbouring grid cell.
    pub fn with_doors(mut self, towards: &[Direction]) -> Self {
        self.doors = towards
            .iter()
            .map(|&dir| Door {
                element: MapElement::new(
                    Self::DOOR_SIZE,
                    Self::DOOR_SIZE,
                    self.wall_point(dir, Self::DOOR_SIZE / 2.0),
                    BoundingBox::rectangle(Self::DOOR_SIZE, Self::DOOR_SIZE),
                ),
                direction: dir,
                leads_to: self.coord.step(dir),
            })
            .collect();
        self
    }

    /// Middle of the wall `dir`, `depth` units inside the room.
    fn wall_point(&self, dir: Direction, depth: f64) -> Point2D {
        let (w, h) = (self.width(), self.height());
        match dir {
            Direction::Up => Point2D::new(w / 2.0, depth),
            Direction::Down => Point2D::new(w / 2.0, h - depth),
            Direction::Left => Point2D::new(depth, h / 2.0),
            Direction::Right => Point2D::new(w - depth, h / 2.0),
        }
    }

    /// Where a player arriving through the door on wall `dir` is placed.
    pub fn entry_point(&self, dir: Direction) -> Point2D {
        self.wall_point(dir, Self::ENTRY_DEPTH)
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.width() / 2.0, self.height() / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.element.width
    }

    pub fn height(&self) -> f64 {
        self.element.height
    }

    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door_towards(&self, dir: Direction) -> Option<&Door> {
        self.doors.iter().find(|d| d.direction == dir)
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    pub fn take_player(&mut self) -> Option<Player> {
        self.player.take()
    }

    pub fn place_player(&mut self, player: Player) {
        self.player = Some(player);
    }

    pub fn items(&self) -> Option<&[Item]> {
        self.items.as_deref()
    }

    pub fn items_mut(&mut self) -> Option<&mut Vec<Item>> {
        self.items.as_mut()
    }

    pub fn power_ups(&self) -> Option<&[PowerUp]> {
        self.power_ups.as_deref()
    }

    pub fn power_ups_mut(&mut self) -> Option<&mut Vec<PowerUp>> {
        self.power_ups.as_mut()
    }

    pub fn room_ai(&self) -> Option<&AIEnemy> {
        self.ai.as_ref()
    }

    pub fn room_ai_mut(&mut self) -> Option<&mut AIEnemy> {
        self.ai.as_mut()
    }

    /// Split borrow used by the simulation step.
    pub(crate) fn parts_mut(
        &mut self,
    ) -> (
        Option<&mut Player>,
        Option<&mut Vec<Item>>,
        Option<&mut Vec<PowerUp>>,
        Option<&mut AIEnemy>,
    ) {
        (
            self.player.as_mut(),
            self.items.as_mut(),
            self.power_ups.as_mut(),
            self.ai.as_mut(),
        )
    }

    /// A room without enemies is complete from the start.
    pub fn is_completed(&self) -> bool {
        self.ai.as_ref().map_or(true, AIEnemy::is_completed)
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

/// Builds rooms that respect the population rules of their type.
#[derive(Clone, Debug)]
pub struct RoomFactory {
    config: GameConfig,
}

impl RoomFactory {
    pub const SHOP_POWER_UPS: usize = 3;
    pub const TREASURE_POWER_UPS: usize = 1;
    /// Entities spawn at least this far from any wall.
    const WALL_MARGIN: f64 = 3.0;
    /// Simulation time at which generated enemies start their timers.
    const SPAWN_TIME_MS: u64 = 0;

    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn build_room_of_type(
        &self,
        room_type: RoomType,
        coord: GridCoord,
        rng: &mut impl Rng,
    ) -> Room {
        let (width, height) = (self.config.room_width, self.config.room_height);
        let mut room = Room::empty(room_type, coord, width, height);
        match room_type {
            RoomType::Start => {
                room.player = Some(Player::new(room.center(), &self.config.player));
            }
            RoomType::Shop => {
                let price = Some(self.config.shop_price);
                room.power_ups = Some(self.power_ups(&room, Self::SHOP_POWER_UPS, price, rng));
            }
            RoomType::Treasure => {
                room.power_ups = Some(self.power_ups(&room, Self::TREASURE_POWER_UPS, None, rng));
            }
            RoomType::Boss => {
                let boss = Enemy::boss(room.center(), Self::SPAWN_TIME_MS);
                room.ai = Some(AIEnemy::new(vec![boss]));
            }
            RoomType::Standard => {
                let item_count = rng.gen_range(self.config.standard_items.clone());
                let items = (0..item_count)
                    .map(|_| {
                        let kind = if rng.gen_bool(0.5) {
                            ItemKind::Heart
                        } else {
                            ItemKind::Coin
                        };
                        Item::new(kind, self.random_spot(&room, rng))
                    })
                    .collect();
                room.items = Some(items);

                let enemy_count = rng.gen_range(self.config.standard_enemies.clone());
                let enemies = (0..enemy_count)
                    .map(|_| {
                        let spot = self.random_spot(&room, rng);
                        if rng.gen_bool(0.5) {
                            Enemy::chaser(spot, Self::SPAWN_TIME_MS)
                        } else {
                            Enemy::spitter(spot)
                        }
                    })
                    .collect();
                room.ai = Some(AIEnemy::new(enemies));
            }
        }
        debug!(
            "built {:?} room at ({}, {}): items={:?} power_ups={:?} enemies={:?}",
            room_type,
            coord.x,
            coord.y,
            room.items.as_ref().map(Vec::len),
            room.power_ups.as_ref().map(Vec::len),
            room.ai.as_ref().map(|ai| ai.enemies().len()),
        );
        room
    }

    pub fn build_standard_room(&self, coord: GridCoord, rng: &mut impl Rng) -> Room {
        self.build_room_of_type(RoomType::Standard, coord, rng)
    }

    /// `count` power-ups evenly spaced along the middle row.
    fn power_ups(
        &self,
        room: &Room,
        count: usize,
        price: Option<u32>,
        rng: &mut impl Rng,
    ) -> Vec<PowerUp> {
        let spacing = room.width() / (count as f64 + 1.0);
        (0..count)
            .map(|i| {
                let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
                let is_super = rng.gen_bool(self.config.super_power_up_chance.clamp(0.0, 1.0));
                let spot = Point2D::new(spacing * (i as f64 + 1.0), room.height() / 2.0);
                let power_up = PowerUp::new(kind, spot, is_super);
                match price {
                    Some(p) => power_up.with_price(p),
                    None => power_up,
                }
            })
            .collect()
    }

    fn random_spot(&self, room: &Room, rng: &mut impl Rng) -> Point2D {
        let margin_x = Self::WALL_MARGIN.min(room.width() / 2.0);
        let margin_y = Self::WALL_MARGIN.min(room.height() / 2.0);
        Point2D::new(
            rng.gen_range(margin_x..=room.width() - margin_x),
            rng.gen_range(margin_y..=room.height() - margin_y),
        )
    }
}
