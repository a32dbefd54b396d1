//! Levels: an ordered set of rooms laid out on an integer grid.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Direction, GridCoord, Player, RoomType};
use crate::error::{GameError, GameResult};
use crate::room::{Room, RoomFactory};

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    rooms: Vec<Room>,
    /// Index into `rooms`.
    current: usize,
}

impl Level {
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_room(&self) -> &Room {
        &self.rooms[self.current]
    }

    pub fn current_room_mut(&mut self) -> &mut Room {
        &mut self.rooms[self.current]
    }

    pub fn completed_rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter().filter(|r| r.is_completed())
    }

    pub fn uncompleted_rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter().filter(|r| !r.is_completed())
    }

    /// Every room holding enemies has been cleared.
    pub fn is_complete(&self) -> bool {
        self.rooms
            .iter()
            .filter(|r| r.room_ai().is_some())
            .all(Room::is_completed)
    }

    /// The player, wherever it currently is.
    pub fn player(&self) -> Option<&Player> {
        self.current_room().player()
    }

    pub fn room_index_at(&self, coord: GridCoord) -> Option<usize> {
        self.rooms.iter().position(|r| r.coord() == coord)
    }

    /// Moves the player from the current room through its door on wall
    /// `dir` into the neighbouring room, which becomes current.
    ///
    /// Fails when the current room is not cleared, has no such door, or
    /// does not hold the player.
    pub fn move_through_door(&mut self, dir: Direction) -> GameResult<()> {
        let room = self.current_room();
        if !room.is_completed() {
            return Err(GameError::InvalidState(
                "current room still has enemies".to_string(),
            ));
        }
        let door = room
            .door_towards(dir)
            .ok_or_else(|| GameError::InvalidState(format!("no door towards {dir:?}")))?;
        let target = self.room_index_at(door.leads_to).ok_or_else(|| {
            GameError::InvalidState(format!(
                "door leads outside the level: {:?}",
                door.leads_to
            ))
        })?;
        let mut player = self.current_room_mut().take_player().ok_or_else(|| {
            GameError::InvalidState("player is not in the current room".to_string())
        })?;

        player.weapon.clear_shots();
        let next = &mut self.rooms[target];
        player.element.set_coord(next.entry_point(dir.opposite()));
        next.place_player(player);
        debug!(
            "player moved {:?} from room {} to room {} ({:?})",
            dir,
            self.current,
            target,
            next.room_type()
        );
        self.current = target;
        Ok(())
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct LevelFactory {
    room_factory: RoomFactory,
}

impl LevelFactory {
    pub const MIN_ROOMS: usize = GameConfig::MIN_ROOMS;
    /// Layout grows along this direction from the origin.
    const LAYOUT_DIRECTION: Direction = Direction::Right;

    pub fn new(config: GameConfig) -> Self {
        Self {
            room_factory: RoomFactory::new(config),
        }
    }

    /// Generates a level of `number_of_rooms` rooms with the player in the
    /// START room.
    ///
    /// Fails without building anything when the room count is below
    /// [`Self::MIN_ROOMS`] or the config cannot be sampled.
    pub fn create_level(
        &self,
        number_of_rooms: usize,
        rng: &mut impl Rng,
    ) -> GameResult<Level> {
        self.room_factory.config().validate()?;
        if number_of_rooms < Self::MIN_ROOMS {
            return Err(GameError::InvalidArgument(format!(
                "a level needs at least {} rooms, got {}",
                Self::MIN_ROOMS,
                number_of_rooms
            )));
        }

        let coords = Self::room_coordinates(number_of_rooms);
        let taken: HashSet<GridCoord> = coords.iter().copied().collect();

        let rooms: Vec<Room> = coords
            .iter()
            .enumerate()
            .map(|(i, &coord)| {
                let room = match RoomType::ALL.get(i) {
                    Some(&room_type) => {
                        self.room_factory.build_room_of_type(room_type, coord, rng)
                    }
                    None => self.room_factory.build_standard_room(coord, rng),
                };
                let neighbours: Vec<Direction> = Direction::ALL
                    .iter()
                    .copied()
                    .filter(|&dir| taken.contains(&coord.step(dir)))
                    .collect();
                room.with_doors(&neighbours)
            })
            .collect();

        let current = rooms
            .iter()
            .position(|r| r.room_type() == RoomType::Start)
            .ok_or_else(|| {
                GameError::InvalidState("generated level has no START room".to_string())
            })?;

        debug!("created level with {} rooms", rooms.len());
        Ok(Level { rooms, current })
    }

    /// `count` distinct grid cells, walking from the origin along the
    /// layout direction and skipping cells outside the non-negative quadrant
    /// or already taken.
    pub fn room_coordinates(count: usize) -> Vec<GridCoord> {
        let mut coords: Vec<GridCoord> = Vec::with_capacity(count);
        let mut pos = GridCoord::ORIGIN;
        while coords.len() < count {
            if pos.is_valid() && !coords.contains(&pos) {
                coords.push(pos);
            }
            pos = pos.step(Self::LAYOUT_DIRECTION);
        }
        debug!("room coordinates: {:?}", coords);
        coords
    }
}
