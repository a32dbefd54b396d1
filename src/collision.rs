//! Collision queries between a reference element and a list of targets.
//!
//! A [`CollisionCheck`] stores no results: every call to `tick` walks the
//! targets again, because positions change every simulation tick.

use crate::config::CollisionRadii;
use crate::enemy::Enemy;
use crate::entities::{Door, Item, MapElement, Player};
use crate::powerup::PowerUp;
use crate::weapon::WeaponShot;

/// Anything that occupies a spot in a room.
pub trait Placed {
    fn element(&self) -> &MapElement;
}

impl Placed for MapElement {
    fn element(&self) -> &MapElement {
        self
    }
}

impl Placed for Player {
    fn element(&self) -> &MapElement {
        &self.element
    }
}

impl Placed for Item {
    fn element(&self) -> &MapElement {
        &self.element
    }
}

impl Placed for PowerUp {
    fn element(&self) -> &MapElement {
        &self.element
    }
}

impl Placed for Enemy {
    fn element(&self) -> &MapElement {
        &self.element
    }
}

impl Placed for WeaponShot {
    fn element(&self) -> &MapElement {
        &self.element
    }
}

impl Placed for Door {
    fn element(&self) -> &MapElement {
        &self.element
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionCategory {
    ItemPickup,
    PlayerShot,
    EnemyContact,
    EnemyShot,
    Door,
}

impl CollisionCategory {
    pub fn radius(self, radii: &CollisionRadii) -> f64 {
        match self {
            CollisionCategory::ItemPickup => radii.item_pickup,
            CollisionCategory::PlayerShot => radii.player_shot,
            CollisionCategory::EnemyContact => radii.enemy_contact,
            CollisionCategory::EnemyShot => radii.enemy_shot,
            CollisionCategory::Door => radii.door,
        }
    }
}

/// Lazy, restartable query: which targets currently overlap a circle of
/// the category radius around the reference element.
pub struct CollisionCheck<'a, T> {
    reference: &'a MapElement,
    targets: &'a [T],
    radius: f64,
    category: CollisionCategory,
}

impl<'a, T: Placed + 'a> CollisionCheck<'a, T> {
    pub fn new(
        reference: &'a MapElement,
        targets: &'a [T],
        category: CollisionCategory,
        radii: &CollisionRadii,
    ) -> Self {
        Self {
            reference,
            targets,
            radius: category.radius(radii),
            category,
        }
    }

    pub fn category(&self) -> CollisionCategory {
        self.category
    }

    fn colliding(&self) -> impl Iterator<Item = (usize, &'a T)> + 'a {
        let origin = self.reference.coord();
        let radius = self.radius;
        let reference_alive = self.reference.is_alive();
        let targets = self.targets;
        targets
            .iter()
            .enumerate()
            .filter(move |(_, target)| {
                let element = target.element();
                reference_alive
                    && element.is_alive()
                    && element
                        .bounding_box()
                        .is_colliding_with(element.coord(), origin, radius)
            })
    }

    /// Targets colliding right now. Each call starts over.
    pub fn tick(&self) -> impl Iterator<Item = &'a T> + 'a {
        self.colliding().map(|(_, target)| target)
    }

    /// Same as [`Self::tick`] but yields positions in the target slice, so
    /// callers can mutate the hits once the check is dropped.
    pub fn tick_indices(&self) -> impl Iterator<Item = usize> + 'a {
        self.colliding().map(|(i, _)| i)
    }
}

/// Builds the checkers for each collision category from one radius table.
#[derive(Clone, Debug)]
pub struct CollisionCheckFactory {
    radii: CollisionRadii,
}

impl CollisionCheckFactory {
    pub fn new(radii: CollisionRadii) -> Self {
        Self { radii }
    }

    pub fn radii(&self) -> &CollisionRadii {
        &self.radii
    }

    /// Items or power-ups the player is standing on.
    pub fn item_checker<'a, T: Placed + 'a>(
        &self,
        player: &'a Player,
        items: &'a [T],
    ) -> CollisionCheck<'a, T> {
        CollisionCheck::new(
            &player.element,
            items,
            CollisionCategory::ItemPickup,
            &self.radii,
        )
    }

    /// Enemies struck by one of the player's shots.
    pub fn player_shot_checker<'a>(
        &self,
        shot: &'a WeaponShot,
        enemies: &'a [Enemy],
    ) -> CollisionCheck<'a, Enemy> {
        CollisionCheck::new(
            &shot.element,
            enemies,
            CollisionCategory::PlayerShot,
            &self.radii,
        )
    }

    /// Enemies touching the player.
    pub fn enemy_checker<'a>(
        &self,
        player: &'a Player,
        enemies: &'a [Enemy],
    ) -> CollisionCheck<'a, Enemy> {
        CollisionCheck::new(
            &player.element,
            enemies,
            CollisionCategory::EnemyContact,
            &self.radii,
        )
    }

    /// Enemy shots reaching the player.
    pub fn enemy_shot_checker<'a>(
        &self,
        player: &'a Player,
        shots: &'a [WeaponShot],
    ) -> CollisionCheck<'a, WeaponShot> {
        CollisionCheck::new(
            &player.element,
            shots,
            CollisionCategory::EnemyShot,
            &self.radii,
        )
    }

    pub fn door_checker<'a>(
        &self,
        player: &'a Player,
        doors: &'a [Door],
    ) -> CollisionCheck<'a, Door> {
        CollisionCheck::new(
            &player.element,
            doors,
            CollisionCategory::Door,
            &self.radii,
        )
    }
}
