use std::collections::BTreeMap;

use gremlins_core::{
    CellCoord, CooldownSnapshot, Direction, Etherealness, Event, FireKey, FrameInput, PixelPoint,
    PlayerSnapshot, ProjectileKind, PLAYER_SPEED,
};

use crate::{
    grid::Grid,
    mover::Mover,
    projectile::Projectiles,
    weapon::{Armory, Weapon},
};

/// Wizard controlled through sampled frame input.
#[derive(Debug)]
pub struct Player {
    mover: Mover,
    lives: u32,
    weapons: BTreeMap<FireKey, Weapon>,
    powerups: Vec<CellCoord>,
}

impl Player {
    /// Creates a wizard holding only the fireball launcher.
    #[must_use]
    pub fn new(lives: u32, armory: &Armory) -> Self {
        let mut weapons = BTreeMap::new();
        let _ = weapons.insert(FireKey::Primary, armory.issue(ProjectileKind::Fireball));
        Self {
            mover: Mover::new(
                PixelPoint::new(0, 0),
                Direction::East,
                PLAYER_SPEED,
                Etherealness::SOLID,
            ),
            lives,
            weapons,
            powerups: Vec::new(),
        }
    }

    /// Movement state of the wizard.
    #[must_use]
    pub const fn mover(&self) -> &Mover {
        &self.mover
    }

    /// Lives left, including the current one.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Cells of the powerups whose weapons the wizard currently holds.
    #[must_use]
    pub fn powerups(&self) -> &[CellCoord] {
        &self.powerups
    }

    /// Reports whether a weapon is bound to `key`.
    #[must_use]
    pub fn holds(&self, key: FireKey) -> bool {
        self.weapons.contains_key(&key)
    }

    /// Weapon bound to `key`, if any.
    #[must_use]
    pub fn weapon(&self, key: FireKey) -> Option<&Weapon> {
        self.weapons.get(&key)
    }

    /// Places the wizard on `cell`, cancelling any move and facing east.
    pub fn spawn_at(&mut self, cell: CellCoord) {
        self.mover.relocate(PixelPoint::from_cell(cell));
        self.mover.turn(Direction::East);
    }

    /// Attempts the held movement directions in input order.
    ///
    /// The first accepted move wins; until then every attempt turns the wizard.
    pub fn handle_movement(&mut self, input: &FrameInput, grid: &Grid) {
        for direction in input.held_directions() {
            let _ = self.mover.start_move(direction, grid, false);
        }
    }

    /// Advances the current move and cools every weapon down.
    pub fn tick(&mut self) {
        let _ = self.mover.advance_move();
        for weapon in self.weapons.values_mut() {
            weapon.tick_cooldown();
        }
    }

    /// Fires the weapon bound to `key` along the wizard's facing.
    pub fn use_weapon(
        &mut self,
        key: FireKey,
        projectiles: &mut Projectiles,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let position = self.mover.position();
        let facing = self.mover.facing();
        self.weapons
            .get_mut(&key)
            .is_some_and(|weapon| weapon.fire(position, facing, projectiles, out_events))
    }

    /// Binds a powerup weapon and records the powerup it came from.
    pub fn grant(&mut self, key: FireKey, weapon: Weapon, source: CellCoord) {
        let _ = self.weapons.insert(key, weapon);
        if !self.powerups.contains(&source) {
            self.powerups.push(source);
        }
    }

    /// Removes the weapon a powerup granted.
    pub fn revoke(&mut self, key: FireKey, source: CellCoord) {
        if key != FireKey::Primary {
            let _ = self.weapons.remove(&key);
        }
        self.powerups.retain(|cell| *cell != source);
    }

    /// Takes a life and strips every powerup weapon; returns whether lives remain.
    pub fn remove_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.weapons.retain(|key, _| *key == FireKey::Primary);
        self.powerups.clear();
        self.lives > 0
    }

    /// Cooldowns of every held weapon ordered by fire key.
    #[must_use]
    pub fn cooldowns(&self) -> Vec<CooldownSnapshot> {
        self.weapons
            .iter()
            .map(|(key, weapon)| CooldownSnapshot {
                key: *key,
                fraction: weapon.cooldown_fraction(),
            })
            .collect()
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.mover.position(),
            facing: self.mover.facing(),
            lives: self.lives,
        }
    }
}
