use gremlins_core::{
    CellCoord, Direction, EnemyId, EnemyKind, EnemySnapshot, Event, PixelPoint, TELEPORT_RANGE,
    TILE_SIZE,
};
use gremlins_system_enemy_ai::{aim, decide, starting_direction, Situation};
use log::debug;
use rand::Rng;

use crate::{grid::Grid, mover::Mover, projectile::Projectiles, weapon::Weapon};

const TELEPORT_DISTANCE: u32 = TELEPORT_RANGE.unsigned_abs() * TILE_SIZE.unsigned_abs();

/// Hostile entity driven by the enemy AI system.
#[derive(Debug)]
pub struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    mover: Mover,
    weapon: Weapon,
    stationary: bool,
}

impl Enemy {
    /// Spawns an enemy in `cell` and picks its starting direction.
    ///
    /// An enemy with no open neighbour at spawn never moves.
    pub fn spawn<R>(
        id: EnemyId,
        kind: EnemyKind,
        cell: CellCoord,
        weapon: Weapon,
        grid: &Grid,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut mover = Mover::new(
            PixelPoint::from_cell(cell),
            Direction::East,
            kind.speed(),
            kind.etherealness(),
        );
        let start = starting_direction(|direction| mover.validate_move(direction, grid), rng);
        if let Some(direction) = start {
            mover.turn(direction);
        }

        Self {
            id,
            kind,
            mover,
            weapon,
            stationary: start.is_none(),
        }
    }

    /// Identifier of the enemy.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Variant of the enemy.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Movement state of the enemy.
    #[must_use]
    pub const fn mover(&self) -> &Mover {
        &self.mover
    }

    /// Weapon held by the enemy.
    #[must_use]
    pub const fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    /// Direction the enemy faces, or `None` if it never found an opening.
    #[must_use]
    pub fn facing(&self) -> Option<Direction> {
        (!self.stationary).then(|| self.mover.facing())
    }

    /// Fires at the direction chosen by the enemy's aim policy.
    pub fn fire(
        &mut self,
        player: PixelPoint,
        projectiles: &mut Projectiles,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let position = self.mover.position();
        let to_player = position.cell_offset_to(player);
        match aim(self.kind, self.facing(), to_player) {
            Some(direction) => self.weapon.fire(position, direction, projectiles, out_events),
            None => false,
        }
    }

    /// Cools the weapon down and, once aligned, starts the next move.
    pub fn tick<R>(&mut self, grid: &Grid, player: PixelPoint, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.weapon.tick_cooldown();
        if self.stationary || self.mover.advance_move() {
            return;
        }

        let situation = Situation {
            kind: self.kind,
            facing: self.mover.facing(),
            to_player: self.mover.position().cell_offset_to(player),
        };
        let mover = &self.mover;
        let decision = decide(
            situation,
            |direction| mover.validate_move(direction, grid),
            rng,
        );
        if let Some(decision) = decision {
            let _ = self
                .mover
                .start_move(decision.direction, grid, decision.forced);
        }
    }

    /// Moves the enemy to a random empty cell far enough from the wizard.
    ///
    /// Retries until a cell qualifies; the level must leave such a cell open.
    pub fn teleport<R>(&mut self, grid: &Grid, player: PixelPoint, rng: &mut R) -> PixelPoint
    where
        R: Rng + ?Sized,
    {
        let (columns, rows) = grid.dimensions();
        loop {
            let cell = CellCoord::new(rng.gen_range(0..columns), rng.gen_range(0..rows));
            let position = PixelPoint::from_cell(cell);
            if grid.is_empty(cell) && position.manhattan_distance(player) >= TELEPORT_DISTANCE {
                debug!(
                    "enemy {} respawned at column {}, row {}",
                    self.id.get(),
                    cell.column(),
                    cell.row()
                );
                self.mover.relocate(position);
                return position;
            }
        }
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.mover.position(),
            facing: self.facing(),
        }
    }
}
