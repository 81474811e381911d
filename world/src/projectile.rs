use gremlins_core::{
    Direction, Event, PixelPoint, ProjectileId, ProjectileKind, ProjectileSnapshot, ProjectileView,
};

use crate::{grid::Grid, mover::Mover};

/// Ballistic entity fired by a weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projectile {
    id: ProjectileId,
    kind: ProjectileKind,
    mover: Mover,
    collisions_left: u32,
}

impl Projectile {
    /// Creates an aligned projectile travelling along `direction`.
    #[must_use]
    pub const fn new(
        id: ProjectileId,
        kind: ProjectileKind,
        position: PixelPoint,
        direction: Direction,
    ) -> Self {
        Self {
            id,
            kind,
            mover: Mover::new(position, direction, kind.speed(), kind.etherealness()),
            collisions_left: kind.collision_budget(),
        }
    }

    /// Identifier of the projectile.
    #[must_use]
    pub const fn id(&self) -> ProjectileId {
        self.id
    }

    /// Type of the projectile.
    #[must_use]
    pub const fn kind(&self) -> ProjectileKind {
        self.kind
    }

    /// Movement state of the projectile.
    #[must_use]
    pub const fn mover(&self) -> &Mover {
        &self.mover
    }

    /// Tile impacts left before the projectile is removed.
    #[must_use]
    pub const fn collisions_left(&self) -> u32 {
        self.collisions_left
    }

    /// Advances the projectile by one tick; returns whether it stays active.
    ///
    /// A bouncing projectile re-runs the whole sequence after every impact.
    /// Each impact consumes budget, so the loop ends after at most
    /// `collision_budget + 1` rounds.
    pub fn tick(&mut self, grid: &mut Grid, out_events: &mut Vec<Event>) -> bool {
        loop {
            if self.mover.advance_move() {
                return true;
            }

            let facing = self.mover.facing();
            if self.mover.start_move(facing, grid, false) {
                return true;
            }

            let Some(cell) = self.mover.cell_ahead().filter(|cell| grid.contains(*cell)) else {
                return false;
            };

            let breaks = self.kind.penetration().breaks(grid.strength_at(cell));
            if breaks && grid.destroy(cell) {
                out_events.push(Event::TileDestroyed { cell });
            }

            if self.collisions_left == 0 {
                return false;
            }
            self.collisions_left -= 1;

            if self.kind.bounces() {
                self.mover.turn(facing.flip());
                continue;
            }

            if breaks {
                let _ = self.mover.start_move(facing, grid, true);
                return true;
            }

            return false;
        }
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.mover.position(),
            facing: self.mover.facing(),
        }
    }
}

/// Active projectiles of a level along with the identifier allocator.
#[derive(Clone, Debug, Default)]
pub struct Projectiles {
    active: Vec<Projectile>,
    next_id: u32,
}

impl Projectiles {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a projectile and announces it.
    pub fn spawn(
        &mut self,
        kind: ProjectileKind,
        position: PixelPoint,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> ProjectileId {
        let id = ProjectileId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.active.push(Projectile::new(id, kind, position, direction));
        out_events.push(Event::ProjectileFired {
            projectile: id,
            kind,
            position,
            direction,
        });
        id
    }

    /// Advances every projectile, dropping the ones that became inactive.
    pub fn tick(&mut self, grid: &mut Grid, out_events: &mut Vec<Event>) {
        self.active
            .retain_mut(|projectile| projectile.tick(grid, out_events));
    }

    /// Removes the listed projectiles.
    pub fn remove(&mut self, spent: &[ProjectileId]) {
        if spent.is_empty() {
            return;
        }
        self.active.retain(|projectile| !spent.contains(&projectile.id));
    }

    /// Iterator over the active projectiles in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.active.iter()
    }

    /// Number of active projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Reports whether no projectile is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Captures a read-only view of the active projectiles.
    #[must_use]
    pub fn view(&self) -> ProjectileView {
        ProjectileView::from_snapshots(self.active.iter().map(Projectile::snapshot).collect())
    }
}
