use gremlins_core::{
    CellCoord, EnemyId, EnemyView, Event, FrameInput, PowerupKind, ProjectileView, TileKind,
    GRID_COLUMNS, GRID_ROWS,
};
use gremlins_system_collisions::Collisions;
use log::{debug, info};
use rand::Rng;

use crate::{
    enemy::Enemy,
    grid::{Grid, PowerupChange, Tile},
    layout::{Layout, Marker},
    player::Player,
    powerup::PowerupTransition,
    projectile::Projectiles,
    weapon::Armory,
};

/// Result of advancing a level by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Play continues on this level.
    Continue,
    /// The wizard reached an exit; the campaign should advance.
    ExitReached,
    /// The wizard lost a life; the level was reloaded if any remain.
    LifeLost {
        /// Lives left after the hit.
        lives_remaining: u32,
    },
}

/// A playable level: the grid and every entity living on it.
#[derive(Debug)]
pub struct Level {
    layout: Layout,
    armory: Armory,
    grid: Grid,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Projectiles,
    collisions: Collisions,
    powerup_changes: Vec<PowerupChange>,
}

impl Level {
    /// Builds a level from a validated layout and places the wizard at its entrance.
    pub fn new<R>(layout: Layout, player: Player, armory: Armory, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut level = Self {
            layout,
            armory,
            grid: Grid::new(0, 0),
            player,
            enemies: Vec::new(),
            projectiles: Projectiles::new(),
            collisions: Collisions::new(),
            powerup_changes: Vec::new(),
        };
        level.load(rng);
        level
    }

    /// Rebuilds the grid and every entity from the layout.
    ///
    /// The wizard keeps its lives and returns to the entrance.
    fn load<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let mut grid = Grid::new(GRID_COLUMNS, GRID_ROWS);
        let mut spawns = Vec::new();
        for (cell, marker) in self.layout.cells() {
            match marker {
                Marker::Stone => grid.place(Tile::stone(cell)),
                Marker::Brick => grid.place(Tile::brick(cell)),
                Marker::Exit => grid.place(Tile::exit(cell)),
                Marker::Powerup => {
                    let kind = if rng.gen_bool(0.5) {
                        PowerupKind::Thunderball
                    } else {
                        PowerupKind::Hydroball
                    };
                    grid.place(Tile::powerup(cell, kind));
                }
                Marker::Enemy(kind) => spawns.push((cell, kind)),
                Marker::Entrance | Marker::Empty => {}
            }
        }

        self.grid = grid;
        self.projectiles = Projectiles::new();
        self.enemies.clear();
        for (index, (cell, kind)) in spawns.into_iter().enumerate() {
            let id = EnemyId::new(u32::try_from(index).unwrap_or(u32::MAX));
            let weapon = self.armory.issue(kind.projectile());
            self.enemies
                .push(Enemy::spawn(id, kind, cell, weapon, &self.grid, rng));
        }
        self.player.spawn_at(self.layout.entrance());
    }

    /// Tile grid of the level.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Wizard playing the level.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Consumes the level, handing the wizard back to the campaign.
    #[must_use]
    pub fn into_player(self) -> Player {
        self.player
    }

    /// Enemies living on the level in spawn order.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Active projectiles.
    #[must_use]
    pub const fn projectiles(&self) -> &Projectiles {
        &self.projectiles
    }

    /// Captures a read-only view of the enemies.
    #[must_use]
    pub fn enemy_view(&self) -> EnemyView {
        EnemyView::from_snapshots(self.enemies.iter().map(Enemy::snapshot).collect())
    }

    /// Captures a read-only view of the projectiles.
    #[must_use]
    pub fn projectile_view(&self) -> ProjectileView {
        self.projectiles.view()
    }

    /// Advances the level by one frame.
    ///
    /// Stops early when the wizard reaches an exit or loses a life.
    pub fn tick<R>(
        &mut self,
        input: &FrameInput,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> TickOutcome
    where
        R: Rng + ?Sized,
    {
        self.projectiles.tick(&mut self.grid, out_events);
        self.grid.tick_decay(out_events);

        if self.check_tile_event(rng, out_events) {
            return TickOutcome::ExitReached;
        }

        let outcome = self.manage_collisions(rng, out_events);
        if outcome != TickOutcome::Continue {
            return outcome;
        }

        self.manage_enemies(rng, out_events);

        self.player.handle_movement(input, &self.grid);
        self.player.tick();
        if let Some(key) = input.fire {
            let _ = self
                .player
                .use_weapon(key, &mut self.projectiles, out_events);
        }

        self.tick_powerups(out_events);
        TickOutcome::Continue
    }

    /// Reacts to the tile under an aligned wizard.
    ///
    /// Standing on an available powerup collects it. Returns whether an exit
    /// was reached; powerup tiles always report `false`.
    pub fn check_tile_event<R>(&mut self, rng: &mut R, out_events: &mut Vec<Event>) -> bool
    where
        R: Rng + ?Sized,
    {
        let mover = self.player.mover();
        if !mover.is_aligned() {
            return false;
        }
        let Some(cell) = mover.cell() else {
            return false;
        };

        match self.grid.tile(cell).map(Tile::kind) {
            Some(TileKind::Exit) => {
                info!("wizard reached the exit");
                out_events.push(Event::ExitReached { cell });
                true
            }
            Some(TileKind::Powerup) => {
                self.collect_powerup(cell, rng, out_events);
                false
            }
            _ => false,
        }
    }

    fn collect_powerup<R>(
        &mut self,
        cell: CellCoord,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) where
        R: Rng + ?Sized,
    {
        let Some(kind) = self
            .grid
            .powerup(cell)
            .filter(|powerup| powerup.is_available())
            .map(|powerup| powerup.kind())
        else {
            return;
        };

        let key = kind.key();
        if self.player.holds(key) {
            let held: Vec<_> = self.player.powerups().to_vec();
            for other in held {
                let expired = self
                    .grid
                    .powerup_mut(other)
                    .filter(|powerup| powerup.kind() == kind)
                    .is_some_and(|powerup| powerup.force_expire());
                if expired {
                    self.player.revoke(key, other);
                    out_events.push(Event::PowerupExpired { cell: other, kind });
                }
            }
        }

        if self
            .grid
            .powerup_mut(cell)
            .is_some_and(|powerup| powerup.contact(rng))
        {
            debug!("collected {kind:?} powerup");
            self.player
                .grant(key, self.armory.issue(kind.projectile()), cell);
            out_events.push(Event::PowerupActivated { cell, kind });
        }
    }

    /// Resolves contact between all entities.
    ///
    /// A hit on the wizard costs a life and ends resolution; killed enemies
    /// respawn far from the wizard and spent projectiles are removed.
    pub fn manage_collisions<R>(
        &mut self,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> TickOutcome
    where
        R: Rng + ?Sized,
    {
        let player = self.player.mover().position();
        let enemies = self.enemy_view();
        let projectiles = self.projectiles.view();
        let resolution = self.collisions.resolve(player, &enemies, &projectiles);

        if resolution.player_hit.is_some() {
            return self.lose_life(rng, out_events);
        }

        self.projectiles.remove(&resolution.spent_projectiles);
        for id in resolution.dead_enemies {
            if let Some(enemy) = self.enemies.iter_mut().find(|enemy| enemy.id() == id) {
                let respawn = enemy.teleport(&self.grid, player, rng);
                out_events.push(Event::EnemyKilled {
                    enemy: id,
                    respawn,
                });
            }
        }
        TickOutcome::Continue
    }

    fn lose_life<R>(&mut self, rng: &mut R, out_events: &mut Vec<Event>) -> TickOutcome
    where
        R: Rng + ?Sized,
    {
        for cell in self.player.powerups().to_vec() {
            if let Some(powerup) = self.grid.powerup_mut(cell) {
                if powerup.force_expire() {
                    out_events.push(Event::PowerupExpired {
                        cell,
                        kind: powerup.kind(),
                    });
                }
            }
        }

        let alive = self.player.remove_life();
        let lives_remaining = self.player.lives();
        info!("wizard hit, {lives_remaining} lives remaining");
        out_events.push(Event::PlayerHit { lives_remaining });
        if alive {
            self.load(rng);
        }
        TickOutcome::LifeLost { lives_remaining }
    }

    fn manage_enemies<R>(&mut self, rng: &mut R, out_events: &mut Vec<Event>)
    where
        R: Rng + ?Sized,
    {
        let player = self.player.mover().position();
        for enemy in &mut self.enemies {
            let _ = enemy.fire(player, &mut self.projectiles, out_events);
            enemy.tick(&self.grid, player, rng);
        }
    }

    fn tick_powerups(&mut self, out_events: &mut Vec<Event>) {
        self.powerup_changes.clear();
        self.grid.tick_powerups(&mut self.powerup_changes);
        for change in self.powerup_changes.drain(..) {
            let PowerupChange {
                cell,
                kind,
                transition,
            } = change;
            match transition {
                PowerupTransition::Available => {
                    out_events.push(Event::PowerupAvailable { cell, kind });
                }
                PowerupTransition::Expired => {
                    debug!("{kind:?} powerup expired");
                    self.player.revoke(kind.key(), cell);
                    out_events.push(Event::PowerupExpired { cell, kind });
                }
            }
        }
    }
}
