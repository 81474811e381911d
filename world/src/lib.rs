#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Gremlins simulation.
//!
//! The [`Game`] owns the campaign, the current [`Level`], and the single
//! random number generator every random decision draws from. Adapters drive it
//! exclusively through [`apply`] and read it through the [`query`] module.

mod enemy;
mod grid;
mod layout;
mod level;
mod mover;
mod player;
mod powerup;
mod projectile;
mod weapon;

use gremlins_core::{
    CampaignError, CampaignSettings, Command, Event, GameStatus, LevelProgress, Outcome,
    FRAME_DURATION, RESTART_DELAY_FRAMES,
};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use enemy::Enemy;
pub use grid::{Grid, PowerupChange, Tile};
pub use layout::{Layout, Marker};
pub use level::{Level, TickOutcome};
pub use mover::Mover;
pub use player::Player;
pub use powerup::{Powerup, PowerupTransition};
pub use projectile::{Projectile, Projectiles};
pub use weapon::{Armory, Weapon};

/// Represents a campaign of levels played in order.
#[derive(Debug)]
pub struct Game {
    settings: CampaignSettings,
    rng: ChaCha8Rng,
    level_number: u32,
    level: Option<Level>,
    status: GameStatus,
    restart_delay: u32,
}

impl Game {
    /// Creates a campaign seeded with `seed` and starts its first valid level.
    pub fn start(
        settings: CampaignSettings,
        seed: u64,
        out_events: &mut Vec<Event>,
    ) -> Result<Self, CampaignError> {
        if settings.levels.is_empty() {
            return Err(CampaignError::NoLevels);
        }
        if settings.lives == 0 {
            return Err(CampaignError::NoLives);
        }

        let mut game = Self {
            settings,
            rng: ChaCha8Rng::seed_from_u64(seed),
            level_number: 0,
            level: None,
            status: GameStatus::Playing,
            restart_delay: 0,
        };
        game.progress_level(out_events);
        Ok(game)
    }

    /// Runs the tile event for the wizard's cell, advancing past exits.
    ///
    /// Returns whether the wizard stood on an exit.
    pub fn check_tile_event(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(level) = self.level.as_mut() else {
            return false;
        };
        if !level.check_tile_event(&mut self.rng, out_events) {
            return false;
        }
        self.progress_level(out_events);
        true
    }

    fn total_levels(&self) -> u32 {
        u32::try_from(self.settings.levels.len()).unwrap_or(u32::MAX)
    }

    /// Starts the next level with a valid layout, or wins once none remain.
    ///
    /// Lives carry over from the level being left.
    fn progress_level(&mut self, out_events: &mut Vec<Event>) {
        let lives = self
            .level
            .as_ref()
            .map_or(self.settings.lives, |level| level.player().lives());
        let total = self.total_levels();

        loop {
            self.level_number += 1;
            let index = (self.level_number - 1) as usize;
            let Some(settings) = self.settings.levels.get(index) else {
                self.finish(Outcome::Won, out_events);
                return;
            };

            match Layout::parse(&settings.layout) {
                Ok(layout) => {
                    let armory =
                        Armory::new(settings.wizard_cooldown(), settings.enemy_cooldown());
                    let player = Player::new(lives, &armory);
                    self.level = Some(Level::new(layout, player, armory, &mut self.rng));
                    let progress = LevelProgress {
                        number: self.level_number,
                        total,
                    };
                    info!("level {} of {} started", progress.number, progress.total);
                    out_events.push(Event::LevelStarted { progress });
                    return;
                }
                Err(reason) => {
                    warn!("skipping level {}: {reason}", self.level_number);
                    out_events.push(Event::LayoutRejected {
                        number: self.level_number,
                        reason,
                    });
                }
            }
        }
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.level = None;
        self.level_number = 0;
        self.status = GameStatus::Playing;
        self.restart_delay = 0;
        self.progress_level(out_events);
    }

    fn finish(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        info!("game ended: {outcome:?}");
        self.status = GameStatus::Finished(outcome);
        self.restart_delay = RESTART_DELAY_FRAMES;
        out_events.push(Event::GameEnded { outcome });
    }
}

/// Applies the provided command to the game, mutating state deterministically.
pub fn apply(game: &mut Game, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { input } => {
            out_events.push(Event::TimeAdvanced { dt: FRAME_DURATION });
            if let GameStatus::Finished(_) = game.status {
                game.restart_delay = game.restart_delay.saturating_sub(1);
                return;
            }

            let Some(level) = game.level.as_mut() else {
                return;
            };
            match level.tick(&input, &mut game.rng, out_events) {
                TickOutcome::ExitReached => game.progress_level(out_events),
                TickOutcome::LifeLost { lives_remaining: 0 } => {
                    game.finish(Outcome::Lost, out_events);
                }
                TickOutcome::LifeLost { .. } | TickOutcome::Continue => {}
            }
        }
        Command::AdvanceLevel => {
            if game.status == GameStatus::Playing {
                game.progress_level(out_events);
            }
        }
        Command::EndGame { outcome } => {
            if game.status == GameStatus::Playing {
                game.finish(outcome, out_events);
            }
        }
        Command::Restart => {
            if matches!(game.status, GameStatus::Finished(_)) && game.restart_delay == 0 {
                game.reset(out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use super::{Game, Level};
    use gremlins_core::{
        EnemyView, GameStatus, HudSnapshot, LevelProgress, PlayerSnapshot, ProjectileView,
        TileSnapshot,
    };

    /// Lifecycle state of the campaign.
    #[must_use]
    pub fn status(game: &Game) -> GameStatus {
        game.status
    }

    /// Position of the current level within the campaign.
    #[must_use]
    pub fn progress(game: &Game) -> LevelProgress {
        LevelProgress {
            number: game.level_number,
            total: game.total_levels(),
        }
    }

    /// Reports whether a restart request would be honoured.
    #[must_use]
    pub fn restart_ready(game: &Game) -> bool {
        matches!(game.status, GameStatus::Finished(_)) && game.restart_delay == 0
    }

    /// Level being played, or the last one played once the campaign finished.
    #[must_use]
    pub fn level(game: &Game) -> Option<&Level> {
        game.level.as_ref()
    }

    /// Captures every tile of the current level in row-major order.
    #[must_use]
    pub fn tiles(game: &Game) -> Vec<TileSnapshot> {
        game.level
            .as_ref()
            .map(|level| level.grid().tiles().map(|tile| tile.snapshot()).collect())
            .unwrap_or_default()
    }

    /// Captures the wizard's drawable state.
    #[must_use]
    pub fn player(game: &Game) -> Option<PlayerSnapshot> {
        game.level.as_ref().map(|level| level.player().snapshot())
    }

    /// Captures a read-only view of the enemies.
    #[must_use]
    pub fn enemy_view(game: &Game) -> EnemyView {
        game.level
            .as_ref()
            .map(Level::enemy_view)
            .unwrap_or_default()
    }

    /// Captures a read-only view of the projectiles.
    #[must_use]
    pub fn projectile_view(game: &Game) -> ProjectileView {
        game.level
            .as_ref()
            .map(Level::projectile_view)
            .unwrap_or_default()
    }

    /// Captures the information shown on the heads-up display.
    #[must_use]
    pub fn hud(game: &Game) -> Option<HudSnapshot> {
        let level = game.level.as_ref()?;
        let player = level.player();
        let powerups = player
            .powerups()
            .iter()
            .filter_map(|cell| level.grid().powerup(*cell))
            .filter(|powerup| powerup.is_active())
            .map(|powerup| (powerup.kind(), powerup.active_for()))
            .collect();
        Some(HudSnapshot {
            lives: player.lives(),
            progress: progress(game),
            powerups,
            cooldowns: player.cooldowns(),
        })
    }
}
