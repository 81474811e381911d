use std::time::Duration;

use gremlins_core::{
    CollisionCategory, Direction, Event, PixelPoint, ProjectileKind, FRAME_DURATION,
};

use crate::projectile::Projectiles;

/// Cooldown-gated launcher owned by a single wielder.
///
/// Not `Clone`: every wielder receives its own weapon from an [`Armory`].
#[derive(Debug, PartialEq, Eq)]
pub struct Weapon {
    kind: ProjectileKind,
    cooldown: Duration,
    remaining: Duration,
}

impl Weapon {
    /// Creates a ready weapon.
    #[must_use]
    pub const fn new(kind: ProjectileKind, cooldown: Duration) -> Self {
        Self {
            kind,
            cooldown,
            remaining: Duration::ZERO,
        }
    }

    /// Type of projectile the weapon spawns.
    #[must_use]
    pub const fn kind(&self) -> ProjectileKind {
        self.kind
    }

    /// Time left before the weapon can fire again.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Reports whether the weapon can fire.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Remaining share of the cooldown, from `0.0` (ready) to `1.0`.
    #[must_use]
    pub fn cooldown_fraction(&self) -> f32 {
        if self.cooldown.is_zero() {
            return 0.0;
        }
        self.remaining.as_secs_f32() / self.cooldown.as_secs_f32()
    }

    /// Spawns a projectile from the tile containing `position`.
    ///
    /// Returns `false` without side effects while cooling down.
    pub fn fire(
        &mut self,
        position: PixelPoint,
        direction: Direction,
        sink: &mut Projectiles,
        out_events: &mut Vec<Event>,
    ) -> bool {
        if !self.is_ready() {
            return false;
        }

        let _ = sink.spawn(self.kind, position.snapped(), direction, out_events);
        self.remaining = self.cooldown;
        true
    }

    /// Counts the cooldown down by one frame.
    pub fn tick_cooldown(&mut self) {
        self.remaining = self.remaining.saturating_sub(FRAME_DURATION);
    }
}

/// Issues fresh weapons using the cooldowns of the current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Armory {
    wizard_cooldown: Duration,
    enemy_cooldown: Duration,
}

impl Armory {
    /// Creates an armory with the provided per-side cooldowns.
    #[must_use]
    pub const fn new(wizard_cooldown: Duration, enemy_cooldown: Duration) -> Self {
        Self {
            wizard_cooldown,
            enemy_cooldown,
        }
    }

    /// Issues a ready weapon firing `kind`, cooled down per the projectile's side.
    #[must_use]
    pub const fn issue(&self, kind: ProjectileKind) -> Weapon {
        let cooldown = match kind.category() {
            CollisionCategory::Player => self.wizard_cooldown,
            CollisionCategory::Enemy => self.enemy_cooldown,
        };
        Weapon::new(kind, cooldown)
    }
}
