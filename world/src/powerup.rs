use std::time::Duration;

use gremlins_core::{PowerupKind, PowerupSnapshot, FRAMES_PER_SECOND, FRAME_DURATION};
use rand::Rng;

/// Change in a powerup's timers reported by [`Powerup::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerupTransition {
    /// The availability countdown finished; the powerup can be collected.
    Available,
    /// The active countdown finished; the granted weapon must be removed.
    Expired,
}

/// Timer state machine carried by a powerup tile.
///
/// Exactly one countdown is live at a time: the active timer while the granted
/// weapon is held, otherwise the availability timer until the powerup can be
/// collected again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Powerup {
    kind: PowerupKind,
    available: bool,
    active_frames: u32,
    availability_frames: u32,
}

impl Powerup {
    /// Creates a powerup that becomes available after its idle period.
    #[must_use]
    pub fn new(kind: PowerupKind) -> Self {
        Self {
            kind,
            available: false,
            active_frames: 0,
            availability_frames: idle_seconds(kind) * FRAMES_PER_SECOND,
        }
    }

    /// Type of the powerup.
    #[must_use]
    pub const fn kind(&self) -> PowerupKind {
        self.kind
    }

    /// Reports whether the powerup can be collected.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Reports whether the granted weapon is currently held.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active_frames > 0
    }

    /// Time left before the granted weapon is removed.
    #[must_use]
    pub fn active_for(&self) -> Duration {
        FRAME_DURATION * self.active_frames
    }

    /// Ticks left before the powerup becomes available.
    #[must_use]
    pub const fn availability_frames(&self) -> u32 {
        self.availability_frames
    }

    /// Advances whichever countdown is live by one frame.
    pub fn tick(&mut self) -> Option<PowerupTransition> {
        if self.active_frames > 0 {
            self.active_frames -= 1;
            return (self.active_frames == 0).then_some(PowerupTransition::Expired);
        }

        if self.availability_frames > 0 {
            self.availability_frames -= 1;
            if self.availability_frames == 0 {
                self.available = true;
                return Some(PowerupTransition::Available);
            }
        }

        None
    }

    /// Collects the powerup if it is available.
    ///
    /// Starts the active countdown and rolls the next availability countdown
    /// between half and one and a half idle periods.
    pub fn contact<R>(&mut self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        if !self.available {
            return false;
        }

        self.available = false;
        self.active_frames = self.kind.active_seconds() * FRAMES_PER_SECOND;
        let idle = f64::from(idle_seconds(self.kind) * FRAMES_PER_SECOND);
        let roll = (rng.gen::<f64>() + 0.5) * idle;
        // A zero countdown would never fire the availability transition.
        self.availability_frames = (roll as u32).max(1);
        true
    }

    /// Ends the active countdown early; returns whether it was running.
    pub fn force_expire(&mut self) -> bool {
        let was_active = self.is_active();
        self.active_frames = 0;
        was_active
    }

    pub(crate) fn snapshot(&self) -> PowerupSnapshot {
        PowerupSnapshot {
            kind: self.kind,
            available: self.available,
            active_for: self.active_for(),
        }
    }
}

fn idle_seconds(kind: PowerupKind) -> u32 {
    kind.period_seconds().saturating_sub(kind.active_seconds())
}
