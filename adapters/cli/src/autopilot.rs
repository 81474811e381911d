use gremlins_core::{Direction, FireKey, FrameInput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FIRE_PROBABILITY: f64 = 0.2;
const POWERUP_SHARE: f64 = 0.3;

/// Seeded random walk that stands in for a human at the keyboard.
#[derive(Clone, Debug)]
pub(crate) struct Autopilot {
    rng: ChaCha8Rng,
    direction: Direction,
}

impl Autopilot {
    /// Creates an autopilot whose choices depend only on `seed`.
    pub(crate) fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        Self { rng, direction }
    }

    /// Samples the input for the next frame.
    ///
    /// The heading is re-rolled whenever the wizard sits on a whole tile.
    pub(crate) fn next_input(&mut self, aligned: bool) -> FrameInput {
        if aligned {
            self.direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        }

        let fire = self.rng.gen_bool(FIRE_PROBABILITY).then(|| {
            if self.rng.gen_bool(POWERUP_SHARE) {
                if self.rng.gen_bool(0.5) {
                    FireKey::Thunder
                } else {
                    FireKey::Hydro
                }
            } else {
                FireKey::Primary
            }
        });

        FrameInput {
            fire,
            ..FrameInput::moving(self.direction)
        }
    }
}
