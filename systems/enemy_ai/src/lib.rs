#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides how enemies move and where they aim.
//!
//! Enemies are plain tagged values; every per-variant difference in behaviour
//! is expressed by matching on [`EnemyKind::behavior`] rather than through
//! trait objects. The world supplies an `is_open` predicate that reports
//! whether a move in a direction would pass validation, and an explicit
//! random number generator for tie-breaks.

use gremlins_core::{Behavior, CellOffset, Direction, EnemyKind};
use rand::Rng;

/// Facts about an aligned enemy that drive its next movement decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Situation {
    /// Variant of the deciding enemy.
    pub kind: EnemyKind,
    /// Direction the enemy currently faces.
    pub facing: Direction,
    /// Separation from the enemy to the wizard in whole cells.
    pub to_player: CellOffset,
}

/// Movement the world should start for an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Direction of the move.
    pub direction: Direction,
    /// Start the move even if validation would reject it.
    pub forced: bool,
}

impl Decision {
    const fn open(direction: Direction) -> Self {
        Self {
            direction,
            forced: false,
        }
    }

    const fn forced(direction: Direction) -> Self {
        Self {
            direction,
            forced: true,
        }
    }
}

/// Picks the direction a freshly spawned enemy starts walking in.
///
/// Scanning starts at a random direction and proceeds clockwise. `None`
/// means every neighbour is blocked and the enemy never moves.
pub fn starting_direction<R, F>(is_open: F, rng: &mut R) -> Option<Direction>
where
    R: Rng + ?Sized,
    F: Fn(Direction) -> bool,
{
    let mut direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
    for _ in 0..Direction::ALL.len() {
        if is_open(direction) {
            return Some(direction);
        }
        direction = direction.clockwise();
    }
    None
}

/// Decides the next move of an aligned enemy.
///
/// Returns `None` when the enemy should stay put this tick.
pub fn decide<R, F>(situation: Situation, is_open: F, rng: &mut R) -> Option<Decision>
where
    R: Rng + ?Sized,
    F: Fn(Direction) -> bool,
{
    match situation.kind.behavior() {
        Behavior::Wander => Some(wander(situation.facing, is_open, rng)),
        Behavior::Pursue => pursue(situation.to_player, is_open, rng),
    }
}

/// Direction an enemy fires in, if it has one.
#[must_use]
pub fn aim(kind: EnemyKind, facing: Option<Direction>, to_player: CellOffset) -> Option<Direction> {
    match kind.behavior() {
        Behavior::Wander => facing,
        Behavior::Pursue => Direction::from_offset(to_player),
    }
}

fn wander<R, F>(facing: Direction, is_open: F, rng: &mut R) -> Decision
where
    R: Rng + ?Sized,
    F: Fn(Direction) -> bool,
{
    if is_open(facing) {
        return Decision::open(facing);
    }

    let left = facing.anticlockwise();
    let right = facing.clockwise();
    match (is_open(left), is_open(right)) {
        (false, false) => Decision::forced(facing.flip()),
        (true, true) => {
            if rng.gen_bool(0.5) {
                Decision::open(left)
            } else {
                Decision::open(right)
            }
        }
        (true, false) => Decision::open(left),
        (false, true) => Decision::open(right),
    }
}

fn pursue<R, F>(to_player: CellOffset, is_open: F, rng: &mut R) -> Option<Decision>
where
    R: Rng + ?Sized,
    F: Fn(Direction) -> bool,
{
    let primary = Direction::from_offset(to_player)?;

    let minor_axis = if to_player.rows.abs() > to_player.columns.abs() {
        to_player.horizontal()
    } else {
        to_player.vertical()
    };
    let secondary = Direction::from_offset(minor_axis).unwrap_or_else(|| {
        if rng.gen_bool(0.5) {
            primary.clockwise()
        } else {
            primary.anticlockwise()
        }
    });

    let decision = [primary, secondary, secondary.flip()]
        .into_iter()
        .find(|direction| is_open(*direction))
        .map_or_else(|| Decision::forced(primary.flip()), Decision::open);
    Some(decision)
}
