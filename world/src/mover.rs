use gremlins_core::{CellCoord, Direction, Etherealness, PixelPoint, TILE_SIZE};

use crate::grid::Grid;

/// Movement state shared by the wizard, enemies, and projectiles.
///
/// A mover is aligned with a cell exactly when no sub-tile movement remains;
/// new moves only start from an aligned position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mover {
    position: PixelPoint,
    facing: Direction,
    remaining: i32,
    speed: i32,
    etherealness: Etherealness,
}

impl Mover {
    /// Creates an aligned mover.
    #[must_use]
    pub const fn new(
        position: PixelPoint,
        facing: Direction,
        speed: i32,
        etherealness: Etherealness,
    ) -> Self {
        Self {
            position,
            facing,
            remaining: 0,
            speed,
            etherealness,
        }
    }

    /// Pixel position of the mover.
    #[must_use]
    pub const fn position(&self) -> PixelPoint {
        self.position
    }

    /// Direction the mover faces.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Pixels still to travel before the current move completes.
    #[must_use]
    pub const fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Reports whether the mover occupies a whole cell.
    #[must_use]
    pub const fn is_aligned(&self) -> bool {
        self.remaining == 0
    }

    /// Cell containing the mover's top-left corner.
    #[must_use]
    pub fn cell(&self) -> Option<CellCoord> {
        self.position.cell()
    }

    /// Cell directly ahead along the facing direction.
    #[must_use]
    pub fn cell_ahead(&self) -> Option<CellCoord> {
        self.cell()?.step(self.facing)
    }

    /// Reports whether a move in `direction` would be accepted.
    #[must_use]
    pub fn validate_move(&self, direction: Direction, grid: &Grid) -> bool {
        let Some(target) = self.cell().and_then(|cell| cell.step(direction)) else {
            return false;
        };
        grid.contains(target) && self.etherealness.passes(grid.strength_at(target))
    }

    /// Starts a move toward the neighbouring cell.
    ///
    /// Has no effect unless aligned. The facing follows `direction` even when
    /// the move is rejected.
    pub fn start_move(&mut self, direction: Direction, grid: &Grid, forced: bool) -> bool {
        if !self.is_aligned() {
            return false;
        }

        self.facing = direction;
        if forced || self.validate_move(direction, grid) {
            self.remaining = TILE_SIZE;
            true
        } else {
            false
        }
    }

    /// Advances the current move by one tick; returns whether a step was taken.
    pub fn advance_move(&mut self) -> bool {
        if self.remaining <= 0 {
            return false;
        }

        let step = self.speed.min(self.remaining);
        self.position = self.position.offset(self.facing, step);
        self.remaining -= step;
        true
    }

    /// Bounding-box test against another mover.
    #[must_use]
    pub const fn overlaps(&self, other: &Mover) -> bool {
        self.position.overlaps(other.position)
    }

    /// Turns to face `direction` without starting a move.
    pub fn turn(&mut self, direction: Direction) {
        self.facing = direction;
    }

    /// Places the mover at a new aligned position, cancelling any move.
    pub fn relocate(&mut self, position: PixelPoint) {
        self.position = position;
        self.remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Tile;
    use gremlins_core::Strength;

    fn corridor() -> Grid {
        let mut grid = Grid::new(5, 3);
        grid.place(Tile::stone(CellCoord::new(2, 0)));
        grid.place(Tile::brick(CellCoord::new(3, 1)));
        grid.place(Tile::exit(CellCoord::new(1, 1)));
        grid
    }

    fn mover_at(column: u32, row: u32, speed: i32, etherealness: Etherealness) -> Mover {
        Mover::new(
            PixelPoint::from_cell(CellCoord::new(column, row)),
            Direction::East,
            speed,
            etherealness,
        )
    }

    #[test]
    fn validation_respects_strength_and_bounds() {
        let grid = corridor();
        let solid = mover_at(2, 1, 1, Etherealness::SOLID);
        assert!(!solid.validate_move(Direction::North, &grid));
        assert!(!solid.validate_move(Direction::East, &grid));
        assert!(solid.validate_move(Direction::West, &grid));
        assert!(solid.validate_move(Direction::South, &grid));

        let ghost = mover_at(2, 1, 1, Etherealness::new(1));
        assert!(ghost.validate_move(Direction::East, &grid));
        assert!(!ghost.validate_move(Direction::North, &grid));

        let edge = mover_at(4, 2, 1, Etherealness::new(1));
        assert!(!edge.validate_move(Direction::East, &grid));
        assert!(!edge.validate_move(Direction::South, &grid));
        assert_eq!(grid.strength_at(CellCoord::new(1, 1)), Strength::Passable);
    }

    #[test]
    fn aligned_mover_starts_valid_moves() {
        let grid = corridor();
        let mut mover = mover_at(2, 1, 2, Etherealness::SOLID);
        assert!(mover.start_move(Direction::South, &grid, false));
        assert_eq!(mover.remaining(), TILE_SIZE);
        assert_eq!(mover.facing(), Direction::South);
    }

    #[test]
    fn moving_mover_rejects_every_new_move() {
        let grid = corridor();
        let mut mover = mover_at(2, 1, 2, Etherealness::SOLID);
        assert!(mover.start_move(Direction::West, &grid, false));
        assert!(mover.advance_move());
        assert!(!mover.start_move(Direction::South, &grid, false));
        assert!(!mover.start_move(Direction::South, &grid, true));
        assert_eq!(mover.facing(), Direction::West);
    }

    #[test]
    fn rejected_move_still_turns_the_mover() {
        let grid = corridor();
        let mut mover = mover_at(2, 1, 2, Etherealness::SOLID);
        assert!(!mover.start_move(Direction::North, &grid, false));
        assert_eq!(mover.facing(), Direction::North);
        assert!(mover.is_aligned());

        assert!(mover.start_move(Direction::North, &grid, true));
        assert_eq!(mover.remaining(), TILE_SIZE);
    }

    #[test]
    fn advancing_never_overshoots_the_cell() {
        let grid = corridor();
        let mut mover = mover_at(0, 1, 3, Etherealness::SOLID);
        assert!(mover.start_move(Direction::South, &grid, false));

        let mut steps = 0;
        while mover.advance_move() {
            steps += 1;
        }
        assert_eq!(steps, 7);
        assert_eq!(mover.position(), PixelPoint::from_cell(CellCoord::new(0, 2)));
        assert!(mover.is_aligned());
        assert!(!mover.advance_move());
    }
}
