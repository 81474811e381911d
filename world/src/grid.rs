use gremlins_core::{
    CellCoord, Event, PowerupKind, Strength, TileKind, TileSnapshot, BRICK_DECAY_STAGES,
    DECAY_FRAMES_PER_STAGE,
};

use crate::powerup::{Powerup, PowerupTransition};

const DECAY_FRAMES: u32 = BRICK_DECAY_STAGES * DECAY_FRAMES_PER_STAGE;

#[derive(Clone, Debug, PartialEq, Eq)]
enum TileBody {
    Stone,
    Brick { decay: Option<u32> },
    Exit,
    Powerup(Powerup),
}

/// Single tile occupying a grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    cell: CellCoord,
    body: TileBody,
}

impl Tile {
    /// Creates an indestructible wall.
    #[must_use]
    pub const fn stone(cell: CellCoord) -> Self {
        Self {
            cell,
            body: TileBody::Stone,
        }
    }

    /// Creates an intact breakable wall.
    #[must_use]
    pub const fn brick(cell: CellCoord) -> Self {
        Self {
            cell,
            body: TileBody::Brick { decay: None },
        }
    }

    /// Creates an exit door.
    #[must_use]
    pub const fn exit(cell: CellCoord) -> Self {
        Self {
            cell,
            body: TileBody::Exit,
        }
    }

    /// Creates a powerup tile of the provided kind.
    #[must_use]
    pub fn powerup(cell: CellCoord, kind: PowerupKind) -> Self {
        Self {
            cell,
            body: TileBody::Powerup(Powerup::new(kind)),
        }
    }

    /// Cell occupied by the tile.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Category of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        match self.body {
            TileBody::Stone => TileKind::StoneWall,
            TileBody::Brick { .. } => TileKind::BrickWall,
            TileBody::Exit => TileKind::Exit,
            TileBody::Powerup(_) => TileKind::Powerup,
        }
    }

    /// Strength used for movement validation and projectile impact.
    #[must_use]
    pub const fn strength(&self) -> Strength {
        self.kind().strength()
    }

    /// Reports whether the tile was destroyed and is decaying.
    #[must_use]
    pub const fn is_decaying(&self) -> bool {
        matches!(self.body, TileBody::Brick { decay: Some(_) })
    }

    /// Visible decay stage, zero while intact.
    #[must_use]
    pub const fn decay_stage(&self) -> u32 {
        match self.body {
            TileBody::Brick {
                decay: Some(elapsed),
            } if elapsed > 0 => (elapsed - 1) / DECAY_FRAMES_PER_STAGE + 1,
            _ => 0,
        }
    }

    /// Timer state of a powerup tile.
    #[must_use]
    pub const fn as_powerup(&self) -> Option<&Powerup> {
        match &self.body {
            TileBody::Powerup(powerup) => Some(powerup),
            _ => None,
        }
    }

    fn as_powerup_mut(&mut self) -> Option<&mut Powerup> {
        match &mut self.body {
            TileBody::Powerup(powerup) => Some(powerup),
            _ => None,
        }
    }

    /// Marks a breakable tile for decay; returns whether decay started now.
    pub fn destroy(&mut self) -> bool {
        match &mut self.body {
            TileBody::Brick { decay } if decay.is_none() => {
                *decay = Some(0);
                true
            }
            _ => false,
        }
    }

    /// Advances the decay counter; returns whether the tile must be evicted.
    pub fn tick_decay(&mut self) -> bool {
        match &mut self.body {
            TileBody::Brick {
                decay: Some(elapsed),
            } => {
                if *elapsed >= DECAY_FRAMES {
                    return true;
                }
                *elapsed += 1;
                false
            }
            _ => false,
        }
    }

    pub(crate) fn snapshot(&self) -> TileSnapshot {
        TileSnapshot {
            cell: self.cell,
            kind: self.kind(),
            decay_stage: self.decay_stage(),
            powerup: self.as_powerup().map(Powerup::snapshot),
        }
    }
}

/// Powerup timer change observed while ticking the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerupChange {
    /// Cell containing the powerup.
    pub cell: CellCoord,
    /// Type of the powerup.
    pub kind: PowerupKind,
    /// Transition the powerup went through.
    pub transition: PowerupTransition,
}

/// Dense arena of optional tiles owned by a level.
///
/// Entities refer to tiles purely by [`CellCoord`]; nothing outside the grid
/// holds a reference to a tile across ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Creates an empty grid of the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    /// Provides the dimensions of the grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    /// Places a tile into its cell, replacing any previous occupant.
    pub fn place(&mut self, tile: Tile) {
        if let Some(index) = self.index(tile.cell) {
            self.cells[index] = Some(tile);
        }
    }

    /// Tile occupying the cell, if any.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<&Tile> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    fn tile_mut(&mut self, cell: CellCoord) -> Option<&mut Tile> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Strength of the cell; empty and out-of-bounds cells are passable.
    #[must_use]
    pub fn strength_at(&self, cell: CellCoord) -> Strength {
        self.tile(cell).map_or(Strength::Passable, Tile::strength)
    }

    /// Reports whether the cell lies inside the grid and holds no tile.
    #[must_use]
    pub fn is_empty(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .is_some_and(|index| self.cells.get(index).is_some_and(Option::is_none))
    }

    /// Starts decay of the tile in the cell; returns whether decay started now.
    pub fn destroy(&mut self, cell: CellCoord) -> bool {
        self.tile_mut(cell).is_some_and(Tile::destroy)
    }

    /// Advances every decaying tile and evicts the fully decayed ones.
    pub fn tick_decay(&mut self, out_events: &mut Vec<Event>) {
        for slot in &mut self.cells {
            let Some(tile) = slot else {
                continue;
            };
            if tile.tick_decay() {
                let cell = tile.cell;
                *slot = None;
                out_events.push(Event::TileCleared { cell });
            }
        }
    }

    /// Timer state of the powerup in the cell, if any.
    #[must_use]
    pub fn powerup(&self, cell: CellCoord) -> Option<&Powerup> {
        self.tile(cell).and_then(Tile::as_powerup)
    }

    /// Mutable timer state of the powerup in the cell, if any.
    pub fn powerup_mut(&mut self, cell: CellCoord) -> Option<&mut Powerup> {
        self.tile_mut(cell).and_then(Tile::as_powerup_mut)
    }

    /// Advances the timers of every powerup, collecting the transitions.
    pub fn tick_powerups(&mut self, changes: &mut Vec<PowerupChange>) {
        for tile in self.cells.iter_mut().flatten() {
            let cell = tile.cell;
            if let Some(powerup) = tile.as_powerup_mut() {
                if let Some(transition) = powerup.tick() {
                    changes.push(PowerupChange {
                        cell,
                        kind: powerup.kind(),
                        transition,
                    });
                }
            }
        }
    }

    /// Iterator over every placed tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
