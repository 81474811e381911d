use std::str::FromStr;

use gremlins_core::{CellCoord, EnemyKind, LayoutError, GRID_COLUMNS, GRID_ROWS};

/// Content of a single layout cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Open floor.
    Empty,
    /// Indestructible wall, `X`.
    Stone,
    /// Breakable wall, `B`.
    Brick,
    /// Exit door, `E`.
    Exit,
    /// Wizard entrance, `W`; open floor once the level starts.
    Entrance,
    /// Enemy spawn: `G` gremlin, `H` ghost, `F` fury.
    Enemy(EnemyKind),
    /// Powerup spawn, `P`.
    Powerup,
}

impl Marker {
    fn from_char(symbol: char) -> Self {
        match symbol {
            'X' => Marker::Stone,
            'B' => Marker::Brick,
            'E' => Marker::Exit,
            'W' => Marker::Entrance,
            'G' => Marker::Enemy(EnemyKind::Gremlin),
            'H' => Marker::Enemy(EnemyKind::Ghost),
            'F' => Marker::Enemy(EnemyKind::Fury),
            'P' => Marker::Powerup,
            _ => Marker::Empty,
        }
    }
}

/// Validated character grid describing a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    markers: Vec<Marker>,
    entrance: CellCoord,
}

impl Layout {
    /// Parses and validates a layout.
    ///
    /// Columns beyond the grid width and rows beyond the grid height are
    /// ignored. Layouts with too few rows or columns are rejected.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            let _ = lines.pop();
        }
        lines.truncate(GRID_ROWS as usize);

        let found = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        if found != GRID_ROWS {
            return Err(LayoutError::RowCount {
                expected: GRID_ROWS,
                found,
            });
        }

        let mut markers = Vec::with_capacity(lines.len() * GRID_COLUMNS as usize);
        for (row, line) in (0..GRID_ROWS).zip(&lines) {
            let before = markers.len();
            markers.extend(
                line.chars()
                    .take(GRID_COLUMNS as usize)
                    .map(Marker::from_char),
            );
            let width = markers.len() - before;
            if width < GRID_COLUMNS as usize {
                return Err(LayoutError::RowTooShort {
                    row,
                    expected: GRID_COLUMNS,
                    found: u32::try_from(width).unwrap_or(u32::MAX),
                });
            }
        }

        let layout = Self {
            markers,
            entrance: CellCoord::new(0, 0),
        };

        if let Some((cell, _)) = layout
            .cells()
            .find(|(cell, marker)| is_border(*cell) && *marker != Marker::Stone)
        {
            return Err(LayoutError::BorderBreach { cell });
        }

        let entrances: Vec<CellCoord> = layout
            .cells()
            .filter(|(_, marker)| *marker == Marker::Entrance)
            .map(|(cell, _)| cell)
            .collect();
        let entrance = match entrances.as_slice() {
            [] => return Err(LayoutError::MissingEntrance),
            [entrance] => *entrance,
            many => {
                return Err(LayoutError::MultipleEntrances {
                    count: u32::try_from(many.len()).unwrap_or(u32::MAX),
                })
            }
        };

        if !layout.cells().any(|(_, marker)| marker == Marker::Exit) {
            return Err(LayoutError::MissingExit);
        }

        Ok(Self { entrance, ..layout })
    }

    /// Cell where the wizard enters the level.
    #[must_use]
    pub const fn entrance(&self) -> CellCoord {
        self.entrance
    }

    /// Marker at `cell`, if the cell lies inside the grid.
    #[must_use]
    pub fn marker(&self, cell: CellCoord) -> Option<Marker> {
        if cell.column() >= GRID_COLUMNS || cell.row() >= GRID_ROWS {
            return None;
        }
        let index = cell.row() as usize * GRID_COLUMNS as usize + cell.column() as usize;
        self.markers.get(index).copied()
    }

    /// Iterator over every cell and its marker in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Marker)> + '_ {
        (0..GRID_ROWS)
            .flat_map(|row| (0..GRID_COLUMNS).map(move |column| CellCoord::new(column, row)))
            .zip(self.markers.iter().copied())
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

fn is_border(cell: CellCoord) -> bool {
    cell.row() == 0
        || cell.column() == 0
        || cell.row() == GRID_ROWS - 1
        || cell.column() == GRID_COLUMNS - 1
}
