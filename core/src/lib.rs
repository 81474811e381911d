#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gremlins simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! once per frame, the world executes them via its `apply` entry point, and
//! then broadcasts [`Event`] values describing what happened. Systems consume
//! immutable views such as [`EnemyView`] and [`ProjectileView`] and answer
//! with plain decisions that the world applies.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edge length of a square tile measured in pixels.
pub const TILE_SIZE: i32 = 20;

/// Number of tile rows in a level layout.
pub const GRID_ROWS: u32 = 33;

/// Number of tile columns in a level layout.
pub const GRID_COLUMNS: u32 = 36;

/// Fixed simulation rate; every tick represents one frame at this rate.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Simulated time covered by a single tick.
///
/// Rounded up so that a whole number of seconds elapses after exactly
/// `seconds * FRAMES_PER_SECOND` ticks.
pub const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667);

/// Number of ticks each decay stage of a destroyed brick remains visible.
pub const DECAY_FRAMES_PER_STAGE: u32 = 4;

/// Number of visible decay stages a destroyed brick passes through.
pub const BRICK_DECAY_STAGES: u32 = 4;

/// Pixels per tick travelled by the wizard.
pub const PLAYER_SPEED: i32 = 2;

/// Minimum Manhattan distance, in tiles, between the wizard and a respawned enemy.
pub const TELEPORT_RANGE: i32 = 10;

/// Ticks that must pass after the game ends before a restart is honoured.
pub const RESTART_DELAY_FRAMES: u32 = FRAMES_PER_SECOND;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation by a single frame using the sampled input.
    Tick {
        /// Movement flags and fire key held during the frame.
        input: FrameInput,
    },
    /// Abandons the current level and starts the next valid one.
    AdvanceLevel,
    /// Ends the campaign immediately with the provided outcome.
    EndGame {
        /// Result reported for the finished campaign.
        outcome: Outcome,
    },
    /// Resets the campaign to its first level once the restart delay elapsed.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one frame.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a level was loaded and is now being played.
    LevelStarted {
        /// One-based number of the level and the campaign length.
        progress: LevelProgress,
    },
    /// Reports that a level layout was rejected and skipped.
    LayoutRejected {
        /// One-based number of the rejected level.
        number: u32,
        /// Specific reason the layout could not be used.
        reason: LayoutError,
    },
    /// Confirms that the wizard stepped onto an exit tile.
    ExitReached {
        /// Cell containing the exit.
        cell: CellCoord,
    },
    /// Reports that a brick started decaying after being hit.
    TileDestroyed {
        /// Cell containing the brick.
        cell: CellCoord,
    },
    /// Reports that a decayed brick was removed, leaving an empty cell.
    TileCleared {
        /// Cell that became empty.
        cell: CellCoord,
    },
    /// Confirms that a weapon spawned a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Type of the projectile.
        kind: ProjectileKind,
        /// Tile-aligned pixel position where the projectile spawned.
        position: PixelPoint,
        /// Direction of travel.
        direction: Direction,
    },
    /// Reports that a player projectile killed an enemy, which respawned elsewhere.
    EnemyKilled {
        /// Identifier of the killed enemy.
        enemy: EnemyId,
        /// Pixel position the enemy was teleported to.
        respawn: PixelPoint,
    },
    /// Reports that the wizard lost a life.
    PlayerHit {
        /// Lives left after the hit.
        lives_remaining: u32,
    },
    /// Reports that a powerup tile can be collected.
    PowerupAvailable {
        /// Cell containing the powerup.
        cell: CellCoord,
        /// Type of the powerup.
        kind: PowerupKind,
    },
    /// Confirms that the wizard collected a powerup.
    PowerupActivated {
        /// Cell containing the powerup.
        cell: CellCoord,
        /// Type of the powerup.
        kind: PowerupKind,
    },
    /// Reports that an active powerup ran out and its weapon was removed.
    PowerupExpired {
        /// Cell containing the powerup.
        cell: CellCoord,
        /// Type of the powerup.
        kind: PowerupKind,
    },
    /// Announces that the campaign finished.
    GameEnded {
        /// Result of the campaign.
        outcome: Outcome,
    },
}

/// Final result of a campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every level was completed.
    Won,
    /// The wizard ran out of lives.
    Lost,
}

/// Lifecycle state of a campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// A level is being played.
    Playing,
    /// The campaign finished with the provided outcome.
    Finished(Outcome),
}

/// Position of the current level within the campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelProgress {
    /// One-based number of the current level.
    pub number: u32,
    /// Total number of levels in the campaign.
    pub total: u32,
}

/// Cardinal movement directions available to every moving entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction obtained by a quarter turn to the right.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Direction obtained by a quarter turn to the left.
    #[must_use]
    pub const fn anticlockwise(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// Opposite direction.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit step expressed as `(column delta, row delta)`.
    #[must_use]
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Direction along the dominant axis of the offset.
    ///
    /// The vertical axis wins only when its magnitude strictly exceeds the
    /// horizontal one. A zero offset has no direction.
    #[must_use]
    pub fn from_offset(offset: CellOffset) -> Option<Self> {
        let CellOffset { columns, rows } = offset;
        if rows.abs() > columns.abs() {
            Some(if rows > 0 {
                Direction::South
            } else {
                Direction::North
            })
        } else if columns > 0 {
            Some(Direction::East)
        } else if columns < 0 {
            Some(Direction::West)
        } else {
            None
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell in the provided direction, if it has non-negative coordinates.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.vector();
        Some(CellCoord::new(
            self.column.checked_add_signed(dx)?,
            self.row.checked_add_signed(dy)?,
        ))
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Signed separation between two positions measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellOffset {
    /// Horizontal separation; positive values point east.
    pub columns: i32,
    /// Vertical separation; positive values point south.
    pub rows: i32,
}

impl CellOffset {
    /// Creates a new offset.
    #[must_use]
    pub const fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    /// Offset keeping only the horizontal component.
    #[must_use]
    pub const fn horizontal(self) -> Self {
        Self::new(self.columns, 0)
    }

    /// Offset keeping only the vertical component.
    #[must_use]
    pub const fn vertical(self) -> Self {
        Self::new(0, self.rows)
    }
}

/// Position of an entity's top-left corner measured in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal pixel coordinate.
    pub x: i32,
    /// Vertical pixel coordinate.
    pub y: i32,
}

impl PixelPoint {
    /// Creates a new pixel position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Top-left corner of the provided cell.
    #[must_use]
    pub const fn from_cell(cell: CellCoord) -> Self {
        Self::new(
            cell.column() as i32 * TILE_SIZE,
            cell.row() as i32 * TILE_SIZE,
        )
    }

    /// Cell containing the position, if both coordinates are non-negative.
    #[must_use]
    pub fn cell(self) -> Option<CellCoord> {
        let column = u32::try_from(self.x.div_euclid(TILE_SIZE)).ok()?;
        let row = u32::try_from(self.y.div_euclid(TILE_SIZE)).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Top-left corner of the tile containing the position.
    #[must_use]
    pub const fn snapped(self) -> Self {
        Self::new(
            self.x - self.x.rem_euclid(TILE_SIZE),
            self.y - self.y.rem_euclid(TILE_SIZE),
        )
    }

    /// Position displaced by `amount` pixels along `direction`.
    #[must_use]
    pub const fn offset(self, direction: Direction, amount: i32) -> Self {
        let (dx, dy) = direction.vector();
        Self::new(self.x + dx * amount, self.y + dy * amount)
    }

    /// Bounding-box test between two tile-sized entities.
    #[must_use]
    pub const fn overlaps(self, other: PixelPoint) -> bool {
        (self.x - other.x).abs() < TILE_SIZE && (self.y - other.y).abs() < TILE_SIZE
    }

    /// Manhattan distance between two positions in pixels.
    #[must_use]
    pub const fn manhattan_distance(self, other: PixelPoint) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Separation toward `target` in whole cells, truncated toward zero.
    #[must_use]
    pub const fn cell_offset_to(self, target: PixelPoint) -> CellOffset {
        CellOffset::new(
            (target.x - self.x) / TILE_SIZE,
            (target.y - self.y) / TILE_SIZE,
        )
    }
}

/// Resistance a cell offers to entities and projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    /// Always passable, regardless of penetration or etherealness.
    Passable,
    /// Never passable and never breakable.
    Indestructible,
    /// Breakable by penetration at least equal to the value.
    Breakable(u32),
}

/// Maximum breakable strength an entity may pass through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Etherealness(u32);

impl Etherealness {
    /// Entities that pass only through always-passable cells.
    pub const SOLID: Etherealness = Etherealness(0);

    /// Creates a new etherealness value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether a cell of the provided strength can be entered.
    #[must_use]
    pub const fn passes(self, strength: Strength) -> bool {
        match strength {
            Strength::Passable => true,
            Strength::Indestructible => false,
            Strength::Breakable(value) => value <= self.0,
        }
    }
}

/// Minimum tile strength a projectile breaks on impact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Penetration(u32);

impl Penetration {
    /// Creates a new penetration value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether a tile of the provided strength breaks on impact.
    #[must_use]
    pub const fn breaks(self, strength: Strength) -> bool {
        match strength {
            Strength::Breakable(value) => value > 0 && value <= self.0,
            Strength::Passable | Strength::Indestructible => false,
        }
    }
}

/// Visual and behavioural category of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Indestructible wall that also forms the level border.
    StoneWall,
    /// Breakable wall that decays once destroyed.
    BrickWall,
    /// Door leading to the next level.
    Exit,
    /// Timed pickup that grants a weapon.
    Powerup,
}

impl TileKind {
    /// Strength used for movement validation and projectile impact.
    #[must_use]
    pub const fn strength(self) -> Strength {
        match self {
            TileKind::StoneWall => Strength::Indestructible,
            TileKind::BrickWall => Strength::Breakable(1),
            TileKind::Exit | TileKind::Powerup => Strength::Passable,
        }
    }
}

/// Side an entity fights for when projectiles collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionCategory {
    /// The wizard and projectiles it fired.
    Player,
    /// Enemies and projectiles they fired.
    Enemy,
}

/// Types of projectile fired by weapons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Wizard's basic shot that breaks bricks.
    Fireball,
    /// Basic gremlin shot.
    Slimeball,
    /// Slow ghost shot that drifts through bricks.
    Ghostball,
    /// Fast powerup shot that drifts through bricks.
    Thunderball,
    /// Powerup shot that breaks bricks and bounces back twice.
    Hydroball,
    /// Fast fury shot that tears through up to four bricks.
    Furyball,
}

impl ProjectileKind {
    /// Pixels travelled per tick.
    #[must_use]
    pub const fn speed(self) -> i32 {
        match self {
            ProjectileKind::Fireball
            | ProjectileKind::Slimeball
            | ProjectileKind::Hydroball => 4,
            ProjectileKind::Ghostball => 2,
            ProjectileKind::Thunderball | ProjectileKind::Furyball => 10,
        }
    }

    /// Strongest tile broken on impact.
    #[must_use]
    pub const fn penetration(self) -> Penetration {
        match self {
            ProjectileKind::Fireball | ProjectileKind::Hydroball | ProjectileKind::Furyball => {
                Penetration::new(1)
            }
            ProjectileKind::Slimeball | ProjectileKind::Ghostball | ProjectileKind::Thunderball => {
                Penetration::new(0)
            }
        }
    }

    /// Strongest tile flown through without impact.
    #[must_use]
    pub const fn etherealness(self) -> Etherealness {
        match self {
            ProjectileKind::Ghostball | ProjectileKind::Thunderball => Etherealness::new(1),
            _ => Etherealness::SOLID,
        }
    }

    /// Number of tile impacts survived before the projectile is removed.
    #[must_use]
    pub const fn collision_budget(self) -> u32 {
        match self {
            ProjectileKind::Hydroball => 2,
            ProjectileKind::Furyball => 4,
            _ => 0,
        }
    }

    /// Reports whether the projectile reverses direction on impact.
    #[must_use]
    pub const fn bounces(self) -> bool {
        matches!(self, ProjectileKind::Hydroball)
    }

    /// Side the projectile fights for.
    #[must_use]
    pub const fn category(self) -> CollisionCategory {
        match self {
            ProjectileKind::Fireball | ProjectileKind::Thunderball | ProjectileKind::Hydroball => {
                CollisionCategory::Player
            }
            ProjectileKind::Slimeball | ProjectileKind::Ghostball | ProjectileKind::Furyball => {
                CollisionCategory::Enemy
            }
        }
    }
}

/// Decision strategy used by an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Roams corridors and fires straight ahead.
    Wander,
    /// Chases the wizard greedily and fires toward it.
    Pursue,
}

/// Variants of enemy placed by level layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Basic wandering gremlin.
    Gremlin,
    /// Wandering ghost that phases through bricks; moves at gremlin speed.
    Ghost,
    /// Fast gremlin that pursues the wizard.
    Fury,
}

impl EnemyKind {
    /// Pixels travelled per tick.
    #[must_use]
    pub const fn speed(self) -> i32 {
        match self {
            EnemyKind::Gremlin | EnemyKind::Ghost => 1,
            EnemyKind::Fury => 2,
        }
    }

    /// Strongest tile walked through.
    #[must_use]
    pub const fn etherealness(self) -> Etherealness {
        match self {
            EnemyKind::Ghost => Etherealness::new(1),
            EnemyKind::Gremlin | EnemyKind::Fury => Etherealness::SOLID,
        }
    }

    /// Projectile fired by the enemy's weapon.
    #[must_use]
    pub const fn projectile(self) -> ProjectileKind {
        match self {
            EnemyKind::Gremlin => ProjectileKind::Slimeball,
            EnemyKind::Ghost => ProjectileKind::Ghostball,
            EnemyKind::Fury => ProjectileKind::Furyball,
        }
    }

    /// Decision strategy of the enemy.
    #[must_use]
    pub const fn behavior(self) -> Behavior {
        match self {
            EnemyKind::Gremlin | EnemyKind::Ghost => Behavior::Wander,
            EnemyKind::Fury => Behavior::Pursue,
        }
    }
}

/// Types of collectible powerup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Grants the thunderball launcher.
    Thunderball,
    /// Grants the hydroball launcher.
    Hydroball,
}

impl PowerupKind {
    /// Seconds the granted weapon stays available after collection.
    #[must_use]
    pub const fn active_seconds(self) -> u32 {
        match self {
            PowerupKind::Thunderball => 10,
            PowerupKind::Hydroball => 8,
        }
    }

    /// Average seconds between the start of two activations.
    #[must_use]
    pub const fn period_seconds(self) -> u32 {
        match self {
            PowerupKind::Thunderball => 20,
            PowerupKind::Hydroball => 16,
        }
    }

    /// Fire key the granted weapon is bound to.
    #[must_use]
    pub const fn key(self) -> FireKey {
        match self {
            PowerupKind::Thunderball => FireKey::Thunder,
            PowerupKind::Hydroball => FireKey::Hydro,
        }
    }

    /// Projectile fired by the granted weapon.
    #[must_use]
    pub const fn projectile(self) -> ProjectileKind {
        match self {
            PowerupKind::Thunderball => ProjectileKind::Thunderball,
            PowerupKind::Hydroball => ProjectileKind::Hydroball,
        }
    }
}

/// Input symbols that select one of the wizard's weapons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FireKey {
    /// Space bar; fires the always-held fireball launcher.
    Primary,
    /// `a`; fires the thunderball launcher while its powerup is active.
    Thunder,
    /// `s`; fires the hydroball launcher while its powerup is active.
    Hydro,
}

impl FireKey {
    /// Keyboard symbol bound to the key.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            FireKey::Primary => ' ',
            FireKey::Thunder => 'a',
            FireKey::Hydro => 's',
        }
    }

    /// Key bound to the provided keyboard symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' => Some(FireKey::Primary),
            'a' => Some(FireKey::Thunder),
            's' => Some(FireKey::Hydro),
            _ => None,
        }
    }
}

/// Intents sampled once per frame from the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameInput {
    /// Movement toward increasing column indices is held.
    pub east: bool,
    /// Movement toward decreasing column indices is held.
    pub west: bool,
    /// Movement toward decreasing row indices is held.
    pub north: bool,
    /// Movement toward increasing row indices is held.
    pub south: bool,
    /// Fire key held during the frame, if any.
    pub fire: Option<FireKey>,
}

impl FrameInput {
    /// Input holding a single movement direction.
    #[must_use]
    pub const fn moving(direction: Direction) -> Self {
        let mut input = Self {
            east: false,
            west: false,
            north: false,
            south: false,
            fire: None,
        };
        match direction {
            Direction::East => input.east = true,
            Direction::West => input.west = true,
            Direction::North => input.north = true,
            Direction::South => input.south = true,
        }
        input
    }

    /// Input holding only the provided fire key.
    #[must_use]
    pub const fn firing(key: FireKey) -> Self {
        Self {
            east: false,
            west: false,
            north: false,
            south: false,
            fire: Some(key),
        }
    }

    /// Held movement directions in the order the wizard attempts them.
    pub fn held_directions(&self) -> impl Iterator<Item = Direction> {
        [
            (self.east, Direction::East),
            (self.west, Direction::West),
            (self.north, Direction::North),
            (self.south, Direction::South),
        ]
        .into_iter()
        .filter_map(|(held, direction)| held.then_some(direction))
    }
}

/// Unique identifier assigned to an enemy within a level attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile within a level attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Reasons a level layout is rejected during loading.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutError {
    /// The layout has fewer rows than the grid.
    #[error("layout has {found} rows, expected {expected}")]
    RowCount {
        /// Rows required by the grid.
        expected: u32,
        /// Rows present in the layout.
        found: u32,
    },
    /// A row is shorter than the grid width.
    #[error("row {row} has {found} columns, expected {expected}")]
    RowTooShort {
        /// Zero-based index of the row.
        row: u32,
        /// Columns required by the grid.
        expected: u32,
        /// Columns present in the row.
        found: u32,
    },
    /// A border cell is not a stone wall.
    #[error("border cell at column {}, row {} is not a stone wall", .cell.column(), .cell.row())]
    BorderBreach {
        /// Offending border cell.
        cell: CellCoord,
    },
    /// No wizard entrance marker is present.
    #[error("layout has no wizard entrance")]
    MissingEntrance,
    /// More than one wizard entrance marker is present.
    #[error("layout has {count} wizard entrances, expected one")]
    MultipleEntrances {
        /// Number of entrance markers found.
        count: u32,
    },
    /// No exit marker is present.
    #[error("layout has no exit")]
    MissingExit,
}

/// Reasons a campaign cannot be started.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum CampaignError {
    /// The campaign lists no levels.
    #[error("campaign contains no levels")]
    NoLevels,
    /// The campaign grants no lives.
    #[error("campaign grants no lives")]
    NoLives,
}

/// Tuning for an entire campaign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CampaignSettings {
    /// Lives granted on a fresh game.
    pub lives: u32,
    /// Levels played in order.
    pub levels: Vec<LevelSettings>,
}

/// Tuning for a single level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Character grid describing the level.
    pub layout: String,
    /// Seconds between two fireball shots.
    pub wizard_cooldown: f64,
    /// Seconds between two shots from any single enemy.
    pub enemy_cooldown: f64,
}

impl LevelSettings {
    /// Wizard weapon cooldown, treating invalid values as no cooldown.
    #[must_use]
    pub fn wizard_cooldown(&self) -> Duration {
        seconds(self.wizard_cooldown)
    }

    /// Enemy weapon cooldown, treating invalid values as no cooldown.
    #[must_use]
    pub fn enemy_cooldown(&self) -> Duration {
        seconds(self.enemy_cooldown)
    }
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Variant of the enemy.
    pub kind: EnemyKind,
    /// Pixel position of the enemy.
    pub position: PixelPoint,
    /// Direction the enemy faces, or `None` for an enemy boxed in since spawning.
    pub facing: Option<Direction>,
}

/// Read-only snapshot describing all enemies within the level.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new view from the provided snapshots sorted by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Type of the projectile.
    pub kind: ProjectileKind,
    /// Pixel position of the projectile.
    pub position: PixelPoint,
    /// Direction of travel.
    pub facing: Direction,
}

/// Read-only snapshot describing all projectiles within the level.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new view from the provided snapshots sorted by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the wizard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerSnapshot {
    /// Pixel position of the wizard.
    pub position: PixelPoint,
    /// Direction the wizard faces.
    pub facing: Direction,
    /// Lives left, including the current one.
    pub lives: u32,
}

/// Immutable representation of a powerup tile's timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PowerupSnapshot {
    /// Type of the powerup.
    pub kind: PowerupKind,
    /// Reports whether the wizard can collect the powerup.
    pub available: bool,
    /// Time left before the granted weapon is removed.
    pub active_for: Duration,
}

/// Immutable representation of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    /// Cell occupied by the tile.
    pub cell: CellCoord,
    /// Category of the tile.
    pub kind: TileKind,
    /// Decay stage of a destroyed brick, zero while intact.
    pub decay_stage: u32,
    /// Timers of a powerup tile.
    pub powerup: Option<PowerupSnapshot>,
}

/// Remaining cooldown of one of the wizard's weapons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CooldownSnapshot {
    /// Fire key the weapon is bound to.
    pub key: FireKey,
    /// Remaining share of the cooldown, from `0.0` (ready) to `1.0`.
    pub fraction: f32,
}

/// Information shown on the heads-up display.
#[derive(Clone, Debug, PartialEq)]
pub struct HudSnapshot {
    /// Lives left, including the current one.
    pub lives: u32,
    /// Position of the current level within the campaign.
    pub progress: LevelProgress,
    /// Active powerups and the time left on each.
    pub powerups: Vec<(PowerupKind, Duration)>,
    /// Cooldowns of every held weapon ordered by fire key.
    pub cooldowns: Vec<CooldownSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::{
        CampaignSettings, CellCoord, CellOffset, Direction, Etherealness, FireKey, FrameInput,
        LevelSettings, Penetration, PixelPoint, Strength, FRAMES_PER_SECOND, FRAME_DURATION,
    };
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    #[test]
    fn direction_algebra_is_consistent() {
        for direction in Direction::ALL {
            assert_eq!(direction.flip().flip(), direction);
            assert_eq!(direction.anticlockwise().clockwise(), direction);
            assert_eq!(direction.clockwise().anticlockwise(), direction);
            assert_ne!(direction.flip(), direction);
        }
    }

    #[test]
    fn clockwise_turns_form_a_four_cycle() {
        let mut direction = Direction::North;
        let mut visited = Vec::new();
        for _ in 0..4 {
            visited.push(direction);
            direction = direction.clockwise();
        }
        assert_eq!(direction, Direction::North);
        assert_eq!(visited, Direction::ALL.to_vec());
    }

    #[test]
    fn from_offset_prefers_horizontal_on_ties() {
        assert_eq!(
            Direction::from_offset(CellOffset::new(3, -3)),
            Some(Direction::East)
        );
        assert_eq!(
            Direction::from_offset(CellOffset::new(-1, 2)),
            Some(Direction::South)
        );
        assert_eq!(
            Direction::from_offset(CellOffset::new(0, -4)),
            Some(Direction::North)
        );
        assert_eq!(Direction::from_offset(CellOffset::new(0, 0)), None);
    }

    #[test]
    fn overlap_is_strict_within_one_tile() {
        let origin = PixelPoint::new(40, 40);
        assert!(origin.overlaps(PixelPoint::new(59, 21)));
        assert!(!origin.overlaps(PixelPoint::new(60, 40)));
        assert!(!origin.overlaps(PixelPoint::new(40, 20)));
    }

    #[test]
    fn snapping_moves_to_tile_corner() {
        assert_eq!(PixelPoint::new(47, 63).snapped(), PixelPoint::new(40, 60));
        assert_eq!(
            PixelPoint::new(47, 63).cell(),
            Some(CellCoord::new(2, 3))
        );
        assert_eq!(PixelPoint::new(-2, 0).cell(), None);
    }

    #[test]
    fn cell_offset_truncates_toward_zero() {
        let from = PixelPoint::new(100, 100);
        assert_eq!(
            from.cell_offset_to(PixelPoint::new(139, 61)),
            CellOffset::new(1, -1)
        );
    }

    #[test]
    fn stepping_off_the_origin_is_rejected() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.step(Direction::West), None);
        assert_eq!(origin.step(Direction::South), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn etherealness_and_penetration_follow_strength() {
        let ghost = Etherealness::new(1);
        assert!(ghost.passes(Strength::Breakable(1)));
        assert!(ghost.passes(Strength::Passable));
        assert!(!ghost.passes(Strength::Indestructible));
        assert!(!Etherealness::SOLID.passes(Strength::Breakable(1)));

        assert!(Penetration::new(1).breaks(Strength::Breakable(1)));
        assert!(!Penetration::new(0).breaks(Strength::Breakable(1)));
        assert!(!Penetration::new(5).breaks(Strength::Indestructible));
        assert!(!Penetration::new(5).breaks(Strength::Passable));
    }

    #[test]
    fn whole_seconds_take_whole_frames() {
        assert!(FRAME_DURATION * FRAMES_PER_SECOND >= Duration::from_secs(1));
        assert!(FRAME_DURATION * (FRAMES_PER_SECOND - 1) < Duration::from_secs(1));
    }

    #[test]
    fn held_directions_follow_attempt_order() {
        let input = FrameInput {
            north: true,
            east: true,
            south: true,
            ..FrameInput::default()
        };
        let order: Vec<_> = input.held_directions().collect();
        assert_eq!(
            order,
            vec![Direction::East, Direction::North, Direction::South]
        );
    }

    #[test]
    fn fire_keys_map_to_symbols() {
        for key in [FireKey::Primary, FireKey::Thunder, FireKey::Hydro] {
            assert_eq!(FireKey::from_symbol(key.symbol()), Some(key));
        }
        assert_eq!(FireKey::from_symbol('x'), None);
    }

    #[test]
    fn negative_cooldowns_collapse_to_zero() {
        let settings = LevelSettings {
            layout: String::new(),
            wizard_cooldown: -1.0,
            enemy_cooldown: 0.5,
        };
        assert_eq!(settings.wizard_cooldown(), Duration::ZERO);
        assert_eq!(settings.enemy_cooldown(), Duration::from_millis(500));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn campaign_settings_round_trip_through_bincode() {
        assert_round_trip(&CampaignSettings {
            lives: 3,
            levels: vec![LevelSettings {
                layout: "XXX\nXWX\nXEX".to_owned(),
                wizard_cooldown: 0.333,
                enemy_cooldown: 3.0,
            }],
        });
    }
}
