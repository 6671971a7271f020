#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Skirmish decision engine.
//!
//! This crate defines the vocabulary that connects the transport adapter, the
//! board model, and the pure decision systems. Adapters deliver a [`Snapshot`]
//! describing one turn, the board crate parses it into typed cells, and the
//! systems answer with exactly one [`Command`]. Nothing in here carries state
//! across turns.

use std::{cmp::Ordering, fmt};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Number of cells along each edge of the square board.
pub const BOARD_SIZE: u32 = 13;

/// Maximum number of cells a shot travels before dissipating.
pub const FIRING_RANGE: u32 = 4;

/// Number of future turns projected for every enemy trajectory.
pub const PREDICTION_HORIZON: u32 = 5;

/// Cell the ship heads for before it starts engaging enemies.
pub const RALLY_POINT: CellCoord = CellCoord::new(6, 6);

/// Location of a single board cell expressed as row and column indices.
///
/// Coordinates order row-major: first by row, then by column. Every scan-order
/// tie-break in the engine goes through [`CellCoord::row_major_cmp`], so the
/// outcome never depends on how a caller happened to store its cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell, growing southward.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell, growing eastward.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Neighbouring cell one step along `heading`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant. The
    /// upper board edge is not checked here; callers bound the result against
    /// the board they are walking.
    #[must_use]
    pub fn step(self, heading: Heading) -> Option<CellCoord> {
        let (row, column) = match heading {
            Heading::North => (self.row.checked_sub(1)?, self.column),
            Heading::East => (self.row, self.column.checked_add(1)?),
            Heading::South => (self.row.checked_add(1)?, self.column),
            Heading::West => (self.row, self.column.checked_sub(1)?),
        };
        Some(CellCoord::new(row, column))
    }

    /// Row-major scan comparator: lower rows first, then lower columns.
    #[must_use]
    pub fn row_major_cmp(&self, other: &CellCoord) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row_major_cmp(other)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cardinal facing of a ship, ordered clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing toward decreasing row indices.
    North,
    /// Facing toward increasing column indices.
    East,
    /// Facing toward increasing row indices.
    South,
    /// Facing toward decreasing column indices.
    West,
}

impl Heading {
    /// All headings in clockwise order starting at north.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Position of the heading on the clockwise dial.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    /// Parses the single-letter suffix carried by ship tokens.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Heading::North),
            'E' => Some(Heading::East),
            'S' => Some(Heading::South),
            'W' => Some(Heading::West),
            _ => None,
        }
    }

    /// Single-letter suffix used on the wire.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }

    /// Number of counter-clockwise quarter turns needed to face `target`.
    #[must_use]
    pub const fn left_turns_to(self, target: Heading) -> u8 {
        (self.ordinal() + 4 - target.ordinal()) % 4
    }

    /// Number of clockwise quarter turns needed to face `target`.
    #[must_use]
    pub const fn right_turns_to(self, target: Heading) -> u8 {
        (target.ordinal() + 4 - self.ordinal()) % 4
    }

    /// Minimal number of quarter turns needed to face `target`, never above two.
    #[must_use]
    pub fn rotation_cost(self, target: Heading) -> u8 {
        self.left_turns_to(target).min(self.right_turns_to(target))
    }

    /// First quarter turn on the cheapest way to `target`.
    ///
    /// Returns `None` when already aligned. A full reversal costs the same both
    /// ways and resolves to [`Rotation::Right`].
    #[must_use]
    pub fn rotation_toward(self, target: Heading) -> Option<Rotation> {
        let left = self.left_turns_to(target);
        let right = self.right_turns_to(target);
        match left.cmp(&right) {
            Ordering::Equal if left == 0 => None,
            Ordering::Less => Some(Rotation::Left),
            Ordering::Greater | Ordering::Equal => Some(Rotation::Right),
        }
    }

    /// Heading after applying a single quarter turn.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Heading {
        let ordinal = match rotation {
            Rotation::Left => (self.ordinal() + 3) % 4,
            Rotation::Right => (self.ordinal() + 1) % 4,
        };
        Heading::ALL[ordinal as usize]
    }

    /// Nearest-axis heading pointing from `from` toward `to`.
    ///
    /// The axis with the larger displacement wins; equal displacements resolve
    /// to the row axis (north or south). Returns `None` when both cells match.
    #[must_use]
    pub fn toward(from: CellCoord, to: CellCoord) -> Option<Heading> {
        let row_delta = i64::from(to.row()) - i64::from(from.row());
        let column_delta = i64::from(to.column()) - i64::from(from.column());

        if row_delta == 0 && column_delta == 0 {
            return None;
        }

        if row_delta.abs() >= column_delta.abs() {
            Some(if row_delta > 0 {
                Heading::South
            } else {
                Heading::North
            })
        } else {
            Some(if column_delta > 0 {
                Heading::East
            } else {
                Heading::West
            })
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Single quarter turn a ship can perform in one command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Counter-clockwise quarter turn.
    Left,
    /// Clockwise quarter turn.
    Right,
}

impl From<Rotation> for Command {
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Left => Command::RotateLeft,
            Rotation::Right => Command::RotateRight,
        }
    }
}

/// Discrete action the engine returns for the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Advance one cell along the current heading.
    Move,
    /// Rotate a quarter turn counter-clockwise.
    RotateLeft,
    /// Rotate a quarter turn clockwise.
    RotateRight,
    /// Fire along the current heading.
    Fire,
    /// Do nothing this turn.
    Pass,
}

impl Command {
    /// Wire token for the command. [`Command::Pass`] has none.
    #[must_use]
    pub const fn token(self) -> Option<&'static str> {
        match self {
            Command::Move => Some("M"),
            Command::RotateLeft => Some("L"),
            Command::RotateRight => Some("R"),
            Command::Fire => Some("F"),
            Command::Pass => None,
        }
    }

    /// Parses a wire token, treating an absent token as [`Command::Pass`].
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Option<Self> {
        match token {
            None => Some(Command::Pass),
            Some("M") => Some(Command::Move),
            Some("L") => Some(Command::RotateLeft),
            Some("R") => Some(Command::RotateRight),
            Some("F") => Some(Command::Fire),
            Some(_) => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().unwrap_or("pass"))
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.token() {
            Some(token) => serializer.serialize_some(token),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?;
        Command::from_token(token.as_deref()).ok_or_else(|| {
            de::Error::custom(format!(
                "unknown command token `{}`",
                token.unwrap_or_default()
            ))
        })
    }
}

/// Entity kinds that may occupy a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Nothing occupies the cell.
    Empty,
    /// Impassable rock that also stops shots.
    Asteroid,
    /// Collectible the ship may move onto.
    Coin,
    /// The ship controlled by this engine.
    PlayerShip,
    /// A hostile ship.
    EnemyShip,
}

/// Immutable content of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entity {
    /// Nothing occupies the cell.
    Empty,
    /// Impassable rock that also stops shots.
    Asteroid,
    /// Collectible the ship may move onto.
    Coin,
    /// The ship controlled by this engine.
    PlayerShip(Heading),
    /// A hostile ship.
    EnemyShip(Heading),
}

impl Entity {
    /// Kind tag of the entity.
    #[must_use]
    pub const fn kind(self) -> EntityKind {
        match self {
            Entity::Empty => EntityKind::Empty,
            Entity::Asteroid => EntityKind::Asteroid,
            Entity::Coin => EntityKind::Coin,
            Entity::PlayerShip(_) => EntityKind::PlayerShip,
            Entity::EnemyShip(_) => EntityKind::EnemyShip,
        }
    }

    /// Heading carried by ship entities.
    #[must_use]
    pub const fn heading(self) -> Option<Heading> {
        match self {
            Entity::PlayerShip(heading) | Entity::EnemyShip(heading) => Some(heading),
            Entity::Empty | Entity::Asteroid | Entity::Coin => None,
        }
    }
}

/// Ship location paired with its facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ship {
    /// Cell the ship occupies.
    pub cell: CellCoord,
    /// Direction the ship points.
    pub heading: Heading,
}

/// Cell an enemy is forecast to occupy a number of turns from now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredictedPosition {
    /// Forecast cell.
    pub cell: CellCoord,
    /// Turns until the enemy reaches the cell; zero is its current cell.
    pub turns_ahead: u32,
}

/// Raw per-turn game state as delivered by the transport layer.
///
/// Each `field` entry is a cell token: `null`, `""` or `"_"` for empty space,
/// `"A"` for an asteroid, `"C"` for a coin, and `"P"` or `"E"` followed by a
/// heading letter for the player's ship and enemies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Row-major matrix of cell tokens.
    pub field: Vec<Vec<Option<String>>>,
    /// Turns until the playable area narrows. Not consumed by the decision.
    #[serde(default)]
    pub narrowing_in: i64,
    /// Identifier of the game the snapshot belongs to.
    #[serde(default)]
    pub game_id: i64,
}
