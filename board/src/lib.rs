#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative, read-only board model for a single Skirmish turn.
//!
//! A [`Board`] is parsed once from the transport [`Snapshot`] and then only
//! queried. Every enumeration it hands out is sorted with the row-major
//! comparator from [`CellCoord::row_major_cmp`], which is what the decision
//! systems rely on for their tie-breaks.

pub mod spatial;

use skirmish_core::{CellCoord, Entity, EntityKind, Heading, Ship, Snapshot, BOARD_SIZE};
use thiserror::Error;

/// Reasons a snapshot cannot be turned into a [`Board`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The token matrix is not square with the expected side length.
    #[error("board must be {size}x{size} cells, found {rows} rows and a row of {columns} cells", size = BOARD_SIZE)]
    MalformedBoard {
        /// Number of rows present in the snapshot.
        rows: usize,
        /// Length of the first row that breaks the shape.
        columns: usize,
    },
    /// No cell holds the player's ship.
    #[error("player ship not found on the board")]
    ShipNotFound,
    /// A cell token does not describe a known entity.
    #[error("cell {cell} holds unrecognised token `{token}`")]
    InvalidToken {
        /// Cell carrying the offending token.
        cell: CellCoord,
        /// Token exactly as received.
        token: String,
    },
}

/// Entity sighting produced by [`Board::find_all`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Contact {
    /// Cell that holds the entity.
    pub cell: CellCoord,
    /// Facing of the entity when it is a ship.
    pub heading: Option<Heading>,
}

/// Immutable snapshot of every cell on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Entity>,
    ship: Ship,
}

impl Board {
    /// Parses a transport snapshot into a typed board.
    ///
    /// The auxiliary counters carried by the snapshot are ignored.
    pub fn parse(snapshot: &Snapshot) -> Result<Self, BoardError> {
        Self::from_field(&snapshot.field)
    }

    /// Parses a row-major matrix of cell tokens.
    pub fn from_field(field: &[Vec<Option<String>>]) -> Result<Self, BoardError> {
        let side = BOARD_SIZE as usize;
        if field.len() != side {
            return Err(BoardError::MalformedBoard {
                rows: field.len(),
                columns: field.first().map_or(0, Vec::len),
            });
        }
        if let Some(row) = field.iter().find(|row| row.len() != side) {
            return Err(BoardError::MalformedBoard {
                rows: field.len(),
                columns: row.len(),
            });
        }

        let mut cells = Vec::with_capacity(side * side);
        for (row_index, row) in (0..BOARD_SIZE).zip(field) {
            for (column_index, token) in (0..BOARD_SIZE).zip(row) {
                let cell = CellCoord::new(row_index, column_index);
                cells.push(parse_token(cell, token.as_deref())?);
            }
        }

        let ship = cells
            .iter()
            .zip(all_cells())
            .find_map(|(entity, cell)| match entity {
                Entity::PlayerShip(heading) => Some(Ship {
                    cell,
                    heading: *heading,
                }),
                _ => None,
            })
            .ok_or(BoardError::ShipNotFound)?;

        Ok(Self { cells, ship })
    }

    /// Location and facing of the player's ship.
    ///
    /// When a snapshot carries several player tokens the first one in row-major
    /// order is the ship.
    #[must_use]
    pub const fn find_ship(&self) -> Ship {
        self.ship
    }

    /// Every cell holding an entity of `kind`, in row-major order.
    #[must_use]
    pub fn find_all(&self, kind: EntityKind) -> Vec<Contact> {
        let mut contacts: Vec<Contact> = self
            .cells()
            .filter(|(_, entity)| entity.kind() == kind)
            .map(|(cell, entity)| Contact {
                cell,
                heading: entity.heading(),
            })
            .collect();
        contacts.sort_by(|left, right| left.cell.row_major_cmp(&right.cell));
        contacts
    }

    /// Every enemy ship with its facing, in row-major order.
    #[must_use]
    pub fn enemies(&self) -> Vec<Ship> {
        self.find_all(EntityKind::EnemyShip)
            .into_iter()
            .filter_map(|contact| {
                contact.heading.map(|heading| Ship {
                    cell: contact.cell,
                    heading,
                })
            })
            .collect()
    }

    /// Entity stored at `cell`, or `None` when the cell lies off the board.
    #[must_use]
    pub fn cell_at(&self, cell: CellCoord) -> Option<Entity> {
        index(cell).and_then(|offset| self.cells.get(offset).copied())
    }

    /// Iterator over all cells and their entities in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Entity)> + '_ {
        all_cells().zip(self.cells.iter().copied())
    }
}

fn parse_token(cell: CellCoord, token: Option<&str>) -> Result<Entity, BoardError> {
    let Some(token) = token else {
        return Ok(Entity::Empty);
    };

    let invalid = || BoardError::InvalidToken {
        cell,
        token: token.to_owned(),
    };

    let mut chars = token.chars();
    let entity = match chars.next() {
        None | Some('_') => Entity::Empty,
        Some('A') => Entity::Asteroid,
        Some('C') => Entity::Coin,
        Some('P') => Entity::PlayerShip(ship_heading(chars.next()).ok_or_else(invalid)?),
        Some('E') => Entity::EnemyShip(ship_heading(chars.next()).ok_or_else(invalid)?),
        Some(_) => return Err(invalid()),
    };
    Ok(entity)
}

fn ship_heading(letter: Option<char>) -> Option<Heading> {
    letter.and_then(Heading::from_letter)
}

fn all_cells() -> impl Iterator<Item = CellCoord> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |column| CellCoord::new(row, column)))
}

fn index(cell: CellCoord) -> Option<usize> {
    if !spatial::in_bounds(cell) {
        return None;
    }
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    row.checked_mul(BOARD_SIZE as usize)?.checked_add(column)
}
