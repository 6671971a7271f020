//! Stateless spatial queries over the fixed-size board.

use skirmish_core::{CellCoord, Entity, Heading, BOARD_SIZE};

use crate::Board;

/// Reports whether `cell` lies on the board.
#[must_use]
pub const fn in_bounds(cell: CellCoord) -> bool {
    cell.row() < BOARD_SIZE && cell.column() < BOARD_SIZE
}

/// Manhattan distance between two cells.
#[must_use]
pub fn manhattan(from: CellCoord, to: CellCoord) -> u32 {
    from.manhattan_distance(to)
}

/// Reports whether a ship may move into a cell holding `entity`.
///
/// Only empty space and coins can be entered. Asteroids and every ship,
/// including our own, block movement.
#[must_use]
pub const fn is_passable(entity: Entity) -> bool {
    matches!(entity, Entity::Empty | Entity::Coin)
}

/// Cells visited when walking from `origin` along `heading`.
///
/// The walk covers at most `max_range` cells and excludes `origin`. It stops
/// before the first cell past the board edge and before the first asteroid;
/// neither that cell nor anything beyond it is returned. Ships and coins do
/// not stop the walk, so the same trace answers both "how far can I move" and
/// "does my shot reach that cell".
#[must_use]
pub fn trace_line(
    board: &Board,
    origin: CellCoord,
    heading: Heading,
    max_range: u32,
) -> Vec<CellCoord> {
    let reach = max_range.min(BOARD_SIZE - 1);
    let mut traced = Vec::with_capacity(reach as usize);
    let mut current = origin;

    for _ in 0..reach {
        let Some(next) = current.step(heading) else {
            break;
        };

        // `cell_at` is `None` past the far edges.
        match board.cell_at(next) {
            Some(Entity::Asteroid) | None => break,
            Some(_) => {}
        }

        traced.push(next);
        current = next;
    }

    traced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(tokens: &[(u32, u32, &str)]) -> Board {
        let side = BOARD_SIZE as usize;
        let mut field = vec![vec![None; side]; side];
        for &(row, column, token) in tokens {
            field[row as usize][column as usize] = Some(token.to_owned());
        }
        Board::from_field(&field).expect("test board parses")
    }

    #[test]
    fn bounds_cover_thirteen_cells_per_axis() {
        assert!(in_bounds(CellCoord::new(0, 0)));
        assert!(in_bounds(CellCoord::new(12, 12)));
        assert!(!in_bounds(CellCoord::new(13, 0)));
        assert!(!in_bounds(CellCoord::new(0, 13)));
    }

    #[test]
    fn passability_admits_only_empty_and_coins() {
        assert!(is_passable(Entity::Empty));
        assert!(is_passable(Entity::Coin));
        assert!(!is_passable(Entity::Asteroid));
        assert!(!is_passable(Entity::EnemyShip(Heading::North)));
        assert!(!is_passable(Entity::PlayerShip(Heading::North)));
    }

    #[test]
    fn manhattan_sums_axis_distances() {
        assert_eq!(manhattan(CellCoord::new(6, 6), CellCoord::new(2, 9)), 7);
    }

    #[test]
    fn trace_respects_range() {
        let board = board_with(&[(6, 6, "PE")]);
        let traced = trace_line(&board, CellCoord::new(6, 6), Heading::East, 4);
        assert_eq!(
            traced,
            vec![
                CellCoord::new(6, 7),
                CellCoord::new(6, 8),
                CellCoord::new(6, 9),
                CellCoord::new(6, 10),
            ]
        );
    }

    #[test]
    fn trace_stops_at_board_edge() {
        let board = board_with(&[(1, 11, "PN")]);
        let north = trace_line(&board, CellCoord::new(1, 11), Heading::North, 4);
        assert_eq!(north, vec![CellCoord::new(0, 11)]);

        let east = trace_line(&board, CellCoord::new(1, 11), Heading::East, 4);
        assert_eq!(east, vec![CellCoord::new(1, 12)]);

        let corner = board_with(&[(12, 12, "PS")]);
        assert!(trace_line(&corner, CellCoord::new(12, 12), Heading::South, 4).is_empty());
    }

    #[test]
    fn trace_stops_before_asteroid_but_passes_ships_and_coins() {
        let board = board_with(&[
            (6, 6, "PW"),
            (6, 5, "C"),
            (6, 4, "EN"),
            (6, 3, "A"),
            (6, 2, "EE"),
        ]);
        let traced = trace_line(&board, CellCoord::new(6, 6), Heading::West, 4);
        assert_eq!(traced, vec![CellCoord::new(6, 5), CellCoord::new(6, 4)]);
    }

    #[test]
    fn unbounded_range_stops_at_far_edge() {
        let board = board_with(&[(0, 0, "PS")]);
        let traced = trace_line(&board, CellCoord::new(0, 0), Heading::South, u32::MAX);
        assert_eq!(traced.len(), BOARD_SIZE as usize - 1);
        assert_eq!(traced.last(), Some(&CellCoord::new(12, 0)));

        let east = trace_line(&board, CellCoord::new(0, 0), Heading::East, u32::MAX);
        assert_eq!(east.last(), Some(&CellCoord::new(0, 12)));
    }

    #[test]
    fn zero_range_traces_nothing() {
        let board = board_with(&[(6, 6, "PE")]);
        assert!(trace_line(&board, CellCoord::new(6, 6), Heading::East, 0).is_empty());
    }
}
