#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Straight-line trajectory forecasts for enemy ships.

use skirmish_board::{spatial, Board};
use skirmish_core::{CellCoord, Heading, PredictedPosition, Ship, BOARD_SIZE};

/// Forecasts where `enemy` will be over the next `horizon` turns.
///
/// The first entry is always the enemy's current cell with `turns_ahead == 0`.
/// Each following entry advances one cell along the enemy's heading. The
/// projection stops before leaving the board or entering an asteroid. Heading
/// changes are not modelled, and coins or other ships do not interrupt the
/// projection.
#[must_use]
pub fn predict(board: &Board, enemy: Ship, horizon: u32) -> Vec<PredictedPosition> {
    let reach = horizon.min(BOARD_SIZE - 1);
    let mut trajectory = Vec::with_capacity(reach as usize + 1);
    trajectory.push(PredictedPosition {
        cell: enemy.cell,
        turns_ahead: 0,
    });

    let ahead = spatial::trace_line(board, enemy.cell, enemy.heading, reach);
    trajectory.extend((1..).zip(ahead).map(|(turns_ahead, cell)| PredictedPosition {
        cell,
        turns_ahead,
    }));
    trajectory
}

/// Reports whether `enemy` points at `cell` along its nearest axis.
#[must_use]
pub fn is_facing(enemy: Ship, cell: CellCoord) -> bool {
    Heading::toward(enemy.cell, cell) == Some(enemy.heading)
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

    fn cells(trajectory: &[PredictedPosition]) -> Vec<(u32, u32, u32)> {
        trajectory
            .iter()
            .map(|position| {
                (
                    position.cell.row(),
                    position.cell.column(),
                    position.turns_ahead,
                )
            })
            .collect()
    }

    #[test]
    fn projects_full_horizon_in_open_space() {
        let board = board_with(&[(6, 6, "PN"), (10, 2, "EN")]);
        let enemy = board.enemies()[0];
        let trajectory = predict(&board, enemy, 5);
        assert_eq!(
            cells(&trajectory),
            vec![
                (10, 2, 0),
                (9, 2, 1),
                (8, 2, 2),
                (7, 2, 3),
                (6, 2, 4),
                (5, 2, 5)
            ]
        );
    }

    #[test]
    fn stops_at_board_edge() {
        let board = board_with(&[(6, 6, "PN"), (1, 11, "EE")]);
        let enemy = board.enemies()[0];
        assert_eq!(
            cells(&predict(&board, enemy, 5)),
            vec![(1, 11, 0), (1, 12, 1)]
        );
    }

    #[test]
    fn stops_before_asteroid() {
        let board = board_with(&[(6, 6, "PN"), (3, 8, "EW"), (3, 5, "A")]);
        let enemy = board.enemies()[0];
        assert_eq!(
            cells(&predict(&board, enemy, 5)),
            vec![(3, 8, 0), (3, 7, 1), (3, 6, 2)]
        );
    }

    #[test]
    fn coins_and_ships_do_not_stop_projection() {
        let board = board_with(&[(6, 6, "PN"), (6, 9, "EW"), (6, 8, "C"), (6, 7, "ES")]);
        let enemy = board.enemies()[1];
        assert_eq!(enemy.cell, CellCoord::new(6, 9));
        let trajectory = predict(&board, enemy, 3);
        assert_eq!(cells(&trajectory), vec![(6, 9, 0), (6, 8, 1), (6, 7, 2), (6, 6, 3)]);
    }

    #[test]
    fn unbounded_horizon_is_limited_by_board() {
        let board = board_with(&[(6, 6, "PN"), (12, 3, "EN")]);
        let enemy = board.enemies()[0];
        let trajectory = predict(&board, enemy, u32::MAX);
        assert_eq!(trajectory.len(), BOARD_SIZE as usize);
        assert_eq!(
            trajectory.last(),
            Some(&PredictedPosition {
                cell: CellCoord::new(0, 3),
                turns_ahead: 12,
            })
        );
    }

    #[test]
    fn zero_horizon_keeps_only_current_cell() {
        let board = board_with(&[(6, 6, "PN"), (0, 0, "ES")]);
        let enemy = board.enemies()[0];
        assert_eq!(cells(&predict(&board, enemy, 0)), vec![(0, 0, 0)]);
    }

    #[test]
    fn facing_uses_nearest_axis() {
        let enemy = Ship {
            cell: CellCoord::new(2, 6),
            heading: Heading::South,
        };
        assert!(is_facing(enemy, CellCoord::new(6, 6)));
        assert!(is_facing(enemy, CellCoord::new(6, 8)));
        assert!(!is_facing(enemy, CellCoord::new(3, 10)));
        assert!(!is_facing(enemy, enemy.cell));
    }
}
