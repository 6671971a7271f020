#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first route planning across the board.
//!
//! Neighbours are expanded in the fixed order north, east, south, west and the
//! first predecessor that reaches a cell is kept. The earliest dequeue of the
//! target is therefore a minimal-hop route, and among equally short routes the
//! one whose first step ranks earliest in that order is chosen.

use std::collections::VecDeque;

use skirmish_board::{spatial, Board};
use skirmish_core::{CellCoord, Heading, BOARD_SIZE};

/// First cell to enter on a shortest route from `start` to `target`.
///
/// Only empty and coin cells may be crossed, and `target` must itself be
/// enterable. Returns `None` when `start == target` or no route exists.
#[must_use]
pub fn next_step(board: &Board, start: CellCoord, target: CellCoord) -> Option<CellCoord> {
    shortest_path(board, start, target).and_then(|path| path.first().copied())
}

/// Shortest route from `start` to `target`, excluding `start` itself.
///
/// An empty route means the two cells coincide.
#[must_use]
pub fn shortest_path(board: &Board, start: CellCoord, target: CellCoord) -> Option<Vec<CellCoord>> {
    search_with(start, target, |cell| {
        board.cell_at(cell).is_some_and(spatial::is_passable)
    })
}

/// Number of moves on the shortest route from `start` to `target`.
#[must_use]
pub fn path_length(board: &Board, start: CellCoord, target: CellCoord) -> Option<usize> {
    shortest_path(board, start, target).map(|path| path.len())
}

/// Breadth-first search using a caller-provided passability test.
///
/// `is_open` is consulted for every cell the search might enter, the target
/// included, but never for `start`.
pub fn search_with<F>(start: CellCoord, target: CellCoord, mut is_open: F) -> Option<Vec<CellCoord>>
where
    F: FnMut(CellCoord) -> bool,
{
    if !spatial::in_bounds(start) || !spatial::in_bounds(target) {
        return None;
    }

    if start == target {
        return Some(Vec::new());
    }

    let mut search = PredecessorField::new(start);
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == target {
            return Some(search.route_to(start, target));
        }

        for neighbor in neighbors(cell) {
            if search.visited(neighbor) || !is_open(neighbor) {
                continue;
            }

            search.record(neighbor, cell);
            queue.push_back(neighbor);
        }
    }

    None
}

/// Dense predecessor links captured while the search floods the board.
#[derive(Debug)]
struct PredecessorField {
    visited: Vec<bool>,
    predecessors: Vec<Option<CellCoord>>,
}

impl PredecessorField {
    fn new(start: CellCoord) -> Self {
        let cell_count = (BOARD_SIZE * BOARD_SIZE) as usize;
        let mut field = Self {
            visited: vec![false; cell_count],
            predecessors: vec![None; cell_count],
        };
        if let Some(offset) = index(start) {
            field.visited[offset] = true;
        }
        field
    }

    fn visited(&self, cell: CellCoord) -> bool {
        index(cell).map_or(true, |offset| self.visited[offset])
    }

    fn record(&mut self, cell: CellCoord, predecessor: CellCoord) {
        if let Some(offset) = index(cell) {
            self.visited[offset] = true;
            self.predecessors[offset] = Some(predecessor);
        }
    }

    fn route_to(&self, start: CellCoord, target: CellCoord) -> Vec<CellCoord> {
        let mut route = Vec::new();
        let mut current = target;
        while current != start {
            route.push(current);
            match index(current).and_then(|offset| self.predecessors[offset]) {
                Some(previous) => current = previous,
                None => break,
            }
        }
        route.reverse();
        route
    }
}

fn neighbors(cell: CellCoord) -> impl Iterator<Item = CellCoord> {
    Heading::ALL
        .into_iter()
        .filter_map(move |heading| cell.step(heading))
        .filter(|neighbor| spatial::in_bounds(*neighbor))
}

fn index(cell: CellCoord) -> Option<usize> {
    if !spatial::in_bounds(cell) {
        return None;
    }
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    row.checked_mul(BOARD_SIZE as usize)?.checked_add(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_routes_by_manhattan_distance() {
        let start = CellCoord::new(0, 0);
        let target = CellCoord::new(2, 3);
        let route = search_with(start, target, |_| true).expect("route exists");
        assert_eq!(route.len(), 5);
        assert_eq!(route.last(), Some(&target));
    }

    #[test]
    fn first_step_prefers_north_then_east() {
        let start = CellCoord::new(6, 6);
        let route = search_with(start, CellCoord::new(4, 8), |_| true).expect("route");
        assert_eq!(route[0], CellCoord::new(5, 6));

        let route = search_with(start, CellCoord::new(8, 8), |_| true).expect("route");
        assert_eq!(route[0], CellCoord::new(6, 7));
    }

    #[test]
    fn walls_force_a_detour() {
        let start = CellCoord::new(1, 0);
        let target = CellCoord::new(1, 2);
        let wall = CellCoord::new(1, 1);
        let route = search_with(start, target, |cell| cell != wall).expect("route");
        assert_eq!(route.len(), 4);
        assert!(!route.contains(&wall));
    }

    #[test]
    fn blocked_target_is_unreachable() {
        let target = CellCoord::new(3, 3);
        assert_eq!(
            search_with(CellCoord::new(0, 0), target, |cell| cell != target),
            None
        );
    }

    #[test]
    fn same_cell_yields_empty_route() {
        let cell = CellCoord::new(4, 4);
        assert_eq!(search_with(cell, cell, |_| false), Some(Vec::new()));
    }

    #[test]
    fn off_board_endpoints_are_rejected() {
        assert_eq!(
            search_with(CellCoord::new(0, 0), CellCoord::new(0, BOARD_SIZE), |_| true),
            None
        );
    }
}
