//! Board state management for Dots and Boxes.
//!
//! Tracks placed edges, validates new lines and detects closed cells.

use crate::engine::models::PlayerId;

use super::types::{Board, ClaimedCell, Edge, GameStatus, MoveRejection, Orientation};

/// Total number of edges on an N×N board: N+1 rows of N horizontals plus
/// N rows of N+1 verticals.
pub fn edge_count(grid_size: usize) -> usize {
    2 * grid_size * (grid_size + 1)
}

/// Every edge of an N×N board, horizontals first, each row-major.
pub fn all_edges(grid_size: usize) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(edge_count(grid_size));
    for row in 0..=grid_size {
        for col in 0..grid_size {
            edges.push(Edge::horizontal(row, col));
        }
    }
    for row in 0..grid_size {
        for col in 0..=grid_size {
            edges.push(Edge::vertical(row, col));
        }
    }
    edges
}

pub fn has_edge(board: &Board, edge: &Edge) -> bool {
    let key = (edge.row, edge.col);
    match edge.orientation {
        Orientation::Horizontal => board.horizontal.contains(&key),
        Orientation::Vertical => board.vertical.contains(&key),
    }
}

/// Edges that can still be drawn, in [`all_edges`] order.
pub fn remaining_edges(board: &Board) -> Vec<Edge> {
    all_edges(board.grid_size)
        .into_iter()
        .filter(|edge| !has_edge(board, edge))
        .collect()
}

/// Check a move against the board. Reasons are reported in priority order:
/// finished game, then bounds, then duplicates.
pub fn validate_move(board: &Board, status: GameStatus, edge: &Edge) -> Result<(), MoveRejection> {
    if status == GameStatus::Finished {
        return Err(MoveRejection::GameAlreadyFinished);
    }
    if !edge.in_bounds(board.grid_size) {
        return Err(MoveRejection::OutOfRange {
            edge: *edge,
            grid_size: board.grid_size,
        });
    }
    if has_edge(board, edge) {
        return Err(MoveRejection::EdgeAlreadyPlaced { edge: *edge });
    }
    Ok(())
}

/// Add an edge to the board.
///
/// Assumes validate_move() has already returned Ok. Placing an edge twice is a
/// caller bug and panics.
pub fn place_edge(board: &mut Board, edge: &Edge) {
    let key = (edge.row, edge.col);
    let inserted = match edge.orientation {
        Orientation::Horizontal => board.horizontal.insert(key),
        Orientation::Vertical => board.vertical.insert(key),
    };
    assert!(inserted, "place_edge called for already placed edge {edge}");
}

/// All four sides of cell (row, col) are drawn.
pub fn is_cell_closed(board: &Board, row: usize, col: usize) -> bool {
    let top = board.horizontal.contains(&(row, col));
    let bottom = board.horizontal.contains(&(row + 1, col));
    let left = board.vertical.contains(&(row, col));
    let right = board.vertical.contains(&(row, col + 1));
    top && bottom && left && right
}

pub fn cell_owner(board: &Board, row: usize, col: usize) -> Option<PlayerId> {
    board
        .claimed
        .iter()
        .find(|cell| cell.row == row && cell.col == col)
        .map(|cell| cell.owner)
}

pub fn is_cell_claimed(board: &Board, row: usize, col: usize) -> bool {
    cell_owner(board, row, col).is_some()
}

/// Claim every closed, unclaimed cell for `mover`. Returns the newly claimed
/// cells in scan order.
///
/// Scans the whole board rather than the neighbours of the last edge: one line
/// borders at most two cells, so a move closes zero, one or two, and a full scan
/// finds exactly those.
pub fn detect_completions(board: &mut Board, mover: PlayerId) -> Vec<(usize, usize)> {
    let mut completed = Vec::new();
    for row in 0..board.grid_size {
        for col in 0..board.grid_size {
            if is_cell_claimed(board, row, col) {
                continue;
            }
            if is_cell_closed(board, row, col) {
                completed.push((row, col));
            }
        }
    }

    for &(row, col) in &completed {
        board.claimed.push(ClaimedCell {
            row,
            col,
            owner: mover,
        });
    }

    completed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(grid_size: usize, edges: &[Edge]) -> Board {
        let mut board = Board::new(grid_size);
        for edge in edges {
            place_edge(&mut board, edge);
        }
        board
    }

    fn sides_of(row: usize, col: usize) -> [Edge; 4] {
        [
            Edge::horizontal(row, col),
            Edge::horizontal(row + 1, col),
            Edge::vertical(row, col),
            Edge::vertical(row, col + 1),
        ]
    }

    #[test]
    fn test_edge_count() {
        assert_eq!(edge_count(1), 4);
        assert_eq!(edge_count(2), 12);
        assert_eq!(edge_count(5), 60);
        assert_eq!(edge_count(8), 144);
    }

    #[test]
    fn test_all_edges_unique_and_in_bounds() {
        for n in 1..=8 {
            let edges = all_edges(n);
            assert_eq!(edges.len(), edge_count(n));
            assert!(edges.iter().all(|e| e.in_bounds(n)));
            let unique: std::collections::HashSet<_> = edges.iter().collect();
            assert_eq!(unique.len(), edges.len());
        }
    }

    #[test]
    fn test_place_edge_sets_only_its_orientation() {
        let board = board_with(3, &[Edge::horizontal(1, 2)]);
        assert!(has_edge(&board, &Edge::horizontal(1, 2)));
        assert!(!has_edge(&board, &Edge::vertical(1, 2)));
        assert_eq!(board.edges_placed(), 1);
        assert_eq!(remaining_edges(&board).len(), edge_count(3) - 1);
    }

    #[test]
    #[should_panic(expected = "already placed")]
    fn test_place_edge_twice_panics() {
        let mut board = Board::new(3);
        place_edge(&mut board, &Edge::vertical(0, 0));
        place_edge(&mut board, &Edge::vertical(0, 0));
    }

    #[test]
    fn test_validate_move_priority() {
        let board = board_with(2, &[Edge::horizontal(0, 0)]);

        assert_eq!(validate_move(&board, GameStatus::InProgress, &Edge::horizontal(0, 1)), Ok(()));
        assert_eq!(
            validate_move(&board, GameStatus::InProgress, &Edge::horizontal(0, 0)),
            Err(MoveRejection::EdgeAlreadyPlaced { edge: Edge::horizontal(0, 0) })
        );
        assert_eq!(
            validate_move(&board, GameStatus::InProgress, &Edge::horizontal(0, 2)),
            Err(MoveRejection::OutOfRange { edge: Edge::horizontal(0, 2), grid_size: 2 })
        );
        // Finished wins over every other reason
        assert_eq!(
            validate_move(&board, GameStatus::Finished, &Edge::horizontal(0, 0)),
            Err(MoveRejection::GameAlreadyFinished)
        );
        assert_eq!(
            validate_move(&board, GameStatus::Finished, &Edge::vertical(7, 7)),
            Err(MoveRejection::GameAlreadyFinished)
        );
    }

    #[test]
    fn test_validate_move_bounds_per_orientation() {
        let board = Board::new(2);
        // H(2,1) is the bottom of cell (1,1); V(1,2) is its right side
        assert!(validate_move(&board, GameStatus::InProgress, &Edge::horizontal(2, 1)).is_ok());
        assert!(validate_move(&board, GameStatus::InProgress, &Edge::vertical(1, 2)).is_ok());
        // but the transposed coordinates do not exist
        assert!(validate_move(&board, GameStatus::InProgress, &Edge::horizontal(1, 2)).is_err());
        assert!(validate_move(&board, GameStatus::InProgress, &Edge::vertical(2, 1)).is_err());
    }

    #[test]
    fn test_cell_closed_needs_all_four_sides() {
        let sides = sides_of(1, 1);
        for missing in 0..4 {
            let present: Vec<Edge> = sides
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != missing)
                .map(|(_, e)| *e)
                .collect();
            let board = board_with(3, &present);
            assert!(!is_cell_closed(&board, 1, 1), "missing side {missing}");
        }
        let board = board_with(3, &sides);
        assert!(is_cell_closed(&board, 1, 1));
        assert!(!is_cell_closed(&board, 0, 1));
    }

    #[test]
    fn test_detect_single_completion() {
        let mut board = board_with(2, &sides_of(0, 0));
        let completed = detect_completions(&mut board, 2);
        assert_eq!(completed, vec![(0, 0)]);
        assert_eq!(cell_owner(&board, 0, 0), Some(2));
        assert_eq!(cell_owner(&board, 1, 1), None);
    }

    #[test]
    fn test_detect_skips_already_claimed() {
        let mut board = board_with(2, &sides_of(0, 0));
        detect_completions(&mut board, 1);
        let again = detect_completions(&mut board, 2);
        assert!(again.is_empty());
        assert_eq!(board.claimed.len(), 1);
        assert_eq!(cell_owner(&board, 0, 0), Some(1));
    }

    #[test]
    fn test_shared_edge_closes_two_cells() {
        // Cells (0,0) and (0,1) share V(0,1); draw everything else first.
        let mut board = board_with(
            2,
            &[
                Edge::horizontal(0, 0),
                Edge::horizontal(1, 0),
                Edge::vertical(0, 0),
                Edge::horizontal(0, 1),
                Edge::horizontal(1, 1),
                Edge::vertical(0, 2),
            ],
        );
        assert!(detect_completions(&mut board, 1).is_empty());

        place_edge(&mut board, &Edge::vertical(0, 1));
        let completed = detect_completions(&mut board, 3);
        assert_eq!(completed, vec![(0, 0), (0, 1)]);
        assert!(board.claimed.iter().all(|c| c.owner == 3));
    }

    #[test]
    fn test_no_completion_without_closing() {
        let mut board = board_with(3, &[Edge::horizontal(0, 0), Edge::vertical(0, 0)]);
        assert!(detect_completions(&mut board, 1).is_empty());
        assert!(board.claimed.is_empty());
    }
}
