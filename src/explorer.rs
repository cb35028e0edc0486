// Fallback destination when neither food nor a target can be reached

use std::cmp::Reverse;

use crate::grid::Grid;
use crate::types::Coord;

/// Returns the reachable cell with the highest price after a search
///
/// Cells priced at or above `reachable_threshold` count as never reached
/// (this also excludes untouched target cells and head-threat squares).
/// Ties go to the first cell scanning column by column (`x` outer, `y`
/// inner), with target heads placed after every ordinary cell.
pub fn furthest_reachable(grid: &Grid, reachable_threshold: u32) -> Option<Coord> {
    grid.iter()
        .filter(|(_, cell)| cell.price < reachable_threshold)
        .min_by_key(|(coord, cell)| (Reverse(cell.price), cell.target, coord.x, coord.y))
        .map(|(coord, _)| coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::pathfinding::plan_paths;

    fn open_grid(width: i32, height: i32) -> Grid {
        Grid::filled(width, height, Cell::open(1, 99_999_999))
    }

    #[test]
    fn test_picks_most_expensive_reachable_cell() {
        let mut grid = open_grid(5, 5);
        let head = Coord::new(0, 0);
        grid.remove(head);
        plan_paths(&mut grid, head);

        assert_eq!(furthest_reachable(&grid, 10_000), Some(Coord::new(4, 4)));
    }

    #[test]
    fn test_ignores_cells_at_or_above_threshold() {
        let mut grid = open_grid(3, 1);
        let head = Coord::new(0, 0);
        grid.remove(head);
        grid.get_mut(Coord::new(2, 0)).unwrap().cost = 99_999;
        plan_paths(&mut grid, head);

        assert_eq!(furthest_reachable(&grid, 10_000), Some(Coord::new(1, 0)));
    }

    #[test]
    fn test_none_when_nothing_reached() {
        let mut grid = open_grid(3, 3);
        let head = Coord::new(1, 1);
        for coord in [head, Coord::new(1, 0), Coord::new(1, 2), Coord::new(0, 1), Coord::new(2, 1)] {
            grid.remove(coord);
        }
        plan_paths(&mut grid, head);

        assert_eq!(furthest_reachable(&grid, 10_000), None);
    }

    #[test]
    fn test_ties_go_to_first_cell_by_column() {
        // (1,0) and (0,1) both cost 1; scanning by row would pick (1,0)
        let mut grid = open_grid(2, 2);
        let head = Coord::new(0, 0);
        grid.remove(head);
        grid.get_mut(Coord::new(1, 1)).unwrap().cost = 0;
        plan_paths(&mut grid, head);

        assert_eq!(furthest_reachable(&grid, 10_000), Some(Coord::new(0, 1)));
    }

    #[test]
    fn test_ties_with_target_heads_go_to_ordinary_cells() {
        let mut grid = open_grid(3, 1);
        let head = Coord::new(1, 0);
        grid.remove(head);
        grid.get_mut(Coord::new(0, 0)).unwrap().target = true;
        plan_paths(&mut grid, head);

        assert_eq!(furthest_reachable(&grid, 10_000), Some(Coord::new(2, 0)));
    }
}
