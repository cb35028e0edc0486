// Grid construction from raw turn state
//
// Passes run in a fixed order: later passes read the costs and flags
// written by earlier ones.

use log::debug;

use crate::config::Config;
use crate::grid::{Cell, Grid};
use crate::types::{Battlesnake, Board, Coord};

/// Builds the annotated traversal grid for one turn
pub struct GridBuilder<'a> {
    board: &'a Board,
    you: &'a Battlesnake,
    config: &'a Config,
}

impl<'a> GridBuilder<'a> {
    pub fn new(board: &'a Board, you: &'a Battlesnake, config: &'a Config) -> Self {
        GridBuilder { board, you, config }
    }

    /// Runs every annotation pass and returns the grid ready for search
    pub fn build(&self) -> Grid {
        let mut grid = self.allocate();
        self.remove_snake_bodies(&mut grid);
        self.mark_hazards(&mut grid);
        self.mark_food(&mut grid);
        let tunnels = self.mark_tunnels(&mut grid);
        let threats = self.mark_head_threats(&mut grid);
        let targets = self.mark_targets(&mut grid);

        debug!(
            "Built {}x{} grid: {} open cells, {} tunnels, {} head threats, {} targets",
            grid.width(),
            grid.height(),
            grid.len(),
            tunnels,
            threats,
            targets
        );

        grid
    }

    fn allocate(&self) -> Grid {
        Grid::filled(
            self.board.width,
            self.board.height,
            Cell::open(self.config.costs.default, self.config.sentinels.unreached_price),
        )
    }

    /// Every body segment, heads included, is solid this turn
    fn remove_snake_bodies(&self, grid: &mut Grid) {
        for snake in &self.board.snakes {
            for segment in &snake.body {
                grid.remove(*segment);
            }
        }
    }

    fn mark_hazards(&self, grid: &mut Grid) {
        for hazard in &self.board.hazards {
            if let Some(cell) = grid.get_mut(*hazard) {
                cell.cost = self.config.costs.hazard;
            }
        }
    }

    fn mark_food(&self, grid: &mut Grid) {
        for food in &self.board.food {
            if let Some(cell) = grid.get_mut(*food) {
                cell.food = true;
            }
        }
    }

    /// Raises the cost of low-connectivity non-food cells
    ///
    /// Neighbour counts are taken before any cost changes, though presence is
    /// all that is read so the order would not matter anyway.
    fn mark_tunnels(&self, grid: &mut Grid) -> usize {
        let threshold = self.config.tunnels.min_open_neighbors;
        let tunnels: Vec<Coord> = grid
            .iter()
            .filter(|(coord, cell)| !cell.food && grid.open_neighbor_count(*coord) < threshold)
            .map(|(coord, _)| coord)
            .collect();

        for coord in &tunnels {
            if let Some(cell) = grid.get_mut(*coord) {
                cell.cost = self.config.costs.tunnel;
            }
        }

        tunnels.len()
    }

    /// Squares a larger-or-equal opponent could move into next turn
    fn mark_head_threats(&self, grid: &mut Grid) -> usize {
        let mut marked = 0;

        for snake in self.opponents().filter(|s| s.length >= self.you.length) {
            let Some(head) = snake.body.first() else {
                continue;
            };
            let threatened: Vec<Coord> = grid.neighbors(*head).map(|(_, next)| next).collect();
            for coord in threatened {
                if let Some(cell) = grid.get_mut(coord) {
                    cell.cost = self.config.costs.head_threat;
                    marked += 1;
                }
            }
        }

        marked
    }

    /// Smaller opponents' heads become huntable targets
    ///
    /// The head was removed as a body segment; this pass layers a fresh
    /// target cell back on top of it.
    fn mark_targets(&self, grid: &mut Grid) -> usize {
        let mut marked = 0;

        for snake in self.opponents().filter(|s| s.length < self.you.length) {
            let mut cell = Cell::open(self.config.costs.target, self.config.sentinels.target_price);
            cell.target = true;
            if grid.insert(snake.head, cell) {
                marked += 1;
            }
        }

        marked
    }

    fn opponents(&self) -> impl Iterator<Item = &'a Battlesnake> + '_ {
        self.board.snakes.iter().filter(move |s| s.id != self.you.id)
    }
}
