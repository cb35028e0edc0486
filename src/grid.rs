// Per-turn traversal grid
//
// The grid is an arena of cells indexed by coordinate. A position with no
// cell is impassable for the turn; there is no separate wall flag.

use crate::types::{Coord, Direction};

/// A single traversable grid position and its search state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Weight charged when entering this cell
    pub cost: u32,
    pub food: bool,
    /// Smaller opponent's head that can be hunted
    pub target: bool,
    /// Cheapest known path cost from the search origin
    pub price: u32,
    /// Where the current best path arrives from
    pub predecessor: Option<Coord>,
    /// Move that steps from `predecessor` into this cell
    pub arrival: Option<Direction>,
}

impl Cell {
    /// Creates an unreached, unflagged cell with the given entry cost
    pub fn open(cost: u32, unreached_price: u32) -> Self {
        Cell {
            cost,
            food: false,
            target: false,
            price: unreached_price,
            predecessor: None,
            arrival: None,
        }
    }
}

/// Rectangular grid of optional cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    /// Allocates a grid with a clone of `template` at every position
    ///
    /// Non-positive dimensions yield an empty grid.
    pub fn filled(width: i32, height: i32, template: Cell) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let area = (width as usize) * (height as usize);

        Grid {
            width,
            height,
            cells: vec![Some(template); area],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some((coord.y * self.width + coord.x) as usize)
        } else {
            None
        }
    }

    fn coord_at(&self, index: usize) -> Coord {
        let width = self.width as usize;
        Coord::new((index % width) as i32, (index / width) as i32)
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        match self.index(coord) {
            Some(i) => self.cells[i].as_mut(),
            None => None,
        }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.get(coord).is_some()
    }

    /// Removes the cell at `coord`, making it impassable
    pub fn remove(&mut self, coord: Coord) -> Option<Cell> {
        self.index(coord).and_then(|i| self.cells[i].take())
    }

    /// Puts `cell` at `coord`, replacing any existing cell
    ///
    /// Returns false (and drops the cell) when `coord` is off the board.
    pub fn insert(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(i) => {
                self.cells[i] = Some(cell);
                true
            }
            None => false,
        }
    }

    /// Present 4-neighbours of `coord`, paired with the move that reaches them
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::all()
            .into_iter()
            .map(move |direction| (direction, direction.apply(&coord)))
            .filter(move |(_, next)| self.contains(*next))
    }

    pub fn open_neighbor_count(&self, coord: Coord) -> usize {
        self.neighbors(coord).count()
    }

    /// All present cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|cell| (self.coord_at(i), cell)))
    }

    /// Number of present cells
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
