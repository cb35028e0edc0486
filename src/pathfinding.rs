// Weighted shortest-path search from our head
//
// One traversal finds both the nearest food and the nearest target. Cells
// are relaxed in place; a cell may be pushed several times as its price
// improves, and entries whose price no longer matches the cell are stale.

use log::debug;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::grid::Grid;
use crate::types::{Coord, Direction};

/// Nearest destinations found by a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathPlan {
    pub food: Option<Coord>,
    pub target: Option<Coord>,
}

#[derive(Debug, PartialEq, Eq)]
struct Frontier {
    price: u32,
    /// Order in which `coord` first entered the frontier
    seq: u64,
    coord: Coord,
}

// Min-heap on price; equal prices pop first-in, first-out
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .price
            .cmp(&self.price)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Searches `grid` from `origin`, writing prices and predecessors into it
///
/// The origin is seeded at price 0 whether or not it has a cell (our own
/// head is normally removed as a body segment) and is never itself reported
/// as food or target. The search stops as soon as both a food and a target
/// cell have been settled.
///
/// Cells of equal price are expanded in the order they were first
/// discovered. A cell whose price later drops keeps its original place in
/// that order.
pub fn plan_paths(grid: &mut Grid, origin: Coord) -> PathPlan {
    let mut plan = PathPlan::default();
    let mut frontier = BinaryHeap::new();
    let mut discovered: HashMap<Coord, u64> = HashMap::new();
    let mut settled = 0usize;

    if let Some(cell) = grid.get_mut(origin) {
        cell.price = 0;
        cell.predecessor = None;
        cell.arrival = None;
    }
    discovered.insert(origin, 0);
    frontier.push(Frontier {
        price: 0,
        seq: 0,
        coord: origin,
    });

    while let Some(Frontier { price, coord, .. }) = frontier.pop() {
        if coord != origin {
            let Some(cell) = grid.get(coord) else {
                continue;
            };
            if cell.price != price {
                continue;
            }
            if cell.food && plan.food.is_none() {
                plan.food = Some(coord);
            }
            if cell.target && plan.target.is_none() {
                plan.target = Some(coord);
            }
            if plan.food.is_some() && plan.target.is_some() {
                break;
            }
        }
        settled += 1;

        for direction in Direction::all() {
            let next = direction.apply(&coord);
            if let Some(cell) = grid.get_mut(next) {
                let candidate = price.saturating_add(cell.cost);
                if candidate < cell.price {
                    cell.price = candidate;
                    cell.predecessor = Some(coord);
                    cell.arrival = Some(direction);
                    let order = discovered.len() as u64;
                    let seq = *discovered.entry(next).or_insert(order);
                    frontier.push(Frontier {
                        price: candidate,
                        seq,
                        coord: next,
                    });
                }
            }
        }
    }

    debug!(
        "Search from ({}, {}) settled {} cells: food={:?} target={:?}",
        origin.x, origin.y, settled, plan.food, plan.target
    );

    plan
}
