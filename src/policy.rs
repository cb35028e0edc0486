// Move decision for a single turn
//
// build grid -> search from our head -> pick a destination -> walk the
// search tree back to the first step.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::builder::GridBuilder;
use crate::config::Config;
use crate::explorer::furthest_reachable;
use crate::grid::Grid;
use crate::pathfinding::{plan_paths, PathPlan};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Which destination the turn's move heads for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "at")]
pub enum Decision {
    Target(Coord),
    Food(Coord),
    Fallback(Coord),
    Random,
}

impl Decision {
    pub fn kind(&self) -> &'static str {
        match self {
            Decision::Target(_) => "target",
            Decision::Food(_) => "food",
            Decision::Fallback(_) => "fallback",
            Decision::Random => "random",
        }
    }

    pub fn destination(&self) -> Option<Coord> {
        match *self {
            Decision::Target(c) | Decision::Food(c) | Decision::Fallback(c) => Some(c),
            Decision::Random => None,
        }
    }
}

/// Chosen move together with the reason for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDecision {
    pub direction: Direction,
    pub decision: Decision,
}

impl MoveDecision {
    /// Uniformly random move, used when no destination is reachable
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let moves = Direction::all();
        MoveDecision {
            direction: moves[rng.random_range(0..moves.len())],
            decision: Decision::Random,
        }
    }
}

/// Picks a destination from search results, preferring targets when healthy
pub fn decide(plan: &PathPlan, grid: &Grid, health: i32, config: &Config) -> Decision {
    if health > config.policy.aggression_health_threshold {
        if let Some(target) = plan.target {
            return Decision::Target(target);
        }
    }
    if let Some(food) = plan.food {
        return Decision::Food(food);
    }
    match furthest_reachable(grid, config.sentinels.reachable_threshold) {
        Some(cell) => Decision::Fallback(cell),
        None => Decision::Random,
    }
}

/// First move on the search tree path from `origin` to `destination`
///
/// Follows predecessors back until the cell entered straight from the origin;
/// a destination adjacent to the origin is that cell itself. Returns `None`
/// if the destination was never reached.
pub fn first_step(grid: &Grid, origin: Coord, destination: Coord) -> Option<Direction> {
    let mut current = destination;

    // a path visits each cell at most once
    for _ in 0..=grid.len() {
        let cell = grid.get(current)?;
        let previous = cell.predecessor?;
        if previous == origin {
            return cell.arrival;
        }
        current = previous;
    }

    None
}

/// Computes the move for `you` on `board`
///
/// `rng` is only drawn from when no destination exists.
pub fn choose_move<R: Rng>(
    board: &Board,
    you: &Battlesnake,
    config: &Config,
    rng: &mut R,
) -> MoveDecision {
    let mut grid = GridBuilder::new(board, you, config).build();
    let plan = plan_paths(&mut grid, you.head);
    let decision = decide(&plan, &grid, you.health, config);

    let Some(destination) = decision.destination() else {
        debug!("No reachable destination, moving at random");
        return MoveDecision::random(rng);
    };

    match first_step(&grid, you.head, destination) {
        Some(direction) => MoveDecision {
            direction,
            decision,
        },
        None => {
            warn!(
                "No path back from {} destination ({}, {})",
                decision.kind(),
                destination.x,
                destination.y
            );
            MoveDecision::random(rng)
        }
    }
}
