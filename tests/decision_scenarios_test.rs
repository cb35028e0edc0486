// Integration tests for whole-turn move decisions
//
// Each test builds an API board, runs the engine end to end and checks both
// the branch the policy took and the first step it produced.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use viper_snake::config::Config;
use viper_snake::policy::{choose_move, Decision};
use viper_snake::types::{Battlesnake, Board, Coord, Direction};

fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

fn board(snakes: Vec<Battlesnake>, food: &[(i32, i32)]) -> Board {
    Board {
        height: 11,
        width: 11,
        food: food.iter().map(|&(x, y)| Coord { x, y }).collect(),
        snakes,
        hazards: vec![],
    }
}

/// Our snake heads up from (5,5); a two-long opponent sits three squares above
/// and food lies five squares to the left.
fn hunt_or_eat_board(health: i32) -> Board {
    board(
        vec![
            snake("me", health, &[(5, 5), (5, 4), (5, 3)]),
            snake("small", 90, &[(5, 8), (5, 9)]),
        ],
        &[(0, 5)],
    )
}

#[test]
fn test_adjacent_food_is_taken_directly() {
    let config = Config::default_hardcoded();
    let b = board(vec![snake("me", 80, &[(5, 5)])], &[(6, 5)]);
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(1);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    assert_eq!(chosen.decision, Decision::Food(Coord { x: 6, y: 5 }));
    assert_eq!(chosen.direction, Direction::Right);
}

#[test]
fn test_adjacent_food_below_head() {
    let config = Config::default_hardcoded();
    let b = board(vec![snake("me", 80, &[(5, 5)])], &[(5, 4)]);
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(1);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    assert_eq!(chosen.direction, Direction::Down);
}

#[test]
fn test_healthy_snake_hunts_smaller_head() {
    let config = Config::default_hardcoded();
    let b = hunt_or_eat_board(80);
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(2);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    assert_eq!(chosen.decision, Decision::Target(Coord { x: 5, y: 8 }));
    assert_eq!(chosen.direction, Direction::Up);
}

#[test]
fn test_hungry_snake_prefers_food_over_target() {
    let config = Config::default_hardcoded();
    let b = hunt_or_eat_board(30);
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(3);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    assert_eq!(chosen.decision, Decision::Food(Coord { x: 0, y: 5 }));
    assert_eq!(chosen.direction, Direction::Left);
}

#[test]
fn test_health_exactly_at_threshold_goes_for_food() {
    let config = Config::default_hardcoded();
    let b = hunt_or_eat_board(50);
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(4);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    assert_eq!(chosen.decision.kind(), "food");
}

#[test]
fn test_enclosed_head_moves_at_random() {
    let config = Config::default_hardcoded();
    // body wraps all four sides of the head
    let b = board(
        vec![snake(
            "me",
            80,
            &[(5, 5), (5, 6), (4, 6), (4, 5), (4, 4), (5, 4), (6, 4), (6, 5)],
        )],
        &[(0, 0)],
    );
    let you = b.snakes[0].clone();

    let mut seen = HashSet::new();
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let chosen = choose_move(&b, &you, &config, &mut rng);
        assert_eq!(chosen.decision, Decision::Random);
        seen.insert(chosen.direction);
    }

    assert_eq!(seen.len(), 4, "random moves should cover the whole move set");
}

#[test]
fn test_no_food_falls_back_to_furthest_cell() {
    let config = Config::default_hardcoded();
    let b = board(vec![snake("me", 80, &[(0, 5), (0, 4)])], &[]);
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(5);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    match chosen.decision {
        Decision::Fallback(cell) => assert!(cell.x > 5, "fallback should be far away: {:?}", cell),
        other => panic!("expected fallback, got {:?}", other),
    }
    assert_ne!(chosen.direction, Direction::Left);
    assert_ne!(chosen.direction, Direction::Down);
}

#[test]
fn test_threatened_food_is_still_reached() {
    let config = Config::default_hardcoded();
    // the only food is adjacent to a longer opponent's head
    let b = board(
        vec![
            snake("me", 80, &[(2, 5), (1, 5)]),
            snake("big", 90, &[(5, 5), (6, 5), (7, 5), (8, 5)]),
        ],
        &[(4, 5)],
    );
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(6);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    // the head-threat cost makes the food expensive but it stays the only food
    assert_eq!(chosen.decision, Decision::Food(Coord { x: 4, y: 5 }));
    assert_eq!(chosen.direction, Direction::Right);
}

#[test]
fn test_large_target_is_not_hunted() {
    let config = Config::default_hardcoded();
    let b = board(
        vec![
            snake("me", 90, &[(5, 5), (5, 4)]),
            snake("big", 90, &[(5, 8), (5, 9), (6, 9)]),
        ],
        &[(0, 0)],
    );
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(7);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    assert_eq!(chosen.decision, Decision::Food(Coord { x: 0, y: 0 }));
}

#[test]
fn test_equal_cost_food_goes_to_first_discovered() {
    // both foods are two steps away; the upward branch is explored first
    let config = Config::default_hardcoded();
    let b = board(vec![snake("me", 80, &[(5, 5)])], &[(3, 5), (5, 7)]);
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(11);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    assert_eq!(chosen.decision, Decision::Food(Coord { x: 5, y: 7 }));
    assert_eq!(chosen.direction, Direction::Up);
}

#[test]
fn test_fallback_tie_goes_to_first_corner_by_column() {
    // every open cell is a tunnel, so three corners share the top price
    let config = Config::default_hardcoded();
    let b = Board {
        height: 3,
        width: 3,
        food: vec![],
        snakes: vec![snake("me", 80, &[(1, 1), (0, 0)])],
        hazards: vec![],
    };
    let you = b.snakes[0].clone();
    let mut rng = StdRng::seed_from_u64(12);

    let chosen = choose_move(&b, &you, &config, &mut rng);

    assert_eq!(chosen.decision, Decision::Fallback(Coord { x: 0, y: 2 }));
    assert_eq!(chosen.direction, Direction::Up);
}
