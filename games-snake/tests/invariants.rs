//! Property tests over random seeds and random turn sequences

use engine_core::Game;
use games_snake::{Direction, Snake, SnakeConfig, Status};
use proptest::prelude::*;

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn small_board() -> SnakeConfig {
    SnakeConfig { width: 6, height: 5, ..SnakeConfig::default() }
}

proptest! {
    #[test]
    fn food_never_overlaps_body(
        seed in any::<u64>(),
        turns in proptest::collection::vec(proptest::option::of(arb_direction()), 1..200),
    ) {
        let mut snake = Snake::new(small_board(), seed).unwrap();

        for turn in turns {
            if let Some(direction) = turn {
                snake.set_direction(direction);
            }
            snake.tick();

            if let Some(food) = snake.food() {
                prop_assert!(snake.body().all(|cell| *cell != food));
            }
            if snake.status() != Status::Running {
                break;
            }
        }
    }

    #[test]
    fn length_grows_only_when_eating(
        seed in any::<u64>(),
        turns in proptest::collection::vec(arb_direction(), 1..200),
    ) {
        let mut snake = Snake::new(small_board(), seed).unwrap();

        for direction in turns {
            snake.set_direction(direction);
            let before_len = snake.len();
            let before_score = snake.score();
            let food = snake.food();

            snake.tick();
            if snake.status() == Status::GameOver {
                prop_assert_eq!(snake.len(), before_len);
                break;
            }

            if Some(snake.head()) == food {
                prop_assert_eq!(snake.len(), before_len + 1);
                prop_assert_eq!(snake.score(), before_score + 10);
            } else {
                prop_assert_eq!(snake.len(), before_len);
                prop_assert_eq!(snake.score(), before_score);
            }
            if snake.status() == Status::Won {
                break;
            }
        }
    }

    #[test]
    fn reversing_never_changes_direction(
        seed in any::<u64>(),
        turns in proptest::collection::vec(arb_direction(), 1..50),
    ) {
        let mut snake = Snake::new(small_board(), seed).unwrap();

        for direction in turns {
            snake.set_direction(direction);
            let current = snake.direction();
            snake.set_direction(current.opposite());
            prop_assert_eq!(snake.direction(), current);
            snake.tick();
        }
    }

    #[test]
    fn body_cells_stay_distinct_and_on_board(
        seed in any::<u64>(),
        turns in proptest::collection::vec(arb_direction(), 1..200),
    ) {
        let mut snake = Snake::new(small_board(), seed).unwrap();

        for direction in turns {
            snake.set_direction(direction);
            snake.tick();

            let cells: Vec<_> = snake.body().copied().collect();
            let mut unique = cells.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), cells.len());
            prop_assert!(cells.iter().all(|c| (0..6).contains(&c.x) && (0..5).contains(&c.y)));
        }
    }
}

#[test]
fn scenario_head_moves_onto_food() {
    use engine_core::Coordinate;

    let config = SnakeConfig {
        width: 5,
        height: 1,
        initial_body: vec![Coordinate::new(0, 0), Coordinate::new(1, 0), Coordinate::new(2, 0)],
        initial_direction: Direction::Right,
        ..SnakeConfig::default()
    };

    // Only (3, 0) and (4, 0) are free; find a seed that puts the food on (3, 0)
    let mut snake = (0..64)
        .map(|seed| Snake::new(config.clone(), seed).unwrap())
        .find(|snake| snake.food() == Some(Coordinate::new(3, 0)))
        .expect("some seed places food next to the head");

    snake.tick();

    let body: Vec<_> = snake.body().copied().collect();
    assert_eq!(
        body,
        vec![Coordinate::new(0, 0), Coordinate::new(1, 0), Coordinate::new(2, 0), Coordinate::new(3, 0)]
    );
    assert_eq!(snake.score(), 10);
}
