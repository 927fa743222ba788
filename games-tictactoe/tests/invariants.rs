use engine_core::{Coordinate, Game, Input, Phase};
use games_tictactoe::{Mark, Outcome, Player, TicTacToe};
use proptest::prelude::*;

fn arb_cell() -> impl Strategy<Value = Coordinate> {
    (0i32..3, 0i32..3).prop_map(|(x, y)| Coordinate::new(x, y))
}

proptest! {
    #[test]
    fn occupied_cell_is_never_overwritten(moves in proptest::collection::vec(arb_cell(), 1..30)) {
        let mut game = TicTacToe::default();

        for at in moves {
            let occupied = game.cells().get(at) != Some(&Mark::Empty);
            let before = game.snapshot();

            game.play(at);

            if occupied || before.winner.is_some() {
                prop_assert_eq!(game.snapshot(), before);
            }
        }
    }

    #[test]
    fn scoreboard_counts_each_round_once(moves in proptest::collection::vec(arb_cell(), 1..60)) {
        let mut game = TicTacToe::default();
        let mut rounds = 0;

        for at in moves {
            game.play(at);
            if game.phase() == Phase::Finished {
                rounds += 1;
                game.reset();
            }
        }

        let board = game.scoreboard();
        prop_assert_eq!(board.o + board.x + board.draw, rounds);
    }

    #[test]
    fn players_alternate_until_decided(moves in proptest::collection::vec(arb_cell(), 1..20)) {
        let mut game = TicTacToe::default();

        for at in moves {
            let player = game.current_player();
            let accepted = game.cells().get(at) == Some(&Mark::Empty) && game.winner().is_none();

            game.play(at);

            if accepted {
                prop_assert_eq!(game.cells().get(at), Some(&Mark::Player(player)));
                match game.winner() {
                    None => prop_assert_eq!(game.current_player(), player.other()),
                    Some(_) => prop_assert_eq!(game.current_player(), player),
                }
            }
        }
    }
}

#[test]
fn column_win_for_o() {
    let mut game = TicTacToe::default();
    for (x, y) in [(0, 0), (1, 1), (0, 1), (1, 2), (0, 2)] {
        game.apply(games_tictactoe::Action::Play(Coordinate::new(x, y)));
    }

    assert_eq!(game.winner(), Some(Outcome::Won(Player::O)));
    assert_eq!(game.phase(), Phase::Finished);
}

#[test]
fn full_board_without_line_is_draw() {
    let mut game = TicTacToe::default();
    for (x, y) in [(0, 0), (1, 0), (2, 0), (1, 1), (0, 1), (2, 1), (1, 2), (0, 2), (2, 2)] {
        game.play(Coordinate::new(x, y));
    }

    assert_eq!(game.winner(), Some(Outcome::Draw));
    assert_eq!(game.scoreboard().draw, 1);
}

#[test]
fn restart_input_clears_board() {
    let mut game = TicTacToe::default();
    game.play(Coordinate::new(1, 1));

    let action = game.translate(Input::Restart).unwrap();
    game.apply(action);

    assert_eq!(game.legal_moves().len(), 9);
}
