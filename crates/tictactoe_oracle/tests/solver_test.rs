//! Tests comparing the pruned solver against the unpruned reference.

use tictactoe_oracle::solver::reference;
use tictactoe_oracle::{Board, Label, Player, Position, Solver, Strategy, enumerate, score};

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

#[test]
fn test_pruned_solver_matches_reference_everywhere() {
    let mut solver = Solver::new();
    for board in Strategy::MoveTree.legal_boards() {
        if tictactoe_oracle::classify(&board).is_terminal() {
            continue;
        }
        let side = board.side_to_move();
        let expected = reference::minimax(&board, side);
        assert_eq!(solver.solve(&board, side), expected, "{board}");
    }
}

#[test]
fn test_fresh_solver_matches_shared_solver() {
    let mut shared = Solver::new();
    let labeled = enumerate(Strategy::MoveTree, &mut shared);

    for state in labeled.iter().filter(|s| !s.is_terminal()).step_by(97) {
        let side = state.board.side_to_move();
        let cold = Solver::new().solve(&state.board, side);
        assert_eq!(cold, state.solved, "{}", state.board);
        assert_eq!(shared.solve(&state.board, side), state.solved);
    }
}

#[test]
fn test_label_distribution() {
    let states = enumerate(Strategy::MoveTree, &mut Solver::new());
    let count = |label, terminal: bool| {
        states
            .iter()
            .filter(|s| s.is_terminal() == terminal && Label::from_score(s.score()) == label)
            .count()
    };

    assert_eq!(count(Label::Win, false), 2_310);
    assert_eq!(count(Label::Lose, false), 1_158);
    assert_eq!(count(Label::Draw, false), 1_052);

    assert_eq!(count(Label::Win, true), 626);
    assert_eq!(count(Label::Lose, true), 316);
    assert_eq!(count(Label::Draw, true), 16);
}

#[test]
fn test_one_move_from_win_is_labeled_win() {
    // X to move; the center completes the middle column.
    let entry = Solver::new().solve(&board("bob xbx bob"), Player::X);
    assert_eq!(entry.score, score::X_WINS);
    assert_eq!(entry.best_move, Some(Position::Center));
}

#[test]
fn test_tie_break_prefers_lowest_index_over_immediate_win() {
    // O can win at once on 5, but 1 also forces a win and comes first.
    let b = board("xbx oob xbb");
    let entry = Solver::new().solve(&b, Player::O);
    assert_eq!(entry.score, score::O_WINS);
    assert_eq!(entry.best_move, Some(Position::TopCenter));
    assert_eq!(reference::minimax(&b, Player::O), entry);
}

#[test]
fn test_best_move_reaches_the_reported_value() {
    let mut solver = Solver::new();
    for state in enumerate(Strategy::MoveTree, &mut Solver::new()) {
        let Some(pos) = state.solved.best_move else {
            assert!(state.is_terminal());
            continue;
        };
        let side = state.board.side_to_move();
        assert!(state.board.is_empty(pos));

        let child = state.board.with_mark(pos, side);
        let value = match tictactoe_oracle::classify(&child).score() {
            Some(value) => value,
            None => solver.solve(&child, side.opponent()).score,
        };
        assert_eq!(value, state.score(), "{} -> {pos}", state.board);
    }
}
