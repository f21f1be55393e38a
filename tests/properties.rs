use std::collections::HashSet;

use mini_arcade::clock::ManualClock;
use mini_arcade::rps::{Choice, Outcome, resolve};
use mini_arcade::snake::{Direction, SnakeConfig, SnakeEngine, TickOutcome};
use mini_arcade::tictactoe::{Cell, LINES, Mark, TicTacToeEngine, TicTacToeState};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn line_owner(state: &TicTacToeState) -> Option<Mark> {
    LINES.iter().find_map(|&[a, b, c]| {
        let board = state.board();
        match (board[a], board[b], board[c]) {
            (Cell::Filled(x), Cell::Filled(y), Cell::Filled(z)) if x == y && y == z => Some(x),
            _ => None,
        }
    })
}

fn choice() -> impl Strategy<Value = Choice> {
    prop_oneof![Just(Choice::Rock), Just(Choice::Paper), Just(Choice::Scissors)]
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

proptest! {
    #[test]
    fn tictactoe_winner_iff_line_complete(moves in prop::collection::vec(0usize..12, 0..20)) {
        let mut engine = TicTacToeEngine::new();
        for index in moves {
            let before = engine.snapshot();
            let accepted = engine.apply_move(index);

            if before.winner().is_some() {
                // Board is frozen once decided
                prop_assert!(!accepted);
                prop_assert_eq!(engine.snapshot(), before);
            }
            let state = engine.snapshot();
            prop_assert_eq!(state.winner(), line_owner(&state));
        }

        engine.reset();
        prop_assert_eq!(engine.snapshot(), TicTacToeState::new());
        prop_assert_eq!(engine.snapshot().next_player(), Mark::X);
    }

    #[test]
    fn rps_draw_iff_equal_and_antisymmetric(a in choice(), b in choice()) {
        let forward = resolve(a, b);
        let backward = resolve(b, a);

        prop_assert_eq!(forward == Outcome::Draw, a == b);
        match forward {
            Outcome::Win => prop_assert_eq!(backward, Outcome::Lose),
            Outcome::Lose => prop_assert_eq!(backward, Outcome::Win),
            Outcome::Draw => prop_assert_eq!(backward, Outcome::Draw),
        }
    }

    #[test]
    fn snake_invariants_hold(
        seed in any::<u64>(),
        steps in prop::collection::vec(prop::option::of(direction()), 1..300),
    ) {
        let config = SnakeConfig::new(6);
        let floor = config.min_tick_interval_ms;
        let spawn = config.spawn;
        let mut engine =
            SnakeEngine::new(config, StdRng::seed_from_u64(seed), ManualClock::new()).unwrap();
        engine.toggle_running();

        let mut eaten = 0usize;
        let mut last_interval = engine.state().tick_interval_ms;

        for step in steps {
            if !engine.state().running {
                engine.toggle_running();
                last_interval = engine.state().tick_interval_ms;
            }
            if let Some(direction) = step {
                engine.set_direction(direction);
            }
            let pending = engine.state().pending_direction;
            prop_assert!(!engine.state().direction.is_opposite(pending));

            let (subscription, _) = engine.clock().active().unwrap();
            match engine.on_clock(subscription) {
                TickOutcome::Ate { .. } => eaten += 1,
                TickOutcome::Crashed { .. } => {
                    let state = engine.state();
                    prop_assert!(!state.running);
                    prop_assert_eq!(&state.body, &vec![spawn]);
                    prop_assert_eq!(engine.clock().active_count(), 0);
                    eaten = 0;
                    last_interval = state.tick_interval_ms;
                    continue;
                }
                TickOutcome::Moved | TickOutcome::Idle => {}
            }

            let state = engine.state();
            prop_assert_eq!(state.len(), 1 + eaten);
            prop_assert!(!state.body.contains(&state.food));
            prop_assert!(state.body.iter().all(|pos| state.is_in_bounds(*pos)));
            let distinct: HashSet<_> = state.body.iter().collect();
            prop_assert_eq!(distinct.len(), state.len());

            prop_assert!(state.tick_interval_ms <= last_interval);
            prop_assert!(state.tick_interval_ms >= floor);
            last_interval = state.tick_interval_ms;
        }
    }
}
