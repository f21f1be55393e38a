use std::time::Duration;

use tracing::{debug, trace};

use super::{
    config::SnakeConfig,
    direction::Direction,
    state::{CollisionType, Position, SnakeState},
};
use crate::clock::{Clock, Subscription};
use crate::config::ConfigError;
use crate::random::RandomSource;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, or the tick came from a cancelled subscription
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake ate and grew
    Ate { score: u32 },
    /// The round ended and the state went back to its initial values
    Crashed {
        kind: CollisionType,
        final_score: u32,
    },
}

/// Real-time snake simulation advanced by a clock
pub struct SnakeEngine<R, C: Clock> {
    config: SnakeConfig,
    rng: R,
    clock: C,
    subscription: Option<Subscription>,
    state: SnakeState,
}

impl<R: RandomSource, C: Clock> SnakeEngine<R, C> {
    /// Create a stopped engine in its initial state
    pub fn new(config: SnakeConfig, mut rng: R, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = initial_state(&config, &mut rng);

        Ok(Self {
            config,
            rng,
            clock,
            subscription: None,
            state,
        })
    }

    /// Buffer a direction for the next tick, ignoring exact reversals
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.direction.is_opposite(direction) {
            trace!(?direction, "ignoring reversal");
            return;
        }
        self.state.pending_direction = direction;
    }

    /// Pause or resume. Resuming subscribes at the current tick interval.
    pub fn toggle_running(&mut self) {
        self.state.running = !self.state.running;
        if self.state.running {
            self.subscribe();
        } else {
            self.unsubscribe();
        }
        debug!(running = self.state.running, "snake toggled");
    }

    /// Deliver a clock tick. Ticks from a subscription the engine no longer
    /// holds are dropped.
    pub fn on_clock(&mut self, subscription: Subscription) -> TickOutcome {
        if self.subscription != Some(subscription) {
            trace!(id = subscription.id(), "dropping stale tick");
            return TickOutcome::Idle;
        }
        self.tick()
    }

    /// Advance the simulation by one cell
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Idle;
        }

        self.state.direction = self.state.pending_direction;
        let new_head = self.state.head().moved_in_direction(self.state.direction);
        trace!(x = new_head.x, y = new_head.y, "tick");

        if !self.state.is_in_bounds(new_head) {
            return self.crash(CollisionType::Wall);
        }
        if self.state.is_occupied_by_snake(new_head) {
            return self.crash(CollisionType::SelfCollision);
        }

        self.state.body.insert(0, new_head);

        if new_head != self.state.food {
            self.state.body.pop();
            return TickOutcome::Moved;
        }

        self.state.score += 1;
        debug!(score = self.state.score, len = self.state.len(), "snake ate");

        let Some(food) = place_food(&mut self.rng, self.config.grid_size, &self.state.body) else {
            return self.crash(CollisionType::BoardFull);
        };
        self.state.food = food;
        self.speed_up();

        TickOutcome::Ate {
            score: self.state.score,
        }
    }

    /// Back to the initial state, stopped
    pub fn reset(&mut self) {
        self.unsubscribe();
        self.state = initial_state(&self.config, &mut self.rng);
    }

    fn crash(&mut self, kind: CollisionType) -> TickOutcome {
        let final_score = self.state.score;
        debug!(?kind, final_score, "snake crashed");
        self.reset();
        TickOutcome::Crashed { kind, final_score }
    }

    fn speed_up(&mut self) {
        let interval = self.config.sped_up(self.state.tick_interval_ms);
        if interval == self.state.tick_interval_ms {
            return;
        }

        debug!(from = self.state.tick_interval_ms, to = interval, "snake speeding up");
        self.state.tick_interval_ms = interval;
        if self.state.running {
            self.unsubscribe();
            self.subscribe();
        }
    }

    fn subscribe(&mut self) {
        self.unsubscribe();
        let period = Duration::from_millis(self.state.tick_interval_ms);
        self.subscription = Some(self.clock.schedule(period));
    }

    fn unsubscribe(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.clock.cancel(subscription);
        }
    }
}

impl<R, C: Clock> SnakeEngine<R, C> {
    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    /// Owned copy of the current state for rendering
    pub fn snapshot(&self) -> SnakeState {
        self.state.clone()
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Live clock subscription, present exactly while running
    pub fn subscription(&self) -> Option<Subscription> {
        self.subscription
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

impl<R, C: Clock> Drop for SnakeEngine<R, C> {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.clock.cancel(subscription);
        }
    }
}

fn initial_state<R: RandomSource>(config: &SnakeConfig, rng: &mut R) -> SnakeState {
    let body = vec![config.spawn];
    let food = place_food(rng, config.grid_size, &body)
        .expect("validated grid has free cells around the spawn");

    SnakeState {
        body,
        direction: config.initial_direction,
        pending_direction: config.initial_direction,
        food,
        score: 0,
        tick_interval_ms: config.initial_tick_interval_ms,
        running: false,
        grid_size: config.grid_size,
    }
}

/// Pick a free cell uniformly at random.
///
/// Rejection-samples the whole grid first; after `4 * grid_size^2` misses it
/// enumerates the free cells and draws one of those. `None` when the body
/// covers the grid.
pub fn place_food<R: RandomSource>(
    rng: &mut R,
    grid_size: usize,
    body: &[Position],
) -> Option<Position> {
    let cells = grid_size * grid_size;
    if body.len() >= cells {
        return None;
    }

    for _ in 0..cells * 4 {
        let x = rng.below(grid_size) as i32;
        let y = rng.below(grid_size) as i32;
        let pos = Position::new(x, y);

        if !body.contains(&pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = (0..grid_size as i32)
        .flat_map(|y| (0..grid_size as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| !body.contains(pos))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.below(free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ClockCall, ManualClock};
    use crate::random::ScriptedRandom;

    type TestEngine = SnakeEngine<ScriptedRandom, ManualClock>;

    /// Engine whose food draws come from `draws` as (x, y) pairs
    fn engine_with_draws(draws: &[usize]) -> TestEngine {
        SnakeEngine::new(
            SnakeConfig::default(),
            ScriptedRandom::new(draws.iter().copied()),
            ManualClock::new(),
        )
        .unwrap()
    }

    /// Fire the active subscription once
    fn fire(engine: &mut TestEngine) -> TickOutcome {
        let (subscription, _) = engine.clock().active().expect("engine should be subscribed");
        engine.on_clock(subscription)
    }

    #[test]
    fn test_initial_state() {
        let engine = engine_with_draws(&[0, 0]);
        let state = engine.state();

        assert_eq!(state.body, vec![Position::new(4, 4)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.food, Position::new(0, 0));
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_interval_ms, 140);
        assert!(!state.running);
        assert_eq!(engine.clock().active_count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = SnakeEngine::new(
            SnakeConfig::new(0),
            ScriptedRandom::new([0]),
            ManualClock::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tick_ignored_while_stopped() {
        let mut engine = engine_with_draws(&[0, 0]);
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.state().head(), Position::new(4, 4));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine_with_draws(&[0, 0]);
        engine.toggle_running();

        assert_eq!(fire(&mut engine), TickOutcome::Moved);
        assert_eq!(engine.state().body, vec![Position::new(5, 4)]);
    }

    #[test]
    fn test_food_consumption() {
        // First food lands right in front of the snake, the next one in a corner
        let mut engine = engine_with_draws(&[5, 4, 0, 0]);
        engine.toggle_running();
        let (first, _) = engine.clock().active().unwrap();

        assert_eq!(fire(&mut engine), TickOutcome::Ate { score: 1 });

        let state = engine.state();
        assert_eq!(state.score, 1);
        assert_eq!(state.body, vec![Position::new(5, 4), Position::new(4, 4)]);
        assert_eq!(state.food, Position::new(0, 0));
        assert_eq!(state.tick_interval_ms, 135);

        // Cadence change re-subscribes at the new interval
        let (second, period) = engine.clock().active().unwrap();
        assert_ne!(first, second);
        assert_eq!(period, Duration::from_millis(135));
        assert!(!engine.clock().is_active(first));
    }

    #[test]
    fn test_wall_collision_resets() {
        let mut engine = engine_with_draws(&[0, 0]);
        engine.toggle_running();

        // (4,4) -> (15,4) is eleven moves, the twelfth leaves the grid
        for _ in 0..11 {
            assert_eq!(fire(&mut engine), TickOutcome::Moved);
        }
        assert_eq!(engine.state().head(), Position::new(15, 4));

        let outcome = fire(&mut engine);
        assert_eq!(
            outcome,
            TickOutcome::Crashed {
                kind: CollisionType::Wall,
                final_score: 0
            }
        );

        let state = engine.state();
        assert_eq!(state.body, vec![Position::new(4, 4)]);
        assert_eq!(state.direction, Direction::Right);
        assert!(!state.running);
        assert_eq!(engine.subscription(), None);
        assert_eq!(engine.clock().active_count(), 0);
    }

    #[test]
    fn test_self_collision_resets_score() {
        // Food along row 4 four times, then parked in the corner
        let mut engine = engine_with_draws(&[5, 4, 6, 4, 7, 4, 8, 4, 0, 0]);
        engine.toggle_running();
        for _ in 0..4 {
            assert!(matches!(fire(&mut engine), TickOutcome::Ate { .. }));
        }
        assert_eq!(engine.state().len(), 5);
        assert_eq!(engine.state().tick_interval_ms, 120);

        engine.set_direction(Direction::Down);
        fire(&mut engine);
        engine.set_direction(Direction::Left);
        fire(&mut engine);
        engine.set_direction(Direction::Up);
        let outcome = fire(&mut engine);

        assert_eq!(
            outcome,
            TickOutcome::Crashed {
                kind: CollisionType::SelfCollision,
                final_score: 4
            }
        );
        let state = engine.state();
        assert_eq!(state.body, vec![Position::new(4, 4)]);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_interval_ms, 140);
        assert!(!state.running);
    }

    #[test]
    fn test_reversal_ignored() {
        let mut engine = engine_with_draws(&[0, 0]);
        engine.set_direction(Direction::Left);
        assert_eq!(engine.state().pending_direction, Direction::Right);

        engine.set_direction(Direction::Up);
        assert_eq!(engine.state().pending_direction, Direction::Up);
    }

    #[test]
    fn test_one_buffered_change_per_tick() {
        let mut engine = engine_with_draws(&[0, 0]);
        engine.toggle_running();

        // Up then Left between ticks: Left reverses the committed Right, so Up stays
        engine.set_direction(Direction::Up);
        engine.set_direction(Direction::Left);
        fire(&mut engine);

        assert_eq!(engine.state().direction, Direction::Up);
        assert_eq!(engine.state().head(), Position::new(4, 3));
    }

    #[test]
    fn test_pause_cancels_and_resume_uses_current_interval() {
        let mut engine = engine_with_draws(&[5, 4, 0, 0]);
        engine.toggle_running();
        fire(&mut engine);
        let (live, _) = engine.clock().active().unwrap();

        engine.toggle_running();
        assert_eq!(engine.clock().active_count(), 0);
        // A tick racing the pause is dropped
        assert_eq!(engine.on_clock(live), TickOutcome::Idle);
        assert_eq!(engine.state().head(), Position::new(5, 4));

        engine.toggle_running();
        let (_, period) = engine.clock().active().unwrap();
        assert_eq!(period, Duration::from_millis(135));
    }

    #[test]
    fn test_reset_stops_clock() {
        let mut engine = engine_with_draws(&[5, 4, 0, 0]);
        engine.toggle_running();
        fire(&mut engine);

        engine.reset();

        let state = engine.state();
        assert_eq!(state.body, vec![Position::new(4, 4)]);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_interval_ms, 140);
        assert!(!state.running);
        assert!(matches!(
            engine.clock().calls().last(),
            Some(ClockCall::Cancel(_))
        ));
    }

    #[test]
    fn test_interval_floor() {
        let config = SnakeConfig {
            initial_tick_interval_ms: 80,
            min_tick_interval_ms: 70,
            ..Default::default()
        };
        // Food keeps appearing right ahead along row 4
        let mut engine = SnakeEngine::new(
            config,
            ScriptedRandom::new([5, 4, 6, 4, 7, 4, 8, 4, 0, 0]),
            ManualClock::new(),
        )
        .unwrap();
        engine.toggle_running();

        let mut last = engine.state().tick_interval_ms;
        for _ in 0..4 {
            fire(&mut engine);
            let interval = engine.state().tick_interval_ms;
            assert!(interval <= last);
            assert!(interval >= 70);
            last = interval;
        }
        assert_eq!(last, 70);
    }

    #[test]
    fn test_place_food_falls_back_to_enumeration() {
        // Every rejection draw lands on (0,0), which is occupied
        let mut rng = ScriptedRandom::new([0]);
        let body = vec![Position::new(0, 0)];
        let food = place_food(&mut rng, 2, &body).unwrap();

        assert_ne!(food, Position::new(0, 0));
        assert_eq!(rng.draws(), 2 * 16 + 1);
    }

    #[test]
    fn test_place_food_full_board() {
        let mut rng = ScriptedRandom::new([0]);
        let body = vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ];
        assert_eq!(place_food(&mut rng, 2, &body), None);
    }

    #[test]
    fn test_board_full_ends_round() {
        // 2x2 grid: spawn (0,0), food at (1,0), (1,1), (0,1) in turn
        let config = SnakeConfig {
            grid_size: 2,
            spawn: Position::new(0, 0),
            ..Default::default()
        };
        let mut engine = SnakeEngine::new(
            config,
            ScriptedRandom::new([1, 0, 1, 1, 0, 1]),
            ManualClock::new(),
        )
        .unwrap();
        engine.toggle_running();

        assert_eq!(fire(&mut engine), TickOutcome::Ate { score: 1 });
        engine.set_direction(Direction::Down);
        assert_eq!(fire(&mut engine), TickOutcome::Ate { score: 2 });
        engine.set_direction(Direction::Left);
        assert_eq!(
            fire(&mut engine),
            TickOutcome::Crashed {
                kind: CollisionType::BoardFull,
                final_score: 3
            }
        );
        assert_eq!(engine.state().body, vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let mut clock = ManualClock::new();
        {
            let mut engine =
                SnakeEngine::new(SnakeConfig::default(), ScriptedRandom::new([0]), &mut clock)
                    .unwrap();
            engine.toggle_running();
            assert!(engine.subscription().is_some());
        }
        assert_eq!(clock.active_count(), 0);
    }
}
