//! Clock service driving real-time engines.
//!
//! An engine subscribes for a periodic tick with [`Clock::schedule`] and drops
//! the subscription with [`Clock::cancel`]. Whoever owns the clock delivers a
//! fired [`Subscription`] back to the engine, which ignores handles it no longer
//! holds. That keeps a cancelled subscription from ever producing a tick.

use std::collections::HashMap;
use std::future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Handle for one periodic subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Periodic callback scheduling
pub trait Clock {
    /// Start a periodic subscription firing every `period`
    fn schedule(&mut self, period: Duration) -> Subscription;

    /// Stop a subscription. Cancelling an unknown handle is a no-op.
    fn cancel(&mut self, subscription: Subscription);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn schedule(&mut self, period: Duration) -> Subscription {
        (**self).schedule(period)
    }

    fn cancel(&mut self, subscription: Subscription) {
        (**self).cancel(subscription)
    }
}

/// A schedule or cancel call observed by [`ManualClock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCall {
    Schedule(Subscription, Duration),
    Cancel(Subscription),
}

/// Clock that never advances on its own.
///
/// Tests drive the engine by handing [`ManualClock::active`] subscriptions to
/// it directly and inspect [`ManualClock::calls`] to check cadence changes.
#[derive(Debug, Default)]
pub struct ManualClock {
    next_id: u64,
    active: HashMap<Subscription, Duration>,
    calls: Vec<ClockCall>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single live subscription, if exactly one exists
    pub fn active(&self) -> Option<(Subscription, Duration)> {
        if self.active.len() != 1 {
            return None;
        }
        self.active.iter().next().map(|(sub, period)| (*sub, *period))
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, subscription: Subscription) -> bool {
        self.active.contains_key(&subscription)
    }

    pub fn calls(&self) -> &[ClockCall] {
        &self.calls
    }
}

impl Clock for ManualClock {
    fn schedule(&mut self, period: Duration) -> Subscription {
        self.next_id += 1;
        let subscription = Subscription(self.next_id);
        self.active.insert(subscription, period);
        self.calls.push(ClockCall::Schedule(subscription, period));
        subscription
    }

    fn cancel(&mut self, subscription: Subscription) {
        self.active.remove(&subscription);
        self.calls.push(ClockCall::Cancel(subscription));
    }
}

/// Real-time clock backed by a tokio interval.
///
/// Holds at most one subscription; scheduling replaces whatever was running.
/// The first tick fires one full period after scheduling.
#[derive(Debug, Default)]
pub struct TokioClock {
    next_id: u64,
    current: Option<(Subscription, Interval)>,
}

impl TokioClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period of the live subscription
    pub fn period(&self) -> Option<Duration> {
        self.current.as_ref().map(|(_, timer)| timer.period())
    }

    /// Wait for the next tick of the live subscription.
    ///
    /// Pends forever while nothing is scheduled, which makes it safe to use as
    /// a `tokio::select!` branch.
    pub async fn fired(&mut self) -> Subscription {
        match self.current.as_mut() {
            Some((subscription, timer)) => {
                timer.tick().await;
                *subscription
            }
            None => future::pending().await,
        }
    }
}

impl Clock for TokioClock {
    fn schedule(&mut self, period: Duration) -> Subscription {
        self.next_id += 1;
        let subscription = Subscription(self.next_id);
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.current = Some((subscription, timer));
        subscription
    }

    fn cancel(&mut self, subscription: Subscription) {
        if matches!(self.current, Some((current, _)) if current == subscription) {
            self.current = None;
        }
    }
}
