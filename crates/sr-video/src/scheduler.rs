use crate::Scheduler;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

/// Ticks at a fixed rate. Ticks missed while a cycle runs long are dropped,
/// not queued.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Interval,
}

impl IntervalScheduler {
    /// A zero `period` is raised to one nanosecond.
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period.max(Duration::from_nanos(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    /// Tick `fps` times per second; 0 is treated as 1. The period never
    /// drops below one nanosecond.
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_nanos(1_000_000_000 / fps.max(1) as u64))
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl Scheduler for IntervalScheduler {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    async fn tick(&mut self) {}
}
