use std::time::Duration;

/// One armed timer. `deadline` is logical time since simulation start; `id`
/// breaks deadline ties in arm order.
#[derive(Debug, Clone, Copy)]
struct Timer {
    id: u64,
    deadline: Duration,
    car: u8,
}

/// Phase-completion timers for all cars, driven by a logical clock. Each car
/// arms at most one timer at a time (travel or door phase), but the queue
/// orders any number of them so cars never block each other.
///
/// There is no per-timer cancellation. Once a travel or door phase starts
/// it runs to completion; the only way to drop armed timers is `clear`,
/// which the simulation reset uses to discard everything atomically.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    armed: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Duration, after: Duration, car: u8) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.armed.push(Timer {
            id,
            deadline: now + after,
            car,
        });
        id
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed.iter().map(|timer| timer.deadline).min()
    }

    /// Removes and returns the earliest timer with deadline <= `now`, as
    /// (deadline, car). Callers schedule follow-up phases from the returned
    /// deadline rather than from `now`, so chained phases compose in exact
    /// logical time even when the clock is observed late.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, u8)> {
        let index = self
            .armed
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.id))
            .map(|(index, _)| index)?;
        let timer = self.armed.swap_remove(index);
        Some((timer.deadline, timer.car))
    }

    pub fn clear(&mut self) {
        self.armed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}
