/// Deferred work queue
///
/// Every delayed action in the gallery (follow-up batches, the shuffle
/// fade, the scroll debounce) goes through this queue instead of
/// re-entering the loader directly. The UI drains it on a timer tick.
///
/// The clock is injectable so tests can step time by hand.

use std::time::{Duration, Instant};

/// Source of "now" for the scheduler, as time elapsed since some origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Work the gallery can defer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Dispatch another batch, if the epoch is still current
    LoadNextBatch { epoch: u64 },
    /// End of the shuffle fade-out
    FinishShuffle { epoch: u64 },
    /// Debounced scroll: load more if near the bottom
    CheckProximity,
}

#[derive(Debug)]
struct Entry {
    due: Duration,
    seq: u64,
    job: Job,
}

#[derive(Debug)]
pub struct Scheduler<C: Clock = SystemClock> {
    clock: C,
    queue: Vec<Entry>,
    next_seq: u64,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            queue: Vec::new(),
            next_seq: 0,
        }
    }

    /// Run `job` once `delay` has elapsed
    pub fn schedule(&mut self, job: Job, delay: Duration) {
        let due = self.clock.now() + delay;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry { due, seq, job });
    }

    /// Like `schedule`, but drops any pending copy of the same job first,
    /// so a burst of calls only fires once after the last one
    pub fn schedule_debounced(&mut self, job: Job, delay: Duration) {
        self.queue.retain(|entry| entry.job != job);
        self.schedule(job, delay);
    }

    /// Pop every job whose deadline has passed, earliest first
    pub fn drain_due(&mut self) -> Vec<Job> {
        let now = self.clock.now();
        let (mut due, pending): (Vec<Entry>, Vec<Entry>) =
            self.queue.drain(..).partition(|entry| entry.due <= now);
        self.queue = pending;

        due.sort_by_key(|entry| (entry.due, entry.seq));
        due.into_iter().map(|entry| entry.job).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Hand-driven clock for deterministic tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_jobs_wait_for_deadline() {
        let clock = ManualClock::default();
        let mut scheduler = Scheduler::new(clock.clone());

        scheduler.schedule(Job::LoadNextBatch { epoch: 0 }, ms(300));
        assert!(scheduler.drain_due().is_empty());

        clock.advance(ms(299));
        assert!(scheduler.drain_due().is_empty());

        clock.advance(ms(1));
        assert_eq!(scheduler.drain_due(), vec![Job::LoadNextBatch { epoch: 0 }]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_drain_order() {
        let clock = ManualClock::default();
        let mut scheduler = Scheduler::new(clock.clone());

        scheduler.schedule(Job::FinishShuffle { epoch: 1 }, ms(300));
        scheduler.schedule(Job::CheckProximity, ms(100));
        scheduler.schedule(Job::LoadNextBatch { epoch: 1 }, ms(300));

        clock.advance(ms(500));
        assert_eq!(
            scheduler.drain_due(),
            vec![
                Job::CheckProximity,
                Job::FinishShuffle { epoch: 1 },
                Job::LoadNextBatch { epoch: 1 },
            ]
        );
    }

    #[test]
    fn test_debounce_keeps_last() {
        let clock = ManualClock::default();
        let mut scheduler = Scheduler::new(clock.clone());

        scheduler.schedule_debounced(Job::CheckProximity, ms(100));
        clock.advance(ms(60));
        scheduler.schedule_debounced(Job::CheckProximity, ms(100));
        assert_eq!(scheduler.pending(), 1);

        clock.advance(ms(60));
        assert!(scheduler.drain_due().is_empty());

        clock.advance(ms(40));
        assert_eq!(scheduler.drain_due(), vec![Job::CheckProximity]);
    }

    #[test]
    fn test_debounce_leaves_other_jobs() {
        let clock = ManualClock::default();
        let mut scheduler = Scheduler::new(clock);

        scheduler.schedule(Job::LoadNextBatch { epoch: 0 }, ms(300));
        scheduler.schedule_debounced(Job::CheckProximity, ms(100));
        scheduler.schedule_debounced(Job::CheckProximity, ms(100));
        assert_eq!(scheduler.pending(), 2);
    }
}
