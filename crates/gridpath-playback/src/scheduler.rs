use std::time::Duration;

/// Where a playback suspends between ticks.
///
/// The playback itself never sleeps; it hands the delay to a scheduler. A
/// timer-driven UI can ignore this trait and call
/// [`Playback::tick`](crate::Playback::tick) from its own event loop instead.
pub trait Scheduler {
    fn sleep(&mut self, delay: Duration);
}

/// Blocks the current thread for each delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

impl<F: FnMut(Duration)> Scheduler for F {
    fn sleep(&mut self, delay: Duration) {
        self(delay)
    }
}
