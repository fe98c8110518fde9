//! Elapsed-time accumulator used by time-guarded transitions.

/// Accumulates elapsed time until a fixed duration is reached.
///
/// Completion is monotone: once `elapsed >= duration` the timer stays
/// complete until [`Timer::reset`] is called, even if further updates
/// would not be needed to reach the threshold again.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Timer;
///
/// let mut timer = Timer::new(0.5);
/// timer.update(0.25);
/// assert!(!timer.is_complete());
///
/// timer.update(0.25);
/// assert!(timer.is_complete());
///
/// timer.reset();
/// assert!(!timer.is_complete());
/// assert_eq!(timer.elapsed(), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Timer {
    duration: f32,
    elapsed: f32,
    complete: bool,
}

impl Timer {
    /// Create a timer that completes after `duration` seconds of updates.
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            complete: false,
        }
    }

    /// Advance the timer by `delta_time`.
    pub fn update(&mut self, delta_time: f32) {
        self.elapsed += delta_time;

        if self.elapsed >= self.duration {
            self.complete = true;
        }
    }

    /// Zero the elapsed time and clear the completion flag.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.complete = false;
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}
