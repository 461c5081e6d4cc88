//! Frame loop state and pacing
//!
//! The game advances exactly one simulation tick per rendered frame, so the
//! clock only decides *when* the next frame is due.

use std::time::{Duration, Instant};

/// Top-level loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Stopped,
}

impl LoopState {
    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}

/// Fixed-rate frame deadlines
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    next: Option<Instant>,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / target_fps.max(1),
            next: None,
        }
    }

    /// Length of one frame
    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Deadline of the next frame; `None` until the first frame
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }

    /// True once `now` has reached the next deadline
    pub fn is_due(&self, now: Instant) -> bool {
        self.next.is_none_or(|next| now >= next)
    }

    /// Mark a frame as started at `now` and schedule the next one.
    ///
    /// Deadlines advance by whole frames. If the loop fell more than a frame
    /// behind (window drag, breakpoint) it resyncs instead of bursting.
    pub fn start_frame(&mut self, now: Instant) -> Instant {
        let next = match self.next {
            Some(prev) if now.saturating_duration_since(prev) < self.frame => prev + self.frame,
            _ => now + self.frame,
        };
        self.next = Some(next);
        next
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(crate::consts::TARGET_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_due_immediately() {
        let clock = FrameClock::new(60);
        assert!(clock.is_due(Instant::now()));
        assert!(clock.next_deadline().is_none());
    }

    #[test]
    fn test_deadlines_advance_by_one_frame() {
        let mut clock = FrameClock::new(50);
        let t0 = Instant::now();
        let d1 = clock.start_frame(t0);
        assert_eq!(d1, t0 + Duration::from_millis(20));
        assert!(!clock.is_due(t0 + Duration::from_millis(19)));
        assert!(clock.is_due(d1));

        // Started slightly late: schedule stays on the grid
        let d2 = clock.start_frame(d1 + Duration::from_millis(3));
        assert_eq!(d2, t0 + Duration::from_millis(40));
    }

    #[test]
    fn test_resync_after_stall() {
        let mut clock = FrameClock::new(50);
        let t0 = Instant::now();
        clock.start_frame(t0);
        let late = t0 + Duration::from_secs(2);
        assert_eq!(clock.start_frame(late), late + Duration::from_millis(20));
    }

    #[test]
    fn test_zero_fps_does_not_divide_by_zero() {
        assert_eq!(FrameClock::new(0).frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_loop_state() {
        assert!(LoopState::default().is_running());
        assert!(!LoopState::Stopped.is_running());
    }
}
