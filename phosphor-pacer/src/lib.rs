//! Frame pacing for fixed-rate render loops
//!
//! [`FramePacer`] decides when the host loop may start drawing the next
//! frame and tracks how long frames actually take. Time is injected: the
//! caller reads its own millisecond clock and passes the value to
//! [`FramePacer::poll`], so the crate has no clock dependency and tests run
//! with synthetic timelines.
//!
//! The schedule is drift-free under light load (each eligibility time lies
//! exactly one frame period after the previous one, even when the host polls
//! a little late) and clamps after overruns: a schedule that has fallen more
//! than a period behind restarts from "now" instead of letting the backlog
//! be repaid by a burst of fast frames.
//!
//! ```
//! use phosphor_pacer::{FramePacer, FramePoll};
//!
//! let mut pacer = FramePacer::with_rate(50); // 20 ms period
//! assert_eq!(pacer.poll(0), FramePoll::Due);
//! assert_eq!(pacer.poll(5), FramePoll::NotDue { idle: true });
//! assert_eq!(pacer.poll(20), FramePoll::Due);
//! ```

#![no_std]
#![deny(unsafe_code)]

/// Frame rate used by [`FramePacer::new`]
pub const DEFAULT_FRAME_RATE: u8 = 60;

/// Result of one scheduling poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramePoll {
    /// The next frame may start drawing now
    Due,
    /// Not yet time for the next frame
    NotDue {
        /// True when more than one millisecond of slack remains; the host
        /// may sleep or yield to other subsystems until its next tick
        idle: bool,
    },
}

/// Fixed-rate frame scheduler
///
/// Drive it from the top of the render loop:
///
/// ```
/// use phosphor_pacer::{FramePacer, FramePoll};
///
/// let mut pacer = FramePacer::new();
/// let mut now_ms = 0u32;
/// for _ in 0..3 {
///     match pacer.poll(now_ms) {
///         FramePoll::Due => { /* clear, draw, present */ }
///         FramePoll::NotDue { idle: true } => { /* sleep until the next tick */ }
///         FramePoll::NotDue { idle: false } => { /* spin */ }
///     }
///     now_ms += 1;
/// }
/// ```
///
/// Frame bookkeeping (duration, counter) for a frame is recorded on the
/// first poll after it: the interval from one `Due` to the next poll is the
/// frame's render time.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramePacer {
    /// Target frame period in whole milliseconds
    frame_period_ms: u32,
    /// Earliest time the next frame may start
    next_frame_start: u32,
    /// When the current frame started drawing
    last_frame_start: u32,
    /// Measured duration of the previous frame
    last_frame_duration_ms: u32,
    /// Completed frames since construction
    frame_count: u32,
    /// A frame has started and its completion is not yet recorded
    post_render: bool,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePacer {
    /// Create a pacer at the default 60 frames per second
    pub fn new() -> Self {
        Self::with_rate(DEFAULT_FRAME_RATE)
    }

    /// Create a pacer at `rate` frames per second
    pub fn with_rate(rate: u8) -> Self {
        let mut pacer = Self {
            frame_period_ms: 0,
            next_frame_start: 0,
            last_frame_start: 0,
            last_frame_duration_ms: 0,
            frame_count: 0,
            post_render: false,
        };
        pacer.set_frame_rate(rate);
        pacer
    }

    /// Change the target frame rate
    ///
    /// The period is the floor of `1000 / rate` milliseconds; no
    /// fractional-millisecond correction is attempted.
    pub fn set_frame_rate(&mut self, rate: u8) {
        self.frame_period_ms = 1000 / rate.max(1) as u32;
    }

    /// Target frame period in milliseconds
    pub fn frame_period_ms(&self) -> u32 {
        self.frame_period_ms
    }

    /// Decide whether the next frame may start at time `now` (milliseconds)
    ///
    /// On the first poll after a `Due`, the finished frame's duration is
    /// recorded and the frame counter advances. Before the eligibility time
    /// the poll returns [`FramePoll::NotDue`]; at or past it, the next
    /// eligibility advances one period along the schedule (anchored to the
    /// current eligibility, not to `now`, so late polls within a period
    /// don't shift the cadence), clamped to `now` when the schedule has
    /// fallen behind by more than a period. The clamp means an overrun is
    /// never repaid by a burst of fast frames; the schedule simply restarts
    /// from the stall.
    pub fn poll(&mut self, now: u32) -> FramePoll {
        if self.post_render {
            self.last_frame_duration_ms = now.saturating_sub(self.last_frame_start);
            self.frame_count = self.frame_count.wrapping_add(1);
            self.post_render = false;
        }

        if now < self.next_frame_start {
            let remaining = self.next_frame_start - now;
            return FramePoll::NotDue {
                idle: remaining > 1,
            };
        }

        self.next_frame_start += self.frame_period_ms;
        if self.next_frame_start < now {
            self.next_frame_start = now;
        }
        self.last_frame_start = now;
        self.post_render = true;
        FramePoll::Due
    }

    /// Previous frame's render time as a percentage of the frame period
    ///
    /// 100 means the frame used its whole budget. Informational only.
    pub fn cpu_load_percent(&self) -> u32 {
        self.last_frame_duration_ms * 100 / self.frame_period_ms
    }

    /// Measured duration of the previous frame in milliseconds
    pub fn last_frame_duration_ms(&self) -> u32 {
        self.last_frame_duration_ms
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// True on every `n`-th frame; for timing animations and blink cadences
    pub fn every_n_frames(&self, n: u32) -> bool {
        self.frame_count % n == 0
    }
}
