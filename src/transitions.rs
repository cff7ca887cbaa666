use std::time::{Duration, Instant};

/// Duration of the default collapse/expand transition.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Configuration for the height transition.
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, Easing::EaseInOut)
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    /// Slow start, fast middle, slow end.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A single in-flight height interpolation.
///
/// There is at most one tween per container; starting a new transition
/// retargets it in place from the current interpolated value. The newest
/// call always wins, nothing queues.
#[derive(Debug, Clone)]
pub struct HeightTween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl HeightTween {
    pub fn new(from: f32, to: f32, start: Instant, config: TransitionConfig) -> Self {
        Self {
            from,
            to,
            start,
            duration: config.duration,
            easing: config.easing,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Interpolated value at `now`, clamped to the target once complete.
    pub fn value_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    /// Restart toward a new target from the current interpolated value.
    pub fn retarget(&mut self, to: f32, now: Instant) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// The instant at which this tween settles.
    pub fn deadline(&self) -> Instant {
        self.start + self.duration
    }
}
