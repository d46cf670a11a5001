/// Frame pacing for the fixed-rate loop
use log::warn;
use std::time::{Duration, Instant};

/// Frame timing snapshot handed to update hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame started
    pub dt: f32,
    /// Monotonic frame counter
    pub index: u64,
}

/// Sleeps out the remainder of each frame to hold a target rate
#[derive(Debug, Clone)]
pub struct FramePacer {
    target: Duration,
    frame_start: Instant,
    previous_start: Option<Instant>,
    index: u64,
}

impl FramePacer {
    /// Non-positive or non-finite rates disable pacing, as do rates so low
    /// that one frame would not fit in a `Duration`.
    pub fn new(target_fps: f64) -> Self {
        let target = if target_fps.is_finite() && target_fps > 0.0 {
            Duration::try_from_secs_f64(1.0 / target_fps).unwrap_or_else(|err| {
                warn!("frame rate {target_fps} is too low to pace ({err}); pacing disabled");
                Duration::ZERO
            })
        } else {
            Duration::ZERO
        };
        Self {
            target,
            frame_start: Instant::now(),
            previous_start: None,
            index: 0,
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Mark the start of a frame
    pub fn begin(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = self
            .previous_start
            .map(|prev| now.saturating_duration_since(prev).as_secs_f32())
            .unwrap_or(0.0);
        self.previous_start = Some(now);
        self.frame_start = now;

        let frame = FrameTime {
            dt,
            index: self.index,
        };
        self.index = self.index.wrapping_add(1);
        frame
    }

    /// Block until the frame's target duration has elapsed
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.target {
            std::thread::sleep(self.target - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_duration() {
        assert_eq!(FramePacer::new(50.0).target(), Duration::from_millis(20));
        assert_eq!(FramePacer::new(0.0).target(), Duration::ZERO);
        assert_eq!(FramePacer::new(f64::INFINITY).target(), Duration::ZERO);
        assert_eq!(FramePacer::new(-30.0).target(), Duration::ZERO);
        assert_eq!(FramePacer::new(f64::NAN).target(), Duration::ZERO);
    }

    #[test]
    fn test_tiny_rates_disable_pacing() {
        // 1 / 1e-320 is infinite and 1 / 1e-20 overflows a Duration
        assert_eq!(FramePacer::new(1e-320).target(), Duration::ZERO);
        assert_eq!(FramePacer::new(1e-20).target(), Duration::ZERO);

        let mut pacer = FramePacer::new(1e-20);
        pacer.begin();
        pacer.wait();

        assert_eq!(FramePacer::new(0.5).target(), Duration::from_secs(2));
    }

    #[test]
    fn test_frames_are_counted() {
        let mut pacer = FramePacer::new(0.0);
        let first = pacer.begin();
        pacer.wait();
        let second = pacer.begin();
        assert_eq!(first.index, 0);
        assert_eq!(first.dt, 0.0);
        assert_eq!(second.index, 1);
        assert!(second.dt >= 0.0);
    }

    #[test]
    fn test_wait_holds_rate() {
        let mut pacer = FramePacer::new(100.0);
        let start = Instant::now();
        pacer.begin();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
