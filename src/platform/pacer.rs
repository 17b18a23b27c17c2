//! Real-time frame pacing

use std::time::{Duration, Instant};

use super::FramePacer;

/// Sleeps out the remainder of each frame
#[derive(Debug, Default)]
pub struct SleepPacer {
    last: Option<Instant>,
}

impl SleepPacer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FramePacer for SleepPacer {
    fn tick(&mut self, fps: u32) -> f32 {
        let frame = Duration::from_secs(1) / fps.max(1);
        let Some(last) = self.last else {
            self.last = Some(Instant::now());
            return 0.0;
        };

        let elapsed = last.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }

        let now = Instant::now();
        let real = now.duration_since(last);
        self.last = Some(now);
        real.as_secs_f32() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_does_not_wait() {
        let mut pacer = SleepPacer::new();
        assert_eq!(pacer.tick(60), 0.0);
    }

    #[test]
    fn test_tick_caps_frame_rate() {
        let mut pacer = SleepPacer::new();
        pacer.tick(100);
        let ms = pacer.tick(100);
        assert!(ms >= 10.0, "frame took only {ms}ms");
    }
}
