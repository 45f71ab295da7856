//! Frame timing: real-time clock, fixed-step accumulator, FPS counter

use std::time::Instant;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Measures real time between frames
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`FrameClock::tick`] with an explicit timestamp. The first frame
    /// reports one simulation step; every delta is clamped to `MAX_FRAME_DT`.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => SIM_DT,
        };
        self.last = Some(now);
        dt.min(MAX_FRAME_DT)
    }
}

/// Turns variable frame time into whole simulation ticks
#[derive(Debug, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `dt` seconds and return how many ticks to run now, at most
    /// `MAX_SUBSTEPS`. Backlog beyond that is dropped to avoid a spiral of death.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= SIM_DT;
        }
        substeps
    }
}

/// Rolling frames-per-second over the last 60 frames
#[derive(Debug)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `time` seconds since some fixed origin
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample sits where the next write goes; 60 samples span 59 intervals
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_first_frame_is_one_step() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.tick_at(t0), SIM_DT);
        assert!((clock.tick_at(t0 + Duration::from_millis(20)) - 0.02).abs() < 1e-4);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        assert_eq!(clock.tick_at(t0 + Duration::from_secs(5)), MAX_FRAME_DT);
    }

    #[test]
    fn test_fixed_step_whole_ticks() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT), 1);
        assert_eq!(step.advance(SIM_DT * 0.5), 0);
        assert_eq!(step.advance(SIM_DT * 0.6), 1);
        // 0.1 of a tick is still banked
        assert_eq!(step.advance(SIM_DT * 0.85), 0);
        assert_eq!(step.advance(SIM_DT * 0.1), 1);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(1.0), MAX_SUBSTEPS);
        assert_eq!(step.advance(0.0), 0);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::new();
        for i in 1..=120 {
            fps.record(i as f64 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
