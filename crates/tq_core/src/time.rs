use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

/// Fixed-rate frame pacer.
///
/// `update()` feeds wall-clock time into an accumulator and reports whether a
/// whole frame is due. `advance()` skips the clock entirely so headless runs and
/// tests step as fast as they like. Both bump the same `frame_count`, which the
/// game loop feeds to [`is_cadence_frame`].
pub struct FramePacer {
    pub frame_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    frame_count: u64,
    pub real_dt: f64,
    last_instant: Instant,
    last_frame_instant: Option<Instant>,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
}

impl FramePacer {
    pub fn new(frame_rate: u32) -> Self {
        let frame_rate = frame_rate.max(1);
        let frame_dt = 1.0 / frame_rate as f64;
        Self {
            frame_dt,
            max_accumulator: 0.25,
            accumulator: 0.0,
            frame_count: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            last_frame_instant: None,
            fps_samples: [frame_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: frame_rate as f64,
        }
    }

    /// Returns true when the wall clock says the next frame is due.
    pub fn update(&mut self) -> bool {
        let now = Instant::now();
        self.real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Spiral-of-death cap
        if self.real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            self.real_dt = self.max_accumulator;
        }

        self.accumulator += self.real_dt;
        if self.accumulator < self.frame_dt {
            return false;
        }
        self.accumulator -= self.frame_dt;
        self.frame_count += 1;

        if let Some(previous) = self.last_frame_instant {
            self.record_sample(now.duration_since(previous).as_secs_f64());
        }
        self.last_frame_instant = Some(now);
        true
    }

    /// Step one frame without consulting the clock.
    pub fn advance(&mut self) {
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Wall-clock time left before `update()` can report a new frame.
    pub fn time_until_next_frame(&self) -> Duration {
        let elapsed = self.last_instant.elapsed().as_secs_f64();
        let remaining = self.frame_dt - self.accumulator - elapsed;
        Duration::from_secs_f64(remaining.max(0.0))
    }

    fn record_sample(&mut self, dt: f64) {
        self.fps_samples[self.fps_sample_index] = dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}

/// True on frames that are a multiple of `interval`. An interval of 0 is
/// treated as 1.
pub fn is_cadence_frame(frame: u64, interval: u32) -> bool {
    frame % u64::from(interval.max(1)) == 0
}
