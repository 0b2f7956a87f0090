/// Fixed timestep loop timing.
///
/// Game logic and physics run at a constant tick rate while frames are
/// rendered as fast as the window allows. Frame time is accumulated and spent
/// in whole ticks; the remainder carries over to the next frame.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default logic/physics rate
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Default cap on ticks per frame so a stall cannot snowball
pub const DEFAULT_MAX_STEPS: u32 = 5;

/// Frames averaged for the FPS readout
const FPS_WINDOW_SIZE: usize = 60;

/// Tick rate settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestepConfig {
    /// Ticks per second
    pub tick_rate: u32,
    /// Maximum ticks run for a single frame
    pub max_steps: u32,
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Game loop timing state
#[derive(Debug)]
pub struct GameLoop {
    config: TimestepConfig,
    tick: Duration,
    accumulator: Duration,
    last_frame_time: Instant,
    paused: bool,
    frame_times: VecDeque<Duration>,
    frame_count: u64,
    tick_count: u64,
    /// Ticks dropped because a frame hit `max_steps`
    dropped_ticks: u64,
    current_fps: f32,
    frame_delta: f32,
}

impl GameLoop {
    pub fn new(config: TimestepConfig) -> Self {
        let tick_rate = config.tick_rate.max(1);
        let now = Instant::now();
        Self {
            config: TimestepConfig {
                tick_rate,
                max_steps: config.max_steps.max(1),
            },
            tick: Duration::from_secs(1) / tick_rate,
            accumulator: Duration::ZERO,
            last_frame_time: now,
            paused: false,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            dropped_ticks: 0,
            current_fps: 0.0,
            frame_delta: 0.0,
        }
    }

    /// Begin a new frame using the wall clock; returns the ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Begin a new frame that lasted `frame_time`; returns the ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        self.frame_delta = frame_time.as_secs_f32();

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.tick && ticks < self.config.max_steps {
            self.accumulator -= self.tick;
            ticks += 1;
        }

        // Anything still owed after the cap is dropped
        if self.accumulator >= self.tick {
            let behind = (self.accumulator.as_nanos() / self.tick.as_nanos()) as u64;
            self.dropped_ticks += behind;
            self.accumulator = Duration::from_nanos(
                (self.accumulator.as_nanos() % self.tick.as_nanos()) as u64,
            );
            log::debug!("Frame over budget, dropped {} ticks", behind);
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Seconds per tick
    pub fn fixed_timestep(&self) -> f32 {
        self.tick.as_secs_f32()
    }

    #[allow(dead_code)]
    pub fn tick_rate(&self) -> u32 {
        self.config.tick_rate
    }

    /// Seconds since the previous frame
    #[allow(dead_code)]
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn dropped_ticks(&self) -> u64 {
        self.dropped_ticks
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        let total: Duration = self.frame_times.iter().sum();
        let average = total.as_secs_f32() / self.frame_times.len().max(1) as f32;
        self.current_fps = if average > 0.0 { 1.0 / average } else { 0.0 };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(TimestepConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_default_timestep() {
        let game_loop = GameLoop::default();
        assert_eq!(game_loop.tick_rate(), 60);
        assert_relative_eq!(game_loop.fixed_timestep(), 1.0 / 60.0, epsilon = 1e-6);
    }

    #[test]
    fn test_short_frame_runs_no_ticks() {
        let mut game_loop = GameLoop::default();
        assert_eq!(game_loop.advance(ms(5)), 0);
        assert_eq!(game_loop.advance(ms(5)), 0);
        // 15ms accumulated, still short of a tick
        assert_eq!(game_loop.advance(ms(5)), 0);
        assert_eq!(game_loop.advance(ms(5)), 1);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut game_loop = GameLoop::new(TimestepConfig {
            tick_rate: 10,
            max_steps: 5,
        });
        assert_eq!(game_loop.advance(ms(250)), 2);
        assert_eq!(game_loop.advance(ms(50)), 1);
        assert_eq!(game_loop.tick_count(), 3);
    }

    #[test]
    fn test_max_steps_caps_and_drops() {
        let mut game_loop = GameLoop::new(TimestepConfig {
            tick_rate: 10,
            max_steps: 3,
        });
        assert_eq!(game_loop.advance(ms(1000)), 3);
        assert_eq!(game_loop.dropped_ticks(), 7);
        // No burst on the next frame
        assert_eq!(game_loop.advance(ms(10)), 0);
    }

    #[test]
    fn test_paused_runs_no_ticks() {
        let mut game_loop = GameLoop::default();
        game_loop.pause();
        assert_eq!(game_loop.advance(ms(100)), 0);
        assert_eq!(game_loop.frame_count(), 1);

        game_loop.resume();
        assert!(!game_loop.is_paused());
        assert_eq!(game_loop.advance(ms(20)), 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::default();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());
        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_fps_average() {
        let mut game_loop = GameLoop::default();
        for _ in 0..10 {
            game_loop.advance(ms(20));
        }
        assert_relative_eq!(game_loop.fps(), 50.0, epsilon = 0.01);
        assert_relative_eq!(game_loop.frame_delta(), 0.02, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_rate_clamped() {
        let game_loop = GameLoop::new(TimestepConfig {
            tick_rate: 0,
            max_steps: 0,
        });
        assert_eq!(game_loop.tick_rate(), 1);
    }
}
