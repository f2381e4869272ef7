// src/animation.rs

/// Length of one animation loop in seconds.
pub const PERIOD: f64 = 600.0;
pub const LOG_SPEED_RANGE: (f64, f64) = (-6.0, 3.0);
const RATE_LIMIT: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
  Auto,
  Manual,
}

/// What the clock is doing right now, derived from mode + play flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
  Playing,
  Paused,
  Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClock {
  t: f64,
  mode: ClockMode,
  playing: bool,
  log_speed: f64,
}

impl Default for AnimationClock {
  fn default() -> Self {
    Self {
      t: 0.0,
      mode: ClockMode::Auto,
      playing: true,
      log_speed: 0.0,
    }
  }
}

impl AnimationClock {
  pub fn new(log_speed: f64) -> Self {
    let mut clock = Self::default();
    clock.set_log_speed(log_speed);
    clock
  }

  pub fn t(&self) -> f64 {
    self.t
  }

  pub fn mode(&self) -> ClockMode {
    self.mode
  }

  pub fn is_playing(&self) -> bool {
    self.playing
  }

  pub fn log_speed(&self) -> f64 {
    self.log_speed
  }

  pub fn state(&self) -> ClockState {
    match (self.mode, self.playing) {
      (ClockMode::Manual, _) => ClockState::Manual,
      (ClockMode::Auto, true) => ClockState::Playing,
      (ClockMode::Auto, false) => ClockState::Paused,
    }
  }

  /// Seconds of animation time per second of wall time.
  pub fn rate(&self) -> f64 {
    self.log_speed.exp2().clamp(-RATE_LIMIT, RATE_LIMIT)
  }

  pub fn set_playing(&mut self, playing: bool) {
    self.playing = playing;
  }

  pub fn set_manual(&mut self, manual: bool) {
    self.mode = if manual { ClockMode::Manual } else { ClockMode::Auto };
  }

  pub fn set_log_speed(&mut self, s: f64) {
    if s.is_finite() {
      self.log_speed = s.clamp(LOG_SPEED_RANGE.0, LOG_SPEED_RANGE.1);
    }
  }

  /// Ignored unless the clock is in manual mode.
  pub fn scrub(&mut self, value: f64) {
    if self.mode == ClockMode::Manual && value.is_finite() {
      self.t = wrap_time(value);
    }
  }

  pub fn reset(&mut self) {
    self.t = 0.0;
  }

  /// Advances by `dt` wall seconds. Returns true if `t` changed.
  pub fn tick(&mut self, dt: f64) -> bool {
    if self.state() != ClockState::Playing {
      return false;
    }
    let step = if dt.is_finite() && dt > 0.0 { dt * self.rate() } else { 0.0 };
    let next = wrap_time(self.t + step);
    let changed = next != self.t;
    self.t = next;
    changed
  }
}

/// True modulo into `[0, PERIOD)`.
pub fn wrap_time(t: f64) -> f64 {
  let r = t.rem_euclid(PERIOD);
  // rem_euclid can round up to PERIOD for tiny negative inputs
  if r >= PERIOD {
    0.0
  } else {
    r
  }
}
