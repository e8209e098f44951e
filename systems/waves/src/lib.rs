#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave pacing and the wave-scaling policy.
//!
//! The world owns one [`Waves`] instance as part of its game state and feeds
//! it every tick's delta together with the number of enemies still on the
//! field. The pacer answers with a [`WaveProgress`] describing which wave
//! started, which wave was cleared, and whether an enemy should spawn.

use std::time::Duration;

use polygon_defence_core::{SPAWN_INTERVAL, WAVE_DELAY};

/// Base health of every enemy before wave scaling.
const BASE_HEALTH: f32 = 20.0;
/// Health added per wave number.
const HEALTH_PER_WAVE: f32 = 5.0;
/// Base speed of every enemy before wave scaling.
const BASE_SPEED: f32 = 50.0;
/// Speed added per wave number.
const SPEED_PER_WAVE: f32 = 2.0;
/// Base reward of every enemy before wave scaling.
const BASE_VALUE: u32 = 5;
/// Enemies in a wave before scaling.
const BASE_WAVE_SIZE: u32 = 5;
/// Enemies added per wave number.
const WAVE_SIZE_PER_WAVE: u32 = 2;

/// Scaled parameters of an enemy spawned during a given wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Starting (and maximum) health.
    pub health: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Money awarded when the enemy dies.
    pub value: u32,
}

/// Returns the parameters of enemies spawned during `wave`.
#[must_use]
pub fn enemy_stats(wave: u32) -> EnemyStats {
    let scale = wave as f32;
    EnemyStats {
        health: BASE_HEALTH + HEALTH_PER_WAVE * scale,
        speed: BASE_SPEED + SPEED_PER_WAVE * scale,
        value: BASE_VALUE.saturating_add(wave),
    }
}

/// Returns the number of enemies queued when `wave` starts.
#[must_use]
pub fn wave_size(wave: u32) -> u32 {
    BASE_WAVE_SIZE.saturating_add(wave.saturating_mul(WAVE_SIZE_PER_WAVE))
}

/// Timing parameters of the wave pacer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    wave_delay: Duration,
    spawn_interval: Duration,
}

impl Config {
    /// Creates a configuration with explicit timings.
    #[must_use]
    pub const fn new(wave_delay: Duration, spawn_interval: Duration) -> Self {
        Self {
            wave_delay,
            spawn_interval,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(WAVE_DELAY, SPAWN_INTERVAL)
    }
}

/// Announcement that a wave began.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveStart {
    /// Number of the new wave.
    pub wave: u32,
    /// Enemies queued for it.
    pub enemies: u32,
}

/// Outcome of advancing the pacer by one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveProgress {
    /// Wave whose last enemy left the field, reported once.
    pub cleared: Option<u32>,
    /// Wave that started during the tick.
    pub started: Option<WaveStart>,
    /// Enemy to spawn at the head of the path.
    pub spawn: Option<EnemyStats>,
}

/// Wave pacing state: current wave, timers and the spawn queue.
#[derive(Clone, Debug, PartialEq)]
pub struct Waves {
    config: Config,
    wave: u32,
    wave_timer: Duration,
    spawn_timer: Duration,
    remaining: u32,
    cleared_reported: bool,
}

impl Default for Waves {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Waves {
    /// Creates a pacer positioned before the first wave.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            wave: 0,
            wave_timer: Duration::ZERO,
            spawn_timer: Duration::ZERO,
            remaining: 0,
            cleared_reported: false,
        }
    }

    /// Advances wave pacing and spawning by `dt`.
    ///
    /// The quiet period only accumulates while the field is empty and nothing
    /// is queued. A wave that starts during this call may already spawn its
    /// first enemy in the same call once the spawn interval elapsed.
    pub fn advance(&mut self, dt: Duration, active_enemies: usize) -> WaveProgress {
        let mut progress = WaveProgress::default();

        if active_enemies == 0 && self.remaining == 0 {
            if self.wave > 0 && !self.cleared_reported {
                self.cleared_reported = true;
                progress.cleared = Some(self.wave);
            }

            self.wave_timer = self.wave_timer.saturating_add(dt);
            if self.wave_timer >= self.config.wave_delay {
                self.wave_timer = Duration::ZERO;
                self.wave = self.wave.saturating_add(1);
                self.remaining = wave_size(self.wave);
                self.spawn_timer = Duration::ZERO;
                self.cleared_reported = false;
                progress.started = Some(WaveStart {
                    wave: self.wave,
                    enemies: self.remaining,
                });
            }
        }

        if self.remaining > 0 {
            self.spawn_timer = self.spawn_timer.saturating_add(dt);
            if self.spawn_timer >= self.config.spawn_interval {
                self.spawn_timer = Duration::ZERO;
                self.remaining -= 1;
                progress.spawn = Some(enemy_stats(self.wave));
            }
        }

        progress
    }

    /// Number of the current wave; zero before the first wave.
    #[must_use]
    pub const fn wave(&self) -> u32 {
        self.wave
    }

    /// Enemies still queued for the current wave.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Time accumulated toward the next wave.
    #[must_use]
    pub const fn wave_timer(&self) -> Duration {
        self.wave_timer
    }

    /// Countdown to the next wave while waiting between waves.
    ///
    /// Returns `None` while enemies are queued or on the field.
    #[must_use]
    pub fn time_until_next_wave(&self, active_enemies: usize) -> Option<Duration> {
        if active_enemies > 0 || self.remaining > 0 {
            return None;
        }
        Some(self.config.wave_delay.saturating_sub(self.wave_timer))
    }
}
