//! Single-agent replay of a frozen policy
//!
//! The driver owns its tick rate; callers change it only through
//! [`ReplayDriver::speed_up`] and [`ReplayDriver::slow_down`].

use std::time::Duration;

use super::error::EvaluationError;
use super::observation::create_observation;
use super::policy::{select_action, Policy};
use crate::game::{GameEngine, GameState, StepInfo};

/// Replay speed in ticks per second, never below one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRate(u32);

impl TickRate {
    pub const MIN: u32 = 1;

    pub fn new(ticks_per_second: u32) -> Self {
        Self(ticks_per_second.max(Self::MIN))
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.0
    }

    /// Wall-clock time between ticks
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.0))
    }

    pub fn doubled(self) -> Self {
        Self(self.0.saturating_mul(2))
    }

    pub fn halved(self) -> Self {
        Self::new(self.0 / 2)
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self(8)
    }
}

/// Replays one policy in one game until the snake dies
pub struct ReplayDriver<P> {
    policy: P,
    engine: GameEngine,
    tick_rate: TickRate,
    ticks: u32,
}

impl<P: Policy> ReplayDriver<P> {
    pub fn new(policy: P, engine: GameEngine, tick_rate: TickRate) -> Self {
        Self {
            policy,
            engine,
            tick_rate,
            ticks: 0,
        }
    }

    /// Read-only view for renderers
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn tick_rate(&self) -> TickRate {
        self.tick_rate
    }

    /// Double the tick rate
    pub fn speed_up(&mut self) -> TickRate {
        self.tick_rate = self.tick_rate.doubled();
        self.tick_rate
    }

    /// Halve the tick rate, stopping at the minimum
    pub fn slow_down(&mut self) -> TickRate {
        self.tick_rate = self.tick_rate.halved();
        self.tick_rate
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        !self.engine.is_alive()
    }

    /// Step the game, then let the policy choose the next heading
    ///
    /// Does nothing once the game is over; replay never restarts.
    pub fn tick(&mut self) -> Result<StepInfo, EvaluationError> {
        if self.is_finished() {
            return Ok(StepInfo::default());
        }

        let info = self.engine.step()?;
        self.ticks += 1;

        if self.engine.is_alive() {
            let observation = create_observation(self.engine.state());
            let direction = select_action(&self.policy.evaluate(&observation))?;
            self.engine.set_direction(direction);
        }

        Ok(info)
    }

    /// Tick without pacing until the game ends
    pub fn run_to_end(&mut self) -> Result<&GameState, EvaluationError> {
        while !self.is_finished() {
            self.tick()?;
        }
        Ok(self.engine.state())
    }
}
