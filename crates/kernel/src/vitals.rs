use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Read-only snapshot of the three resource pools, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsState {
    health: f32,
    mana: f32,
    energy: f32,
}

impl Default for VitalsState {
    fn default() -> Self {
        Self::FULL
    }
}

impl VitalsState {
    pub const FULL: Self = Self {
        health: 1.0,
        mana: 1.0,
        energy: 1.0,
    };

    /// Build a snapshot, clamping every pool into range.
    pub fn new(health: f32, mana: f32, energy: f32) -> Self {
        Self {
            health: clamp_unit(health),
            mana: clamp_unit(mana),
            energy: clamp_unit(energy),
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn mana(&self) -> f32 {
        self.mana
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }
}

/// Passive regeneration per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsRates {
    pub health: f32,
    pub mana: f32,
    pub energy: f32,
}

impl Default for VitalsRates {
    fn default() -> Self {
        Self {
            health: 0.02,
            mana: 0.08,
            energy: 0.12,
        }
    }
}

impl VitalsRates {
    /// Every rate must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (pool, rate) in [("health", self.health), ("mana", self.mana), ("energy", self.energy)] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ConfigError::InvalidRegen { pool, rate });
            }
        }
        Ok(())
    }
}

/// Health, mana and energy with time-based regen and event-based drain.
///
/// Nothing here fails: out-of-range results clamp, and spending from an
/// empty pool leaves it at zero without blocking the caller.
#[derive(Debug, Clone, Default)]
pub struct VitalsModel {
    state: VitalsState,
    rates: VitalsRates,
}

impl VitalsModel {
    /// All pools full.
    pub fn new(rates: VitalsRates) -> Self {
        Self {
            state: VitalsState::FULL,
            rates,
        }
    }

    pub fn with_state(state: VitalsState, rates: VitalsRates) -> Self {
        Self { state, rates }
    }

    pub fn state(&self) -> VitalsState {
        self.state
    }

    pub fn rates(&self) -> VitalsRates {
        self.rates
    }

    /// Passive regeneration for `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        let s = &mut self.state;
        s.mana = clamp_unit(s.mana + self.rates.mana * delta);
        s.energy = clamp_unit(s.energy + self.rates.energy * delta);
        s.health = clamp_unit(s.health + self.rates.health * delta);
    }

    pub fn apply_damage(&mut self, amount: f32) {
        self.state.health = drain(self.state.health, amount);
    }

    pub fn spend_mana(&mut self, amount: f32) {
        self.state.mana = drain(self.state.mana, amount);
    }

    pub fn spend_energy(&mut self, amount: f32) {
        self.state.energy = drain(self.state.energy, amount);
    }
}

fn drain(pool: f32, amount: f32) -> f32 {
    debug_assert!(amount >= 0.0, "drain amount must be non-negative, got {amount}");
    clamp_unit(pool - amount.max(0.0))
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
