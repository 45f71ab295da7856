//! Health bar: drains over time, refilled by eating candy

use serde::{Deserialize, Serialize};

use crate::tuning::HealthTuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: f32,
    max: f32,
    decay_per_second: f32,
    /// Candies eaten since the last heal
    collected_since_heal: u32,
    heal_threshold: u32,
    heal_amount: f32,
}

impl Health {
    pub fn new(tuning: &HealthTuning) -> Self {
        Self {
            current: tuning.max,
            max: tuning.max,
            decay_per_second: tuning.decay_per_second,
            collected_since_heal: 0,
            heal_threshold: tuning.heal_threshold,
            heal_amount: tuning.heal_amount,
        }
    }

    /// Drain for `dt` seconds, never below zero
    pub fn update(&mut self, dt: f32) {
        self.current = (self.current - self.decay_per_second * dt).max(0.0);
    }

    /// Count eaten candy; every `heal_threshold` of them heals once.
    /// Returns the number of heals applied.
    pub fn add_collected(&mut self, count: u32) -> u32 {
        self.collected_since_heal += count;
        let mut heals = 0;
        while self.collected_since_heal >= self.heal_threshold {
            self.collected_since_heal -= self.heal_threshold;
            self.current = (self.current + self.heal_amount).min(self.max);
            heals += 1;
        }
        heals
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn collected_since_heal(&self) -> u32 {
        self.collected_since_heal
    }
}
