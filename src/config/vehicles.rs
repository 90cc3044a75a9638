use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehiclesConfig {
    #[serde(default = "VehicleClassConfig::default_car")]
    pub car: VehicleClassConfig,
    #[serde(default = "VehicleClassConfig::default_emergency")]
    pub emergency: VehicleClassConfig,
    #[serde(default = "default_queue_gap")]
    pub queue_gap: f32,
    #[serde(default)]
    pub random: RandomConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleClassConfig {
    // Extent along the direction of travel
    pub length: f32,
    pub width: f32,
    // Distance per tick while the lane holds right-of-way
    pub speed: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RandomConfig {
    pub seed: Option<u64>,
}

impl VehicleClassConfig {
    fn default_car() -> Self {
        Self {
            length: 38.0,
            width: 22.0,
            speed: 8.0,
        }
    }

    fn default_emergency() -> Self {
        Self {
            length: 48.0,
            width: 28.0,
            speed: 5.0,
        }
    }
}

fn default_queue_gap() -> f32 {
    16.0
}

impl Default for VehiclesConfig {
    fn default() -> Self {
        Self {
            car: VehicleClassConfig::default_car(),
            emergency: VehicleClassConfig::default_emergency(),
            queue_gap: default_queue_gap(),
            random: RandomConfig::default(),
        }
    }
}

impl Validate for VehiclesConfig {
    fn validate(&self) -> Result<()> {
        for (name, class) in [("car", &self.car), ("emergency", &self.emergency)] {
            if class.length <= 0.0 || class.width <= 0.0 {
                return Err(anyhow!("Dimensions of '{}' vehicles must be positive", name));
            }

            if class.speed <= 0.0 {
                return Err(anyhow!("Speed of '{}' vehicles must be positive", name));
            }
        }

        if self.queue_gap < 0.0 {
            return Err(anyhow!("Queue gap must be non-negative"));
        }

        Ok(())
    }
}
