use anyhow::{Context, Result};
use std::path::Path;

pub mod intersection;
pub mod vehicles;

pub use intersection::*;
pub use vehicles::*;

#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    pub intersection: IntersectionConfig,
    pub vehicles: VehiclesConfig,
}

impl SimulationConfig {
    pub fn load_from_files(
        intersection_path: impl AsRef<Path>,
        vehicles_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let intersection_path = intersection_path.as_ref();
        let vehicles_path = vehicles_path.as_ref();

        let intersection_content = std::fs::read_to_string(intersection_path)
            .with_context(|| format!("reading {}", intersection_path.display()))?;
        let vehicles_content = std::fs::read_to_string(vehicles_path)
            .with_context(|| format!("reading {}", vehicles_path.display()))?;

        let intersection: IntersectionConfig = toml::from_str(&intersection_content)
            .with_context(|| format!("parsing {}", intersection_path.display()))?;
        let vehicles: VehiclesConfig = toml::from_str(&vehicles_content)
            .with_context(|| format!("parsing {}", vehicles_path.display()))?;

        let config = SimulationConfig { intersection, vehicles };
        config.validate()?;

        Ok(config)
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<()> {
        self.intersection.validate()?;
        self.vehicles.validate()?;
        Ok(())
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
