use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use super::{normalize_lanes, total_count, ClassCounts, VehicleCountSource};
use crate::error::SimulationError;
use crate::simulation::LANE_COUNT;

// One JSON object per camera, e.g. {"car": 4, "ambulance": 1}.
// The first four files in name order feed lanes A..D.
#[derive(Debug, Clone)]
pub struct ClassCountDir {
    dir: PathBuf,
}

impl ClassCountDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("listing class counts in {}", self.dir.display()))?;

        for entry in entries {
            let path = entry?.path();
            let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if path.is_file() && is_json {
                files.push(path);
            }
        }

        files.sort();
        files.truncate(LANE_COUNT);
        Ok(files)
    }

    pub fn load_file(path: &Path) -> Result<ClassCounts, SimulationError> {
        let content = std::fs::read_to_string(path).map_err(|e| SimulationError::CountFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| SimulationError::CountFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl VehicleCountSource for ClassCountDir {
    fn lane_counts(&mut self) -> Result<Vec<ClassCounts>> {
        let files = self.files()?;
        if files.len() < LANE_COUNT {
            warn!("Only {} class count files in {}, remaining lanes start empty", files.len(), self.dir.display());
        }

        let lanes = files
            .iter()
            .map(|path| match Self::load_file(path) {
                Ok(counts) => {
                    info!("Loaded {} ({} vehicles)", path.display(), total_count(&counts));
                    counts
                }
                Err(e) => {
                    warn!("{}; lane starts empty", e);
                    ClassCounts::new()
                }
            })
            .collect();

        Ok(normalize_lanes(lanes))
    }
}
