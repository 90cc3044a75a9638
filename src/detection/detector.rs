use anyhow::Result;
use log::warn;
use std::path::PathBuf;

use super::{normalize_lanes, ClassCounts, Detector, VehicleCountSource};
use crate::simulation::LANE_COUNT;

pub struct DetectorSource<D: Detector> {
    detector: D,
    images: Vec<PathBuf>,
}

impl<D: Detector> DetectorSource<D> {
    pub fn new(detector: D, mut images: Vec<PathBuf>) -> Self {
        if images.len() > LANE_COUNT {
            warn!("{} images given, only the first {} are used", images.len(), LANE_COUNT);
            images.truncate(LANE_COUNT);
        }
        Self { detector, images }
    }
}

impl<D: Detector> VehicleCountSource for DetectorSource<D> {
    fn lane_counts(&mut self) -> Result<Vec<ClassCounts>> {
        let lanes = self.images
            .iter()
            .map(|image| match self.detector.detect(image) {
                Ok(counts) => counts,
                Err(e) => {
                    warn!("Detection failed for {}: {:#}; lane starts empty", image.display(), e);
                    ClassCounts::new()
                }
            })
            .collect();

        Ok(normalize_lanes(lanes))
    }
}
