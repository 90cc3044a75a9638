use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use intersection_sim::{
    detection::{
        lane_assignment, lane_vehicles, normalize_lanes, total_count, ClassCountDir, ClassCounts,
        Detector, DetectorSource, VehicleCountSource, MAX_LANE_VEHICLES,
    },
    report::{SignalReport, SignalStats},
    simulation::VehicleType::{Ambulance, Car, Fire, Police},
};

fn counts(pairs: &[(&str, u32)]) -> ClassCounts {
    pairs.iter().map(|(class, n)| (class.to_string(), *n)).collect()
}

// Fresh scratch directory under the system temp dir
fn scratch_dir(name: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("intersection-sim-{}-{}", name, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir)?;
    }
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[test]
fn emergency_vehicles_are_queued_before_cars() {
    let lane = lane_vehicles(&counts(&[("car", 2), ("police", 1), ("truck", 1), ("ambulance", 1)]));
    assert_eq!(lane, vec![Ambulance, Police, Car, Car, Car]);
}

#[test]
fn unknown_classes_become_cars() {
    let lane = lane_vehicles(&counts(&[("bicycle", 2), ("fire", 1), ("bus", 1)]));
    assert_eq!(lane, vec![Fire, Car, Car, Car]);
}

#[test]
fn huge_counts_saturate_and_are_capped() {
    let lane = lane_vehicles(&counts(&[("bus", u32::MAX), ("car", 1), ("police", 2)]));
    assert_eq!(lane.len(), MAX_LANE_VEHICLES as usize);
    assert_eq!(&lane[..3], &[Police, Police, Car]);

    let flood = counts(&[("ambulance", u32::MAX), ("fire", u32::MAX)]);
    assert_eq!(total_count(&flood), u32::MAX);
    assert!(lane_vehicles(&flood).iter().all(|t| *t == Ambulance));
}

#[test]
fn report_saturates_instead_of_overflowing() {
    let lanes = vec![counts(&[("scooter", u32::MAX), ("zebra", 1)]), counts(&[("car", u32::MAX), ("fire", 3)])];
    let report = SignalReport::from_counts(&lanes);

    assert_eq!(report.signals["signal1"].total_vehicles, u32::MAX);
    assert_eq!(report.signals["signal2"], SignalStats {
        total_vehicles: u32::MAX,
        emergency_vehicles: 3,
        other_vehicles: u32::MAX,
    });
    assert_eq!(report.go_first, "signal2");
}

#[test]
fn lanes_are_padded_or_truncated_to_four() {
    let padded = normalize_lanes(vec![counts(&[("car", 1)])]);
    assert_eq!(padded.len(), 4);
    assert!(padded[1..].iter().all(|lane| lane.is_empty()));

    let truncated = normalize_lanes(vec![counts(&[("car", 1)]); 6]);
    assert_eq!(truncated.len(), 4);
}

#[test]
fn class_count_dir_reads_first_four_files_in_name_order() -> Result<()> {
    let dir = scratch_dir("counts")?;
    std::fs::write(dir.join("d.json"), r#"{"car": 4}"#)?;
    std::fs::write(dir.join("a.json"), r#"{"ambulance": 1, "car": 2}"#)?;
    std::fs::write(dir.join("b.json"), r#"{"car": "lots"}"#)?;
    std::fs::write(dir.join("c.json"), r#"{"bus": 3}"#)?;
    std::fs::write(dir.join("e.json"), r#"{"police": 9}"#)?;
    std::fs::write(dir.join("notes.txt"), "not counts")?;

    let mut source = ClassCountDir::new(&dir);
    let files: Vec<String> = source
        .files()?
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(files, vec!["a.json", "b.json", "c.json", "d.json"]);

    let lanes = source.lane_counts()?;
    assert_eq!(lanes.len(), 4);
    assert_eq!(lanes[0], counts(&[("ambulance", 1), ("car", 2)]));
    assert!(lanes[1].is_empty(), "unparseable file is treated as no data");
    assert_eq!(lane_assignment(&lanes)[2], vec![Car, Car, Car]);

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn missing_count_files_leave_lanes_empty() -> Result<()> {
    let dir = scratch_dir("sparse")?;
    std::fs::write(dir.join("only.json"), r#"{"fire": 1}"#)?;

    let lanes = ClassCountDir::new(&dir).lane_counts()?;
    assert_eq!(lanes.len(), 4);
    assert_eq!(lanes[0], counts(&[("fire", 1)]));
    assert!(lanes[1..].iter().all(|lane| lane.is_empty()));

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn missing_directory_is_an_error() {
    let result = ClassCountDir::new("/nonexistent/intersection-sim/class_counts").lane_counts();
    assert!(result.is_err());
}

struct FixedDetector;

impl Detector for FixedDetector {
    fn detect(&self, image: &Path) -> Result<ClassCounts> {
        match image.file_stem().and_then(|s| s.to_str()) {
            Some("north") => Ok(counts(&[("car", 3)])),
            Some("east") => Ok(counts(&[("fire", 1), ("car", 1)])),
            _ => Err(anyhow!("model could not read {}", image.display())),
        }
    }
}

#[test]
fn detector_failures_become_empty_lanes() -> Result<()> {
    let images = ["north.jpg", "east.jpg", "broken.jpg", "north.jpg", "east.jpg"]
        .iter()
        .map(PathBuf::from)
        .collect();
    let mut source = DetectorSource::new(FixedDetector, images);

    let lanes = source.lane_counts()?;
    assert_eq!(lanes.len(), 4);
    assert_eq!(lanes[1], counts(&[("car", 1), ("fire", 1)]));
    assert!(lanes[2].is_empty());
    assert_eq!(lanes[3], counts(&[("car", 3)]));
    Ok(())
}

#[test]
fn report_counts_and_picks_the_signal_to_go_first() {
    let lanes = vec![
        counts(&[("car", 2)]),
        counts(&[("ambulance", 1)]),
        ClassCounts::new(),
        counts(&[("car", 2), ("truck", 1), ("scooter", 1)]),
    ];
    let report = SignalReport::from_counts(&lanes);

    assert_eq!(report.go_first, "signal2");
    assert_eq!(report.signals.len(), 4);
    assert_eq!(report.signals["signal2"], SignalStats {
        total_vehicles: 1,
        emergency_vehicles: 1,
        other_vehicles: 0,
    });
    assert_eq!(report.signals["signal4"], SignalStats {
        total_vehicles: 4,
        emergency_vehicles: 0,
        other_vehicles: 3,
    });
}

#[test]
fn report_without_emergencies_prefers_the_busiest_signal() {
    let lanes = vec![counts(&[("car", 2)]), ClassCounts::new(), counts(&[("bus", 2), ("car", 1)])];
    let report = SignalReport::from_counts(&lanes);
    assert_eq!(report.go_first, "signal3");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["go_first"], "signal3");
    assert_eq!(json["signals"]["signal4"]["total_vehicles"], 0);
}

#[test]
fn empty_report_falls_back_to_the_first_signal() {
    let report = SignalReport::from_counts(&[]);
    assert_eq!(report.go_first, "signal1");
}
