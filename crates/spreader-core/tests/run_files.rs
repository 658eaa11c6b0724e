//! End-to-end detector runs over real files
//!
//! Every test writes its inputs into its own `TempDir` and runs the full
//! pipeline (open → build → propagate → rank → save).

use std::fs;
use std::path::{Path, PathBuf};

use spreader_core::{
    CLEAN_MSG, Category, DetectorConfig, DetectorError, MEDICAL_SUPERVISION_MSG, QUARANTINE_MSG,
    run_files,
};
use tempfile::TempDir;

// =============================================================================
// Helper functions
// =============================================================================

struct Inputs {
    _dir: TempDir,
    people: PathBuf,
    meetings: PathBuf,
    output: PathBuf,
}

fn write_inputs(people: &str, meetings: &str) -> Inputs {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let people_path = dir.path().join("People.in");
    let meetings_path = dir.path().join("Meetings.in");
    fs::write(&people_path, people).expect("Failed to write people");
    fs::write(&meetings_path, meetings).expect("Failed to write meetings");
    let output = dir.path().join("SpreaderDetectorAnalysis.out");

    Inputs {
        _dir: dir,
        people: people_path,
        meetings: meetings_path,
        output,
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Successful runs
// =============================================================================

#[test]
fn test_worked_example_output() {
    let inputs = write_inputs("Alice 1\nBob 2\nCara 3\n", "1\n1 2 10.0 5.0\n");
    let mut config = DetectorConfig::default();
    config.calibration.min_distance = 2.0;
    config.calibration.max_time = 10.0;

    let report = run_files(&inputs.people, &inputs.meetings, &inputs.output, &config).unwrap();
    assert_eq!(report.len(), 3);

    assert_eq!(
        read_lines(&inputs.output),
        vec![
            format!("{}: Alice 1", MEDICAL_SUPERVISION_MSG),
            format!("{}: Bob 2", QUARANTINE_MSG),
            format!("{}: Cara 3", CLEAN_MSG),
        ]
    );
}

#[test]
fn test_tree_with_default_calibration() {
    // Root 100 met 200 (factor 720/1440 = 0.5) and 300 (factor 60/(2*1440))
    // 200 met 400 (factor 1440/(4*1440) = 0.25)
    let people = "Root 100\nNear 200\nFar 300\nSecond 400\nLoner 500\n";
    let meetings = "100\n100 200 1 720\n100 300 2 60\n200 400 4 1440\n";
    let inputs = write_inputs(people, meetings);

    let report = run_files(
        &inputs.people,
        &inputs.meetings,
        &inputs.output,
        &DetectorConfig::default(),
    )
    .unwrap();

    let ids: Vec<i64> = report.iter().map(|r| r.id).collect();
    assert_eq!(ids[..3], [100, 200, 400]);
    assert_eq!(report.count(Category::MedicalSupervision), 2);
    assert_eq!(report.count(Category::Quarantine), 1);
    assert_eq!(report.count(Category::Clean), 2);

    let lines = read_lines(&inputs.output);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2], format!("{}: Second 400", QUARANTINE_MSG));
}

#[test]
fn test_empty_population_writes_empty_output() {
    let inputs = write_inputs("", "1\n1 2 1 1\n");

    let report = run_files(
        &inputs.people,
        &inputs.meetings,
        &inputs.output,
        &DetectorConfig::default(),
    )
    .unwrap();

    assert!(report.is_empty());
    assert!(read_lines(&inputs.output).is_empty());
}

#[test]
fn test_header_only_meetings() {
    let inputs = write_inputs("Alice 1\nBob 2\n", "1\n");

    run_files(
        &inputs.people,
        &inputs.meetings,
        &inputs.output,
        &DetectorConfig::default(),
    )
    .unwrap();

    assert_eq!(
        read_lines(&inputs.output),
        vec![
            format!("{}: Alice 1", MEDICAL_SUPERVISION_MSG),
            format!("{}: Bob 2", CLEAN_MSG),
        ]
    );
}

// =============================================================================
// Failing runs
// =============================================================================

#[test]
fn test_missing_people_file() {
    let inputs = write_inputs("Alice 1\n", "1\n");
    let missing = inputs.people.with_file_name("Nobody.in");

    let result = run_files(
        &missing,
        &inputs.meetings,
        &inputs.output,
        &DetectorConfig::default(),
    );

    assert!(matches!(result, Err(DetectorError::Input { .. })));
    assert!(!inputs.output.exists());
}

#[test]
fn test_missing_meetings_file_with_empty_population() {
    let inputs = write_inputs("", "");
    let missing = inputs.meetings.with_file_name("NoMeetings.in");

    let result = run_files(
        &inputs.people,
        &missing,
        &inputs.output,
        &DetectorConfig::default(),
    );

    assert!(matches!(result, Err(DetectorError::Input { .. })));
    assert!(!inputs.output.exists());
}

#[test]
fn test_malformed_input_leaves_no_output() {
    let inputs = write_inputs("Alice 1\nBob 2\n", "1\n1 2 near 5\n");

    let result = run_files(
        &inputs.people,
        &inputs.meetings,
        &inputs.output,
        &DetectorConfig::default(),
    );

    assert!(matches!(result, Err(DetectorError::Build(_))));
    assert!(!inputs.output.exists());
}

#[test]
fn test_unwritable_output() {
    let inputs = write_inputs("Alice 1\n", "1\n");
    let output = inputs.output.with_file_name("no_such_dir").join("out.txt");

    let result = run_files(
        &inputs.people,
        &inputs.meetings,
        &output,
        &DetectorConfig::default(),
    );

    assert!(matches!(result, Err(DetectorError::Output { .. })));
}
