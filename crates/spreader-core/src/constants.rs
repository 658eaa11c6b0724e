//! Spreader detector constants
//!
//! Note: calibration and threshold defaults live here, but a run always reads
//! them through `DetectorConfig` so they can be overridden.

// =============================================================================
// Storage growth
// =============================================================================

/// Number of person slots reserved whenever the store is full
pub const PERSON_GROWTH_BATCH: usize = 10;

// =============================================================================
// Risk propagation
// =============================================================================

/// Risk assigned to the index case
pub const ROOT_RISK: f64 = 1.0;

/// Default minimal meaningful distance between two people (meters)
pub const DEFAULT_MIN_DISTANCE: f64 = 1.0;

/// Default maximal contact time taken into account
pub const DEFAULT_MAX_TIME: f64 = 1440.0;

// =============================================================================
// Classification thresholds
// =============================================================================

/// Risk at or above which immediate medical supervision is required
pub const DEFAULT_MEDICAL_SUPERVISION_THRESHOLD: f64 = 0.3;

/// Risk at or above which regular quarantine is required
pub const DEFAULT_QUARANTINE_THRESHOLD: f64 = 0.1;

// =============================================================================
// Output
// =============================================================================

/// Default output file name
pub const OUTPUT_FILE: &str = "SpreaderDetectorAnalysis.out";

/// Line prefix for the medical supervision category
pub const MEDICAL_SUPERVISION_MSG: &str = "Immediate medical supervision required";

/// Line prefix for the quarantine category
pub const QUARANTINE_MSG: &str = "Quarantine required";

/// Line prefix for the clean category
pub const CLEAN_MSG: &str = "Clean";
