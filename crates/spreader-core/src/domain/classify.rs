//! Exposure classification

use crate::constants::{
    CLEAN_MSG, DEFAULT_MEDICAL_SUPERVISION_THRESHOLD, DEFAULT_QUARANTINE_THRESHOLD,
    MEDICAL_SUPERVISION_MSG, QUARANTINE_MSG,
};
use serde::{Deserialize, Serialize};

/// Exposure category of a person
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    MedicalSupervision,
    Quarantine,
    Clean,
}

impl Category {
    /// Output message prefix of the category
    pub fn message(self) -> &'static str {
        match self {
            Category::MedicalSupervision => MEDICAL_SUPERVISION_MSG,
            Category::Quarantine => QUARANTINE_MSG,
            Category::Clean => CLEAN_MSG,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Classification thresholds, `medical_supervision > quarantine`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub medical_supervision: f64,
    pub quarantine: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            medical_supervision: DEFAULT_MEDICAL_SUPERVISION_THRESHOLD,
            quarantine: DEFAULT_QUARANTINE_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Classify a risk score, checking the higher threshold first
    pub fn classify(&self, risk: f64) -> Category {
        if risk >= self.medical_supervision {
            Category::MedicalSupervision
        } else if risk >= self.quarantine {
            Category::Quarantine
        } else {
            Category::Clean
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let t = Thresholds {
            medical_supervision: 0.3,
            quarantine: 0.1,
        };
        assert_eq!(t.classify(1.0), Category::MedicalSupervision);
        assert_eq!(t.classify(0.3), Category::MedicalSupervision);
        assert_eq!(t.classify(0.29), Category::Quarantine);
        assert_eq!(t.classify(0.1), Category::Quarantine);
        assert_eq!(t.classify(0.09), Category::Clean);
        assert_eq!(t.classify(0.0), Category::Clean);
    }

    #[test]
    fn test_classify_nan_is_clean() {
        assert_eq!(Thresholds::default().classify(f64::NAN), Category::Clean);
    }

    #[test]
    fn test_category_messages() {
        assert_eq!(
            Category::MedicalSupervision.to_string(),
            MEDICAL_SUPERVISION_MSG
        );
        assert_eq!(Category::Quarantine.to_string(), QUARANTINE_MSG);
        assert_eq!(Category::Clean.to_string(), CLEAN_MSG);
    }
}
