//! Configuration management for the pose coaching engine
//!
//! Every tunable threshold lives here so tests and deployments can override
//! them without touching the scoring code. The defaults reproduce the
//! reference scoring behavior exactly.

use crate::{
    advice::AdviceGenerator,
    calibration::FeedbackThresholds,
    comparator::PoseComparator,
    constants::{
        ADVICE_ROUNDING_STEP_DEG, ALIGNMENT_DECAY_PER_DEGREE, ALIGNMENT_WEIGHT, ARM_SYMMETRY_SCALE, BALANCE_FACTOR,
        CUE_ALIGNMENT_THRESHOLD, DEFAULT_VISIBILITY_THRESHOLD, KNEE_ALIGNMENT_FACTOR, LEG_SYMMETRY_SCALE, MAX_TIPS,
        PERFECT_THRESHOLD_DEG, SHOULDER_ALIGNMENT_FACTOR, SHOULDER_HEIGHT_SCALE, STANCE_WIDTH_MAX_FACTOR,
        STANCE_WIDTH_MIN_FACTOR, SYMMETRY_TIP_THRESHOLD, SYMMETRY_WEIGHT, TIP_THRESHOLD_DEG, T_POSE_TOLERANCE_PX,
    },
    joint_angles::JointAngleCalculator,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Score computation
    pub scoring: ScoringConfig,

    /// Advice wording thresholds
    pub advice: AdviceConfig,

    /// Landmark reliability
    pub detection: DetectionConfig,

    /// Calibration wizard and personalized thresholds
    pub calibration: CalibrationConfig,
}

/// Weights and cutoffs used by the pose comparator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Alignment points lost per degree of mean deviation
    pub alignment_decay: f64,

    /// Symmetry points lost per degree of arm angle difference
    pub arm_symmetry_scale: f64,

    /// Symmetry points lost per degree of leg angle difference
    pub leg_symmetry_scale: f64,

    /// Symmetry points lost per unit of normalized shoulder height difference
    pub shoulder_height_scale: f64,

    /// Weight of alignment in the overall score
    pub alignment_weight: f64,

    /// Weight of symmetry in the overall score
    pub symmetry_weight: f64,

    /// Minimum absolute deviation, in degrees, that produces a tip
    pub tip_threshold_deg: f64,

    /// Symmetry below this adds a symmetry tip
    pub symmetry_tip_threshold: f64,

    /// Maximum number of tips per comparison
    pub max_tips: usize,

    /// Alignment below this surfaces pose-specific cues
    pub cue_alignment_threshold: f64,
}

/// Advice wording thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Deviations under this many degrees are reported as perfect
    pub perfect_threshold_deg: f64,

    /// Displayed deviations are rounded to a multiple of this
    pub rounding_step_deg: f64,
}

/// Landmark reliability configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum visibility for a landmark to be used geometrically (0.0-1.0)
    pub visibility_threshold: f64,
}

/// Calibration configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Maximum wrist/shoulder vertical offset accepted as a T-pose, in pixels
    pub t_pose_tolerance_px: f64,

    /// Stance width lower bound, in shoulder widths
    pub stance_width_min_factor: f64,

    /// Stance width upper bound, in shoulder widths
    pub stance_width_max_factor: f64,

    /// Shoulder alignment tolerance, in shoulder widths
    pub shoulder_alignment_factor: f64,

    /// Knee-over-ankle tolerance, in shoulder widths
    pub knee_alignment_factor: f64,

    /// Balance tolerance, in shoulder widths
    pub balance_factor: f64,

    /// Thresholds handed out before calibration
    pub default_thresholds: FeedbackThresholds,

    /// Where the calibration profile is persisted, if anywhere
    pub profile_path: Option<PathBuf>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            alignment_decay: ALIGNMENT_DECAY_PER_DEGREE,
            arm_symmetry_scale: ARM_SYMMETRY_SCALE,
            leg_symmetry_scale: LEG_SYMMETRY_SCALE,
            shoulder_height_scale: SHOULDER_HEIGHT_SCALE,
            alignment_weight: ALIGNMENT_WEIGHT,
            symmetry_weight: SYMMETRY_WEIGHT,
            tip_threshold_deg: TIP_THRESHOLD_DEG,
            symmetry_tip_threshold: SYMMETRY_TIP_THRESHOLD,
            max_tips: MAX_TIPS,
            cue_alignment_threshold: CUE_ALIGNMENT_THRESHOLD,
        }
    }
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            perfect_threshold_deg: PERFECT_THRESHOLD_DEG,
            rounding_step_deg: ADVICE_ROUNDING_STEP_DEG,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            t_pose_tolerance_px: T_POSE_TOLERANCE_PX,
            stance_width_min_factor: STANCE_WIDTH_MIN_FACTOR,
            stance_width_max_factor: STANCE_WIDTH_MAX_FACTOR,
            shoulder_alignment_factor: SHOULDER_ALIGNMENT_FACTOR,
            knee_alignment_factor: KNEE_ALIGNMENT_FACTOR,
            balance_factor: BALANCE_FACTOR,
            default_thresholds: FeedbackThresholds::default(),
            profile_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Create a comparator from configuration
    #[must_use]
    pub fn comparator(&self) -> PoseComparator {
        PoseComparator::new(self.scoring, self.advice_generator(), self.detection.visibility_threshold)
    }

    /// Create an advice generator from configuration
    #[must_use]
    pub fn advice_generator(&self) -> AdviceGenerator {
        AdviceGenerator::new(self.advice.perfect_threshold_deg, self.advice.rounding_step_deg)
    }

    /// Create a joint angle calculator from configuration
    #[must_use]
    pub fn angle_calculator(&self) -> JointAngleCalculator {
        JointAngleCalculator::new(self.detection.visibility_threshold)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;

        // Validate scoring parameters
        if scoring.alignment_decay < 0.0 {
            return Err(Error::ConfigError("Alignment decay must not be negative".to_string()));
        }
        if scoring.arm_symmetry_scale < 0.0 || scoring.leg_symmetry_scale < 0.0 || scoring.shoulder_height_scale < 0.0 {
            return Err(Error::ConfigError("Symmetry scales must not be negative".to_string()));
        }
        if !(0.0..=1.0).contains(&scoring.alignment_weight) || !(0.0..=1.0).contains(&scoring.symmetry_weight) {
            return Err(Error::ConfigError("Score weights must be between 0.0 and 1.0".to_string()));
        }
        if scoring.alignment_weight + scoring.symmetry_weight > 1.0 + f64::EPSILON {
            return Err(Error::ConfigError("Score weights must not sum to more than 1.0".to_string()));
        }
        if scoring.max_tips == 0 {
            return Err(Error::ConfigError("Maximum tips must be greater than 0".to_string()));
        }

        // Validate advice parameters
        if self.advice.perfect_threshold_deg < 0.0 {
            return Err(Error::ConfigError("Perfect threshold must not be negative".to_string()));
        }

        // Validate detection parameters
        if !(0.0..=1.0).contains(&self.detection.visibility_threshold) {
            return Err(Error::ConfigError(
                "Visibility threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        // Validate calibration parameters
        let calibration = &self.calibration;
        if calibration.t_pose_tolerance_px <= 0.0 {
            return Err(Error::ConfigError("T-pose tolerance must be greater than 0".to_string()));
        }
        if calibration.stance_width_min_factor > calibration.stance_width_max_factor {
            return Err(Error::ConfigError(
                "Stance width minimum factor must not exceed the maximum factor".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Pose Coach Configuration

# Score computation
scoring:
  alignment_decay: 2.0
  arm_symmetry_scale: 1.0
  leg_symmetry_scale: 1.0
  shoulder_height_scale: 500.0
  alignment_weight: 0.7
  symmetry_weight: 0.3
  tip_threshold_deg: 10.0
  symmetry_tip_threshold: 80.0
  max_tips: 3
  cue_alignment_threshold: 70.0

# Advice wording
advice:
  perfect_threshold_deg: 5.0
  rounding_step_deg: 5.0

# Landmark reliability
detection:
  visibility_threshold: 0.5

# Calibration wizard
calibration:
  t_pose_tolerance_px: 50.0
  stance_width_min_factor: 0.8
  stance_width_max_factor: 1.5
  shoulder_alignment_factor: 0.1
  knee_alignment_factor: 0.15
  balance_factor: 0.2
  default_thresholds:
    stance_width_min: 80.0
    stance_width_max: 150.0
    shoulder_alignment: 20.0
    knee_alignment: 30.0
    balance: 40.0
  profile_path: "user_calibration.json"
"#;
