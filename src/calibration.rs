//! User calibration wizard.
//!
//! A [`CalibrationSession`] owns one user's [`CalibrationProfile`] and walks it
//! through three captures (neutral stance, T-pose, front stance) before
//! finalizing. Capture problems come back as a failed [`StepOutcome`] so the
//! wizard can simply ask the user to try again; only persistence I/O returns
//! an `Err`.
//!
//! The session is single-owner state. Share it across threads behind a mutex
//! or hand it over through a channel.

use crate::{
    config::CalibrationConfig,
    constants::{
        DEFAULT_BALANCE, DEFAULT_KNEE_ALIGNMENT, DEFAULT_SHOULDER_ALIGNMENT, DEFAULT_STANCE_WIDTH_MAX,
        DEFAULT_STANCE_WIDTH_MIN, DEFAULT_VISIBILITY_THRESHOLD,
    },
    geometry::Point,
    landmarks::{FrameSize, Joint, LandmarkSet},
    Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Progress through the calibration sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationStage {
    #[default]
    Uncalibrated,
    NeutralCaptured,
    TPoseCaptured,
    FrontStanceCaptured,
    Calibrated,
}

/// What the wizard should ask for next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationAction {
    CaptureNeutral,
    CaptureTPose,
    CaptureFrontStance,
    Finalize,
}

/// Leg placed forward in the front stance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegSide {
    Left,
    Right,
}

impl fmt::Display for LegSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Body measurements in pixels, filled in step by step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationProfile {
    pub shoulder_width: Option<f64>,
    pub hip_width: Option<f64>,
    pub arm_span: Option<f64>,
    /// Nose to ankle midpoint
    pub body_height_px: Option<f64>,
    pub stance_width: Option<f64>,
    pub stance_length: Option<f64>,
    pub preferred_front_leg: Option<LegSide>,
    pub frame_size: Option<FrameSize>,
    pub shoulder_to_height_ratio: Option<f64>,
    pub calibrated: bool,
}

impl CalibrationProfile {
    /// Load a profile from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the profile as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    #[must_use]
    pub fn summary(&self) -> CalibrationSummary {
        CalibrationSummary {
            shoulder_width: self.shoulder_width,
            arm_span: self.arm_span,
            preferred_front_leg: self.preferred_front_leg,
            stance_width: self.stance_width,
        }
    }
}

/// Short report of the key measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSummary {
    pub shoulder_width: Option<f64>,
    pub arm_span: Option<f64>,
    pub preferred_front_leg: Option<LegSide>,
    pub stance_width: Option<f64>,
}

impl fmt::Display for CalibrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let px = |value: Option<f64>| value.map_or_else(|| "unknown".to_string(), |v| format!("{v:.0} pixels"));
        write!(
            f,
            "shoulder width: {}, arm span: {}, preferred front leg: {}, stance width: {}",
            px(self.shoulder_width),
            px(self.arm_span),
            self.preferred_front_leg
                .map_or_else(|| "unknown".to_string(), |leg| leg.to_string()),
            px(self.stance_width)
        )
    }
}

/// Distances used by stance and alignment heuristics, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    pub stance_width_min: f64,
    pub stance_width_max: f64,
    pub shoulder_alignment: f64,
    pub knee_alignment: f64,
    pub balance: f64,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            stance_width_min: DEFAULT_STANCE_WIDTH_MIN,
            stance_width_max: DEFAULT_STANCE_WIDTH_MAX,
            shoulder_alignment: DEFAULT_SHOULDER_ALIGNMENT,
            knee_alignment: DEFAULT_KNEE_ALIGNMENT,
            balance: DEFAULT_BALANCE,
        }
    }
}

/// Result of one wizard step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub success: bool,
    /// Stage after the step ran
    pub stage: CalibrationStage,
    /// Instruction or error text for the user
    pub message: String,
    pub next_action: Option<CalibrationAction>,
}

impl StepOutcome {
    fn failure(stage: CalibrationStage, message: impl Into<String>) -> Self {
        Self {
            success: false,
            stage,
            message: message.into(),
            next_action: None,
        }
    }
}

/// One user's calibration wizard
#[derive(Debug, Clone)]
pub struct CalibrationSession {
    profile: CalibrationProfile,
    stage: CalibrationStage,
    config: CalibrationConfig,
    visibility_threshold: f64,
}

impl Default for CalibrationSession {
    fn default() -> Self {
        Self::new(CalibrationConfig::default(), DEFAULT_VISIBILITY_THRESHOLD)
    }
}

impl CalibrationSession {
    /// Fresh, uncalibrated session. Performs no I/O.
    #[must_use]
    pub fn new(config: CalibrationConfig, visibility_threshold: f64) -> Self {
        Self {
            profile: CalibrationProfile::default(),
            stage: CalibrationStage::Uncalibrated,
            config,
            visibility_threshold,
        }
    }

    /// Session resuming an existing profile
    #[must_use]
    pub fn with_profile(profile: CalibrationProfile, config: CalibrationConfig, visibility_threshold: f64) -> Self {
        let stage = if profile.calibrated {
            CalibrationStage::Calibrated
        } else {
            CalibrationStage::Uncalibrated
        };
        Self {
            profile,
            stage,
            config,
            visibility_threshold,
        }
    }

    /// Open a session, loading the persisted profile if one exists
    ///
    /// # Errors
    ///
    /// Returns an error if a profile file exists but cannot be read or parsed
    pub fn start(config: CalibrationConfig, visibility_threshold: f64) -> Result<Self> {
        match config.profile_path.as_deref() {
            Some(path) if path.exists() => {
                let profile = CalibrationProfile::load(path)?;
                log::info!("Loaded calibration profile from {}", path.display());
                Ok(Self::with_profile(profile, config, visibility_threshold))
            }
            _ => Ok(Self::new(config, visibility_threshold)),
        }
    }

    #[must_use]
    pub const fn stage(&self) -> CalibrationStage {
        self.stage
    }

    #[must_use]
    pub const fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        self.profile.calibrated
    }

    #[must_use]
    pub fn profile_path(&self) -> Option<&Path> {
        self.config.profile_path.as_deref()
    }

    /// First instruction of the sequence
    #[must_use]
    pub fn begin(&self) -> StepOutcome {
        StepOutcome {
            success: true,
            stage: self.stage,
            message: "Stand in a relaxed neutral position with arms at your sides".to_string(),
            next_action: Some(CalibrationAction::CaptureNeutral),
        }
    }

    /// Step 1: shoulder width, hip width and body height
    pub fn capture_neutral(&mut self, landmarks: Option<&LandmarkSet>, frame: FrameSize) -> StepOutcome {
        let points = match self.points(
            landmarks,
            frame,
            CalibrationStage::Uncalibrated,
            &[
                Joint::Nose,
                Joint::LeftShoulder,
                Joint::RightShoulder,
                Joint::LeftHip,
                Joint::RightHip,
                Joint::LeftAnkle,
                Joint::RightAnkle,
            ],
        ) {
            Ok(points) => points,
            Err(outcome) => return outcome,
        };
        let [nose, left_shoulder, right_shoulder, left_hip, right_hip, left_ankle, right_ankle] = points[..] else {
            return StepOutcome::failure(self.stage, "No pose detected");
        };

        let ankle_y = (left_ankle.y + right_ankle.y) / 2.0;
        self.profile.shoulder_width = Some((left_shoulder.x - right_shoulder.x).abs());
        self.profile.hip_width = Some((left_hip.x - right_hip.x).abs());
        self.profile.body_height_px = Some(ankle_y - nose.y);
        self.profile.frame_size = Some(frame);

        self.advance(
            CalibrationStage::NeutralCaptured,
            "Great! Now extend both arms out to your sides (T-pose)",
            CalibrationAction::CaptureTPose,
        )
    }

    /// Step 2: arm span, only accepted with both wrists level with the shoulders
    pub fn capture_t_pose(&mut self, landmarks: Option<&LandmarkSet>, frame: FrameSize) -> StepOutcome {
        let points = match self.points(
            landmarks,
            frame,
            CalibrationStage::NeutralCaptured,
            &[Joint::LeftWrist, Joint::RightWrist, Joint::LeftShoulder, Joint::RightShoulder],
        ) {
            Ok(points) => points,
            Err(outcome) => return outcome,
        };
        let [left_wrist, right_wrist, left_shoulder, right_shoulder] = points[..] else {
            return StepOutcome::failure(self.stage, "No pose detected");
        };

        let tolerance = self.config.t_pose_tolerance_px;
        let left_level = (left_wrist.y - left_shoulder.y).abs() < tolerance;
        let right_level = (right_wrist.y - right_shoulder.y).abs() < tolerance;
        if !(left_level && right_level) {
            log::warn!("T-pose rejected: wrists not level with shoulders");
            return StepOutcome::failure(
                self.stage,
                "Please extend both arms out to your sides parallel to the ground",
            );
        }

        self.profile.arm_span = Some((left_wrist.x - right_wrist.x).abs());

        self.advance(
            CalibrationStage::TPoseCaptured,
            "Perfect! Now perform your best front stance",
            CalibrationAction::CaptureFrontStance,
        )
    }

    /// Step 3: stance width/length and which leg is forward
    pub fn capture_front_stance(&mut self, landmarks: Option<&LandmarkSet>, frame: FrameSize) -> StepOutcome {
        let points = match self.points(
            landmarks,
            frame,
            CalibrationStage::TPoseCaptured,
            &[Joint::LeftAnkle, Joint::RightAnkle],
        ) {
            Ok(points) => points,
            Err(outcome) => return outcome,
        };
        let [left_ankle, right_ankle] = points[..] else {
            return StepOutcome::failure(self.stage, "No pose detected");
        };

        self.profile.stance_width = Some((left_ankle.x - right_ankle.x).abs());
        self.profile.stance_length = Some((left_ankle.y - right_ankle.y).abs());
        // Larger y is nearer the camera, i.e. forward
        self.profile.preferred_front_leg = Some(if left_ankle.y > right_ankle.y {
            LegSide::Left
        } else {
            LegSide::Right
        });

        self.advance(
            CalibrationStage::FrontStanceCaptured,
            "Excellent! Calibration complete.",
            CalibrationAction::Finalize,
        )
    }

    /// Mark the profile calibrated, derive ratios and persist it
    ///
    /// Runs from any stage; measurements from skipped steps stay empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be written to `profile_path`
    pub fn finalize(&mut self) -> Result<StepOutcome> {
        self.profile.calibrated = true;
        self.profile.shoulder_to_height_ratio = match (self.profile.shoulder_width, self.profile.body_height_px) {
            (Some(width), Some(height)) if height > 0.0 => Some(width / height),
            _ => None,
        };
        self.stage = CalibrationStage::Calibrated;

        if let Some(path) = self.config.profile_path.as_deref() {
            self.profile.save(path)?;
            log::info!("Saved calibration profile to {}", path.display());
        }

        let summary = self.profile.summary();
        log::info!("Calibration finalized: {}", summary);

        Ok(StepOutcome {
            success: true,
            stage: self.stage,
            message: format!("Calibration completed successfully! {summary}"),
            next_action: None,
        })
    }

    /// Discard all measurements and delete the persisted profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile file exists but cannot be removed
    pub fn reset(&mut self) -> Result<()> {
        self.profile = CalibrationProfile::default();
        self.stage = CalibrationStage::Uncalibrated;

        if let Some(path) = self.config.profile_path.as_deref() {
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
        log::info!("Calibration reset");
        Ok(())
    }

    /// Thresholds scaled to the calibrated shoulder width, or the default table
    #[must_use]
    pub fn personalized_thresholds(&self) -> FeedbackThresholds {
        match (self.profile.calibrated, self.profile.shoulder_width) {
            (true, Some(width)) => FeedbackThresholds {
                stance_width_min: width * self.config.stance_width_min_factor,
                stance_width_max: width * self.config.stance_width_max_factor,
                shoulder_alignment: width * self.config.shoulder_alignment_factor,
                knee_alignment: width * self.config.knee_alignment_factor,
                balance: width * self.config.balance_factor,
            },
            _ => self.config.default_thresholds,
        }
    }

    /// Persist the current profile to `path`, independent of the configured store
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        self.profile.save(&path)?;
        Ok(path.as_ref().to_path_buf())
    }

    /// Pixel positions of `joints` in order, or the failure to report
    fn points(
        &self,
        landmarks: Option<&LandmarkSet>,
        frame: FrameSize,
        required_stage: CalibrationStage,
        joints: &[Joint],
    ) -> std::result::Result<Vec<Point>, StepOutcome> {
        if self.stage < required_stage {
            log::warn!("Calibration step called out of order at stage {:?}", self.stage);
            let message = match required_stage {
                CalibrationStage::NeutralCaptured => "Capture the neutral pose first",
                _ => "Capture the T-pose first",
            };
            return Err(StepOutcome::failure(self.stage, message));
        }

        let landmarks = match landmarks {
            Some(set) if !set.is_empty() => set.to_pixels(frame),
            _ => return Err(StepOutcome::failure(self.stage, "No pose detected")),
        };

        joints
            .iter()
            .map(|&joint| landmarks.visible_point(joint, self.visibility_threshold))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| StepOutcome::failure(self.stage, "Make sure your full body is visible to the camera"))
    }

    fn advance(&mut self, stage: CalibrationStage, message: &str, next: CalibrationAction) -> StepOutcome {
        // Re-running an earlier step restarts the sequence from there
        self.stage = stage;
        self.profile.calibrated = false;
        log::info!("Calibration advanced to {:?}", stage);

        StepOutcome {
            success: true,
            stage,
            message: message.to_string(),
            next_action: Some(next),
        }
    }
}
