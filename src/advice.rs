//! Turns a signed angle deviation into a short corrective directive.
//!
//! The verb depends on the joint family and the sign of `user - reference`.
//! The families are matched by substring on the joint name, so custom joint
//! labels such as `front_knee` still resolve.

use crate::constants::{ADVICE_ROUNDING_STEP_DEG, PERFECT_THRESHOLD_DEG};

/// Groups of joints sharing a correction vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointFamily {
    /// Elbows and knees: hinge joints
    Hinge,
    /// Shoulders and hips
    Girdle,
    /// Wrists and ankles
    Extremity,
    Other,
}

impl JointFamily {
    #[must_use]
    pub fn of(joint_name: &str) -> Self {
        let name = joint_name.to_lowercase();
        if name.contains("elbow") || name.contains("knee") {
            Self::Hinge
        } else if name.contains("shoulder") || name.contains("hip") {
            Self::Girdle
        } else if name.contains("wrist") || name.contains("ankle") {
            Self::Extremity
        } else {
            Self::Other
        }
    }

    /// Verb for a deviation of the given sign
    #[must_use]
    pub const fn verb(self, delta_positive: bool) -> &'static str {
        match (self, delta_positive) {
            (Self::Hinge, true) => "Straighten",
            (Self::Hinge, false) => "Bend",
            (Self::Girdle, true) => "Lower",
            (Self::Girdle, false) => "Raise",
            (Self::Extremity, true) => "Adjust down",
            (Self::Extremity, false) => "Adjust up",
            (Self::Other, _) => "Adjust",
        }
    }
}

/// Advice text generator with tunable thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdviceGenerator {
    perfect_threshold: f64,
    rounding_step: f64,
}

impl Default for AdviceGenerator {
    fn default() -> Self {
        Self::new(PERFECT_THRESHOLD_DEG, ADVICE_ROUNDING_STEP_DEG)
    }
}

impl AdviceGenerator {
    #[must_use]
    pub const fn new(perfect_threshold: f64, rounding_step: f64) -> Self {
        Self {
            perfect_threshold,
            rounding_step,
        }
    }

    /// Directive for `joint_name` deviating by `delta_deg` (user minus reference)
    #[must_use]
    pub fn advise(&self, joint_name: &str, delta_deg: f64) -> String {
        let display = joint_name.replace('_', " ");
        let magnitude = delta_deg.abs();

        if magnitude < self.perfect_threshold {
            return format!("Perfect {display}");
        }

        let verb = JointFamily::of(joint_name).verb(delta_deg > 0.0);
        format!("{verb} {display} {:.0}°", self.round_for_display(magnitude))
    }

    /// Round a magnitude to the nearest display step
    #[must_use]
    pub fn round_for_display(&self, magnitude: f64) -> f64 {
        if self.rounding_step <= 0.0 {
            return magnitude.round();
        }
        (magnitude / self.rounding_step).round() * self.rounding_step
    }
}

/// Directive using the default thresholds
#[must_use]
pub fn advice(joint_name: &str, delta_deg: f64) -> String {
    AdviceGenerator::default().advise(joint_name, delta_deg)
}
