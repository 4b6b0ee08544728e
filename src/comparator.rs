//! Pose comparison and scoring.
//!
//! [`PoseComparator::compare`] measures every configured joint triple on both
//! the user and the reference pose, then folds the deviations into an
//! alignment score, adds a bilateral symmetry score of the user pose alone,
//! and produces per-joint advice plus a short list of tips.
//!
//! The comparator holds only configuration. Calls share no mutable state, so a
//! single instance can be used from several detection threads at once.

use crate::{
    advice::AdviceGenerator,
    config::ScoringConfig,
    constants::{ALL_GOOD_TIP, DEFAULT_VISIBILITY_THRESHOLD, NO_POSE_TIP, SYMMETRY_TIP},
    joint_angles::JointTriple,
    landmarks::{Joint, LandmarkSet},
    pose_registry::PoseRegistry,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Deviation and advice for one joint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointFeedback {
    /// User angle minus reference angle, rounded to 0.1°
    pub delta_deg: f64,
    pub advice: String,
}

/// Outcome of one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Whether both poses were available
    pub pose_detected: bool,
    /// Overall match, 0-100
    pub score: f64,
    /// Angle agreement with the reference, 0-100
    pub alignment: f64,
    /// Left/right consistency of the user pose, 0-100
    pub symmetry: f64,
    /// Feedback keyed by the joint each angle is measured at
    pub per_joint: BTreeMap<Joint, JointFeedback>,
    /// Up to `max_tips` corrections, ready to display or speak
    pub top_tips: Vec<String>,
    /// Pose-level hints, filled when alignment is poor
    #[serde(default)]
    pub pose_cues: Vec<String>,
    /// Configured joints whose user landmark fell below the visibility threshold
    #[serde(default)]
    pub low_visibility: Vec<Joint>,
}

impl ComparisonResult {
    /// Result for a comparison where either pose is missing
    #[must_use]
    pub fn undetected() -> Self {
        Self {
            pose_detected: false,
            score: 0.0,
            alignment: 0.0,
            symmetry: 0.0,
            per_joint: BTreeMap::new(),
            top_tips: vec![NO_POSE_TIP.to_string()],
            pose_cues: Vec::new(),
            low_visibility: Vec::new(),
        }
    }
}

/// Compares a user pose against a reference pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseComparator {
    scoring: ScoringConfig,
    advice: AdviceGenerator,
    visibility_threshold: f64,
}

impl Default for PoseComparator {
    fn default() -> Self {
        Self::new(
            ScoringConfig::default(),
            AdviceGenerator::default(),
            DEFAULT_VISIBILITY_THRESHOLD,
        )
    }
}

impl PoseComparator {
    /// Create a comparator from scoring, advice and visibility settings
    #[must_use]
    pub const fn new(scoring: ScoringConfig, advice: AdviceGenerator, visibility_threshold: f64) -> Self {
        Self {
            scoring,
            advice,
            visibility_threshold,
        }
    }

    /// Scoring parameters in use
    #[must_use]
    pub const fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Compare `user` against `reference` over the given joint triples
    ///
    /// A missing or empty pose on either side yields
    /// [`ComparisonResult::undetected`], not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `joint_config` is empty
    /// - the two sets use different coordinate conventions
    /// - a configured joint is absent from either set
    pub fn compare(
        &self,
        user: Option<&LandmarkSet>,
        reference: Option<&LandmarkSet>,
        joint_config: &[JointTriple],
    ) -> Result<ComparisonResult> {
        if joint_config.is_empty() {
            return Err(Error::NoJointTriples);
        }

        let (user, reference) = match (user, reference) {
            (Some(user), Some(reference)) if !user.is_empty() && !reference.is_empty() => (user, reference),
            _ => {
                log::debug!("Pose missing from user or reference input; returning undetected result");
                return Ok(ComparisonResult::undetected());
            }
        };

        Self::check_spaces(user, reference)?;

        let mut per_joint = BTreeMap::new();
        let mut magnitudes = Vec::with_capacity(joint_config.len());
        let mut tips = Vec::new();

        for triple in joint_config {
            let user_angle = Self::measure(triple, user, "user")?;
            let reference_angle = Self::measure(triple, reference, "reference")?;

            let delta = user_angle - reference_angle;
            magnitudes.push(delta.abs());

            let advice = self.advice.advise(triple.vertex.name(), delta);
            if delta.abs() > self.scoring.tip_threshold_deg {
                tips.push(advice.clone());
            }

            // Repeated vertices keep the last triple's feedback
            per_joint.insert(
                triple.vertex,
                JointFeedback {
                    delta_deg: round_one_decimal(delta),
                    advice,
                },
            );
        }

        #[allow(clippy::cast_precision_loss)] // Triple counts are tiny
        let mean_deviation = magnitudes.iter().sum::<f64>() / magnitudes.len() as f64;
        let alignment = (100.0 - mean_deviation * self.scoring.alignment_decay).max(0.0);
        let symmetry = self.symmetry(user);
        let score = alignment * self.scoring.alignment_weight + symmetry * self.scoring.symmetry_weight;

        if symmetry < self.scoring.symmetry_tip_threshold {
            tips.push(SYMMETRY_TIP.to_string());
        }
        tips.truncate(self.scoring.max_tips);
        if tips.is_empty() {
            tips.push(ALL_GOOD_TIP.to_string());
        }

        let low_visibility = self.low_visibility_joints(user, joint_config);
        if !low_visibility.is_empty() {
            log::warn!("Low-visibility joints used in comparison: {:?}", low_visibility);
        }

        log::debug!(
            "Compared {} joint triples: score {:.1}, alignment {:.1}, symmetry {:.1}",
            joint_config.len(),
            score,
            alignment,
            symmetry
        );

        Ok(ComparisonResult {
            pose_detected: true,
            score: round_one_decimal(score),
            alignment: round_one_decimal(alignment),
            symmetry: round_one_decimal(symmetry),
            per_joint,
            top_tips: tips,
            pose_cues: Vec::new(),
            low_visibility,
        })
    }

    /// Compare against a pose looked up in `registry`, attaching its cues
    /// when alignment is below the cue threshold
    ///
    /// # Errors
    ///
    /// Returns an error if the pose is unknown or has no triples, or for any
    /// reason [`PoseComparator::compare`] fails
    pub fn compare_pose(
        &self,
        registry: &PoseRegistry,
        pose_name: &str,
        user: Option<&LandmarkSet>,
        reference: Option<&LandmarkSet>,
    ) -> Result<ComparisonResult> {
        let entry = registry.entry(pose_name)?;
        if entry.triples.is_empty() {
            return Err(Error::EmptyJointConfig(pose_name.to_string()));
        }

        let mut result = self.compare(user, reference, &entry.triples)?;
        if result.pose_detected && result.alignment < self.scoring.cue_alignment_threshold {
            result.pose_cues.clone_from(&entry.cues);
        }
        Ok(result)
    }

    /// Bilateral symmetry of a single pose, 0-100
    ///
    /// Averages the arm angle, leg angle and shoulder height sub-scores that
    /// can be measured; a pose with none of them scores 0.
    #[must_use]
    pub fn symmetry(&self, set: &LandmarkSet) -> f64 {
        let arm = Self::pair_angles(set, ARM_TRIPLES)
            .map(|(left, right)| sub_score((left - right).abs(), self.scoring.arm_symmetry_scale));
        let leg = Self::pair_angles(set, LEG_TRIPLES)
            .map(|(left, right)| sub_score((left - right).abs(), self.scoring.leg_symmetry_scale));
        let shoulders = set
            .normalized_y(Joint::LeftShoulder)
            .zip(set.normalized_y(Joint::RightShoulder))
            .map(|(left, right)| sub_score((left - right).abs(), self.scoring.shoulder_height_scale));

        let scores: Vec<f64> = [arm, leg, shoulders].into_iter().flatten().collect();
        if scores.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(0.0, 100.0)
    }

    fn pair_angles(set: &LandmarkSet, [left, right]: [JointTriple; 2]) -> Option<(f64, f64)> {
        left.raw_angle(set).zip(right.raw_angle(set))
    }

    fn measure(triple: &JointTriple, set: &LandmarkSet, which: &str) -> Result<f64> {
        if let Some(joint) = triple.first_missing(set) {
            return Err(Error::MissingJoint {
                joint: joint.name().to_string(),
                set: which.to_string(),
            });
        }
        triple.raw_angle(set).ok_or_else(|| Error::MissingJoint {
            joint: triple.vertex.name().to_string(),
            set: which.to_string(),
        })
    }

    /// Both sets must share a convention; pixel sets may come from different
    /// frames since each is measured in its own space
    fn check_spaces(user: &LandmarkSet, reference: &LandmarkSet) -> Result<()> {
        let (user_space, reference_space) = (user.space(), reference.space());
        if user_space.is_compatible(&reference_space) {
            Ok(())
        } else {
            Err(Error::CoordinateSpaceMismatch {
                user: user_space.to_string(),
                reference: reference_space.to_string(),
            })
        }
    }

    fn low_visibility_joints(&self, user: &LandmarkSet, joint_config: &[JointTriple]) -> Vec<Joint> {
        joint_config
            .iter()
            .flat_map(JointTriple::joints)
            .filter(|joint| {
                user.get(*joint)
                    .is_some_and(|landmark| !landmark.is_visible(self.visibility_threshold))
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

const ARM_TRIPLES: [JointTriple; 2] = [
    JointTriple::new(Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist),
    JointTriple::new(Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist),
];

const LEG_TRIPLES: [JointTriple; 2] = [
    JointTriple::new(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle),
    JointTriple::new(Joint::RightHip, Joint::RightKnee, Joint::RightAnkle),
];

fn sub_score(difference: f64, scale: f64) -> f64 {
    (100.0 - difference * scale).max(0.0)
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
