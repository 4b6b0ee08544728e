//! Heuristic stance and kick scoring in pixel space.
//!
//! These scores complement the angle comparison: they judge a single pose
//! against fixed martial-arts targets rather than against a reference, and
//! they consume the [`FeedbackThresholds`] produced by calibration.

use crate::{
    calibration::{FeedbackThresholds, LegSide},
    constants::{DEFAULT_ASPECT_WEIGHT, FRONT_STANCE_MIN_DEPTH_PX, HIP_ROTATION_MIN_PX, HORSE_STANCE_KNEE_TARGET_DEG},
    geometry::{angle, slope_angle, Point},
    landmarks::{FrameSize, Joint, LandmarkSet},
    Error,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Stance variants with their ideal ankle spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StanceType {
    #[default]
    Front,
    Horse,
    Back,
}

impl StanceType {
    /// Ideal ankle spacing in shoulder widths
    #[must_use]
    pub const fn width_ratio(self) -> f64 {
        match self {
            Self::Front => 1.0,
            Self::Horse => 1.8,
            Self::Back => 1.2,
        }
    }
}

/// Target height band for a kick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KickHeight {
    Low,
    #[default]
    Middle,
    High,
}

impl KickHeight {
    /// Accepted knee-above-hip range in pixels
    #[must_use]
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::Low => (-50.0, 0.0),
            Self::Middle => (0.0, 80.0),
            Self::High => (80.0, 150.0),
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Middle => "middle",
            Self::High => "high",
        }
    }
}

/// Outcome of [`kick_height`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KickHeightAnalysis {
    pub height_score: f64,
    /// Positive when the knee is above the hip
    pub knee_hip_difference: f64,
    pub feedback: String,
    pub target: KickHeight,
}

/// Shoulder and hip levelness plus their parallelism, 0-100
#[must_use]
pub fn body_alignment_score(left_shoulder: Point, right_shoulder: Point, left_hip: Point, right_hip: Point) -> f64 {
    let shoulder_diff = (left_shoulder.y - right_shoulder.y).abs();
    let hip_diff = (left_hip.y - right_hip.y).abs();
    let slope_diff = (slope_angle(left_shoulder, right_shoulder) - slope_angle(left_hip, right_hip)).abs();

    let shoulder_score = (100.0 - shoulder_diff * 2.0).max(0.0);
    let hip_score = (100.0 - hip_diff * 2.0).max(0.0);
    let parallelism_score = (100.0 - slope_diff * 5.0).max(0.0);

    (shoulder_score * 0.4 + hip_score * 0.4 + parallelism_score * 0.2).clamp(0.0, 100.0)
}

/// How close the ankle spacing is to the stance's ideal, 0-100
#[must_use]
pub fn stance_width_score(left_ankle: Point, right_ankle: Point, shoulder_width: f64, stance: StanceType) -> f64 {
    let ideal = shoulder_width * stance.width_ratio();
    if ideal <= 0.0 {
        return 0.0;
    }
    let actual = (left_ankle.x - right_ankle.x).abs();
    (100.0 - (actual - ideal).abs() / ideal * 100.0).max(0.0)
}

/// Knee-over-ankle score; the penalty steepens past `tolerance` pixels
#[must_use]
pub fn knee_alignment_score(knee: Point, ankle: Point, tolerance: f64) -> f64 {
    let horizontal = (knee.x - ankle.x).abs();
    let score = if tolerance > 0.0 && horizontal <= tolerance {
        100.0 - horizontal / tolerance * 30.0
    } else {
        70.0 - ((horizontal - tolerance.max(0.0)) * 2.0).min(70.0)
    };
    score.max(0.0)
}

/// Knee angle against a target, 0-100
#[must_use]
pub fn leg_angle_score(hip: Point, knee: Point, ankle: Point, target_deg: f64, tolerance_deg: f64) -> f64 {
    let diff = (angle(hip, knee, ankle) - target_deg).abs();
    let score = if tolerance_deg > 0.0 && diff <= tolerance_deg {
        100.0 - diff / tolerance_deg * 20.0
    } else {
        80.0 - ((diff - tolerance_deg.max(0.0)) * 3.0).min(80.0)
    };
    score.max(0.0)
}

/// Knee height relative to the hip for the given target band
#[must_use]
pub fn kick_height(kicking_knee: Point, kicking_hip: Point, target: KickHeight) -> KickHeightAnalysis {
    // Image y grows downward
    let diff = kicking_hip.y - kicking_knee.y;
    let (min, max) = target.range();
    let label = target.label();

    let (height_score, feedback) = if diff < min {
        ((100.0 - (min - diff) * 2.0).max(0.0), format!("Lift knee higher for {label} kick"))
    } else if diff > max {
        ((100.0 - (diff - max) * 1.5).max(0.0), format!("Lower knee slightly for {label} kick"))
    } else {
        (100.0, format!("Perfect {label} kick height"))
    };

    KickHeightAnalysis {
        height_score,
        knee_hip_difference: diff,
        feedback,
        target,
    }
}

/// Horizontal stacking of shoulder, hip and ankle centers, 0-100
#[must_use]
pub fn balance_score(
    left_shoulder: Point,
    right_shoulder: Point,
    left_hip: Point,
    right_hip: Point,
    left_ankle: Point,
    right_ankle: Point,
) -> f64 {
    let shoulder_center = left_shoulder.midpoint(right_shoulder);
    let hip_center = left_hip.midpoint(right_hip);
    let ankle_center = left_ankle.midpoint(right_ankle);

    let drift = (shoulder_center.x - hip_center.x).abs() + (hip_center.x - ankle_center.x).abs();
    (100.0 - drift * 0.5).max(0.0)
}

/// Pixel positions of the joints used by the heuristics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPoints {
    pub left_shoulder: Point,
    pub right_shoulder: Point,
    pub left_hip: Point,
    pub right_hip: Point,
    pub left_knee: Point,
    pub right_knee: Point,
    pub left_ankle: Point,
    pub right_ankle: Point,
}

impl BodyPoints {
    /// Extract pixel positions; `None` if any required joint is missing or occluded
    #[must_use]
    pub fn from_landmarks(set: &LandmarkSet, frame: FrameSize, visibility_threshold: f64) -> Option<Self> {
        let pixels = set.to_pixels(frame);
        let point = |joint| pixels.visible_point(joint, visibility_threshold);
        Some(Self {
            left_shoulder: point(Joint::LeftShoulder)?,
            right_shoulder: point(Joint::RightShoulder)?,
            left_hip: point(Joint::LeftHip)?,
            right_hip: point(Joint::RightHip)?,
            left_knee: point(Joint::LeftKnee)?,
            right_knee: point(Joint::RightKnee)?,
            left_ankle: point(Joint::LeftAnkle)?,
            right_ankle: point(Joint::RightAnkle)?,
        })
    }

    #[must_use]
    pub fn shoulder_width(&self) -> f64 {
        (self.left_shoulder.x - self.right_shoulder.x).abs()
    }

    /// Leg nearer the camera, judged by ankle height in the frame
    #[must_use]
    pub fn front_leg(&self) -> LegSide {
        if self.left_ankle.y > self.right_ankle.y {
            LegSide::Left
        } else {
            LegSide::Right
        }
    }
}

/// Front stance leg scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontStanceScores {
    pub front_leg: LegSide,
    /// Front knee near 170°
    pub front_leg_straightness: f64,
    /// Back knee near 135°
    pub back_leg_bend: f64,
}

#[must_use]
pub fn front_stance_scores(points: &BodyPoints) -> FrontStanceScores {
    let left = angle(points.left_hip, points.left_knee, points.left_ankle);
    let right = angle(points.right_hip, points.right_knee, points.right_ankle);
    let front_leg = points.front_leg();
    let (front, back) = match front_leg {
        LegSide::Left => (left, right),
        LegSide::Right => (right, left),
    };

    FrontStanceScores {
        front_leg,
        front_leg_straightness: (100.0 - (170.0 - front).abs() * 2.0).max(0.0),
        back_leg_bend: (100.0 - (135.0 - back).abs() * 3.0).max(0.0),
    }
}

/// Horse stance leg scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorseStanceScores {
    pub left_leg_bend: f64,
    pub right_leg_bend: f64,
    /// Both knees bent by the same amount
    pub leg_symmetry: f64,
}

#[must_use]
pub fn horse_stance_scores(points: &BodyPoints) -> HorseStanceScores {
    let left = angle(points.left_hip, points.left_knee, points.left_ankle);
    let right = angle(points.right_hip, points.right_knee, points.right_ankle);
    let bend = |knee: f64| (100.0 - (HORSE_STANCE_KNEE_TARGET_DEG - knee).abs() * 2.0).max(0.0);

    HorseStanceScores {
        left_leg_bend: bend(left),
        right_leg_bend: bend(right),
        leg_symmetry: (100.0 - (left - right).abs() * 5.0).max(0.0),
    }
}

/// Roundhouse kick scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundhouseKickScores {
    /// Leg whose knee is higher relative to its hip
    pub kicking_leg: LegSide,
    pub knee_lift: f64,
    /// Standing knee near 170°
    pub standing_leg_stability: f64,
}

#[must_use]
pub fn roundhouse_kick_scores(points: &BodyPoints) -> RoundhouseKickScores {
    // Image y grows downward
    let left_height = points.left_hip.y - points.left_knee.y;
    let right_height = points.right_hip.y - points.right_knee.y;

    let (kicking_leg, lift, standing) = if left_height > right_height {
        (
            LegSide::Left,
            left_height,
            angle(points.right_hip, points.right_knee, points.right_ankle),
        )
    } else {
        (
            LegSide::Right,
            right_height,
            angle(points.left_hip, points.left_knee, points.left_ankle),
        )
    };

    RoundhouseKickScores {
        kicking_leg,
        knee_lift: (lift * 2.0).clamp(0.0, 100.0),
        standing_leg_stability: (100.0 - (170.0 - standing).abs() * 2.0).max(0.0),
    }
}

/// Moves with dedicated scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    #[default]
    General,
    FrontStance,
    HorseStance,
    RoundhouseKick,
}

impl MoveType {
    pub const ALL: [Self; 4] = [Self::General, Self::FrontStance, Self::HorseStance, Self::RoundhouseKick];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::FrontStance => "front_stance",
            Self::HorseStance => "horse_stance",
            Self::RoundhouseKick => "roundhouse_kick",
        }
    }

    /// Stance whose width ratio the move is judged against
    #[must_use]
    pub const fn stance(self) -> StanceType {
        match self {
            Self::HorseStance => StanceType::Horse,
            _ => StanceType::Front,
        }
    }

    /// What a coach watches for in this move
    #[must_use]
    pub const fn key_aspects(self) -> &'static [&'static str] {
        match self {
            Self::General => &[],
            Self::FrontStance => &["leg positioning", "weight distribution", "posture"],
            Self::HorseStance => &["thigh parallel", "back straight", "weight distribution"],
            Self::RoundhouseKick => &["knee lift", "hip rotation", "balance"],
        }
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MoveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == key)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown move type: {s}")))
    }
}

/// Practitioner level; higher levels need higher scores for praise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// `(good, excellent)` score thresholds
    #[must_use]
    pub const fn bands(self) -> (f64, f64) {
        match self {
            Self::Beginner => (60.0, 80.0),
            Self::Intermediate => (70.0, 85.0),
            Self::Advanced => (80.0, 90.0),
        }
    }

    /// Next training step given the mean aspect score
    #[must_use]
    pub fn progression(self, average: f64) -> &'static str {
        let tier = if average >= 80.0 {
            2
        } else if average >= 60.0 {
            1
        } else {
            0
        };
        match (self, tier) {
            (Self::Beginner, 2) => "Try practicing horse stance or basic kicks",
            (Self::Beginner, 1) => "Continue practicing basic stances with focus on form",
            (Self::Beginner, _) => "Focus on basic posture and body alignment first",
            (Self::Intermediate, 2) => "Ready for combination techniques and sparring drills",
            (Self::Intermediate, 1) => "Practice advanced stances and kicks",
            (Self::Intermediate, _) => "Return to fundamentals and build consistency",
            (Self::Advanced, 2) => "Focus on speed, power, and competition techniques",
            (Self::Advanced, 1) => "Work on technique refinement and teaching others",
            (Self::Advanced, _) => "Review fundamentals and focus on precision",
        }
    }
}

impl FromStr for SkillLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(Error::InvalidInput(format!("Unknown skill level: {s}"))),
        }
    }
}

/// Level a performance suggests, from the mean aspect score
#[must_use]
pub fn difficulty_assessment(average: f64) -> &'static str {
    if average >= 85.0 {
        "Ready for advanced techniques"
    } else if average >= 70.0 {
        "Intermediate level performance"
    } else if average >= 50.0 {
        "Beginner to intermediate"
    } else {
        "Focus on fundamentals"
    }
}

/// A scored facet of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    BodyAlignment,
    StanceWidth,
    LeftKneeAlignment,
    RightKneeAlignment,
    FrontLegStraightness,
    BackLegBend,
    LeftLegBend,
    RightLegBend,
    LegSymmetry,
    KneeLift,
    StandingLegStability,
}

impl Aspect {
    /// Human-readable name, e.g. "body alignment"
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BodyAlignment => "body alignment",
            Self::StanceWidth => "stance width",
            Self::LeftKneeAlignment => "left knee alignment",
            Self::RightKneeAlignment => "right knee alignment",
            Self::FrontLegStraightness => "front leg straightness",
            Self::BackLegBend => "back leg bend",
            Self::LeftLegBend => "left leg bend",
            Self::RightLegBend => "right leg bend",
            Self::LegSymmetry => "leg symmetry",
            Self::KneeLift => "knee lift",
            Self::StandingLegStability => "standing leg stability",
        }
    }

    /// Share of the overall score
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::BodyAlignment => 0.25,
            Self::StanceWidth | Self::KneeLift => 0.20,
            Self::LeftKneeAlignment | Self::RightKneeAlignment | Self::StandingLegStability => 0.15,
            Self::FrontLegStraightness | Self::BackLegBend => 0.10,
            Self::LeftLegBend | Self::RightLegBend | Self::LegSymmetry => DEFAULT_ASPECT_WEIGHT,
        }
    }

    /// What to change when this aspect scores below the good band
    #[must_use]
    pub fn correction(self) -> String {
        let text = match self {
            Self::BodyAlignment => "Keep your shoulders level and hips square",
            Self::StanceWidth => "Adjust your stance width - check your feet positioning",
            Self::LeftKneeAlignment => "Align your left knee over your ankle",
            Self::RightKneeAlignment => "Align your right knee over your ankle",
            Self::FrontLegStraightness => "Keep your front leg straighter",
            Self::BackLegBend => "Bend your back leg more for stability",
            Self::KneeLift => "Lift your kicking knee higher",
            Self::StandingLegStability => "Keep your standing leg strong and stable",
            Self::LeftLegBend | Self::RightLegBend | Self::LegSymmetry => {
                return format!("Work on improving your {}", self.label());
            }
        };
        text.to_string()
    }
}

/// Weighted mean of aspect scores; 0 for an empty map
#[must_use]
pub fn overall_score(scores: &BTreeMap<Aspect, f64>) -> f64 {
    let (weighted, total) = scores
        .iter()
        .fold((0.0, 0.0), |(sum, total), (aspect, score)| {
            (sum + score * aspect.weight(), total + aspect.weight())
        });
    if total > 0.0 {
        weighted / total
    } else {
        0.0
    }
}

/// Full verdict on one move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveAnalysis {
    pub move_type: MoveType,
    pub level: SkillLevel,
    /// Weighted by [`Aspect::weight`], 0-100
    pub overall_score: f64,
    pub scores: BTreeMap<Aspect, f64>,
    /// Aspects at or above the excellent band
    pub positive_feedback: Vec<String>,
    /// Aspects in the good band
    pub improvement_areas: Vec<String>,
    /// Aspects below the good band
    pub specific_corrections: Vec<String>,
    pub key_aspects: Vec<String>,
    pub observations: Vec<String>,
    pub difficulty: String,
    pub progression: String,
}

/// Summary scores driving [`feedback_from_scores`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseScores {
    pub alignment: f64,
    pub balance: f64,
    pub stance_width: f64,
    pub knee_alignment: f64,
}

/// Heuristic scorer using calibrated tolerances
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveAnalyzer {
    thresholds: FeedbackThresholds,
}

impl MoveAnalyzer {
    #[must_use]
    pub const fn new(thresholds: FeedbackThresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &FeedbackThresholds {
        &self.thresholds
    }

    /// Score a stance; knee alignment averages both legs
    #[must_use]
    pub fn score(&self, points: &BodyPoints, stance: StanceType) -> PoseScores {
        let tolerance = self.thresholds.knee_alignment;
        let knee_alignment = (knee_alignment_score(points.left_knee, points.left_ankle, tolerance)
            + knee_alignment_score(points.right_knee, points.right_ankle, tolerance))
            / 2.0;

        PoseScores {
            alignment: body_alignment_score(
                points.left_shoulder,
                points.right_shoulder,
                points.left_hip,
                points.right_hip,
            ),
            balance: balance_score(
                points.left_shoulder,
                points.right_shoulder,
                points.left_hip,
                points.right_hip,
                points.left_ankle,
                points.right_ankle,
            ),
            stance_width: stance_width_score(points.left_ankle, points.right_ankle, points.shoulder_width(), stance),
            knee_alignment,
        }
    }

    /// Score every aspect of `move_type` and grade it for `level`
    #[must_use]
    pub fn analyze(&self, points: &BodyPoints, move_type: MoveType, level: SkillLevel) -> MoveAnalysis {
        let tolerance = self.thresholds.knee_alignment;
        let mut scores = BTreeMap::from([
            (
                Aspect::BodyAlignment,
                body_alignment_score(points.left_shoulder, points.right_shoulder, points.left_hip, points.right_hip),
            ),
            (
                Aspect::StanceWidth,
                stance_width_score(
                    points.left_ankle,
                    points.right_ankle,
                    points.shoulder_width(),
                    move_type.stance(),
                ),
            ),
            (
                Aspect::LeftKneeAlignment,
                knee_alignment_score(points.left_knee, points.left_ankle, tolerance),
            ),
            (
                Aspect::RightKneeAlignment,
                knee_alignment_score(points.right_knee, points.right_ankle, tolerance),
            ),
        ]);

        let mut observations = Vec::new();
        match move_type {
            MoveType::General => {}
            MoveType::FrontStance => {
                let front = front_stance_scores(points);
                scores.insert(Aspect::FrontLegStraightness, front.front_leg_straightness);
                scores.insert(Aspect::BackLegBend, front.back_leg_bend);

                let depth = (points.left_ankle.y - points.right_ankle.y).abs();
                observations.push(if depth < FRONT_STANCE_MIN_DEPTH_PX {
                    "Increase your stance depth"
                } else {
                    "Good stance depth"
                });
            }
            MoveType::HorseStance => {
                let horse = horse_stance_scores(points);
                scores.insert(Aspect::LeftLegBend, horse.left_leg_bend);
                scores.insert(Aspect::RightLegBend, horse.right_leg_bend);
                scores.insert(Aspect::LegSymmetry, horse.leg_symmetry);
            }
            MoveType::RoundhouseKick => {
                let kick = roundhouse_kick_scores(points);
                scores.insert(Aspect::KneeLift, kick.knee_lift);
                scores.insert(Aspect::StandingLegStability, kick.standing_leg_stability);

                let hip_tilt = (points.left_hip.y - points.right_hip.y).abs();
                observations.push(if hip_tilt > HIP_ROTATION_MIN_PX {
                    "Good hip rotation detected"
                } else {
                    "Try to rotate your hips more"
                });
            }
        }

        let (good, excellent) = level.bands();
        let mut positive_feedback = Vec::new();
        let mut improvement_areas = Vec::new();
        let mut specific_corrections = Vec::new();
        for (&aspect, &score) in &scores {
            if score >= excellent {
                positive_feedback.push(format!("Excellent {}!", aspect.label()));
            } else if score >= good {
                improvement_areas.push(format!("Good {}, try to maintain it throughout", aspect.label()));
            } else {
                specific_corrections.push(aspect.correction());
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let average = scores.values().sum::<f64>() / scores.len() as f64;
        let overall = overall_score(&scores);
        log::debug!("Analyzed {move_type}: overall {overall:.1}, mean aspect {average:.1}");

        MoveAnalysis {
            move_type,
            level,
            overall_score: overall,
            scores,
            positive_feedback,
            improvement_areas,
            specific_corrections,
            key_aspects: move_type.key_aspects().iter().map(ToString::to_string).collect(),
            observations: observations.into_iter().map(String::from).collect(),
            difficulty: difficulty_assessment(average).to_string(),
            progression: level.progression(average).to_string(),
        }
    }
}

/// Praise or correction per score band
#[must_use]
pub fn feedback_from_scores(scores: &PoseScores) -> Vec<&'static str> {
    let bands: [(f64, f64, f64, &'static str, &'static str); 4] = [
        (
            scores.alignment,
            70.0,
            85.0,
            "Work on keeping shoulders and hips aligned",
            "Excellent body alignment!",
        ),
        (
            scores.balance,
            60.0,
            80.0,
            "Focus on maintaining better balance",
            "Great balance!",
        ),
        (
            scores.stance_width,
            70.0,
            85.0,
            "Adjust your stance width",
            "Perfect stance width!",
        ),
        (
            scores.knee_alignment,
            70.0,
            85.0,
            "Align knees over ankles",
            "Excellent knee alignment!",
        ),
    ];

    bands
        .iter()
        .filter_map(|&(score, low, high, correction, praise)| {
            if score < low {
                Some(correction)
            } else if score > high {
                Some(praise)
            } else {
                None
            }
        })
        .collect()
}
