//! Joint angle calculation from landmark sets.
//!
//! Angles are only emitted for joints whose three landmarks are present and
//! visible. A missing entry means "not measurable in this frame"; nothing is
//! ever filled in for it.

use crate::{
    constants::DEFAULT_VISIBILITY_THRESHOLD,
    geometry::{angle, Point},
    landmarks::{FrameSize, Joint, LandmarkSet},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Three joints defining an angle measured at the middle one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Joint; 3]", into = "[Joint; 3]")]
pub struct JointTriple {
    pub a: Joint,
    pub vertex: Joint,
    pub c: Joint,
}

impl JointTriple {
    #[must_use]
    pub const fn new(a: Joint, vertex: Joint, c: Joint) -> Self {
        Self { a, vertex, c }
    }

    #[must_use]
    pub const fn joints(&self) -> [Joint; 3] {
        [self.a, self.vertex, self.c]
    }

    /// Angle from raw positions, ignoring visibility. `None` if any joint is absent.
    #[must_use]
    pub fn raw_angle(&self, set: &LandmarkSet) -> Option<f64> {
        Some(angle(set.point(self.a)?, set.point(self.vertex)?, set.point(self.c)?))
    }

    /// First joint of the triple missing from `set`, if any
    #[must_use]
    pub fn first_missing(&self, set: &LandmarkSet) -> Option<Joint> {
        self.joints().into_iter().find(|joint| !set.contains(*joint))
    }
}

impl From<[Joint; 3]> for JointTriple {
    fn from([a, vertex, c]: [Joint; 3]) -> Self {
        Self::new(a, vertex, c)
    }
}

impl From<JointTriple> for [Joint; 3] {
    fn from(triple: JointTriple) -> Self {
        triple.joints()
    }
}

impl fmt::Display for JointTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.a, self.vertex, self.c)
    }
}

/// The anatomical angles computed for every pose
pub const CANONICAL_TRIPLES: [JointTriple; 8] = [
    JointTriple::new(Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist),
    JointTriple::new(Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist),
    JointTriple::new(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle),
    JointTriple::new(Joint::RightHip, Joint::RightKnee, Joint::RightAnkle),
    JointTriple::new(Joint::LeftShoulder, Joint::LeftHip, Joint::LeftKnee),
    JointTriple::new(Joint::RightShoulder, Joint::RightHip, Joint::RightKnee),
    JointTriple::new(Joint::LeftHip, Joint::LeftShoulder, Joint::LeftElbow),
    JointTriple::new(Joint::RightHip, Joint::RightShoulder, Joint::RightElbow),
];

/// Measured angles keyed by vertex joint, in degrees
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointAngles(BTreeMap<Joint, f64>);

impl JointAngles {
    #[must_use]
    pub fn get(&self, joint: Joint) -> Option<f64> {
        self.0.get(&joint).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, f64)> + '_ {
        self.0.iter().map(|(joint, value)| (*joint, *value))
    }
}

/// Computes the canonical angle set from a landmark set
#[derive(Debug, Clone, Copy)]
pub struct JointAngleCalculator {
    visibility_threshold: f64,
}

impl Default for JointAngleCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

impl JointAngleCalculator {
    #[must_use]
    pub const fn new(visibility_threshold: f64) -> Self {
        Self { visibility_threshold }
    }

    /// Pixel positions of every sufficiently visible joint
    #[must_use]
    pub fn pixel_positions(&self, set: &LandmarkSet, frame: FrameSize) -> BTreeMap<Joint, Point> {
        set.to_pixels(frame)
            .iter()
            .filter(|(_, landmark)| landmark.is_visible(self.visibility_threshold))
            .map(|(joint, landmark)| (joint, landmark.point()))
            .collect()
    }

    /// Elbow, knee, hip and shoulder angles for both sides
    #[must_use]
    pub fn compute(&self, set: &LandmarkSet, frame: FrameSize) -> JointAngles {
        let positions = self.pixel_positions(set, frame);
        let angles = CANONICAL_TRIPLES
            .iter()
            .filter_map(|triple| Self::angle_at(&positions, triple).map(|value| (triple.vertex, value)))
            .collect::<BTreeMap<_, _>>();

        if angles.len() < CANONICAL_TRIPLES.len() {
            log::debug!(
                "Computed {} of {} joint angles; the rest lack visible landmarks",
                angles.len(),
                CANONICAL_TRIPLES.len()
            );
        }

        JointAngles(angles)
    }

    fn angle_at(positions: &BTreeMap<Joint, Point>, triple: &JointTriple) -> Option<f64> {
        Some(angle(
            *positions.get(&triple.a)?,
            *positions.get(&triple.vertex)?,
            *positions.get(&triple.c)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{CoordinateSpace, Landmark};

    fn arm(visibility: f64) -> LandmarkSet {
        LandmarkSet::new(
            CoordinateSpace::Normalized,
            [
                (Joint::LeftShoulder, Landmark::new(0.5, 0.25, 1.0)),
                (Joint::LeftElbow, Landmark::new(0.25, 0.25, 1.0)),
                (Joint::LeftWrist, Landmark::new(0.25, 0.5, visibility)),
            ],
        )
    }

    #[test]
    fn test_compute_uses_pixel_space() {
        let angles = JointAngleCalculator::default().compute(&arm(1.0), FrameSize::new(640, 480));
        assert_eq!(angles.len(), 1);
        let elbow = angles.get(Joint::LeftElbow).unwrap();
        assert!((elbow - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_occluded_joint_is_omitted() {
        let angles = JointAngleCalculator::default().compute(&arm(0.1), FrameSize::new(640, 480));
        assert!(angles.is_empty());
        assert_eq!(angles.get(Joint::LeftElbow), None);
    }

    #[test]
    fn test_triple_helpers() {
        let set = arm(1.0);
        let triple = CANONICAL_TRIPLES[0];
        assert_eq!(triple.first_missing(&set), None);
        assert!(triple.raw_angle(&set).is_some());

        let right = CANONICAL_TRIPLES[1];
        assert_eq!(right.first_missing(&set), Some(Joint::RightShoulder));
        assert_eq!(right.raw_angle(&set), None);
        assert_eq!(triple.to_string(), "left_shoulder-left_elbow-left_wrist");
    }
}
