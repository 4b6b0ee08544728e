//! Landmark vocabulary and landmark sets.
//!
//! A [`LandmarkSet`] is one detected body pose at one instant. It is built once
//! from detector output and never mutated afterwards; conversions return new
//! sets.

use crate::{constants::NUM_POSE_LANDMARKS, geometry::Point, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Named body joints tracked by the pose detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

/// Body side a joint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Center,
}

impl Joint {
    /// Every joint in the vocabulary
    pub const ALL: [Joint; 21] = [
        Joint::Nose,
        Joint::LeftEye,
        Joint::RightEye,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
        Joint::LeftHeel,
        Joint::RightHeel,
        Joint::LeftFootIndex,
        Joint::RightFootIndex,
    ];

    /// Snake-case identifier, e.g. `left_knee`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftEye => "left_eye",
            Joint::RightEye => "right_eye",
            Joint::LeftEar => "left_ear",
            Joint::RightEar => "right_ear",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
            Joint::LeftHeel => "left_heel",
            Joint::RightHeel => "right_heel",
            Joint::LeftFootIndex => "left_foot_index",
            Joint::RightFootIndex => "right_foot_index",
        }
    }

    /// Human-readable name, e.g. `left knee`
    #[must_use]
    pub fn display_name(self) -> String {
        self.name().replace('_', " ")
    }

    /// Index of this joint in the 33-point detector output
    #[must_use]
    pub const fn detector_index(self) -> usize {
        match self {
            Joint::Nose => 0,
            Joint::LeftEye => 2,
            Joint::RightEye => 5,
            Joint::LeftEar => 7,
            Joint::RightEar => 8,
            Joint::LeftShoulder => 11,
            Joint::RightShoulder => 12,
            Joint::LeftElbow => 13,
            Joint::RightElbow => 14,
            Joint::LeftWrist => 15,
            Joint::RightWrist => 16,
            Joint::LeftHip => 23,
            Joint::RightHip => 24,
            Joint::LeftKnee => 25,
            Joint::RightKnee => 26,
            Joint::LeftAnkle => 27,
            Joint::RightAnkle => 28,
            Joint::LeftHeel => 29,
            Joint::RightHeel => 30,
            Joint::LeftFootIndex => 31,
            Joint::RightFootIndex => 32,
        }
    }

    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Joint::Nose => Side::Center,
            Joint::LeftEye
            | Joint::LeftEar
            | Joint::LeftShoulder
            | Joint::LeftElbow
            | Joint::LeftWrist
            | Joint::LeftHip
            | Joint::LeftKnee
            | Joint::LeftAnkle
            | Joint::LeftHeel
            | Joint::LeftFootIndex => Side::Left,
            _ => Side::Right,
        }
    }

    /// The same joint on the opposite body side
    #[must_use]
    pub const fn mirror(self) -> Self {
        match self {
            Joint::Nose => Joint::Nose,
            Joint::LeftEye => Joint::RightEye,
            Joint::RightEye => Joint::LeftEye,
            Joint::LeftEar => Joint::RightEar,
            Joint::RightEar => Joint::LeftEar,
            Joint::LeftShoulder => Joint::RightShoulder,
            Joint::RightShoulder => Joint::LeftShoulder,
            Joint::LeftElbow => Joint::RightElbow,
            Joint::RightElbow => Joint::LeftElbow,
            Joint::LeftWrist => Joint::RightWrist,
            Joint::RightWrist => Joint::LeftWrist,
            Joint::LeftHip => Joint::RightHip,
            Joint::RightHip => Joint::LeftHip,
            Joint::LeftKnee => Joint::RightKnee,
            Joint::RightKnee => Joint::LeftKnee,
            Joint::LeftAnkle => Joint::RightAnkle,
            Joint::RightAnkle => Joint::LeftAnkle,
            Joint::LeftHeel => Joint::RightHeel,
            Joint::RightHeel => Joint::LeftHeel,
            Joint::LeftFootIndex => Joint::RightFootIndex,
            Joint::RightFootIndex => Joint::LeftFootIndex,
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Joint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Joint::ALL
            .iter()
            .copied()
            .find(|joint| joint.name() == normalized)
            .ok_or_else(|| Error::UnknownJoint(s.to_string()))
    }
}

/// A single tracked joint position with detection confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Detection confidence in `[0, 1]`
    #[serde(default = "full_visibility")]
    pub visibility: f64,
}

fn full_visibility() -> f64 {
    1.0
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, z: None, visibility }
    }

    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether this landmark is reliable enough to use geometrically
    #[must_use]
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.visibility >= threshold
    }
}

/// Frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Coordinate convention of a landmark set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Fractions of the frame, `0..=1`
    #[default]
    Normalized,
    /// Absolute pixels within a frame of the given size
    Pixel(FrameSize),
}

impl CoordinateSpace {
    /// Whether two spaces can be compared without conversion
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Normalized, Self::Normalized) | (Self::Pixel(_), Self::Pixel(_))
        )
    }
}

impl fmt::Display for CoordinateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normalized => f.write_str("normalized"),
            Self::Pixel(frame) => write!(f, "pixel ({}x{})", frame.width, frame.height),
        }
    }
}

/// All landmarks of one detected body pose
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkSet {
    #[serde(default)]
    space: CoordinateSpace,
    landmarks: BTreeMap<Joint, Landmark>,
}

impl LandmarkSet {
    /// Build a set from joint/landmark pairs
    pub fn new<I>(space: CoordinateSpace, landmarks: I) -> Self
    where
        I: IntoIterator<Item = (Joint, Landmark)>,
    {
        Self {
            space,
            landmarks: landmarks.into_iter().collect(),
        }
    }

    /// Build a set from the detector's index-ordered output
    ///
    /// # Errors
    ///
    /// Returns an error if `landmarks` does not hold exactly 33 entries
    pub fn from_indexed(landmarks: &[Landmark], space: CoordinateSpace) -> Result<Self> {
        if landmarks.len() != NUM_POSE_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Expected {} landmarks, got {}",
                NUM_POSE_LANDMARKS,
                landmarks.len()
            )));
        }

        Ok(Self::new(
            space,
            Joint::ALL.iter().map(|&joint| (joint, landmarks[joint.detector_index()])),
        ))
    }

    /// Parse a set from its JSON representation
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or names an unknown joint
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    #[must_use]
    pub const fn space(&self) -> CoordinateSpace {
        self.space
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    #[must_use]
    pub fn get(&self, joint: Joint) -> Option<&Landmark> {
        self.landmarks.get(&joint)
    }

    #[must_use]
    pub fn contains(&self, joint: Joint) -> bool {
        self.landmarks.contains_key(&joint)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, &Landmark)> {
        self.landmarks.iter().map(|(joint, landmark)| (*joint, landmark))
    }

    /// Raw position of a joint regardless of visibility
    #[must_use]
    pub fn point(&self, joint: Joint) -> Option<Point> {
        self.get(joint).map(Landmark::point)
    }

    /// Position of a joint only if it is present and sufficiently visible
    #[must_use]
    pub fn visible_point(&self, joint: Joint, threshold: f64) -> Option<Point> {
        self.get(joint)
            .filter(|landmark| landmark.is_visible(threshold))
            .map(Landmark::point)
    }

    /// Vertical position as a fraction of frame height
    #[must_use]
    pub fn normalized_y(&self, joint: Joint) -> Option<f64> {
        let y = self.get(joint)?.y;
        match self.space {
            CoordinateSpace::Normalized => Some(y),
            CoordinateSpace::Pixel(frame) if frame.height > 0 => Some(y / f64::from(frame.height)),
            CoordinateSpace::Pixel(_) => None,
        }
    }

    /// Convert to pixel coordinates within `frame`
    ///
    /// Normalized sets are denormalized; pixel sets captured at another
    /// resolution are rescaled.
    #[must_use]
    pub fn to_pixels(&self, frame: FrameSize) -> Self {
        let (scale_x, scale_y) = match self.space {
            CoordinateSpace::Normalized => (f64::from(frame.width), f64::from(frame.height)),
            CoordinateSpace::Pixel(source) if source == frame => (1.0, 1.0),
            CoordinateSpace::Pixel(source) => (
                f64::from(frame.width) / f64::from(source.width.max(1)),
                f64::from(frame.height) / f64::from(source.height.max(1)),
            ),
        };

        Self::new(
            CoordinateSpace::Pixel(frame),
            self.iter().map(|(joint, landmark)| {
                (
                    joint,
                    Landmark {
                        x: landmark.x * scale_x,
                        y: landmark.y * scale_y,
                        ..*landmark
                    },
                )
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_names_round_trip() {
        for joint in Joint::ALL {
            assert_eq!(joint.name().parse::<Joint>().unwrap(), joint);
        }
        assert_eq!("Left Knee".parse::<Joint>().unwrap(), Joint::LeftKnee);
        assert!(matches!("tail".parse::<Joint>(), Err(Error::UnknownJoint(_))));
    }

    #[test]
    fn test_mirror_and_side() {
        for joint in Joint::ALL {
            assert_eq!(joint.mirror().mirror(), joint);
            if joint != Joint::Nose {
                assert_ne!(joint.side(), joint.mirror().side());
            }
        }
        assert_eq!(Joint::LeftKnee.display_name(), "left knee");
    }

    #[test]
    fn test_from_indexed() {
        let mut raw = vec![Landmark::new(0.0, 0.0, 1.0); NUM_POSE_LANDMARKS];
        raw[13] = Landmark::new(0.25, 0.5, 0.9);
        let set = LandmarkSet::from_indexed(&raw, CoordinateSpace::Normalized).unwrap();
        assert_eq!(set.len(), Joint::ALL.len());
        assert_eq!(set.point(Joint::LeftElbow), Some(Point::new(0.25, 0.5)));

        assert!(LandmarkSet::from_indexed(&raw[..10], CoordinateSpace::Normalized).is_err());
    }

    #[test]
    fn test_visibility_filter() {
        let set = LandmarkSet::new(
            CoordinateSpace::Normalized,
            [
                (Joint::LeftWrist, Landmark::new(0.1, 0.1, 0.2)),
                (Joint::RightWrist, Landmark::new(0.9, 0.1, 0.8)),
            ],
        );
        assert!(set.visible_point(Joint::LeftWrist, 0.5).is_none());
        assert!(set.visible_point(Joint::RightWrist, 0.5).is_some());
        assert!(set.visible_point(Joint::Nose, 0.5).is_none());
        assert!(set.point(Joint::LeftWrist).is_some());
    }

    #[test]
    fn test_to_pixels() {
        let frame = FrameSize::new(640, 480);
        let set = LandmarkSet::new(CoordinateSpace::Normalized, [(Joint::Nose, Landmark::new(0.5, 0.25, 1.0))]);
        let pixels = set.to_pixels(frame);
        assert_eq!(pixels.space(), CoordinateSpace::Pixel(frame));
        assert_eq!(pixels.point(Joint::Nose), Some(Point::new(320.0, 120.0)));
        assert_eq!(pixels.normalized_y(Joint::Nose), Some(0.25));

        let rescaled = pixels.to_pixels(FrameSize::new(1280, 960));
        assert_eq!(rescaled.point(Joint::Nose), Some(Point::new(640.0, 240.0)));
    }

    #[test]
    fn test_space_compatibility() {
        let pixel = CoordinateSpace::Pixel(FrameSize::new(640, 480));
        assert!(CoordinateSpace::Normalized.is_compatible(&CoordinateSpace::Normalized));
        assert!(pixel.is_compatible(&CoordinateSpace::Pixel(FrameSize::new(1920, 1080))));
        assert!(!pixel.is_compatible(&CoordinateSpace::Normalized));
    }

    #[test]
    fn test_json_representation() {
        let json = r#"{
            "space": {"kind": "pixel", "width": 640, "height": 480},
            "landmarks": {
                "left_elbow": {"x": 100.0, "y": 200.0, "visibility": 0.9},
                "nose": {"x": 320.0, "y": 40.0}
            }
        }"#;
        let set = LandmarkSet::from_json(json).unwrap();
        assert_eq!(set.space(), CoordinateSpace::Pixel(FrameSize::new(640, 480)));
        assert_eq!(set.get(Joint::Nose).unwrap().visibility, 1.0);
        assert_eq!(set.get(Joint::LeftElbow).unwrap().z, None);

        let bad = r#"{"landmarks": {"tail": {"x": 0.0, "y": 0.0}}}"#;
        assert!(LandmarkSet::from_json(bad).is_err());
    }
}
