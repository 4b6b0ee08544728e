//! Named poses and the joint triples evaluated for each.
//!
//! The registry is static data. The built-in table covers the bodybuilding
//! mandatory poses plus the stances and kicks; a YAML file with the same shape
//! can replace or extend it.

use crate::{
    joint_angles::JointTriple,
    landmarks::Joint::{
        LeftAnkle, LeftElbow, LeftHip, LeftKnee, LeftShoulder, LeftWrist, RightAnkle, RightElbow, RightHip,
        RightKnee, RightShoulder, RightWrist,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Poses shipped with the built-in registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseName {
    FrontDoubleBiceps,
    SideChest,
    BackLatSpread,
    RearDoubleBiceps,
    FrontStance,
    HorseStance,
    BackStance,
    FrontKick,
    RoundhouseKick,
    SideKick,
}

impl PoseName {
    pub const ALL: [PoseName; 10] = [
        PoseName::FrontDoubleBiceps,
        PoseName::SideChest,
        PoseName::BackLatSpread,
        PoseName::RearDoubleBiceps,
        PoseName::FrontStance,
        PoseName::HorseStance,
        PoseName::BackStance,
        PoseName::FrontKick,
        PoseName::RoundhouseKick,
        PoseName::SideKick,
    ];

    /// Human-readable name used as the registry key
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            PoseName::FrontDoubleBiceps => "Front Double Biceps",
            PoseName::SideChest => "Side Chest",
            PoseName::BackLatSpread => "Back Lat Spread",
            PoseName::RearDoubleBiceps => "Rear Double Biceps",
            PoseName::FrontStance => "Front Stance",
            PoseName::HorseStance => "Horse Stance",
            PoseName::BackStance => "Back Stance",
            PoseName::FrontKick => "Front Kick",
            PoseName::RoundhouseKick => "Roundhouse Kick",
            PoseName::SideKick => "Side Kick",
        }
    }

    /// Snake-case identifier, e.g. `front_stance`
    #[must_use]
    pub fn id(self) -> String {
        self.display_name().to_lowercase().replace(' ', "_")
    }

    fn entry(self) -> PoseEntry {
        let elbows = [
            JointTriple::new(LeftShoulder, LeftElbow, LeftWrist),
            JointTriple::new(RightShoulder, RightElbow, RightWrist),
        ];
        let shoulders = [
            JointTriple::new(LeftHip, LeftShoulder, LeftElbow),
            JointTriple::new(RightHip, RightShoulder, RightElbow),
        ];
        let knees = [
            JointTriple::new(LeftHip, LeftKnee, LeftAnkle),
            JointTriple::new(RightHip, RightKnee, RightAnkle),
        ];
        let hips = [
            JointTriple::new(LeftShoulder, LeftHip, LeftKnee),
            JointTriple::new(RightShoulder, RightHip, RightKnee),
        ];

        let (triples, cues): (Vec<JointTriple>, &[&str]) = match self {
            PoseName::FrontDoubleBiceps => (
                [elbows, shoulders].concat(),
                &["Raise arms to shoulder level", "Flex biceps harder"],
            ),
            PoseName::SideChest => (
                vec![elbows[0], shoulders[0], knees[0]],
                &["Turn torso more to the side", "Bring front arm across chest"],
            ),
            PoseName::BackLatSpread => (
                [elbows, shoulders].concat(),
                &["Spread lats wider", "Keep elbows forward"],
            ),
            PoseName::RearDoubleBiceps => (
                [elbows, knees].concat(),
                &["Flex calves", "Squeeze shoulder blades together"],
            ),
            PoseName::FrontStance => (
                [knees, hips].concat(),
                &["Keep your back leg straight and strong", "Keep your upper body upright"],
            ),
            PoseName::HorseStance => (
                [knees, hips].concat(),
                &["Lower your stance by bending your knees more", "Keep your back straight and vertical"],
            ),
            PoseName::BackStance => (
                [knees, hips].concat(),
                &["Bend your back knee more for stability", "Keep your upper body upright and centered"],
            ),
            PoseName::FrontKick => (
                [knees, hips].concat(),
                &["Lift your knee higher before extending the kick", "Keep your supporting leg slightly bent"],
            ),
            PoseName::RoundhouseKick => (
                [knees, hips, shoulders].concat(),
                &["Rotate your hips fully to generate power", "Keep your hands up"],
            ),
            PoseName::SideKick => (
                [knees, hips].concat(),
                &["Lift your knee to your chest before extending", "Don't lean too far, keep your balance"],
            ),
        };

        PoseEntry {
            triples,
            cues: cues.iter().map(|cue| (*cue).to_string()).collect(),
        }
    }
}

impl fmt::Display for PoseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PoseName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_pose_key(s);
        PoseName::ALL
            .iter()
            .copied()
            .find(|pose| normalize_pose_key(pose.display_name()) == key)
            .ok_or_else(|| Error::UnknownPose(s.to_string()))
    }
}

/// Joint triples and coaching cues for one pose
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseEntry {
    /// Angles to compare, in evaluation order
    pub triples: Vec<JointTriple>,

    /// Pose-level hints shown when overall alignment is poor
    #[serde(default)]
    pub cues: Vec<String>,
}

/// Registry of named poses
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseRegistry {
    poses: BTreeMap<String, PoseEntry>,
}

impl PoseRegistry {
    /// Registry holding every [`PoseName`]
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            poses: PoseName::ALL
                .iter()
                .map(|pose| (pose.display_name().to_string(), pose.entry()))
                .collect(),
        }
    }

    /// Parse a registry from YAML
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or references an unknown joint
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::ConfigError(format!("Failed to parse pose registry: {}", e)))
    }

    /// Load a registry from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;
        Self::from_yaml_str(&content)
    }

    /// Add or replace a pose
    pub fn insert(&mut self, name: impl Into<String>, entry: PoseEntry) {
        self.poses.insert(name.into(), entry);
    }

    /// Merge another registry into this one; entries in `other` win
    pub fn extend(&mut self, other: Self) {
        self.poses.extend(other.poses);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.poses.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Look up a pose by display name or snake-case id, case-insensitively
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPose`] if no pose matches
    pub fn entry(&self, name: &str) -> Result<&PoseEntry> {
        if let Some(entry) = self.poses.get(name) {
            return Ok(entry);
        }
        let key = normalize_pose_key(name);
        self.poses
            .iter()
            .find(|(registered, _)| normalize_pose_key(registered) == key)
            .map(|(_, entry)| entry)
            .ok_or_else(|| Error::UnknownPose(name.to_string()))
    }

    /// Joint triples configured for a pose
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPose`] for unregistered names and
    /// [`Error::EmptyJointConfig`] for poses with no triples
    pub fn joint_config(&self, name: &str) -> Result<&[JointTriple]> {
        let entry = self.entry(name)?;
        if entry.triples.is_empty() {
            return Err(Error::EmptyJointConfig(name.to_string()));
        }
        Ok(&entry.triples)
    }
}

fn normalize_pose_key(name: &str) -> String {
    name.trim().to_lowercase().replace(['_', '-'], " ")
}

/// Example registry file content
pub const EXAMPLE_REGISTRY: &str = r#"# Pose registry
poses:
  "Front Double Biceps":
    triples:
      - [left_shoulder, left_elbow, left_wrist]
      - [right_shoulder, right_elbow, right_wrist]
      - [left_hip, left_shoulder, left_elbow]
      - [right_hip, right_shoulder, right_elbow]
    cues:
      - "Raise arms to shoulder level"
      - "Flex biceps harder"
  "Warrior Two":
    triples:
      - [left_hip, left_knee, left_ankle]
      - [right_hip, right_knee, right_ankle]
"#;
