//! Pose coaching library: compares a user's body pose against a reference
//! pose and produces a score with corrective advice.
//!
//! The pipeline consists of:
//! 1. Landmark sets from an upstream body-pose detector ([`landmarks`])
//! 2. Joint angles measured at configured joint triples ([`joint_angles`])
//! 3. Per-joint deltas, alignment, symmetry and a weighted score ([`comparator`])
//! 4. Short directives such as "Straighten left elbow 15°" ([`advice`])
//!
//! A calibration wizard ([`calibration`]) records a user's body proportions
//! and derives personalized thresholds for the stance and kick heuristics in
//! [`analysis`]. Analyses from one practice run roll up into a
//! [`session::SessionSummary`].
//!
//! # Examples
//!
//! ## Comparing a pose
//!
//! ```no_run
//! use pose_coach::{comparator::PoseComparator, landmarks::LandmarkSet, pose_registry::PoseRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let user = LandmarkSet::from_json(&std::fs::read_to_string("user.json")?)?;
//! let reference = LandmarkSet::from_json(&std::fs::read_to_string("reference.json")?)?;
//!
//! let registry = PoseRegistry::builtin();
//! let comparator = PoseComparator::default();
//! let result = comparator.compare_pose(&registry, "Front Double Biceps", Some(&user), Some(&reference))?;
//!
//! println!("Score: {:.1}", result.score);
//! for tip in &result.top_tips {
//!     println!("- {}", tip);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Calibrating a user
//!
//! ```no_run
//! use pose_coach::{calibration::CalibrationSession, config::Config, landmarks::{FrameSize, LandmarkSet}};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("pose_coach.yaml")?;
//! let mut session = CalibrationSession::start(config.calibration.clone(), config.detection.visibility_threshold)?;
//! let frame = FrameSize::new(1280, 720);
//!
//! let neutral = LandmarkSet::from_json(&std::fs::read_to_string("neutral.json")?)?;
//! let outcome = session.capture_neutral(Some(&neutral), frame);
//! println!("{}", outcome.message);
//!
//! // ... T-pose and front stance captures ...
//!
//! session.finalize()?;
//! let thresholds = session.personalized_thresholds();
//! println!("Stance width range: {:.0}-{:.0} px", thresholds.stance_width_min, thresholds.stance_width_max);
//! # Ok(())
//! # }
//! ```

/// Planar geometry helpers
pub mod geometry;

/// Joint vocabulary and landmark sets
pub mod landmarks;

/// Joint triples and angle computation
pub mod joint_angles;

/// Named poses and their joint configurations
pub mod pose_registry;

/// Corrective advice wording
pub mod advice;

/// Pose comparison and scoring
pub mod comparator;

/// User calibration wizard
pub mod calibration;

/// Stance and kick heuristics
pub mod analysis;

/// Practice session summaries
pub mod session;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
