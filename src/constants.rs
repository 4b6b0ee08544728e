//! Constants used throughout the library

/// Number of landmarks emitted by the pose detector per body
pub const NUM_POSE_LANDMARKS: usize = 33;

/// Minimum visibility for a landmark to be treated as geometrically reliable
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Alignment points lost per degree of mean angular deviation
pub const ALIGNMENT_DECAY_PER_DEGREE: f64 = 2.0;

/// Symmetry points lost per degree of left/right arm angle difference
pub const ARM_SYMMETRY_SCALE: f64 = 1.0;
/// Symmetry points lost per degree of left/right leg angle difference
pub const LEG_SYMMETRY_SCALE: f64 = 1.0;
/// Symmetry points lost per unit of normalized shoulder height difference
pub const SHOULDER_HEIGHT_SCALE: f64 = 500.0;

/// Overall score weights
pub const ALIGNMENT_WEIGHT: f64 = 0.7;
pub const SYMMETRY_WEIGHT: f64 = 0.3;

/// Joints deviating more than this produce a tip
pub const TIP_THRESHOLD_DEG: f64 = 10.0;

/// Symmetry below this adds a symmetry tip
pub const SYMMETRY_TIP_THRESHOLD: f64 = 80.0;

/// Maximum number of tips returned per comparison
pub const MAX_TIPS: usize = 3;

/// Alignment below this surfaces the pose-specific coaching cues
pub const CUE_ALIGNMENT_THRESHOLD: f64 = 70.0;

/// Deviations under this many degrees count as correct
pub const PERFECT_THRESHOLD_DEG: f64 = 5.0;

/// Displayed deviations are rounded to a multiple of this
pub const ADVICE_ROUNDING_STEP_DEG: f64 = 5.0;

/// Maximum vertical wrist/shoulder offset accepted as a T-pose, in pixels
pub const T_POSE_TOLERANCE_PX: f64 = 50.0;

/// Personalized thresholds as multiples of the calibrated shoulder width
pub const STANCE_WIDTH_MIN_FACTOR: f64 = 0.8;
pub const STANCE_WIDTH_MAX_FACTOR: f64 = 1.5;
pub const SHOULDER_ALIGNMENT_FACTOR: f64 = 0.1;
pub const KNEE_ALIGNMENT_FACTOR: f64 = 0.15;
pub const BALANCE_FACTOR: f64 = 0.2;

/// Thresholds handed out before calibration, in pixels
pub const DEFAULT_STANCE_WIDTH_MIN: f64 = 80.0;
pub const DEFAULT_STANCE_WIDTH_MAX: f64 = 150.0;
pub const DEFAULT_SHOULDER_ALIGNMENT: f64 = 20.0;
pub const DEFAULT_KNEE_ALIGNMENT: f64 = 30.0;
pub const DEFAULT_BALANCE: f64 = 40.0;

/// Knee angle targeted by a deep horse stance, in degrees
pub const HORSE_STANCE_KNEE_TARGET_DEG: f64 = 100.0;

/// Vertical ankle separation below which a front stance is too shallow, in pixels
pub const FRONT_STANCE_MIN_DEPTH_PX: f64 = 50.0;

/// Hip height difference read as hip rotation during a kick, in pixels
pub const HIP_ROTATION_MIN_PX: f64 = 20.0;

/// Weight of move-specific aspects without an entry in the weight table
pub const DEFAULT_ASPECT_WEIGHT: f64 = 0.05;

/// Message returned when either pose is missing
pub const NO_POSE_TIP: &str = "Cannot detect pose clearly - ensure your full body is visible";

/// Message returned when symmetry is poor
pub const SYMMETRY_TIP: &str = "Improve left-right symmetry";

/// Message returned when nothing needs correcting
pub const ALL_GOOD_TIP: &str = "Great form! Hold the pose";

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
