//! Calibration wizard flow and persistence


use pose_coach::{
    calibration::{
        CalibrationAction, CalibrationProfile, CalibrationSession, CalibrationStage, FeedbackThresholds, LegSide,
    },
    config::{CalibrationConfig, Config},
    landmarks::{FrameSize, Joint},
    Error,
};
use std::path::Path;
use test_helpers::*;

const FRAME: FrameSize = FrameSize::new(1000, 1000);

fn config_with_store(path: &Path) -> CalibrationConfig {
    CalibrationConfig {
        profile_path: Some(path.to_path_buf()),
        ..CalibrationConfig::default()
    }
}

fn t_pose() -> pose_coach::landmarks::LandmarkSet {
    let pose = with_joint(&standing_pose(), Joint::LeftWrist, 0.9, 0.26);
    with_joint(&pose, Joint::RightWrist, 0.1, 0.24)
}

fn front_stance() -> pose_coach::landmarks::LandmarkSet {
    let pose = with_joint(&standing_pose(), Joint::LeftAnkle, 0.6, 0.95);
    with_joint(&pose, Joint::RightAnkle, 0.4, 0.85)
}

#[test]
fn test_full_calibration_flow_persists_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user_calibration.json");
    let config = config_with_store(&path);

    let mut session = CalibrationSession::start(config.clone(), 0.5).unwrap();
    assert_eq!(session.stage(), CalibrationStage::Uncalibrated);
    assert_eq!(session.begin().next_action, Some(CalibrationAction::CaptureNeutral));

    let outcome = session.capture_neutral(Some(&standing_pose()), FRAME);
    assert!(outcome.success, "{}", outcome.message);

    let outcome = session.capture_t_pose(Some(&t_pose()), FRAME);
    assert!(outcome.success, "{}", outcome.message);

    let outcome = session.capture_front_stance(Some(&front_stance()), FRAME);
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.next_action, Some(CalibrationAction::Finalize));
    assert!(!path.exists());

    let outcome = session.finalize().unwrap();
    assert!(outcome.success);
    assert!(outcome.message.contains("shoulder width: 200 pixels"));
    assert!(path.exists());

    let profile = session.profile();
    assert_close(profile.shoulder_width.unwrap(), 200.0, 1e-9);
    assert_close(profile.hip_width.unwrap(), 120.0, 1e-9);
    assert_close(profile.body_height_px.unwrap(), 800.0, 1e-9);
    assert_close(profile.arm_span.unwrap(), 800.0, 1e-9);
    assert_close(profile.stance_width.unwrap(), 200.0, 1e-9);
    assert_close(profile.stance_length.unwrap(), 100.0, 1e-9);
    assert_close(profile.shoulder_to_height_ratio.unwrap(), 0.25, 1e-9);
    assert_eq!(profile.preferred_front_leg, Some(LegSide::Left));
    assert_eq!(profile.frame_size, Some(FRAME));

    // A new session picks the stored profile back up
    let resumed = CalibrationSession::start(config, 0.5).unwrap();
    assert!(resumed.is_calibrated());
    assert_eq!(resumed.stage(), CalibrationStage::Calibrated);
    assert_eq!(resumed.profile(), session.profile());
    assert_eq!(resumed.personalized_thresholds(), session.personalized_thresholds());
}

#[test]
fn test_personalized_thresholds_scale_with_shoulder_width() {
    let mut session = CalibrationSession::default();
    session.capture_neutral(Some(&standing_pose()), FRAME);
    session.finalize().unwrap();

    let thresholds = session.personalized_thresholds();
    assert_close(thresholds.stance_width_min, 160.0, 1e-9);
    assert_close(thresholds.stance_width_max, 300.0, 1e-9);
    assert_close(thresholds.shoulder_alignment, 20.0, 1e-9);
    assert_close(thresholds.knee_alignment, 30.0, 1e-9);
    assert_close(thresholds.balance, 40.0, 1e-9);
}

#[test]
fn test_uncalibrated_session_uses_configured_defaults() {
    let mut config = Config::default().calibration;
    config.default_thresholds.balance = 55.0;
    let session = CalibrationSession::new(config, 0.5);

    let thresholds = session.personalized_thresholds();
    assert_eq!(thresholds.balance, 55.0);
    assert_eq!(thresholds.stance_width_min, FeedbackThresholds::default().stance_width_min);
}

#[test]
fn test_reset_deletes_persisted_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let mut session = CalibrationSession::new(config_with_store(&path), 0.5);

    session.capture_neutral(Some(&standing_pose()), FRAME);
    session.finalize().unwrap();
    assert!(path.exists());

    session.reset().unwrap();
    assert!(!path.exists());
    assert!(!session.is_calibrated());
    assert_eq!(session.stage(), CalibrationStage::Uncalibrated);
    assert_eq!(session.profile(), &CalibrationProfile::default());

    // Resetting again with nothing on disk is fine
    session.reset().unwrap();
}

#[test]
fn test_skipping_steps_then_finalizing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let mut session = CalibrationSession::new(config_with_store(&path), 0.5);

    let outcome = session.capture_t_pose(Some(&t_pose()), FRAME);
    assert!(!outcome.success);
    assert_eq!(session.profile().arm_span, None);

    let outcome = session.finalize().unwrap();
    assert!(outcome.success);
    assert!(session.is_calibrated());

    let stored = CalibrationProfile::load(&path).unwrap();
    assert!(stored.calibrated);
    assert_eq!(stored.shoulder_width, None);
    assert_eq!(stored.shoulder_to_height_ratio, None);
}

#[test]
fn test_recapturing_an_earlier_step_restarts_from_there() {
    let mut session = CalibrationSession::default();
    session.capture_neutral(Some(&standing_pose()), FRAME);
    session.capture_t_pose(Some(&t_pose()), FRAME);
    session.finalize().unwrap();
    assert!(session.is_calibrated());

    let outcome = session.capture_neutral(Some(&standing_pose()), FRAME);
    assert!(outcome.success);
    assert_eq!(session.stage(), CalibrationStage::NeutralCaptured);
    assert!(!session.is_calibrated());

    // T-pose is accepted again from here
    assert!(session.capture_t_pose(Some(&t_pose()), FRAME).success);
}

#[test]
fn test_occluded_joints_fail_the_step() {
    let mut session = CalibrationSession::default();
    let occluded = with_visibility(&standing_pose(), Joint::LeftAnkle, 0.1);

    let outcome = session.capture_neutral(Some(&occluded), FRAME);
    assert!(!outcome.success);
    assert_eq!(session.stage(), CalibrationStage::Uncalibrated);

    let missing = without_joint(&standing_pose(), Joint::Nose);
    assert!(!session.capture_neutral(Some(&missing), FRAME).success);
}

#[test]
fn test_pixel_input_is_rescaled_to_capture_frame() {
    let mut session = CalibrationSession::default();
    let pixels = standing_pose().to_pixels(FrameSize::new(500, 500));

    assert!(session.capture_neutral(Some(&pixels), FRAME).success);
    assert_close(session.profile().shoulder_width.unwrap(), 200.0, 1e-9);
}

#[test]
fn test_corrupt_profile_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = CalibrationSession::start(config_with_store(&path), 0.5);
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_profile_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = CalibrationSession::default();
    session.capture_neutral(Some(&standing_pose()), FRAME);
    session.finalize().unwrap();

    let exported = session.export(dir.path().join("export.json")).unwrap();
    let loaded = CalibrationProfile::load(exported).unwrap();
    assert_eq!(&loaded, session.profile());
}
