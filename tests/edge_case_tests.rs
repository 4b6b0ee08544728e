//! Edge case tests for landmark handling, angles and comparison


use pose_coach::{
    analysis::{BodyPoints, MoveAnalyzer, StanceType},
    comparator::PoseComparator,
    constants::NUM_POSE_LANDMARKS,
    joint_angles::{JointAngleCalculator, JointTriple, CANONICAL_TRIPLES},
    landmarks::{CoordinateSpace, FrameSize, Joint, Landmark, LandmarkSet},
};
use test_helpers::*;

#[test]
fn test_angle_calculator_on_full_pose() {
    let angles = JointAngleCalculator::default().compute(&standing_pose(), FrameSize::new(1000, 1000));
    assert_eq!(angles.len(), CANONICAL_TRIPLES.len());
    assert_close(angles.get(Joint::LeftElbow).unwrap(), 180.0, 1e-6);
    assert_close(angles.get(Joint::RightKnee).unwrap(), 180.0, 1e-6);
}

#[test]
fn test_angle_calculator_omits_occluded_joints() {
    let pose = with_visibility(&standing_pose(), Joint::LeftWrist, 0.3);
    let angles = JointAngleCalculator::default().compute(&pose, FrameSize::new(640, 480));

    assert_eq!(angles.len(), CANONICAL_TRIPLES.len() - 1);
    assert_eq!(angles.get(Joint::LeftElbow), None);
    assert!(angles.get(Joint::RightElbow).is_some());

    // A stricter threshold drops more
    let strict = JointAngleCalculator::new(1.1);
    assert!(strict.compute(&standing_pose(), FrameSize::new(640, 480)).is_empty());
}

#[test]
fn test_pixel_positions_respect_frame() {
    let positions = JointAngleCalculator::default().pixel_positions(&standing_pose(), FrameSize::new(200, 100));
    let nose = positions[&Joint::Nose];
    assert_close(nose.x, 100.0, 1e-9);
    assert_close(nose.y, 10.0, 1e-9);
}

#[test]
fn test_indexed_detector_output() {
    let mut raw = vec![Landmark::new(0.0, 0.0, 0.0); NUM_POSE_LANDMARKS];
    raw[0] = Landmark::new(0.5, 0.1, 0.9);
    raw[25] = Landmark::new(0.56, 0.72, 0.8);

    let set = LandmarkSet::from_indexed(&raw, CoordinateSpace::Normalized).unwrap();
    assert_eq!(set.len(), Joint::ALL.len());
    assert_eq!(set.get(Joint::Nose).unwrap().visibility, 0.9);
    assert_eq!(set.point(Joint::LeftKnee).unwrap().y, 0.72);
}

#[test]
fn test_landmark_json_defaults_visibility() {
    let json = r#"{"landmarks": {"nose": {"x": 0.5, "y": 0.1}, "left_knee": {"x": 0.4, "y": 0.7, "visibility": 0.2}}}"#;
    let set = LandmarkSet::from_json(json).unwrap();
    assert_eq!(set.space(), CoordinateSpace::Normalized);
    assert_eq!(set.get(Joint::Nose).unwrap().visibility, 1.0);
    assert!(set.visible_point(Joint::LeftKnee, 0.5).is_none());
    assert!(set.point(Joint::LeftKnee).is_some());
}

#[test]
fn test_pixel_sets_from_same_frame_compare_directly() {
    let frame = FrameSize::new(1280, 720);
    let user = standing_with_elbows(150.0, 180.0).to_pixels(frame);
    let reference = standing_pose().to_pixels(frame);

    let result = PoseComparator::default()
        .compare(Some(&user), Some(&reference), &CANONICAL_TRIPLES)
        .unwrap();
    assert!(result.pose_detected);
    assert!(result.per_joint[&Joint::LeftElbow].delta_deg < -10.0);
    assert_eq!(result.per_joint[&Joint::RightElbow].delta_deg, 0.0);
}

#[test]
fn test_repeated_vertex_keeps_last_triple() {
    // Two triples measured at the left elbow with different outer joints
    let config = [
        JointTriple::new(Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist),
        JointTriple::new(Joint::LeftHip, Joint::LeftElbow, Joint::LeftShoulder),
    ];
    let user = standing_with_elbows(90.0, 180.0);
    let reference = standing_pose();

    let result = PoseComparator::default()
        .compare(Some(&user), Some(&reference), &config)
        .unwrap();
    assert_eq!(result.per_joint.len(), 1);
    // The second triple ignores the wrist, so it sees no change
    assert_eq!(result.per_joint[&Joint::LeftElbow].delta_deg, 0.0);
    // Both still count towards alignment: mean |delta| is 45
    assert_close(result.alignment, 10.0, 1e-9);
}

#[test]
fn test_empty_landmark_set_counts_as_undetected() {
    let empty = LandmarkSet::new(CoordinateSpace::Normalized, std::iter::empty());
    let result = PoseComparator::default()
        .compare(Some(&standing_pose()), Some(&empty), &CANONICAL_TRIPLES)
        .unwrap();
    assert!(!result.pose_detected);
}

#[test]
fn test_body_points_require_visible_joints() {
    let frame = FrameSize::new(1000, 1000);
    let points = BodyPoints::from_landmarks(&standing_pose(), frame, 0.5).unwrap();
    assert_close(points.shoulder_width(), 200.0, 1e-9);

    let scores = MoveAnalyzer::default().score(&points, StanceType::Front);
    // Ankles 120 px apart against a 200 px ideal
    assert_close(scores.stance_width, 60.0, 1e-9);

    let occluded = with_visibility(&standing_pose(), Joint::RightKnee, 0.0);
    assert!(BodyPoints::from_landmarks(&occluded, frame, 0.5).is_none());
}
