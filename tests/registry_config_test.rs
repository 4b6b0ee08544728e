//! Configuration and pose registry wiring


use pose_coach::{
    config::{Config, EXAMPLE_CONFIG},
    constants::ALL_GOOD_TIP,
    pose_registry::{PoseName, PoseRegistry, EXAMPLE_REGISTRY},
};
use test_helpers::*;

#[test]
fn test_config_file_drives_the_comparator() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pose_coach.yaml");
    std::fs::write(&path, "scoring:\n  max_tips: 1\n  tip_threshold_deg: 20.0\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    config.validate().unwrap();
    let comparator = config.comparator();
    assert_eq!(comparator.scoring().max_tips, 1);

    let registry = PoseRegistry::builtin();
    let reference = standing_pose();

    // 15° is under the raised tip threshold
    let user = standing_with_elbows(165.0, 180.0);
    let result = comparator
        .compare_pose(&registry, "Front Double Biceps", Some(&user), Some(&reference))
        .unwrap();
    assert_eq!(result.top_tips, vec![ALL_GOOD_TIP]);

    let user = standing_with_elbows(90.0, 90.0);
    let result = comparator
        .compare_pose(&registry, "Front Double Biceps", Some(&user), Some(&reference))
        .unwrap();
    assert_eq!(result.top_tips, vec!["Bend left elbow 90°"]);
}

#[test]
fn test_strict_advice_config() {
    let mut config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
    config.advice.perfect_threshold_deg = 2.0;
    config.advice.rounding_step_deg = 1.0;

    let user = standing_with_elbows(176.6, 180.0);
    let result = config
        .comparator()
        .compare_pose(&PoseRegistry::builtin(), "front_double_biceps", Some(&user), Some(&standing_pose()))
        .unwrap();
    let advice = &result.per_joint[&pose_coach::landmarks::Joint::LeftElbow].advice;
    assert_eq!(advice, "Bend left elbow 3°");
}

#[test]
fn test_custom_registry_file_extends_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poses.yaml");
    std::fs::write(&path, EXAMPLE_REGISTRY).unwrap();

    let mut registry = PoseRegistry::builtin();
    registry.extend(PoseRegistry::from_file(&path).unwrap());
    assert_eq!(registry.len(), PoseName::ALL.len() + 1);
    assert!(registry.names().any(|name| name == "Warrior Two"));

    let pose = standing_pose();
    let result = Config::default()
        .comparator()
        .compare_pose(&registry, "warrior two", Some(&pose), Some(&pose))
        .unwrap();
    assert_eq!(result.alignment, 100.0);
    assert!(result.pose_cues.is_empty());
}

#[test]
fn test_every_builtin_pose_resolves_by_id() {
    let registry = PoseRegistry::builtin();
    for pose in PoseName::ALL {
        assert!(registry.joint_config(&pose.id()).is_ok(), "{}", pose.id());
        assert_eq!(pose.id().parse::<PoseName>().unwrap(), pose);
    }
}
