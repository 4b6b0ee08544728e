//! Move scoring from landmark sets and session roll-up


use pose_coach::{
    analysis::{Aspect, BodyPoints, MoveAnalyzer, MoveType, SkillLevel},
    landmarks::{FrameSize, Joint},
    session::{PerformanceLevel, SessionSummary},
};
use test_helpers::*;

const FRAME: FrameSize = FrameSize::new(1000, 1000);

#[test]
fn test_standing_pose_as_general_move() {
    let points = BodyPoints::from_landmarks(&standing_pose(), FRAME, 0.5).unwrap();
    let analysis = MoveAnalyzer::default().analyze(&points, MoveType::General, SkillLevel::Intermediate);

    // Ankles 120 px apart against a 200 px shoulder width
    assert_close(analysis.scores[&Aspect::StanceWidth], 60.0, 1e-9);
    assert_close(analysis.scores[&Aspect::BodyAlignment], 100.0, 1e-9);
    // (100 * 0.25 + 60 * 0.2 + 100 * 0.3) / 0.75
    assert_close(analysis.overall_score, 67.0 / 0.75, 1e-9);
    assert_eq!(
        analysis.specific_corrections,
        vec!["Adjust your stance width - check your feet positioning"]
    );
    assert_eq!(analysis.positive_feedback.len(), 3);
    assert_eq!(analysis.difficulty, "Ready for advanced techniques");
}

#[test]
fn test_horse_stance_judges_wider_ideal() {
    let points = BodyPoints::from_landmarks(&standing_pose(), FRAME, 0.5).unwrap();
    let analysis = MoveAnalyzer::default().analyze(&points, MoveType::HorseStance, SkillLevel::Beginner);

    // 1.8 shoulder widths is 360 px
    assert_close(analysis.scores[&Aspect::StanceWidth], 100.0 - 240.0 / 360.0 * 100.0, 1e-9);
    // Straight legs are 80° from the horse stance knee target
    assert_eq!(analysis.scores[&Aspect::LeftLegBend], 0.0);
    assert_close(analysis.scores[&Aspect::LegSymmetry], 100.0, 1e-9);
    assert!(analysis
        .specific_corrections
        .contains(&"Work on improving your left leg bend".to_string()));
    assert_eq!(
        analysis.key_aspects,
        vec!["thigh parallel", "back straight", "weight distribution"]
    );
}

#[test]
fn test_session_summary_over_analyses() {
    let analyzer = MoveAnalyzer::default();
    let narrow = BodyPoints::from_landmarks(&standing_pose(), FRAME, 0.5).unwrap();
    // Feet and knees out to shoulder width
    let mut wide = standing_pose();
    for (joint, x, y) in [
        (Joint::LeftKnee, 0.6, 0.72),
        (Joint::RightKnee, 0.4, 0.72),
        (Joint::LeftAnkle, 0.6, 0.9),
        (Joint::RightAnkle, 0.4, 0.9),
    ] {
        wide = with_joint(&wide, joint, x, y);
    }
    let wide = BodyPoints::from_landmarks(&wide, FRAME, 0.5).unwrap();

    let analyses: Vec<_> = [&narrow, &narrow, &narrow, &wide, &wide, &wide]
        .into_iter()
        .map(|points| analyzer.analyze(points, MoveType::General, SkillLevel::Intermediate))
        .collect();
    let summary = SessionSummary::from_analyses(&analyses, 10.0).unwrap();

    assert_eq!(summary.poses_analyzed, 6);
    // 100 against 67 / 0.75
    assert_close(summary.improvement_trend, 10.7, 1e-9);
    assert_eq!(
        summary.most_common_correction.as_deref(),
        Some("Adjust your stance width - check your feet positioning")
    );
    assert_eq!(summary.performance_level, PerformanceLevel::Excellent);
}
