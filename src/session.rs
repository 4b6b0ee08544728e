//! Practice session summaries built from a run of move analyses.

use crate::{analysis::MoveAnalysis, comparator::round_one_decimal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Analyses needed before an improvement trend is reported
const MIN_POSES_FOR_TREND: usize = 5;

/// Overall grade of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl PerformanceLevel {
    #[must_use]
    pub fn classify(average: f64) -> Self {
        if average >= 85.0 {
            Self::Excellent
        } else if average >= 70.0 {
            Self::Good
        } else if average >= 55.0 {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        })
    }
}

/// Aggregate of one practice session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub duration_minutes: f64,
    pub poses_analyzed: usize,
    pub average_score: f64,
    /// Second-half mean minus first-half mean; 0 for short sessions
    pub improvement_trend: f64,
    pub performance_level: PerformanceLevel,
    pub most_common_correction: Option<String>,
    pub most_common_success: Option<String>,
    pub next_session_focus: String,
}

impl SessionSummary {
    /// Summarize the analyses of one session; `None` if there are none
    #[must_use]
    pub fn from_analyses(analyses: &[MoveAnalysis], duration_minutes: f64) -> Option<Self> {
        if analyses.is_empty() {
            return None;
        }

        let scores: Vec<f64> = analyses.iter().map(|analysis| analysis.overall_score).collect();
        let average = mean(&scores);
        let improvement = if scores.len() >= MIN_POSES_FOR_TREND {
            let (first, second) = scores.split_at(scores.len() / 2);
            mean(second) - mean(first)
        } else {
            0.0
        };

        let most_common_correction =
            most_common(analyses.iter().flat_map(|analysis| &analysis.specific_corrections));
        let most_common_success = most_common(analyses.iter().flat_map(|analysis| &analysis.positive_feedback));

        let next_session_focus = match &most_common_correction {
            _ if average >= 80.0 => "Try more advanced techniques and combinations".to_string(),
            Some(correction) => format!("Focus on: {correction}"),
            None => "Continue practicing basic stances and form".to_string(),
        };

        log::info!(
            "Session summary: {} poses, average {:.1}, trend {:+.1}",
            analyses.len(),
            average,
            improvement
        );

        Some(Self {
            duration_minutes: round_one_decimal(duration_minutes),
            poses_analyzed: analyses.len(),
            average_score: round_one_decimal(average),
            improvement_trend: round_one_decimal(improvement),
            performance_level: PerformanceLevel::classify(average),
            most_common_correction,
            most_common_success,
            next_session_focus,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Most frequent item; ties go to the one seen first
fn most_common<'a>(items: impl Iterator<Item = &'a String>) -> Option<String> {
    let mut counts: Vec<(&String, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    counts
        .iter()
        .rev()
        .max_by_key(|(_, count)| *count)
        .map(|(item, _)| (*item).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{MoveType, SkillLevel};
    use std::collections::BTreeMap;

    fn analysis(overall_score: f64, corrections: &[&str], positives: &[&str]) -> MoveAnalysis {
        MoveAnalysis {
            move_type: MoveType::FrontStance,
            level: SkillLevel::Beginner,
            overall_score,
            scores: BTreeMap::new(),
            positive_feedback: positives.iter().map(ToString::to_string).collect(),
            improvement_areas: Vec::new(),
            specific_corrections: corrections.iter().map(ToString::to_string).collect(),
            key_aspects: Vec::new(),
            observations: Vec::new(),
            difficulty: String::new(),
            progression: String::new(),
        }
    }

    #[test]
    fn test_empty_session_has_no_summary() {
        assert_eq!(SessionSummary::from_analyses(&[], 12.0), None);
    }

    #[test]
    fn test_summary_of_improving_session() {
        let analyses: Vec<_> = [50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
            .into_iter()
            .map(|score| analysis(score, &["Bend your back leg more for stability"], &[]))
            .collect();
        let summary = SessionSummary::from_analyses(&analyses, 14.56).unwrap();

        assert_eq!(summary.duration_minutes, 14.6);
        assert_eq!(summary.poses_analyzed, 6);
        assert_eq!(summary.average_score, 75.0);
        // (80 + 90 + 100) / 3 - (50 + 60 + 70) / 3
        assert_eq!(summary.improvement_trend, 30.0);
        assert_eq!(summary.performance_level, PerformanceLevel::Good);
        assert_eq!(summary.next_session_focus, "Focus on: Bend your back leg more for stability");
        assert_eq!(summary.most_common_success, None);
    }

    #[test]
    fn test_odd_session_splits_short_first_half() {
        let analyses: Vec<_> = [10.0, 20.0, 30.0, 40.0, 50.0]
            .into_iter()
            .map(|score| analysis(score, &[], &[]))
            .collect();
        let summary = SessionSummary::from_analyses(&analyses, 5.0).unwrap();
        // (30 + 40 + 50) / 3 - (10 + 20) / 2
        assert_eq!(summary.improvement_trend, 25.0);
        assert_eq!(summary.performance_level, PerformanceLevel::NeedsImprovement);
        assert_eq!(summary.next_session_focus, "Continue practicing basic stances and form");
    }

    #[test]
    fn test_short_session_reports_no_trend() {
        let analyses = vec![analysis(40.0, &[], &[]), analysis(90.0, &[], &[])];
        let summary = SessionSummary::from_analyses(&analyses, 2.0).unwrap();
        assert_eq!(summary.improvement_trend, 0.0);
        assert_eq!(summary.average_score, 65.0);
        assert_eq!(summary.performance_level, PerformanceLevel::Fair);
    }

    #[test]
    fn test_most_common_feedback() {
        let analyses = vec![
            analysis(90.0, &["Level your shoulders", "Widen your stance"], &["Excellent stance width!"]),
            analysis(85.0, &["Widen your stance"], &["Excellent body alignment!"]),
            analysis(88.0, &["Level your shoulders"], &[]),
        ];
        let summary = SessionSummary::from_analyses(&analyses, 3.0).unwrap();
        // Tied at two; the first seen wins
        assert_eq!(summary.most_common_correction.as_deref(), Some("Level your shoulders"));
        assert_eq!(summary.most_common_success.as_deref(), Some("Excellent stance width!"));
        assert_eq!(summary.performance_level, PerformanceLevel::Excellent);
        assert_eq!(summary.next_session_focus, "Try more advanced techniques and combinations");
        assert_eq!(PerformanceLevel::NeedsImprovement.to_string(), "Needs Improvement");
    }
}
