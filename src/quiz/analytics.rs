// src/quiz/analytics.rs

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    models::{
        submission::{QuizSubmission, ScoreResult},
        user::{ROLE_STUDENT, User},
    },
    quiz::scoring::recommend,
};

/// Number of calendar months covered by the trend series.
pub const TREND_MONTHS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// `YYYY-MM`.
    pub month: String,
    /// Short month name, e.g. `Oct`.
    pub label: String,
    pub count: usize,
}

/// Admin dashboard summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub total_students: usize,
    pub quiz_completions: usize,
    /// Submissions counted under their recommended stream.
    pub stream_distribution: ScoreResult,
    pub registration_trend: Vec<MonthlyCount>,
    pub quiz_trend: Vec<MonthlyCount>,
}

pub fn summarize(users: &[User], submissions: &[QuizSubmission], now: DateTime<Utc>) -> AnalyticsSummary {
    let mut stream_distribution = ScoreResult::default();
    for submission in submissions {
        stream_distribution.add(recommend(&submission.scores), 1);
    }

    AnalyticsSummary {
        total_students: users.iter().filter(|u| u.role == ROLE_STUDENT).count(),
        quiz_completions: submissions.len(),
        stream_distribution,
        registration_trend: monthly_counts(users.iter().map(|u| u.created_at), now),
        quiz_trend: monthly_counts(submissions.iter().map(|s| s.submitted_at), now),
    }
}

/// Buckets timestamps into the last `TREND_MONTHS` months ending with the
/// month of `now`, oldest first. Anything outside the window is dropped.
fn monthly_counts(stamps: impl Iterator<Item = DateTime<Utc>>, now: DateTime<Utc>) -> Vec<MonthlyCount> {
    let current = month_index(now.year(), now.month());
    let first = current - (TREND_MONTHS as i32 - 1);

    let mut counts = [0usize; TREND_MONTHS];
    for stamp in stamps {
        let idx = month_index(stamp.year(), stamp.month());
        if (first..=current).contains(&idx) {
            counts[(idx - first) as usize] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(offset, count)| {
            let idx = first + offset as i32;
            let (year, month) = (idx.div_euclid(12), idx.rem_euclid(12) as u32 + 1);
            let label = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b").to_string())
                .unwrap_or_default();

            MonthlyCount {
                month: format!("{:04}-{:02}", year, month),
                label,
                count: *count,
            }
        })
        .collect()
}

fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::models::submission::AnswerSet;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn user(id: i64, role: &str, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: format!("user{}", id),
            password: String::new(),
            role: role.to_string(),
            created_at,
        }
    }

    fn submission(owner: &str, scores: ScoreResult, submitted_at: DateTime<Utc>) -> QuizSubmission {
        QuizSubmission {
            owner: owner.to_string(),
            quiz_id: "aptitude_v1".to_string(),
            scores,
            answers: AnswerSet::new(),
            submitted_at,
            total_questions: 40,
            answered_questions: 0,
        }
    }

    #[test]
    fn counts_students_and_recommended_streams() {
        let now = at(2026, 10, 14);
        let users = vec![
            user(1, ROLE_STUDENT, now),
            user(2, ROLE_STUDENT, now),
            user(3, "admin", now),
        ];
        let submissions = vec![
            submission("1", ScoreResult { science: 42, arts: 28, commerce: 31 }, now),
            submission("2", ScoreResult { science: 5, arts: 5, commerce: 9 }, now),
            submission("3", ScoreResult::default(), now),
        ];

        let summary = summarize(&users, &submissions, now);
        assert_eq!(summary.total_students, 2);
        assert_eq!(summary.quiz_completions, 3);
        assert_eq!(summary.stream_distribution, ScoreResult { science: 2, arts: 0, commerce: 1 });
    }

    #[test]
    fn trend_spans_six_months_across_a_year_boundary() {
        let now = at(2026, 2, 3);
        let stamps = vec![at(2025, 9, 1), at(2025, 8, 31), at(2026, 2, 1), at(2026, 2, 28), at(2025, 12, 25)];
        let trend = monthly_counts(stamps.into_iter(), now);

        let months: Vec<&str> = trend.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, ["2025-09", "2025-10", "2025-11", "2025-12", "2026-01", "2026-02"]);

        let counts: Vec<usize> = trend.iter().map(|m| m.count).collect();
        assert_eq!(counts, [1, 0, 0, 1, 0, 2]);
        assert_eq!(trend[0].label, "Sep");
    }
}
