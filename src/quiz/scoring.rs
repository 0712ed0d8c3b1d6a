// src/quiz/scoring.rs

use crate::models::{
    category::Category,
    question::Question,
    submission::{AnswerSet, ScoreResult},
};

/// Sums the selected values per stream.
///
/// * Iterates the whole bank; answers for ids not in the bank are ignored.
/// * Missing answers contribute nothing.
/// * `General` questions never contribute.
/// * Values are summed as given, without range checks; totals saturate.
pub fn score(questions: &[Question], answers: &AnswerSet) -> ScoreResult {
    let mut scores = ScoreResult::default();

    for question in questions {
        if !question.category.is_scored() {
            continue;
        }
        if let Some(value) = answers.get(question.id) {
            scores.add(question.category, value);
        }
    }

    scores
}

/// Picks the stream with the greatest total.
///
/// Walks `Category::SCORED` in order and only replaces the leader on a
/// strictly greater total, so ties and all-zero results go to the earliest
/// stream.
pub fn recommend(scores: &ScoreResult) -> Category {
    let mut leader = Category::SCORED[0];
    let mut max = 0;

    for (category, total) in scores.iter() {
        if total > max {
            max = total;
            leader = category;
        }
    }

    leader
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::bank::QuestionBank;

    fn answer_all(bank: &QuestionBank, value: i64) -> AnswerSet {
        bank.questions.iter().map(|q| (q.id, value)).collect()
    }

    #[test]
    fn scenario_clear_leader() {
        let scores = ScoreResult { science: 42, arts: 28, commerce: 31 };
        assert_eq!(recommend(&scores), Category::Science);

        let scores = ScoreResult { science: 12, arts: 28, commerce: 31 };
        assert_eq!(recommend(&scores), Category::Commerce);
    }

    #[test]
    fn scenario_three_way_tie_goes_to_science() {
        let scores = ScoreResult { science: 20, arts: 20, commerce: 20 };
        assert_eq!(recommend(&scores), Category::Science);
    }

    #[test]
    fn later_tie_does_not_overwrite_leader() {
        let scores = ScoreResult { science: 10, arts: 30, commerce: 30 };
        assert_eq!(recommend(&scores), Category::Arts);
    }

    #[test]
    fn scenario_empty_answers() {
        let bank = QuestionBank::builtin();
        let scores = score(&bank.questions, &AnswerSet::new());
        assert_eq!(scores, ScoreResult::default());
        assert_eq!(recommend(&scores), Category::Science);
    }

    #[test]
    fn scenario_general_question_contributes_nothing() {
        let bank = QuestionBank::builtin();
        // Question 25 is tagged general.
        let answers: AnswerSet = [(25, 5)].into_iter().collect();
        assert_eq!(score(&bank.questions, &answers), ScoreResult::default());
    }

    #[test]
    fn sums_per_stream() {
        let bank = QuestionBank::builtin();
        // 1 & 2 science, 9 arts, 17 commerce, 40 general.
        let answers: AnswerSet = [(1, 5), (2, 4), (9, 3), (17, 2), (40, 5)].into_iter().collect();
        let scores = score(&bank.questions, &answers);
        assert_eq!(scores, ScoreResult { science: 9, arts: 3, commerce: 2 });
    }

    #[test]
    fn unknown_question_ids_are_ignored() {
        let bank = QuestionBank::builtin();
        let answers: AnswerSet = [(999, 5)].into_iter().collect();
        assert_eq!(score(&bank.questions, &answers), ScoreResult::default());
    }

    #[test]
    fn totals_stay_within_bounds() {
        let bank = QuestionBank::builtin();
        let per_category = |c: Category| bank.questions.iter().filter(|q| q.category == c).count() as i64;

        for value in 1..=5 {
            let scores = score(&bank.questions, &answer_all(&bank, value));
            for (category, total) in scores.iter() {
                assert!(total >= 0);
                assert!(total <= 5 * per_category(category));
                assert_eq!(total, value * per_category(category));
            }
        }
    }

    #[test]
    fn scoring_is_pure() {
        let bank = QuestionBank::builtin();
        let answers = answer_all(&bank, 3);
        assert_eq!(score(&bank.questions, &answers), score(&bank.questions, &answers));
    }

    #[test]
    fn raising_one_answer_never_lowers_its_total() {
        let bank = QuestionBank::builtin();
        let mut answers = answer_all(&bank, 2);
        let before = score(&bank.questions, &answers);

        answers.insert(10, 5);
        let after = score(&bank.questions, &answers);

        assert!(after.arts > before.arts);
        assert_eq!(after.science, before.science);
        assert_eq!(after.commerce, before.commerce);
    }

    #[test]
    fn out_of_range_values_are_summed_as_is() {
        let bank = QuestionBank::builtin();
        let answers: AnswerSet = [(1, 9), (2, -1)].into_iter().collect();
        assert_eq!(score(&bank.questions, &answers).science, 8);
    }

    #[test]
    fn huge_values_saturate_instead_of_overflowing() {
        let bank = QuestionBank::builtin();
        // 1 & 2 science, 9 & 10 arts.
        let answers: AnswerSet = [(1, i64::MAX), (2, 1), (9, i64::MIN), (10, -1)].into_iter().collect();
        let scores = score(&bank.questions, &answers);

        assert_eq!(scores.science, i64::MAX);
        assert_eq!(scores.arts, i64::MIN);
        assert_eq!(recommend(&scores), Category::Science);
    }
}
