// src/quiz/bank.rs

use serde::Serialize;

use crate::models::{
    category::Category::{self, Arts, Commerce, General, Science},
    question::{Question, QuizOption},
};

pub const BUILTIN_QUIZ_ID: &str = "aptitude_v1";
pub const BUILTIN_QUIZ_VERSION: u32 = 1;

const LIKERT: [(&str, i64); 5] = [
    ("Strongly Agree", 5),
    ("Agree", 4),
    ("Neutral", 3),
    ("Disagree", 2),
    ("Strongly Disagree", 1),
];

const APTITUDE_V1: [(i64, &str, Category); 40] = [
    (1, "I enjoy conducting experiments and observing results", Science),
    (2, "I find mathematics and calculations fascinating", Science),
    (3, "I am curious about how things work in nature", Science),
    (4, "I enjoy solving complex mathematical problems", Science),
    (5, "I would like to work in a laboratory setting", Science),
    (6, "I am interested in technology and innovation", Science),
    (7, "I enjoy analyzing data and finding patterns", Science),
    (8, "I am fascinated by space, physics, and the universe", Science),
    (9, "I enjoy creative writing and storytelling", Arts),
    (10, "I am interested in history and cultural studies", Arts),
    (11, "I enjoy debates and discussions about social issues", Arts),
    (12, "I am drawn to visual arts, music, or performing arts", Arts),
    (13, "I enjoy learning different languages", Arts),
    (14, "I am interested in psychology and human behavior", Arts),
    (15, "I prefer working with people rather than machines", Arts),
    (16, "I enjoy reading literature and analyzing texts", Arts),
    (17, "I am interested in business and entrepreneurship", Commerce),
    (18, "I enjoy working with numbers and financial data", Commerce),
    (19, "I am good at managing money and budgets", Commerce),
    (20, "I enjoy understanding market trends and economics", Commerce),
    (21, "I would like to work in banking or finance", Commerce),
    (22, "I am interested in marketing and sales", Commerce),
    (23, "I enjoy analyzing business strategies", Commerce),
    (24, "I am comfortable with accounting and bookkeeping", Commerce),
    (25, "I prefer working independently rather than in teams", General),
    (26, "I enjoy leadership roles and taking charge", General),
    (27, "I am comfortable with public speaking", General),
    (28, "I enjoy helping others solve their problems", General),
    (29, "I am interested in environmental and sustainability issues", General),
    (30, "I prefer structured work environments with clear guidelines", General),
    (31, "I am interested in healthcare and helping sick people", Science),
    (32, "I enjoy building and creating things with my hands", Science),
    (33, "I am interested in law and justice", Arts),
    (34, "I enjoy teaching and sharing knowledge with others", Arts),
    (35, "I am interested in media, journalism, and communication", Arts),
    (36, "I would like to start my own business someday", Commerce),
    (37, "I am interested in international trade and global markets", Commerce),
    (38, "I enjoy working with computers and technology", Science),
    (39, "I am interested in fashion and design", Arts),
    (40, "I am interested in sports management and fitness", General),
];

/// The standard five-point agreement scale, highest value first.
pub fn likert_options() -> Vec<QuizOption> {
    LIKERT
        .iter()
        .map(|(label, value)| QuizOption {
            label: (*label).to_string(),
            value: *value,
        })
        .collect()
}

/// A complete, versioned question list. Scoring always runs against the whole
/// bank; pages exist only for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    pub quiz_id: String,
    pub version: u32,
    pub questions: Vec<Question>,
}

/// One presentation page of a bank.
#[derive(Debug, Serialize)]
pub struct QuestionPage<'a> {
    pub quiz_id: &'a str,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub questions: &'a [Question],
}

impl QuestionBank {
    pub fn new(quiz_id: impl Into<String>, version: u32, mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(|q| q.id);
        Self {
            quiz_id: quiz_id.into(),
            version,
            questions,
        }
    }

    /// The bundled aptitude & interest bank.
    pub fn builtin() -> Self {
        let questions = APTITUDE_V1
            .iter()
            .map(|(id, text, category)| Question {
                id: *id,
                text: (*text).to_string(),
                category: *category,
                options: likert_options(),
            })
            .collect();

        Self::new(BUILTIN_QUIZ_ID, BUILTIN_QUIZ_VERSION, questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn contains(&self, question_id: i64) -> bool {
        self.questions
            .binary_search_by_key(&question_id, |q| q.id)
            .is_ok()
    }

    /// Returns page `page` (1-based). Page 0 is treated as page 1; pages past
    /// the end are empty.
    pub fn page(&self, page: usize, per_page: usize) -> QuestionPage<'_> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total = self.questions.len();
        let start = (page - 1).saturating_mul(per_page).min(total);
        let end = start.saturating_add(per_page).min(total);

        QuestionPage {
            quiz_id: &self.quiz_id,
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
            questions: &self.questions[start..end],
        }
    }
}
