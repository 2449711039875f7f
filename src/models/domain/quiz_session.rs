use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::domain::question::{AnswerKey, CorrectAnswer, Difficulty, Question};

/// Percentage below which a topic is reported as a weak area.
pub const WEAK_AREA_THRESHOLD: f64 = 70.0;

const UNKNOWN_TOPIC: &str = "Unknown";

/// The whole state of one quiz. Stored serialized between requests, so the
/// field names are part of the stored-session format.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizSession {
    pub num_questions: usize,
    pub difficulty: Difficulty,
    pub topic: String,
    pub score: f64,
    pub current_question: usize,
    pub user_performance: Vec<AnswerRecord>,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub question: String,
    pub user_answer: Vec<u32>,
    pub correct_answer: CorrectAnswer,
    pub is_correct: bool,
    pub partially_correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub partially_correct: bool,
}

impl AnswerOutcome {
    pub const NOT_CORRECT: AnswerOutcome = AnswerOutcome {
        is_correct: false,
        partially_correct: false,
    };

    pub fn points(&self) -> f64 {
        if self.is_correct {
            1.0
        } else if self.partially_correct {
            0.5
        } else {
            0.0
        }
    }
}

/// Explanation text for the correct answer(s); `None` where the question
/// carries no explanation for that index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Explanation {
    Single(Option<String>),
    Multiple(Vec<Option<String>>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionFeedback {
    pub correct_answer: CorrectAnswer,
    pub explanation: Explanation,
    pub topic: String,
    pub objective: String,
    pub sub_objective: Option<String>,
}

impl QuestionFeedback {
    /// Free-text query used to look up supporting documentation.
    pub fn search_query(&self) -> String {
        [
            Some(self.topic.as_str()),
            Some(self.objective.as_str()),
            self.sub_objective.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    Created,
    InProgress,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopicPerformance {
    pub topic: String,
    pub correct: usize,
    pub total: usize,
}

impl TopicPerformance {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }

    pub fn is_weak(&self) -> bool {
        self.percentage() < WEAK_AREA_THRESHOLD
    }
}

impl fmt::Display for TopicPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2}% correct ({}/{})",
            self.topic,
            self.percentage(),
            self.correct,
            self.total
        )
    }
}

impl QuizSession {
    pub fn new(num_questions: usize, difficulty: Difficulty, topic: &str) -> Self {
        Self {
            num_questions,
            difficulty,
            topic: topic.to_string(),
            score: 0.0,
            current_question: 0,
            user_performance: Vec::new(),
            questions: Vec::new(),
        }
    }

    pub fn state(&self) -> QuizState {
        if self.is_complete() {
            QuizState::Completed
        } else if self.questions.is_empty() && self.user_performance.is_empty() {
            QuizState::Created
        } else {
            QuizState::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_question >= self.num_questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question)
    }

    /// True when the quiz is still running but the slot for the current
    /// index has not been generated yet.
    pub fn needs_question(&self) -> bool {
        !self.is_complete() && self.current_question().is_none()
    }

    pub fn can_accept_question(&self) -> bool {
        self.questions.len() < self.num_questions
    }

    /// Appends a generated question; ignored once `num_questions` exist.
    pub fn push_question(&mut self, question: Question) -> bool {
        if !self.can_accept_question() {
            log::warn!(
                "Dropping generated question, quiz already holds {} questions",
                self.questions.len()
            );
            return false;
        }
        self.questions.push(question);
        true
    }

    /// Scores `user_answer` (1-based option indices) against the current
    /// question and records it. Without a current question nothing is
    /// recorded and the answer counts as not correct.
    pub fn check_answer(&mut self, user_answer: &[u32]) -> AnswerOutcome {
        let Some(question) = self.current_question() else {
            return AnswerOutcome::NOT_CORRECT;
        };

        let outcome = match &question.answer {
            AnswerKey::Multiple(correct) => {
                let correct: BTreeSet<u32> = correct.iter().copied().collect();
                let given: BTreeSet<u32> = user_answer.iter().copied().collect();
                let is_correct = given == correct;
                AnswerOutcome {
                    is_correct,
                    partially_correct: !is_correct && !given.is_disjoint(&correct),
                }
            }
            AnswerKey::Single(correct) => AnswerOutcome {
                is_correct: user_answer.first() == Some(correct),
                partially_correct: false,
            },
        };

        let record = AnswerRecord {
            question: question.question.clone(),
            user_answer: user_answer.to_vec(),
            correct_answer: CorrectAnswer::from(&question.answer),
            is_correct: outcome.is_correct,
            partially_correct: outcome.partially_correct,
        };

        self.score += outcome.points();
        self.user_performance.push(record);
        outcome
    }

    pub fn feedback(&self) -> Option<QuestionFeedback> {
        let question = self.current_question()?;

        let explanation = match &question.answer {
            AnswerKey::Single(index) => {
                Explanation::Single(question.explanation_for(*index).map(str::to_string))
            }
            AnswerKey::Multiple(indices) => Explanation::Multiple(
                indices
                    .iter()
                    .map(|i| question.explanation_for(*i).map(str::to_string))
                    .collect(),
            ),
        };

        Some(QuestionFeedback {
            correct_answer: CorrectAnswer::from(&question.answer),
            explanation,
            topic: question.topic.clone(),
            objective: question.objective.clone(),
            sub_objective: question.sub_objective.clone(),
        })
    }

    pub fn advance(&mut self) {
        self.current_question += 1;
    }

    /// Per-topic results in the order topics were first answered. Record
    /// `i` answers question `i`, so the topic comes from the stored question.
    pub fn performance_summary(&self) -> Vec<TopicPerformance> {
        let mut summary: Vec<TopicPerformance> = Vec::new();

        for (index, record) in self.user_performance.iter().enumerate() {
            let topic = self
                .questions
                .get(index)
                .map(|q| q.topic.as_str())
                .unwrap_or(UNKNOWN_TOPIC);

            let entry = match summary.iter().position(|p| p.topic == topic) {
                Some(position) => &mut summary[position],
                None => {
                    summary.push(TopicPerformance {
                        topic: topic.to_string(),
                        correct: 0,
                        total: 0,
                    });
                    let last = summary.len() - 1;
                    &mut summary[last]
                }
            };

            entry.total += 1;
            if record.is_correct {
                entry.correct += 1;
            }
        }

        summary
    }

    pub fn weak_areas(&self) -> Vec<String> {
        self.performance_summary()
            .into_iter()
            .filter(TopicPerformance::is_weak)
            .map(|p| p.topic)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{multi_response_question, single_answer_question};

    fn session_with(questions: Vec<Question>) -> QuizSession {
        let mut session = QuizSession::new(questions.len(), Difficulty::Easy, "All Topics");
        for question in questions {
            session.push_question(question);
        }
        session
    }

    #[test]
    fn test_new_session_starts_in_created_state() {
        let session = QuizSession::new(3, Difficulty::Medium, "All Topics");

        assert_eq!(session.state(), QuizState::Created);
        assert!(session.needs_question());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_exact_multi_response_match_scores_full_point() {
        let mut session = session_with(vec![multi_response_question("Q", "T", vec![1, 3])]);

        let outcome = session.check_answer(&[3, 1]);

        assert!(outcome.is_correct);
        assert!(!outcome.partially_correct);
        assert_eq!(session.score, 1.0);
    }

    #[test]
    fn test_overlapping_multi_response_scores_half_point() {
        let mut session = session_with(vec![multi_response_question("Q", "T", vec![1, 3])]);

        let outcome = session.check_answer(&[1, 2]);

        assert!(!outcome.is_correct);
        assert!(outcome.partially_correct);
        assert_eq!(session.score, 0.5);
        assert!(session.user_performance[0].partially_correct);
    }

    #[test]
    fn test_disjoint_multi_response_scores_nothing() {
        let mut session = session_with(vec![multi_response_question("Q", "T", vec![1, 3])]);

        let outcome = session.check_answer(&[2, 4]);

        assert_eq!(outcome, AnswerOutcome::NOT_CORRECT);
        assert_eq!(session.score, 0.0);
        assert_eq!(session.user_performance.len(), 1);
    }

    #[test]
    fn test_single_answer_uses_first_selection_without_partial_credit() {
        let mut session = session_with(vec![
            single_answer_question("Q1", "T", 2),
            single_answer_question("Q2", "T", 2),
        ]);

        assert!(session.check_answer(&[2, 3]).is_correct);
        session.advance();
        let outcome = session.check_answer(&[3, 2]);

        assert_eq!(outcome, AnswerOutcome::NOT_CORRECT);
        assert_eq!(session.score, 1.0);
    }

    #[test]
    fn test_empty_answer_is_incorrect() {
        let mut session = session_with(vec![single_answer_question("Q", "T", 1)]);

        assert_eq!(session.check_answer(&[]), AnswerOutcome::NOT_CORRECT);
        assert_eq!(session.user_performance[0].user_answer, Vec::<u32>::new());
    }

    #[test]
    fn test_check_answer_without_question_records_nothing() {
        let mut session = QuizSession::new(2, Difficulty::Hard, "All Topics");

        assert_eq!(session.check_answer(&[1]), AnswerOutcome::NOT_CORRECT);
        assert!(session.user_performance.is_empty());
        assert_eq!(session.score, 0.0);
    }

    #[test]
    fn test_feedback_returns_explanations_for_correct_answers() {
        let session = session_with(vec![multi_response_question("Q", "Topic A", vec![2, 4])]);

        let feedback = session.feedback().expect("feedback should exist");

        assert_eq!(feedback.correct_answer, CorrectAnswer::Multiple(vec![2, 4]));
        assert_eq!(
            feedback.explanation,
            Explanation::Multiple(vec![
                Some("Explanation 2".to_string()),
                Some("Explanation 4".to_string())
            ])
        );
        assert_eq!(feedback.topic, "Topic A");
    }

    #[test]
    fn test_feedback_is_none_without_current_question() {
        let session = QuizSession::new(1, Difficulty::Easy, "All Topics");
        assert!(session.feedback().is_none());
    }

    #[test]
    fn test_search_query_skips_missing_sub_objective() {
        let session = session_with(vec![single_answer_question("Q", "Topic A", 1)]);
        let mut feedback = session.feedback().unwrap();

        assert_eq!(feedback.search_query(), "Topic A Objective for Topic A");

        feedback.sub_objective = Some("Sub".to_string());
        assert_eq!(feedback.search_query(), "Topic A Objective for Topic A Sub");
    }

    #[test]
    fn test_session_completes_after_last_answer() {
        let mut session = session_with(vec![single_answer_question("Q", "T", 1)]);
        assert_eq!(session.state(), QuizState::InProgress);

        session.check_answer(&[1]);
        session.advance();

        assert_eq!(session.state(), QuizState::Completed);
        assert!(!session.needs_question());
        assert!(!session.push_question(single_answer_question("Extra", "T", 1)));
    }

    #[test]
    fn test_weak_areas_only_include_topics_below_threshold() {
        let mut questions = Vec::new();
        for i in 0..5 {
            questions.push(single_answer_question(&format!("Strong {}", i), "Strong", 1));
        }
        questions.push(single_answer_question("Weak 1", "Weak", 1));
        questions.push(single_answer_question("Weak 2", "Weak", 1));
        let mut session = session_with(questions);

        for answer in [1, 1, 1, 1, 1, 1, 2] {
            session.check_answer(&[answer]);
            session.advance();
        }

        let summary = session.performance_summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].to_string(), "Strong: 100.00% correct (5/5)");
        assert_eq!(summary[1].to_string(), "Weak: 50.00% correct (1/2)");
        assert_eq!(session.weak_areas(), vec!["Weak".to_string()]);
    }

    #[test]
    fn test_partial_credit_does_not_count_as_correct_in_summary() {
        let mut session = session_with(vec![multi_response_question("Q", "Topic", vec![1, 2])]);
        session.check_answer(&[1]);

        let summary = session.performance_summary();
        assert_eq!(summary[0].correct, 0);
        assert_eq!(session.weak_areas(), vec!["Topic".to_string()]);
    }

    #[test]
    fn test_session_round_trips_through_json() {
        let mut session = session_with(vec![
            single_answer_question("Q1", "T1", 1),
            multi_response_question("Q2", "T2", vec![1, 2]),
        ]);
        session.check_answer(&[1]);
        session.advance();
        session.check_answer(&[2]);

        let json = serde_json::to_string(&session).expect("session should serialize");
        let parsed: QuizSession = serde_json::from_str(&json).expect("session should deserialize");

        assert_eq!(parsed, session);
        assert_eq!(parsed.score, 1.5);
    }

    #[test]
    fn test_session_reads_stored_snake_case_shape() {
        let stored = serde_json::json!({
            "num_questions": 2,
            "difficulty": "easy",
            "topic": "All Topics",
            "score": 0.5,
            "current_question": 1,
            "user_performance": [{
                "question": "Which apply?",
                "user_answer": [1],
                "correct_answer": [1, 2],
                "is_correct": false,
                "partially_correct": true
            }],
            "questions": [{
                "question": "Which apply?",
                "options": ["A", "B", "C", "D"],
                "correct_answers": [1, 2],
                "explanations": {"1": "a", "2": "b", "3": "c", "4": "d"},
                "topic": "Describe cloud concepts",
                "objective": "Objective",
                "sub_objective": null
            }]
        });

        let session: QuizSession = serde_json::from_value(stored).expect("stored session should load");

        assert_eq!(session.state(), QuizState::InProgress);
        assert!(session.needs_question());
        assert_eq!(
            session.user_performance[0].correct_answer,
            CorrectAnswer::Multiple(vec![1, 2])
        );
    }
}
