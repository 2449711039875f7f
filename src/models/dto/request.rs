use serde::Deserialize;
use validator::Validate;

use crate::models::domain::catalog::ALL_TOPICS;

pub const MAX_QUESTIONS_PER_QUIZ: usize = 50;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartQuizRequest {
    #[validate(range(min = 1, max = MAX_QUESTIONS_PER_QUIZ))]
    pub num_questions: usize,

    #[validate(length(min = 1, max = 20))]
    pub difficulty: String,

    #[serde(default = "default_topic")]
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
}

fn default_topic() -> String {
    ALL_TOPICS.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    /// 1-based option indices selected by the user.
    #[validate(length(max = 10))]
    pub answer: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_valid_start_quiz_request() {
        let request = StartQuizRequest {
            num_questions: 3,
            difficulty: "easy".to_string(),
            topic: ALL_TOPICS.to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_num_questions_out_of_range() {
        let mut request = StartQuizRequest {
            num_questions: 0,
            difficulty: "easy".to_string(),
            topic: ALL_TOPICS.to_string(),
        };
        assert!(request.validate().is_err());

        request.num_questions = MAX_QUESTIONS_PER_QUIZ + 1;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_topic_defaults_to_all_topics() {
        let request: StartQuizRequest =
            serde_json::from_str(r#"{"num_questions": 2, "difficulty": "hard"}"#).unwrap();
        assert_eq!(request.topic, ALL_TOPICS);
    }

    #[test]
    fn test_submit_answer_rejects_too_many_selections() {
        let request = SubmitAnswerRequest {
            answer: (1..=11).collect(),
        };
        assert!(request.validate().is_err());
    }
}
