#[cfg(test)]
pub mod fixtures {
    use std::collections::BTreeMap;

    use crate::models::domain::catalog::ObjectiveSelection;
    use crate::models::domain::question::{
        AnswerKey, Difficulty, Question, QuestionSpec, QuestionType,
    };
    use crate::services::documentation_lookup::MockDocumentationLookup;
    use crate::services::generation_service::{GenerationRequest, MockQuestionGenerationService};

    fn explanations(count: u32) -> BTreeMap<String, String> {
        (1..=count)
            .map(|i| (i.to_string(), format!("Explanation {}", i)))
            .collect()
    }

    fn four_options() -> Vec<String> {
        vec![
            "Option A".to_string(),
            "Option B".to_string(),
            "Option C".to_string(),
            "Option D".to_string(),
        ]
    }

    /// Four-option multiple-choice question on `topic`.
    pub fn single_answer_question(text: &str, topic: &str, correct: u32) -> Question {
        Question {
            question: text.to_string(),
            options: four_options(),
            answer: AnswerKey::Single(correct),
            explanations: explanations(4),
            topic: topic.to_string(),
            objective: format!("Objective for {}", topic),
            sub_objective: None,
        }
    }

    /// Four-option multi-response question on `topic`.
    pub fn multi_response_question(text: &str, topic: &str, correct: Vec<u32>) -> Question {
        Question {
            answer: AnswerKey::Multiple(correct),
            ..single_answer_question(text, topic, 1)
        }
    }

    pub fn question_spec(question_type: QuestionType) -> QuestionSpec {
        QuestionSpec::new(
            Difficulty::Easy,
            question_type,
            ObjectiveSelection {
                topic: "Describe cloud concepts".to_string(),
                objective: "Describe the different types of cloud services available".to_string(),
                sub_objective: Some(
                    "Describe differences between Office 365 and Microsoft 365".to_string(),
                ),
            },
        )
    }

    /// Raw model output for a valid multiple-choice question.
    pub fn raw_multiple_choice_json() -> String {
        serde_json::json!({
            "question": "Which cloud service model lets you host a website without managing servers?",
            "options": ["SaaS", "PaaS", "IaaS", "CaaS"],
            "correct_answer": 2,
            "explanations": {
                "1": "SaaS delivers finished applications.",
                "2": "PaaS hosts applications without server management.",
                "3": "IaaS still requires managing virtual machines.",
                "4": "CaaS focuses on containers."
            }
        })
        .to_string()
    }

    /// Raw model output for a valid multi-response question.
    pub fn raw_multi_response_json() -> String {
        serde_json::json!({
            "question": "Which two are benefits of cloud migration? Each correct answer presents a complete solution.",
            "options": ["Lower latency", "Automated backup", "Elastic scale", "Fewer desktops"],
            "correct_answers": [2, 3],
            "explanations": {
                "1": "Incorrect.",
                "2": "Correct.",
                "3": "Correct.",
                "4": "Incorrect."
            }
        })
        .to_string()
    }

    /// Raw model output for a valid true/false question.
    pub fn raw_true_false_json() -> String {
        serde_json::json!({
            "question": "Microsoft 365 includes Windows.",
            "options": ["True", "False"],
            "correct_answer": 1,
            "explanations": {"1": "Correct.", "2": "Incorrect."}
        })
        .to_string()
    }

    /// Replies with a question shaped for whatever type the prompt asks for.
    pub fn reply_for(request: &GenerationRequest) -> String {
        if request.prompt.contains("multi-response") {
            raw_multi_response_json()
        } else if request.prompt.contains("true/false") {
            raw_true_false_json()
        } else {
            raw_multiple_choice_json()
        }
    }

    /// Generator that always produces a valid question of the requested type.
    pub fn scripted_generator() -> MockQuestionGenerationService {
        let mut generator = MockQuestionGenerationService::new();
        generator
            .expect_generate()
            .returning(|request| Ok(reply_for(request)));
        generator
    }

    /// Lookup that never finds documentation.
    pub fn no_docs() -> MockDocumentationLookup {
        let mut docs = MockDocumentationLookup::new();
        docs.expect_lookup().returning(|_| None);
        docs
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_produce_valid_questions() {
        assert!(single_answer_question("Q", "T", 1).validate().is_ok());
        assert!(multi_response_question("Q", "T", vec![1, 4]).validate().is_ok());
    }

    #[test]
    fn test_fixture_objective_follows_topic() {
        let question = single_answer_question("Q", "Describe cloud concepts", 1);
        assert_eq!(question.objective, "Objective for Describe cloud concepts");
    }
}
