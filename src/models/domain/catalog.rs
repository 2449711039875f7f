use serde::{Deserialize, Serialize};

use crate::constants::exam_catalog::MS900_TOPICS;
use crate::errors::{AppError, AppResult};

/// Topic name that asks the rotator to pick a concrete topic at random.
pub const ALL_TOPICS: &str = "All Topics";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Objective {
    pub objective: String,
    #[serde(default)]
    pub sub_objectives: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Topic {
    pub name: String,
    pub objectives: Vec<Objective>,
}

/// A concrete topic/objective/sub-objective triple picked by the rotator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectiveSelection {
    pub topic: String,
    pub objective: String,
    pub sub_objective: Option<String>,
}

/// Exam syllabus, loaded once at startup. Every topic has at least one
/// objective and the catalog has at least one topic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    topics: Vec<Topic>,
}

impl Catalog {
    pub fn new(topics: Vec<Topic>) -> AppResult<Self> {
        if topics.is_empty() {
            return Err(AppError::ValidationError(
                "Exam catalog must contain at least one topic".to_string(),
            ));
        }

        for topic in &topics {
            if topic.name.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Exam catalog topic names cannot be empty".to_string(),
                ));
            }
            if topic.name == ALL_TOPICS {
                return Err(AppError::ValidationError(format!(
                    "'{}' is reserved and cannot be a catalog topic",
                    ALL_TOPICS
                )));
            }
            if topic.objectives.is_empty() {
                return Err(AppError::ValidationError(format!(
                    "Topic '{}' has no objectives",
                    topic.name
                )));
            }
        }

        Ok(Self { topics })
    }

    pub fn builtin() -> Self {
        let topics = MS900_TOPICS
            .iter()
            .map(|(name, objectives)| Topic {
                name: name.to_string(),
                objectives: objectives
                    .iter()
                    .map(|(objective, subs)| Objective {
                        objective: objective.to_string(),
                        sub_objectives: subs.iter().map(|s| s.to_string()).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self { topics }
    }

    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let topics: Vec<Topic> = serde_json::from_str(json)
            .map_err(|e| AppError::ValidationError(format!("Invalid exam catalog: {}", e)))?;
        Self::new(topics)
    }

    /// Loads the catalog from `path` when given, otherwise the built-in one.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    AppError::InternalError(format!(
                        "Failed to read exam catalog '{}': {}",
                        path, e
                    ))
                })?;
                log::info!("Loading exam catalog from {}", path);
                Self::from_json_str(&json)
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// True for catalog topics and for [`ALL_TOPICS`].
    pub fn accepts_topic(&self, name: &str) -> bool {
        name == ALL_TOPICS || self.topic(name).is_some()
    }

    pub fn topic_names(&self) -> Vec<String> {
        self.topics
            .iter()
            .map(|t| t.name.clone())
            .chain(std::iter::once(ALL_TOPICS.to_string()))
            .collect()
    }
}
