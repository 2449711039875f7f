use std::env;
use std::time::Duration;

use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub openai_api_key: SecretString,
    pub openai_api_base: Option<String>,
    pub openai_model: String,
    pub openai_temperature: f32,
    pub exam: ExamProfile,
    pub search_api_url: String,
    pub search_api_key: SecretString,
    pub search_engine_id: String,
    pub generation_timeout_secs: u64,
    pub lookup_timeout_secs: u64,
    pub exam_catalog_path: Option<String>,
    pub session_ttl_secs: u64,
    pub max_sessions: usize,
}

/// Identifies the certification a quiz is generated for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamProfile {
    pub exam_code: String,
    pub program_name: String,
    pub docs_site: String,
}

impl Default for ExamProfile {
    fn default() -> Self {
        Self {
            exam_code: "MS-900".to_string(),
            program_name: "Microsoft 365 Fundamentals".to_string(),
            docs_site: "microsoft.com".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = ExamProfile::default();
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE").ok().filter(|v| !v.trim().is_empty()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_temperature: env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(0.7),
            exam: ExamProfile {
                exam_code: env::var("EXAM_CODE").unwrap_or(defaults.exam_code),
                program_name: env::var("EXAM_PROGRAM_NAME").unwrap_or(defaults.program_name),
                docs_site: env::var("DOCS_SITE").unwrap_or(defaults.docs_site),
            },
            search_api_url: env::var("SEARCH_API_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/customsearch/v1".to_string()),
            search_api_key: SecretString::from(env::var("SEARCH_API_KEY").unwrap_or_default()),
            search_engine_id: env::var("SEARCH_ENGINE_ID").unwrap_or_default(),
            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            lookup_timeout_secs: env::var("LOOKUP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            exam_catalog_path: env::var("EXAM_CATALOG_PATH").ok().filter(|p| !p.trim().is_empty()),
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7200),
            max_sessions: env::var("MAX_SESSIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_000),
        }
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Returns the problems that would keep the service from generating
    /// questions or finding documentation. Missing search credentials only
    /// degrade feedback, so they are reported but not fatal.
    pub fn validate_for_production(&self) -> Vec<String> {
        use secrecy::ExposeSecret;

        let mut problems = Vec::new();
        if self.openai_api_key.expose_secret().trim().is_empty() {
            problems.push("OPENAI_API_KEY is not set; no questions can be generated".to_string());
        }
        if self.search_api_key.expose_secret().trim().is_empty()
            || self.search_engine_id.is_empty()
        {
            problems.push(
                "SEARCH_API_KEY or SEARCH_ENGINE_ID is not set; feedback will omit documentation links"
                    .to_string(),
            );
        }
        if !(0.0..=2.0).contains(&self.openai_temperature) {
            problems.push(format!(
                "OPENAI_TEMPERATURE {} is outside 0.0..=2.0",
                self.openai_temperature
            ));
        }
        problems
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            openai_api_key: SecretString::from("test-openai-key".to_string()),
            openai_api_base: None,
            openai_model: "gpt-4o".to_string(),
            openai_temperature: 0.7,
            exam: ExamProfile::default(),
            search_api_url: "http://127.0.0.1:9/search".to_string(),
            search_api_key: SecretString::from("test-search-key".to_string()),
            search_engine_id: "test-cx".to_string(),
            generation_timeout_secs: 2,
            lookup_timeout_secs: 1,
            exam_catalog_path: None,
            session_ttl_secs: 600,
            max_sessions: 100,
        }
    }
}
