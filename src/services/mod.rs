pub mod documentation_lookup;
pub mod generation_service;
pub mod prompt_builder;
pub mod question_parser;
pub mod quiz_engine;
pub mod topic_rotator;
