pub mod exam_catalog;
pub mod prompts;
