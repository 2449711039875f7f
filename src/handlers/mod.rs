pub mod quiz_handler;

use actix_web::web;

pub use quiz_handler::{
    health_check, list_topics, next_question, quiz_results, start_quiz, submit_answer,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(list_topics)
        .service(start_quiz)
        .service(next_question)
        .service(submit_answer)
        .service(quiz_results);
}
