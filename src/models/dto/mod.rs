pub mod generated_question;
pub mod request;
pub mod response;
