use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::{
        domain::quiz_session::QuizSession,
        dto::{
            request::{StartQuizRequest, SubmitAnswerRequest},
            response::{
                NextQuestionResponse, QuestionView, StartQuizResponse, SubmitAnswerResponse,
                TopicsResponse,
            },
        },
    },
};

pub fn results_url(id: Uuid) -> String {
    format!("/api/quiz/{}/results", id)
}

fn current_view(session: &QuizSession) -> Option<QuestionView> {
    session
        .current_question()
        .map(|q| QuestionView::new(q, session.current_question, session.num_questions))
}

async fn load_session(state: &AppState, id: Uuid) -> AppResult<QuizSession> {
    state
        .sessions
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::session_not_found(id))
}

async fn save_session(state: &AppState, id: Uuid, session: &QuizSession) -> AppResult<()> {
    if state.sessions.update(id, session).await? {
        Ok(())
    } else {
        Err(AppError::session_not_found(id))
    }
}

#[post("/api/quiz")]
pub async fn start_quiz(
    state: web::Data<AppState>,
    request: web::Json<StartQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state.quiz_engine.start_quiz(&request).await?;
    let session_id = state.sessions.create(&session).await?;
    log::info!("Created quiz session {}", session_id);

    Ok(HttpResponse::Created().json(StartQuizResponse {
        session_id,
        question: current_view(&session),
    }))
}

#[get("/api/quiz/{id}/question")]
pub async fn next_question(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let mut session = load_session(&state, id).await?;

    if session.is_complete() {
        return Ok(HttpResponse::Ok().json(NextQuestionResponse::Redirect {
            redirect: results_url(id),
        }));
    }

    if session.needs_question() {
        let generated = state
            .quiz_engine
            .ensure_current_question(&mut session)
            .await
            .is_some();
        if generated {
            save_session(&state, id, &session).await?;
        }
    }

    Ok(HttpResponse::Ok().json(NextQuestionResponse::Question {
        question: current_view(&session),
    }))
}

#[post("/api/quiz/{id}/answer")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let mut session = load_session(&state, id).await?;
    let outcome = state
        .quiz_engine
        .submit_answer(&mut session, &request.answer)
        .await?;
    save_session(&state, id, &session).await?;

    Ok(HttpResponse::Ok().json(SubmitAnswerResponse {
        feedback: outcome.feedback,
        is_last_question: outcome.is_last_question,
        result_url: outcome.is_last_question.then(|| results_url(id)),
    }))
}

#[get("/api/quiz/{id}/results")]
pub async fn quiz_results(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = load_session(&state, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(state.quiz_engine.results(&session)))
}

#[get("/api/topics")]
pub async fn list_topics(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(TopicsResponse {
        exam_code: state.quiz_engine.exam_code().to_string(),
        topics: state.quiz_engine.catalog().topic_names(),
    })
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "exam": state.config.exam.exam_code,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::config::Config;
    use crate::models::domain::catalog::{Catalog, ALL_TOPICS};
    use crate::repositories::InMemoryQuizSessionRepository;
    use crate::services::generation_service::{GenerationError, MockQuestionGenerationService};
    use crate::test_utils::fixtures::{no_docs, scripted_generator};

    fn state_with(generator: MockQuestionGenerationService) -> AppState {
        AppState::with_collaborators(
            Config::test_config(),
            Catalog::builtin(),
            Arc::new(generator),
            Arc::new(no_docs()),
            Arc::new(InMemoryQuizSessionRepository::new()),
        )
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(crate::handlers::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = app!(state_with(scripted_generator()));

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["exam"], "MS-900");
    }

    #[actix_web::test]
    async fn test_topics_end_with_all_topics() {
        let app = app!(state_with(scripted_generator()));

        let req = test::TestRequest::get().uri("/api/topics").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let topics = body["topics"].as_array().unwrap();
        assert_eq!(topics.len(), 5);
        assert_eq!(topics[4], ALL_TOPICS);
    }

    #[actix_web::test]
    async fn test_start_quiz_returns_first_question() {
        let app = app!(state_with(scripted_generator()));

        let req = test::TestRequest::post()
            .uri("/api/quiz")
            .set_json(json!({"num_questions": 3, "difficulty": "easy", "topic": ALL_TOPICS}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["session_id"].is_string());
        assert_eq!(body["question"]["question_number"], 1);
        assert_eq!(body["question"]["num_questions"], 3);
        assert!(body["question"].get("correct_answer").is_none());
    }

    #[actix_web::test]
    async fn test_start_quiz_rejects_invalid_input() {
        let app = app!(state_with(scripted_generator()));

        let too_many = test::TestRequest::post()
            .uri("/api/quiz")
            .set_json(json!({"num_questions": 500, "difficulty": "easy"}))
            .to_request();
        assert_eq!(test::call_service(&app, too_many).await.status(), StatusCode::BAD_REQUEST);

        let bad_difficulty = test::TestRequest::post()
            .uri("/api/quiz")
            .set_json(json!({"num_questions": 2, "difficulty": "extreme"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, bad_difficulty).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_unknown_session_is_not_found() {
        let app = app!(state_with(scripted_generator()));
        let id = Uuid::new_v4();

        for uri in [
            format!("/api/quiz/{}/question", id),
            format!("/api/quiz/{}/results", id),
        ] {
            let req = test::TestRequest::get().uri(&uri).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        }

        let req = test::TestRequest::post()
            .uri(&format!("/api/quiz/{}/answer", id))
            .set_json(json!({"answer": [1]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_answering_last_question_points_to_results() {
        let app = app!(state_with(scripted_generator()));

        let req = test::TestRequest::post()
            .uri("/api/quiz")
            .set_json(json!({"num_questions": 1, "difficulty": "medium"}))
            .to_request();
        let started: Value = test::call_and_read_body_json(&app, req).await;
        let id = started["session_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/quiz/{}/answer", id))
            .set_json(json!({"answer": [1]}))
            .to_request();
        let answered: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(answered["is_last_question"], true);
        assert_eq!(answered["result_url"], format!("/api/quiz/{}/results", id));
        assert!(answered["feedback"]["doc_link"].is_null());

        let req = test::TestRequest::get()
            .uri(&format!("/api/quiz/{}/question", id))
            .to_request();
        let next: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(next, json!({"redirect": format!("/api/quiz/{}/results", id)}));

        let req = test::TestRequest::get()
            .uri(&format!("/api/quiz/{}/results", id))
            .to_request();
        let results: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(results["num_questions"], 1);
        assert_eq!(results["answered"], 1);
        assert_eq!(results["summary"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_failed_generation_returns_null_question() {
        let mut generator = MockQuestionGenerationService::new();
        generator
            .expect_generate()
            .returning(|_| Err(GenerationError::EmptyResponse));
        let app = app!(state_with(generator));

        let req = test::TestRequest::post()
            .uri("/api/quiz")
            .set_json(json!({"num_questions": 2, "difficulty": "hard"}))
            .to_request();
        let started: Value = test::call_and_read_body_json(&app, req).await;
        assert!(started["question"].is_null());

        let id = started["session_id"].as_str().unwrap();
        let req = test::TestRequest::get()
            .uri(&format!("/api/quiz/{}/question", id))
            .to_request();
        let next: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(next, json!({"question": null}));

        let req = test::TestRequest::post()
            .uri(&format!("/api/quiz/{}/answer", id))
            .set_json(json!({"answer": [1]}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
