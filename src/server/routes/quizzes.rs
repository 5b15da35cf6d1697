use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::db::{questions, Question};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

// The frontend sends the id as a number for "all" (0) and as a numeric
// string for a picked category.
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: QuizQuestion,
}

/// Either a drawn question record or the empty string the frontend treats as
/// "game over".
#[derive(Serialize)]
#[serde(untagged)]
enum QuizQuestion {
    Drawn(Question),
    Empty(String),
}

/// Draws one random question for a quiz round. Category id 0 means no
/// filter; otherwise only questions of that category are candidates, minus
/// the ones already played this round. Anything wrong with the payload is
/// reported as 422.
async fn quiz_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResult<QuizResponse> {
    let Json(body) = body.map_err(|_| ApiError::Unprocessable)?;

    let all = questions::get_all_questions(&pool).await?;
    let mut candidates: Vec<Question> = all
        .into_iter()
        .filter(|q| body.quiz_category.id == 0 || q.category == body.quiz_category.id)
        .filter(|q| !body.previous_questions.contains(&q.id))
        .collect();

    let question = if candidates.is_empty() {
        QuizQuestion::Empty(String::new())
    } else {
        QuizQuestion::Drawn(candidates.swap_remove(fastrand::usize(..candidates.len())))
    };

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/api/quizzes/", post(quiz_question))
        .with_state(state)
}
