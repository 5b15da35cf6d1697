use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::db::categories::get_all_categories;
use crate::db::{questions, NewQuestion};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::pagination::paginate;

use super::{category_map, QuestionListResponse};

/// Raw create payload. `category` and `difficulty` arrive as either numbers
/// or numeric strings depending on the client, so they are validated before
/// any coercion happens.
#[derive(Deserialize)]
struct NewQuestionBody {
    question: String,
    answer: String,
    category: Value,
    difficulty: Value,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: String,
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

#[derive(Serialize)]
struct MessageResponse {
    success: bool,
    message: String,
}

fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Pure validation over the raw payload, listing every offending field.
fn validate_new_question(body: NewQuestionBody) -> Result<NewQuestion, Vec<&'static str>> {
    let mut invalid = Vec::new();
    if body.question.is_empty() {
        invalid.push("question");
    }
    if body.answer.is_empty() {
        invalid.push("answer");
    }
    let category = coerce_id(&body.category);
    if category.is_none() {
        invalid.push("category");
    }
    let difficulty = coerce_id(&body.difficulty);
    if difficulty.is_none() {
        invalid.push("difficulty");
    }

    match (category, difficulty) {
        (Some(category), Some(difficulty)) if invalid.is_empty() => Ok(NewQuestion {
            question: body.question,
            answer: body.answer,
            category,
            difficulty,
        }),
        _ => Err(invalid),
    }
}

/// Paginated listing, 10 questions per page. `total_questions` is the grand
/// total, not the page size.
async fn list_questions(
    State(pool): State<SqlitePool>,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<QuestionListResponse> {
    // A missing or non-numeric page means the first page.
    let page = page
        .map(|Query(PageQuery { page })| page.unwrap_or(1))
        .unwrap_or(1);

    let all = questions::get_all_questions(&pool).await?;
    let current = paginate(&all, page as usize);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = get_all_categories(&pool).await?;
    Ok(Json(QuestionListResponse {
        success: true,
        questions: current.to_vec(),
        current_category: categories.iter().map(|c| c.id).collect(),
        categories: category_map(&categories),
        total_questions: all.len() as i64,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<NewQuestionBody>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;
    let new = validate_new_question(body).map_err(|fields| {
        tracing::debug!(?fields, "rejected question payload");
        ApiError::BadRequest
    })?;

    questions::create_question(&pool, &new).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "question created successfully".to_owned(),
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<MessageResponse> {
    // A non-integer id can never name a row.
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    if questions::delete_question(&pool, id).await? == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(Json(MessageResponse {
        success: true,
        message: format!("question with the id of {id} was deleted successfully"),
    }))
}

/// Case-insensitive substring search. `total_questions` here is the match
/// count, mirroring what the frontend expects from this endpoint.
async fn search_questions(
    State(pool): State<SqlitePool>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResult<QuestionListResponse> {
    let Json(SearchBody { search_term }) = body.map_err(|_| ApiError::BadRequest)?;
    if search_term.is_empty() {
        return Err(ApiError::NotFound);
    }

    let matches = questions::search_questions(&pool, &search_term).await?;
    if matches.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = get_all_categories(&pool).await?;
    Ok(Json(QuestionListResponse {
        success: true,
        total_questions: matches.len() as i64,
        questions: matches,
        current_category: categories.iter().map(|c| c.id).collect(),
        categories: category_map(&categories),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/api/questions/", get(list_questions).post(create_question))
        .route("/api/questions/{id}", delete(delete_question))
        .route("/api/questions/search/", post(search_questions))
        .with_state(state)
}
