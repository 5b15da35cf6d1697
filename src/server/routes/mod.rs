mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::{Category, Question};

/// Response shape shared by the listing, search and by-category endpoints.
/// `total_questions` carries whatever count the endpoint documents: the grand
/// total for the paginated listing, the match count everywhere else.
#[derive(Serialize)]
pub(crate) struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub categories: BTreeMap<i64, String>,
    pub current_category: Vec<i64>,
    pub total_questions: i64,
}

/// Categories keyed by id. Integer keys keep the map in numeric order;
/// serde_json renders them as the string keys the frontend consumes.
pub(crate) fn category_map(categories: &[Category]) -> BTreeMap<i64, String> {
    categories.iter().map(|c| (c.id, c.name.clone())).collect()
}
