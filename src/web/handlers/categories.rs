// GET /api/categories — the categories a word can be analyzed against,
// with the newsgroups behind each one and the leaderboard size in effect.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::corpus::Category;
use crate::web::AppState;

pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let categories: Vec<serde_json::Value> = Category::ALL
        .into_iter()
        .map(|c| {
            serde_json::json!({
                "name": c.as_str(),
                "newsgroups": c.newsgroups(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "categories": categories,
        "top_k": state.config.top_k,
    }))
}
