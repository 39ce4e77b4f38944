use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

const DEFAULT_CARD_COLOR: &str = "#FF5733";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: Vec<Value>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub category2: Option<String>,
    pub category3: Option<String>,
    pub cover_image: Option<String>,
    pub card_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST and PUT. Fields the client leaves out keep their defaults.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    pub title: String,
    #[serde(default)]
    pub content: Vec<Value>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub category2: Option<String>,
    pub category3: Option<String>,
    pub cover_image: Option<String>,
    pub card_color: Option<String>,
}

#[derive(Default)]
pub struct Store {
    posts: RwLock<BTreeMap<i64, Post>>,
    next_id: AtomicI64,
}

pub type Db = Arc<Store>;

type ApiError = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

fn not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, "Post not found")
}

fn validate(input: &PostInput) -> Result<(), ApiError> {
    if input.title.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Title is required"));
    }
    Ok(())
}

pub fn app() -> Router {
    let db: Db = Arc::new(Store::default());
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let posts = db.posts.read().await;
    Json(posts.values().cloned().collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<PostInput>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    validate(&input)?;
    let now = Utc::now();
    let post = Post {
        id: db.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        title: input.title,
        content: input.content,
        author: input.author,
        category: input.category,
        category2: input.category2,
        category3: input.category3,
        cover_image: input.cover_image,
        card_color: input
            .card_color
            .unwrap_or_else(|| DEFAULT_CARD_COLOR.to_string()),
        created_at: now,
        updated_at: now,
    };
    tracing::info!(id = post.id, "created post");
    db.posts.write().await.insert(post.id, post.clone());
    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Post>, ApiError> {
    let posts = db.posts.read().await;
    posts.get(&id).cloned().map(Json).ok_or_else(not_found)
}

/// Full replacement of the editable fields; id and created_at stay.
async fn update_post(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<PostInput>,
) -> Result<Json<Post>, ApiError> {
    let mut posts = db.posts.write().await;
    let post = posts.get_mut(&id).ok_or_else(not_found)?;
    validate(&input)?;
    post.title = input.title;
    post.content = input.content;
    post.author = input.author;
    post.category = input.category;
    post.category2 = input.category2;
    post.category3 = input.category3;
    post.cover_image = input.cover_image;
    post.card_color = input
        .card_color
        .unwrap_or_else(|| DEFAULT_CARD_COLOR.to_string());
    post.updated_at = Utc::now();
    tracing::info!(id, "updated post");
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Value>, ApiError> {
    let mut posts = db.posts.write().await;
    posts.remove(&id).ok_or_else(not_found)?;
    tracing::info!(id, "deleted post");
    Ok(Json(json!({ "message": "Post deleted" })))
}
