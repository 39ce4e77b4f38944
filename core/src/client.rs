//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `BlogClient` holds only an optional `base_url`. Each operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. The host executes the round-trip.
//!
//! Without a base URL every `build_*` returns `ApiError::Configuration`, so
//! a misconfigured page never has a request to send.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Post, PostId, PostPayload, PostSummary};

/// Synchronous, stateless client for the posts API.
#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: Option<String>,
}

/// Error body the API sends with non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl BlogClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_base_url(Some(base_url))
    }

    pub fn with_base_url(base_url: Option<&str>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        Self { base_url }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_base_url(config.base_url.as_deref())
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        let base = self.base_url.as_deref().ok_or(ApiError::Configuration)?;
        Ok(format!("{base}{path}"))
    }

    fn request(&self, method: HttpMethod, path: &str) -> Result<HttpRequest, ApiError> {
        let request = HttpRequest {
            method,
            path: self.url(path)?,
            headers: Vec::new(),
            body: None,
        };
        tracing::debug!(method = method.as_str(), url = %request.path, "built request");
        Ok(request)
    }

    fn json_request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &PostPayload,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut request = self.request(method, path)?;
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }

    pub fn build_list_posts(&self) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Get, "/posts")
    }

    pub fn build_get_post(&self, id: PostId) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Get, &format!("/posts/{id}"))
    }

    pub fn build_create_post(&self, payload: &PostPayload) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/posts", payload)
    }

    pub fn build_update_post(
        &self,
        id: PostId,
        payload: &PostPayload,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/posts/{id}"), payload)
    }

    pub fn build_delete_post(&self, id: PostId) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Delete, &format!("/posts/{id}"))
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<PostSummary>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// A 404, or a successful response whose body is `null`, means the post
    /// does not exist.
    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        if response.status == 404 {
            return Err(ApiError::NotFound);
        }
        check_status(&response)?;
        let post: Option<Post> = decode(&response.body)?;
        post.ok_or(ApiError::NotFound)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// The confirmation body is ignored.
    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx responses to `ApiError::Http`, keeping the server's message.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.error);
    tracing::warn!(status = response.status, ?message, "API returned an error status");
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Block, DEFAULT_CARD_COLOR};

    fn client() -> BlogClient {
        BlogClient::new("http://localhost:3000")
    }

    fn payload() -> PostPayload {
        PostPayload {
            title: "First".to_string(),
            content: vec![Block(serde_json::json!({"type": "paragraph"}))],
            author: Some("Ann".to_string()),
            category: Some("news".to_string()),
            extra_categories: None,
            cover_image: None,
            card_color: DEFAULT_CARD_COLOR.to_string(),
        }
    }

    const POST_JSON: &str = r#"{"id":5,"title":"First","content":[],"createdAt":"2024-05-01T10:00:00Z","updatedAt":"2024-05-01T10:00:00Z"}"#;

    #[test]
    fn build_list_posts_produces_correct_request() {
        let req = client().build_list_posts().unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/posts");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_post_produces_correct_request() {
        let req = client().build_get_post(5).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/posts/5");
    }

    #[test]
    fn build_create_post_produces_json_request() {
        let req = client().build_create_post(&payload()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/posts");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "First");
        assert_eq!(body["content"][0]["type"], "paragraph");
        assert!(body["coverImage"].is_null());
    }

    #[test]
    fn build_update_post_targets_the_id() {
        let req = client().build_update_post(9, &payload()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/posts/9");
        assert!(req.body.is_some());
    }

    #[test]
    fn build_delete_post_has_no_body() {
        let req = client().build_delete_post(9).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn unconfigured_client_builds_nothing() {
        let client = BlogClient::with_base_url(None);
        assert!(!client.is_configured());
        assert_eq!(client.build_list_posts(), Err(ApiError::Configuration));
        assert_eq!(client.build_get_post(1), Err(ApiError::Configuration));
        assert_eq!(client.build_create_post(&payload()), Err(ApiError::Configuration));
        assert_eq!(client.build_update_post(1, &payload()), Err(ApiError::Configuration));
        assert_eq!(client.build_delete_post(1), Err(ApiError::Configuration));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = BlogClient::new("http://localhost:3000/").build_list_posts().unwrap();
        assert_eq!(req.path, "http://localhost:3000/posts");
    }

    #[test]
    fn parse_list_posts_empty() {
        let posts = client().parse_list_posts(HttpResponse::new(200, "[]")).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn parse_list_posts_error_status_carries_code() {
        let err = client()
            .parse_list_posts(HttpResponse::new(503, "unavailable"))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 503,
                message: None
            }
        );
    }

    #[test]
    fn parse_get_post_not_found() {
        let err = client()
            .parse_get_post(HttpResponse::new(404, r#"{"error":"Post not found"}"#))
            .unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn parse_get_post_null_body_is_not_found() {
        let err = client().parse_get_post(HttpResponse::new(200, "null")).unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn parse_get_post_success() {
        let post = client().parse_get_post(HttpResponse::new(200, POST_JSON)).unwrap();
        assert_eq!(post.id, 5);
    }

    #[test]
    fn parse_create_post_accepts_201() {
        let post = client().parse_create_post(HttpResponse::new(201, POST_JSON)).unwrap();
        assert_eq!(post.title, "First");
    }

    #[test]
    fn parse_update_post_404_keeps_server_message() {
        let err = client()
            .parse_update_post(HttpResponse::new(404, r#"{"error":"Post not found"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                message: Some("Post not found".to_string())
            }
        );
    }

    #[test]
    fn parse_delete_post_ignores_body() {
        assert!(client()
            .parse_delete_post(HttpResponse::new(200, r#"{"message":"Post deleted"}"#))
            .is_ok());
        assert!(client().parse_delete_post(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn parse_list_posts_bad_json() {
        let err = client()
            .parse_list_posts(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
