//! Error types for the blog API client.
//!
//! # Design
//! `NotFound` is reserved for fetching a single post: the detail page shows a
//! dedicated terminal state for it. Every other non-2xx response lands in
//! `Http`, keeping the server's `{"error": "..."}` text when it sent one.

use thiserror::Error;

use crate::http::TransportError;

/// Errors produced while building requests or parsing responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No API base URL was configured; no request was built.
    #[error("API base URL is not configured")]
    Configuration,

    /// The transport failed before any response arrived.
    #[error("{0}")]
    Network(String),

    /// The requested post does not exist.
    #[error("resource not found")]
    NotFound,

    /// Any other non-2xx response.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no error details"))]
    Http { status: u16, message: Option<String> },

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network(err.0)
    }
}

/// The five API calls, used to phrase errors for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPosts,
    GetPost,
    CreatePost,
    UpdatePost,
    DeletePost,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::ListPosts => "fetch blog posts",
            Operation::GetPost => "fetch blog post",
            Operation::CreatePost => "create post",
            Operation::UpdatePost => "update post",
            Operation::DeletePost => "delete post",
        }
    }

    /// Only writes surface the server's own error text.
    fn shows_server_message(self) -> bool {
        matches!(self, Operation::CreatePost | Operation::UpdatePost)
    }
}

impl ApiError {
    /// The inline message a page shows after `op` failed with this error.
    pub fn user_message(&self, op: Operation) -> String {
        match self {
            ApiError::Configuration | ApiError::Network(_) => self.to_string(),
            ApiError::NotFound => format!("Failed to {} (HTTP 404)", op.verb()),
            ApiError::Http {
                message: Some(message),
                ..
            } if op.shows_server_message() && !message.trim().is_empty() => message.clone(),
            ApiError::Http { status, .. } => format!("Failed to {} (HTTP {status})", op.verb()),
            ApiError::Deserialization(msg) | ApiError::Serialization(msg) => {
                format!("Failed to {}: {msg}", op.verb())
            }
        }
    }
}
