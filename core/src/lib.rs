//! Sans-IO client core for the blog authoring app.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and models each routed page
//! (list, detail/edit, create) as a small state machine the host drives.
//!
//! # Design
//! - `BlogClient` is stateless. It holds only an optional `base_url`; a
//!   missing one turns every `build_*` into `ApiError::Configuration`.
//! - Pages own their state: there is no shared store between them.
//! - The rich-text editor sits behind the `Editor` trait and its document is
//!   carried as opaque `Block` values.

pub mod client;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod http;
pub mod page;
pub mod route;
pub mod shell;
pub mod types;

pub use client::BlogClient;
pub use config::ApiConfig;
pub use editor::{BlockDocument, Editor};
pub use error::{ApiError, Operation};
pub use form::{FormMode, PostForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Outcome, TransportError};
pub use page::{CreatePage, DetailPage, ListPage, LoadState};
pub use route::Route;
pub use shell::Page;
pub use types::{Block, FieldSet, Post, PostId, PostPayload, PostSummary};
