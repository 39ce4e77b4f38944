//! The `/all-blogs` page.

use std::fmt;

use crate::client::BlogClient;
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, Outcome};
use crate::route::Route;
use crate::types::PostSummary;

use super::{local_date, resolve, LoadState};

#[derive(Debug, Default)]
pub struct ListPage {
    state: LoadState<Vec<PostSummary>>,
}

impl ListPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState<Vec<PostSummary>> {
        &self.state
    }

    /// Start the one and only load. Later calls return `None`.
    pub fn mount(&mut self, client: &BlogClient) -> Option<HttpRequest> {
        if !self.state.is_idle() {
            return None;
        }
        match client.build_list_posts() {
            Ok(request) => {
                self.state = LoadState::Loading;
                Some(request)
            }
            Err(err) => {
                self.fail(&err);
                None
            }
        }
    }

    pub fn on_loaded(&mut self, client: &BlogClient, outcome: Outcome) {
        if !self.state.is_loading() {
            tracing::warn!("list response arrived while no load was pending");
            return;
        }
        match resolve(outcome, |response| client.parse_list_posts(response)) {
            Ok(posts) => {
                tracing::debug!(count = posts.len(), "loaded post list");
                self.state = LoadState::Loaded(posts);
            }
            Err(err) => self.fail(&err),
        }
    }

    fn fail(&mut self, err: &ApiError) {
        tracing::warn!(%err, "loading blog posts failed");
        self.state = LoadState::Failed(err.user_message(Operation::ListPosts));
    }

    pub fn view(&self) -> ListView {
        match &self.state {
            LoadState::Idle | LoadState::Loading => ListView::Loading,
            LoadState::Failed(message) => ListView::Error(message.clone()),
            // The list endpoint has no 404 of its own.
            LoadState::NotFound => ListView::Empty,
            LoadState::Loaded(posts) if posts.is_empty() => ListView::Empty,
            LoadState::Loaded(posts) => ListView::Posts(
                posts
                    .iter()
                    .map(|post| PostLink {
                        route: Route::BlogDetail(post.id),
                        title: post.title.clone(),
                        created: local_date(&post.created_at),
                    })
                    .collect(),
            ),
        }
    }
}

/// One card on the list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLink {
    pub route: Route,
    pub title: String,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Error(String),
    Empty,
    Posts(Vec<PostLink>),
}

impl ListView {
    pub fn links(&self) -> &[PostLink] {
        match self {
            ListView::Posts(links) => links,
            _ => &[],
        }
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListView::Loading => writeln!(f, "Loading blogs..."),
            ListView::Error(message) => writeln!(f, "Error loading blog posts: {message}"),
            ListView::Empty => {
                writeln!(f, "All blogs")?;
                writeln!(f, "No blog posts found.")
            }
            ListView::Posts(links) => {
                writeln!(f, "All blogs")?;
                for link in links {
                    writeln!(f, "- {} [{}] Created: {}", link.title, link.route, link.created)?;
                }
                Ok(())
            }
        }
    }
}
