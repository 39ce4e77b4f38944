//! The `/blogs/:id` page: view, edit and delete one post.

use std::fmt;
use std::time::Instant;

use crate::client::BlogClient;
use crate::editor::Editor;
use crate::error::{ApiError, Operation};
use crate::form::{FormMode, PostForm};
use crate::http::{HttpRequest, Outcome};
use crate::route::Route;
use crate::types::{FieldSet, Post, PostId};

use super::{expire, local_date, resolve, LoadState, Notice};

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this post? This action cannot be undone.";

/// The mutating request currently in flight. Save and delete exclude each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Save,
    Delete,
}

#[derive(Debug)]
pub struct DetailPage<E> {
    id: PostId,
    fields: FieldSet,
    state: LoadState<Post>,
    form: PostForm,
    editor: E,
    pending: Option<Pending>,
    /// Inline error from the most recent save or delete.
    error: Option<String>,
    saved: Option<Notice>,
}

impl<E: Editor> DetailPage<E> {
    pub fn new(id: PostId, fields: FieldSet, editor: E) -> Self {
        Self {
            id,
            fields,
            state: LoadState::Idle,
            form: PostForm::new(),
            editor,
            pending: None,
            error: None,
            saved: None,
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn state(&self) -> &LoadState<Post> {
        &self.state
    }

    pub fn post(&self) -> Option<&Post> {
        self.state.loaded()
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PostForm {
        &mut self.form
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn is_saving(&self) -> bool {
        self.pending == Some(Pending::Save)
    }

    pub fn is_deleting(&self) -> bool {
        self.pending == Some(Pending::Delete)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_saved_notice_visible(&self) -> bool {
        self.saved.is_some()
    }

    /// Start fetching the post. Only the first call returns a request.
    pub fn mount(&mut self, client: &BlogClient) -> Option<HttpRequest> {
        if !self.state.is_idle() {
            return None;
        }
        match client.build_get_post(self.id) {
            Ok(request) => {
                self.state = LoadState::Loading;
                Some(request)
            }
            Err(err) => {
                self.fail_load(&err);
                None
            }
        }
    }

    pub fn on_loaded(&mut self, client: &BlogClient, outcome: Outcome) {
        if !self.state.is_loading() {
            tracing::warn!(id = self.id, "post response arrived while no load was pending");
            return;
        }
        match resolve(outcome, |response| client.parse_get_post(response)) {
            Ok(post) => {
                tracing::debug!(id = post.id, blocks = post.content.len(), "loaded post");
                self.form.hydrate(&post);
                self.editor.replace_document(post.content.clone());
                self.state = LoadState::Loaded(post);
            }
            Err(ApiError::NotFound) => {
                tracing::debug!(id = self.id, "post not found");
                self.state = LoadState::NotFound;
            }
            Err(err) => self.fail_load(&err),
        }
    }

    fn fail_load(&mut self, err: &ApiError) {
        tracing::warn!(id = self.id, %err, "loading blog post failed");
        self.state = LoadState::Failed(err.user_message(Operation::GetPost));
    }

    pub fn can_save(&self) -> bool {
        self.post().is_some()
            && self.pending.is_none()
            && self.form.can_submit(FormMode::Update, self.fields)
    }

    pub fn can_delete(&self) -> bool {
        self.post().is_some() && self.pending.is_none()
    }

    /// Build the `PUT` for the current form and editor document.
    pub fn save(&mut self, client: &BlogClient) -> Option<HttpRequest> {
        if !self.can_save() {
            return None;
        }
        self.error = None;
        self.saved = None;

        let payload = self
            .form
            .to_update_payload(self.editor.document(), self.fields);
        match client.build_update_post(self.id, &payload) {
            Ok(request) => {
                self.pending = Some(Pending::Save);
                Some(request)
            }
            Err(err) => {
                self.error = Some(err.user_message(Operation::UpdatePost));
                None
            }
        }
    }

    /// On success the server's record replaces the local one.
    pub fn on_saved(&mut self, client: &BlogClient, outcome: Outcome, now: Instant) {
        if !self.is_saving() {
            tracing::warn!(id = self.id, "save response arrived while no save was pending");
            return;
        }
        self.pending = None;
        match resolve(outcome, |response| client.parse_update_post(response)) {
            Ok(post) => {
                tracing::debug!(id = post.id, "post saved");
                self.state = LoadState::Loaded(post);
                self.saved = Some(Notice::new(now));
            }
            Err(err) => {
                tracing::warn!(id = self.id, %err, "saving post failed");
                self.error = Some(err.user_message(Operation::UpdatePost));
            }
        }
    }

    /// Ask `confirm` before building the `DELETE`. A declined prompt leaves
    /// the page untouched.
    pub fn request_delete(
        &mut self,
        client: &BlogClient,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Option<HttpRequest> {
        if !self.can_delete() {
            return None;
        }
        if !confirm(DELETE_PROMPT) {
            tracing::debug!(id = self.id, "delete declined");
            return None;
        }
        self.error = None;
        self.saved = None;
        match client.build_delete_post(self.id) {
            Ok(request) => {
                self.pending = Some(Pending::Delete);
                Some(request)
            }
            Err(err) => {
                self.error = Some(err.user_message(Operation::DeletePost));
                None
            }
        }
    }

    /// Returns where to navigate once the post is gone.
    pub fn on_deleted(&mut self, client: &BlogClient, outcome: Outcome) -> Option<Route> {
        if !self.is_deleting() {
            tracing::warn!(id = self.id, "delete response arrived while no delete was pending");
            return None;
        }
        self.pending = None;
        match resolve(outcome, |response| client.parse_delete_post(response)) {
            Ok(()) => {
                tracing::info!(id = self.id, "post deleted");
                Some(Route::AllBlogs)
            }
            Err(err) => {
                tracing::warn!(id = self.id, %err, "deleting post failed");
                self.error = Some(err.user_message(Operation::DeletePost));
                None
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        expire(&mut self.saved, now);
    }

    pub fn view(&self) -> DetailView<'_> {
        match &self.state {
            LoadState::Idle | LoadState::Loading => DetailView::Loading,
            LoadState::Failed(message) => DetailView::Error(message),
            LoadState::NotFound => DetailView::NotFound,
            LoadState::Loaded(post) => DetailView::Post(DetailPanel {
                post,
                form: &self.form,
                fields: self.fields,
                saved: self.saved.is_some(),
                error: self.error(),
                saving: self.is_saving(),
                deleting: self.is_deleting(),
                can_save: self.can_save(),
                can_delete: self.can_delete(),
            }),
        }
    }
}

/// Everything the loaded detail page shows.
#[derive(Debug)]
pub struct DetailPanel<'a> {
    pub post: &'a Post,
    pub form: &'a PostForm,
    pub fields: FieldSet,
    pub saved: bool,
    pub error: Option<&'a str>,
    pub saving: bool,
    pub deleting: bool,
    pub can_save: bool,
    pub can_delete: bool,
}

#[derive(Debug)]
pub enum DetailView<'a> {
    Loading,
    Error(&'a str),
    NotFound,
    Post(DetailPanel<'a>),
}

impl fmt::Display for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailView::Loading => writeln!(f, "Loading blog post..."),
            DetailView::Error(message) => writeln!(f, "Error loading blog post: {message}"),
            DetailView::NotFound => writeln!(f, "Blog post not found"),
            DetailView::Post(panel) => write!(f, "{panel}"),
        }
    }
}

impl fmt::Display for DetailPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.form;
        writeln!(f, "Title*: {}", form.title)?;
        writeln!(f, "Author: {}", form.author)?;
        match self.fields {
            FieldSet::Extended => {
                writeln!(f, "Main Category*: {}", form.category)?;
                writeln!(f, "2nd Category: {}", form.category2)?;
                writeln!(f, "3rd Category: {}", form.category3)?;
            }
            FieldSet::Minimal => writeln!(f, "Category: {}", form.category)?,
        }
        writeln!(f, "Cover Image URL: {}", form.cover_image)?;
        writeln!(f, "Card Color: {}", form.card_color)?;
        writeln!(f, "Created: {}", local_date(&self.post.created_at))?;
        writeln!(f, "Last Updated: {}", local_date(&self.post.updated_at))?;
        writeln!(f, "Content: {} block(s)", self.post.content.len())?;
        if self.saved {
            writeln!(f, "Post saved successfully!")?;
        }
        if let Some(error) = self.error {
            writeln!(f, "{error}")?;
        }
        let delete = if self.deleting { "Deleting..." } else { "Delete Post" };
        let save = if self.saving { "Saving..." } else { "Save Changes" };
        writeln!(
            f,
            "[{delete}]{} [{save}]{}",
            if self.can_delete { "" } else { " (disabled)" },
            if self.can_save { "" } else { " (disabled)" },
        )
    }
}
