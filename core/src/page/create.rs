//! The `/create-blog` page.

use std::fmt;
use std::time::Instant;

use crate::client::BlogClient;
use crate::editor::Editor;
use crate::error::Operation;
use crate::form::{FormMode, PostForm};
use crate::http::{HttpRequest, Outcome};
use crate::types::{Block, FieldSet, PostId};

use super::{expire, resolve, Notice};

/// Nothing to fetch: the page starts with an empty form and document.
#[derive(Debug)]
pub struct CreatePage<E> {
    fields: FieldSet,
    form: PostForm,
    editor: E,
    preview: Vec<Block>,
    submitting: bool,
    error: Option<String>,
    published: Option<Notice>,
    last_created: Option<PostId>,
}

impl<E: Editor> CreatePage<E> {
    pub fn new(fields: FieldSet, mut editor: E) -> Self {
        editor.replace_document(Vec::new());
        Self {
            fields,
            form: PostForm::new(),
            editor,
            preview: Vec::new(),
            submitting: false,
            error: None,
            published: None,
            last_created: None,
        }
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

    /// Local mirror of the editor, refreshed on every edit.
    pub fn preview(&self) -> &[Block] {
        &self.preview
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_published_notice_visible(&self) -> bool {
        self.published.is_some()
    }

    /// Id of the most recent post created from this page.
    pub fn last_created(&self) -> Option<PostId> {
        self.last_created
    }

    /// The editor reports a local edit.
    pub fn on_editor_change(&mut self) {
        self.preview = self.editor.document();
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && self.form.can_submit(FormMode::Create, self.fields)
    }

    pub fn submit(&mut self, client: &BlogClient) -> Option<HttpRequest> {
        if !self.can_submit() {
            return None;
        }
        self.error = None;
        self.published = None;

        let payload = self
            .form
            .to_create_payload(self.editor.document(), self.fields);
        match client.build_create_post(&payload) {
            Ok(request) => {
                self.submitting = true;
                Some(request)
            }
            Err(err) => {
                self.error = Some(err.user_message(Operation::CreatePost));
                None
            }
        }
    }

    /// On success the form and the editor start over.
    pub fn on_submitted(&mut self, client: &BlogClient, outcome: Outcome, now: Instant) {
        if !self.submitting {
            tracing::warn!("create response arrived while nothing was submitted");
            return;
        }
        self.submitting = false;
        match resolve(outcome, |response| client.parse_create_post(response)) {
            Ok(post) => {
                tracing::info!(id = post.id, title = %post.title, "post published");
                self.form.reset();
                self.editor.replace_document(Vec::new());
                self.preview.clear();
                self.last_created = Some(post.id);
                self.published = Some(Notice::new(now));
            }
            Err(err) => {
                tracing::warn!(%err, "publishing post failed");
                self.error = Some(err.user_message(Operation::CreatePost));
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        expire(&mut self.published, now);
    }

    pub fn view(&self) -> CreateView<'_> {
        CreateView {
            form: &self.form,
            fields: self.fields,
            blocks: self.preview.len(),
            published: self.published.is_some(),
            error: self.error(),
            submitting: self.submitting,
            can_submit: self.can_submit(),
        }
    }
}

#[derive(Debug)]
pub struct CreateView<'a> {
    pub form: &'a PostForm,
    pub fields: FieldSet,
    pub blocks: usize,
    pub published: bool,
    pub error: Option<&'a str>,
    pub submitting: bool,
    pub can_submit: bool,
}

impl fmt::Display for CreateView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.form;
        writeln!(f, "Title*: {}", form.title)?;
        writeln!(f, "Author: {}", form.author)?;
        writeln!(f, "Category: {}", form.category)?;
        if self.fields.has_extra_categories() {
            writeln!(f, "2nd Category: {}", form.category2)?;
            writeln!(f, "3rd Category: {}", form.category3)?;
        }
        writeln!(f, "Cover Image URL: {}", form.cover_image)?;
        writeln!(f, "Card Color: {}", form.card_color)?;
        writeln!(f, "Content: {} block(s)", self.blocks)?;
        if self.published {
            writeln!(f, "Post saved successfully!")?;
        }
        if let Some(error) = self.error {
            writeln!(f, "Error saving post: {error}")?;
        }
        let label = if self.submitting { "Publishing..." } else { "Publish Post" };
        writeln!(
            f,
            "[{label}]{}",
            if self.can_submit { "" } else { " (disabled)" }
        )
    }
}
