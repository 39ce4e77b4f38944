//! Editable post fields.
//!
//! Every scalar field is mirrored as its own `String`, so editing the author
//! never requires touching the title. Normalization to the wire shape only
//! happens when a payload is built.

use crate::types::{Block, ExtraCategories, FieldSet, Post, PostPayload, DEFAULT_CARD_COLOR};

const DEFAULT_AUTHOR: &str = "Anonymous";
const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Whether the form feeds a new post or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub author: String,
    pub category: String,
    pub category2: String,
    pub category3: String,
    pub cover_image: String,
    pub card_color: String,
}

impl Default for PostForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            category: String::new(),
            category2: String::new(),
            category3: String::new(),
            cover_image: String::new(),
            card_color: DEFAULT_CARD_COLOR.to_string(),
        }
    }
}

/// `""` (or whitespace) becomes `None`.
fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the fetched scalar fields into the form.
    pub fn hydrate(&mut self, post: &Post) {
        self.title = post.title.clone();
        self.author = post.author.clone().unwrap_or_default();
        self.category = post.category.clone().unwrap_or_default();
        self.category2 = post.category2.clone().unwrap_or_default();
        self.category3 = post.category3.clone().unwrap_or_default();
        self.cover_image = post.cover_image.clone().unwrap_or_default();
        self.card_color = post.card_color.clone();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Required fields are present for `mode` under `fields`.
    pub fn can_submit(&self, mode: FormMode, fields: FieldSet) -> bool {
        if self.title.trim().is_empty() {
            return false;
        }
        match mode {
            FormMode::Create => true,
            FormMode::Update => !fields.has_extra_categories() || !self.category.trim().is_empty(),
        }
    }

    fn extra_categories(&self, fields: FieldSet) -> Option<ExtraCategories> {
        fields.has_extra_categories().then(|| ExtraCategories {
            category2: non_empty(&self.category2),
            category3: non_empty(&self.category3),
        })
    }

    /// Body for `POST /posts`. Blank author, category and color fall back to
    /// the publishing defaults.
    pub fn to_create_payload(&self, content: Vec<Block>, fields: FieldSet) -> PostPayload {
        PostPayload {
            title: self.title.clone(),
            content,
            author: Some(non_empty(&self.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string())),
            category: Some(
                non_empty(&self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            ),
            extra_categories: self.extra_categories(fields),
            cover_image: non_empty(&self.cover_image),
            card_color: non_empty(&self.card_color)
                .unwrap_or_else(|| DEFAULT_CARD_COLOR.to_string()),
        }
    }

    /// Body for `PUT /posts/{id}`: the full field set as edited.
    pub fn to_update_payload(&self, content: Vec<Block>, fields: FieldSet) -> PostPayload {
        PostPayload {
            title: self.title.clone(),
            content,
            author: non_empty(&self.author),
            category: non_empty(&self.category),
            extra_categories: self.extra_categories(fields),
            cover_image: non_empty(&self.cover_image),
            card_color: non_empty(&self.card_color)
                .unwrap_or_else(|| DEFAULT_CARD_COLOR.to_string()),
        }
    }
}
