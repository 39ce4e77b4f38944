//! One function per subcommand. Each mounts a page, runs its requests
//! through the transport and prints what the page shows.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use blog_core::shell::{Landing, NavBar};
use blog_core::{
    Block, BlockDocument, BlogClient, CreatePage, DetailPage, FieldSet, ListPage, LoadState, Page,
    PostForm, PostId, Route,
};
use clap::Args;

use crate::transport::Transport;

/// Field values given on the command line. Unset flags leave the form alone.
#[derive(Args, Debug, Default)]
pub struct PostFields {
    /// Title of the post
    #[arg(short, long)]
    pub title: Option<String>,

    /// Name of the author
    #[arg(short, long)]
    pub author: Option<String>,

    /// Main category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Second category (extended field set only)
    #[arg(long)]
    pub category2: Option<String>,

    /// Third category (extended field set only)
    #[arg(long)]
    pub category3: Option<String>,

    /// Cover image URL
    #[arg(long)]
    pub cover_image: Option<String>,

    /// Card color, e.g. #FF5733
    #[arg(long)]
    pub card_color: Option<String>,

    /// JSON file holding the editor document (an array of blocks)
    #[arg(long)]
    pub content: Option<std::path::PathBuf>,
}

impl PostFields {
    pub fn apply(&self, form: &mut PostForm) {
        let overlay = [
            (&self.title, &mut form.title),
            (&self.author, &mut form.author),
            (&self.category, &mut form.category),
            (&self.category2, &mut form.category2),
            (&self.category3, &mut form.category3),
            (&self.cover_image, &mut form.cover_image),
            (&self.card_color, &mut form.card_color),
        ];
        for (value, field) in overlay {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
    }

    pub fn blocks(&self) -> anyhow::Result<Option<Vec<Block>>> {
        self.content.as_deref().map(read_blocks).transpose()
    }
}

fn read_blocks(path: &Path) -> anyhow::Result<Vec<Block>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading content file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a JSON block array", path.display()))
}

/// Everything a command needs.
pub struct Host {
    pub client: BlogClient,
    pub fields: FieldSet,
    pub transport: Transport,
}

impl Host {
    fn print<T: std::fmt::Display>(&self, view: T) {
        print!("{}", NavBar);
        println!();
        print!("{view}");
    }

    pub fn home(&self) -> anyhow::Result<bool> {
        self.print(Landing);
        Ok(true)
    }

    pub fn list(&self) -> anyhow::Result<bool> {
        let mut page = ListPage::new();
        if let Some(req) = page.mount(&self.client) {
            page.on_loaded(&self.client, self.transport.execute(req));
        }
        self.print(page.view());
        Ok(matches!(page.state(), LoadState::Loaded(_)))
    }

    fn load_detail(&self, id: PostId) -> DetailPage<BlockDocument> {
        let mut page = DetailPage::new(id, self.fields, BlockDocument::new());
        if let Some(req) = page.mount(&self.client) {
            page.on_loaded(&self.client, self.transport.execute(req));
        }
        page
    }

    pub fn show(&self, id: PostId) -> anyhow::Result<bool> {
        let page = self.load_detail(id);
        self.print(page.view());
        Ok(page.post().is_some())
    }

    pub fn create(&self, input: &PostFields) -> anyhow::Result<bool> {
        let mut page = CreatePage::new(self.fields, BlockDocument::new());
        input.apply(page.form_mut());
        if let Some(blocks) = input.blocks()? {
            page.editor_mut().set_blocks(blocks);
            page.on_editor_change();
        }

        let Some(req) = page.submit(&self.client) else {
            self.print(page.view());
            return Ok(false);
        };
        page.on_submitted(&self.client, self.transport.execute(req), Instant::now());
        self.print(page.view());

        match page.last_created() {
            Some(id) => {
                println!("Open it at {}", Route::BlogDetail(id));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn edit(&self, id: PostId, input: &PostFields) -> anyhow::Result<bool> {
        let blocks = input.blocks()?;
        let mut page = self.load_detail(id);
        if page.post().is_none() {
            self.print(page.view());
            return Ok(false);
        }

        input.apply(page.form_mut());
        if let Some(blocks) = blocks {
            page.editor_mut().set_blocks(blocks);
        }

        let Some(req) = page.save(&self.client) else {
            self.print(page.view());
            return Ok(false);
        };
        page.on_saved(&self.client, self.transport.execute(req), Instant::now());
        self.print(page.view());
        Ok(page.error().is_none())
    }

    pub fn delete(&self, id: PostId, assume_yes: bool) -> anyhow::Result<bool> {
        let mut page = self.load_detail(id);
        if page.post().is_none() {
            self.print(page.view());
            return Ok(false);
        }

        let request = page.request_delete(&self.client, |prompt| assume_yes || confirm(prompt));
        let Some(req) = request else {
            if page.error().is_some() {
                self.print(page.view());
                return Ok(false);
            }
            println!("Nothing deleted.");
            return Ok(true);
        };

        match page.on_deleted(&self.client, self.transport.execute(req)) {
            Some(next) => {
                tracing::info!(id, %next, "navigating after delete");
                self.open(&next.path())
            }
            None => {
                self.print(page.view());
                Ok(false)
            }
        }
    }

    /// Mount whatever page a route path names.
    pub fn open(&self, path: &str) -> anyhow::Result<bool> {
        let route = Route::parse(path).with_context(|| format!("no page at {path}"))?;
        let mut page = Page::for_route(route, self.fields, BlockDocument::new());
        if let Some(req) = page.mount(&self.client) {
            page.on_loaded(&self.client, self.transport.execute(req));
        }
        self.print(&page);
        let ok = match &page {
            Page::List(list) => matches!(list.state(), LoadState::Loaded(_)),
            Page::Detail(detail) => detail.post().is_some(),
            Page::Landing | Page::Create(_) => true,
        };
        Ok(ok)
    }
}

/// Ask on stdin; anything but y/yes declines.
fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
