//! Navigation shell: static links and the route-to-page table.

use std::fmt;

use crate::client::BlogClient;
use crate::editor::Editor;
use crate::http::{HttpRequest, Outcome};
use crate::page::{CreatePage, DetailPage, ListPage};
use crate::route::Route;
use crate::types::FieldSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        label: "Logo",
        route: Route::Landing,
    },
    NavLink {
        label: "All Blogs",
        route: Route::AllBlogs,
    },
    NavLink {
        label: "Create Blog",
        route: Route::CreateBlog,
    },
];

/// Authentication is not available; these buttons never enable.
pub const AUTH_BUTTONS: [&str; 2] = ["Login", "Sign Up"];

pub const HERO_TITLE: &str = "Edit your blogs";
pub const HERO_TEXT: &str = "Create, edit, and manage your blog posts with our intuitive \
rich-text editor. Format your content easily with real-time previews, save drafts \
automatically, and publish with confidence. Perfect for writers, marketers, and content creators.";

/// The navigation bar.
pub struct NavBar;

impl fmt::Display for NavBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let links: Vec<String> = NAV_LINKS
            .iter()
            .map(|link| format!("{} ({})", link.label, link.route))
            .collect();
        let auth: Vec<String> = AUTH_BUTTONS
            .iter()
            .map(|label| format!("[{label}] (disabled)"))
            .collect();
        writeln!(f, "{} | {}", links.join(" | "), auth.join(" "))
    }
}

/// The landing page.
pub struct Landing;

impl fmt::Display for Landing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HERO_TITLE}")?;
        writeln!(f, "{HERO_TEXT}")?;
        writeln!(f, "[All Blogs] ({})", Route::AllBlogs)
    }
}

/// The page mounted for a route. Each variant owns its own state.
#[derive(Debug)]
pub enum Page<E> {
    Landing,
    List(ListPage),
    Detail(DetailPage<E>),
    Create(CreatePage<E>),
}

impl<E: Editor> Page<E> {
    pub fn for_route(route: Route, fields: FieldSet, editor: E) -> Self {
        tracing::debug!(%route, "mounting page");
        match route {
            Route::Landing => Page::Landing,
            Route::AllBlogs => Page::List(ListPage::new()),
            Route::CreateBlog => Page::Create(CreatePage::new(fields, editor)),
            Route::BlogDetail(id) => Page::Detail(DetailPage::new(id, fields, editor)),
        }
    }

    /// The initial fetch for pages that have one.
    pub fn mount(&mut self, client: &BlogClient) -> Option<HttpRequest> {
        match self {
            Page::List(page) => page.mount(client),
            Page::Detail(page) => page.mount(client),
            Page::Landing | Page::Create(_) => None,
        }
    }

    /// Deliver the result of the request returned by `mount`.
    pub fn on_loaded(&mut self, client: &BlogClient, outcome: Outcome) {
        match self {
            Page::List(page) => page.on_loaded(client, outcome),
            Page::Detail(page) => page.on_loaded(client, outcome),
            Page::Landing | Page::Create(_) => {
                tracing::warn!("load response delivered to a page without a load");
            }
        }
    }
}

impl<E: Editor> fmt::Display for Page<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Landing => write!(f, "{}", Landing),
            Page::List(page) => write!(f, "{}", page.view()),
            Page::Detail(page) => write!(f, "{}", page.view()),
            Page::Create(page) => write!(f, "{}", page.view()),
        }
    }
}
