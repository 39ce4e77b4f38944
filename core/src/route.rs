//! User-facing routes.

use std::fmt;

use crate::types::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    AllBlogs,
    CreateBlog,
    BlogDetail(PostId),
}

impl Route {
    /// Match a location path. Query strings and a trailing `/` are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Landing),
            "/all-blogs" => Some(Route::AllBlogs),
            "/create-blog" => Some(Route::CreateBlog),
            other => other
                .strip_prefix("/blogs/")
                .and_then(|id| id.parse().ok())
                .map(Route::BlogDetail),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::AllBlogs => "/all-blogs".to_string(),
            Route::CreateBlog => "/create-blog".to_string(),
            Route::BlogDetail(id) => format!("/blogs/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
