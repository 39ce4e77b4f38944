//! Page lifecycles against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the list, create and
//! detail pages over real HTTP using ureq. Validates that request building,
//! response parsing and page state agree with the actual server.

use std::time::Instant;

use blog_core::page::{DetailView, ListView};
use blog_core::{
    Block, BlockDocument, BlogClient, CreatePage, DetailPage, FieldSet, HttpMethod, HttpRequest,
    ListPage, LoadState, Outcome, Route, TransportError,
};
use serde_json::json;

/// Execute an `HttpRequest` using ureq and return the outcome.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`.
fn execute(req: HttpRequest) -> Outcome {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    };

    let mut response = response.map_err(|e| TransportError(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(blog_core::HttpResponse::new(status, body))
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn load_list(client: &BlogClient) -> ListPage {
    let mut page = ListPage::new();
    let req = page.mount(client).unwrap();
    page.on_loaded(client, execute(req));
    page
}

fn load_detail(client: &BlogClient, id: i64) -> DetailPage<BlockDocument> {
    let mut page = DetailPage::new(id, FieldSet::Extended, BlockDocument::new());
    let req = page.mount(client).unwrap();
    page.on_loaded(client, execute(req));
    page
}

#[test]
fn page_lifecycle() {
    let client = BlogClient::new(&start_server());

    // Step 1: the list is empty.
    let list = load_list(&client);
    assert_eq!(list.view(), ListView::Empty);
    assert!(list.view().to_string().contains("No blog posts found"));

    // Step 2: publish from the create page.
    let content = vec![
        Block(json!({"id": "h1", "type": "heading", "props": {"level": 2}, "content": [], "children": []})),
        Block(json!({"id": "p1", "type": "paragraph", "content": [{"type": "text", "text": "Body", "styles": {"italic": true}}], "children": []})),
    ];
    let mut create = CreatePage::new(FieldSet::Extended, BlockDocument::new());
    create.form_mut().title = "T".to_string();
    create.form_mut().category = "news".to_string();
    create.editor_mut().set_blocks(content.clone());
    create.on_editor_change();
    let req = create.submit(&client).unwrap();
    assert!(create.submit(&client).is_none());
    create.on_submitted(&client, execute(req), Instant::now());
    assert!(create.error().is_none(), "{:?}", create.error());
    assert!(create.editor().is_empty());
    assert!(create.form().title.is_empty());
    let id = create.last_created().unwrap();

    // Step 3: the list links to it.
    let list = load_list(&client);
    let links = list.view().links().to_vec();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].route, Route::BlogDetail(id));

    // Step 4: the detail page round-trips title and content.
    let mut detail = load_detail(&client, id);
    let post = detail.post().unwrap().clone();
    assert_eq!(post.title, "T");
    assert_eq!(post.content, content);
    assert!(post.category2.is_none());
    assert!(post.cover_image.is_none());
    assert_eq!(detail.editor().blocks(), content.as_slice());

    // Step 5: save an edit.
    detail.form_mut().title = "T2".to_string();
    detail.form_mut().category3 = "rust".to_string();
    detail
        .editor_mut()
        .push_block(Block(json!({"type": "paragraph", "content": []})));
    let req = detail.save(&client).unwrap();
    detail.on_saved(&client, execute(req), Instant::now());
    assert!(detail.error().is_none(), "{:?}", detail.error());
    assert!(detail.is_saved_notice_visible());
    assert_eq!(detail.post().unwrap().title, "T2");
    assert_eq!(detail.post().unwrap().category3.as_deref(), Some("rust"));
    assert_eq!(detail.post().unwrap().content.len(), 3);
    assert_eq!(detail.post().unwrap().created_at, post.created_at);

    // Step 6: declining the prompt sends nothing.
    assert!(detail.request_delete(&client, |_| false).is_none());
    assert!(load_detail(&client, id).post().is_some());

    // Step 7: delete and go back to the list.
    let req = detail.request_delete(&client, |_| true).unwrap();
    let next = detail.on_deleted(&client, execute(req));
    assert_eq!(next, Some(Route::AllBlogs));

    // Step 8: the post is gone.
    let gone = load_detail(&client, id);
    assert_eq!(gone.state(), &LoadState::NotFound);
    assert!(matches!(gone.view(), DetailView::NotFound));
    assert_eq!(load_list(&client).view(), ListView::Empty);
}

#[test]
fn saving_a_deleted_post_keeps_the_record() {
    let client = BlogClient::new(&start_server());

    let mut create = CreatePage::new(FieldSet::Minimal, BlockDocument::new());
    create.form_mut().title = "Doomed".to_string();
    let req = create.submit(&client).unwrap();
    create.on_submitted(&client, execute(req), Instant::now());
    let id = create.last_created().unwrap();

    let mut first = load_detail(&client, id);
    let mut second = load_detail(&client, id);

    let req = second.request_delete(&client, |_| true).unwrap();
    assert_eq!(second.on_deleted(&client, execute(req)), Some(Route::AllBlogs));

    first.form_mut().title = "Changed".to_string();
    first.form_mut().category = "news".to_string();
    let req = first.save(&client).unwrap();
    first.on_saved(&client, execute(req), Instant::now());
    assert_eq!(first.error(), Some("Post not found"));
    assert_eq!(first.post().unwrap().title, "Doomed");
    assert!(first.can_save());
}

#[test]
fn unreachable_server_is_a_network_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = BlogClient::new(&format!("http://{addr}"));

    let list = load_list(&client);
    match list.state() {
        LoadState::Failed(message) => assert!(!message.is_empty()),
        other => panic!("expected failure, got {other:?}"),
    }
}
