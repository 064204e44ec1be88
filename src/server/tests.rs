// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use super::handlers::NOT_FOUND_BODY;
use super::{router, with_store, AppState, HandlerError};
use crate::model::{Article, ArticleId};
use crate::store::{ArticleFile, StoreError};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("folio-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct ServerTestCtx {
    _tmp: TempDir,
    store: ArticleFile,
}

impl ServerTestCtx {
    fn new() -> Self {
        let tmp = TempDir::new("server");
        let store = ArticleFile::new(tmp.path.join("articles.json"));
        store.ensure_initialized().unwrap();
        Self { _tmp: tmp, store }
    }

    fn with_articles(articles: &[Article]) -> Self {
        let ctx = Self::new();
        for article in articles {
            ctx.store.append(article.clone()).unwrap();
        }
        ctx
    }

    fn app(&self) -> Router {
        router(AppState::new(self.store.clone()))
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app().oneshot(request).await.expect("router is infallible")
    }

    async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, body: &str) -> Response {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.send(request).await
    }

    async fn post_raw(&self, uri: &str, content_type: Option<&str>, body: &str) -> Response {
        let mut request = Request::post(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        self.send(request.body(Body::from(body.to_owned())).unwrap()).await
    }

    async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

fn article(id: i64, title: &str, content: &str) -> Article {
    Article::new(ArticleId::new(id), title, content)
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("collect body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn location(response: &Response) -> Option<&str> {
    response.headers().get(header::LOCATION).and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn index_renders_all_articles() {
    let ctx = ServerTestCtx::with_articles(&[article(1, "First", "a"), article(2, "Second", "b")]);

    let response = ctx.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html")));

    let html = body_text(response).await;
    assert!(html.contains(">First</a>"));
    assert!(html.contains(">Second</a>"));
}

#[tokio::test]
async fn detail_renders_existing_article() {
    let ctx = ServerTestCtx::with_articles(&[article(1, "X", "Y")]);

    let response = ctx.get("/articles/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>X</h1>"));
    assert!(html.contains("Y"));
}

#[tokio::test]
async fn detail_of_missing_article_is_plain_404() {
    let ctx = ServerTestCtx::new();

    for uri in ["/articles/404", "/articles/not-a-number"] {
        let response = ctx.get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, NOT_FOUND_BODY);
    }
}

#[tokio::test]
async fn detail_accepts_leading_integer_ids() {
    let ctx = ServerTestCtx::with_articles(&[article(12, "lead", "digits")]);

    let response = ctx.get("/articles/12abc").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_new_renders_empty_form() {
    let ctx = ServerTestCtx::new();

    let response = ctx.get("/articles/new").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("action=\"/articles/new\""));
    assert!(ctx.store.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn create_via_form_appends_and_redirects_home() {
    let ctx = ServerTestCtx::new();

    let response = ctx.post_form("/articles/new", "title=A&content=B").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/"));

    let all = ctx.store.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!((all[0].title.as_str(), all[0].content.as_str()), ("A", "B"));
}

#[tokio::test]
async fn create_via_json_appends() {
    let ctx = ServerTestCtx::new();

    let response = ctx
        .post_json("/articles/new", json!({ "title": "J", "content": "son" }))
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(ctx.store.list_all().unwrap()[0].title, "J");
}

#[tokio::test]
async fn create_with_missing_field_rerenders_form() {
    let ctx = ServerTestCtx::new();

    for body in ["title=A", "title=&content=B", ""] {
        let response = ctx.post_form("/articles/new", body).await;
        assert_eq!(response.status(), StatusCode::OK, "body {body:?}");
        assert!(body_text(response).await.contains("action=\"/articles/new\""));
    }
    assert!(ctx.store.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn create_with_repeated_form_keys_keeps_first_values() {
    let ctx = ServerTestCtx::new();

    let response = ctx.post_form("/articles/new", "title=A&title=B&content=C").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let all = ctx.store.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!((all[0].title.as_str(), all[0].content.as_str()), ("A", "C"));
}

#[tokio::test]
async fn create_with_unsupported_content_type_rerenders_form() {
    let ctx = ServerTestCtx::new();

    for content_type in [Some("text/plain"), None] {
        let response = ctx.post_raw("/articles/new", content_type, "title=A&content=B").await;
        assert_eq!(response.status(), StatusCode::OK, "content type {content_type:?}");
        assert!(body_text(response).await.contains("action=\"/articles/new\""));
    }
    assert!(ctx.store.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn update_form_prefills_existing_article() {
    let ctx = ServerTestCtx::with_articles(&[article(1, "X", "Y")]);

    let response = ctx.get("/articles/update/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("action=\"/articles/update/1\""));
    assert!(html.contains("value=\"X\""));
}

#[tokio::test]
async fn update_form_for_missing_article_still_renders() {
    let ctx = ServerTestCtx::new();

    let response = ctx.get("/articles/update/77").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("action=\"/articles/update/\""));
}

#[tokio::test]
async fn update_submit_merges_and_redirects_to_detail() {
    let ctx = ServerTestCtx::with_articles(&[article(1, "X", "Y")]);

    let response = ctx.post_form("/articles/update/1", "title=Z&content=Y").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/articles/1"));

    let found = ctx.store.find_by_id(ArticleId::new(1)).unwrap();
    assert_eq!(found, Some(article(1, "Z", "Y")));
}

#[tokio::test]
async fn update_submit_for_missing_article_is_silent_noop() {
    let ctx = ServerTestCtx::with_articles(&[article(1, "X", "Y")]);

    let response = ctx.post_form("/articles/update/2", "title=Z&content=W").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/articles/2"));
    assert_eq!(ctx.store.list_all().unwrap(), vec![article(1, "X", "Y")]);
}

#[tokio::test]
async fn update_submit_with_non_numeric_id_redirects_to_nan() {
    let ctx = ServerTestCtx::with_articles(&[article(1, "X", "Y")]);

    let response = ctx.post_form("/articles/update/abc", "title=Z&content=W").await;
    assert_eq!(location(&response), Some("/articles/NaN"));
    assert_eq!(ctx.store.list_all().unwrap(), vec![article(1, "X", "Y")]);
}

#[tokio::test]
async fn update_submit_with_missing_field_rerenders_update_form() {
    let ctx = ServerTestCtx::with_articles(&[article(1, "X", "Y")]);

    let response = ctx.post_form("/articles/update/1", "title=Z").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("value=\"X\""));
    assert_eq!(ctx.store.list_all().unwrap(), vec![article(1, "X", "Y")]);
}

#[tokio::test]
async fn delete_removes_and_redirects_home() {
    let ctx = ServerTestCtx::with_articles(&[article(1, "X", "Y"), article(2, "Q", "R")]);

    let response = ctx.get("/articles/delete/1").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/"));
    assert_eq!(ctx.store.list_all().unwrap(), vec![article(2, "Q", "R")]);

    let again = ctx.get("/articles/delete/1").await;
    assert_eq!(again.status(), StatusCode::FOUND);
    assert_eq!(ctx.store.list_all().unwrap(), vec![article(2, "Q", "R")]);
}

#[tokio::test]
async fn store_failure_becomes_500() {
    let ctx = ServerTestCtx::new();
    std::fs::write(ctx.store.path(), "not json").unwrap();

    let response = ctx.get("/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn panicking_store_task_becomes_500() {
    let ctx = ServerTestCtx::new();
    let state = AppState::new(ctx.store.clone());

    let result = with_store(&state, |_store| -> Result<(), StoreError> {
        panic!("store task aborted");
    })
    .await;

    let Err(err) = result else {
        panic!("a panicking store task must fail the request");
    };
    assert!(matches!(err, HandlerError::Task(ref source) if source.is_panic()));
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}
