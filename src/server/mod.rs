// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP surface: routes, shared state and the mapping from store failures to responses.

pub mod handlers;
pub mod submission;

use std::fmt;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tower_http::trace::TraceLayer;

use crate::store::{ArticleFile, StoreError};
use crate::views::View;

pub use submission::ArticleSubmission;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: ArticleFile,
}

impl AppState {
    pub fn new(store: ArticleFile) -> Self {
        Self { store }
    }
}

/// Builds the article routes.
///
/// The create and update routes answer both GET and POST; a GET never carries a submission and
/// therefore always renders the form.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_articles))
        .route(
            "/articles/new",
            get(handlers::add_article).post(handlers::add_article),
        )
        .route("/articles/{id}", get(handlers::show_article))
        .route(
            "/articles/update/{id}",
            get(handlers::update_article).post(handlers::update_article),
        )
        .route("/articles/delete/{id}", get(handlers::delete_article))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `router` until ctrl-c is received.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "cannot listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutdown signal received");
        })
        .await
}

/// Runs a blocking store operation on the blocking pool.
pub(crate) async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, HandlerError>
where
    F: FnOnce(&ArticleFile) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(HandlerError::Task)?
        .map_err(HandlerError::Store)
}

/// A failure that terminates the request.
#[derive(Debug)]
pub enum HandlerError {
    Store(StoreError),
    Task(JoinError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(source) => write!(f, "store operation failed: {source}"),
            Self::Task(source) => write!(f, "store task did not complete: {source}"),
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(source) => Some(source),
            Self::Task(source) => Some(source),
        }
    }
}

impl From<StoreError> for HandlerError {
    fn from(source: StoreError) -> Self {
        Self::Store(source)
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        tracing::trace!(view = self.name(), "rendering view");
        Html(self.render()).into_response()
    }
}

#[cfg(test)]
mod tests;
