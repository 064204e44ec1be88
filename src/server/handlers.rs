// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One handler per route. Each performs zero or more store calls and ends in exactly one of:
//! a rendered view, a redirect, or a status with a plain-text body.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use super::submission::ArticleSubmission;
use super::{with_store, AppState, HandlerError};
use crate::model::{ArticlePatch, PathId};
use crate::views::View;

pub const NOT_FOUND_BODY: &str = "Article not found";

/// `302 Found` pointing at `location`.
fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}

pub async fn list_articles(State(state): State<AppState>) -> Result<Response, HandlerError> {
    let articles = with_store(&state, |store| store.list_all()).await?;
    Ok(View::Index { articles }.into_response())
}

pub async fn show_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HandlerError> {
    let found = match PathId::parse(&raw_id).id() {
        Some(id) => with_store(&state, move |store| store.find_by_id(id)).await?,
        None => None,
    };

    match found {
        Some(article) => Ok(View::Article { article }.into_response()),
        None => Ok((StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()),
    }
}

pub async fn add_article(
    State(state): State<AppState>,
    submission: ArticleSubmission,
) -> Result<Response, HandlerError> {
    let Some((title, content)) = submission.complete() else {
        return Ok(View::AddArticle.into_response());
    };

    let (title, content) = (title.to_owned(), content.to_owned());
    let article = with_store(&state, move |store| store.create(title, content)).await?;
    tracing::info!(id = %article.id, "article created");
    Ok(redirect("/"))
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    submission: ArticleSubmission,
) -> Result<Response, HandlerError> {
    let path_id = PathId::parse(&raw_id);

    let Some((title, content)) = submission.complete() else {
        let article = match path_id.id() {
            Some(id) => with_store(&state, move |store| store.find_by_id(id)).await?,
            None => None,
        };
        return Ok(View::UpdateArticle { article }.into_response());
    };

    if let Some(id) = path_id.id() {
        let patch = ArticlePatch::new()
            .with_id(id)
            .with_title(title)
            .with_content(content);
        let updated = with_store(&state, move |store| store.replace_by_id(id, patch)).await?;
        if updated {
            tracing::info!(%id, "article updated");
        }
    } else {
        tracing::warn!(raw_id = %raw_id, "update for non-numeric id ignored");
    }

    Ok(redirect(&format!("/articles/{path_id}")))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HandlerError> {
    if let Some(id) = PathId::parse(&raw_id).id() {
        let removed = with_store(&state, move |store| store.remove_by_id(id)).await?;
        tracing::info!(%id, removed, "article delete handled");
    }
    Ok(redirect("/"))
}
