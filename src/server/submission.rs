// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::convert::Infallible;

use axum::extract::{FromRequest, Request};
use axum::http::{header, Method};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::Value;

/// Title and content taken from a create/update request body.
///
/// Accepts `application/x-www-form-urlencoded` and `application/json`. Anything else, an
/// unreadable body, or a GET/HEAD request yields an empty submission, which handlers treat as
/// "show the form".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleSubmission {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ArticleSubmission {
    /// Both fields, when both are present and non-empty.
    pub fn complete(&self) -> Option<(&str, &str)> {
        let title = self.title.as_deref().filter(|title| !title.is_empty())?;
        let content = self.content.as_deref().filter(|content| !content.is_empty())?;
        Some((title, content))
    }

    /// Urlencoded pairs in body order; a repeated key keeps its first value.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut submission = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "title" => &mut submission.title,
                "content" => &mut submission.content,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        submission
    }

    fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_owned);
        Self {
            title: field("title"),
            content: field("content"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Form,
    Json,
    Other,
}

fn body_kind(content_type: Option<&str>) -> BodyKind {
    let Some(content_type) = content_type else {
        return BodyKind::Other;
    };
    let essence = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();

    if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if essence == "application/json" || essence.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

impl<S> FromRequest<S> for ArticleSubmission
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.method() == Method::GET || req.method() == Method::HEAD {
            return Ok(Self::default());
        }

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        let submission = match body_kind(content_type) {
            BodyKind::Form => match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(pairs)) => Self::from_pairs(pairs),
                Err(rejection) => {
                    tracing::debug!(%rejection, "ignoring unreadable form body");
                    Self::default()
                }
            },
            BodyKind::Json => match Json::<Value>::from_request(req, state).await {
                Ok(Json(value)) => Self::from_json(&value),
                Err(rejection) => {
                    tracing::debug!(%rejection, "ignoring unreadable json body");
                    Self::default()
                }
            },
            BodyKind::Other => Self::default(),
        };

        Ok(submission)
    }
}
