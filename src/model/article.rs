// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ArticleId;

/// A persisted article record.
///
/// Keys the model does not know about are kept in `extra` so that rewriting the backing file
/// never drops data written by other tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    pub fn new(id: ArticleId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// Shallow merge: every field set in `patch` overwrites, everything else is preserved.
    pub fn apply(&mut self, patch: ArticlePatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub id: Option<ArticleId>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ArticlePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: ArticleId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
