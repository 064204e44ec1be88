// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{Article, ArticleId, ArticlePatch};

pub const DEFAULT_ARTICLES_PATH: &str = "data/articles.json";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    IdsExhausted {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::IdsExhausted { path } => {
                write!(f, "no article id left above the largest one in {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::IdsExhausted { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Also flushes the temp file and the containing directory to stable storage where the
    /// platform allows it.
    Durable,
}

/// State shared by every clone of one [`ArticleFile`].
///
/// Holding the mutex spans a whole read-modify-write sequence.
#[derive(Debug, Default)]
struct FileState {
    last_issued_id: Option<i64>,
}

/// The article collection, stored as one pretty-printed JSON array.
///
/// Every operation reads the whole file and every mutation rewrites it. Clones share a single
/// lock, so mutations issued through the same store (from any thread) never interleave.
/// Writers in other processes are not coordinated with; the last one to rename wins.
#[derive(Debug, Clone)]
pub struct ArticleFile {
    path: PathBuf,
    durability: WriteDurability,
    state: Arc<Mutex<FileState>>,
}

impl ArticleFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
            state: Arc::new(Mutex::new(FileState::default())),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, FileState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates the backing file holding an empty array if nothing exists at the path yet.
    ///
    /// Returns `true` when a new file was written.
    pub fn ensure_initialized(&self) -> Result<bool, StoreError> {
        let _guard = self.lock();
        match fs::metadata(&self.path) {
            Ok(_) => Ok(false),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                write_articles(&self.path, &[], self.durability)?;
                tracing::info!(path = ?self.path, "initialized empty article file");
                Ok(true)
            }
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Returns every article in file order.
    ///
    /// Fails when the file is missing, unreadable, or not a JSON array of articles.
    pub fn list_all(&self) -> Result<Vec<Article>, StoreError> {
        let _guard = self.lock();
        read_articles(&self.path)
    }

    pub fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, StoreError> {
        let _guard = self.lock();
        let articles = read_articles(&self.path)?;
        Ok(articles.into_iter().find(|article| article.id == id))
    }

    /// Appends `article` as-is. Callers are responsible for the id being unused.
    pub fn append(&self, article: Article) -> Result<(), StoreError> {
        let _guard = self.lock();
        let mut articles = read_articles(&self.path)?;
        let id = article.id;
        articles.push(article);
        write_articles(&self.path, &articles, self.durability)?;
        tracing::debug!(%id, total = articles.len(), "article appended");
        Ok(())
    }

    /// Appends a new article with a freshly issued id and returns it.
    pub fn create(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Article, StoreError> {
        let mut state = self.lock();
        let mut articles = read_articles(&self.path)?;

        let max_existing = articles.iter().map(|article| article.id.get()).max();
        let id = next_article_id(now_millis(), state.last_issued_id, max_existing).ok_or_else(
            || StoreError::IdsExhausted {
                path: self.path.clone(),
            },
        )?;
        state.last_issued_id = Some(id.get());

        let article = Article::new(id, title, content);
        articles.push(article.clone());
        write_articles(&self.path, &articles, self.durability)?;
        tracing::debug!(%id, total = articles.len(), "article created");
        Ok(article)
    }

    /// Merges `patch` into the first article with `id` and rewrites the file.
    ///
    /// A missing article is not an error: nothing is written and `false` is returned.
    pub fn replace_by_id(&self, id: ArticleId, patch: ArticlePatch) -> Result<bool, StoreError> {
        let _guard = self.lock();
        let mut articles = read_articles(&self.path)?;

        let Some(article) = articles.iter_mut().find(|article| article.id == id) else {
            tracing::warn!(%id, "no article with this id; update skipped");
            return Ok(false);
        };

        article.apply(patch);
        write_articles(&self.path, &articles, self.durability)?;
        tracing::debug!(%id, "article updated");
        Ok(true)
    }

    /// Drops every article with `id` and rewrites the file. Returns how many were dropped.
    pub fn remove_by_id(&self, id: ArticleId) -> Result<usize, StoreError> {
        let _guard = self.lock();
        let mut articles = read_articles(&self.path)?;

        let before = articles.len();
        articles.retain(|article| article.id != id);
        let removed = before - articles.len();

        write_articles(&self.path, &articles, self.durability)?;
        tracing::debug!(%id, removed, "article removal applied");
        Ok(removed)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Picks the creation id: `max(now_ms, last_issued + 1, max_existing + 1)`.
///
/// Returns `None` when an id one past `last_issued` or `max_existing` does not fit in `i64`.
fn next_article_id(
    now_ms: i64,
    last_issued: Option<i64>,
    max_existing: Option<i64>,
) -> Option<ArticleId> {
    let mut candidate = now_ms;
    for floor in [last_issued, max_existing].into_iter().flatten() {
        candidate = candidate.max(floor.checked_add(1)?);
    }
    Some(ArticleId::new(candidate))
}

include!("article_file/helpers.rs");
