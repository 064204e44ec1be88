// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Server-side HTML views.
//!
//! Templates are compiled into the binary and use `{{ name }}` placeholders. Placeholders are
//! filled in a single pass, and every article field is HTML-escaped before it is inserted.

use std::fmt::Write as _;

use crate::model::Article;

const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");
const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const ARTICLE_TEMPLATE: &str = include_str!("templates/article.html");
const ADD_ARTICLE_TEMPLATE: &str = include_str!("templates/addarticle.html");
const UPDATE_ARTICLE_TEMPLATE: &str = include_str!("templates/updatearticle.html");

/// A render directive produced by a request handler.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Index { articles: Vec<Article> },
    Article { article: Article },
    AddArticle,
    UpdateArticle { article: Option<Article> },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index { .. } => "index",
            Self::Article { .. } => "article",
            Self::AddArticle => "addarticle",
            Self::UpdateArticle { .. } => "updatearticle",
        }
    }

    pub fn render(&self) -> String {
        let (page_title, body) = match self {
            Self::Index { articles } => ("Articles".to_owned(), render_index(articles)),
            Self::Article { article } => (escape_html(&article.title), render_article(article)),
            Self::AddArticle => ("New article".to_owned(), ADD_ARTICLE_TEMPLATE.to_owned()),
            Self::UpdateArticle { article } => {
                ("Edit article".to_owned(), render_update_article(article.as_ref()))
            }
        };

        fill(
            LAYOUT_TEMPLATE,
            &[("page_title", page_title.as_str()), ("body", body.as_str())],
        )
    }
}

fn render_index(articles: &[Article]) -> String {
    let mut rows = String::new();
    if articles.is_empty() {
        rows.push_str("  <li>No articles yet.</li>\n");
    }
    for article in articles {
        let _ = writeln!(
            rows,
            "  <li><a href=\"/articles/{id}\">{title}</a> \
             <a href=\"/articles/update/{id}\">Edit</a> \
             <a href=\"/articles/delete/{id}\">Delete</a></li>",
            id = article.id,
            title = escape_html(&article.title),
        );
    }
    let rows = rows.trim_end_matches('\n');

    fill(INDEX_TEMPLATE, &[("articles", rows)])
}

fn render_article(article: &Article) -> String {
    let id = article.id.to_string();
    fill(
        ARTICLE_TEMPLATE,
        &[
            ("id", id.as_str()),
            ("title", escape_html(&article.title).as_str()),
            ("content", escape_html(&article.content).as_str()),
        ],
    )
}

fn render_update_article(article: Option<&Article>) -> String {
    let (id, title, content) = match article {
        Some(article) => (
            article.id.to_string(),
            escape_html(&article.title),
            escape_html(&article.content),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    fill(
        UPDATE_ARTICLE_TEMPLATE,
        &[("id", id.as_str()), ("title", title.as_str()), ("content", content.as_str())],
    )
}

/// Replaces `{{ name }}` placeholders. Unknown placeholders are left as written, and inserted
/// values are never scanned again.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = after_open[..end].trim();
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
