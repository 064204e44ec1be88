// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a persisted article.
///
/// Ids are integers. Freshly created articles get the current wall-clock time in milliseconds,
/// bumped forward when that value is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(i64);

impl ArticleId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ArticleId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An id as it arrives in a URL path segment.
///
/// Parsing is lenient: leading whitespace is skipped, an optional sign and a run of ASCII digits
/// are taken, and anything after the digits is ignored (`"12abc"` is `12`). A segment without a
/// leading integer, or one that overflows `i64`, becomes [`PathId::NotANumber`], which matches no
/// article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathId {
    Id(ArticleId),
    NotANumber,
}

impl PathId {
    pub fn parse(raw: &str) -> Self {
        parse_leading_integer(raw)
            .map(|value| Self::Id(ArticleId(value)))
            .unwrap_or(Self::NotANumber)
    }

    pub fn id(self) -> Option<ArticleId> {
        match self {
            Self::Id(id) => Some(id),
            Self::NotANumber => None,
        }
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => fmt::Display::fmt(id, f),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}

fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let value: i64 = digits[..len].parse().ok()?;
    if negative {
        value.checked_neg()
    } else {
        Some(value)
    }
}
