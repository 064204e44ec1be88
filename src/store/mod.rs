// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the article collection.
//!
//! The whole collection lives in one JSON file that is read in full by every operation and
//! rewritten in full by every mutation.

pub mod article_file;

pub use article_file::{ArticleFile, StoreError, WriteDurability, DEFAULT_ARTICLES_PATH};
