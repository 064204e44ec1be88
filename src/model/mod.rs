// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Article data model.

pub mod article;
pub mod ids;

pub use article::{Article, ArticlePatch};
pub use ids::{ArticleId, PathId};
