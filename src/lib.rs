// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Folio: a small article CRUD web app persisted to a single JSON file.
//!
//! [`store`] owns the backing file, [`server`] maps HTTP routes onto store operations and
//! [`views`] renders the HTML pages.

pub mod config;
pub mod logging;
pub mod model;
pub mod server;
pub mod store;
pub mod views;
