// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Folio CLI entrypoint.
//!
//! Serves the article pages over HTTP on `$PORT` (default 4111) until ctrl-c.

use std::error::Error;

use folio::config::{self, Config};
use folio::server::{self, AppState};
use folio::store::ArticleFile;

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "folio".to_owned());

        let options = match config::parse_options(args) {
            Ok(options) if options.help => {
                println!("{}", config::usage(&program));
                return Ok(());
            }
            Ok(options) => options,
            Err(err) => {
                eprintln!("{program}: {err}\n\n{}", config::usage(&program));
                std::process::exit(2);
            }
        };

        let (config, warnings) = Config::resolve(&options, |key| std::env::var(key).ok());
        folio::logging::init_logging(config.json_logs);
        for warning in warnings {
            tracing::warn!("{warning}");
        }

        let store = ArticleFile::new(&config.data_path).with_durability(config.durability);
        store.ensure_initialized()?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
            let local_addr = listener.local_addr()?;
            tracing::info!(
                addr = %local_addr,
                data = ?store.path(),
                "server has started at port {}",
                local_addr.port()
            );

            let router = server::router(AppState::new(store));
            server::serve(listener, router).await?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("folio: {err}");
        std::process::exit(1);
    }
}
