// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Folio-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Folio and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Process configuration.
//!
//! Values resolve in order: built-in defaults, then environment (`PORT`, `FOLIO_HOST`,
//! `FOLIO_DATA`), then command-line flags.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::store::{WriteDurability, DEFAULT_ARTICLES_PATH};

pub const DEFAULT_PORT: u16 = 4111;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

pub const PORT_ENV: &str = "PORT";
pub const HOST_ENV: &str = "FOLIO_HOST";
pub const DATA_ENV: &str = "FOLIO_DATA";

pub fn usage(program: &str) -> String {
    format!(
        "Usage:\n  {program} [--port <port>] [--host <ip>] [--data <path>] [--durable-writes] [--json-logs]\n  {program} --help\n\n--port defaults to ${PORT_ENV} or {DEFAULT_PORT} (0 = ephemeral).\n--host defaults to ${HOST_ENV} or {DEFAULT_HOST}.\n--data defaults to ${DATA_ENV} or {DEFAULT_ARTICLES_PATH}; the file is created holding `[]` when missing.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n--json-logs emits logs as JSON lines. RUST_LOG overrides the log filter (default: info)."
    )
}

/// Flags exactly as given on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub help: bool,
    pub port: Option<u16>,
    pub host: Option<IpAddr>,
    pub data_path: Option<PathBuf>,
    pub durable_writes: bool,
    pub json_logs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    UnknownArgument(String),
    DuplicateFlag(&'static str),
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, value: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownArgument(arg) => write!(f, "unknown argument {arg:?}"),
            Self::DuplicateFlag(flag) => write!(f, "{flag} given more than once"),
            Self::MissingValue(flag) => write!(f, "{flag} requires a value"),
            Self::InvalidValue { flag, value } => write!(f, "invalid value for {flag}: {value:?}"),
        }
    }
}

impl std::error::Error for CliError {}

fn take_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
    already_set: bool,
) -> Result<String, CliError> {
    if already_set {
        return Err(CliError::DuplicateFlag(flag));
    }
    args.next().ok_or(CliError::MissingValue(flag))
}

fn set_switch(switch: &mut bool, flag: &'static str) -> Result<(), CliError> {
    if *switch {
        return Err(CliError::DuplicateFlag(flag));
    }
    *switch = true;
    Ok(())
}

pub fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, CliError> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => set_switch(&mut options.help, "--help")?,
            "--durable-writes" => set_switch(&mut options.durable_writes, "--durable-writes")?,
            "--json-logs" => set_switch(&mut options.json_logs, "--json-logs")?,
            "--port" => {
                let raw = take_value(&mut args, "--port", options.port.is_some())?;
                let port = raw.trim().parse().map_err(|_| CliError::InvalidValue {
                    flag: "--port",
                    value: raw.clone(),
                })?;
                options.port = Some(port);
            }
            "--host" => {
                let raw = take_value(&mut args, "--host", options.host.is_some())?;
                let host = raw.trim().parse().map_err(|_| CliError::InvalidValue {
                    flag: "--host",
                    value: raw.clone(),
                })?;
                options.host = Some(host);
            }
            "--data" => {
                let raw = take_value(&mut args, "--data", options.data_path.is_some())?;
                if raw.is_empty() {
                    return Err(CliError::InvalidValue {
                        flag: "--data",
                        value: raw,
                    });
                }
                options.data_path = Some(PathBuf::from(raw));
            }
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    Ok(options)
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_path: PathBuf,
    pub durability: WriteDurability,
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_ARTICLES_PATH),
            durability: WriteDurability::default(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Layers environment values (looked up through `env`) and then `options` over the defaults.
    ///
    /// Unusable environment values are skipped; each one is reported in the returned warnings
    /// because logging is not initialized yet at this point.
    pub fn resolve(
        options: &CliOptions,
        env: impl Fn(&str) -> Option<String>,
    ) -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(raw) = env(PORT_ENV) {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => warnings.push(format!(
                    "ignoring {PORT_ENV}={raw:?}: not a port number; using {DEFAULT_PORT}"
                )),
            }
        }
        if let Some(raw) = env(HOST_ENV) {
            match raw.trim().parse::<IpAddr>() {
                Ok(host) => config.host = host,
                Err(_) => warnings.push(format!(
                    "ignoring {HOST_ENV}={raw:?}: not an ip address; using {DEFAULT_HOST}"
                )),
            }
        }
        if let Some(raw) = env(DATA_ENV).filter(|raw| !raw.is_empty()) {
            config.data_path = PathBuf::from(raw);
        }

        if let Some(port) = options.port {
            config.port = port;
        }
        if let Some(host) = options.host {
            config.host = host;
        }
        if let Some(data_path) = &options.data_path {
            config.data_path = data_path.clone();
        }
        if options.durable_writes {
            config.durability = WriteDurability::Durable;
        }
        config.json_logs = options.json_logs;

        (config, warnings)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
