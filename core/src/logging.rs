/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use super::types::Cli;

/// `RUST_LOG` wins over `--log-level` when it is set.
pub fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cli.log_level)
            .with_context(|| format!("Invalid log level `{}`", cli.log_level))?,
    };

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if cli.log_json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
