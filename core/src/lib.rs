/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod database;
pub mod input;
pub mod logging;
pub mod types;

use anyhow::Result;
use database::connect_db;
use std::sync::Arc;
use tracing::info;
use types::*;

pub async fn init_state(cli: Cli) -> Result<Arc<State>> {
    info!(table = entity::author::MAPPING.table, "Starting Author Store");

    let db = connect_db(&cli).await?;

    Ok(Arc::new(State { db, cli }))
}
