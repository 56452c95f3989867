/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use entity::author::MAPPING;
use sea_orm::sea_query::{Expr, TableCreateStatement};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema,
};
use std::time::Duration;
use tracing::log::LevelFilter;
use tracing::{debug, info, instrument};

use super::input::read_url_file;
use super::types::*;

pub fn database_url(cli: &Cli) -> Result<String> {
    if let Some(file) = &cli.database_url_file {
        read_url_file(file)
            .map_err(anyhow::Error::msg)
            .context("Failed to read database url from file")
    } else if let Some(url) = &cli.database_url {
        Ok(url.clone())
    } else {
        anyhow::bail!("No database url provided")
    }
}

#[instrument(skip(cli))]
pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(database_url(cli)?);

    // Only enable SQL logging at debug level
    if cli.log_level == "debug" {
        opt.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    let timeout = Duration::from_secs(cli.database_connect_timeout);
    opt.max_connections(cli.database_max_connections)
        .min_connections(1)
        .connect_timeout(timeout)
        .acquire_timeout(timeout);

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;

    debug!(backend = ?db.get_database_backend(), "Connected to database");

    ensure_schema(&db)
        .await
        .context("Failed to create author table")?;

    Ok(db)
}

/// Table definition derived from the author entity. Length limits from the
/// mapping become CHECK constraints, SQLite ignores the varchar length.
pub fn create_table(backend: DbBackend) -> TableCreateStatement {
    let mut table = Schema::new(backend).create_table_from_entity(EAuthor::default());

    for column in MAPPING.columns {
        if let Some(max) = column.max_len {
            table.check(Expr::cust(format!(
                "length(\"{}\") <= {}",
                column.column, max
            )));
        }
    }

    table.if_not_exists().to_owned()
}

pub fn create_table_statement(backend: DbBackend) -> String {
    backend.build(&create_table(backend)).sql
}

#[instrument(skip(db))]
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    db.execute(backend.build(&create_table(backend))).await?;

    info!(table = MAPPING.table, "Author table ready");
    Ok(())
}
