/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::input::greater_than_zero;
use clap::{Parser, Subcommand, ValueEnum};
use entity::*;
use sea_orm::{DatabaseConnection, DbBackend};

#[derive(Parser, Debug)]
#[command(name = "Author Store", display_name = "Author Store", bin_name = "author-store", author = "Wavelens", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "AUTHOR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "AUTHOR_LOG_JSON", default_value = "false")]
    pub log_json: bool,
    #[arg(long, env = "AUTHOR_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "AUTHOR_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "AUTHOR_DATABASE_MAX_CONNECTIONS", value_parser = greater_than_zero::<u32>, default_value = "10")]
    pub database_max_connections: u32,
    #[arg(long, env = "AUTHOR_DATABASE_CONNECT_TIMEOUT", value_parser = greater_than_zero::<u64>, default_value = "8")]
    pub database_connect_timeout: u64,
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Connect to the database and create the author table if it is missing
    Setup,
    /// Print the CREATE TABLE statement for the author table
    Schema {
        #[arg(long, value_enum, default_value_t = Backend::Postgres)]
        backend: Backend,
    },
    /// Print the field to column mapping of the author table
    Mapping,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl From<Backend> for DbBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Postgres => DbBackend::Postgres,
            Backend::Sqlite => DbBackend::Sqlite,
        }
    }
}

#[derive(Debug)]
pub struct State {
    pub db: DatabaseConnection,
    pub cli: Cli,
}

pub type EAuthor = author::Entity;
pub type MAuthor = author::Model;
pub type AAuthor = author::ActiveModel;
pub type CAuthor = author::Column;
