/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Result;
use clap::Parser;
use author_core::database::create_table_statement;
use author_core::init_state;
use author_core::logging::init_tracing;
use author_core::types::{Cli, Commands};
use entity::author::MAPPING;
use sea_orm::ConnectionTrait;
use tracing::info;

#[tokio::main]
pub async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    match cli.cmd.clone().unwrap_or(Commands::Setup) {
        Commands::Setup => {
            let state = init_state(cli).await?;
            info!(
                backend = ?state.db.get_database_backend(),
                "Author table is set up"
            );
        }
        cmd => {
            if let Some(text) = render(&cmd) {
                print!("{}", text);
            }
        }
    }

    Ok(())
}

/// Output of the commands that do not touch the database.
fn render(cmd: &Commands) -> Option<String> {
    match cmd {
        Commands::Setup => None,
        Commands::Schema { backend } => {
            Some(format!("{};\n", create_table_statement((*backend).into())))
        }
        Commands::Mapping => Some(MAPPING.to_string()),
    }
}
