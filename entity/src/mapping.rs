/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Statically declared field to column mapping.
//!
//! Every constraint an entity carries is written down once here and read by
//! the entity hooks, the schema bootstrap and the `mapping` subcommand.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub field: &'static str,
    pub column: &'static str,
    pub max_len: Option<usize>,
    pub nullable: bool,
    pub unique: bool,
    pub updatable: bool,
    pub generated: bool,
}

impl ColumnMapping {
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            column,
            max_len: None,
            nullable: true,
            unique: false,
            updatable: true,
            generated: false,
        }
    }

    pub const fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn not_updatable(mut self) -> Self {
        self.updatable = false;
        self
    }

    /// Primary key assigned by the storage engine on insert.
    pub const fn generated_id(mut self) -> Self {
        self.generated = true;
        self.nullable = false;
        self.unique = true;
        self.updatable = false;
        self
    }

    /// Returns the length of `value` when it exceeds `max_len`.
    pub fn exceeds_len(&self, value: &str) -> Option<usize> {
        let max = self.max_len?;
        let len = value.chars().count();
        (len > max).then_some(len)
    }
}

impl fmt::Display for ColumnMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.field, self.column)?;

        let mut flags = Vec::new();
        if self.generated {
            flags.push("generated".to_string());
        }
        if let Some(len) = self.max_len {
            flags.push(format!("max_len={}", len));
        }
        if !self.nullable {
            flags.push("not null".to_string());
        }
        if self.unique {
            flags.push("unique".to_string());
        }
        if !self.updatable {
            flags.push("not updatable".to_string());
        }

        if !flags.is_empty() {
            write!(f, " [{}]", flags.join(", "))?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMapping {
    pub table: &'static str,
    pub columns: &'static [ColumnMapping],
}

impl TableMapping {
    pub fn column(&self, field: &str) -> Option<&'static ColumnMapping> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn by_column_name(&self, column: &str) -> Option<&'static ColumnMapping> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn unique_columns(&self) -> impl Iterator<Item = &'static ColumnMapping> {
        self.columns.iter().filter(|c| c.unique && !c.generated)
    }
}

impl fmt::Display for TableMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "table {}", self.table)?;
        for column in self.columns {
            writeln!(f, "  {}", column)?;
        }
        Ok(())
    }
}
