/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::ActiveValue::{self, NotSet, Set};
use sea_orm::SqlErr;
use sea_orm::sea_query::Expr;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::mapping::{ColumnMapping, TableMapping};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "author_tbl")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(25))")]
    pub first_name: String,
    pub last_name: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[sea_orm(column_name = "dbCreated_at", default_expr = "Expr::current_date()")]
    pub created_at: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

pub const FIRST_NAME_MAX_LEN: usize = 25;

pub const ID: ColumnMapping = ColumnMapping::new("id", "id").generated_id();
pub const FIRST_NAME: ColumnMapping = ColumnMapping::new("first_name", "first_name")
    .max_len(FIRST_NAME_MAX_LEN)
    .not_null();
pub const LAST_NAME: ColumnMapping = ColumnMapping::new("last_name", "last_name");
pub const EMAIL: ColumnMapping = ColumnMapping::new("email", "email").unique();
pub const CREATED_AT: ColumnMapping = ColumnMapping::new("created_at", "dbCreated_at")
    .not_null()
    .not_updatable();

pub const MAPPING: TableMapping = TableMapping {
    table: "author_tbl",
    columns: &[ID, FIRST_NAME, LAST_NAME, EMAIL, CREATED_AT],
};

impl Column {
    pub fn mapping(&self) -> &'static ColumnMapping {
        match self {
            Column::Id => &ID,
            Column::FirstName => &FIRST_NAME,
            Column::LastName => &LAST_NAME,
            Column::Email => &EMAIL,
            Column::CreatedAt => &CREATED_AT,
        }
    }
}

const FIRST_NAME_MISSING: &str = "author first_name is required";
const FIRST_NAME_TOO_LONG_PREFIX: &str = "author first_name is ";
const FIRST_NAME_TOO_LONG_INFIX: &str = " characters long, at most ";
const FIRST_NAME_TOO_LONG_SUFFIX: &str = " allowed";
const DUPLICATE_EMAIL: &str = "author email is already in use";

/// Constraint an author write did not satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{}", FIRST_NAME_MISSING)]
    FirstNameMissing,
    #[error(
        "{}{len}{}{max}{}",
        FIRST_NAME_TOO_LONG_PREFIX,
        FIRST_NAME_TOO_LONG_INFIX,
        FIRST_NAME_TOO_LONG_SUFFIX
    )]
    FirstNameTooLong { len: usize, max: usize },
    #[error("{}", DUPLICATE_EMAIL)]
    DuplicateEmail,
}

impl Violation {
    /// Classifies a failed write. Unique violations are attributed to the
    /// email column only when the driver names it, primary key clashes from
    /// explicit ids are left unclassified.
    pub fn from_db_err(err: &DbErr) -> Option<Self> {
        if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            return names_column(&msg, EMAIL.column).then_some(Violation::DuplicateEmail);
        }

        match err {
            DbErr::Custom(msg) => Self::parse(msg),
            _ => None,
        }
    }

    fn parse(msg: &str) -> Option<Self> {
        let candidate = match msg {
            FIRST_NAME_MISSING => Violation::FirstNameMissing,
            DUPLICATE_EMAIL => Violation::DuplicateEmail,
            _ => {
                let (len, max) = msg
                    .strip_prefix(FIRST_NAME_TOO_LONG_PREFIX)?
                    .strip_suffix(FIRST_NAME_TOO_LONG_SUFFIX)?
                    .split_once(FIRST_NAME_TOO_LONG_INFIX)?;

                Violation::FirstNameTooLong {
                    len: len.parse().ok()?,
                    max: max.parse().ok()?,
                }
            }
        };

        // only accept the exact rendering of a violation
        (candidate.to_string() == msg).then_some(candidate)
    }
}

/// SQLite reports `author_tbl.email`, Postgres the constraint `author_tbl_email_key`.
fn names_column(msg: &str, column: &str) -> bool {
    msg.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|word| {
            word == column
                || word
                    .strip_prefix(MAPPING.table)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .and_then(|rest| rest.strip_prefix(column))
                    .is_some_and(|rest| rest.starts_with('_'))
        })
}

impl From<Violation> for DbErr {
    fn from(violation: Violation) -> Self {
        DbErr::Custom(violation.to_string())
    }
}

fn present<V>(value: &ActiveValue<V>) -> Option<&V>
where
    V: Into<Value>,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}

impl ActiveModel {
    /// An author is transient until the database has assigned its id.
    pub fn is_transient(&self) -> bool {
        self.id.is_not_set()
    }

    fn check_first_name(&self, insert: bool) -> Result<(), Violation> {
        let first_name = match (&self.first_name, insert) {
            (ActiveValue::Set(name), _) | (ActiveValue::Unchanged(name), true) => name,
            (ActiveValue::NotSet, true) => return Err(Violation::FirstNameMissing),
            // unchanged values were validated when they were written
            _ => return Ok(()),
        };

        match FIRST_NAME.exceeds_len(first_name) {
            Some(len) => Err(Violation::FirstNameTooLong {
                len,
                max: FIRST_NAME_MAX_LEN,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        self.check_first_name(insert)?;

        if insert {
            if let Some(id) = present(&self.id) {
                warn!(id, "Ignoring caller supplied author id, ids are generated");
                self.id = NotSet;
            }

            if self.created_at.is_not_set() {
                self.created_at = Set(Utc::now().date_naive());
            }

            debug!(email = ?present(&self.email), "Inserting author");
        } else {
            if self.created_at.is_set() {
                warn!(
                    id = ?present(&self.id),
                    "Discarding change to author created_at, column is not updatable"
                );
                self.created_at = NotSet;
            }

            debug!(id = ?present(&self.id), "Updating author");
        }

        Ok(self)
    }
}
