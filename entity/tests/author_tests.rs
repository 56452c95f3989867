/*
 * SPDX-FileCopyrightText: 2025 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for author entity

use chrono::NaiveDate;
use entity::author::{self, Violation};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseBackend, MockDatabase, MockExecResult, Set,
    entity::prelude::*,
};

fn ada(id: i32, created_at: NaiveDate) -> author::Model {
    author::Model {
        id,
        first_name: "Ada".to_owned(),
        last_name: Some("Lovelace".to_owned()),
        email: Some("ada@example.com".to_owned()),
        created_at,
    }
}

fn new_ada() -> author::ActiveModel {
    author::ActiveModel {
        first_name: Set("Ada".to_owned()),
        last_name: Set(Some("Lovelace".to_owned())),
        email: Set(Some("ada@example.com".to_owned())),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_author_entity_basic() -> Result<(), DbErr> {
    let created_at = NaiveDate::from_ymd_opt(1843, 9, 1).unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![ada(7, created_at)]])
        .into_connection();

    let result = author::Entity::find_by_id(7).one(&db).await?;

    assert!(result.is_some());
    let author = result.unwrap();
    assert_eq!(author.id, 7);
    assert_eq!(author.first_name, "Ada");
    assert_eq!(author.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(author.email.as_deref(), Some("ada@example.com"));
    assert_eq!(author.created_at, created_at);

    Ok(())
}

#[tokio::test]
async fn test_author_insert_assigns_id_and_creation_date() -> Result<(), DbErr> {
    let today = chrono::Utc::now().date_naive();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![ada(1, today)]])
        .into_connection();

    let pending = new_ada();
    assert!(pending.is_transient());

    let author = pending.insert(&db).await?;
    assert_eq!(author.id, 1);
    assert_eq!(author.first_name, "Ada");
    assert_eq!(author.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(author.email.as_deref(), Some("ada@example.com"));

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let log = format!("{:?}", log);
    assert!(log.contains(
        r#"INSERT INTO \"author_tbl\" (\"first_name\", \"last_name\", \"email\", \"dbCreated_at\") VALUES"#
    ));

    Ok(())
}

#[tokio::test]
async fn test_author_insert_drops_supplied_id() -> Result<(), DbErr> {
    let today = chrono::Utc::now().date_naive();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![ada(3, today)]])
        .into_connection();

    let mut pending = new_ada();
    pending.id = Set(99);

    let author = pending.insert(&db).await?;
    assert_eq!(author.id, 3);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains(r#"INSERT INTO \"author_tbl\" (\"first_name\","#));

    Ok(())
}

#[tokio::test]
async fn test_author_insert_rejects_long_first_name() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let pending = author::ActiveModel {
        first_name: Set("A".repeat(26)),
        ..Default::default()
    };

    let err = pending.insert(&db).await.unwrap_err();
    assert_eq!(
        Violation::from_db_err(&err),
        Some(Violation::FirstNameTooLong { len: 26, max: 25 })
    );
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn test_author_insert_accepts_max_len_multibyte_first_name() -> Result<(), DbErr> {
    let name = "é".repeat(25);
    let today = chrono::Utc::now().date_naive();

    let mut stored = ada(2, today);
    stored.first_name = name.clone();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored]])
        .into_connection();

    let author = author::ActiveModel {
        first_name: Set(name.clone()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    assert_eq!(author.first_name, name);

    Ok(())
}

#[tokio::test]
async fn test_author_insert_requires_first_name() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let pending = author::ActiveModel {
        email: Set(Some("nameless@example.com".to_owned())),
        ..Default::default()
    };

    let err = pending.insert(&db).await.unwrap_err();
    assert_eq!(
        Violation::from_db_err(&err),
        Some(Violation::FirstNameMissing)
    );
}

#[tokio::test]
async fn test_author_update_discards_created_at() -> Result<(), DbErr> {
    let created_at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let mut updated = ada(5, created_at);
    updated.last_name = Some("King".to_owned());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![updated]])
        .into_connection();

    let mut active: author::ActiveModel = ada(5, created_at).into();
    assert!(!active.is_transient());
    active.last_name = Set(Some("King".to_owned()));
    active.created_at = Set(NaiveDate::from_ymd_opt(2030, 6, 30).unwrap());

    let author = active.update(&db).await?;
    assert_eq!(author.id, 5);
    assert_eq!(author.created_at, created_at);
    assert_eq!(author.last_name.as_deref(), Some("King"));

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains(r#"SET \"last_name\" = $1 WHERE"#));
    assert!(!log.contains(r#"\"dbCreated_at\" = "#));

    Ok(())
}

#[tokio::test]
async fn test_author_update_rejects_long_first_name() {
    let created_at = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let mut active: author::ActiveModel = ada(5, created_at).into();
    active.first_name = Set("Augusta Ada King, Countess of Lovelace".to_owned());

    let err = active.update(&db).await.unwrap_err();
    assert!(matches!(
        Violation::from_db_err(&err),
        Some(Violation::FirstNameTooLong { max: 25, .. })
    ));
}

#[tokio::test]
async fn test_author_delete() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let result = author::Entity::delete_by_id(5).exec(&db).await?;
    assert_eq!(result.rows_affected, 1);

    Ok(())
}

#[test]
fn test_author_transient_state() {
    let pending = author::ActiveModel {
        id: NotSet,
        ..new_ada()
    };
    assert!(pending.is_transient());

    let persisted: author::ActiveModel =
        ada(1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).into();
    assert!(!persisted.is_transient());
}

#[test]
fn test_violation_classifies_custom_errors() {
    for violation in [
        Violation::FirstNameMissing,
        Violation::FirstNameTooLong { len: 40, max: 25 },
        Violation::DuplicateEmail,
    ] {
        let err: DbErr = violation.clone().into();
        assert_eq!(Violation::from_db_err(&err), Some(violation));
    }

    assert_eq!(
        Violation::from_db_err(&DbErr::Custom("something else".to_owned())),
        None
    );
    assert_eq!(
        Violation::from_db_err(&DbErr::RecordNotFound("author".to_owned())),
        None
    );
}
