//! Integration tests for the SQLite repositories, run against a real
//! migrated database in a temp directory.

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal_macros::dec;
use std::sync::Arc;

use planmore_core::goals::{GoalRepositoryTrait, GoalStatus, GoalUpdate, NewGoal};
use planmore_core::settings::{SettingsRepositoryTrait, SettingsUpdate};
use planmore_core::transactions::{
    expand, NewTransaction, TransactionKind, TransactionRepositoryTrait,
};
use planmore_core::users::UserRepositoryTrait;
use planmore_core::{DatabaseError, Error};

use planmore_storage_sqlite::schema::users;
use planmore_storage_sqlite::transactions::TransactionRepository;
use planmore_storage_sqlite::users::{UserDB, UserRepository};
use planmore_storage_sqlite::{create_pool, get_connection, init, run_migrations, spawn_writer};
use planmore_storage_sqlite::{DbPool, WriteHandle};

struct TestDb {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    // Keeps the temp directory alive for the duration of the test.
    _dir: tempfile::TempDir,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_path = init(dir.path().to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.clone());
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

fn insert_user(pool: &DbPool, user_id: &str) {
    let mut conn = get_connection(pool).unwrap();
    diesel::insert_into(users::table)
        .values(&UserDB {
            id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            name: None,
            created_at: Utc::now().to_rfc3339(),
        })
        .execute(&mut conn)
        .unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn intent(anchor: NaiveDate) -> NewTransaction {
    NewTransaction {
        kind: TransactionKind::Expense,
        amount: dec!(99.90),
        category_id: None,
        group_id: None,
        description: Some("internet".to_string()),
        date: anchor,
        is_fixed: true,
        is_installment: false,
        installment_count: None,
        is_recurring: false,
        recurrence_interval: None,
        recurrence_end_date: None,
    }
}

#[tokio::test]
async fn installment_batch_round_trips() {
    let db = setup();
    insert_user(&db.pool, "u1");
    let repo = TransactionRepository::new(db.pool.clone(), db.writer.clone());

    let mut i = intent(date(2025, 1, 31));
    i.is_installment = true;
    i.installment_count = Some(3);

    let rows = expand("u1", &i).unwrap();
    let inserted = repo.insert_batch(rows).await.unwrap();
    assert_eq!(inserted.len(), 3);

    let listed = repo.list_transactions("u1").unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.iter().all(|t| t.amount == dec!(99.90)));
    assert!(listed.iter().all(|t| t.batch_id == inserted[0].batch_id));
    // Listing is newest-first.
    assert_eq!(listed[0].date, date(2025, 3, 31));
    assert_eq!(listed[2].date, date(2025, 1, 31));
}

#[tokio::test]
async fn failed_batch_leaves_no_rows() {
    let db = setup();
    insert_user(&db.pool, "u1");
    let repo = TransactionRepository::new(db.pool.clone(), db.writer.clone());

    let mut i = intent(date(2025, 1, 1));
    i.is_installment = true;
    i.installment_count = Some(3);

    let mut rows = expand("u1", &i).unwrap();
    // Point one row at a category that does not exist so the insert
    // violates a foreign key partway through the batch.
    rows[2].category_id = Some("no-such-category".to_string());

    let result = repo.insert_batch(rows).await;
    assert!(result.is_err());
    assert!(repo.list_transactions("u1").unwrap().is_empty());
}

#[tokio::test]
async fn latest_for_user_orders_by_date() {
    let db = setup();
    insert_user(&db.pool, "u1");
    let repo = TransactionRepository::new(db.pool.clone(), db.writer.clone());

    for d in [date(2025, 3, 1), date(2025, 5, 20), date(2025, 4, 10)] {
        let rows = expand("u1", &intent(d)).unwrap();
        repo.insert_batch(rows).await.unwrap();
    }

    let latest = repo.latest_for_user("u1").unwrap().unwrap();
    assert_eq!(latest.date, date(2025, 5, 20));
    assert!(repo.latest_for_user("nobody").unwrap().is_none());
}

#[tokio::test]
async fn transaction_updates_are_owner_scoped() {
    let db = setup();
    insert_user(&db.pool, "u1");
    insert_user(&db.pool, "u2");
    let repo = TransactionRepository::new(db.pool.clone(), db.writer.clone());

    let rows = expand("u1", &intent(date(2025, 2, 1))).unwrap();
    let inserted = repo.insert_batch(rows).await.unwrap();

    let update = planmore_core::transactions::TransactionUpdate {
        id: inserted[0].id.clone(),
        kind: TransactionKind::Expense,
        amount: dec!(120),
        category_id: None,
        group_id: None,
        description: Some("internet (new plan)".to_string()),
        date: date(2025, 2, 1),
        is_fixed: true,
        is_active: true,
    };

    // A different user cannot touch the row.
    let err = repo.update_transaction("u2", update.clone()).await;
    assert!(matches!(
        err,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));

    let updated = repo.update_transaction("u1", update).await.unwrap();
    assert_eq!(updated.amount, dec!(120));
    assert_eq!(updated.description.as_deref(), Some("internet (new plan)"));
}

#[tokio::test]
async fn delete_batch_removes_whole_series() {
    let db = setup();
    insert_user(&db.pool, "u1");
    let repo = TransactionRepository::new(db.pool.clone(), db.writer.clone());

    let mut i = intent(date(2025, 1, 1));
    i.is_installment = true;
    i.installment_count = Some(5);
    let inserted = repo
        .insert_batch(expand("u1", &i).unwrap())
        .await
        .unwrap();
    let batch = inserted[0].batch_id.clone().unwrap();

    let deleted = repo.delete_batch("u1", &batch).await.unwrap();
    assert_eq!(deleted, 5);
    assert!(repo.list_transactions("u1").unwrap().is_empty());
}

#[tokio::test]
async fn goals_round_trip_and_status_filter() {
    let db = setup();
    insert_user(&db.pool, "u1");
    let repo =
        planmore_storage_sqlite::goals::GoalRepository::new(db.pool.clone(), db.writer.clone());

    let goal = repo
        .insert_new_goal(
            "u1",
            NewGoal {
                name: "Emergency fund".to_string(),
                target_amount: dec!(1000),
                current_amount: dec!(850),
                deadline: Some(date(2026, 12, 31)),
            },
        )
        .await
        .unwrap();
    assert_eq!(goal.status, GoalStatus::InProgress);
    assert_eq!(goal.target_amount, dec!(1000));

    let in_progress = repo.load_in_progress_goals().unwrap();
    assert_eq!(in_progress.len(), 1);

    let achieved = repo
        .update_goal(
            "u1",
            GoalUpdate {
                id: goal.id.clone(),
                name: goal.name.clone(),
                target_amount: goal.target_amount,
                current_amount: dec!(1000),
                deadline: goal.deadline,
                status: GoalStatus::Achieved,
            },
        )
        .await
        .unwrap();
    assert_eq!(achieved.status, GoalStatus::Achieved);
    assert!(repo.load_in_progress_goals().unwrap().is_empty());
}

#[tokio::test]
async fn settings_merge_over_defaults() {
    let db = setup();
    insert_user(&db.pool, "u1");
    let repo = planmore_storage_sqlite::settings::SettingsRepository::new(
        db.pool.clone(),
        db.writer.clone(),
    );

    // Nothing stored yet: full defaults.
    let defaults = repo.get_settings("u1").unwrap();
    assert!(defaults.email_notifications);
    assert!(!defaults.telegram_enabled);
    assert_eq!(defaults.theme, "light");

    repo.update_settings(
        "u1",
        SettingsUpdate {
            theme: Some("dark".to_string()),
            email_notifications: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let merged = repo.get_settings("u1").unwrap();
    assert_eq!(merged.theme, "dark");
    assert!(!merged.email_notifications);
    // Untouched keys keep their defaults.
    assert_eq!(merged.language, "en");
    assert!(merged.update_notifications);
}

#[tokio::test]
async fn telegram_link_tokens_are_single_use() {
    let db = setup();
    insert_user(&db.pool, "u1");
    let repo = planmore_storage_sqlite::settings::SettingsRepository::new(
        db.pool.clone(),
        db.writer.clone(),
    );

    repo.insert_link_token("u1", "tok-123").await.unwrap();
    let owner = repo.consume_link_token("tok-123").await.unwrap();
    assert_eq!(owner, "u1");

    // Second redemption fails.
    let again = repo.consume_link_token("tok-123").await;
    assert!(matches!(
        again,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
}

#[tokio::test]
async fn telegram_chat_binding_round_trips() {
    let db = setup();
    insert_user(&db.pool, "u1");
    let repo = planmore_storage_sqlite::settings::SettingsRepository::new(
        db.pool.clone(),
        db.writer.clone(),
    );

    repo.set_telegram_chat("u1", "chat-42").await.unwrap();
    let settings = repo.get_settings("u1").unwrap();
    assert!(settings.telegram_enabled);
    assert_eq!(settings.telegram_chat_id.as_deref(), Some("chat-42"));
    assert!(settings.chat_channel_ready());

    repo.clear_telegram_chat("u1").await.unwrap();
    let settings = repo.get_settings("u1").unwrap();
    assert!(!settings.telegram_enabled);
    assert!(settings.telegram_chat_id.is_none());
}

#[tokio::test]
async fn user_repository_lists_registered_users() {
    let db = setup();
    insert_user(&db.pool, "u1");
    insert_user(&db.pool, "u2");
    let repo = UserRepository::new(db.pool.clone());

    let users = repo.list_users().unwrap();
    assert_eq!(users.len(), 2);

    let u1 = repo.get_user("u1").unwrap();
    assert_eq!(u1.email, "u1@example.com");
    assert!(repo.get_user("ghost").is_err());
}
