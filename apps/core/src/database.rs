use crate::analysis::{PatternResult, Sender};
use crate::assessment::Dass21Result;
use crate::error::AppError;
use crate::models::{AssessmentRecord, ChatMessageRow, JournalEntryRow, PatternSnapshot, User};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Fixed-width RFC 3339 so stored times sort lexicographically
fn to_db_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Open a pool on an existing database, without running migrations.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Open (creating if missing) the database and apply migrations.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, AppError> {
    info!("Initializing database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

// --- Users ---

pub async fn create_user(pool: &SqlitePool, display_name: &str) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let created_at = to_db_time(Utc::now());

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, display_name, created_at)
        VALUES (?, ?, ?)
        RETURNING id, display_name, created_at
        "#,
    )
    .bind(&id)
    .bind(display_name)
    .bind(&created_at)
    .fetch_one(pool)
    .await
}

pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, display_name, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

// --- Chat messages ---

pub async fn add_chat_message(
    pool: &SqlitePool,
    user_id: &str,
    conversation_id: &str,
    sender: Sender,
    content: &str,
    sent_at: DateTime<Utc>,
) -> Result<ChatMessageRow, sqlx::Error> {
    sqlx::query_as::<_, ChatMessageRow>(
        r#"
        INSERT INTO chat_messages (user_id, conversation_id, sender, content, sent_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, conversation_id, sender, content, sent_at
        "#,
    )
    .bind(user_id)
    .bind(conversation_id)
    .bind(sender.label())
    .bind(content)
    .bind(to_db_time(sent_at))
    .fetch_one(pool)
    .await
}

pub async fn get_conversation_messages(
    pool: &SqlitePool,
    user_id: &str,
    conversation_id: &str,
) -> Result<Vec<ChatMessageRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessageRow>(
        r#"
        SELECT id, user_id, conversation_id, sender, content, sent_at
        FROM chat_messages
        WHERE user_id = ? AND conversation_id = ?
        ORDER BY sent_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .bind(conversation_id)
    .fetch_all(pool)
    .await
}

// --- Journal entries ---

pub async fn add_journal_entry(
    pool: &SqlitePool,
    user_id: &str,
    title: Option<&str>,
    content: &str,
    created_at: DateTime<Utc>,
) -> Result<JournalEntryRow, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query_as::<_, JournalEntryRow>(
        r#"
        INSERT INTO journal_entries (id, user_id, title, content, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, title, content, created_at
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(title)
    .bind(content)
    .bind(to_db_time(created_at))
    .fetch_one(pool)
    .await
}

pub async fn get_journal_entries(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<JournalEntryRow>, sqlx::Error> {
    sqlx::query_as::<_, JournalEntryRow>(
        r#"
        SELECT id, user_id, title, content, created_at
        FROM journal_entries
        WHERE user_id = ?
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

// --- Assessments ---

pub async fn record_assessment(
    pool: &SqlitePool,
    user_id: &str,
    answers: &[u8],
    result: &Dass21Result,
    completed_at: DateTime<Utc>,
) -> Result<AssessmentRecord, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query_as::<_, AssessmentRecord>(
        r#"
        INSERT INTO assessments (id, user_id, kind, answers, result, completed_at)
        VALUES (?, ?, 'dass21', ?, ?, ?)
        RETURNING id, user_id, kind, answers, result, completed_at
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(Json(answers))
    .bind(Json(result))
    .bind(to_db_time(completed_at))
    .fetch_one(pool)
    .await
}

pub async fn latest_assessment(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<AssessmentRecord>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRecord>(
        r#"
        SELECT id, user_id, kind, answers, result, completed_at
        FROM assessments
        WHERE user_id = ?
        ORDER BY completed_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

// --- Pattern snapshots ---

pub async fn save_pattern_snapshot(
    pool: &SqlitePool,
    user_id: &str,
    result: &PatternResult,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO pattern_snapshots (user_id, should_suggest, confidence, result, analyzed_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(result.should_suggest_assessment)
    .bind(i64::from(result.confidence))
    .bind(Json(result))
    .bind(to_db_time(result.analyzed_at))
    .execute(pool)
    .await?;

    Ok(row.last_insert_rowid())
}

pub async fn latest_pattern_snapshot(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<PatternSnapshot>, sqlx::Error> {
    sqlx::query_as::<_, PatternSnapshot>(
        r#"
        SELECT id, user_id, should_suggest, confidence, result, analyzed_at
        FROM pattern_snapshots
        WHERE user_id = ?
        ORDER BY analyzed_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
