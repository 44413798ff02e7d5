use common::models::ErrorRecord;
use sqlx::SqlitePool;

pub struct ErrorsRepository;

impl ErrorsRepository {
    pub async fn insert(pool: &SqlitePool, record: &ErrorRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
                INSERT INTO errors (error_message, severity, timestamp)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(&record.message)
        .bind(record.severity.as_str())
        .bind(record.timestamp)
        .execute(pool)
        .await?;
        Ok(())
    }
}
