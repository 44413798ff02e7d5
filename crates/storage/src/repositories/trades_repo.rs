use common::models::TradeRecord;
use sqlx::SqlitePool;

pub struct TradesRepository;

impl TradesRepository {
    pub async fn insert(pool: &SqlitePool, record: &TradeRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
                INSERT INTO trades (asset, trade_type, trade_amount, price, stop_loss, timestamp)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.asset)
        .bind(record.trade_type.as_str())
        .bind(record.trade_amount)
        .bind(record.price)
        .bind(record.stop_loss)
        .bind(record.timestamp)
        .execute(pool)
        .await?;
        Ok(())
    }
}
