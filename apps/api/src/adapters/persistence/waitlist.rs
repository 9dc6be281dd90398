use async_trait::async_trait;
use cafepass_types::WaitlistKind;

use crate::{
    adapters::persistence::PostgresPersistence,
    domain::entities::waitlist_entry::WaitlistRow,
    use_cases::waitlist::{StoreError, TableStore},
};

#[async_trait]
impl TableStore for PostgresPersistence {
    async fn insert(&self, row: &WaitlistRow) -> Result<(), StoreError> {
        match row {
            WaitlistRow::User(r) => {
                sqlx::query(
                    r#"INSERT INTO users_waitlist (name, email, created_at)
                       VALUES ($1, $2, $3)"#,
                )
                .bind(&r.name)
                .bind(&r.email)
                .bind(r.created_at)
                .execute(&self.pool)
                .await?;
            }
            WaitlistRow::Partner(r) => {
                sqlx::query(
                    r#"INSERT INTO partners_waitlist (cafe, email, created_at, beta)
                       VALUES ($1, $2, $3, $4)"#,
                )
                .bind(&r.cafe)
                .bind(&r.email)
                .bind(r.created_at)
                .bind(r.beta)
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(())
    }

    async fn count(&self, kind: WaitlistKind) -> Result<u64, StoreError> {
        let sql = match kind {
            WaitlistKind::User => "SELECT COUNT(*) FROM users_waitlist",
            WaitlistKind::Partner => "SELECT COUNT(*) FROM partners_waitlist",
        };

        let count: i64 = sqlx::query_scalar(sql).fetch_one(&self.pool).await?;

        u64::try_from(count)
            .map_err(|_| StoreError::MalformedResponse(format!("negative count {count}")))
    }
}
