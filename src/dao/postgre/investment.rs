use super::QueryResult;
use crate::error::Error;
use crate::model::{Investment, Table};

impl Table<Investment> {
    pub async fn insert(
        &self,
        data: &Investment,
    ) -> Result<QueryResult, Error> {
        sqlx::query(
            r#"
            INSERT INTO "user_investments" (
                "user_id",
                "wallet_address",
                "asset_id",
                "asset_type",
                "asset_title",
                "shares_purchased",
                "share_price",
                "total_amount",
                "payment_token",
                "tx_hash",
                "purchased_at"
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
        )
        .bind(&data.user_id)
        .bind(&data.wallet_address)
        .bind(data.asset_id)
        .bind(&data.asset_type)
        .bind(&data.asset_title)
        .bind(data.shares_purchased)
        .bind(&data.share_price)
        .bind(&data.total_amount)
        .bind(&data.payment_token)
        .bind(&data.tx_hash)
        .bind(data.purchased_at)
        .execute(&self.pool)
        .await
        .map_err(Error::from)
    }

    pub async fn get_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Investment>, Error> {
        sqlx::query_as(
            r#"
            SELECT *
            FROM "user_investments"
            WHERE "user_id" = $1
            ORDER BY "purchased_at" DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::from)
    }

    pub async fn get_by_wallet(
        &self,
        wallet_address: &str,
    ) -> Result<Vec<Investment>, Error> {
        sqlx::query_as(
            r#"
            SELECT *
            FROM "user_investments"
            WHERE "wallet_address" = $1
            ORDER BY "purchased_at" DESC
            "#,
        )
        .bind(wallet_address)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::from)
    }
}
