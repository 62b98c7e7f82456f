use super::QueryResult;
use crate::error::Error;
use crate::model::{Table, UserProfile};

impl Table<UserProfile> {
    pub async fn get(
        &self,
        id: &str,
    ) -> Result<Option<UserProfile>, Error> {
        sqlx::query_as(
            r#"
            SELECT *
            FROM "user_profiles"
            WHERE "id" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::from)
    }

    /// Associate `wallet_address` with the user, creating the profile row if
    /// needed. Appending is idempotent: an address already on file is left
    /// alone.
    pub async fn link_wallet(
        &self,
        id: &str,
        wallet_address: &str,
    ) -> Result<QueryResult, Error> {
        sqlx::query(
            r#"
            INSERT INTO "user_profiles" ("id", "wallet_addresses")
            VALUES($1, ARRAY[$2])
            ON CONFLICT ("id") DO UPDATE SET "wallet_addresses" =
                CASE
                    WHEN $2 = ANY ("user_profiles"."wallet_addresses")
                        THEN "user_profiles"."wallet_addresses"
                    ELSE array_append("user_profiles"."wallet_addresses", $2)
                END
        "#,
        )
        .bind(id)
        .bind(wallet_address)
        .execute(&self.pool)
        .await
        .map_err(Error::from)
    }
}
