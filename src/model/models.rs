use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{types::BigDecimal, FromRow};

/// One row of purchase history: a best-effort downstream mirror of a ledger
/// purchase event. Insert-only; never updated or deleted by this service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Investment {
    pub id: Option<i64>,
    pub user_id: String,
    pub wallet_address: String,
    pub asset_id: i64,
    pub asset_type: String,
    pub asset_title: String,
    pub shares_purchased: i64,
    pub share_price: BigDecimal,
    pub total_amount: BigDecimal,
    pub payment_token: String,
    pub tx_hash: String,
    pub purchased_at: DateTime<Utc>,
}

/// Mapping from a platform user to the wallet addresses seen purchasing on
/// their behalf. Addresses accumulate; none are ever removed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub wallet_addresses: Vec<String>,
}
