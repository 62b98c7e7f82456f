use std::str::FromStr;

use actix_web::{post, web, Responder, Result};
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    configuration::{AppState, State},
    error::Error,
    model::Investment,
};

/// Share purchase: one atomic ledger write, then a best-effort mirror into
/// the history table and the user's wallet profile. The mirror is not
/// transactional with the ledger; a mirror failure after an on-chain success
/// is reported, logged, and never rolled back or retried.
#[post("/assets/{id}/purchase")]
async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<u64>,
    body: web::Json<Request>,
) -> Result<impl Responder, Error> {
    let id = path.into_inner();

    let asset = state.ledger.get_asset(id).await?;
    let tx_hash = state.ledger.buy_shares(id, body.shares).await?;
    let wallet_address = state.ledger.sender_address().await?;

    let share_price = BigDecimal::from_str(&asset.share_price)?;
    let total_amount = &share_price * BigDecimal::from(body.shares);

    let record = Investment {
        id: None,
        user_id: body.user_id.to_owned(),
        wallet_address,
        asset_id: i64::try_from(id)?,
        asset_type: asset.asset_type.to_string(),
        asset_title: asset.title,
        shares_purchased: i64::try_from(body.shares)?,
        share_price,
        total_amount: total_amount.clone(),
        payment_token: asset.payment_token,
        tx_hash: tx_hash.to_owned(),
        purchased_at: Utc::now(),
    };

    let mirrored = match mirror_purchase(&state, &record).await {
        Ok(()) => true,
        Err(err) => {
            error!(
                "purchase {} confirmed on ledger but history mirror failed: {}",
                tx_hash, err
            );
            false
        },
    };

    Ok(web::Json(Response {
        tx_hash,
        asset_id: id,
        shares: body.shares,
        total_amount: total_amount.to_string(),
        mirrored,
    }))
}

async fn mirror_purchase(
    state: &AppState<State>,
    record: &Investment,
) -> Result<(), Error> {
    state.database.investment.insert(record).await?;
    state
        .database
        .user_profile
        .link_wallet(&record.user_id, &record.wallet_address)
        .await?;

    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct Request {
    pub shares: u64,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub tx_hash: String,
    pub asset_id: u64,
    pub shares: u64,
    pub total_amount: String,
    pub mirrored: bool,
}
