use std::str::FromStr;

use actix_web::{get, web, Responder, Result};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{calculate_percentage, format_currency, is_deadline_passed},
    types::{Asset, BaseAmount},
};

#[get("/assets/{id}")]
async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<u64>,
    data: web::Query<Query>,
) -> Result<impl Responder, Error> {
    let id = path.into_inner();
    let asset = state.ledger.get_asset(id).await?;

    let collected = BaseAmount::from_decimal_str(&asset.amount_collected)?;
    let target = BaseAmount::from_decimal_str(&asset.valuation)?;

    let percent_collected = calculate_percentage(collected, target);
    let deadline_passed = is_deadline_passed(asset.deadline);
    let valuation_display =
        format_currency(&BigDecimal::from_str(&asset.valuation)?);

    let buyer_shares = match &data.address {
        Some(address) => {
            Some(state.ledger.get_buyer_shares(id, address).await?)
        },
        None => None,
    };

    Ok(web::Json(Response {
        asset,
        percent_collected,
        deadline_passed,
        valuation_display,
        buyer_shares,
    }))
}

#[derive(Debug, Deserialize)]
pub struct Query {
    address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub asset: Asset,
    pub percent_collected: u32,
    pub deadline_passed: bool,
    pub valuation_display: String,
    pub buyer_shares: Option<u64>,
}
