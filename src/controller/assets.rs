use actix_web::{get, web, Responder, Result};
use serde::Deserialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
    types::AssetType,
};

#[get("/assets")]
async fn index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<impl Responder, Error> {
    let assets = match data.asset_type {
        Some(value) => {
            let asset_type = AssetType::try_from(value)?;
            state.ledger.get_assets_by_type(asset_type).await?
        },
        None => state.ledger.get_all_assets().await?,
    };

    Ok(web::Json(assets))
}

#[derive(Debug, Deserialize)]
pub struct Query {
    asset_type: Option<u8>,
}
