use actix_web::{post, web, Responder, Result};
use serde::Serialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
    types::NewAsset,
};

/// Asset creation. The `is_owner` read here is advisory, mirroring what the
/// admin screens do before submitting; the ledger remains the real gate.
#[post("/admin/assets")]
async fn index(
    state: web::Data<AppState<State>>,
    body: web::Json<NewAsset>,
) -> Result<impl Responder, Error> {
    let sender = state.ledger.sender_address().await?;

    if !state.ledger.is_owner(&sender).await? {
        return Err(Error::PermissionDenied(String::from(
            "configured sender is not the contract administrator",
        )));
    }

    let tx_hash = state.ledger.add_asset(body.into_inner()).await?;

    Ok(web::Json(Response { tx_hash }))
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub tx_hash: String,
}
