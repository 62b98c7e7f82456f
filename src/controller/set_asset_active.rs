use actix_web::{post, web, Responder, Result};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[post("/admin/assets/{id}/active")]
async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<u64>,
    body: web::Json<Request>,
) -> Result<impl Responder, Error> {
    let tx_hash = state
        .ledger
        .set_asset_active(path.into_inner(), body.active)
        .await?;

    Ok(web::Json(Response { tx_hash }))
}

#[derive(Debug, Deserialize)]
pub struct Request {
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub tx_hash: String,
}
