use actix_web::{post, web, Responder, Result};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[post("/admin/assets/{id}/withdraw")]
async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<u64>,
    body: web::Json<Request>,
) -> Result<impl Responder, Error> {
    let tx_hash = state
        .ledger
        .withdraw_funds(path.into_inner(), &body.to_address)
        .await?;

    Ok(web::Json(Response { tx_hash }))
}

#[derive(Debug, Deserialize)]
pub struct Request {
    pub to_address: String,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub tx_hash: String,
}
