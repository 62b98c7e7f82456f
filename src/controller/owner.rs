use actix_web::{get, web, Responder, Result};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/owner")]
async fn index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<impl Responder, Error> {
    let is_owner = state.ledger.is_owner(&data.address).await?;

    Ok(web::Json(Response { is_owner }))
}

#[derive(Debug, Deserialize)]
pub struct Query {
    address: String,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub is_owner: bool,
}
