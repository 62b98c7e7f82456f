use actix_web::{get, web, Responder, Result};
use serde::Deserialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/investments")]
async fn index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<impl Responder, Error> {
    let investments = if let Some(user_id) = &data.user_id {
        state.database.investment.get_by_user(user_id).await?
    } else if let Some(wallet) = &data.wallet {
        state.database.investment.get_by_wallet(wallet).await?
    } else {
        return Err(Error::FieldNotExist(String::from("user_id or wallet")));
    };

    Ok(web::Json(investments))
}

#[derive(Debug, Deserialize)]
pub struct Query {
    user_id: Option<String>,
    wallet: Option<String>,
}
