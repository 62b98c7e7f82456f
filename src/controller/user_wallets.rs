use actix_web::{get, web, Responder, Result};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/users/{id}/wallets")]
async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    let profile = state.database.user_profile.get(&path.into_inner()).await?;

    let wallets = profile
        .map(|profile| profile.wallet_addresses)
        .unwrap_or_default();

    Ok(web::Json(wallets))
}
