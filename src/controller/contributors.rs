use actix_web::{get, web, Responder, Result};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/assets/{id}/contributors")]
async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<u64>,
) -> Result<impl Responder, Error> {
    let contributors =
        state.ledger.get_contributors(path.into_inner()).await?;

    Ok(web::Json(contributors))
}
