use actix_web::{http::StatusCode, ResponseError};
use anyhow::Error as ANYHOW_ERROR;
use bigdecimal::ParseBigDecimalError as BIG_DECIMAL_ERROR;
use cosmos_sdk_proto::prost::DecodeError as DECODE_ERROR;
use cosmrs::tx::ErrorReport;
use hex::FromHexError as HEX_ERROR;
use serde_json::Error as JSON_ERROR;
use sqlx::error::Error as SQL_ERROR;
use std::{
    env::VarError, io::Error as IO_ERROR, num::ParseIntError,
    num::TryFromIntError as TRY_FROM_INT_ERROR,
    str::ParseBoolError as PARSE_BOOL_ERROR,
};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No wallet provider: signing key material is not available")]
    NoWalletProvider,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Purchase rejected: {0}")]
    PurchaseRejected(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("Field not exists: {0}")]
    FieldNotExist(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    SQL(#[from] SQL_ERROR),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    ParseBoolError(#[from] PARSE_BOOL_ERROR),

    #[error("{0}")]
    TryFromIntError(#[from] TRY_FROM_INT_ERROR),

    #[error("{0}")]
    HexError(#[from] HEX_ERROR),

    #[error("{0}")]
    DecodeError(#[from] DECODE_ERROR),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("{0}")]
    AnyHowError(#[from] ANYHOW_ERROR),

    #[error("Report error: {0}")]
    Report(#[from] ErrorReport),
}

impl From<BIG_DECIMAL_ERROR> for Error {
    fn from(error: BIG_DECIMAL_ERROR) -> Self {
        Error::InvalidAmount(error.to_string())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::AssetNotFound(_) => StatusCode::NOT_FOUND,
            Error::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Error::InsufficientBalance(_) => StatusCode::PAYMENT_REQUIRED,
            Error::PurchaseRejected(_)
            | Error::InvalidAmount(_)
            | Error::FieldNotExist(_) => StatusCode::BAD_REQUEST,
            Error::NoWalletProvider | Error::LedgerUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
