pub use self::{
    connect::{Connect, GrpcConnect, Session},
    database::DatabasePool,
    ledger::Ledger,
};

mod connect;
mod database;
mod ledger;
