use std::path::PathBuf;

use sqlx::{
    postgres::{PgPoolOptions, PgQueryResult, PgRow},
    PgPool, Postgres,
};

mod investment;
mod user_profile;

pub type PoolType = PgPool;
pub type PoolOption = PgPoolOptions;
pub type DBRow = PgRow;
pub type QueryResult = PgQueryResult;
pub type DataBase = Postgres;

pub fn get_path(dir: &str, file: &str) -> PathBuf {
    let mut buf = PathBuf::new();

    for chunk in [dir, "migration", "postgresql", file] {
        buf.push(chunk);
    }

    buf
}
