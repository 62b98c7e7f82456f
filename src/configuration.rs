use std::{env, fs, ops::Deref, sync::Arc};

use crate::{
    dao::get_path,
    error::Error,
    provider::{DatabasePool, GrpcConnect, Ledger},
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

pub struct State {
    pub config: Config,
    pub database: DatabasePool,
    pub ledger: Ledger<GrpcConnect>,
}

impl State {
    pub async fn new(
        config: Config,
        database: DatabasePool,
        ledger: Ledger<GrpcConnect>,
    ) -> Result<State, Error> {
        Self::init_migrations(&database).await?;

        Ok(Self {
            config,
            database,
            ledger,
        })
    }

    async fn init_migrations(database: &DatabasePool) -> Result<(), Error> {
        let files = vec!["user_investments.sql", "user_profiles.sql"];

        let dir = env!("CARGO_MANIFEST_DIR");

        for file in files {
            let path = get_path(dir, file);
            let data = fs::read_to_string(path)?;
            sqlx::query(data.as_str()).execute(&database.pool).await?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub grpc_host: String,
    pub chain_id: String,
    pub contract_address: String,
    pub address_prefix: String,
    pub key_file: String,
    pub fee_denom: String,
    pub fee_amount: u128,
    pub gas_limit: u64,
    pub read_batch: usize,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

pub fn get_configuration() -> Result<Config, Error> {
    let database_url = env::var("DATABASE_URL")?;
    let grpc_host = env::var("GRPC_HOST")?;
    let chain_id = env::var("CHAIN_ID")?;
    let contract_address = env::var("CONTRACT_ADDRESS")?;
    let address_prefix = env::var("ADDRESS_PREFIX")?;
    let key_file = env::var("KEY_FILE")?;
    let fee_denom = env::var("FEE_DENOM")?;
    let fee_amount = env::var("FEE_AMOUNT")?.parse()?;
    let gas_limit = env::var("GAS_LIMIT")?.parse()?;

    // bulk reads stay sequential unless explicitly widened
    let read_batch = env::var("READ_BATCH")
        .unwrap_or_else(|_| String::from("1"))
        .parse()?;

    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;
    let allowed_origins = env::var("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.to_owned())
        .collect::<Vec<String>>();

    let config = Config {
        database_url,
        grpc_host,
        chain_id,
        contract_address,
        address_prefix,
        key_file,
        fee_denom,
        fee_amount,
        gas_limit,
        read_batch,
        server_host,
        port,
        allowed_origins,
    };

    Ok(config)
}

pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    let config_string = fs::read_to_string(path)?;

    parse_config_string(config_string)?;

    Ok(())
}

fn parse_config_string(config: String) -> Result<(), Error> {
    let params: Vec<Option<(&str, &str)>> = config
        .split('\n')
        .map(|s| {
            let element = s.find('=');
            if let Some(e) = element {
                return Some(s.split_at(e));
            }
            None
        })
        .map(|value| {
            if let Some((k, v)) = value {
                return Some((k, &v[1..]));
            }
            None
        })
        .collect();

    for (key, value) in params.into_iter().flatten() {
        std::env::set_var(key, value);
    }

    Ok(())
}
