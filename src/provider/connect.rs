use std::future::Future;
use std::str::FromStr;
use std::{fs, io};

use anyhow::Context;
use cosmos_sdk_proto::cosmos::auth::v1beta1::query_client::QueryClient as AuthQueryClient;
use cosmrs::{
    crypto::secp256k1::SigningKey,
    proto::cosmos::tx::v1beta1::service_client::ServiceClient as TxServiceClient,
    proto::cosmwasm::wasm::v1::query_client::QueryClient as WasmQueryClient,
    tendermint::chain::Id as ChainId,
    AccountId,
};
use tonic::codegen::http::Uri;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use crate::{configuration::Config, error::Error};

/// One live wallet session: the gRPC connection to the ledger network plus
/// the signing identity authorizing writes. Created lazily, never persisted.
pub struct Session {
    pub chain_id: ChainId,
    pub sender: AccountId,
    pub signer: SigningKey,
    pub wasm_query_client: WasmQueryClient<Channel>,
    pub tx_service_client: TxServiceClient<Channel>,
    pub auth_query_client: AuthQueryClient<Channel>,
}

impl Session {
    fn from_channel(
        chain_id: ChainId,
        sender: AccountId,
        signer: SigningKey,
        channel: Channel,
        uri: Uri,
    ) -> Session {
        let limit = 10 * 1024 * 1024;

        let wasm_query_client =
            WasmQueryClient::with_origin(channel.clone(), uri.clone())
                .accept_compressed(tonic::codec::CompressionEncoding::Gzip)
                .max_decoding_message_size(limit);
        let tx_service_client =
            TxServiceClient::with_origin(channel.clone(), uri.clone())
                .accept_compressed(tonic::codec::CompressionEncoding::Gzip)
                .max_decoding_message_size(limit);
        let auth_query_client =
            AuthQueryClient::with_origin(channel, uri)
                .accept_compressed(tonic::codec::CompressionEncoding::Gzip)
                .max_decoding_message_size(limit);

        Session {
            chain_id,
            sender,
            signer,
            wasm_query_client,
            tx_service_client,
            auth_query_client,
        }
    }

    #[cfg(test)]
    pub(crate) fn stub() -> Session {
        let signer = SigningKey::from_slice(&[7u8; 32])
            .expect("stub key is a valid scalar");
        let sender = signer
            .public_key()
            .account_id("wasm")
            .expect("stub address derives");
        let uri = Uri::from_static("http://127.0.0.1:9090");
        let channel = Endpoint::from(uri.clone()).connect_lazy();

        Session::from_channel(
            "testing".parse().expect("valid chain id"),
            sender,
            signer,
            channel,
            uri,
        )
    }
}

/// Session establishment seam. The ledger client calls `establish` whenever
/// its cache is empty; tests substitute a stub to observe fresh connections.
pub trait Connect: Send + Sync + 'static {
    fn establish(
        &self,
        config: &Config,
    ) -> impl Future<Output = Result<Session, Error>> + Send;
}

/// Production connector: signing key from the configured key file, gRPC
/// channel to the configured ledger endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcConnect;

impl Connect for GrpcConnect {
    fn establish(
        &self,
        config: &Config,
    ) -> impl Future<Output = Result<Session, Error>> + Send {
        let config = config.clone();

        async move {
            let raw_key = match fs::read_to_string(&config.key_file) {
                Ok(data) => data,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    return Err(Error::NoWalletProvider);
                },
                Err(err) => return Err(Error::Io(err)),
            };

            let key_bytes = hex::decode(raw_key.trim())?;
            let signer = SigningKey::from_slice(&key_bytes)?;
            let sender =
                signer.public_key().account_id(&config.address_prefix)?;

            let chain_id =
                ChainId::from_str(&config.chain_id).map_err(|_| {
                    Error::ConfigurationError(format!(
                        "invalid chain id: {}",
                        config.chain_id
                    ))
                })?;

            let uri =
                Uri::from_str(&config.grpc_host).context("Invalid grpc url")?;
            let tls_config = ClientTlsConfig::new().with_native_roots();

            let endpoint = Endpoint::from(uri.clone())
                .keep_alive_while_idle(true)
                .tls_config(tls_config)
                .context("Could not parse tls config")?;

            let channel = endpoint.connect().await.with_context(|| {
                format!(r#"Failed to connect to gRPC endpoint, "{uri}"!"#)
            })?;

            Ok(Session::from_channel(chain_id, sender, signer, channel, uri))
        }
    }
}
