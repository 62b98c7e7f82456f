use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use cosmos_sdk_proto::cosmos::auth::v1beta1::{
    BaseAccount, QueryAccountRequest,
};
use cosmos_sdk_proto::cosmos::tx::v1beta1::{
    BroadcastMode, BroadcastTxRequest, GetTxRequest,
};
use cosmos_sdk_proto::cosmwasm::wasm::v1::QuerySmartContractStateRequest;
use cosmos_sdk_proto::prost::Message;
use cosmrs::tx::{Body, Fee, Msg, SignDoc, SignerInfo};
use cosmrs::{cosmwasm::MsgExecuteContract, AccountId, Coin, Denom};
use futures::{stream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::{
    configuration::Config,
    error::Error,
    provider::{Connect, Session},
    types::{
        Asset, AssetCountResponse, AssetRaw, AssetType, BaseAmount,
        BuyerSharesResponse, ContributorsResponse, ExecuteMsg, NewAsset,
        OwnerResponse, QueryMsg,
    },
};

const QUERY_CONTRACT_ERROR: &str = "Failed to run query against asset contract!";
const PARSE_MESSAGE_ERROR: &str =
    "Failed to parse message query against asset contract!";
const QUERY_ACCOUNT_ERROR: &str = "Failed to query sender account!";
const MISSING_ACCOUNT_ERROR: &str =
    "Query response doesn't contain account information!";
const BROADCAST_ERROR: &str = "Failed to broadcast transaction!";
const MISSING_TX_RESPONSE_ERROR: &str =
    "Broadcast response doesn't contain transaction information!";
const CONFIRM_ERROR: &str = "Failed to confirm transaction!";

/// Which write is in flight; selects the revert-reason decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteKind {
    Purchase,
    Admin,
    Withdraw,
}

/// Client for the remote asset ledger contract. Holds at most one wallet
/// session, established lazily through its connector and dropped by
/// `invalidate_session`. All monetary values cross this boundary as decimal
/// strings; the ledger side always sees base units.
pub struct Ledger<C>
where
    C: Connect,
{
    config: Config,
    contract: AccountId,
    connector: C,
    session: Mutex<Option<Arc<Session>>>,
}

impl<C> Ledger<C>
where
    C: Connect,
{
    pub fn new(config: Config, connector: C) -> Result<Ledger<C>, Error> {
        let contract = config.contract_address.parse().map_err(|_| {
            Error::ConfigurationError(format!(
                "invalid contract address: {}",
                config.contract_address
            ))
        })?;

        Ok(Ledger {
            config,
            contract,
            connector,
            session: Mutex::new(None),
        })
    }

    /// Return the cached session or establish a fresh one. The lock is held
    /// across establishment so concurrent callers share a single session.
    pub async fn connect(&self) -> Result<Arc<Session>, Error> {
        let mut guard = self.session.lock().await;

        if let Some(session) = guard.as_ref() {
            return Ok(Arc::clone(session));
        }

        let session =
            Arc::new(self.connector.establish(&self.config).await?);
        *guard = Some(Arc::clone(&session));

        Ok(session)
    }

    /// Drop the cached session. Callers must invoke this whenever the active
    /// wallet key changes; the client does not watch for rotation itself.
    pub async fn invalidate_session(&self) {
        self.session.lock().await.take();
    }

    pub async fn sender_address(&self) -> Result<String, Error> {
        let session = self.connect().await?;
        Ok(session.sender.to_string())
    }

    pub async fn get_asset_count(&self) -> Result<u64, Error> {
        let response: AssetCountResponse =
            self.smart_query(&QueryMsg::AssetCount {}).await?;
        Ok(response.count)
    }

    pub async fn get_asset(&self, id: u64) -> Result<Asset, Error> {
        let raw: AssetRaw = self.smart_query(&QueryMsg::Asset { id }).await?;
        Ok(Asset::from(raw))
    }

    /// Read assets `0..count` in ascending id order. Sequential by default;
    /// `read_batch > 1` switches to an order-preserving bounded batch. Either
    /// way a single failed read aborts the whole call with no partial list.
    pub async fn get_all_assets(&self) -> Result<Vec<Asset>, Error> {
        let count = self.get_asset_count().await?;
        read_ordered(count, self.config.read_batch, |id| self.get_asset(id))
            .await
    }

    pub async fn get_assets_by_type(
        &self,
        asset_type: AssetType,
    ) -> Result<Vec<Asset>, Error> {
        let assets = self.get_all_assets().await?;
        Ok(assets
            .into_iter()
            .filter(|asset| asset.asset_type == asset_type)
            .collect())
    }

    pub async fn get_buyer_shares(
        &self,
        id: u64,
        address: &str,
    ) -> Result<u64, Error> {
        let response: BuyerSharesResponse = self
            .smart_query(&QueryMsg::BuyerShares {
                id,
                address: address.to_owned(),
            })
            .await?;
        Ok(response.shares)
    }

    pub async fn get_contributors(
        &self,
        id: u64,
    ) -> Result<Vec<String>, Error> {
        let response: ContributorsResponse =
            self.smart_query(&QueryMsg::Contributors { id }).await?;
        Ok(response.contributors)
    }

    /// Purchase `shares` of asset `id`. The asset is re-read for the current
    /// share price; the total cost is computed in base units with checked
    /// integer arithmetic and attached as transferred funds. Business rules
    /// (active flag, deadline, remaining shares, payment sufficiency) are
    /// enforced by the ledger alone; a revert surfaces as `PurchaseRejected`
    /// with the ledger's reason.
    pub async fn buy_shares(
        &self,
        id: u64,
        shares: u64,
    ) -> Result<String, Error> {
        if shares == 0 {
            return Err(Error::InvalidAmount(String::from(
                "share count must be positive",
            )));
        }

        let asset = self.get_asset(id).await?;
        let share_price = BaseAmount::from_decimal_str(&asset.share_price)?;
        let total_cost = share_price.checked_mul_shares(shares)?;

        let denom: Denom =
            asset.payment_token.parse().map_err(|_| {
                Error::LedgerUnavailable(format!(
                    "asset {} carries an invalid payment token: {}",
                    id, asset.payment_token
                ))
            })?;
        let funds = vec![Coin {
            denom,
            amount: total_cost.get(),
        }];

        self.execute(
            &ExecuteMsg::BuyShares { id, shares },
            funds,
            WriteKind::Purchase,
        )
        .await
    }

    pub async fn add_asset(&self, new: NewAsset) -> Result<String, Error> {
        let valuation = BaseAmount::from_decimal_str(&new.valuation)?;
        let share_price = BaseAmount::from_decimal_str(&new.share_price)?;

        let msg = ExecuteMsg::AddAsset {
            asset_type: new.asset_type,
            title: new.title,
            description: new.description,
            valuation,
            deadline: new.deadline,
            image: new.image,
            total_shares: new.total_shares,
            share_price,
            payment_token: new.payment_token,
        };

        self.execute(&msg, vec![], WriteKind::Admin).await
    }

    pub async fn set_asset_active(
        &self,
        id: u64,
        active: bool,
    ) -> Result<String, Error> {
        self.execute(
            &ExecuteMsg::SetAssetActive { id, active },
            vec![],
            WriteKind::Admin,
        )
        .await
    }

    pub async fn withdraw_funds(
        &self,
        id: u64,
        to_address: &str,
    ) -> Result<String, Error> {
        self.execute(
            &ExecuteMsg::WithdrawFunds {
                id,
                to_address: to_address.to_owned(),
            },
            vec![],
            WriteKind::Withdraw,
        )
        .await
    }

    /// Advisory check only: compares `address` with the ledger's designated
    /// administrator, case-insensitively. True enforcement stays on the
    /// ledger.
    pub async fn is_owner(&self, address: &str) -> Result<bool, Error> {
        let response: OwnerResponse =
            self.smart_query(&QueryMsg::Owner {}).await?;
        Ok(owner_matches(&response.owner, address))
    }

    async fn smart_query<R>(&self, query: &QueryMsg) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let session = self.connect().await?;
        let query_data = serde_json::to_vec(query)?;

        let mut client = session.wasm_query_client.clone();
        let data = client
            .smart_contract_state(QuerySmartContractStateRequest {
                address: self.contract.to_string(),
                query_data,
            })
            .await
            .map(|response| response.into_inner().data)
            .map_err(map_query_status)?;

        serde_json::from_slice(&data).map_err(|err| {
            Error::LedgerUnavailable(format!(
                "{} {}",
                PARSE_MESSAGE_ERROR, err
            ))
        })
    }

    async fn execute(
        &self,
        msg: &ExecuteMsg,
        funds: Vec<Coin>,
        kind: WriteKind,
    ) -> Result<String, Error> {
        let session = self.connect().await?;
        let (account_number, sequence) =
            self.account_state(&session).await?;

        let execute = MsgExecuteContract {
            sender: session.sender.clone(),
            contract: self.contract.clone(),
            msg: serde_json::to_vec(msg)?,
            funds,
        };

        let fee_denom: Denom =
            self.config.fee_denom.parse().map_err(|_| {
                Error::ConfigurationError(format!(
                    "invalid fee denom: {}",
                    self.config.fee_denom
                ))
            })?;
        let fee = Fee::from_amount_and_gas(
            Coin {
                denom: fee_denom,
                amount: self.config.fee_amount,
            },
            self.config.gas_limit,
        );

        let body = Body::new(vec![execute.to_any()?], "", 0u32);
        let auth_info = SignerInfo::single_direct(
            Some(session.signer.public_key()),
            sequence,
        )
        .auth_info(fee);
        let sign_doc =
            SignDoc::new(&body, &auth_info, &session.chain_id, account_number)?;
        let tx_bytes = sign_doc.sign(&session.signer)?.to_bytes()?;

        let mut client = session.tx_service_client.clone();
        let response = client
            .broadcast_tx(BroadcastTxRequest {
                tx_bytes,
                mode: BroadcastMode::Sync as i32,
            })
            .await
            .map_err(|status| {
                Error::LedgerUnavailable(format!(
                    "{} {}",
                    BROADCAST_ERROR,
                    status.message()
                ))
            })?
            .into_inner()
            .tx_response
            .ok_or_else(|| {
                Error::LedgerUnavailable(MISSING_TX_RESPONSE_ERROR.to_owned())
            })?;

        if response.code != 0 {
            return Err(decode_revert(kind, &response.raw_log));
        }

        let hash = response.txhash;
        self.wait_for_commit(&session, &hash, kind).await?;

        Ok(hash)
    }

    async fn account_state(
        &self,
        session: &Session,
    ) -> Result<(u64, u64), Error> {
        let mut client = session.auth_query_client.clone();
        let account = client
            .account(QueryAccountRequest {
                address: session.sender.to_string(),
            })
            .await
            .map_err(|status| {
                Error::LedgerUnavailable(format!(
                    "{} {}",
                    QUERY_ACCOUNT_ERROR,
                    status.message()
                ))
            })?
            .into_inner()
            .account
            .ok_or_else(|| {
                Error::LedgerUnavailable(MISSING_ACCOUNT_ERROR.to_owned())
            })?;

        let base = BaseAccount::decode(account.value.as_slice())?;
        Ok((base.account_number, base.sequence))
    }

    /// Poll until the broadcast transaction is found on-chain. A not-yet-found
    /// transaction keeps polling; there is deliberately no deadline here, a
    /// stalled network leaves the caller's await pending.
    async fn wait_for_commit(
        &self,
        session: &Session,
        hash: &str,
        kind: WriteKind,
    ) -> Result<(), Error> {
        loop {
            let mut client = session.tx_service_client.clone();
            let found = client
                .get_tx(GetTxRequest {
                    hash: hash.to_owned(),
                })
                .await;

            match found {
                Ok(response) => {
                    if let Some(tx) = response.into_inner().tx_response {
                        if tx.code == 0 {
                            return Ok(());
                        }
                        return Err(decode_revert(kind, &tx.raw_log));
                    }
                },
                Err(status) => match status.code() {
                    tonic::Code::NotFound | tonic::Code::InvalidArgument => {},
                    _ => {
                        return Err(Error::LedgerUnavailable(format!(
                            "{} {}",
                            CONFIRM_ERROR,
                            status.message()
                        )));
                    },
                },
            }

            sleep(Duration::from_secs(1)).await;
        }
    }
}

fn owner_matches(owner: &str, address: &str) -> bool {
    owner.eq_ignore_ascii_case(address)
}

fn map_query_status(status: tonic::Status) -> Error {
    let message = status.message().to_owned();

    if message.to_ascii_lowercase().contains("not found") {
        return Error::AssetNotFound(message);
    }

    Error::LedgerUnavailable(format!("{} {}", QUERY_CONTRACT_ERROR, message))
}

fn decode_revert(kind: WriteKind, raw_log: &str) -> Error {
    match kind {
        WriteKind::Purchase => Error::PurchaseRejected(raw_log.to_owned()),
        WriteKind::Admin => Error::PermissionDenied(raw_log.to_owned()),
        WriteKind::Withdraw => {
            let log = raw_log.to_ascii_lowercase();
            if log.contains("nothing collected")
                || log.contains("no funds")
                || log.contains("insufficient")
            {
                Error::InsufficientBalance(raw_log.to_owned())
            } else {
                Error::PermissionDenied(raw_log.to_owned())
            }
        },
    }
}

/// Read `0..count` through `fetch`, returning results in index order. A batch
/// of 1 awaits each read before issuing the next; larger batches keep up to
/// `batch` reads in flight while preserving order. The first error aborts the
/// whole call and no partial output escapes.
async fn read_ordered<T, F, Fut>(
    count: u64,
    batch: usize,
    fetch: F,
) -> Result<Vec<T>, Error>
where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    if batch > 1 {
        return stream::iter((0..count).map(fetch))
            .buffered(batch)
            .try_collect()
            .await;
    }

    let mut items = Vec::with_capacity(count as usize);

    for id in 0..count {
        items.push(fetch(id).await?);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    use super::*;
    use crate::provider::GrpcConnect;

    fn test_config() -> Config {
        Config {
            database_url: String::from("postgres://localhost/test"),
            grpc_host: String::from("http://127.0.0.1:9090"),
            chain_id: String::from("testing"),
            contract_address: String::from(
                "wasm14hj2tavq8fpesdwxxcu44rty3hh90vhujrvcmstl4zr3txmfvw9s0phg4d",
            ),
            address_prefix: String::from("wasm"),
            key_file: String::from("/nonexistent/key.hex"),
            fee_denom: String::from("uwasm"),
            fee_amount: 2500,
            gas_limit: 400_000,
            read_batch: 1,
            server_host: String::from("127.0.0.1"),
            port: 8080,
            allowed_origins: vec![String::from("*")],
        }
    }

    #[derive(Default)]
    struct StubConnect {
        established: AtomicUsize,
    }

    impl Connect for StubConnect {
        fn establish(
            &self,
            _config: &Config,
        ) -> impl Future<Output = Result<Session, Error>> + Send {
            self.established.fetch_add(1, Ordering::SeqCst);
            async { Ok(Session::stub()) }
        }
    }

    #[tokio::test]
    async fn connect_reuses_the_cached_session() {
        let ledger =
            Ledger::new(test_config(), StubConnect::default()).unwrap();

        let first = ledger.connect().await.unwrap();
        let second = ledger.connect().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(ledger.connector.established.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_session_forces_a_fresh_connection() {
        let ledger =
            Ledger::new(test_config(), StubConnect::default()).unwrap();

        let first = ledger.connect().await.unwrap();
        ledger.invalidate_session().await;
        let second = ledger.connect().await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(ledger.connector.established.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn rejects_invalid_contract_address() {
        let mut config = test_config();
        config.contract_address = String::from("not-a-bech32-address");

        assert!(matches!(
            Ledger::new(config, GrpcConnect),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn owner_comparison_is_case_insensitive() {
        assert!(owner_matches("wasm1ABCdef", "wasm1abcDEF"));
        assert!(!owner_matches("wasm1abcdef", "wasm1abcdeg"));
    }

    #[test]
    fn purchase_reverts_decode_to_purchase_rejected() {
        let err = decode_revert(WriteKind::Purchase, "asset is not active");
        assert!(matches!(err, Error::PurchaseRejected(reason) if reason == "asset is not active"));

        let err = decode_revert(WriteKind::Purchase, "insufficient payment");
        assert!(matches!(err, Error::PurchaseRejected(_)));
    }

    #[test]
    fn admin_reverts_decode_to_permission_denied() {
        let err = decode_revert(WriteKind::Admin, "unauthorized");
        assert!(matches!(err, Error::PermissionDenied(_)));
    }

    #[test]
    fn withdraw_reverts_split_by_reason() {
        let err = decode_revert(WriteKind::Withdraw, "nothing collected");
        assert!(matches!(err, Error::InsufficientBalance(_)));

        let err = decode_revert(WriteKind::Withdraw, "unauthorized");
        assert!(matches!(err, Error::PermissionDenied(_)));
    }

    #[test]
    fn not_found_query_status_maps_to_asset_not_found() {
        let err = map_query_status(tonic::Status::unknown(
            "asset not found: execute wasm contract failed",
        ));
        assert!(matches!(err, Error::AssetNotFound(_)));

        let err = map_query_status(tonic::Status::unavailable("dial error"));
        assert!(matches!(err, Error::LedgerUnavailable(_)));
    }

    #[tokio::test]
    async fn read_ordered_returns_ascending_results() {
        let items = read_ordered(5, 1, |id| async move { Ok(id * 10) })
            .await
            .unwrap();
        assert_eq!(items, vec![0, 10, 20, 30, 40]);
    }

    #[tokio::test]
    async fn read_ordered_aborts_on_first_failure() {
        let highest = AtomicU64::new(0);

        let result = read_ordered(10, 1, |id| {
            let highest = &highest;
            async move {
                highest.fetch_max(id, Ordering::SeqCst);
                if id == 2 {
                    return Err(Error::LedgerUnavailable(String::from(
                        "read failed",
                    )));
                }
                Ok(id)
            }
        })
        .await;

        assert!(result.is_err());
        // nothing past the failing index was ever requested
        assert_eq!(highest.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn batched_reads_preserve_order() {
        let items = read_ordered(6, 3, |id| async move {
            // later ids resolve sooner; order must still hold
            sleep(Duration::from_millis(6 - id)).await;
            Ok(id)
        })
        .await
        .unwrap();

        assert_eq!(items, vec![0, 1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn batched_reads_abort_on_failure() {
        let result = read_ordered(6, 3, |id| async move {
            if id == 4 {
                return Err(Error::LedgerUnavailable(String::from("boom")));
            }
            Ok(id)
        })
        .await;

        assert!(result.is_err());
    }
}
