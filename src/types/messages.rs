use serde::Serialize;

use crate::types::{AssetType, BaseAmount};

/// Smart-query messages understood by the asset contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    AssetCount {},
    Asset { id: u64 },
    BuyerShares { id: u64, address: String },
    Contributors { id: u64 },
    Owner {},
}

/// Execute messages submitted to the asset contract. Monetary fields cross
/// the boundary in base units.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    BuyShares {
        id: u64,
        shares: u64,
    },
    AddAsset {
        asset_type: AssetType,
        title: String,
        description: String,
        valuation: BaseAmount,
        deadline: i64,
        image: String,
        total_shares: u64,
        share_price: BaseAmount,
        payment_token: String,
    },
    SetAssetActive {
        id: u64,
        active: bool,
    },
    WithdrawFunds {
        id: u64,
        to_address: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_messages_use_snake_case_envelopes() {
        let json = serde_json::to_string(&QueryMsg::AssetCount {}).unwrap();
        assert_eq!(json, r#"{"asset_count":{}}"#);

        let json = serde_json::to_string(&QueryMsg::Asset { id: 7 }).unwrap();
        assert_eq!(json, r#"{"asset":{"id":7}}"#);
    }

    #[test]
    fn execute_messages_carry_base_units() {
        let msg = ExecuteMsg::AddAsset {
            asset_type: AssetType::RealEstate,
            title: "Dock 12".to_owned(),
            description: "Harbour warehouse".to_owned(),
            valuation: BaseAmount::from_decimal_str("1000").unwrap(),
            deadline: 1767225600,
            image: String::new(),
            total_shares: 100,
            share_price: BaseAmount::from_decimal_str("10").unwrap(),
            payment_token: "uusd".to_owned(),
        };

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.starts_with(r#"{"add_asset":"#));
        assert!(json.contains(r#""valuation":"1000000000000000000000""#));
        assert!(json.contains(r#""share_price":"10000000000000000000""#));
        assert!(json.contains(r#""asset_type":0"#));
    }
}
