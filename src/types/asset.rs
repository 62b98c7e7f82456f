use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::Error, types::BaseAmount};

/// Asset category, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AssetType {
    RealEstate = 0,
    Bond = 1,
}

impl TryFrom<u8> for AssetType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AssetType::RealEstate),
            1 => Ok(AssetType::Bond),
            other => Err(Error::FieldNotExist(format!(
                "asset type {}",
                other
            ))),
        }
    }
}

impl From<AssetType> for u8 {
    fn from(value: AssetType) -> Self {
        value as u8
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::RealEstate => f.write_str("RealEstate"),
            AssetType::Bond => f.write_str("Bond"),
        }
    }
}

/// Asset record exactly as the contract returns it: monetary fields are
/// base-unit integer strings.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetRaw {
    pub id: u64,
    pub asset_type: AssetType,
    pub title: String,
    pub description: String,
    pub valuation: BaseAmount,
    pub deadline: i64,
    pub amount_collected: BaseAmount,
    pub image: String,
    pub total_shares: u64,
    pub shares_sold: u64,
    pub share_price: BaseAmount,
    pub payment_token: String,
    pub active: bool,
}

/// Asset record normalized for callers: monetary fields are human decimal
/// strings.
#[derive(Debug, Clone, Serialize)]
pub struct Asset {
    pub id: u64,
    pub asset_type: AssetType,
    pub title: String,
    pub description: String,
    pub valuation: String,
    pub deadline: i64,
    pub amount_collected: String,
    pub image: String,
    pub total_shares: u64,
    pub shares_sold: u64,
    pub share_price: String,
    pub payment_token: String,
    pub active: bool,
}

impl From<AssetRaw> for Asset {
    fn from(raw: AssetRaw) -> Self {
        Asset {
            id: raw.id,
            asset_type: raw.asset_type,
            title: raw.title,
            description: raw.description,
            valuation: raw.valuation.to_decimal_string(),
            deadline: raw.deadline,
            amount_collected: raw.amount_collected.to_decimal_string(),
            image: raw.image,
            total_shares: raw.total_shares,
            shares_sold: raw.shares_sold,
            share_price: raw.share_price.to_decimal_string(),
            payment_token: raw.payment_token,
            active: raw.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_type_round_trips_through_u8() {
        assert_eq!(AssetType::try_from(0u8).unwrap(), AssetType::RealEstate);
        assert_eq!(AssetType::try_from(1u8).unwrap(), AssetType::Bond);
        assert!(AssetType::try_from(2u8).is_err());
        assert_eq!(u8::from(AssetType::Bond), 1);
    }

    #[test]
    fn normalizes_base_units_to_decimal_strings() {
        let raw: AssetRaw = serde_json::from_str(
            r#"{
                "id": 3,
                "asset_type": 1,
                "title": "City Bond",
                "description": "Municipal bond series A",
                "valuation": "250000000000000000000000",
                "deadline": 1767225600,
                "amount_collected": "1500000000000000000",
                "image": "",
                "total_shares": 1000,
                "shares_sold": 15,
                "share_price": "100000000000000000",
                "payment_token": "uusd",
                "active": true
            }"#,
        )
        .unwrap();

        let asset = Asset::from(raw);
        assert_eq!(asset.asset_type, AssetType::Bond);
        assert_eq!(asset.valuation, "250000");
        assert_eq!(asset.amount_collected, "1.5");
        assert_eq!(asset.share_price, "0.1");
    }
}
