use serde::Deserialize;

use crate::types::AssetType;

/// Creation parameters for a new asset. All fields required except `image`;
/// `deadline` is an absolute Unix timestamp computed by the caller.
/// `valuation` and `share_price` are human decimal strings, converted to
/// base units at submission.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAsset {
    pub asset_type: AssetType,
    pub title: String,
    pub description: String,
    pub valuation: String,
    pub deadline: i64,
    #[serde(default)]
    pub image: String,
    pub total_shares: u64,
    pub share_price: String,
    pub payment_token: String,
}
