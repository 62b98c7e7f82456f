use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AssetCountResponse {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct BuyerSharesResponse {
    pub shares: u64,
}

#[derive(Debug, Deserialize)]
pub struct ContributorsResponse {
    pub contributors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerResponse {
    pub owner: String,
}
