pub use self::{
    amount::BaseAmount,
    asset::{Asset, AssetRaw, AssetType},
    messages::{ExecuteMsg, QueryMsg},
    new_asset::NewAsset,
    responses::{
        AssetCountResponse, BuyerSharesResponse, ContributorsResponse,
        OwnerResponse,
    },
};

mod amount;
mod asset;
mod messages;
mod new_asset;
mod responses;
