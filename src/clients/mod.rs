pub mod asset_client;

pub use asset_client::{AssetClient, AssetLocation};
