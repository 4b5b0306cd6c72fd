pub mod asset;
pub mod params;

pub use asset::validate_asset;
pub use params::validate_options;
