//! decode → scale → encode の非同期パイプライン

pub mod asset;
pub mod result;
pub mod stages;
pub mod state;

pub use asset::ImageAsset;
pub use result::CompressionResult;
pub use stages::{decode, encode, recompress, recompress_with, scale, DecodedImage, Raster};
pub use state::{CompressionState, Stage};
