pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod orientation;
pub mod params;
pub mod resize;

pub use decode::decode_image;
pub use dimensions::{fit_within, scale_factor};
pub use encode::encode_jpeg;
pub use orientation::{apply_orientation, read_orientation, Orientation};
pub use params::CompressionOptions;
pub use resize::render_raster;
