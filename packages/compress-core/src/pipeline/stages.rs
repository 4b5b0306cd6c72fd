use crate::errors::TransformError;
use crate::pipeline::asset::ImageAsset;
use crate::pipeline::result::CompressionResult;
use crate::pipeline::state::Stage;
use crate::transform::{decode_image, encode_jpeg, fit_within, render_raster, CompressionOptions};
use bytes::Bytes;
use image::{DynamicImage, RgbImage};

/// デコード済みのソース画像
#[derive(Debug)]
pub struct DecodedImage {
    image: DynamicImage,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// 出力寸法
    pub fn target_dimensions(&self, options: &CompressionOptions) -> (u32, u32) {
        fit_within(
            self.width(),
            self.height(),
            options.max_width,
            options.max_height,
        )
    }

    pub fn needs_rescale(&self, options: &CompressionOptions) -> bool {
        self.target_dimensions(options) != (self.width(), self.height())
    }
}

/// 出力寸法に描画済みの RGB ラスタ
#[derive(Debug)]
pub struct Raster {
    image: RgbImage,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, TransformError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, TransformError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| TransformError::ProcessingFailed(format!("worker task failed: {e}")))?
}

/// ソース画像をデコードする
pub async fn decode(bytes: Bytes) -> Result<DecodedImage, TransformError> {
    let image = run_blocking(move || decode_image(&bytes)).await?;
    Ok(DecodedImage { image })
}

/// 境界ボックスに収まる寸法のラスタに描画する（拡大はしない）
pub async fn scale(
    decoded: DecodedImage,
    options: CompressionOptions,
) -> Result<Raster, TransformError> {
    let (target_w, target_h) = decoded.target_dimensions(&options);
    let image = run_blocking(move || render_raster(&decoded.image, target_w, target_h)).await?;
    Ok(Raster { image })
}

/// ラスタを固定品質の JPEG にエンコードする
pub async fn encode(raster: Raster, options: CompressionOptions) -> Result<Bytes, TransformError> {
    let quality = options.jpeg_quality();
    let data = run_blocking(move || encode_jpeg(&raster.image, quality)).await?;
    Ok(Bytes::from(data))
}

/// decode → scale → encode を順に実行する
pub async fn recompress(
    asset: &ImageAsset,
    options: CompressionOptions,
) -> Result<CompressionResult, TransformError> {
    recompress_with(asset, options, |_| {}).await
}

/// 各段階に入るたびに `on_stage` を呼びながら再圧縮する
pub async fn recompress_with<F>(
    asset: &ImageAsset,
    options: CompressionOptions,
    mut on_stage: F,
) -> Result<CompressionResult, TransformError>
where
    F: FnMut(Stage),
{
    on_stage(Stage::Decoding);
    let decoded = decode(asset.bytes.clone()).await?;
    let (source_width, source_height) = (decoded.width(), decoded.height());

    on_stage(if decoded.needs_rescale(&options) {
        Stage::Rescaling
    } else {
        Stage::Direct
    });
    let raster = scale(decoded, options).await?;
    let (width, height) = (raster.width(), raster.height());

    on_stage(Stage::Encoding);
    let bytes = encode(raster, options).await?;

    tracing::debug!(
        file = %asset.file_name,
        source_width,
        source_height,
        width,
        height,
        original_size = asset.size(),
        byte_size = bytes.len(),
        "recompressed image"
    );

    Ok(CompressionResult {
        file_name: asset.file_name.clone(),
        byte_size: bytes.len(),
        bytes,
        width,
        height,
        source_width,
        source_height,
        original_size: asset.size(),
    })
}
