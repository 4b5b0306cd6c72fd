use crate::errors::CompressError;
use crate::pipeline::stages::recompress_with;
use crate::pipeline::{CompressionResult, CompressionState, ImageAsset};
use crate::quota::{Clock, QuotaStore, QuotaTracker};
use crate::transform::CompressionOptions;
use crate::validation::{validate_asset, validate_options};

/// ファイル選択 → 利用回数チェック → 再圧縮 → 回数記録 の一連の流れ
///
/// 同時に実行される圧縮は1つだけ（`&mut self` で直列化される）
pub struct CompressionSession<S, C> {
    tracker: QuotaTracker<S, C>,
    options: CompressionOptions,
    selected: Option<ImageAsset>,
    state: CompressionState,
}

impl<S: QuotaStore, C: Clock> CompressionSession<S, C> {
    pub fn new(tracker: QuotaTracker<S, C>) -> Self {
        Self {
            tracker,
            options: CompressionOptions::default(),
            selected: None,
            state: CompressionState::Idle,
        }
    }

    pub fn with_options(
        tracker: QuotaTracker<S, C>,
        options: CompressionOptions,
    ) -> Result<Self, CompressError> {
        validate_options(&options)?;
        Ok(Self {
            options,
            ..Self::new(tracker)
        })
    }

    pub fn state(&self) -> &CompressionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&ImageAsset> {
        self.selected.as_ref()
    }

    pub fn tracker(&self) -> &QuotaTracker<S, C> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut QuotaTracker<S, C> {
        &mut self.tracker
    }

    /// 新しいファイルを選択する。以前の結果は破棄される
    ///
    /// 画像でないファイルは拒否し、以前の選択をそのまま残す
    pub fn select(&mut self, asset: ImageAsset) -> Result<(), CompressError> {
        validate_asset(&asset)?;

        tracing::debug!(file = %asset.file_name, size = asset.size(), mime = %asset.mime_type, "file selected");
        self.selected = Some(asset);
        self.state = CompressionState::Idle;
        Ok(())
    }

    /// 選択中のファイルを再圧縮する
    ///
    /// 上限に達している場合は何もせず `LimitReached` を返す。
    /// 利用回数は圧縮が成功した後にのみ加算される。
    /// 加算の保存に失敗した場合は `Quota` エラーを返すが、結果は
    /// `state()` に `Ready` として残る
    pub async fn compress(&mut self) -> Result<CompressionResult, CompressError> {
        if !self.tracker.check_and_gate()? {
            let limit = self.tracker.limit();
            tracing::info!(limit, "daily free limit reached");
            return Err(CompressError::LimitReached { limit });
        }

        let asset = self.selected.clone().ok_or(CompressError::NoFileSelected)?;

        let outcome = recompress_with(&asset, self.options, |stage| {
            tracing::debug!(file = %asset.file_name, ?stage, "compression stage");
            self.state = stage.into();
        })
        .await;

        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(file = %asset.file_name, error = %err, "compression failed");
                self.state = CompressionState::Failed(err.clone());
                return Err(err.into());
            }
        };

        self.state = CompressionState::Ready(result.clone());
        if let Err(err) = self.tracker.record_use() {
            tracing::warn!(file = %asset.file_name, error = %err, "failed to record compression");
            return Err(err.into());
        }
        Ok(result)
    }
}
