use crate::errors::TransformError;
use crate::pipeline::result::CompressionResult;

/// パイプラインの途中段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decoding,
    Rescaling,
    Direct,
    Encoding,
}

/// 1回の圧縮試行の状態
///
/// `Idle → Decoding → (Rescaling | Direct) → Encoding → Ready`、
/// デコード失敗時は `Idle → Decoding → Failed`
#[derive(Debug, Clone, Default)]
pub enum CompressionState {
    #[default]
    Idle,
    Decoding,
    Rescaling,
    Direct,
    Encoding,
    Ready(CompressionResult),
    Failed(TransformError),
}

impl CompressionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Failed(_))
    }

    pub fn result(&self) -> Option<&CompressionResult> {
        match self {
            Self::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Decoding => "decoding",
            Self::Rescaling => "rescaling",
            Self::Direct => "direct",
            Self::Encoding => "encoding",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

impl From<Stage> for CompressionState {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Decoding => Self::Decoding,
            Stage::Rescaling => Self::Rescaling,
            Stage::Direct => Self::Direct,
            Stage::Encoding => Self::Encoding,
        }
    }
}
