#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("angle at vertex {1:?} is undefined for points {0:?} and {2:?}")]
    DegenerateAngle(crate::Point, crate::Point, crate::Point),

    #[error("expected at least {expected} keypoints, got {got}")]
    InsufficientKeypoints { expected: usize, got: usize },

    #[error("failed to convert usize value to keypoint kind: {0}")]
    ConvertUSizeToKeypointKind(usize),

    #[error("failed to convert value to f64")]
    ConvertToF64,

    #[error("failed to convert value to u32")]
    ConvertToU32,

    #[error("failed to read scoring config: {1:?}")]
    ReadConfig(#[source] std::io::Error, std::path::PathBuf),

    #[error("failed to parse scoring config: {1:?}")]
    ParseConfig(#[source] serde_json::Error, std::path::PathBuf),

    #[error("failed to parse keypoints")]
    ParseKeypoints(#[source] serde_json::Error),
}
