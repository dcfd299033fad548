use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("rank mismatch: expected rank {expected}, got {got}")]
    RankMismatch { expected: usize, got: usize },
    #[error("length mismatch: expected {expected} elements, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },
    #[error("index {index} out of range (limit {limit})")]
    IndexOutOfRange { index: usize, limit: usize },
    #[error("rank {rank} exceeds the maximum supported rank {max}")]
    InvalidRank { rank: usize, max: usize },
    #[error("unsupported layout: {0}")]
    UnsupportedLayout(String),
    #[error("invalid axis {axis} for tensor with {rank} dimensions")]
    InvalidAxis { axis: usize, rank: usize },
    #[error("axis set must not be empty")]
    EmptyAxes,
    #[error("extent of dimension {axis} is zero")]
    ZeroExtent { axis: usize },
    #[error("{0:?} is not a permutation of the tensor axes")]
    InvalidPermutation(Vec<usize>),
    #[error("element count or buffer span of shape {0:?} overflows usize")]
    ShapeOverflow(Vec<usize>),
    #[error("invalid shape info: {0}")]
    InvalidShapeInfo(String),
    #[error("invalid order '{0}', expected 'c' or 'f'")]
    InvalidOrder(char),
}

pub type Result<T> = std::result::Result<T, TensorError>;
