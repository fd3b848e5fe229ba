#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum MaskError {
    /// Flag access past the end of the mask.
    #[error("index {index} is out of range for mask of size {size}")]
    IndexOutOfRange {
        index: usize,
        size: usize
    },

    /// Mask construction from values that don't describe a valid mask.
    #[error("invalid argument: {0}")]
    InvalidArgument(String)
}


impl MaskError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MaskError::InvalidArgument(msg.into())
    }
}
