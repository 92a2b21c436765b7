use thiserror::Error;

/// Failures while handling a chat frame. Reported to the sending socket only.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Invalid image data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Image is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("Failed to store image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to save chat message: {0}")]
    Db(#[from] sea_orm::DbErr),
}
