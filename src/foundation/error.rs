pub type DoofioResult<T> = Result<T, DoofioError>;

#[derive(thiserror::Error, Debug)]
pub enum DoofioError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DoofioError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
