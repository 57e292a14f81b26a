use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodError {
    #[error("The API key is not correct. Please follow the instructions to obtain a valid API key.")]
    InvalidApiKey,
    #[error("You have reached your daily quota limit. Please upgrade to premium or try again tomorrow.")]
    QuotaExhausted,
    #[error("Failed to send request: {0}")]
    Request(reqwest::Error),
    #[error("API request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// reqwest puts the full request URL in its errors, and ours carry the apiKey
// query parameter.
impl From<reqwest::Error> for FoodError {
    fn from(e: reqwest::Error) -> Self {
        FoodError::Request(e.without_url())
    }
}

impl FoodError {
    /// True for the errors that mean the session's key can no longer be used.
    pub fn is_key_problem(&self) -> bool {
        matches!(self, FoodError::InvalidApiKey | FoodError::QuotaExhausted)
    }
}
