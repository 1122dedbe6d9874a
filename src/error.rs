use thiserror::Error;

/// Failures talking to the text-generation API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to LLM API failed: {0}")]
    Network(reqwest::Error),

    #[error("LLM API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode LLM response: {0}")]
    Decode(String),

    #[error("LLM returned no content")]
    EmptyContent,
}

// reqwest errors carry the endpoint URL, which must stay out of logs.
impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        UpstreamError::Network(e.without_url())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("haiku not found in LLM response, missing $(haiku)$ delimiters")]
pub struct DelimiterNotFound;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid haiku payload: {0}")]
pub struct ValidationError(pub String);

/// A failed scheduler cycle, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("generate stage: {0}")]
    Generate(#[from] UpstreamError),

    #[error("extract stage: {0}")]
    Extract(#[from] DelimiterNotFound),

    #[error("persist stage: {0}")]
    Persist(#[from] StoreError),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Generate(_) => "generate",
            PipelineError::Extract(_) => "extract",
            PipelineError::Persist(_) => "persist",
        }
    }
}
