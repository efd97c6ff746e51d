use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse input JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to build internal workload model: {0}")]
    ModelConstructionError(String),

    #[error("Invalid reliability parameters: {0}")]
    InvalidParameters(String),

    #[error("Flow {0} has fewer than 2 nodes and cannot carry a transmission")]
    InvalidFlow(String),

    #[error("Transmission budget for flow {flow} did not converge after {rounds} rounds")]
    BudgetNonConvergence { flow: String, rounds: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
