use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date '{0}' (expected DD.MM.YYYY)")]
    InvalidDate(String),

    #[error("Invalid period: {begin} is after {end}")]
    InvalidPeriod { begin: String, end: String },

    #[error("Invalid contract count '{value}' for user {user_id} at dealer {dealer_id} (model {model_id})")]
    InvalidUnits {
        model_id: String,
        dealer_id: String,
        user_id: String,
        value: String,
    },

    #[error("Cannot {action} from the {view} view")]
    InvalidTransition { action: &'static str, view: &'static str },

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown dealer '{dealer_id}' for model {model_id}")]
    UnknownDealer { model_id: String, dealer_id: String },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SalesError>;
