use ccm_types::TypesError;

#[derive(Debug, thiserror::Error)]
pub enum CareError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error(transparent)]
    Types(#[from] TypesError),
    #[error("failed to read assessment file: {0}")]
    FileRead(std::io::Error),
    #[error("invalid YAML: {0}")]
    InvalidYaml(serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
    #[error("translation error: {0}")]
    Translation(String),
}

impl CareError {
    /// Whether the error was caused by caller-supplied data rather than the environment.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CareError::FileRead(_))
    }
}

pub type CareResult<T> = std::result::Result<T, CareError>;
