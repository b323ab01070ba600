use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Mobile number already registered: {mobile}")]
    DuplicateMobile { mobile: String },

    #[error("Username already exists: {username}")]
    DuplicateUsername { username: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    System,
    Configuration,
    Input,
    Access,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn validation(message: impl Into<String>) -> Self {
        AdvisorError::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        AdvisorError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::IoError(_)
            | AdvisorError::SerializationError(_)
            | AdvisorError::CsvError(_) => ErrorCategory::System,
            AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdvisorError::ValidationError { .. }
            | AdvisorError::DuplicateMobile { .. }
            | AdvisorError::DuplicateUsername { .. }
            | AdvisorError::NotFound { .. } => ErrorCategory::Input,
            AdvisorError::InvalidCredentials => ErrorCategory::Access,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::System => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Access => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AdvisorError::IoError(_) => {
                "Check that the data file location exists and is writable".to_string()
            }
            AdvisorError::SerializationError(_) => {
                "The data file may be corrupted; restore it from a backup or remove it".to_string()
            }
            AdvisorError::CsvError(_) => "Check the report output directory".to_string(),
            AdvisorError::ConfigValidationError { field, .. }
            | AdvisorError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in your configuration", field)
            }
            AdvisorError::ValidationError { .. } => {
                "Fill in soil type, water level and crop before submitting".to_string()
            }
            AdvisorError::DuplicateMobile { .. } => {
                "Log in with the existing account or use another mobile number".to_string()
            }
            AdvisorError::DuplicateUsername { .. } => "Choose a different username".to_string(),
            AdvisorError::InvalidCredentials => "Check the name and password".to_string(),
            AdvisorError::NotFound { entity, .. } if *entity == "submission" => {
                "Submit your farm data first to get crop suggestions".to_string()
            }
            AdvisorError::NotFound { .. } => "List the records and check the id".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdvisorError::DuplicateMobile { .. } => "Mobile number already registered!".to_string(),
            AdvisorError::DuplicateUsername { .. } => "Username already exists!".to_string(),
            AdvisorError::InvalidCredentials => "Invalid credentials".to_string(),
            AdvisorError::NotFound { entity, key } => format!("No {} found for {}", entity, key),
            AdvisorError::ValidationError { message } => message.clone(),
            other => format!("Operation failed: {}", other),
        }
    }
}

impl From<toml::de::Error> for AdvisorError {
    fn from(e: toml::de::Error) -> Self {
        AdvisorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
