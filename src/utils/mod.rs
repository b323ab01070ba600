pub mod credentials;
pub mod error;
pub mod logger;
pub mod validation;
