use std::fmt;

/**
 * Represents the type of error that can occur within the application.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    /**
     * Startup failed, e.g. unreadable configuration or broken sample data.
     */
    Initialization,
    /**
     * A required field is missing or blank, or a value could not be parsed.
     */
    Validation,
    /**
     * A mutation or lookup referenced an unknown identifier.
     */
    NotFound,
    /**
     * Shared state could not be accessed.
     */
    Internal,
}

/**
 * Represents an error that occurs within the application.
 */
#[derive(Debug, Clone)]
pub struct ApplicationError {
    /**
     * Error type.
     */
    pub error_type: ErrorType,
    /**
     * Error message describing problem.
     */
    pub message: String,
}

impl ApplicationError {
    /**
     * Creates a new ApplicationError.
     *
     * #Arguments
     * `error_type`: The type of error.
     * `message`: A description of the error.
     */
    pub fn new(error_type: ErrorType, message: String) -> Self {
        ApplicationError { error_type, message }
    }

    /**
     * Shorthand for a validation error.
     */
    pub fn validation(message: impl Into<String>) -> Self {
        ApplicationError::new(ErrorType::Validation, message.into())
    }

    /**
     * Shorthand for a not found error.
     */
    pub fn not_found(message: impl Into<String>) -> Self {
        ApplicationError::new(ErrorType::NotFound, message.into())
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApplicationError {}
