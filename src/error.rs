use thiserror::Error;

use crate::model::MethodReference;

/// Result type for code generation.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors that halt code generation for the enclosing module.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("class not found: {class_name}")]
    ClassNotFound { class_name: String },

    #[error("method not found: {method}")]
    MethodNotFound { method: MethodReference },

    #[error("method has no program to compile: {method}")]
    MissingProgram { method: MethodReference },

    #[error("invalid descriptor: {descriptor}")]
    InvalidDescriptor { descriptor: String },
}

impl GenerateError {
    pub fn class_not_found(class_name: impl Into<String>) -> Self {
        Self::ClassNotFound {
            class_name: class_name.into(),
        }
    }

    pub fn invalid_descriptor(descriptor: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            descriptor: descriptor.into(),
        }
    }
}
