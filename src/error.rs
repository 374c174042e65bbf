use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntrospectionError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Type {type_name} cannot be introspected: {reason}")]
    NotIntrospectable { type_name: String, reason: String },
    #[error("Ambiguous method {name}({args})")]
    AmbiguousMethod { name: String, args: String },
}

impl IntrospectionError {
    pub fn not_introspectable(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotIntrospectable {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}
