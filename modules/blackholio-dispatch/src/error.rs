use thiserror::Error;

/// Raw arguments did not parse against the reducer's argument shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Decode error for reducer '{reducer}': {message}")]
pub struct DecodeError {
    pub reducer: String,
    pub message: String,
}

impl DecodeError {
    pub fn new(reducer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reducer: reducer.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DispatchError {
    /// Client and server disagree on the schema.
    #[error("Unknown reducer: {0}")]
    UnknownReducer(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The router handed a facade the wrong argument type. A generation bug.
    #[error("Argument type mismatch: reducer '{reducer}' expected {expected}")]
    ArgumentTypeMismatch {
        reducer: String,
        expected: &'static str,
    },

    #[error("Duplicate reducer definition: {0}")]
    DuplicateReducer(String),
}

/// A handler panicked during an invocation pass. Isolated, never propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Handler fault in reducer '{reducer}' (handler #{position}): {message}")]
pub struct HandlerFault {
    pub reducer: String,
    /// Index of the handler within the pass snapshot.
    pub position: usize,
    pub message: String,
}
