//! ArgsDecoder implementations.

use crate::definition::ReducerDefinition;
use crate::error::DecodeError;
use crate::traits::{ArgsDecoder, ReducerArgs};

/// Decodes argument records from JSON objects.
///
/// An empty (or all-whitespace) payload is read as `{}`, which is what
/// zero-field reducers such as `connect` receive.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArgsDecoder;

impl ArgsDecoder for JsonArgsDecoder {
    fn decode<A: ReducerArgs>(
        &self,
        definition: &ReducerDefinition,
        raw: &[u8],
    ) -> Result<A, DecodeError> {
        let raw: &[u8] = if raw.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            raw
        };
        serde_json::from_slice(raw).map_err(|e| DecodeError::new(definition.name, e.to_string()))
    }
}
