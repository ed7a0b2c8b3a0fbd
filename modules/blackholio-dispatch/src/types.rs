//! Core types handed to the dispatch core by the transport. Schema-agnostic.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 256-bit caller identity, rendered as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(pub [u8; 32]);

impl Identity {
    pub const ZERO: Identity = Identity([0; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Identifies one client connection of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Connection lifecycle as seen by the transport. Reflected, never managed, here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

/// Outcome of the reducer run on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ReducerStatus {
    Committed,
    Failed(String),
    OutOfEnergy,
}

/// Metadata for one reducer event. Built by the transport, borrowed by handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducerEventContext {
    pub reducer: String,
    pub connection_state: ConnectionState,
    pub caller_identity: Option<Identity>,
    pub caller_connection_id: Option<ConnectionId>,
    pub timestamp: DateTime<Utc>,
    pub status: ReducerStatus,
    pub energy_used: Option<u128>,
}

impl ReducerEventContext {
    /// A committed event for `reducer` on a connected client, stamped now.
    pub fn new(reducer: impl Into<String>) -> Self {
        Self {
            reducer: reducer.into(),
            connection_state: ConnectionState::Connected,
            caller_identity: None,
            caller_connection_id: None,
            timestamp: Utc::now(),
            status: ReducerStatus::Committed,
            energy_used: None,
        }
    }

    pub fn with_connection_state(mut self, state: ConnectionState) -> Self {
        self.connection_state = state;
        self
    }

    pub fn with_caller(mut self, identity: Identity, connection_id: ConnectionId) -> Self {
        self.caller_identity = Some(identity);
        self.caller_connection_id = Some(connection_id);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_status(mut self, status: ReducerStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_energy_used(mut self, energy: u128) -> Self {
        self.energy_used = Some(energy);
        self
    }
}

/// One decoded-envelope notification from the transport: which reducer ran,
/// its context, and the still-encoded arguments.
///
/// The reducer name is read from the context, so the router and the handlers
/// always agree on it.
#[derive(Debug, Clone)]
pub struct ReducerCall {
    context: ReducerEventContext,
    args: Vec<u8>,
}

impl ReducerCall {
    pub fn new(context: ReducerEventContext, args: impl Into<Vec<u8>>) -> Self {
        Self {
            context,
            args: args.into(),
        }
    }

    /// Call with an empty argument payload (zero-field reducers).
    pub fn without_args(context: ReducerEventContext) -> Self {
        Self::new(context, Vec::new())
    }

    pub fn reducer(&self) -> &str {
        &self.context.reducer
    }

    pub fn context(&self) -> &ReducerEventContext {
        &self.context
    }

    pub fn args(&self) -> &[u8] {
        &self.args
    }
}
