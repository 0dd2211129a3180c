// Mon Feb 02 2026 - Alex

use crate::memory::{Address, FieldWidth, MemoryError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Unsupported runtime: {0}")]
    UnsupportedRuntime(String),
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    #[error("Value 0x{value:x} does not fit in a {width} field")]
    ValueOverflow { value: u64, width: FieldWidth },
    #[error("Memory access failed: {0}")]
    MemoryAccessFailure(#[from] MemoryError),
    #[error("Invalid layout for {profile}: {reason}")]
    InvalidLayout { profile: String, reason: String },
    #[error("Layout mismatch: {0}")]
    LayoutMismatch(String),
    #[error("Cannot {operation} hook {id} while {state}")]
    HookState {
        id: String,
        state: String,
        operation: &'static str,
    },
    #[error("Unknown hook: {0}")]
    UnknownHook(String),
    #[error("Backup of {backup} cannot restore descriptor at {live}")]
    BackupMismatch { live: Address, backup: Address },
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PatchError {
    /// Errors after which no hook can safely be installed on this runtime.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedRuntime(_) | Self::InvalidLayout { .. } | Self::LayoutMismatch(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
