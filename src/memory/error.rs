// Mon Feb 02 2026 - Alex

use crate::memory::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid address: {0}")]
    InvalidAddress(Address),
    #[error("Out of bounds: {len} bytes at {addr} not in range")]
    OutOfBounds { addr: Address, len: usize },
    #[error("Permission denied at {0}: {1}")]
    PermissionDenied(Address, String),
    #[error("Short read at {addr}: expected {expected} bytes, got {actual}")]
    ShortRead { addr: Address, expected: usize, actual: usize },
    #[error("No descriptor registered for reference 0x{0:x}")]
    UnresolvedReference(u64),
    #[error("Not supported: {0}")]
    NotSupported(String),
}
