// Mon Feb 02 2026 - Alex

use crate::memory::{Address, MemoryError};

/// Raw byte reads from the memory that holds method descriptors.
pub trait MemoryReader: Send + Sync {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError>;
}

/// Raw byte writes. Takes `&self`: descriptors are shared with the runtime,
/// so implementations carry their own interior mutability.
pub trait MemoryWriter: Send + Sync {
    fn write_bytes(&self, addr: Address, data: &[u8]) -> Result<(), MemoryError>;
}

/// Maps an opaque reflective reference to the address of its method descriptor.
pub trait DescriptorResolver: Send + Sync {
    fn resolve_descriptor_address(&self, reference: u64) -> Result<Address, MemoryError>;
}

/// The three primitives the patcher needs from its host.
pub trait MemoryBridge: MemoryReader + MemoryWriter + DescriptorResolver {}

impl<T> MemoryBridge for T where T: MemoryReader + MemoryWriter + DescriptorResolver {}
