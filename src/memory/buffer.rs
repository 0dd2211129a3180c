// Tue Feb 03 2026 - Alex

use crate::memory::{
    Address, DescriptorResolver, MemoryError, MemoryRange, MemoryReader, MemoryWriter,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// A byte buffer mapped at a fixed base address, standing in for runtime memory.
///
/// Descriptors are placed with [`BufferMemory::register_descriptor`]; any
/// access outside the buffer fails instead of panicking.
pub struct BufferMemory {
    range: MemoryRange,
    data: RwLock<Vec<u8>>,
    descriptors: RwLock<HashMap<u64, Address>>,
    read_only: AtomicBool,
}

impl BufferMemory {
    pub fn new(base: Address, size: usize) -> Self {
        Self {
            range: MemoryRange::from_start_size(base, size as u64),
            data: RwLock::new(vec![0u8; size]),
            descriptors: RwLock::new(HashMap::new()),
            read_only: AtomicBool::new(false),
        }
    }

    pub fn range(&self) -> MemoryRange {
        self.range
    }

    pub fn base_address(&self) -> Address {
        self.range.start()
    }

    /// Makes `reference` resolve to the descriptor at `addr`.
    pub fn register_descriptor(&self, reference: u64, addr: Address) {
        self.descriptors.write().insert(reference, addr);
    }

    /// Rejects subsequent writes with `PermissionDenied`, like a page that was never unprotected.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn span(&self, addr: Address, len: usize) -> Result<std::ops::Range<usize>, MemoryError> {
        if !self.range.contains_span(addr, len) {
            return Err(MemoryError::OutOfBounds { addr, len });
        }
        let start = addr
            .offset_from(self.range.start())
            .ok_or(MemoryError::OutOfBounds { addr, len })? as usize;
        Ok(start..start + len)
    }
}

impl MemoryReader for BufferMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        let span = self.span(addr, len)?;
        Ok(self.data.read()[span].to_vec())
    }
}

impl MemoryWriter for BufferMemory {
    fn write_bytes(&self, addr: Address, data: &[u8]) -> Result<(), MemoryError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(MemoryError::PermissionDenied(addr, "buffer is read-only".to_string()));
        }
        let span = self.span(addr, data.len())?;
        self.data.write()[span].copy_from_slice(data);
        Ok(())
    }
}

impl DescriptorResolver for BufferMemory {
    fn resolve_descriptor_address(&self, reference: u64) -> Result<Address, MemoryError> {
        self.descriptors
            .read()
            .get(&reference)
            .copied()
            .ok_or(MemoryError::UnresolvedReference(reference))
    }
}
