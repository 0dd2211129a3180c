// Wed Feb 04 2026 - Alex

use crate::memory::{Address, DescriptorResolver, MemoryError, MemoryReader, MemoryWriter};

/// Direct access to the current process's memory.
///
/// The caller vouches that every address handed in belongs to a live method
/// descriptor; nothing here can check that.
pub struct LocalMemory {
    page_size: usize,
}

impl LocalMemory {
    pub fn new() -> Self {
        Self { page_size: page_size() }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[cfg(unix)]
    fn make_writable(&self, addr: Address, len: usize) -> Result<(), MemoryError> {
        let start = addr.align_down(self.page_size);
        let end = addr
            .checked_add(len as u64)
            .ok_or(MemoryError::InvalidAddress(addr))?;
        let span = (end.as_u64() - start.as_u64()) as usize;

        let result = unsafe {
            libc::mprotect(
                start.as_mut_ptr() as *mut libc::c_void,
                span,
                libc::PROT_READ | libc::PROT_WRITE,
            )
        };
        if result != 0 {
            return Err(MemoryError::PermissionDenied(
                addr,
                std::io::Error::last_os_error().to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn make_writable(&self, addr: Address, _len: usize) -> Result<(), MemoryError> {
        Err(MemoryError::NotSupported(format!(
            "changing page protection at {} on this platform",
            addr
        )))
    }
}

impl Default for LocalMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size <= 0 {
        4096
    } else {
        size as usize
    }
}

#[cfg(not(unix))]
fn page_size() -> usize {
    4096
}

impl MemoryReader for LocalMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        if addr.is_null() {
            return Err(MemoryError::InvalidAddress(addr));
        }
        let mut out = vec![0u8; len];
        unsafe {
            std::ptr::copy_nonoverlapping(addr.as_ptr(), out.as_mut_ptr(), len);
        }
        Ok(out)
    }
}

impl MemoryWriter for LocalMemory {
    fn write_bytes(&self, addr: Address, data: &[u8]) -> Result<(), MemoryError> {
        if addr.is_null() {
            return Err(MemoryError::InvalidAddress(addr));
        }
        self.make_writable(addr, data.len())?;
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), addr.as_mut_ptr(), data.len());
        }
        Ok(())
    }
}

impl DescriptorResolver for LocalMemory {
    // ART hands out the ArtMethod pointer itself as the jmethodID.
    fn resolve_descriptor_address(&self, reference: u64) -> Result<Address, MemoryError> {
        if reference == 0 {
            return Err(MemoryError::InvalidAddress(Address::zero()));
        }
        Ok(Address::new(reference))
    }
}
