// Mon Feb 02 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address {
    value: u64,
}

impl Address {
    pub const fn new(value: u64) -> Self {
        Self { value }
    }

    pub const fn zero() -> Self {
        Self { value: 0 }
    }

    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self { value: ptr as usize as u64 }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.value as usize as *const u8
    }

    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.value as usize as *mut u8
    }

    pub fn is_null(&self) -> bool {
        self.value == 0
    }

    pub fn is_aligned(&self, alignment: usize) -> bool {
        self.value % alignment as u64 == 0
    }

    pub fn align_down(&self, alignment: usize) -> Self {
        Self { value: self.value & !(alignment as u64 - 1) }
    }

    pub fn checked_add(&self, offset: u64) -> Option<Self> {
        self.value.checked_add(offset).map(Self::new)
    }

    /// Distance in bytes from `base`, or `None` when `self` lies below it.
    pub fn offset_from(&self, base: Self) -> Option<u64> {
        self.value.checked_sub(base.value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.value)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_overflow() {
        let addr = Address::new(u64::MAX - 4);
        assert_eq!(addr.checked_add(4), Some(Address::new(u64::MAX)));
        assert_eq!(addr.checked_add(5), None);
    }

    #[test]
    fn test_offset_from() {
        let base = Address::new(0x1000);
        assert_eq!(Address::new(0x1028).offset_from(base), Some(0x28));
        assert_eq!(Address::new(0x0fff).offset_from(base), None);
    }

    #[test]
    fn test_align_down() {
        assert_eq!(Address::new(0x12345).align_down(0x1000), Address::new(0x12000));
        assert!(Address::new(0x12000).is_aligned(0x1000));
    }

    #[test]
    fn test_display() {
        assert_eq!(Address::new(0x7f00_1234).to_string(), "0x000000007f001234");
    }
}
