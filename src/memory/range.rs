// Mon Feb 02 2026 - Alex

use crate::memory::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryRange {
    start: Address,
    end: Address,
}

impl MemoryRange {
    /// Builds a range, swapping the bounds if they arrive reversed.
    pub fn new(start: Address, end: Address) -> Self {
        if end < start {
            return Self { start: end, end: start };
        }
        Self { start, end }
    }

    pub fn from_start_size(start: Address, size: u64) -> Self {
        Self::new(start, Address::new(start.as_u64().saturating_add(size)))
    }

    pub fn start(&self) -> Address {
        self.start
    }

    pub fn end(&self) -> Address {
        self.end
    }

    pub fn size(&self) -> u64 {
        self.end.as_u64() - self.start.as_u64()
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr >= self.start && addr < self.end
    }

    /// Whether all of `[addr, addr + len)` lies inside the range.
    pub fn contains_span(&self, addr: Address, len: usize) -> bool {
        match addr.checked_add(len as u64) {
            Some(end) => addr >= self.start && end <= self.end,
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for MemoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_span() {
        let range = MemoryRange::from_start_size(Address::new(0x1000), 0x40);
        assert!(range.contains_span(Address::new(0x1000), 0x40));
        assert!(range.contains_span(Address::new(0x1038), 8));
        assert!(!range.contains_span(Address::new(0x1039), 8));
        assert!(!range.contains_span(Address::new(0x0fff), 1));
        assert!(!range.contains_span(Address::new(u64::MAX), 2));
    }

    #[test]
    fn test_reversed_bounds() {
        let range = MemoryRange::new(Address::new(0x2000), Address::new(0x1000));
        assert_eq!(range.start(), Address::new(0x1000));
        assert_eq!(range.size(), 0x1000);
        assert!(range.contains(Address::new(0x1fff)));
        assert!(!range.contains(Address::new(0x2000)));
    }
}
