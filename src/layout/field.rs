// Thu Feb 05 2026 - Alex

use crate::memory::FieldWidth;
use serde::Serialize;
use std::fmt;

/// The descriptor fields the patcher reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldName {
    /// `entry_point_from_quick_compiled_code_`
    EntryPoint,
    /// `entry_point_from_jni_`
    JniEntryPoint,
    /// `access_flags_`
    AccessFlags,
}

impl FieldName {
    pub const ALL: [FieldName; 3] = [
        FieldName::EntryPoint,
        FieldName::JniEntryPoint,
        FieldName::AccessFlags,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EntryPoint => "entry_point",
            Self::JniEntryPoint => "jni_entry_point",
            Self::AccessFlags => "access_flags",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldOffset {
    pub byte_offset: u64,
    pub width: FieldWidth,
}

impl FieldOffset {
    pub const fn new(byte_offset: u64, width: FieldWidth) -> Self {
        Self { byte_offset, width }
    }

    pub fn end(&self) -> u64 {
        self.byte_offset + self.width.bytes() as u64
    }

    pub fn overlaps(&self, other: &FieldOffset) -> bool {
        self.byte_offset < other.end() && other.byte_offset < self.end()
    }
}

impl fmt::Display for FieldOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} ({})", self.byte_offset, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let flags = FieldOffset::new(4, FieldWidth::Dword);
        let jni = FieldOffset::new(32, FieldWidth::Qword);
        let quick = FieldOffset::new(40, FieldWidth::Qword);
        assert!(!jni.overlaps(&quick));
        assert!(!flags.overlaps(&jni));
        assert!(FieldOffset::new(36, FieldWidth::Qword).overlaps(&quick));
        assert!(FieldOffset::new(6, FieldWidth::Dword).overlaps(&flags));
    }
}
