// Mon Feb 09 2026 - Alex

use crate::error::Result;
use crate::layout::FieldName;
use crate::memory::codec;
use crate::method::{AccessFlags, MethodHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagEdit {
    Set(AccessFlags),
    Insert(AccessFlags),
    Remove(AccessFlags),
}

impl FlagEdit {
    pub fn apply(self, flags: AccessFlags) -> AccessFlags {
        match self {
            Self::Set(new) => new,
            Self::Insert(extra) => flags | extra,
            Self::Remove(gone) => flags - gone,
        }
    }
}

/// The field values a hook writes into the live descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    entry_point: u64,
    jni_entry_point: Option<u64>,
    flags: Option<FlagEdit>,
}

impl Patch {
    /// Redirects quick dispatch to `addr` and leaves everything else alone.
    pub fn entry_point(addr: u64) -> Self {
        Self {
            entry_point: addr,
            jni_entry_point: None,
            flags: None,
        }
    }

    /// Turns the target into a fast native method whose JNI entry is `jni_entry`.
    ///
    /// `quick_trampoline` must be the runtime's generic JNI trampoline, so that
    /// quick dispatch lands in the JNI bridge.
    pub fn native(jni_entry: u64, quick_trampoline: u64) -> Self {
        Self {
            entry_point: quick_trampoline,
            jni_entry_point: Some(jni_entry),
            flags: Some(FlagEdit::Insert(AccessFlags::NATIVE | AccessFlags::FAST_NATIVE)),
        }
    }

    pub fn with_jni_entry_point(mut self, addr: u64) -> Self {
        self.jni_entry_point = Some(addr);
        self
    }

    pub fn with_flags(mut self, edit: FlagEdit) -> Self {
        self.flags = Some(edit);
        self
    }

    pub fn target_entry_point(&self) -> u64 {
        self.entry_point
    }

    pub fn target_jni_entry_point(&self) -> Option<u64> {
        self.jni_entry_point
    }

    pub fn flag_edit(&self) -> Option<FlagEdit> {
        self.flags
    }

    /// Writes flags, then the JNI entry, then the quick entry, so dispatch is
    /// switched last. Every value is checked against its field width before
    /// the first write.
    pub fn apply(&self, live: &mut MethodHandle) -> Result<()> {
        let layout = *live.accessor().layout();
        codec::check_fits(self.entry_point, layout.offset(FieldName::EntryPoint).width)?;
        if let Some(jni) = self.jni_entry_point {
            codec::check_fits(jni, layout.offset(FieldName::JniEntryPoint).width)?;
        }

        if let Some(edit) = self.flags {
            let flags = live.access_flags()?;
            live.set_access_flags(edit.apply(flags))?;
        }
        if let Some(jni) = self.jni_entry_point {
            live.set_jni_entry_point(jni)?;
        }
        live.set_entry_point(self.entry_point)
    }
}
