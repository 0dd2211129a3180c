// Sat Feb 07 2026 - Alex

//! Recovers descriptor offsets from a live descriptor whose contents are known.
//!
//! The anchor is a framework native method (`Process.setArgV0`): its access
//! flags are fixed and its JNI entry points into the library that implements
//! it. Discovery only cross-checks the registry; it never feeds it.

use crate::error::{PatchError, Result};
use crate::layout::{DescriptorLayout, FieldName, FieldOffset, LayoutRegistry};
use crate::memory::{codec, Address, FieldWidth, MemoryRange, MemoryReader};
use crate::method::AccessFlags;
use crate::runtime::RuntimeProfile;
use log::{debug, info};

/// Bytes of the anchor descriptor that are scanned.
pub const PROBE_WINDOW: usize = 64;

pub struct LayoutProbe<'a, R: MemoryReader + ?Sized> {
    reader: &'a R,
    entry_width: FieldWidth,
}

impl<'a, R: MemoryReader + ?Sized> LayoutProbe<'a, R> {
    pub fn new(reader: &'a R, entry_width: FieldWidth) -> Self {
        Self {
            reader,
            entry_width,
        }
    }

    /// Takes the entry slot width from the registry's layout for `profile`.
    pub fn for_profile(reader: &'a R, profile: RuntimeProfile) -> Result<Self> {
        let layout = LayoutRegistry::global()?.layout(profile)?;
        Ok(Self::new(reader, layout.entry_point.width))
    }

    pub fn discover(
        &self,
        descriptor: Address,
        expected_flags: AccessFlags,
        code_range: MemoryRange,
    ) -> Result<DescriptorLayout> {
        let window = self.reader.read_bytes(descriptor, PROBE_WINDOW)?;
        let entry_bytes = self.entry_width.bytes();

        let mut access_flags = None;
        let mut jni_entry = None;

        // Entry slots are only 4-byte aligned: LollipopMr1 64-bit keeps QWORDs at +44 and +52.
        for offset in (0..window.len()).step_by(4) {
            if access_flags.is_none() && offset + 4 <= window.len() {
                let value =
                    codec::decode_le(descriptor, &window[offset..offset + 4], FieldWidth::Dword)?;
                if value == expected_flags.bits() as u64 {
                    access_flags = Some(offset as u64);
                }
            }

            if jni_entry.is_none() && offset + entry_bytes <= window.len() {
                let value = codec::decode_le(
                    descriptor,
                    &window[offset..offset + entry_bytes],
                    self.entry_width,
                )?;
                if code_range.contains(Address::new(value)) {
                    jni_entry = Some(offset as u64);
                }
            }

            if access_flags.is_some() && jni_entry.is_some() {
                break;
            }
        }

        let access_flags = access_flags.ok_or_else(|| {
            PatchError::LayoutMismatch(format!(
                "access flags 0x{:x} not found within {} bytes of {}",
                expected_flags.bits(),
                PROBE_WINDOW,
                descriptor
            ))
        })?;
        let jni_entry = jni_entry.ok_or_else(|| {
            PatchError::LayoutMismatch(format!(
                "no entry into {} within {} bytes of {}",
                code_range, PROBE_WINDOW, descriptor
            ))
        })?;

        let layout = DescriptorLayout {
            entry_point: FieldOffset::new(jni_entry + entry_bytes as u64, self.entry_width),
            jni_entry_point: FieldOffset::new(jni_entry, self.entry_width),
            access_flags: FieldOffset::new(access_flags, FieldWidth::Dword),
        };
        debug!(
            "discovered layout at {}: flags {}, jni {}, quick {}",
            descriptor, layout.access_flags, layout.jni_entry_point, layout.entry_point
        );
        Ok(layout)
    }

    /// Discovers the layout and fails with `LayoutMismatch` on the first field
    /// that disagrees with `expected`.
    pub fn verify(
        &self,
        expected: &DescriptorLayout,
        descriptor: Address,
        expected_flags: AccessFlags,
        code_range: MemoryRange,
    ) -> Result<DescriptorLayout> {
        let discovered = self.discover(descriptor, expected_flags, code_range)?;
        for field in FieldName::ALL {
            let want = expected.offset(field);
            let found = discovered.offset(field);
            if want != found {
                return Err(PatchError::LayoutMismatch(format!(
                    "{}: registry says {}, descriptor says {}",
                    field, want, found
                )));
            }
        }
        info!("registry layout confirmed against descriptor at {}", descriptor);
        Ok(discovered)
    }
}
