// Thu Feb 05 2026 - Alex

//! Method descriptor layouts for every supported ART generation.
//!
//! Descriptor layout does not change linearly between releases, so every
//! generation is listed explicitly and anything missing is rejected at lookup.

use crate::error::{PatchError, Result};
use crate::layout::{FieldName, FieldOffset};
use crate::memory::FieldWidth;
use crate::runtime::{PointerWidth, RuntimeProfile, RuntimeVersion};
use once_cell::sync::OnceCell;
use serde::Serialize;

/// How the two entry-point fields are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntrySlot {
    /// Native pointer width.
    Pointer,
    /// Always 64 bits, whatever the process pointer width (Lollipop's mirror::ArtMethod).
    Fixed64,
}

impl EntrySlot {
    pub fn width(self, pointer_width: PointerWidth) -> FieldWidth {
        match self {
            Self::Pointer => pointer_width.field_width(),
            Self::Fixed64 => FieldWidth::Qword,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Offsets {
    entry_point: u64,
    jni_entry_point: u64,
    access_flags: u64,
}

const fn offsets(entry_point: u64, jni_entry_point: u64, access_flags: u64) -> Offsets {
    Offsets {
        entry_point,
        jni_entry_point,
        access_flags,
    }
}

#[derive(Debug, Clone, Copy)]
struct Generation {
    version: RuntimeVersion,
    slot: EntrySlot,
    bits64: Offsets,
    bits32: Offsets,
}

impl Generation {
    fn layout(&self, pointer_width: PointerWidth) -> DescriptorLayout {
        let raw = match pointer_width {
            PointerWidth::Bits64 => self.bits64,
            PointerWidth::Bits32 => self.bits32,
        };
        let entry_width = self.slot.width(pointer_width);
        DescriptorLayout {
            entry_point: FieldOffset::new(raw.entry_point, entry_width),
            jni_entry_point: FieldOffset::new(raw.jni_entry_point, entry_width),
            access_flags: FieldOffset::new(raw.access_flags, FieldWidth::Dword),
        }
    }
}

// KitKat and Oreo MR1 are classified but deliberately absent.
const GENERATIONS: &[Generation] = &[
    Generation {
        version: RuntimeVersion::Oreo,
        slot: EntrySlot::Pointer,
        bits64: offsets(40, 32, 4),
        bits32: offsets(28, 24, 4),
    },
    Generation {
        version: RuntimeVersion::NougatMr1,
        slot: EntrySlot::Pointer,
        bits64: offsets(48, 40, 4),
        bits32: offsets(32, 28, 4),
    },
    Generation {
        version: RuntimeVersion::Nougat,
        slot: EntrySlot::Pointer,
        bits64: offsets(48, 40, 4),
        bits32: offsets(32, 28, 4),
    },
    Generation {
        version: RuntimeVersion::Marshmallow,
        slot: EntrySlot::Pointer,
        bits64: offsets(48, 40, 12),
        bits32: offsets(36, 32, 12),
    },
    Generation {
        version: RuntimeVersion::LollipopMr1,
        slot: EntrySlot::Pointer,
        bits64: offsets(52, 44, 20),
        bits32: offsets(44, 40, 20),
    },
    Generation {
        version: RuntimeVersion::Lollipop,
        slot: EntrySlot::Fixed64,
        bits64: offsets(40, 32, 56),
        bits32: offsets(40, 32, 56),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DescriptorLayout {
    pub entry_point: FieldOffset,
    pub jni_entry_point: FieldOffset,
    pub access_flags: FieldOffset,
}

impl DescriptorLayout {
    pub fn offset(&self, field: FieldName) -> FieldOffset {
        match field {
            FieldName::EntryPoint => self.entry_point,
            FieldName::JniEntryPoint => self.jni_entry_point,
            FieldName::AccessFlags => self.access_flags,
        }
    }

    pub fn fields(&self) -> [(FieldName, FieldOffset); 3] {
        FieldName::ALL.map(|field| (field, self.offset(field)))
    }

    /// Bytes from the descriptor base that must be readable to touch every field.
    pub fn span(&self) -> u64 {
        self.fields()
            .iter()
            .map(|(_, offset)| offset.end())
            .max()
            .unwrap_or(0)
    }

    fn validate(&self, profile: RuntimeProfile, slot: EntrySlot) -> Result<()> {
        let invalid = |reason: String| PatchError::InvalidLayout {
            profile: profile.to_string(),
            reason,
        };

        if self.access_flags.width != FieldWidth::Dword {
            return Err(invalid(format!(
                "access flags must be a DWORD, found {}",
                self.access_flags.width
            )));
        }

        let entry_width = slot.width(profile.pointer_width);
        for field in [FieldName::EntryPoint, FieldName::JniEntryPoint] {
            let offset = self.offset(field);
            if offset.width != entry_width {
                return Err(invalid(format!(
                    "{} is {} but {:?} slots on {} are {}",
                    field, offset.width, slot, profile.pointer_width, entry_width
                )));
            }
        }

        for (field, offset) in self.fields() {
            if offset.byte_offset % 4 != 0 {
                return Err(invalid(format!("{} at {} is not 4-byte aligned", field, offset)));
            }
        }

        let fields = self.fields();
        for (i, (name_a, a)) in fields.iter().enumerate() {
            for (name_b, b) in &fields[i + 1..] {
                if a.overlaps(b) {
                    return Err(invalid(format!("{} {} overlaps {} {}", name_a, a, name_b, b)));
                }
            }
        }
        Ok(())
    }
}

const SLOTS: usize = RuntimeVersion::ALL.len() * PointerWidth::ALL.len();

fn slot_index(profile: RuntimeProfile) -> usize {
    profile.version.index() * PointerWidth::ALL.len() + profile.pointer_width.index()
}

/// Read-only table of layouts keyed by `(RuntimeVersion, PointerWidth)`.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    entries: [Option<DescriptorLayout>; SLOTS],
}

impl LayoutRegistry {
    /// Builds and validates the built-in table.
    pub fn new() -> Result<Self> {
        Self::build(GENERATIONS)
    }

    fn build(generations: &[Generation]) -> Result<Self> {
        let mut entries = [None; SLOTS];
        for generation in generations {
            for pointer_width in PointerWidth::ALL {
                let profile = RuntimeProfile::new(generation.version, pointer_width);
                let layout = generation.layout(pointer_width);
                layout.validate(profile, generation.slot)?;

                let slot = &mut entries[slot_index(profile)];
                if slot.is_some() {
                    return Err(PatchError::InvalidLayout {
                        profile: profile.to_string(),
                        reason: "listed twice".to_string(),
                    });
                }
                *slot = Some(layout);
            }
        }
        Ok(Self { entries })
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> Result<&'static LayoutRegistry> {
        static REGISTRY: OnceCell<LayoutRegistry> = OnceCell::new();
        REGISTRY.get_or_try_init(LayoutRegistry::new)
    }

    pub fn layout(&self, profile: RuntimeProfile) -> Result<DescriptorLayout> {
        self.entries[slot_index(profile)].ok_or_else(|| {
            PatchError::UnsupportedRuntime(format!("no descriptor layout for {}", profile))
        })
    }

    pub fn resolve(&self, profile: RuntimeProfile, field: FieldName) -> Result<FieldOffset> {
        Ok(self.layout(profile)?.offset(field))
    }

    pub fn is_supported(&self, profile: RuntimeProfile) -> bool {
        self.entries[slot_index(profile)].is_some()
    }

    /// Every supported profile with its layout, oldest generation first.
    pub fn supported(&self) -> Vec<(RuntimeProfile, DescriptorLayout)> {
        RuntimeVersion::ALL
            .iter()
            .flat_map(|&version| {
                PointerWidth::ALL
                    .iter()
                    .map(move |&width| RuntimeProfile::new(version, width))
            })
            .filter_map(|profile| self.layout(profile).ok().map(|layout| (profile, layout)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(version: RuntimeVersion, width: PointerWidth) -> RuntimeProfile {
        RuntimeProfile::new(version, width)
    }

    #[test]
    fn test_builtin_table_validates() {
        let registry = LayoutRegistry::new().unwrap();
        assert_eq!(registry.supported().len(), 12);
    }

    #[test]
    fn test_every_supported_pair_is_complete() {
        let registry = LayoutRegistry::new().unwrap();
        for (profile, _) in registry.supported() {
            for field in FieldName::ALL {
                let offset = registry.resolve(profile, field).unwrap();
                assert!(matches!(offset.width.bytes(), 4 | 8));
                if field == FieldName::AccessFlags {
                    assert_eq!(offset.width, FieldWidth::Dword);
                }
            }
        }
    }

    #[test]
    fn test_unsupported_generations_rejected() {
        let registry = LayoutRegistry::new().unwrap();
        for version in [RuntimeVersion::KitKat, RuntimeVersion::OreoMr1] {
            for width in PointerWidth::ALL {
                let err = registry
                    .resolve(profile(version, width), FieldName::EntryPoint)
                    .unwrap_err();
                assert!(matches!(err, PatchError::UnsupportedRuntime(_)));
            }
        }
    }

    #[test]
    fn test_width_is_not_interchangeable() {
        let registry = LayoutRegistry::new().unwrap();
        let narrow = registry
            .layout(profile(RuntimeVersion::Nougat, PointerWidth::Bits32))
            .unwrap();
        let wide = registry
            .layout(profile(RuntimeVersion::Nougat, PointerWidth::Bits64))
            .unwrap();

        assert_eq!(narrow.entry_point, FieldOffset::new(32, FieldWidth::Dword));
        assert_eq!(narrow.jni_entry_point, FieldOffset::new(28, FieldWidth::Dword));
        assert_eq!(wide.entry_point, FieldOffset::new(48, FieldWidth::Qword));
        assert_eq!(wide.jni_entry_point, FieldOffset::new(40, FieldWidth::Qword));
        assert_ne!(narrow, wide);
    }

    #[test]
    fn test_oreo_offsets() {
        let registry = LayoutRegistry::new().unwrap();
        let layout = registry
            .layout(profile(RuntimeVersion::Oreo, PointerWidth::Bits64))
            .unwrap();
        assert_eq!(layout.entry_point.byte_offset, 40);
        assert_eq!(layout.jni_entry_point.byte_offset, 32);
        assert_eq!(layout.access_flags, FieldOffset::new(4, FieldWidth::Dword));
        assert_eq!(layout.span(), 48);
    }

    #[test]
    fn test_lollipop_uses_wide_slots_on_32_bit() {
        let registry = LayoutRegistry::new().unwrap();
        let layout = registry
            .layout(profile(RuntimeVersion::Lollipop, PointerWidth::Bits32))
            .unwrap();
        assert_eq!(layout.entry_point, FieldOffset::new(40, FieldWidth::Qword));
        assert_eq!(layout.jni_entry_point, FieldOffset::new(32, FieldWidth::Qword));
        assert_eq!(layout.access_flags, FieldOffset::new(56, FieldWidth::Dword));
    }

    #[test]
    fn test_duplicate_generation_rejected() {
        let twice = [GENERATIONS[0], GENERATIONS[0]];
        assert!(matches!(
            LayoutRegistry::build(&twice),
            Err(PatchError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn test_overlapping_fields_rejected() {
        let broken = Generation {
            version: RuntimeVersion::Oreo,
            slot: EntrySlot::Pointer,
            bits64: offsets(40, 36, 4),
            bits32: offsets(28, 24, 4),
        };
        assert!(matches!(
            LayoutRegistry::build(&[broken]),
            Err(PatchError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn test_misaligned_entry_rejected() {
        let broken = Generation {
            version: RuntimeVersion::Oreo,
            slot: EntrySlot::Pointer,
            bits64: offsets(42, 32, 4),
            bits32: offsets(28, 24, 4),
        };
        assert!(matches!(
            LayoutRegistry::build(&[broken]),
            Err(PatchError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn test_global_is_shared() {
        let a = LayoutRegistry::global().unwrap() as *const LayoutRegistry;
        let b = LayoutRegistry::global().unwrap() as *const LayoutRegistry;
        assert_eq!(a, b);
    }
}
