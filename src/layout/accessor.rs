// Thu Feb 05 2026 - Alex

use crate::error::Result;
use crate::layout::{DescriptorLayout, FieldName, LayoutRegistry};
use crate::memory::{codec, Address, MemoryBridge, MemoryError};
use crate::runtime::{self, RuntimeProfile};
use log::{debug, trace};
use std::sync::Arc;

/// Typed reads and writes of descriptor fields.
///
/// All field traffic goes through here, so width and byte order are decided
/// in one place.
#[derive(Clone)]
pub struct FieldAccessor {
    bridge: Arc<dyn MemoryBridge>,
    profile: RuntimeProfile,
    layout: DescriptorLayout,
}

impl FieldAccessor {
    /// Fails with `UnsupportedRuntime` when the registry has no layout for `profile`.
    pub fn new(bridge: Arc<dyn MemoryBridge>, profile: RuntimeProfile) -> Result<Self> {
        let layout = LayoutRegistry::global()?.layout(profile)?;
        Ok(Self {
            bridge,
            profile,
            layout,
        })
    }

    /// Uses the process-wide profile.
    pub fn for_current(bridge: Arc<dyn MemoryBridge>) -> Result<Self> {
        Self::new(bridge, runtime::probe::current()?)
    }

    pub fn profile(&self) -> RuntimeProfile {
        self.profile
    }

    pub fn layout(&self) -> &DescriptorLayout {
        &self.layout
    }

    pub fn bridge(&self) -> &Arc<dyn MemoryBridge> {
        &self.bridge
    }

    fn field_address(&self, base: Address, field: FieldName) -> Result<Address> {
        let offset = self.layout.offset(field);
        Ok(base
            .checked_add(offset.byte_offset)
            .ok_or(MemoryError::InvalidAddress(base))?)
    }

    pub fn read_field(&self, base: Address, field: FieldName) -> Result<u64> {
        let addr = self.field_address(base, field)?;
        let value = codec::read_value(&*self.bridge, addr, self.layout.offset(field).width)?;
        trace!("read {} at {} = 0x{:x}", field, addr, value);
        Ok(value)
    }

    pub fn write_field(&self, base: Address, field: FieldName, value: u64) -> Result<()> {
        let addr = self.field_address(base, field)?;
        codec::write_value(&*self.bridge, addr, self.layout.offset(field).width, value)?;
        debug!("wrote {} at {} = 0x{:x}", field, addr, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatchError;
    use crate::memory::{BufferMemory, MemoryReader};
    use crate::runtime::{PointerWidth, RuntimeVersion};

    const BASE: u64 = 0x7100_0000;

    fn setup(version: RuntimeVersion, width: PointerWidth) -> (Arc<BufferMemory>, FieldAccessor) {
        let memory = Arc::new(BufferMemory::new(Address::new(BASE), 128));
        let accessor =
            FieldAccessor::new(memory.clone(), RuntimeProfile::new(version, width)).unwrap();
        (memory, accessor)
    }

    #[test]
    fn test_write_lands_at_layout_offset() {
        let (memory, accessor) = setup(RuntimeVersion::Oreo, PointerWidth::Bits64);
        accessor
            .write_field(Address::new(BASE), FieldName::EntryPoint, 0x0102_0304_0506_0708)
            .unwrap();
        assert_eq!(
            memory.read_bytes(Address::new(BASE + 40), 8).unwrap(),
            vec![0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_dword_field_on_32_bit() {
        let (memory, accessor) = setup(RuntimeVersion::Marshmallow, PointerWidth::Bits32);
        accessor
            .write_field(Address::new(BASE), FieldName::JniEntryPoint, 0x0102_0304)
            .unwrap();
        assert_eq!(
            memory.read_bytes(Address::new(BASE + 32), 4).unwrap(),
            vec![0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(
            accessor.read_field(Address::new(BASE), FieldName::JniEntryPoint).unwrap(),
            0x0102_0304
        );
    }

    #[test]
    fn test_wide_address_into_narrow_slot_overflows() {
        let (memory, accessor) = setup(RuntimeVersion::Nougat, PointerWidth::Bits32);
        accessor
            .write_field(Address::new(BASE), FieldName::EntryPoint, 0xcafe_f00d)
            .unwrap();

        let err = accessor
            .write_field(Address::new(BASE), FieldName::EntryPoint, 0x7f_cafe_f00d)
            .unwrap_err();
        assert!(matches!(err, PatchError::ValueOverflow { .. }));
        assert_eq!(
            accessor.read_field(Address::new(BASE), FieldName::EntryPoint).unwrap(),
            0xcafe_f00d
        );
        // the neighbouring field is untouched too
        assert_eq!(memory.read_bytes(Address::new(BASE + 36), 4).unwrap(), vec![0; 4]);
    }

    #[test]
    fn test_unsupported_profile() {
        let memory = Arc::new(BufferMemory::new(Address::new(BASE), 16));
        let result = FieldAccessor::new(
            memory,
            RuntimeProfile::new(RuntimeVersion::OreoMr1, PointerWidth::Bits64),
        );
        assert!(matches!(result, Err(PatchError::UnsupportedRuntime(_))));
    }

    #[test]
    fn test_bridge_failure_surfaces() {
        let (memory, accessor) = setup(RuntimeVersion::Oreo, PointerWidth::Bits64);
        memory.set_read_only(true);
        let err = accessor
            .write_field(Address::new(BASE), FieldName::AccessFlags, 1)
            .unwrap_err();
        assert!(matches!(
            err,
            PatchError::MemoryAccessFailure(MemoryError::PermissionDenied(..))
        ));
    }

    #[test]
    fn test_base_overflow() {
        let (_, accessor) = setup(RuntimeVersion::Oreo, PointerWidth::Bits64);
        let err = accessor
            .read_field(Address::new(u64::MAX - 8), FieldName::EntryPoint)
            .unwrap_err();
        assert!(matches!(
            err,
            PatchError::MemoryAccessFailure(MemoryError::InvalidAddress(_))
        ));
    }
}
