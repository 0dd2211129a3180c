// Sat Feb 07 2026 - Alex

//! Fake runtime memory shared by the unit tests.

use crate::layout::{FieldAccessor, FieldName};
use crate::memory::{Address, BufferMemory};
use crate::method::{AccessFlags, Executable, MethodInfo};
use crate::runtime::{PointerWidth, RuntimeProfile, RuntimeVersion};
use std::sync::Arc;

pub const HEAP_BASE: u64 = 0x7000_0000;
pub const DESCRIPTOR_STRIDE: u64 = 0x40;

pub struct Fixture {
    pub memory: Arc<BufferMemory>,
    pub accessor: FieldAccessor,
    next_slot: u64,
}

impl Fixture {
    pub fn new(version: RuntimeVersion, pointer_width: PointerWidth) -> Self {
        let memory = Arc::new(BufferMemory::new(Address::new(HEAP_BASE), 0x1000));
        let profile = RuntimeProfile::new(version, pointer_width);
        let accessor = FieldAccessor::new(memory.clone(), profile)
            .expect("supported profile");
        Self {
            memory,
            accessor,
            next_slot: 0,
        }
    }

    pub fn oreo64() -> Self {
        Self::new(RuntimeVersion::Oreo, PointerWidth::Bits64)
    }

    /// Lays out a descriptor in fake memory and returns a method that resolves to it.
    pub fn method(
        &mut self,
        name: &str,
        entry_point: u64,
        jni_entry_point: u64,
        flags: AccessFlags,
    ) -> Executable {
        let base = Address::new(HEAP_BASE + self.next_slot * DESCRIPTOR_STRIDE);
        self.next_slot += 1;
        let raw = 0x1_0000 + self.next_slot;

        self.accessor.write_field(base, FieldName::EntryPoint, entry_point).unwrap();
        self.accessor.write_field(base, FieldName::JniEntryPoint, jni_entry_point).unwrap();
        self.accessor.write_field(base, FieldName::AccessFlags, flags.bits() as u64).unwrap();
        self.memory.register_descriptor(raw, base);

        MethodInfo::new(raw, "com.example.MainActivity", name, "java.lang.String")
            .with_modifiers(flags)
            .into()
    }

    pub fn read(&self, target: &Executable, field: FieldName) -> u64 {
        use crate::memory::DescriptorResolver;
        use crate::method::Member;
        let base = self.memory.resolve_descriptor_address(target.raw()).unwrap();
        self.accessor.read_field(base, field).unwrap()
    }
}
