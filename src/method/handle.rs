// Sat Feb 07 2026 - Alex

use crate::error::{PatchError, Result};
use crate::layout::{FieldAccessor, FieldName};
use crate::memory::{codec, Address, MemoryBridge, MemoryError};
use crate::method::{AccessFlags, Executable, Member};
use log::debug;
use std::fmt;
use std::sync::Arc;

/// Field values captured from a descriptor at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedFields {
    pub entry_point: u64,
    pub jni_entry_point: u64,
    pub access_flags: AccessFlags,
}

impl SavedFields {
    fn get(&self, field: FieldName) -> u64 {
        match field {
            FieldName::EntryPoint => self.entry_point,
            FieldName::JniEntryPoint => self.jni_entry_point,
            FieldName::AccessFlags => self.access_flags.bits() as u64,
        }
    }

    fn set(&mut self, field: FieldName, value: u64) {
        match field {
            FieldName::EntryPoint => self.entry_point = value,
            FieldName::JniEntryPoint => self.jni_entry_point = value,
            FieldName::AccessFlags => self.access_flags = AccessFlags::from_raw(value),
        }
    }
}

/// A method or constructor together with the address of its runtime descriptor.
///
/// The address is resolved once and assumed stable for the handle's life.
/// Nothing re-resolves it if the runtime ever moves the descriptor, so hooks
/// belong early in process start-up.
///
/// A backup handle (see [`MethodHandle::backup`]) points at the same
/// descriptor but answers from the values it captured; writing to a backup
/// only changes that copy.
#[derive(Clone)]
pub struct MethodHandle {
    target: Executable,
    base: Address,
    accessor: FieldAccessor,
    origin: Option<Arc<MethodHandle>>,
    saved: Option<SavedFields>,
}

impl MethodHandle {
    pub fn of(target: Executable, accessor: FieldAccessor) -> Result<Self> {
        if target.is_null() {
            return Err(PatchError::InvalidReference(format!(
                "{} {} is null",
                if target.is_constructor() { "constructor" } else { "method" },
                target.name()
            )));
        }

        let base = match accessor.bridge().resolve_descriptor_address(target.raw()) {
            Ok(addr) if !addr.is_null() => addr,
            Ok(_) => {
                return Err(PatchError::InvalidReference(format!(
                    "{} resolved to a null descriptor",
                    target
                )))
            }
            Err(MemoryError::UnresolvedReference(raw)) => {
                return Err(PatchError::InvalidReference(format!(
                    "0x{:x} ({}) is not a reflective method",
                    raw, target
                )))
            }
            Err(e) => return Err(e.into()),
        };

        debug!("resolved {} to descriptor {}", target, base);
        Ok(Self {
            target,
            base,
            accessor,
            origin: None,
            saved: None,
        })
    }

    /// Resolves against the process-wide runtime profile.
    pub fn of_current(target: Executable, bridge: Arc<dyn MemoryBridge>) -> Result<Self> {
        Self::of(target, FieldAccessor::for_current(bridge)?)
    }

    pub fn target(&self) -> &Executable {
        &self.target
    }

    pub fn address(&self) -> Address {
        self.base
    }

    /// Diagnostic key only: a descriptor's storage can in principle be reused.
    pub fn identifier(&self) -> String {
        self.base.as_u64().to_string()
    }

    pub fn origin(&self) -> Option<&MethodHandle> {
        self.origin.as_deref()
    }

    pub fn is_backup(&self) -> bool {
        self.saved.is_some()
    }

    pub fn saved_fields(&self) -> Option<SavedFields> {
        self.saved
    }

    pub fn accessor(&self) -> &FieldAccessor {
        &self.accessor
    }

    fn read(&self, field: FieldName) -> Result<u64> {
        match &self.saved {
            Some(saved) => Ok(saved.get(field)),
            None => self.accessor.read_field(self.base, field),
        }
    }

    fn write(&mut self, field: FieldName, value: u64) -> Result<()> {
        match &mut self.saved {
            Some(saved) => {
                codec::check_fits(value, self.accessor.layout().offset(field).width)?;
                saved.set(field, value);
                Ok(())
            }
            None => self.accessor.write_field(self.base, field, value),
        }
    }

    pub fn entry_point(&self) -> Result<u64> {
        self.read(FieldName::EntryPoint)
    }

    pub fn set_entry_point(&mut self, addr: u64) -> Result<()> {
        self.write(FieldName::EntryPoint, addr)
    }

    pub fn jni_entry_point(&self) -> Result<u64> {
        self.read(FieldName::JniEntryPoint)
    }

    pub fn set_jni_entry_point(&mut self, addr: u64) -> Result<()> {
        self.write(FieldName::JniEntryPoint, addr)
    }

    pub fn access_flags(&self) -> Result<AccessFlags> {
        Ok(AccessFlags::from_raw(self.read(FieldName::AccessFlags)?))
    }

    pub fn set_access_flags(&mut self, flags: AccessFlags) -> Result<()> {
        self.write(FieldName::AccessFlags, flags.bits() as u64)
    }

    /// Read-modify-write; not atomic against other writers.
    pub fn make_private(&mut self) -> Result<()> {
        let flags = self.access_flags()?;
        self.set_access_flags(flags.privatized())
    }

    /// Current values of all three fields.
    pub fn fields(&self) -> Result<SavedFields> {
        Ok(SavedFields {
            entry_point: self.entry_point()?,
            jni_entry_point: self.jni_entry_point()?,
            access_flags: self.access_flags()?,
        })
    }

    /// Captures the descriptor's current field values into a new handle over
    /// the same address. Take it before patching anything.
    pub fn backup(&self) -> Result<MethodHandle> {
        let saved = self.fields()?;
        debug!(
            "backed up {} at {}: entry 0x{:x}, jni 0x{:x}, flags {:?}",
            self.target.name(),
            self.base,
            saved.entry_point,
            saved.jni_entry_point,
            saved.access_flags
        );
        Ok(Self {
            target: self.target.clone(),
            base: self.base,
            accessor: self.accessor.clone(),
            origin: Some(Arc::new(self.clone())),
            saved: Some(saved),
        })
    }

    /// Writes a backup's captured values back into this descriptor, dispatch
    /// entry first.
    pub fn restore_from(&mut self, backup: &MethodHandle) -> Result<()> {
        let saved = backup.saved.ok_or_else(|| {
            PatchError::InvalidReference(format!("handle {} is not a backup", backup.identifier()))
        })?;
        if backup.base != self.base {
            return Err(PatchError::BackupMismatch {
                live: self.base,
                backup: backup.base,
            });
        }

        self.write(FieldName::EntryPoint, saved.entry_point)?;
        self.write(FieldName::JniEntryPoint, saved.jni_entry_point)?;
        self.write(FieldName::AccessFlags, saved.access_flags.bits() as u64)?;
        Ok(())
    }
}

impl fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodHandle")
            .field("target", &self.target.to_generic_string())
            .field("base", &self.base)
            .field("profile", &self.accessor.profile())
            .field("saved", &self.saved)
            .field("has_origin", &self.origin.is_some())
            .finish()
    }
}
