// Wed Feb 11 2026 - Alex

//! One-shot hook installation at process start.

use crate::config::PatcherConfig;
use crate::error::{PatchError, Result};
use crate::hook::{HookId, HookManager, Patch};
use crate::layout::{FieldAccessor, LayoutProbe};
use crate::memory::MemoryBridge;
use crate::method::{AccessFlags, Executable, Member};
use crate::runtime;
use crate::utils::{LoggingUtils, ScopedTimer};
use log::{info, warn};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct HookRequest {
    pub target: Executable,
    pub patch: Patch,
}

impl HookRequest {
    pub fn new(target: impl Into<Executable>, patch: Patch) -> Self {
        Self {
            target: target.into(),
            patch,
        }
    }
}

#[derive(Debug)]
pub struct InstallFailure {
    /// Generic string of the target, e.g. `public java.lang.String a.B.c(int)`.
    pub target: String,
    pub error: PatchError,
}

#[derive(Debug, Default)]
pub struct InstallReport {
    pub installed: Vec<HookId>,
    pub failed: Vec<InstallFailure>,
}

impl InstallReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Installs every request, logging and recording failures instead of
/// returning early. A failed target keeps dispatching unmodified.
pub fn bootstrap(manager: &mut HookManager, requests: Vec<HookRequest>) -> InstallReport {
    let _timer = ScopedTimer::new("bootstrap");
    let mut report = InstallReport::default();

    for request in requests {
        let target = request.target.to_generic_string();
        match manager.install(request.target, &request.patch) {
            Ok(id) => report.installed.push(id),
            Err(error) => {
                warn!("failed to hook {}: {}", target, error);
                report.failed.push(InstallFailure { target, error });
            }
        }
    }

    info!(
        "bootstrap finished: {} installed, {} failed",
        report.installed.len(),
        report.failed.len()
    );
    report
}

/// Installs the logger at the configured level, detects the runtime, fixes it
/// as the process profile, optionally checks the registry layout against a
/// known descriptor, then installs `requests`.
///
/// Runtime and layout problems abort before anything is written.
pub fn start(
    config: &PatcherConfig,
    bridge: Arc<dyn MemoryBridge>,
    requests: Vec<HookRequest>,
) -> Result<(HookManager, InstallReport)> {
    config.validate()?;
    LoggingUtils::init_from_config(config);
    let profile = runtime::probe::detect(&config.query())?;
    let profile = runtime::probe::install(profile)?;
    let accessor = FieldAccessor::new(bridge.clone(), profile)?;

    if let Some(check) = &config.verify_layout {
        let descriptor = bridge.resolve_descriptor_address(check.reference)?;
        LayoutProbe::new(&*bridge, accessor.layout().entry_point.width).verify(
            accessor.layout(),
            descriptor,
            AccessFlags::REFERENCE_NATIVE,
            check.code_range(),
        )?;
    }

    let mut manager = HookManager::new(accessor);
    let report = bootstrap(&mut manager, requests);
    Ok((manager, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutCheck;
    use crate::hook::HookState;
    use crate::layout::FieldName;
    use crate::memory::{Address, BufferMemory, MemoryWriter};
    use crate::method::MethodInfo;
    use crate::runtime::{PointerWidth, RuntimeVersion};
    use crate::testing::{Fixture, HEAP_BASE};

    const HOOK_ENTRY: u64 = 0x7f00_0000_9000;

    #[test]
    fn test_bootstrap_continues_past_failures() {
        let mut fixture = Fixture::oreo64();
        let good = fixture.method("returnString", 0x7f00_0000_1000, 0, AccessFlags::PUBLIC);
        let null: Executable =
            MethodInfo::new(0, "com.example.MainActivity", "gone", "void").into();
        let other = fixture.method("returnString2", 0x7f00_0000_3000, 0, AccessFlags::PUBLIC);
        let mut manager = HookManager::new(fixture.accessor.clone());

        let report = bootstrap(
            &mut manager,
            vec![
                HookRequest::new(good.clone(), Patch::entry_point(HOOK_ENTRY)),
                HookRequest::new(null, Patch::entry_point(HOOK_ENTRY)),
                HookRequest::new(other.clone(), Patch::entry_point(HOOK_ENTRY + 0x100)),
            ],
        );

        assert_eq!(report.installed.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(!report.is_complete());
        assert!(report.failed[0].target.contains("gone"));
        assert!(matches!(report.failed[0].error, PatchError::InvalidReference(_)));
        assert_eq!(fixture.read(&good, FieldName::EntryPoint), HOOK_ENTRY);
        assert_eq!(fixture.read(&other, FieldName::EntryPoint), HOOK_ENTRY + 0x100);
        for id in report.installed {
            assert_eq!(manager.state(id), HookState::Patched);
        }
    }

    #[test]
    fn test_overflow_target_left_unmodified() {
        let mut fixture = Fixture::new(RuntimeVersion::Oreo, PointerWidth::Bits32);
        let target = fixture.method("run", 0x7000_1000, 0x7000_2000, AccessFlags::PUBLIC);
        let mut manager = HookManager::new(fixture.accessor.clone());

        let patch = Patch::entry_point(0x7000_9000).with_jni_entry_point(0x7f00_0000_0000);
        let report = bootstrap(&mut manager, vec![HookRequest::new(target.clone(), patch)]);
        assert!(report.installed.is_empty());
        assert!(matches!(report.failed[0].error, PatchError::ValueOverflow { .. }));
        assert_eq!(fixture.read(&target, FieldName::EntryPoint), 0x7000_1000);
        assert_eq!(fixture.read(&target, FieldName::JniEntryPoint), 0x7000_2000);
    }

    fn oreo64_config() -> PatcherConfig {
        PatcherConfig::new()
            .with_api_level(26)
            .with_pointer_width(PointerWidth::Bits64)
            .with_vm_version("2.1.0")
    }

    #[test]
    fn test_start_rejects_dalvik_before_writing() {
        let memory = Arc::new(BufferMemory::new(Address::new(HEAP_BASE), 0x100));
        let config = oreo64_config().with_vm_version("1.6.0");
        let result = start(&config, memory, Vec::new());
        assert!(matches!(result, Err(PatchError::UnsupportedRuntime(_))));
    }

    #[test]
    fn test_start_with_layout_check() {
        let mut fixture = Fixture::oreo64();
        let target = fixture.method("returnString", 0x7f00_0000_1000, 0, AccessFlags::PUBLIC);

        // setArgV0-style anchor: reference-native flags and a JNI entry inside libart.
        let anchor = Address::new(HEAP_BASE + 0x800);
        fixture
            .memory
            .write_bytes(anchor.checked_add(4).unwrap(), &0x119u32.to_le_bytes())
            .unwrap();
        fixture
            .memory
            .write_bytes(anchor.checked_add(32).unwrap(), &0x7400_4e10u64.to_le_bytes())
            .unwrap();
        fixture.memory.register_descriptor(0xa11c, anchor);

        let config = oreo64_config().with_layout_check(LayoutCheck {
            reference: 0xa11c,
            code_start: 0x7400_0000,
            code_end: 0x7410_0000,
        });
        let (manager, report) = start(
            &config,
            fixture.memory.clone(),
            vec![HookRequest::new(target.clone(), Patch::entry_point(HOOK_ENTRY))],
        )
        .unwrap();

        assert!(report.is_complete());
        assert_eq!(log::max_level(), log::LevelFilter::Info);
        assert_eq!(manager.accessor().profile(), fixture.accessor.profile());
        assert_eq!(fixture.read(&target, FieldName::EntryPoint), HOOK_ENTRY);
    }

    #[test]
    fn test_start_layout_mismatch_is_fatal() {
        let mut fixture = Fixture::oreo64();
        let target = fixture.method("returnString", 0x7f00_0000_1000, 0, AccessFlags::PUBLIC);

        // Flags at +12 is the Marshmallow shape, not Oreo.
        let anchor = Address::new(HEAP_BASE + 0x800);
        fixture
            .memory
            .write_bytes(anchor.checked_add(12).unwrap(), &0x119u32.to_le_bytes())
            .unwrap();
        fixture
            .memory
            .write_bytes(anchor.checked_add(32).unwrap(), &0x7400_4e10u64.to_le_bytes())
            .unwrap();
        fixture.memory.register_descriptor(0xa11c, anchor);

        let config = oreo64_config().with_layout_check(LayoutCheck {
            reference: 0xa11c,
            code_start: 0x7400_0000,
            code_end: 0x7410_0000,
        });
        let err = start(
            &config,
            fixture.memory.clone(),
            vec![HookRequest::new(target.clone(), Patch::entry_point(HOOK_ENTRY))],
        )
        .unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(fixture.read(&target, FieldName::EntryPoint), 0x7f00_0000_1000);
    }
}
