// Mon Feb 09 2026 - Alex

use crate::error::{PatchError, Result};
use crate::hook::Patch;
use crate::layout::FieldAccessor;
use crate::memory::{Address, MemoryBridge};
use crate::method::{Executable, Member, MethodHandle};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HookState {
    Unhooked,
    BackedUp,
    Patched,
    Restored,
}

impl fmt::Display for HookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unhooked => "unhooked",
            Self::BackedUp => "backed up",
            Self::Patched => "patched",
            Self::Restored => "restored",
        };
        write!(f, "{}", name)
    }
}

/// Hooks are keyed by descriptor address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(Address);

impl HookId {
    pub fn address(&self) -> Address {
        self.0
    }
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_u64())
    }
}

/// Calls a method body through the runtime's calling convention.
///
/// The manager only decides *what* to call: the backup handle, whose saved
/// fields are the original dispatch target. Building the call frame is up to
/// the implementor.
pub trait OriginalInvoker {
    fn invoke(&self, original: &MethodHandle, receiver: u64, args: &[u64]) -> Result<u64>;
}

#[derive(Debug)]
struct HookEntry {
    live: MethodHandle,
    backup: MethodHandle,
    state: HookState,
}

/// Drives the backup, patch and restore sequence for each hooked method.
///
/// No locking: installs are expected from a single thread early in process
/// start-up.
pub struct HookManager {
    accessor: FieldAccessor,
    hooks: HashMap<HookId, HookEntry>,
}

impl HookManager {
    pub fn new(accessor: FieldAccessor) -> Self {
        Self {
            accessor,
            hooks: HashMap::new(),
        }
    }

    pub fn for_current(bridge: Arc<dyn MemoryBridge>) -> Result<Self> {
        Ok(Self::new(FieldAccessor::for_current(bridge)?))
    }

    pub fn accessor(&self) -> &FieldAccessor {
        &self.accessor
    }

    pub fn state(&self, id: HookId) -> HookState {
        self.hooks
            .get(&id)
            .map(|entry| entry.state)
            .unwrap_or(HookState::Unhooked)
    }

    /// Every tracked hook and its state, ordered by descriptor address.
    pub fn hooks(&self) -> Vec<(HookId, HookState)> {
        let mut hooks: Vec<_> = self.hooks.iter().map(|(id, entry)| (*id, entry.state)).collect();
        hooks.sort();
        hooks
    }

    fn entry(&self, id: HookId) -> Result<&HookEntry> {
        self.hooks
            .get(&id)
            .ok_or_else(|| PatchError::UnknownHook(id.to_string()))
    }

    fn entry_mut(&mut self, id: HookId) -> Result<&mut HookEntry> {
        self.hooks
            .get_mut(&id)
            .ok_or_else(|| PatchError::UnknownHook(id.to_string()))
    }

    fn wrong_state(id: HookId, state: HookState, operation: &'static str) -> PatchError {
        PatchError::HookState {
            id: id.to_string(),
            state: state.to_string(),
            operation,
        }
    }

    /// Resolves `target` and snapshots its descriptor. A restored hook can be
    /// backed up again.
    pub fn back_up(&mut self, target: Executable) -> Result<HookId> {
        let live = MethodHandle::of(target, self.accessor.clone())?;
        let id = HookId(live.address());
        let state = self.state(id);
        if matches!(state, HookState::BackedUp | HookState::Patched) {
            return Err(Self::wrong_state(id, state, "back up"));
        }

        let backup = live.backup()?;
        info!("{} {}: {} -> {}", live.target().name(), id, state, HookState::BackedUp);
        self.hooks.insert(
            id,
            HookEntry {
                live,
                backup,
                state: HookState::BackedUp,
            },
        );
        Ok(id)
    }

    /// Writes `patch` into the live descriptor. A failed write leaves the
    /// hook `BackedUp`, possibly with some fields already changed; `restore`
    /// puts them back.
    pub fn patch(&mut self, id: HookId, patch: &Patch) -> Result<()> {
        let entry = self.entry_mut(id)?;
        if entry.state != HookState::BackedUp {
            return Err(Self::wrong_state(id, entry.state, "patch"));
        }

        patch.apply(&mut entry.live)?;
        entry.state = HookState::Patched;
        info!(
            "{} {}: {} -> {} (entry 0x{:x})",
            entry.live.target().name(),
            id,
            HookState::BackedUp,
            HookState::Patched,
            patch.target_entry_point()
        );
        Ok(())
    }

    /// Backs up and patches in one step, rolling back if the patch fails.
    pub fn install(&mut self, target: Executable, patch: &Patch) -> Result<HookId> {
        let id = self.back_up(target)?;
        if let Err(e) = self.patch(id, patch) {
            warn!("patching hook {} failed: {}", id, e);
            if let Err(rollback) = self.restore(id) {
                warn!("rolling back hook {} failed: {}", id, rollback);
            }
            return Err(e);
        }
        Ok(id)
    }

    /// The backup handle holding the pre-patch field values.
    pub fn original(&self, id: HookId) -> Result<&MethodHandle> {
        Ok(&self.entry(id)?.backup)
    }

    pub fn live(&self, id: HookId) -> Result<&MethodHandle> {
        Ok(&self.entry(id)?.live)
    }

    pub fn call_original(
        &self,
        id: HookId,
        invoker: &dyn OriginalInvoker,
        receiver: u64,
        args: &[u64],
    ) -> Result<u64> {
        let entry = self.entry(id)?;
        if entry.state != HookState::Patched {
            return Err(Self::wrong_state(id, entry.state, "call original of"));
        }
        invoker.invoke(&entry.backup, receiver, args)
    }

    /// Writes the backed-up fields back into the live descriptor.
    pub fn restore(&mut self, id: HookId) -> Result<()> {
        let entry = self.entry_mut(id)?;
        let from = entry.state;
        if !matches!(from, HookState::BackedUp | HookState::Patched) {
            return Err(Self::wrong_state(id, from, "restore"));
        }

        entry.live.restore_from(&entry.backup)?;
        entry.state = HookState::Restored;
        info!("{} {}: {} -> {}", entry.live.target().name(), id, from, HookState::Restored);
        Ok(())
    }
}

impl fmt::Debug for HookManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookManager")
            .field("profile", &self.accessor.profile())
            .field("hooks", &self.hooks())
            .finish()
    }
}
