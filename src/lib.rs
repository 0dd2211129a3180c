// Tue Feb 10 2026 - Alex

pub mod config;
pub mod error;
pub mod hook;
pub mod layout;
pub mod memory;
pub mod method;
pub mod runtime;
pub mod utils;

#[cfg(test)]
mod testing;

pub use config::PatcherConfig;
pub use error::{PatchError, Result};
pub use hook::{bootstrap, HookManager, HookRequest, InstallReport, Patch};
pub use layout::{FieldAccessor, LayoutRegistry};
pub use memory::{Address, MemoryBridge};
pub use method::{Executable, MethodHandle};
pub use runtime::{RuntimeProfile, RuntimeVersion, PointerWidth};
