// Mon Feb 09 2026 - Alex

pub mod bootstrap;
pub mod manager;
pub mod patch;

pub use bootstrap::{bootstrap, start, HookRequest, InstallFailure, InstallReport};
pub use manager::{HookId, HookManager, HookState, OriginalInvoker};
pub use patch::{FlagEdit, Patch};
