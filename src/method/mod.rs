// Fri Feb 06 2026 - Alex

pub mod executable;
pub mod flags;
pub mod handle;

pub use executable::{ConstructorInfo, Executable, Member, MethodInfo};
pub use flags::AccessFlags;
pub use handle::{MethodHandle, SavedFields};
