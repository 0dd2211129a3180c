// Thu Feb 05 2026 - Alex

pub mod accessor;
pub mod discovery;
pub mod field;
pub mod registry;

pub use accessor::FieldAccessor;
pub use discovery::LayoutProbe;
pub use field::{FieldName, FieldOffset};
pub use registry::{DescriptorLayout, EntrySlot, LayoutRegistry};
