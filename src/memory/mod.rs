// Mon Feb 02 2026 - Alex

pub mod address;
pub mod buffer;
pub mod codec;
pub mod error;
pub mod local;
pub mod range;
pub mod traits;

pub use address::Address;
pub use buffer::BufferMemory;
pub use codec::FieldWidth;
pub use error::MemoryError;
pub use local::LocalMemory;
pub use range::MemoryRange;
pub use traits::{DescriptorResolver, MemoryBridge, MemoryReader, MemoryWriter};
