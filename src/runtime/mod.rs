// Wed Feb 04 2026 - Alex

pub mod probe;
pub mod profile;

pub use probe::{detect, RuntimeQuery, StaticQuery, SystemQuery};
pub use profile::{PointerWidth, RuntimeProfile, RuntimeVersion};
