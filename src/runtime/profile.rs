// Wed Feb 04 2026 - Alex

use crate::memory::FieldWidth;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PointerWidth {
    Bits32,
    Bits64,
}

impl PointerWidth {
    pub const ALL: [PointerWidth; 2] = [PointerWidth::Bits32, PointerWidth::Bits64];

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            32 => Some(Self::Bits32),
            64 => Some(Self::Bits64),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    pub fn field_width(self) -> FieldWidth {
        match self {
            Self::Bits32 => FieldWidth::Dword,
            Self::Bits64 => FieldWidth::Qword,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Bits32 => 0,
            Self::Bits64 => 1,
        }
    }
}

impl fmt::Display for PointerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// ART generations, one per platform API level that changed (or might have
/// changed) the method descriptor layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RuntimeVersion {
    KitKat,
    Lollipop,
    LollipopMr1,
    Marshmallow,
    Nougat,
    NougatMr1,
    Oreo,
    OreoMr1,
}

impl RuntimeVersion {
    pub const ALL: [RuntimeVersion; 8] = [
        RuntimeVersion::KitKat,
        RuntimeVersion::Lollipop,
        RuntimeVersion::LollipopMr1,
        RuntimeVersion::Marshmallow,
        RuntimeVersion::Nougat,
        RuntimeVersion::NougatMr1,
        RuntimeVersion::Oreo,
        RuntimeVersion::OreoMr1,
    ];

    pub fn from_api_level(api_level: u32) -> Option<Self> {
        match api_level {
            19 => Some(Self::KitKat),
            21 => Some(Self::Lollipop),
            22 => Some(Self::LollipopMr1),
            23 => Some(Self::Marshmallow),
            24 => Some(Self::Nougat),
            25 => Some(Self::NougatMr1),
            26 => Some(Self::Oreo),
            27 => Some(Self::OreoMr1),
            _ => None,
        }
    }

    pub fn api_level(self) -> u32 {
        match self {
            Self::KitKat => 19,
            Self::Lollipop => 21,
            Self::LollipopMr1 => 22,
            Self::Marshmallow => 23,
            Self::Nougat => 24,
            Self::NougatMr1 => 25,
            Self::Oreo => 26,
            Self::OreoMr1 => 27,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::KitKat => "KitKat",
            Self::Lollipop => "Lollipop",
            Self::LollipopMr1 => "Lollipop MR1",
            Self::Marshmallow => "Marshmallow",
            Self::Nougat => "Nougat",
            Self::NougatMr1 => "Nougat MR1",
            Self::Oreo => "Oreo",
            Self::OreoMr1 => "Oreo MR1",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (API {})", self.name(), self.api_level())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RuntimeProfile {
    pub version: RuntimeVersion,
    pub pointer_width: PointerWidth,
}

impl RuntimeProfile {
    pub fn new(version: RuntimeVersion, pointer_width: PointerWidth) -> Self {
        Self { version, pointer_width }
    }
}

impl fmt::Display for RuntimeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.version, self.pointer_width)
    }
}
