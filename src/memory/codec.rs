// Tue Feb 03 2026 - Alex

//! Byte-order and width rules for descriptor fields.
//!
//! Every field is little-endian. A DWORD field holds an unsigned 32-bit value,
//! a QWORD field a 64-bit value. Encoding a value wider than its field is an
//! error: truncating would silently clobber the neighbouring field.

use crate::error::{PatchError, Result};
use crate::memory::{Address, MemoryError, MemoryReader, MemoryWriter};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldWidth {
    Dword,
    Qword,
}

impl FieldWidth {
    pub fn bytes(self) -> usize {
        match self {
            Self::Dword => 4,
            Self::Qword => 8,
        }
    }

    pub fn max_value(self) -> u64 {
        match self {
            Self::Dword => u32::MAX as u64,
            Self::Qword => u64::MAX,
        }
    }

    pub fn fits(self, value: u64) -> bool {
        value <= self.max_value()
    }
}

impl fmt::Display for FieldWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dword => write!(f, "DWORD"),
            Self::Qword => write!(f, "QWORD"),
        }
    }
}

pub fn check_fits(value: u64, width: FieldWidth) -> Result<()> {
    if width.fits(value) {
        Ok(())
    } else {
        Err(PatchError::ValueOverflow { value, width })
    }
}

pub fn encode_le(value: u64, width: FieldWidth) -> Result<Vec<u8>> {
    check_fits(value, width)?;
    Ok(match width {
        FieldWidth::Dword => (value as u32).to_le_bytes().to_vec(),
        FieldWidth::Qword => value.to_le_bytes().to_vec(),
    })
}

pub fn decode_le(addr: Address, bytes: &[u8], width: FieldWidth) -> Result<u64> {
    if bytes.len() != width.bytes() {
        return Err(MemoryError::ShortRead {
            addr,
            expected: width.bytes(),
            actual: bytes.len(),
        }
        .into());
    }

    Ok(match width {
        FieldWidth::Dword => {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(bytes);
            u32::from_le_bytes(raw) as u64
        }
        FieldWidth::Qword => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            u64::from_le_bytes(raw)
        }
    })
}

pub fn read_value<R>(reader: &R, addr: Address, width: FieldWidth) -> Result<u64>
where
    R: MemoryReader + ?Sized,
{
    let bytes = reader.read_bytes(addr, width.bytes())?;
    decode_le(addr, &bytes, width)
}

/// Encodes first, so an overflowing value never reaches the writer.
pub fn write_value<W>(writer: &W, addr: Address, width: FieldWidth, value: u64) -> Result<()>
where
    W: MemoryWriter + ?Sized,
{
    let bytes = encode_le(value, width)?;
    writer.write_bytes(addr, &bytes)?;
    Ok(())
}
