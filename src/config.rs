// Tue Feb 10 2026 - Alex

use crate::error::{PatchError, Result};
use crate::memory::{Address, MemoryRange};
use crate::runtime::{PointerWidth, RuntimeQuery, SystemQuery};
use crate::utils::logging::LoggingUtils;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A known method whose descriptor is scanned to confirm the registry layout
/// before any hook is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCheck {
    /// Reference handed to the bridge's descriptor resolver.
    pub reference: u64,
    pub code_start: u64,
    pub code_end: u64,
}

impl LayoutCheck {
    pub fn code_range(&self) -> MemoryRange {
        MemoryRange::new(Address::new(self.code_start), Address::new(self.code_end))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatcherConfig {
    pub api_level: Option<u32>,
    /// 32 or 64.
    pub pointer_width: Option<u32>,
    pub vm_version: Option<String>,
    pub log_level: String,
    pub verify_layout: Option<LayoutCheck>,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            api_level: None,
            pointer_width: None,
            vm_version: None,
            log_level: "info".to_string(),
            verify_layout: None,
        }
    }
}

impl PatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_level(mut self, api_level: u32) -> Self {
        self.api_level = Some(api_level);
        self
    }

    pub fn with_pointer_width(mut self, pointer_width: PointerWidth) -> Self {
        self.pointer_width = Some(pointer_width.bits());
        self
    }

    pub fn with_vm_version(mut self, vm_version: &str) -> Self {
        self.vm_version = Some(vm_version.to_string());
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    pub fn with_layout_check(mut self, check: LayoutCheck) -> Self {
        self.verify_layout = Some(check);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(bits) = self.pointer_width {
            if PointerWidth::from_bits(bits).is_none() {
                return Err(PatchError::Config(format!(
                    "pointer_width must be 32 or 64, got {}",
                    bits
                )));
            }
        }
        if self.api_level == Some(0) {
            return Err(PatchError::Config("api_level must be greater than 0".to_string()));
        }
        if LoggingUtils::parse_level(&self.log_level).is_none() {
            return Err(PatchError::Config(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        if let Some(check) = &self.verify_layout {
            if check.reference == 0 {
                return Err(PatchError::Config(
                    "verify_layout.reference must be non-zero".to_string(),
                ));
            }
            if check.code_start >= check.code_end {
                return Err(PatchError::Config(
                    "verify_layout.code_start must be below code_end".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn query(&self) -> ConfiguredQuery {
        ConfiguredQuery {
            config: self.clone(),
            system: SystemQuery,
        }
    }
}

/// Answers from the config where it has one, from the system otherwise.
#[derive(Debug, Clone)]
pub struct ConfiguredQuery {
    config: PatcherConfig,
    system: SystemQuery,
}

impl RuntimeQuery for ConfiguredQuery {
    fn is_64bit(&self) -> Result<bool> {
        match self.config.pointer_width {
            Some(bits) => Ok(bits == 64),
            None => self.system.is_64bit(),
        }
    }

    fn api_level(&self) -> Result<u32> {
        match self.config.api_level {
            Some(level) => Ok(level),
            None => self.system.api_level(),
        }
    }

    fn vm_version(&self) -> Result<String> {
        match &self.config.vm_version {
            Some(version) => Ok(version.clone()),
            None => self.system.vm_version(),
        }
    }
}
