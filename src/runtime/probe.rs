// Wed Feb 04 2026 - Alex

use crate::error::{PatchError, Result};
use crate::runtime::{PointerWidth, RuntimeProfile, RuntimeVersion};
use log::info;
use once_cell::sync::OnceCell;

/// Facts about the hosting runtime, as the runtime itself reports them.
pub trait RuntimeQuery {
    fn is_64bit(&self) -> Result<bool>;
    fn api_level(&self) -> Result<u32>;
    /// The `java.vm.version` string; ART reports `2.x`, Dalvik `1.x`.
    fn vm_version(&self) -> Result<String>;
}

/// Queries the process this library is loaded into.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemQuery;

#[cfg(target_os = "android")]
const PROP_VALUE_MAX: usize = 92;

#[cfg(target_os = "android")]
fn system_property(name: &str) -> Option<String> {
    let name = std::ffi::CString::new(name).ok()?;
    let mut value = [0 as libc::c_char; PROP_VALUE_MAX];
    let len = unsafe { libc::__system_property_get(name.as_ptr(), value.as_mut_ptr()) };
    if len <= 0 {
        return None;
    }
    let bytes: Vec<u8> = value[..len as usize].iter().map(|&c| c as u8).collect();
    String::from_utf8(bytes).ok()
}

impl RuntimeQuery for SystemQuery {
    fn is_64bit(&self) -> Result<bool> {
        Ok(cfg!(target_pointer_width = "64"))
    }

    #[cfg(target_os = "android")]
    fn api_level(&self) -> Result<u32> {
        let raw = system_property("ro.build.version.sdk").ok_or_else(|| {
            PatchError::UnsupportedRuntime("ro.build.version.sdk is not set".to_string())
        })?;
        raw.trim().parse().map_err(|_| {
            PatchError::UnsupportedRuntime(format!("unparseable API level '{}'", raw))
        })
    }

    #[cfg(not(target_os = "android"))]
    fn api_level(&self) -> Result<u32> {
        Err(PatchError::UnsupportedRuntime(
            "platform API level is only available on Android".to_string(),
        ))
    }

    /// Derived, not queried: no property carries `java.vm.version`, so the
    /// value is inferred from the API level and, on KitKat, from the
    /// selected VM library.
    #[cfg(target_os = "android")]
    fn vm_version(&self) -> Result<String> {
        // ART is the only runtime from Lollipop on; KitKat could run either.
        if self.api_level()? >= 21 {
            return Ok("2.1.0".to_string());
        }
        let lib = system_property("persist.sys.dalvik.vm.lib").unwrap_or_default();
        log::debug!("persist.sys.dalvik.vm.lib = '{}'", lib);
        if lib.contains("libart") {
            Ok("2.0.0".to_string())
        } else {
            Ok("1.6.0".to_string())
        }
    }

    #[cfg(not(target_os = "android"))]
    fn vm_version(&self) -> Result<String> {
        Err(PatchError::UnsupportedRuntime(
            "no managed runtime in this process".to_string(),
        ))
    }
}

/// Fixed answers, for tooling and tests.
#[derive(Debug, Clone)]
pub struct StaticQuery {
    pub is_64bit: bool,
    pub api_level: u32,
    pub vm_version: String,
}

impl StaticQuery {
    pub fn art(api_level: u32, pointer_width: PointerWidth) -> Self {
        Self {
            is_64bit: pointer_width == PointerWidth::Bits64,
            api_level,
            vm_version: "2.1.0".to_string(),
        }
    }
}

impl RuntimeQuery for StaticQuery {
    fn is_64bit(&self) -> Result<bool> {
        Ok(self.is_64bit)
    }

    fn api_level(&self) -> Result<u32> {
        Ok(self.api_level)
    }

    fn vm_version(&self) -> Result<String> {
        Ok(self.vm_version.clone())
    }
}

pub fn detect(query: &dyn RuntimeQuery) -> Result<RuntimeProfile> {
    let vm_version = query.vm_version()?;
    if !vm_version.starts_with('2') {
        return Err(PatchError::UnsupportedRuntime(format!(
            "VM version {} is not ART",
            vm_version
        )));
    }

    let api_level = query.api_level()?;
    let version = RuntimeVersion::from_api_level(api_level).ok_or_else(|| {
        PatchError::UnsupportedRuntime(format!(
            "API level {} is not a known ART generation",
            api_level
        ))
    })?;

    let pointer_width = if query.is_64bit()? {
        PointerWidth::Bits64
    } else {
        PointerWidth::Bits32
    };

    let profile = RuntimeProfile::new(version, pointer_width);
    info!("detected runtime {} (vm {})", profile, vm_version);
    Ok(profile)
}

static PROFILE: OnceCell<RuntimeProfile> = OnceCell::new();

/// The process-wide profile, detected from [`SystemQuery`] on first use.
pub fn current() -> Result<RuntimeProfile> {
    PROFILE.get_or_try_init(|| detect(&SystemQuery)).copied()
}

/// Fixes the process-wide profile before anything detects it.
///
/// Installing the profile that is already active is a no-op; installing a
/// different one is refused.
pub fn install(profile: RuntimeProfile) -> Result<RuntimeProfile> {
    let active = *PROFILE.get_or_init(|| profile);
    if active != profile {
        return Err(PatchError::Config(format!(
            "runtime profile already set to {}",
            active
        )));
    }
    Ok(active)
}

pub fn installed() -> Option<RuntimeProfile> {
    PROFILE.get().copied()
}
