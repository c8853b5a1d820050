// src/types.rs

use std::fmt;

use serde::Serialize;

/// Where a resolved environment value came from.
///
/// - `UserOverride`: a non-empty value supplied through the settings provider.
/// - `Default`: the computed default for the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrigin {
    UserOverride,
    Default,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueOrigin::UserOverride => f.write_str("user override"),
            ValueOrigin::Default => f.write_str("default"),
        }
    }
}

/// Platform bitness handed to runtime selection scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitness {
    X86,
    X64,
}

/// Site bitness value that selects the 64-bit toolchain.
pub const X64_SITE_BITNESS: &str = "AMD64";

impl Bitness {
    /// Bitness of the current process.
    pub fn of_current_process() -> Self {
        if cfg!(target_pointer_width = "64") {
            Bitness::X64
        } else {
            Bitness::X86
        }
    }

    /// Derive bitness from a configured site bitness.
    ///
    /// `AMD64` (any case) selects `X64`; every other value selects `X86`.
    /// Without a configured value we fall back to `process`.
    pub fn from_site_bitness(site_bitness: Option<&str>, process: Bitness) -> Self {
        match site_bitness {
            None => process,
            Some(value) if value.eq_ignore_ascii_case(X64_SITE_BITNESS) => Bitness::X64,
            Some(_) => Bitness::X86,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bitness::X86 => "x86",
            Bitness::X64 => "x64",
        }
    }
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
