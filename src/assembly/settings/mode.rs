//! Tar long file name handling.

use std::fmt;
use std::str::FromStr;

/// How tar archives treat entry names longer than the 100 byte ustar limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TarLongFileMode {
    /// Write GNU long name extension records.
    #[default]
    Gnu,
    /// Write GNU records but log a warning for every long name.
    Warn,
    /// Refuse to write long names.
    Fail,
}

impl TarLongFileMode {
    /// Maximum entry name length that fits in a plain ustar header.
    pub const USTAR_NAME_LIMIT: usize = 100;
}

impl FromStr for TarLongFileMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gnu" => Ok(Self::Gnu),
            "warn" => Ok(Self::Warn),
            "fail" => Ok(Self::Fail),
            other => Err(format!(
                "Invalid tar long file mode: {}. Valid modes: gnu, warn, fail",
                other
            )),
        }
    }
}

impl fmt::Display for TarLongFileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gnu => "gnu",
            Self::Warn => "warn",
            Self::Fail => "fail",
        };
        f.write_str(name)
    }
}
