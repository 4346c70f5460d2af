use crate::error::GanError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Where computations should run.
///
/// Every computation in this crate runs on the host, so only [Device::Cpu] is available.
/// Other devices can still be named (for example when they come from a config file)
/// and are rejected once something tries to use them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    Cpu,
    Cuda(usize),
}

impl Default for Device {
    fn default() -> Self {
        Device::Cpu
    }
}

impl Device {
    pub fn is_available(&self) -> bool {
        match self {
            Device::Cpu => true,
            Device::Cuda(_) => false,
        }
    }

    pub fn ensure_available(&self) -> Result<(), GanError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(GanError::DeviceUnavailable(*self))
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("cpu"),
            Device::Cuda(idx) => write!(f, "cuda:{}", idx),
        }
    }
}

/// Parses `cpu`, `cuda` and `cuda:<index>`.
impl FromStr for Device {
    type Err = GanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || GanError::UnknownDevice(s.to_owned());
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda(0)),
            other => {
                let idx = other.strip_prefix("cuda:").ok_or_else(unknown)?;
                idx.parse().map(Device::Cuda).map_err(|_| unknown())
            }
        }
    }
}
