//! # Engine configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use toy32_spec::{DEFAULT_MEMORY_SIZE, INSTRUCTION_BYTES};

/// VM configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VMConfig {
    /// Memory size in bytes
    pub memory_size: usize,

    /// Abort with `CycleLimitExceeded` after this many steps. `None` runs
    /// until HALT or a fault.
    pub max_cycles: Option<u64>,

    /// Wall-clock length of one SLEEP time unit
    pub sleep_unit: Duration,

    /// Collect a per-step execution trace in the run result
    pub trace: bool,
}

impl VMConfig {
    /// Largest memory whose every address is a non-negative 32-bit register value
    pub const MAX_MEMORY_SIZE: usize = i32::MAX as usize;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_size < INSTRUCTION_BYTES as usize {
            return Err(ConfigError::MemoryTooSmall(self.memory_size));
        }
        if self.memory_size > Self::MAX_MEMORY_SIZE {
            return Err(ConfigError::MemoryTooLarge(self.memory_size));
        }
        if self.max_cycles == Some(0) {
            return Err(ConfigError::ZeroCycleLimit);
        }
        Ok(())
    }
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            max_cycles: None,
            sleep_unit: Duration::from_secs(1),
            trace: false,
        }
    }
}

/// Configuration error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Memory must hold at least one instruction
    MemoryTooSmall(usize),
    /// Memory must be addressable by a signed 32-bit register
    MemoryTooLarge(usize),
    /// A cycle limit of zero can never run anything
    ZeroCycleLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MemoryTooSmall(size) => {
                write!(f, "memory_size {} is smaller than one instruction", size)
            }
            ConfigError::MemoryTooLarge(size) => {
                write!(f, "memory_size {} exceeds {}", size, VMConfig::MAX_MEMORY_SIZE)
            }
            ConfigError::ZeroCycleLimit => {
                write!(f, "max_cycles must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = VMConfig::default();
        assert_eq!(config.memory_size, 8000);
        assert_eq!(config.max_cycles, None);
        assert_eq!(config.sleep_unit, Duration::from_secs(1));
        assert!(!config.trace);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate() {
        let config = VMConfig {
            memory_size: 3,
            ..VMConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MemoryTooSmall(3)));

        let config = VMConfig {
            memory_size: usize::MAX,
            ..VMConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MemoryTooLarge(usize::MAX)));

        let config = VMConfig {
            max_cycles: Some(0),
            ..VMConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCycleLimit));
    }
}
