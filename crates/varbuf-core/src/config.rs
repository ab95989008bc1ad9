//! Construction parameters for heap buffers

use serde::{Deserialize, Serialize};

use crate::error::{BufferError, Result};

/// Initial and maximum capacity of a [`HeapBuf`](crate::HeapBuf)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufConfig {
    pub initial_capacity: usize,
    pub max_capacity: usize,
}

impl Default for BufConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 256,
            max_capacity: i32::MAX as usize,
        }
    }
}

impl BufConfig {
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity,
        }
    }

    /// Check that the initial capacity fits under the maximum
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > self.max_capacity {
            return Err(BufferError::InvalidConfig(format!(
                "initial capacity {} exceeds max capacity {}",
                self.initial_capacity, self.max_capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BufConfig::default();
        assert_eq!(config.initial_capacity, 256);
        assert_eq!(config.max_capacity, 2147483647);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: BufConfig = serde_json::from_str(r#"{"initial_capacity": 16}"#).unwrap();
        assert_eq!(config.initial_capacity, 16);
        assert_eq!(config.max_capacity, BufConfig::default().max_capacity);
    }

    #[test]
    fn test_invalid_ordering() {
        let config = BufConfig::new(64, 32);
        assert!(matches!(
            config.validate(),
            Err(BufferError::InvalidConfig(_))
        ));
    }
}
