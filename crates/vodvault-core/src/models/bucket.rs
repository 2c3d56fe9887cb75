use serde::{Deserialize, Serialize};

/// Storage accounting for one bucket as reported by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketUsage {
    pub used_bytes: u64,
    pub max_bytes: u64,
}

impl BucketUsage {
    pub fn remaining_bytes(&self) -> u64 {
        self.max_bytes.saturating_sub(self.used_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_saturates_at_zero() {
        let usage = BucketUsage {
            used_bytes: 10,
            max_bytes: 4,
        };
        assert_eq!(usage.remaining_bytes(), 0);
    }
}
