use serde::{Deserialize, Serialize};

/// Bytes of per-slot bookkeeping the host charges rent for on top of the data.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// Rent sysvar - defines what a storage slot must hold to be rent exempt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rent {
    /// Rental rate in lamports/byte-year
    pub lamports_per_byte_year: u64,
    /// Amount of time (in years) a balance must cover to be rent exempt
    pub exemption_threshold: f64,
}

impl Default for Rent {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: 3480,
            exemption_threshold: 2.0,
        }
    }
}

impl Rent {
    /// Calculate minimum balance for rent exemption
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        let bytes = (data_len as u64).saturating_add(ACCOUNT_STORAGE_OVERHEAD);
        // f64 -> u64 casts saturate, so an oversized rate caps at u64::MAX
        (bytes as f64 * self.lamports_per_byte_year as f64 * self.exemption_threshold) as u64
    }

    /// Check if a slot is rent exempt
    pub fn is_exempt(&self, lamports: u64, data_len: usize) -> bool {
        lamports >= self.minimum_balance(data_len)
    }

    /// Rent that can never be charged: every slot is exempt.
    pub fn free() -> Self {
        Self {
            lamports_per_byte_year: 0,
            exemption_threshold: 0.0,
        }
    }
}
