use serde::{Deserialize, Serialize};

/// User-configurable settings, stored inside the encrypted ledger file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Symbol prefixed to monetary values when displayed (e.g., "₹").
    pub currency_symbol: String,

    /// Number of recent transactions shown on the dashboard.
    pub recent_transactions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            recent_transactions: 5,
        }
    }
}
