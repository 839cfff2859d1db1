use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Unset means "take it from resolv.conf, else 1".
    #[serde(default)]
    pub ndots: Option<i64>,

    /// Unset means "take it from resolv.conf, else empty".
    #[serde(default)]
    pub search: Option<Vec<String>>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_true")]
    pub use_system: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ndots: None,
            search: None,
            timeout_ms: default_timeout_ms(),
            use_system: true,
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}
