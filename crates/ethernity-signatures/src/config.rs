use serde::{Deserialize, Serialize};

/// Which dispatch idioms the scanner looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdiomConfig {
    /// `DUP1 PUSHn EQ PUSHn JUMPI` (solc)
    pub solc_eq: bool,
    /// `PUSHn DUP2 XOR PUSHn JUMPI` (vyper)
    pub vyper_xor: bool,
    /// `PUSHn PUSH 0 MLOAD EQ ISZERO` (older vyper)
    pub vyper_mload: bool,
}

impl Default for IdiomConfig {
    fn default() -> Self {
        Self { solc_eq: true, vyper_xor: true, vyper_mload: true }
    }
}

/// Resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Resolve function selectors against the method database
    pub resolve_functions: bool,
    /// Resolve event topics against the event database
    pub resolve_events: bool,
    pub idioms: IdiomConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            resolve_functions: true,
            resolve_events: true,
            idioms: IdiomConfig::default(),
        }
    }
}
