/// Resource limits to prevent abuse and enable predictable memory usage
///
/// These limits protect against malicious inputs while being generous enough
/// for all legitimate use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Maximum length of a unit expression in characters
    /// Real usage: ~20 chars, Limit: 1024
    pub max_source_chars: usize,

    /// Maximum number of entries in a loaded unit system
    /// Real usage: ~100 units, Limit: 10,000 (100x)
    pub max_unit_system_entries: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_source_chars: 1024,
            max_unit_system_entries: 10_000,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
