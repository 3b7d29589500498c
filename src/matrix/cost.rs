//! Single cell of a cost matrix.

use std::fmt;

/// Cost of pairing one row with one column.
///
/// Lower is better. `Forbidden` marks an edge that must not be used;
/// the solver only falls back to it when a row has no other option, and
/// flags such pairs on the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cost {
    /// A usable edge with a non-negative cost.
    ///
    /// Costs are ranks in practice. The solver works in `i64` with
    /// potentials bounded by about `(max_cost + 1) * N²`, N = max(R, C),
    /// which fits for any `u32` cost up to N ≈ 30 000.
    Allowed(u32),
    /// An edge that may not be used.
    Forbidden,
}

impl Cost {
    /// Returns `true` for [`Cost::Allowed`].
    pub fn is_allowed(self) -> bool {
        matches!(self, Cost::Allowed(_))
    }

    /// Returns `true` for [`Cost::Forbidden`].
    pub fn is_forbidden(self) -> bool {
        matches!(self, Cost::Forbidden)
    }

    /// Returns the finite cost, or `None` if forbidden.
    pub fn value(self) -> Option<u32> {
        match self {
            Cost::Allowed(c) => Some(c),
            Cost::Forbidden => None,
        }
    }
}

impl From<u32> for Cost {
    fn from(c: u32) -> Self {
        Cost::Allowed(c)
    }
}

impl From<Option<u32>> for Cost {
    fn from(c: Option<u32>) -> Self {
        c.map_or(Cost::Forbidden, Cost::Allowed)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Allowed(c) => write!(f, "{c}"),
            Cost::Forbidden => f.write_str("D"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_option() {
        assert_eq!(Cost::from(Some(3)), Cost::Allowed(3));
        assert_eq!(Cost::from(None), Cost::Forbidden);
    }

    #[test]
    fn test_value() {
        assert_eq!(Cost::Allowed(7).value(), Some(7));
        assert_eq!(Cost::Forbidden.value(), None);
        assert!(Cost::Forbidden.is_forbidden());
        assert!(Cost::Allowed(0).is_allowed());
    }

    #[test]
    fn test_display() {
        assert_eq!(Cost::Allowed(12).to_string(), "12");
        assert_eq!(Cost::Forbidden.to_string(), "D");
    }
}
