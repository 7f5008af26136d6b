//! The scope lattice: how broad a slice of the record space a user may see.
//!
//! # Purpose
//! Defines [`Scope`] as a total order by access breadth so that conflict
//! resolution can compare scopes with plain `max()`.
use serde::{Deserialize, Serialize};

/// Breadth of records a principal may access.
///
/// Variants are declared narrowest-first so the derived `Ord` matches the
/// weight ordering `None(0) < Owned(1) < WorkCell(2) < All(3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// No access at all. The fail-closed default.
    None,
    /// Records where the user is the designated owner/agent.
    Owned,
    /// Records reachable through the user's work-cell membership.
    WorkCell,
    /// Unrestricted access.
    All,
}

impl Scope {
    /// Numeric access weight, used for tie-breaks and diagnostics.
    pub fn weight(self) -> u8 {
        match self {
            Scope::None => 0,
            Scope::Owned => 1,
            Scope::WorkCell => 2,
            Scope::All => 3,
        }
    }

    /// Stable lowercase name, suitable for metric labels and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::None => "none",
            Scope::Owned => "owned",
            Scope::WorkCell => "work_cell",
            Scope::All => "all",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Scope;

    #[test]
    fn ordering_follows_access_breadth() {
        assert!(Scope::None < Scope::Owned);
        assert!(Scope::Owned < Scope::WorkCell);
        assert!(Scope::WorkCell < Scope::All);
        assert_eq!(
            [Scope::Owned, Scope::All, Scope::WorkCell].into_iter().max(),
            Some(Scope::All)
        );
    }

    #[test]
    fn weights_match_ordering() {
        let scopes = [Scope::None, Scope::Owned, Scope::WorkCell, Scope::All];
        for pair in scopes.windows(2) {
            assert!(pair[0].weight() < pair[1].weight());
        }
    }

    #[test]
    fn serde_uses_snake_case_names() {
        assert_eq!(serde_json::to_string(&Scope::WorkCell).unwrap(), "\"work_cell\"");
        let parsed: Scope = serde_json::from_str("\"owned\"").unwrap();
        assert_eq!(parsed, Scope::Owned);
    }
}
