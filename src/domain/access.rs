use serde::{Deserialize, Serialize};

/// Access level of a declaration, totally ordered by visibility breadth.
///
/// The derived `Ord` is the join order used throughout the analysis:
/// `Private < Package < Protected < Public`. The numeric rank exists so the
/// resolver can fold levels into an atomic accumulator; it is not part of the
/// interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Private,
    Package,
    Protected,
    Public,
}

impl AccessLevel {
    /// Join under the visibility order: the broader of the two levels.
    pub fn join(self, other: AccessLevel) -> AccessLevel {
        self.max(other)
    }

    /// Stable rank for atomic storage. Inverse of [AccessLevel::from_rank].
    pub fn rank(self) -> u8 {
        match self {
            AccessLevel::Private => 0,
            AccessLevel::Package => 1,
            AccessLevel::Protected => 2,
            AccessLevel::Public => 3,
        }
    }

    pub fn from_rank(rank: u8) -> AccessLevel {
        match rank {
            0 => AccessLevel::Private,
            1 => AccessLevel::Package,
            2 => AccessLevel::Protected,
            _ => AccessLevel::Public,
        }
    }

    /// Source-level modifier keyword; package level has no keyword in the
    /// target accessibility model, rendered as "package-private".
    pub fn keyword(self) -> &'static str {
        match self {
            AccessLevel::Private => "private",
            AccessLevel::Package => "package-private",
            AccessLevel::Protected => "protected",
            AccessLevel::Public => "public",
        }
    }
}
