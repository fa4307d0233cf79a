//! Common domain types for the ballchasing API.

use serde::{Deserialize, Serialize};

/// Patreon tier associated with an API key.
///
/// The tier determines how generous the account's rate limits are. It is
/// reported by the identity endpoint when a session is established and is
/// immutable for the lifetime of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free account, tightest limits
    Regular,
    /// Gold supporter
    Gold,
    /// Diamond supporter
    Diamond,
    /// Champion supporter - no hourly cap
    Champion,
    /// Grand Champion supporter - no hourly cap (wire name `gc`)
    #[serde(rename = "gc")]
    GrandChampion,
}

impl Tier {
    /// All tiers, from least to most generous.
    pub const ALL: [Tier; 5] = [
        Tier::Regular,
        Tier::Gold,
        Tier::Diamond,
        Tier::Champion,
        Tier::GrandChampion,
    ];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Regular => write!(f, "regular"),
            Tier::Gold => write!(f, "gold"),
            Tier::Diamond => write!(f, "diamond"),
            Tier::Champion => write!(f, "champion"),
            Tier::GrandChampion => write!(f, "gc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_wire_names() {
        assert_eq!(serde_json::to_string(&Tier::Regular).unwrap(), "\"regular\"");
        assert_eq!(serde_json::to_string(&Tier::GrandChampion).unwrap(), "\"gc\"");

        let tier: Tier = serde_json::from_str("\"gc\"").unwrap();
        assert_eq!(tier, Tier::GrandChampion);
        assert_eq!(tier.to_string(), "gc");
    }

    #[test]
    fn test_unknown_tier_rejected() {
        assert!(serde_json::from_str::<Tier>("\"platinum\"").is_err());
    }
}
