use serde::{Deserialize, Serialize};
use std::fmt;

/// How the fields of a single transaction record are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Authorized,
    Settled,
}

/// A named class of transaction report, each with its own query target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Authorized,
    Settled,
}

impl Category {
    /// Short identifier, also used as the payload section key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Authorized => "authorized",
            Category::Settled => "settled",
        }
    }

    /// Human-readable name used in report headers.
    pub fn text(&self) -> &'static str {
        match self {
            Category::Authorized => "authorized transaction",
            Category::Settled => "settled transaction",
        }
    }

    /// The API endpoint queried when no override is configured.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Category::Authorized => "authorized_transactions",
            Category::Settled => "settle_transactions",
        }
    }

    pub fn transaction_kind(&self) -> TransactionKind {
        match self {
            Category::Authorized => TransactionKind::Authorized,
            Category::Settled => TransactionKind::Settled,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_deserializes_from_snake_case() {
        let category: Category = serde_json::from_str("\"settled\"").unwrap();
        assert_eq!(category, Category::Settled);
        assert_eq!(category.transaction_kind(), TransactionKind::Settled);
        assert_eq!(category.default_endpoint(), "settle_transactions");
    }
}
