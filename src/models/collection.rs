//! Entity collections a backup can include
//!
//! Collection names are the wire names used as keys in a backup document's
//! `data` block, so they must stay stable across versions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An entity collection that can be included in a backup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Customer records (embed their subscriptions and invoices)
    Customers,
    /// Standalone subscription records
    Subscriptions,
    /// Standalone invoice records
    Invoices,
    /// Service package records
    Packages,
    /// Administrative audit log entries
    AdminLogs,
}

impl Collection {
    /// All collections in backup precedence order
    ///
    /// The order matters: parent collections come before the collections
    /// they embed, so nested suppression can be resolved in one pass.
    pub const ALL: [Collection; 5] = [
        Collection::Customers,
        Collection::Subscriptions,
        Collection::Invoices,
        Collection::Packages,
        Collection::AdminLogs,
    ];

    /// The stable wire name used as a key in the document's data block
    pub fn name(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Subscriptions => "subscriptions",
            Self::Invoices => "invoices",
            Self::Packages => "packages",
            Self::AdminLogs => "admin_logs",
        }
    }

    /// Parse a collection from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customers" => Some(Self::Customers),
            "subscriptions" => Some(Self::Subscriptions),
            "invoices" => Some(Self::Invoices),
            "packages" => Some(Self::Packages),
            "admin_logs" => Some(Self::AdminLogs),
            _ => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
