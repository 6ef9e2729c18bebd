//! Backup configuration
//!
//! A typed set of inclusion flags, one per collection, plus the encryption
//! switch. The flags are declarative intent: the nested-suppression rule in
//! `resolved_collections` decides what is actually fetched standalone.

use serde::{Deserialize, Serialize};

use super::collection::Collection;

/// Which collections to include in a backup, and whether to encrypt it
///
/// Immutable once a snapshot begins: the builder takes it by value and
/// records it verbatim inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupConfig {
    /// Include customer records (with their embedded subscriptions and invoices)
    pub include_customers: bool,
    /// Include standalone subscription records
    ///
    /// Honored only when `include_customers` is false; customers already
    /// embed their subscriptions.
    pub include_subscriptions: bool,
    /// Include standalone invoice records
    ///
    /// Honored only when `include_customers` is false; customers already
    /// embed their invoices.
    pub include_invoices: bool,
    /// Include service package records
    pub include_packages: bool,
    /// Include administrative audit logs
    pub include_admin_logs: bool,
    /// Encrypt the serialized document with a fresh random key
    pub encrypt_backup: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            include_customers: true,
            include_subscriptions: false,
            include_invoices: false,
            include_packages: true,
            include_admin_logs: false,
            encrypt_backup: false,
        }
    }
}

impl BackupConfig {
    /// A config that includes every collection standalone where possible
    pub fn everything(encrypt: bool) -> Self {
        Self {
            include_customers: true,
            include_subscriptions: true,
            include_invoices: true,
            include_packages: true,
            include_admin_logs: true,
            encrypt_backup: encrypt,
        }
    }

    /// The raw flag for a collection, before nested suppression
    pub fn is_enabled(&self, collection: Collection) -> bool {
        match collection {
            Collection::Customers => self.include_customers,
            Collection::Subscriptions => self.include_subscriptions,
            Collection::Invoices => self.include_invoices,
            Collection::Packages => self.include_packages,
            Collection::AdminLogs => self.include_admin_logs,
        }
    }

    /// Resolve which collections are fetched standalone, in precedence order
    ///
    /// Applies the nested-suppression rule: `include_subscriptions` and
    /// `include_invoices` are honored only when `include_customers` is
    /// false, because included customers already embed both. This is part of
    /// the contract, not an optimization.
    pub fn resolved_collections(&self) -> Vec<Collection> {
        Collection::ALL
            .into_iter()
            .filter(|c| self.is_enabled(*c) && !self.is_suppressed(*c))
            .collect()
    }

    /// Whether a collection's flag is suppressed by an included parent
    fn is_suppressed(&self, collection: Collection) -> bool {
        match collection {
            Collection::Subscriptions | Collection::Invoices => self.include_customers,
            _ => false,
        }
    }
}
