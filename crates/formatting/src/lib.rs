//! # Cardledger Formatting
//!
//! Turns a single [`CategorizedItem`] into report text. The aggregation
//! pipeline only sees the [`ItemFormatter`] trait; [`TransactionFormatter`] is
//! the implementation used by the binary.

use core_types::CategorizedItem;
use document::IndentedDocument;

pub mod money;
pub mod text;
pub mod transaction;

/// Renders one item's headline, summary lines and detail block.
pub trait ItemFormatter: Send + Sync {
    /// A short, single-line description.
    fn headline(&self, item: &CategorizedItem) -> String;

    /// A few human-oriented lines; the first one is used in list overviews.
    fn summary(&self, item: &CategorizedItem) -> Vec<String>;

    /// The multi-line detail block, nested under the item in the report.
    fn detail(&self, item: &CategorizedItem) -> IndentedDocument;
}

/// Formats card transactions using the issuer's field names.
#[derive(Debug, Default, Clone)]
pub struct TransactionFormatter;

impl TransactionFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ItemFormatter for TransactionFormatter {
    fn headline(&self, item: &CategorizedItem) -> String {
        transaction::headline(item.kind(), item.record())
    }

    fn summary(&self, item: &CategorizedItem) -> Vec<String> {
        transaction::summary(item.kind(), item.record())
    }

    fn detail(&self, item: &CategorizedItem) -> IndentedDocument {
        let record = item.record();
        let mut doc = IndentedDocument::new();

        let merchant = transaction::merchant_text(record);
        if !merchant.is_empty() {
            doc.push(format!("merchant: {}", merchant));
        }
        if let Some(installment) = record.text("installment") {
            doc.push(format!("installment: {}", installment));
        }
        if let Some(number) = record.text("business_registration_number") {
            doc.push(format!(
                "business_registration_number: {}",
                text::business_registration_number(&number)
            ));
        }
        let fields = serde_json::to_string(record.fields()).unwrap_or_else(|_| "{}".to_string());
        doc.push(format!("transaction: {}", fields));
        doc
    }
}
