//! Payload classification.
//!
//! Each top-level payload key names a [`PayloadSection`]. A category registers
//! a classifier per section it understands; everything else is rejected.

use crate::error::PipelineError;
use core_types::{Category, CategorizedItem, RawPayload, RawRecord, index_width, item_key};
use serde_json::Value;
use std::collections::BTreeMap;

/// The list every purchase-like record is placed in.
pub const PURCHASE_LIST: &str = "purchase";

/// Top-level keys the card API is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSection {
    Authorized,
    Settled,
}

impl PayloadSection {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "authorized" => Some(Self::Authorized),
            "settled" => Some(Self::Settled),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Authorized => "authorized",
            Self::Settled => "settled",
        }
    }
}

/// Splits one section's records into named lists.
pub type Classifier = fn(Vec<RawRecord>) -> BTreeMap<String, Vec<RawRecord>>;

/// The classifier table: which sections a category understands, and how.
pub fn classifier_for(category: Category, section: PayloadSection) -> Option<Classifier> {
    match (category, section) {
        (Category::Authorized, PayloadSection::Authorized) => Some(purchases),
        (Category::Settled, PayloadSection::Settled) => Some(purchases),
        _ => None,
    }
}

fn purchases(records: Vec<RawRecord>) -> BTreeMap<String, Vec<RawRecord>> {
    BTreeMap::from([(PURCHASE_LIST.to_string(), records)])
}

fn shape_error(category: Category, key: &str, reason: impl Into<String>) -> PipelineError {
    PipelineError::UnrecognizedResponseShape {
        category,
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn section_records(
    category: Category,
    key: &str,
    value: &Value,
) -> Result<Vec<RawRecord>, PipelineError> {
    let entries = value
        .as_array()
        .ok_or_else(|| shape_error(category, key, "section is not an array"))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Ok(RawRecord::new(fields.clone())),
            _ => Err(shape_error(
                category,
                key,
                format!("entry {} is not an object", index),
            )),
        })
        .collect()
}

/// Classifies a whole payload into keyed items, grouped by list name.
///
/// Records from several sections landing in the same list are concatenated in
/// payload order before keys are assigned, so keys stay unique within a list.
pub fn classify_payload(
    category: Category,
    payload: &RawPayload,
) -> Result<BTreeMap<String, Vec<CategorizedItem>>, PipelineError> {
    let mut grouped: BTreeMap<String, Vec<RawRecord>> = BTreeMap::new();

    for (key, value) in payload {
        let section = PayloadSection::parse(key)
            .ok_or_else(|| shape_error(category, key, "unknown payload section"))?;
        let classifier = classifier_for(category, section).ok_or_else(|| {
            shape_error(category, key, format!("no classifier registered for {}", category))
        })?;

        let records = section_records(category, key, value)?;
        tracing::debug!(%category, section = section.key(), records = records.len(), "Classifying payload section.");

        for (list_name, list) in classifier(records) {
            grouped.entry(list_name).or_default().extend(list);
        }
    }

    let kind = category.transaction_kind();
    Ok(grouped
        .into_iter()
        .map(|(list_name, records)| {
            let width = index_width(records.len());
            let items = records
                .into_iter()
                .enumerate()
                .map(|(index, record)| {
                    CategorizedItem::new(item_key(&list_name, index, width), kind, record)
                })
                .collect();
            (list_name, items)
        })
        .collect())
}
