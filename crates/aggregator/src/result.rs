use api_client::Endpoint;
use core_types::{CalendarWindow, Category, CategorizedItem, QueryInterval, index_width};
use document::{DocumentError, IndentedDocument};
use formatting::ItemFormatter;
use std::collections::BTreeMap;

/// How a window's query ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Aggregated,
    Failed { reason: String },
}

/// The classified items of one window, plus the bookkeeping to report on them.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    category: Category,
    window: CalendarWindow,
    runtime: QueryInterval,
    endpoint: Endpoint,
    lists: BTreeMap<String, Vec<CategorizedItem>>,
    outcome: QueryOutcome,
}

impl AggregationResult {
    pub(crate) fn aggregated(
        category: Category,
        window: CalendarWindow,
        runtime: QueryInterval,
        endpoint: Endpoint,
        lists: BTreeMap<String, Vec<CategorizedItem>>,
    ) -> Self {
        Self {
            category,
            window,
            runtime,
            endpoint,
            lists,
            outcome: QueryOutcome::Aggregated,
        }
    }

    pub(crate) fn failed(
        category: Category,
        window: CalendarWindow,
        runtime: QueryInterval,
        endpoint: Endpoint,
        reason: String,
    ) -> Self {
        Self {
            category,
            window,
            runtime,
            endpoint,
            lists: BTreeMap::new(),
            outcome: QueryOutcome::Failed { reason },
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn window(&self) -> &CalendarWindow {
        &self.window
    }

    pub fn runtime(&self) -> &QueryInterval {
        &self.runtime
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn outcome(&self) -> &QueryOutcome {
        &self.outcome
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, QueryOutcome::Failed { .. })
    }

    pub fn lists(&self) -> &BTreeMap<String, Vec<CategorizedItem>> {
        &self.lists
    }

    pub fn list(&self, name: &str) -> Option<&[CategorizedItem]> {
        self.lists.get(name).map(Vec::as_slice)
    }

    /// Zero for unknown list names.
    pub fn list_len(&self, name: &str) -> usize {
        self.lists.get(name).map_or(0, Vec::len)
    }

    pub fn total_items(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    /// All items, list by list in name order.
    pub fn items(&self) -> impl Iterator<Item = &CategorizedItem> {
        self.lists.values().flatten()
    }

    fn counts_text(&self) -> String {
        let counts = std::iter::once(format!("\"transactions\": {}", self.total_items()))
            .chain(
                self.lists
                    .iter()
                    .map(|(name, items)| format!("\"{}\": {}", name, items.len())),
            )
            .collect::<Vec<_>>();
        format!("{{{}}}", counts.join(", "))
    }

    /// The window's report block, rooted at level 0.
    pub fn fragment(&self, formatter: &dyn ItemFormatter) -> Result<IndentedDocument, DocumentError> {
        let mut doc = IndentedDocument::new();

        doc.push(format!("- list_id: {}", self.runtime.query_id()));
        doc.indent()?;
        doc.push(format!("list_category: {}", self.category.text()));
        doc.push(format!("endpoint: {}", self.endpoint.subpath()));

        doc.push("datespan:");
        doc.indent()?;
        doc.push(format!("start: {}", self.window.start_text()));
        doc.push(format!("end: {}", self.window.end_text()));
        doc.push(format!("days: {}", self.window.days_span()));
        doc.dedent()?;

        doc.push("query_runtime:");
        doc.indent()?;
        doc.push(format!("start: {}", self.runtime.start_text()));
        doc.push(format!("end: {}", self.runtime.end_text()));
        doc.push(format!("elapsed: {} secs", self.runtime.elapsed_secs_text()));
        doc.dedent()?;

        doc.push(format!("n_items: {}", self.counts_text()));
        match &self.outcome {
            QueryOutcome::Aggregated => doc.push("status: ok"),
            QueryOutcome::Failed { reason } => doc.push(format!("status: query failed: {}", reason)),
        }

        if self.lists.is_empty() {
            doc.push("list: []");
            doc.push("transactions: []");
            doc.dedent()?;
            return Ok(doc);
        }

        doc.push("list:");
        doc.indent()?;
        for (name, items) in &self.lists {
            self.push_overview(&mut doc, name, items, formatter)?;
        }
        doc.dedent()?;

        doc.push("transactions:");
        doc.indent()?;
        for (name, items) in &self.lists {
            self.push_items(&mut doc, name, items, formatter)?;
        }
        doc.dedent()?;

        doc.dedent()?;
        Ok(doc)
    }

    fn push_overview(
        &self,
        doc: &mut IndentedDocument,
        name: &str,
        items: &[CategorizedItem],
        formatter: &dyn ItemFormatter,
    ) -> Result<(), DocumentError> {
        if items.is_empty() {
            doc.push(format!("{}: []", name));
            return Ok(());
        }

        doc.push(format!("{}:", name));
        doc.indent()?;
        for item in items {
            let summary = formatter.summary(item);
            let mut lines = summary.iter();
            if let Some(first) = lines.next() {
                doc.push(format!("- {}", first));
            } else {
                doc.push(format!("- {}", item.key()));
            }
            doc.indent()?;
            if let Some(second) = lines.next() {
                doc.push(second.clone());
                doc.push("-".repeat(second.chars().count()));
            }
            doc.dedent()?;
        }
        doc.dedent()
    }

    fn push_items(
        &self,
        doc: &mut IndentedDocument,
        name: &str,
        items: &[CategorizedItem],
        formatter: &dyn ItemFormatter,
    ) -> Result<(), DocumentError> {
        if items.is_empty() {
            doc.push(format!("{}: []", name));
            return Ok(());
        }

        let width = index_width(items.len());
        doc.push(format!("{}:", name));
        doc.indent()?;
        for (index, item) in items.iter().enumerate() {
            doc.push(format!(
                "- headline: ({:0width$}) {}",
                index + 1,
                formatter.headline(item),
                width = width
            ));
            doc.indent()?;
            doc.push(format!("item_key: {}", item.key()));

            doc.push("summary:");
            doc.indent()?;
            for line in formatter.summary(item) {
                doc.push(format!("- {}", line));
            }
            doc.dedent()?;

            doc.push("detail:");
            doc.indent()?;
            doc.append(&formatter.detail(item));
            doc.dedent()?;

            doc.dedent()?;
        }
        doc.dedent()
    }
}
