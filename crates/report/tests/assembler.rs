use aggregator::{FailureLog, MemoryFailureLog, PipelineError, QueryOutcome};
use api_client::{ApiError, Endpoint, TransactionSource};
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{Category, CategorizedItem, RawPayload};
use document::IndentedDocument;
use formatting::{ItemFormatter, TransactionFormatter};
use indicatif::ProgressBar;
use report::{CategoryPlan, LineSink, RUNTIME_SECTION, ReportAssembler, ReportError};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses in order and remembers the requested ranges.
struct ScriptedSource {
    endpoint: Endpoint,
    responses: Mutex<VecDeque<Result<RawPayload, ApiError>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedSource {
    fn new(name: &str, responses: Vec<Result<RawPayload, ApiError>>) -> Self {
        Self {
            endpoint: Endpoint::new("https://cards.test", "api/v1", name),
            responses: Mutex::new(responses.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl TransactionSource for ScriptedSource {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn fetch(&self, start: &str, end: &str) -> Result<RawPayload, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((start.to_string(), end.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawPayload::new()))
    }
}

struct KeyFormatter;

impl ItemFormatter for KeyFormatter {
    fn headline(&self, item: &CategorizedItem) -> String {
        item.key().to_string()
    }

    fn summary(&self, item: &CategorizedItem) -> Vec<String> {
        vec![item.key().to_string()]
    }

    fn detail(&self, _item: &CategorizedItem) -> IndentedDocument {
        IndentedDocument::new()
    }
}

fn payload(value: Value) -> Result<RawPayload, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        other => panic!("not an object: {other}"),
    }
}

fn server_error() -> Result<RawPayload, ApiError> {
    Err(ApiError::Request {
        code: 500,
        message: "Internal Server Error".to_string(),
        data: Value::Null,
    })
}

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn section_headers(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|l| l.starts_with("===================="))
        .cloned()
        .collect()
}

/// Lines strictly between the `index`-th start marker and the next end marker.
fn section_body(lines: &[String], index: usize) -> Vec<String> {
    let start = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.starts_with("===================="))
        .nth(index)
        .map(|(i, _)| i)
        .unwrap();
    lines[start + 1..]
        .iter()
        .take_while(|l| !l.starts_with("--------------------"))
        .cloned()
        .collect()
}

fn settled_plan(months: u32, source: ScriptedSource) -> CategoryPlan {
    CategoryPlan::new(Category::Settled, "settled transactions", months, Box::new(source))
}

#[tokio::test]
async fn failed_window_leaves_an_annotated_empty_section() {
    let source = ScriptedSource::new(
        "settle_transactions",
        vec![
            payload(json!({"settled": [{"merchant": "A"}]})),
            server_error(),
            payload(json!({"settled": [{"merchant": "B"}, {"merchant": "C"}]})),
        ],
    );
    let log = Arc::new(MemoryFailureLog::new());
    let assembler = ReportAssembler::new(vec![settled_plan(2, source)], log.clone());

    let report = assembler.run(reference(), &KeyFormatter).await.unwrap();
    let lines = report.render(2);

    let headers = section_headers(&lines);
    assert_eq!(headers.len(), 4);
    assert_eq!(
        headers[0],
        "==================== settled transactions 2024-01-15 - 2024-01-31 (17 days) ===================="
    );
    assert_eq!(
        headers[1],
        "==================== settled transactions 2024-02-01 - 2024-02-29 (29 days) ===================="
    );
    assert_eq!(
        headers[2],
        "==================== settled transactions 2024-03-01 - 2024-03-15 (15 days) ===================="
    );
    assert_eq!(headers[3], format!("==================== {} ====================", RUNTIME_SECTION));

    let first = section_body(&lines, 0);
    assert!(first.iter().any(|l| l.contains("- headline: (1) purchase_0")));

    let second = section_body(&lines, 1);
    assert!(second.iter().any(|l| l.starts_with("  status: query failed:")));
    assert!(second.contains(&"  list: []".to_string()));
    assert!(!second.iter().any(|l| l.contains("headline")));

    let third = section_body(&lines, 2);
    assert!(third.iter().any(|l| l.contains("- headline: (2) purchase_1")));

    assert_eq!(log.len(), 1);
    let failed = report.failed_windows();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].result.window().start_text(), "2024-02-01");
    assert!(matches!(failed[0].result.outcome(), QueryOutcome::Failed { .. }));
    assert_eq!(report.document().level(), 0);
}

#[tokio::test]
async fn windows_are_requested_with_contiguous_boundaries() {
    let source = ScriptedSource::new("settle_transactions", Vec::new());
    let requests = source.requests.clone();
    let assembler = ReportAssembler::new(
        vec![settled_plan(2, source)],
        Arc::new(MemoryFailureLog::new()),
    );
    assert_eq!(assembler.total_windows(), 3);

    assembler.run(reference(), &KeyFormatter).await.unwrap();

    let requests = requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![
            ("20240115".to_string(), "20240131".to_string()),
            ("20240201".to_string(), "20240229".to_string()),
            ("20240301".to_string(), "20240315".to_string()),
        ]
    );
}

#[tokio::test]
async fn runtime_section_groups_windows_by_category() {
    let settled = ScriptedSource::new("settle_transactions", vec![server_error()]);
    let authorized = ScriptedSource::new("authorized_transactions", Vec::new());
    let plans = vec![
        settled_plan(1, settled),
        CategoryPlan::new(
            Category::Authorized,
            "authorized transactions",
            0,
            Box::new(authorized),
        ),
    ];
    let assembler = ReportAssembler::new(plans, Arc::new(MemoryFailureLog::new()));

    let report = assembler.run(reference(), &KeyFormatter).await.unwrap();
    let lines = report.render(2);

    let runtime = section_body(&lines, 3);
    assert_eq!(runtime.len(), 5);
    assert_eq!(runtime[0], "settled transactions:");
    assert!(runtime[1].starts_with("  2024-02-15 - 2024-02-29 (15 days): "));
    assert!(runtime[1].ends_with(" secs) [failed]"));
    assert!(runtime[2].starts_with("  2024-03-01 - 2024-03-15 (15 days): "));
    assert!(runtime[2].ends_with(" secs)"));
    assert_eq!(runtime[3], "authorized transactions:");
    assert!(runtime[4].starts_with("  2024-03-01 - 2024-03-15 (15 days): "));

    let footer = lines.last().unwrap();
    assert_eq!(
        footer,
        &format!("-------------------- {} --------------------", "-".repeat(RUNTIME_SECTION.len()))
    );
}

#[tokio::test]
async fn unrecognized_shape_aborts_the_run() {
    let source = ScriptedSource::new(
        "settle_transactions",
        vec![payload(json!({"authorized": [{"merchant": "A"}]}))],
    );
    let log: Arc<dyn FailureLog> = Arc::new(MemoryFailureLog::new());
    let assembler = ReportAssembler::new(vec![settled_plan(1, source)], log);

    let err = assembler.run(reference(), &KeyFormatter).await.unwrap_err();
    assert!(matches!(
        err,
        ReportError::Pipeline(PipelineError::UnrecognizedResponseShape { .. })
    ));
}

#[tokio::test]
async fn progress_bar_is_closed_when_the_run_aborts() {
    let source = ScriptedSource::new(
        "settle_transactions",
        vec![payload(json!({"refunds": []}))],
    );
    let progress = ProgressBar::hidden();
    let assembler = ReportAssembler::new(
        vec![settled_plan(1, source)],
        Arc::new(MemoryFailureLog::new()),
    )
    .with_progress(progress.clone());

    assert!(assembler.run(reference(), &KeyFormatter).await.is_err());
    assert!(progress.is_finished());
    assert_eq!(progress.position(), 0);
}

#[tokio::test]
async fn progress_bar_counts_every_window() {
    let source = ScriptedSource::new("settle_transactions", Vec::new());
    let progress = ProgressBar::hidden();
    let assembler = ReportAssembler::new(
        vec![settled_plan(2, source)],
        Arc::new(MemoryFailureLog::new()),
    )
    .with_progress(progress.clone());

    assembler.run(reference(), &KeyFormatter).await.unwrap();
    assert!(progress.is_finished());
    assert_eq!(progress.position(), 3);
}

#[tokio::test]
async fn rendering_is_repeatable() {
    let source = ScriptedSource::new(
        "settle_transactions",
        vec![payload(json!({"settled": [{
            "merchant": "Book Store",
            "approval_number": "S9",
            "approved_amount": "11000",
            "registered_amount": "10000",
            "sales_tax": "1000",
            "approved_date": "20240301",
        }]}))],
    );
    let assembler = ReportAssembler::new(
        vec![settled_plan(0, source)],
        Arc::new(MemoryFailureLog::new()),
    );

    let report = assembler
        .run(reference(), &TransactionFormatter::new())
        .await
        .unwrap();

    assert_eq!(report.render(2), report.render(2));
    assert_eq!(report.render(4), report.render(4));

    let mut sink: Vec<String> = Vec::new();
    report.write_to(&mut sink, 2).unwrap();
    assert_eq!(sink, report.render(2));
    assert!(sink.iter().any(|l| l.contains("Book Store · S9 · KRW 11,000")));
}

#[test]
fn write_line_appends_to_vec() {
    let mut sink: Vec<String> = Vec::new();
    sink.write_line("one").unwrap();
    sink.write_line("two").unwrap();
    assert_eq!(sink, vec!["one", "two"]);
}
