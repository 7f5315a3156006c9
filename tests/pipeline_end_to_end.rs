// tests/pipeline_end_to_end.rs

mod common;
use crate::common::builders::{
    RunConfigBuilder, SummaryBuilder, backend_with_executions, detail_input, utc,
};
use crate::common::{RecordingSink, init_tracing, output_lines};

use serde_json::json;

use sfnview::errors::{QueryError, SfnviewError};
use sfnview::live::{LiveLog, NoopSink};
use sfnview::run_pipeline;
use sfnview::source::{MockBackend, MockCall};
use sfnview::table::format_timestamp;
use sfnview::types::{ExecutionStatus, MalformedInputPolicy};

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// E1 (SUCCEEDED), E2 (FAILED, other timestamps), E3 (malformed input)
/// depending on `with_malformed`.
fn mixed_backend(with_malformed: bool) -> MockBackend {
    let backend = MockBackend::new();
    backend.add_execution(
        SummaryBuilder::new("E1").build(),
        Some(&detail_input("x1", "Created")),
    );
    backend.add_execution(
        SummaryBuilder::new("E2")
            .status(ExecutionStatus::Failed)
            .started(utc(2024, 3, 2, 8, 30, 0))
            .stopped(utc(2024, 3, 2, 8, 31, 15))
            .build(),
        Some(&detail_input("x2", "Created")),
    );
    if with_malformed {
        backend.add_execution(SummaryBuilder::new("E3").build(), Some("{\"detail\": oops"));
        backend.add_execution(
            SummaryBuilder::new("E4").build(),
            Some(&detail_input("x4", "Updated")),
        );
    }
    backend
}

#[tokio::test]
async fn one_page_two_executions_renders_header_and_rows() -> TestResult {
    init_tracing();

    let backend = mixed_backend(false);
    let cfg = RunConfigBuilder::new().build();
    let mut out = Vec::new();

    let summary = run_pipeline(backend.clone(), &cfg, &mut out, &mut NoopSink).await?;

    let e1 = SummaryBuilder::new("E1").build();
    let lines = output_lines(&out);
    assert_eq!(
        lines,
        vec![
            "Name,StartDate,StopDate,Status,id,type,".to_string(),
            format!(
                "E1,{},{},SUCCEEDED,x1,Created,",
                format_timestamp(&e1.start_date),
                format_timestamp(&e1.stop_date.unwrap())
            ),
            format!(
                "E2,{},{},FAILED,x2,Created,",
                format_timestamp(&utc(2024, 3, 2, 8, 30, 0)),
                format_timestamp(&utc(2024, 3, 2, 8, 31, 15))
            ),
        ]
    );

    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(summary.executions_described, 2);
    assert_eq!(summary.rows_emitted, 2);
    Ok(())
}

#[tokio::test]
async fn remote_calls_are_sequential_list_then_describe() -> TestResult {
    let backend = mixed_backend(false);
    let cfg = RunConfigBuilder::new().build();

    run_pipeline(backend.clone(), &cfg, Vec::new(), &mut NoopSink).await?;

    let calls = backend.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(calls[0], MockCall::List { page_size: 100, next_token: None }));
    assert!(matches!(&calls[1], MockCall::Describe { execution_arn } if execution_arn.ends_with(":E1")));
    assert!(matches!(&calls[2], MockCall::Describe { execution_arn } if execution_arn.ends_with(":E2")));
    Ok(())
}

#[tokio::test]
async fn invalid_expression_aborts_before_any_output_or_remote_call() {
    let backend = mixed_backend(false);
    let cfg = RunConfigBuilder::new().expression("{ id: detail.id,").build();
    let mut out = Vec::new();

    let result = run_pipeline(backend.clone(), &cfg, &mut out, &mut NoopSink).await;

    assert!(matches!(
        result,
        Err(SfnviewError::QueryError(QueryError::Invalid { .. }))
    ));
    assert!(out.is_empty());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn non_object_result_aborts_the_run() {
    let backend = mixed_backend(false);
    let cfg = RunConfigBuilder::new().expression("detail.id").build();
    let mut out = Vec::new();

    let result = run_pipeline(backend.clone(), &cfg, &mut out, &mut NoopSink).await;

    assert!(matches!(
        result,
        Err(SfnviewError::QueryError(QueryError::UnexpectedShape { .. }))
    ));
    assert!(out.is_empty());
    assert_eq!(backend.describe_calls(), 1);
}

#[tokio::test]
async fn later_rows_with_other_keys_follow_the_first_schema() -> TestResult {
    let backend = MockBackend::new();
    backend.add_execution(
        SummaryBuilder::new("E1").build(),
        Some(r#"{"detail":{"id":"x1","type":"Created"}}"#),
    );
    backend.add_execution(
        SummaryBuilder::new("E2").build(),
        Some(r#"{"detail":{"id":"x2","extra":"y"}}"#),
    );
    let cfg = RunConfigBuilder::new().expression("detail").build();
    let mut out = Vec::new();
    let mut sink = RecordingSink::new();

    run_pipeline(backend, &cfg, &mut out, &mut sink).await?;

    let lines = output_lines(&out);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Name,StartDate,StopDate,Status,id,type,");
    assert!(lines[2].starts_with("E2,"));
    assert!(lines[2].ends_with(",SUCCEEDED,x2,,"));
    assert!(!lines[2].contains('y'));

    // The sink sees the full row, extra key included, and the schema once.
    assert_eq!(sink.schemas.len(), 1);
    assert_eq!(sink.rows.len(), 2);
    assert_eq!(sink.rows[1].get("extra"), Some(&json!("y")));
    Ok(())
}

#[tokio::test]
async fn malformed_input_with_empty_policy_keeps_the_row() -> TestResult {
    let backend = mixed_backend(true);
    let cfg = RunConfigBuilder::new()
        .on_malformed(MalformedInputPolicy::Empty)
        .build();
    let mut out = Vec::new();

    let summary = run_pipeline(backend, &cfg, &mut out, &mut NoopSink).await?;

    let lines = output_lines(&out);
    assert_eq!(lines.len(), 5);
    assert!(lines[3].starts_with("E3,"));
    assert!(lines[3].ends_with(",SUCCEEDED,,,"));
    assert!(lines[4].ends_with(",x4,Updated,"));
    assert_eq!(summary.malformed_payloads, 1);
    assert_eq!(summary.rows_skipped, 0);
    assert_eq!(summary.rows_emitted, 4);
    Ok(())
}

#[tokio::test]
async fn malformed_input_with_skip_policy_drops_the_row() -> TestResult {
    let backend = mixed_backend(true);
    let cfg = RunConfigBuilder::new()
        .on_malformed(MalformedInputPolicy::Skip)
        .build();
    let mut out = Vec::new();

    let summary = run_pipeline(backend, &cfg, &mut out, &mut NoopSink).await?;

    let lines = output_lines(&out);
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| !l.starts_with("E3,")));
    assert_eq!(summary.malformed_payloads, 1);
    assert_eq!(summary.rows_skipped, 1);
    assert_eq!(summary.executions_described, 4);
    Ok(())
}

#[tokio::test]
async fn malformed_input_with_abort_policy_fails_after_earlier_rows() {
    let backend = mixed_backend(true);
    let cfg = RunConfigBuilder::new()
        .on_malformed(MalformedInputPolicy::Abort)
        .build();
    let mut out = Vec::new();

    let result = run_pipeline(backend, &cfg, &mut out, &mut NoopSink).await;

    match result {
        Err(SfnviewError::MalformedInput { execution, .. }) => assert_eq!(execution, "E3"),
        other => panic!("expected MalformedInput, got {other:?}"),
    }
    assert_eq!(output_lines(&out).len(), 3);
}

#[tokio::test]
async fn malformed_first_payload_does_not_fix_the_schema() -> TestResult {
    let backend = MockBackend::new();
    backend.add_execution(SummaryBuilder::new("E1").build(), Some("not json"));
    backend.add_execution(
        SummaryBuilder::new("E2").build(),
        Some(&detail_input("x2", "Created")),
    );
    backend.add_execution(
        SummaryBuilder::new("E3").build(),
        Some(&detail_input("x3", "Updated")),
    );
    let cfg = RunConfigBuilder::new().build();
    let mut out = Vec::new();
    let mut sink = RecordingSink::new();

    let summary = run_pipeline(backend, &cfg, &mut out, &mut sink).await?;

    let lines = output_lines(&out);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Name,StartDate,StopDate,Status,id,type,");
    assert!(lines[1].starts_with("E1,"));
    assert!(lines[1].ends_with(",SUCCEEDED,,,"));
    assert!(lines[2].ends_with(",x2,Created,"));
    assert!(lines[3].ends_with(",x3,Updated,"));

    assert_eq!(sink.schemas.len(), 1);
    assert_eq!(sink.schemas[0].len(), 6);
    let names: Vec<_> = sink.rows.iter().map(|r| r.cell("Name")).collect();
    assert_eq!(names, vec!["E1", "E2", "E3"]);
    assert_eq!(summary.rows_emitted, 3);
    assert_eq!(summary.malformed_payloads, 1);
    Ok(())
}

#[tokio::test]
async fn only_malformed_payloads_fall_back_to_metadata_columns() -> TestResult {
    let backend = MockBackend::new();
    backend.add_execution(SummaryBuilder::new("E1").build(), Some("not json"));
    backend.add_execution(SummaryBuilder::new("E2").build(), Some("{oops"));
    let cfg = RunConfigBuilder::new().build();
    let mut out = Vec::new();

    let summary = run_pipeline(backend, &cfg, &mut out, &mut NoopSink).await?;

    let lines = output_lines(&out);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Name,StartDate,StopDate,Status,");
    assert!(lines[1].starts_with("E1,"));
    assert!(lines[2].starts_with("E2,"));
    assert!(lines[2].ends_with(",SUCCEEDED,"));
    assert_eq!(summary.rows_emitted, 2);
    Ok(())
}

#[tokio::test]
async fn describe_failure_aborts_and_keeps_rows_already_written() {
    let backend = backend_with_executions(3);
    backend.fail_describe("arn:aws:states:us-east-1:123456789012:execution:orders:E2");
    let cfg = RunConfigBuilder::new().build();
    let mut out = Vec::new();

    let result = run_pipeline(backend.clone(), &cfg, &mut out, &mut NoopSink).await;

    assert!(matches!(result, Err(SfnviewError::RemoteError(_))));
    let lines = output_lines(&out);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("E1,"));
    // E3 is never described.
    assert_eq!(backend.describe_calls(), 2);
}

#[tokio::test]
async fn listing_failure_aborts_the_run() {
    let backend = backend_with_executions(3);
    backend.fail_list_at_page(1);
    let cfg = RunConfigBuilder::new().page_size(1).build();
    let mut out = Vec::new();

    let result = run_pipeline(backend.clone(), &cfg, &mut out, &mut NoopSink).await;

    assert!(matches!(result, Err(SfnviewError::RemoteError(_))));
    assert_eq!(output_lines(&out).len(), 2);
    assert_eq!(backend.list_calls(), 2);
}

#[tokio::test]
async fn empty_listing_writes_nothing() -> TestResult {
    let backend = MockBackend::new();
    let cfg = RunConfigBuilder::new().build();
    let mut out = Vec::new();

    let summary = run_pipeline(backend.clone(), &cfg, &mut out, &mut NoopSink).await?;

    assert!(out.is_empty());
    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(summary.rows_emitted, 0);
    Ok(())
}

#[tokio::test]
async fn live_log_receives_every_row_after_the_schema() -> TestResult {
    let backend = mixed_backend(false);
    let cfg = RunConfigBuilder::new().build();
    let mut live = LiveLog::new();

    run_pipeline(backend, &cfg, Vec::new(), &mut live).await?;

    let snapshot = live.snapshot_after(0);
    assert_eq!(
        snapshot.columns,
        vec!["Name", "StartDate", "StopDate", "Status", "id", "type"]
    );
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.records[0].seq, 1);
    assert_eq!(snapshot.records[1].fields.get("Status"), Some(&json!("FAILED")));
    assert_eq!(live.snapshot_after(1).records.len(), 1);
    Ok(())
}
