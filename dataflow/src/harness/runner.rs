//! Reference result generation.

use super::HarnessConfig;
use crate::errors::Result;
use crate::events::{self, EventSink};
use crate::io::{digest, write_table};
use crate::observability::SpanTimer;
use crate::pipeline::{PipelineBuilder, PipelineConfig, RunReport};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of [`apply_operations`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The pipeline ran and the result file was written.
    Completed(RunReport),
    /// The partition count resolved to zero; no file was touched.
    NothingToProcess,
}

/// Applies the configured program to partitions `1..=N` and writes the
/// result file.
///
/// `N` is `partitions` when given, else the program's `partitions` field,
/// else zero. With `N = 0` nothing is read or written and
/// [`ApplyOutcome::NothingToProcess`] is returned. The program is validated
/// in full before any partition is read.
///
/// # Errors
///
/// Returns an error if the program is missing or invalid, an operation
/// fails to compile, a partition is missing or malformed, or the result
/// cannot be written.
pub fn apply_operations(
    config: &HarnessConfig,
    partitions: Option<usize>,
    sink: Arc<dyn EventSink>,
) -> Result<ApplyOutcome> {
    if partitions == Some(0) {
        return Ok(skip(sink.as_ref()));
    }

    let program = PipelineConfig::load(&config.program_path)?;
    let count = partitions.or(program.partitions).unwrap_or(0);
    if count == 0 {
        return Ok(skip(sink.as_ref()));
    }

    let timer = SpanTimer::start("apply");
    let pipeline = PipelineBuilder::from_config(config.program_path.display().to_string(), &program)
        .with_truncation(config.truncation)
        .with_event_sink(sink)
        .build()?;

    let input = config.partitions().load(count)?;
    let input_rows = input.len();
    let output = pipeline.run(input);

    write_table(&config.result_path, &output)?;
    let report = RunReport::start(pipeline.name(), count, pipeline.len())
        .with_rows(input_rows, output.len())
        .with_digest(digest(&output)?)
        .with_duration_ms(timer.finish());

    info!(
        run_id = %report.run_id,
        partitions = count,
        rows = report.output_rows,
        result = %config.result_path.display(),
        "Wrote result"
    );
    Ok(ApplyOutcome::Completed(report))
}

fn skip(sink: &dyn EventSink) -> ApplyOutcome {
    warn!("No partitions to process");
    sink.emit(events::PIPELINE_SKIPPED, Some(serde_json::json!({ "partitions": 0 })));
    ApplyOutcome::NothingToProcess
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordTable;
    use crate::events::{CollectingEventSink, NoOpEventSink};
    use crate::io::read_table;
    use crate::io::HeaderMode;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn write_program(config: &HarnessConfig, body: &str) {
        std::fs::write(&config.program_path, body).unwrap();
    }

    fn seed(dir: &Path) -> HarnessConfig {
        let config = HarnessConfig::rooted_at(dir);
        let source = config.partitions();
        source.write(1, &RecordTable::from_pairs(&[(1, 4), (1, 7)])).unwrap();
        source.write(2, &RecordTable::from_pairs(&[(2, 10)])).unwrap();
        config
    }

    #[test]
    fn test_apply_writes_result() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed(dir.path());
        write_program(
            &config,
            r#"{"operations": [
                {"operator": "FILTER", "function": "IS_EVEN"},
                {"operator": "MAP", "function": "ADD(1)"}
            ]}"#,
        );

        let outcome = apply_operations(&config, Some(2), Arc::new(NoOpEventSink)).unwrap();
        let ApplyOutcome::Completed(report) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(report.partitions, 2);
        assert_eq!(report.input_rows, 3);
        assert_eq!(report.output_rows, 2);

        let written = read_table(&config.result_path, HeaderMode::Absent).unwrap();
        assert_eq!(written.to_pairs(), vec![(1, 5), (2, 11)]);
        assert_eq!(report.digest, digest(&written).unwrap());
    }

    #[test]
    fn test_partition_count_from_program() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed(dir.path());
        write_program(
            &config,
            r#"{"partitions": 1, "operations": [{"operator": "REDUCE", "function": "SUM"}]}"#,
        );

        apply_operations(&config, None, Arc::new(NoOpEventSink)).unwrap();
        let written = read_table(&config.result_path, HeaderMode::Absent).unwrap();
        assert_eq!(written.to_pairs(), vec![(1, 11)]);
    }

    #[test]
    fn test_zero_partitions_leaves_result_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed(dir.path());
        std::fs::write(&config.result_path, "9,9\n").unwrap();
        let sink = Arc::new(CollectingEventSink::new());

        let outcome = apply_operations(&config, Some(0), sink.clone()).unwrap();
        assert_eq!(outcome, ApplyOutcome::NothingToProcess);
        assert_eq!(std::fs::read_to_string(&config.result_path).unwrap(), "9,9\n");
        assert_eq!(sink.event_types(), vec![events::PIPELINE_SKIPPED]);
    }

    #[test]
    fn test_no_count_anywhere_is_nothing_to_process() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed(dir.path());
        write_program(&config, r#"{"operations": []}"#);

        let outcome = apply_operations(&config, None, Arc::new(NoOpEventSink)).unwrap();
        assert_eq!(outcome, ApplyOutcome::NothingToProcess);
        assert!(!config.result_path.exists());
    }

    #[test]
    fn test_invalid_program_fails_before_reading_partitions() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::rooted_at(dir.path());
        write_program(&config, r#"{"operations": [{"operator": "SORT", "function": "ASC"}]}"#);

        let err = apply_operations(&config, Some(5), Arc::new(NoOpEventSink)).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_OPERATOR");
        assert!(!config.result_path.exists());
    }

    #[test]
    fn test_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed(dir.path());
        let err = apply_operations(&config, Some(1), Arc::new(NoOpEventSink)).unwrap_err();
        assert!(err.is_missing_input());
    }
}
