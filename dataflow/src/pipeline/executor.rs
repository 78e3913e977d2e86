//! Pipeline execution.

use super::{OperationSpec, PipelineBuilder};
use crate::core::RecordTable;
use crate::errors::Result;
use crate::events::{self, EventSink};
use crate::observability::SpanTimer;
use crate::operators::Transform;
use std::sync::Arc;
use tracing::{debug, info};

/// An operation resolved to its transform.
#[derive(Debug, Clone)]
pub struct CompiledOperation {
    /// 1-based position in the configuration.
    pub position: usize,
    /// The operation as written.
    pub spec: OperationSpec,
    /// The resolved transform.
    pub transform: Transform,
}

/// A validated, ready-to-run pipeline.
///
/// Built by [`PipelineBuilder`]. Running is a strict left fold of the
/// transforms over the input table.
pub struct Pipeline {
    name: String,
    steps: Vec<CompiledOperation>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub(super) fn new(name: String, steps: Vec<CompiledOperation>, sink: Arc<dyn EventSink>) -> Self {
        Self { name, steps, sink }
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the pipeline has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the compiled operations in order.
    #[must_use]
    pub fn steps(&self) -> &[CompiledOperation] {
        &self.steps
    }

    /// Runs every operation in declared order and returns the final table.
    ///
    /// Each transform consumes the previous table and returns a new one.
    /// Records hold integers at every step, so the result needs no final
    /// cast.
    #[must_use]
    pub fn run(&self, initial: RecordTable) -> RecordTable {
        let timer = SpanTimer::start(&self.name);
        self.sink.emit(
            events::PIPELINE_STARTED,
            Some(serde_json::json!({
                "pipeline": &self.name,
                "operations": self.steps.len(),
                "rows": initial.len(),
            })),
        );

        let table = self.steps.iter().fold(initial, |table, step| self.apply_step(step, table));

        let duration_ms = timer.finish();
        info!(pipeline = %self.name, rows = table.len(), duration_ms, "Pipeline completed");
        self.sink.emit(
            events::PIPELINE_COMPLETED,
            Some(serde_json::json!({
                "pipeline": &self.name,
                "rows": table.len(),
                "duration_ms": duration_ms,
            })),
        );

        table
    }

    fn apply_step(&self, step: &CompiledOperation, table: RecordTable) -> RecordTable {
        let rows_in = table.len();
        self.sink.emit(
            events::OPERATION_STARTED,
            Some(serde_json::json!({
                "position": step.position,
                "operator": &step.spec.operator,
                "function": &step.spec.function,
            })),
        );

        let timer = SpanTimer::start(step.spec.function.as_str());
        let output = step.transform.apply(table);
        let duration_ms = timer.finish();

        debug!(
            position = step.position,
            transform = %step.transform,
            rows_in,
            rows_out = output.len(),
            duration_ms,
            "Applied operation"
        );
        self.sink.emit(
            events::OPERATION_COMPLETED,
            Some(serde_json::json!({
                "position": step.position,
                "operator": &step.spec.operator,
                "function": &step.spec.function,
                "rows_in": rows_in,
                "rows_out": output.len(),
                "duration_ms": duration_ms,
            })),
        );

        output
    }
}

/// Validates `operations` and folds them over `initial`.
///
/// # Errors
///
/// Returns the first operation error; no partial result is produced.
pub fn run(initial: RecordTable, operations: &[OperationSpec]) -> Result<RecordTable> {
    let pipeline = operations
        .iter()
        .fold(PipelineBuilder::new("pipeline"), |builder, op| {
            builder.operation(op.operator.clone(), op.function.clone())
        })
        .build()?;
    Ok(pipeline.run(initial))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectingEventSink;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_filter_then_map() {
        let input = RecordTable::from_pairs(&[(1, 4), (1, 7), (2, 10)]);
        let ops = [
            OperationSpec::new("FILTER", "IS_EVEN"),
            OperationSpec::new("MAP", "ADD(1)"),
        ];
        let output = run(input, &ops).unwrap();
        assert_eq!(output.to_pairs(), vec![(1, 5), (2, 11)]);
    }

    #[test]
    fn test_run_reduce_sum() {
        let input = RecordTable::from_pairs(&[(1, 3), (1, 5), (2, 2)]);
        let output = run(input, &[OperationSpec::new("REDUCE", "SUM")]).unwrap();
        assert_eq!(output.to_pairs(), vec![(1, 8), (2, 2)]);
    }

    #[test]
    fn test_run_empty_is_identity() {
        let input = RecordTable::from_pairs(&[(2, 1), (1, 1)]);
        assert_eq!(run(input.clone(), &[]).unwrap(), input);
    }

    #[test]
    fn test_run_fails_without_partial_result() {
        let input = RecordTable::from_pairs(&[(1, 1)]);
        let ops = [
            OperationSpec::new("MAP", "ADD(1)"),
            OperationSpec::new("MAP", "EXP(2)"),
        ];
        let err = run(input, &ops).unwrap_err();
        assert!(err.to_string().contains("Operation #2"));
    }

    #[test]
    fn test_run_emits_lifecycle_events() {
        let sink = Arc::new(CollectingEventSink::new());
        let pipeline = PipelineBuilder::new("events")
            .with_event_sink(sink.clone())
            .operation("FILTER", "GT(1)")
            .operation("REDUCE", "COUNT")
            .build()
            .unwrap();

        let output = pipeline.run(RecordTable::from_pairs(&[(1, 1), (1, 2), (1, 3)]));
        assert_eq!(output.to_pairs(), vec![(1, 2)]);

        assert_eq!(
            sink.event_types(),
            vec![
                events::PIPELINE_STARTED,
                events::OPERATION_STARTED,
                events::OPERATION_COMPLETED,
                events::OPERATION_STARTED,
                events::OPERATION_COMPLETED,
                events::PIPELINE_COMPLETED,
            ]
        );

        let completed = sink.events_of_type(events::OPERATION_COMPLETED);
        let first = completed[0].1.as_ref().unwrap();
        assert_eq!(first["rows_in"], 3);
        assert_eq!(first["rows_out"], 2);
    }
}
