//! Pipeline builder with validation.

use super::executor::{CompiledOperation, Pipeline};
use super::{OperationSpec, PipelineConfig};
use crate::core::{OperatorKind, TruncationPolicy};
use crate::errors::{DataflowError, Result};
use crate::events::{self, EventSink, NoOpEventSink};
use crate::operators::Transform;
use std::sync::Arc;
use tracing::debug;

/// Builder for creating validated pipelines.
///
/// Every operation is resolved to a [`Transform`] in [`build`](Self::build),
/// so an unsupported name or bad parameter fails before any data is read.
#[derive(Clone)]
pub struct PipelineBuilder {
    /// The pipeline name.
    name: String,
    /// The operations, in declared order.
    operations: Vec<OperationSpec>,
    /// Division truncation policy.
    policy: TruncationPolicy,
    /// Where lifecycle events go.
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("name", &self.name)
            .field("operations", &self.operations)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl PipelineBuilder {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
            policy: TruncationPolicy::default(),
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Creates a builder holding every operation of a configuration.
    #[must_use]
    pub fn from_config(name: impl Into<String>, config: &PipelineConfig) -> Self {
        let mut builder = Self::new(name);
        builder.operations.extend(config.operations.iter().cloned());
        builder
    }

    /// Appends an operation.
    #[must_use]
    pub fn operation(mut self, operator: impl Into<String>, function: impl Into<String>) -> Self {
        self.operations.push(OperationSpec::new(operator, function));
        self
    }

    /// Sets the truncation policy used by DIVIDE.
    #[must_use]
    pub fn with_truncation(mut self, policy: TruncationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Builds the pipeline.
    ///
    /// An empty operation list is valid and yields the identity pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`DataflowError::AtOperation`] wrapping the first
    /// unsupported operator, unsupported function, parameter conversion
    /// failure or division by zero.
    pub fn build(self) -> Result<Pipeline> {
        let mut steps = Vec::with_capacity(self.operations.len());

        for (index, spec) in self.operations.into_iter().enumerate() {
            let position = index + 1;
            match compile(&spec, self.policy) {
                Ok(transform) => {
                    debug!(position, operator = %spec.operator, function = %spec.function, "Compiled operation");
                    steps.push(CompiledOperation {
                        position,
                        spec,
                        transform,
                    });
                }
                Err(err) => {
                    self.sink.emit(
                        events::OPERATION_FAILED,
                        Some(serde_json::json!({
                            "pipeline": &self.name,
                            "position": position,
                            "operator": &spec.operator,
                            "function": &spec.function,
                            "error": err.to_string(),
                        })),
                    );
                    return Err(err.at_operation(position, spec.operator, spec.function));
                }
            }
        }

        Ok(Pipeline::new(self.name, steps, self.sink))
    }
}

fn compile(spec: &OperationSpec, policy: TruncationPolicy) -> Result<Transform> {
    let kind: OperatorKind = spec.operator.parse()?;
    Transform::compile(kind, &spec.function, policy)
}
