//! Interactive harness menu.

use super::{apply_operations, generate, validate, ApplyOutcome, GeneratorConfig, HarnessConfig, Validation};
use crate::errors::Result;
use crate::events::{EventSink, NoOpEventSink};
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;
use tracing::error;

const WELCOME: &str = "Welcome to our Fault Tolerant Dataflow Platform!";
const OPTIONS: &str = "\nPlease choose an option:\n\
    1. Generate data\n\
    2. Apply operations\n\
    3. Validate result\n\
    4. Exit";

/// State shared by the harness actions across one interactive session.
///
/// Remembers how many partitions were last generated so that a later
/// apply defaults to the same count.
pub struct Session {
    config: HarnessConfig,
    last_generated: Option<usize>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("last_generated", &self.last_generated)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session that has not generated anything yet.
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            last_generated: None,
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the event sink passed to every pipeline run.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the harness configuration.
    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Returns the partition count of the last generation, if any.
    #[must_use]
    pub fn last_generated(&self) -> Option<usize> {
        self.last_generated
    }

    /// Generates partitions and remembers the count.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails.
    pub fn generate(&mut self, generator: &GeneratorConfig) -> Result<usize> {
        let count = generate(&self.config.partitions(), generator)?;
        self.last_generated = Some(count);
        Ok(count)
    }

    /// Applies the program; `partitions` defaults to the last generated count.
    ///
    /// # Errors
    ///
    /// See [`apply_operations`].
    pub fn apply(&self, partitions: Option<usize>) -> Result<ApplyOutcome> {
        apply_operations(
            &self.config,
            partitions.or(self.last_generated),
            Arc::clone(&self.sink),
        )
    }

    /// Validates the result file against the expected file.
    ///
    /// # Errors
    ///
    /// See [`validate`].
    pub fn validate(&self) -> Result<Validation> {
        validate(&self.config.result_path, &self.config.expected_path)
    }
}

/// A line-oriented menu over any reader and writer.
pub struct Menu<R, W> {
    input: R,
    output: W,
    session: Session,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Creates a menu.
    pub fn new(input: R, output: W, session: Session) -> Self {
        Self {
            input,
            output,
            session,
        }
    }

    /// Returns the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until the user exits or the input ends.
    ///
    /// Failed actions are reported and the menu continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{WELCOME}")?;

        loop {
            writeln!(self.output, "{OPTIONS}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };

            let outcome = match choice.as_str() {
                "1" => self.generate_action(),
                "2" => self.apply_action(),
                "3" => self.validate_action(),
                "4" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };

            if let Err(err) = outcome {
                error!(code = err.code(), error = %err, "Action failed");
                writeln!(self.output, "Error: {err}")?;
            }
        }
    }

    fn generate_action(&mut self) -> Result<()> {
        let Some(keys) = self.ask::<usize>("Enter the number of keys: ")? else {
            return Ok(());
        };
        let Some(values_per_key) = self.ask::<usize>("Enter the number of values per key: ")? else {
            return Ok(());
        };
        let Some(max_value) = self.ask::<i64>("Enter the maximum value: ")? else {
            return Ok(());
        };

        let count = self
            .session
            .generate(&GeneratorConfig::new(keys, values_per_key, max_value))?;
        writeln!(self.output, "Generated {count} partitions.")?;
        Ok(())
    }

    fn apply_action(&mut self) -> Result<()> {
        let default = self
            .session
            .last_generated()
            .map_or_else(|| "program setting".to_string(), |n| n.to_string());
        let question = format!("Specify the number of partitions (default set to: {default}): ");
        let Some(answer) = self.prompt(&question)? else {
            return Ok(());
        };

        let partitions = if answer.is_empty() {
            None
        } else if let Ok(n) = answer.parse::<usize>() {
            Some(n)
        } else {
            writeln!(self.output, "Invalid number.")?;
            return Ok(());
        };

        match self.session.apply(partitions)? {
            ApplyOutcome::Completed(report) => writeln!(
                self.output,
                "Result written to {} ({} rows).",
                self.session.config().result_path.display(),
                report.output_rows
            )?,
            ApplyOutcome::NothingToProcess => writeln!(self.output, "No partitions to process.")?,
        }
        Ok(())
    }

    fn validate_action(&mut self) -> Result<()> {
        let outcome = self.session.validate()?;
        writeln!(self.output, "{outcome}")?;
        Ok(())
    }

    /// Prints `question` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`prompt`](Self::prompt) but parses the answer.
    fn ask<T: FromStr>(&mut self, question: &str) -> Result<Option<T>> {
        let Some(answer) = self.prompt(question)? else {
            return Ok(None);
        };
        match answer.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "Invalid number.")?;
                Ok(None)
            }
        }
    }
}
