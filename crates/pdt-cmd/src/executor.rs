//! Command executor
//!
//! Parses and dispatches commands against a GeometryDocument implementation,
//! recording failures in the settings and forwarding them to an error sink.

use pdt_mesh::GeometryDocument;
use pdt_settings::SceneSettings;

use crate::commands::dispatch;
use crate::context::CommandContext;
use crate::error::CmdResult;
use crate::outcome::Outcome;
use crate::parser::{parse_command, NumberPolicy};
use crate::sink::{ErrorSink, LogSink};

/// Command executor
pub struct CommandExecutor {
    sink: Box<dyn ErrorSink>,
    /// Whether to suppress outcome messages
    quiet: bool,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    /// Create an executor that reports errors to the log
    pub fn new() -> Self {
        Self {
            sink: Box::new(LogSink),
            quiet: false,
        }
    }

    /// Builder: report errors to `sink`
    pub fn with_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Builder: set the quiet flag
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Execute a single command string
    ///
    /// On failure the message is stored in `settings.last_error`, reported to
    /// the sink and returned; the document is left unchanged.
    ///
    /// # Example
    /// ```
    /// use pdt_cmd::CommandExecutor;
    /// use pdt_mesh::{ActiveObjectProvider, Scene};
    /// use pdt_settings::SceneSettings;
    ///
    /// let mut scene = Scene::new();
    /// let mut settings = SceneSettings::new();
    /// let mut executor = CommandExecutor::new();
    ///
    /// executor.execute(&mut scene, &mut settings, "CA1,2,3").unwrap();
    /// assert_eq!(scene.cursor_location().y, 2.0);
    ///
    /// assert!(executor.execute(&mut scene, &mut settings, "XA1,2,3").is_err());
    /// assert!(settings.has_error());
    /// ```
    pub fn execute(
        &mut self,
        doc: &mut dyn GeometryDocument,
        settings: &mut SceneSettings,
        input: &str,
    ) -> CmdResult<Outcome> {
        settings.clear_error();

        let result = self.run(doc, settings, input);
        if let Err(e) = &result {
            let message = e.to_string();
            log::warn!("Command '{}' rejected: {}", input.trim(), message);
            settings.record_error(message.clone());
            self.sink.report(e.kind(), &message);
        }
        result
    }

    fn run(
        &mut self,
        doc: &mut dyn GeometryDocument,
        settings: &mut SceneSettings,
        input: &str,
    ) -> CmdResult<Outcome> {
        let policy = NumberPolicy::from_strict(settings.strict_numbers);
        let parsed = parse_command(input, policy)?;
        log::debug!("Parsed '{}' as {:?}", input.trim(), parsed);

        let mut ctx = CommandContext::new(doc, settings).with_quiet(self.quiet);
        let outcome = dispatch(&mut ctx, &parsed)?;
        ctx.print(&outcome.to_string());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CmdError, ErrorKind, ParseError};
    use crate::sink::CollectingSink;
    use pdt_mesh::{ActiveObjectProvider, Scene};
    use std::sync::Arc;

    #[test]
    fn test_error_recorded_and_reported() {
        let sink = Arc::new(CollectingSink::new());
        let mut executor = CommandExecutor::new()
            .with_quiet(true)
            .with_sink(Arc::clone(&sink));
        let mut scene = Scene::new();
        let mut settings = SceneSettings::new();

        let err = executor.execute(&mut scene, &mut settings, "CA").unwrap_err();
        assert_eq!(err, CmdError::Parse(ParseError::TooShort));
        assert_eq!(settings.last_error, err.to_string());
        assert_eq!(sink.take()[0].0, ErrorKind::Format);
    }

    #[test]
    fn test_success_clears_error() {
        let mut executor = CommandExecutor::new().with_quiet(true);
        let mut scene = Scene::new();
        let mut settings = SceneSettings::new();
        settings.record_error("stale");

        executor.execute(&mut scene, &mut settings, "CA0,0,1").unwrap();
        assert!(!settings.has_error());
        assert_eq!(scene.cursor_location().z, 1.0);
    }
}
