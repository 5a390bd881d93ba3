//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;

use crate::cli::args::{OutputFormat, PalaverArgs};
use crate::error::Result;
use crate::intent::{Intent, IntentScores};

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn write_human(&self, writer: &mut dyn Write, verbosity: u8) -> Result<()>;
}

/// Classification of one utterance.
#[derive(Debug, Serialize)]
pub struct ClassificationResult {
    pub text: String,
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<IntentScores>,
}

/// Classification of every utterance given on the command line.
#[derive(Debug, Serialize)]
pub struct ClassificationResults {
    pub results: Vec<ClassificationResult>,
}

impl HumanOutput for ClassificationResults {
    fn write_human(&self, writer: &mut dyn Write, _verbosity: u8) -> Result<()> {
        let width = self
            .results
            .iter()
            .map(|r| r.text.chars().count())
            .max()
            .unwrap_or(0);

        for result in &self.results {
            write!(writer, "{:<width$}  {}", result.text, result.intent)?;
            if let Some(scores) = &result.scores {
                write!(writer, "  [{scores}]")?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// Normalized form of one utterance.
#[derive(Debug, Serialize)]
pub struct NormalizationResult {
    pub text: String,
    pub tokens: Vec<String>,
    pub cleaned: String,
    pub reducer: String,
}

impl HumanOutput for NormalizationResult {
    fn write_human(&self, writer: &mut dyn Write, verbosity: u8) -> Result<()> {
        if verbosity > 1 {
            writeln!(writer, "reducer: {}", self.reducer)?;
        }
        writeln!(writer, "tokens:  {}", self.tokens.join(" "))?;
        writeln!(writer, "cleaned: {}", self.cleaned)?;
        Ok(())
    }
}

/// Write a result to stdout in the format selected on the command line.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &PalaverArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_result(&mut handle, result, args.output_format, args.pretty, args.verbosity())
}

/// Write a result to `writer` in `format`.
pub fn write_result<T: Serialize + HumanOutput>(
    writer: &mut dyn Write,
    result: &T,
    format: OutputFormat,
    pretty: bool,
    verbosity: u8,
) -> Result<()> {
    match format {
        OutputFormat::Human => result.write_human(writer, verbosity),
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(writer, "{json}")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> ClassificationResults {
        ClassificationResults {
            results: vec![
                ClassificationResult {
                    text: "hi".to_string(),
                    intent: Intent::Greeting,
                    scores: None,
                },
                ClassificationResult {
                    text: "weather?".to_string(),
                    intent: Intent::Fallback,
                    scores: None,
                },
            ],
        }
    }

    fn render<T: Serialize + HumanOutput>(result: &T, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_result(&mut buffer, result, format, false, 1).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_human_classification() {
        let output = render(&results(), OutputFormat::Human);
        assert_eq!(output, "hi        greeting\nweather?  fallback\n");
    }

    #[test]
    fn test_json_classification() {
        let output = render(&results(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["results"][0]["intent"], "greeting");
        assert!(value["results"][0].get("scores").is_none());
    }

    #[test]
    fn test_human_normalization() {
        let result = NormalizationResult {
            text: "Hello there!".to_string(),
            tokens: vec!["hello".to_string()],
            cleaned: "hello there".to_string(),
            reducer: "porter".to_string(),
        };
        let output = render(&result, OutputFormat::Human);

        assert_eq!(output, "tokens:  hello\ncleaned: hello there\n");
    }
}
