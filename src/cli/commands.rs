//! Command implementations for the Palaver CLI.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ResponderConfig;
use crate::error::Result;
use crate::responder::Responder;
use crate::response::CommandGenerator;
use crate::session::Session;

/// Execute a CLI command.
pub fn execute_command(args: PalaverArgs) -> Result<()> {
    match &args.command {
        Command::Chat(chat_args) => chat(chat_args, &args),
        Command::Classify(classify_args) => classify(classify_args, &args),
        Command::Normalize(normalize_args) => normalize(normalize_args, &args),
    }
}

/// Load the configuration file, if any, and apply command line overrides.
pub fn load_config(args: &ResponderArgs) -> Result<ResponderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ResponderConfig::from_file(path)?
        }
        None => ResponderConfig::default(),
    };

    if let Some(reduction) = args.reduction {
        config = config.with_reduction(reduction.into());
    }
    Ok(config)
}

/// Run an interactive session on stdin/stdout.
fn chat(args: &ChatArgs, _cli_args: &PalaverArgs) -> Result<()> {
    let mut config = load_config(&args.responder)?;
    if args.seed.is_some() {
        config = config.with_seed(args.seed);
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_generator_timeout(Some(Duration::from_millis(timeout_ms)));
    }

    let responder = match &args.generator_cmd {
        Some(command_line) => {
            let generator = CommandGenerator::from_command_line(command_line)?
                .with_timeout(config.generator_timeout());
            Responder::builder(config.with_delegate(true))
                .generator(Arc::new(generator))
                .build()?
        }
        None => Responder::from_config(&config)?,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&responder).run(stdin.lock(), stdout.lock())
}

/// Classify the given utterances.
fn classify(args: &ClassifyArgs, cli_args: &PalaverArgs) -> Result<()> {
    let config = load_config(&args.responder)?;
    let responder = Responder::from_config(&config)?;

    let texts: Vec<&str> = args.texts.iter().map(String::as_str).collect();
    let intents = responder.classify_batch(&texts)?;

    let results = texts
        .iter()
        .zip(intents)
        .map(|(text, intent)| {
            let scores = if args.explain {
                Some(responder.explain(text)?)
            } else {
                None
            };
            Ok(ClassificationResult {
                text: text.to_string(),
                intent,
                scores,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    output_result(&ClassificationResults { results }, cli_args)
}

/// Show the normalized form of an utterance.
fn normalize(args: &NormalizeArgs, cli_args: &PalaverArgs) -> Result<()> {
    let config = load_config(&args.responder)?;
    let normalizer = config.normalizer();
    let utterance = normalizer.normalize(&args.text)?;

    output_result(
        &NormalizationResult {
            text: args.text.clone(),
            tokens: utterance.tokens,
            cleaned: utterance.cleaned,
            reducer: normalizer.reducer_name().to_string(),
        },
        cli_args,
    )
}
