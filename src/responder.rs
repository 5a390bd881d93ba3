//! The responder: normalizer, classifier and selector wired together.
//!
//! # Examples
//!
//! ```
//! use palaver::config::ResponderConfig;
//! use palaver::intent::Intent;
//! use palaver::responder::Responder;
//!
//! let responder = Responder::from_config(&ResponderConfig::default().with_seed(Some(1))).unwrap();
//! let reply = responder.reply("Hello there!").unwrap();
//!
//! assert_eq!(reply.intent, Intent::Greeting);
//! assert!(["Hello!", "Hi there!", "Greetings!"].contains(&reply.text.as_str()));
//! ```

use std::fmt;
use std::sync::Arc;

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{NormalizedUtterance, Normalizer};
use crate::config::ResponderConfig;
use crate::error::{PalaverError, Result};
use crate::intent::{Intent, IntentClassifier, IntentLexicon, IntentScores, KeywordIntentClassifier};
use crate::response::{
    Chooser, RandomChooser, ResponseGenerator, ResponseSelector, ResponseTable, TimeoutGenerator,
};

/// One answered turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
}

/// Builder for [`Responder`].
pub struct ResponderBuilder {
    config: ResponderConfig,
    generator: Option<Arc<dyn ResponseGenerator>>,
    chooser: Option<Arc<dyn Chooser>>,
}

impl ResponderBuilder {
    pub fn new(config: ResponderConfig) -> Self {
        ResponderBuilder {
            config,
            generator: None,
            chooser: None,
        }
    }

    /// External generator, used only when the configuration delegates.
    pub fn generator(mut self, generator: Arc<dyn ResponseGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Replace the seeded random chooser.
    pub fn chooser(mut self, chooser: Arc<dyn Chooser>) -> Self {
        self.chooser = Some(chooser);
        self
    }

    /// Validate the configuration and build the responder.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error on an invalid lexicon or response
    /// table, or when the configuration delegates but no generator was given.
    pub fn build(self) -> Result<Responder> {
        let ResponderBuilder {
            config,
            generator,
            chooser,
        } = self;

        let normalizer = config.normalizer();
        let lexicon = IntentLexicon::build(&config.keywords, &normalizer)?;
        let classifier = KeywordIntentClassifier::new(Arc::new(lexicon));

        let table = ResponseTable::new(&config.responses)?;
        let chooser = chooser.unwrap_or_else(|| Arc::new(RandomChooser::from_seed(config.seed)));
        let mut selector = ResponseSelector::new(table)
            .with_chooser(chooser)
            .with_apology(config.apology.clone());

        match (config.delegate, generator) {
            (true, Some(generator)) => {
                let generator: Arc<dyn ResponseGenerator> = match config.generator_timeout() {
                    Some(timeout) => Arc::new(TimeoutGenerator::new(generator, timeout)),
                    None => generator,
                };
                info!("Delegating replies to generator '{}'", generator.name());
                selector = selector.with_generator(generator);
            }
            (true, None) => {
                return Err(PalaverError::config(
                    "delegate is enabled but no response generator was provided",
                ));
            }
            (false, Some(generator)) => {
                warn!(
                    "Ignoring generator '{}' because delegate is disabled",
                    generator.name()
                );
            }
            (false, None) => {}
        }

        info!(
            "Responder ready: {} reducer, {} triggers",
            normalizer.reducer_name(),
            classifier.lexicon().len()
        );

        Ok(Responder {
            normalizer,
            classifier,
            selector,
            greeting_message: config.greeting_message,
            closing_message: config.closing_message,
        })
    }
}

/// Answers utterances. Immutable once built and safe to share across threads.
pub struct Responder {
    normalizer: Normalizer,
    classifier: KeywordIntentClassifier,
    selector: ResponseSelector,
    greeting_message: String,
    closing_message: String,
}

impl Responder {
    pub fn builder(config: ResponderConfig) -> ResponderBuilder {
        ResponderBuilder::new(config)
    }

    /// Build a responder without a generator.
    pub fn from_config(config: &ResponderConfig) -> Result<Self> {
        ResponderBuilder::new(config.clone()).build()
    }

    pub fn normalize(&self, text: &str) -> Result<NormalizedUtterance> {
        self.normalizer.normalize(text)
    }

    pub fn classify(&self, text: &str) -> Result<Intent> {
        let utterance = self.normalize(text)?;
        Ok(self.classifier.predict(&utterance))
    }

    /// Per-intent trigger counts behind [`Responder::classify`].
    pub fn explain(&self, text: &str) -> Result<IntentScores> {
        let utterance = self.normalize(text)?;
        Ok(self.classifier.explain(&utterance))
    }

    /// Classify many utterances in parallel. Results keep input order.
    pub fn classify_batch(&self, texts: &[&str]) -> Result<Vec<Intent>> {
        texts.par_iter().map(|text| self.classify(text)).collect()
    }

    /// Normalize, classify and answer one utterance.
    pub fn reply(&self, text: &str) -> Result<Reply> {
        let intent = self.classify(text)?;
        let text = self.selector.respond(intent, text);
        Ok(Reply { intent, text })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &KeywordIntentClassifier {
        &self.classifier
    }

    pub fn selector(&self) -> &ResponseSelector {
        &self.selector
    }

    pub fn greeting_message(&self) -> &str {
        &self.greeting_message
    }

    pub fn closing_message(&self) -> &str {
        &self.closing_message
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("normalizer", &self.normalizer)
            .field("classifier", &self.classifier.name())
            .field("selector", &self.selector)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::FnGenerator;

    fn responder() -> Responder {
        Responder::from_config(&ResponderConfig::default().with_seed(Some(11))).unwrap()
    }

    #[test]
    fn test_default_intents() {
        let responder = responder();

        assert_eq!(responder.classify("Hey, howdy!").unwrap(), Intent::Greeting);
        assert_eq!(responder.classify("Goodbye for now").unwrap(), Intent::Farewell);
        assert_eq!(responder.classify("That was hilarious").unwrap(), Intent::Joke);
        assert_eq!(responder.classify("Thank you so much").unwrap(), Intent::Thanks);
        assert_eq!(responder.classify("What's the weather today?").unwrap(), Intent::Fallback);
    }

    #[test]
    fn test_reply_comes_from_table() {
        let responder = responder();
        let reply = responder.reply("tell me a joke").unwrap();

        assert_eq!(reply.intent, Intent::Joke);
        assert!(
            responder
                .selector()
                .table()
                .candidates(Intent::Joke)
                .contains(&reply.text)
        );
    }

    #[test]
    fn test_classify_batch_keeps_order() {
        let responder = responder();
        let intents = responder
            .classify_batch(&["hi", "bye", "lol what", "thanks", "make me laugh"])
            .unwrap();

        assert_eq!(
            intents,
            vec![
                Intent::Greeting,
                Intent::Farewell,
                Intent::Fallback,
                Intent::Thanks,
                Intent::Joke
            ]
        );
    }

    #[test]
    fn test_delegate_without_generator_fails() {
        let config = ResponderConfig::default().with_delegate(true);
        let err = Responder::builder(config).build().unwrap_err();

        assert!(err.is_config());
    }

    #[test]
    fn test_generator_ignored_without_delegate() {
        let generator = Arc::new(FnGenerator::new("echo", |text: &str| Ok(text.to_string())));
        let responder = Responder::builder(ResponderConfig::default())
            .generator(generator)
            .build()
            .unwrap();

        assert!(!responder.selector().is_delegating());
    }

    #[test]
    fn test_delegated_reply() {
        let generator = Arc::new(FnGenerator::new("echo", |text: &str| Ok(format!(">> {text}"))));
        let responder = Responder::builder(ResponderConfig::default().with_delegate(true))
            .generator(generator)
            .build()
            .unwrap();

        let reply = responder.reply("What's the weather today?").unwrap();
        assert_eq!(reply.intent, Intent::Fallback);
        assert_eq!(reply.text, ">> What's the weather today?");
    }

    #[test]
    fn test_responder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Responder>();
    }
}
