//! Response selector.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, warn};

use crate::intent::Intent;

use super::chooser::{Chooser, RandomChooser};
use super::generator::ResponseGenerator;
use super::table::ResponseTable;

/// Reply used when a generator fails and no other apology is configured.
pub const DEFAULT_APOLOGY: &str =
    "Sorry, I had trouble coming up with a reply. Could you try again?";

/// Turns an intent into reply text.
///
/// Without a generator the reply is a uniform pick from the intent's canned
/// list. With a generator every reply is delegated to it, and any failure is
/// answered with the apology.
pub struct ResponseSelector {
    table: ResponseTable,
    chooser: Arc<dyn Chooser>,
    generator: Option<Arc<dyn ResponseGenerator>>,
    apology: String,
}

impl ResponseSelector {
    pub fn new(table: ResponseTable) -> Self {
        ResponseSelector {
            table,
            chooser: Arc::new(RandomChooser::new()),
            generator: None,
            apology: DEFAULT_APOLOGY.to_string(),
        }
    }

    pub fn with_chooser(mut self, chooser: Arc<dyn Chooser>) -> Self {
        self.chooser = chooser;
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn ResponseGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_apology<S: Into<String>>(mut self, apology: S) -> Self {
        self.apology = apology.into();
        self
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    pub fn apology(&self) -> &str {
        &self.apology
    }

    pub fn is_delegating(&self) -> bool {
        self.generator.is_some()
    }

    /// Reply to `original`, which was classified as `intent`.
    pub fn respond(&self, intent: Intent, original: &str) -> String {
        match &self.generator {
            Some(generator) => self.delegate(generator.as_ref(), original),
            None => self.pick(intent),
        }
    }

    fn pick(&self, intent: Intent) -> String {
        let candidates = self.table.candidates(intent);
        let index = self.chooser.choose(candidates.len());
        candidates
            .get(index)
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| self.apology.clone())
    }

    fn delegate(&self, generator: &dyn ResponseGenerator, original: &str) -> String {
        match panic::catch_unwind(AssertUnwindSafe(|| generator.generate(original))) {
            Ok(Ok(reply)) if !reply.trim().is_empty() => {
                debug!("Generator '{}' answered {} bytes", generator.name(), reply.len());
                reply
            }
            Ok(Ok(_)) => {
                warn!("Generator '{}' returned an empty reply", generator.name());
                self.apology.clone()
            }
            Ok(Err(e)) => {
                warn!("Generator '{}' failed: {e:#}", generator.name());
                self.apology.clone()
            }
            Err(_) => {
                warn!("Generator '{}' panicked", generator.name());
                self.apology.clone()
            }
        }
    }
}

impl fmt::Debug for ResponseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseSelector")
            .field("table", &self.table)
            .field("chooser", &self.chooser.name())
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .field("apology", &self.apology)
            .finish()
    }
}
