//! Canned reply lists per intent.

use std::collections::BTreeMap;

use log::warn;

use crate::error::{PalaverError, Result};
use crate::intent::{Intent, IntentMap};

/// Raw reply lists, as found in configuration.
pub type ResponseLists = BTreeMap<Intent, Vec<String>>;

/// Validated reply lists keyed by [`Intent`].
///
/// Every list is non-empty and [`Intent::Fallback`] always has one; intents
/// without their own list are answered from the fallback list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseTable {
    responses: IntentMap<Vec<String>>,
}

impl ResponseTable {
    /// Validate `lists` into a table.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the fallback list is missing, or
    /// when any list is empty or holds a blank reply.
    pub fn new(lists: &ResponseLists) -> Result<Self> {
        let mut responses = IntentMap::new();

        for (&intent, replies) in lists {
            if replies.is_empty() {
                return Err(PalaverError::config(format!(
                    "intent '{intent}' has an empty response list"
                )));
            }
            if replies.iter().any(|reply| reply.trim().is_empty()) {
                return Err(PalaverError::config(format!(
                    "intent '{intent}' has a blank response"
                )));
            }
            responses.insert(intent, replies.clone());
        }

        if !responses.contains(Intent::Fallback) {
            return Err(PalaverError::config(
                "responses for 'fallback' are required",
            ));
        }

        for intent in Intent::ALL {
            if !responses.contains(intent) {
                warn!("Intent '{intent}' has no responses of its own; fallback replies will be used");
            }
        }

        Ok(ResponseTable { responses })
    }

    /// Candidate replies for `intent`, never empty.
    pub fn candidates(&self, intent: Intent) -> &[String] {
        self.responses
            .get(intent)
            .or_else(|| self.responses.get(Intent::Fallback))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `intent` has a list of its own.
    pub fn has_own(&self, intent: Intent) -> bool {
        self.responses.contains(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(entries: &[(Intent, &[&str])]) -> ResponseLists {
        entries
            .iter()
            .map(|(intent, replies)| (*intent, replies.iter().map(|r| r.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_candidates() {
        let table = ResponseTable::new(&lists(&[
            (Intent::Greeting, &["Hello!", "Hi there!"]),
            (Intent::Fallback, &["Come again?"]),
        ]))
        .unwrap();

        assert_eq!(table.candidates(Intent::Greeting), ["Hello!", "Hi there!"]);
        assert!(table.has_own(Intent::Greeting));
    }

    #[test]
    fn test_missing_intent_uses_fallback() {
        let table = ResponseTable::new(&lists(&[(Intent::Fallback, &["Come again?"])])).unwrap();

        assert_eq!(table.candidates(Intent::Joke), ["Come again?"]);
        assert!(!table.has_own(Intent::Joke));
    }

    #[test]
    fn test_fallback_required() {
        let err = ResponseTable::new(&lists(&[(Intent::Greeting, &["Hello!"])])).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_empty_or_blank_lists_rejected() {
        let err = ResponseTable::new(&lists(&[(Intent::Fallback, &[])])).unwrap_err();
        assert!(err.to_string().contains("empty response list"));

        let err = ResponseTable::new(&lists(&[(Intent::Fallback, &["  "])])).unwrap_err();
        assert!(err.to_string().contains("blank response"));
    }
}
