//! Mock name parser for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::parser::{NameParser, ParsedFacts};

/// Mock implementation of the `NameParser` trait.
///
/// Returns pre-configured facts per name and records every name parsed.
/// Unknown names get default (empty) facts.
#[derive(Debug, Default)]
pub struct MockParser {
    canned: Mutex<HashMap<String, ParsedFacts>>,
    seen: Mutex<Vec<String>>,
}

impl MockParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the facts returned for one exact name.
    pub fn set_facts(&self, name: &str, facts: ParsedFacts) {
        self.canned.lock().unwrap().insert(name.to_string(), facts);
    }

    /// Names parsed so far, in order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl NameParser for MockParser {
    fn parse(&self, name: &str) -> ParsedFacts {
        self.seen.lock().unwrap().push(name.to_string());
        self.canned
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}
