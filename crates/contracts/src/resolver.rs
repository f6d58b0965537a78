//! TopicResolver trait - topic to function-identifier lookup
//!
//! Abstracts the subscription table so the dispatcher does not care whether
//! bindings come from a static config file or somewhere live.

use std::collections::HashMap;

use crate::TopicBinding;

/// Topic resolution capability
///
/// Must be safe for concurrent lookups from multiple in-flight dispatch
/// calls. The returned order is the invocation order.
pub trait TopicResolver: Send + Sync {
    /// Function identifiers subscribed to `topic`, in invocation order.
    /// Empty when nothing is subscribed.
    fn resolve(&self, topic: &str) -> Vec<String>;
}

/// In-memory exact-match resolver built from config topic bindings
#[derive(Debug, Clone, Default)]
pub struct TopicMap {
    entries: HashMap<String, Vec<String>>,
}

impl TopicMap {
    /// Build from `topic -> functions` pairs. Repeated topics append, keeping
    /// binding order.
    pub fn new(bindings: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for (topic, functions) in bindings {
            entries.entry(topic).or_default().extend(functions);
        }
        Self { entries }
    }

    /// Build from validated config bindings
    pub fn from_bindings(bindings: &[TopicBinding]) -> Self {
        Self::new(
            bindings
                .iter()
                .map(|b| (b.topic.clone(), b.functions.clone())),
        )
    }

    /// Number of distinct topics
    pub fn topic_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(topic, functions)` entries
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }
}

impl TopicResolver for TopicMap {
    fn resolve(&self, topic: &str) -> Vec<String> {
        self.entries.get(topic).cloned().unwrap_or_default()
    }
}
