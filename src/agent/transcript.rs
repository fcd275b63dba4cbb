//! Cross-query conversation history.

/// Append-only list of completed query/answer pairs, oldest first.
///
/// Owned by the driver; the agent loop only reads it.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished query. Failed queries are recorded with an empty answer.
    pub fn record(&mut self, query: &str, answer: &str) {
        self.entries
            .push(format!("Query: {}\nAnswer: {}\n", query, answer));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// History text for the prompt.
    pub fn render(&self) -> String {
        self.entries.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.render(), "");

        transcript.record("几点了", "12:00");
        transcript.record("天气", "");

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.entries()[0], "Query: 几点了\nAnswer: 12:00\n");
        assert_eq!(
            transcript.render(),
            "Query: 几点了\nAnswer: 12:00\n\nQuery: 天气\nAnswer: \n"
        );
    }
}
