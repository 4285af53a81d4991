use crate::compliance::AnalysisResult;

/// Per-user state for the compliance tool.
///
/// Created empty, cleared when a new batch begins, appended to per
/// regulation analyzed.
#[derive(Debug, Default, Clone)]
pub struct Session {
    api_key: String,
    results: Vec<AnalysisResult>,
}

impl Session {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            results: Vec::new(),
        }
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Drop the results of any previous batch.
    pub fn begin_batch(&mut self) {
        self.results.clear();
    }

    pub fn record(&mut self, result: AnalysisResult) {
        self.results.push(result);
    }

    #[must_use]
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str) -> AnalysisResult {
        AnalysisResult {
            filename: name.into(),
            content: format!("report for {name}"),
        }
    }

    #[test]
    fn new_session_is_empty() {
        let session = Session::default();
        assert!(session.results().is_empty());
        assert!(!session.has_api_key());
    }

    #[test]
    fn blank_key_is_missing() {
        assert!(!Session::new("   ").has_api_key());
        assert!(Session::new("sk-1").has_api_key());
    }

    #[test]
    fn record_appends_in_order() {
        let mut session = Session::new("k");
        session.record(result("a.pdf"));
        session.record(result("b.docx"));
        let names: Vec<_> = session.results().iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, ["a.pdf", "b.docx"]);
    }

    #[test]
    fn begin_batch_clears_results_but_keeps_key() {
        let mut session = Session::new("k");
        session.record(result("a.pdf"));
        session.begin_batch();
        assert!(session.results().is_empty());
        assert_eq!(session.api_key(), "k");
    }
}
