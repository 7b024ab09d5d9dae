use url::Url;

/// "Go to question N of section S", taken from a tile at activation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    section: String,
    question_number: u32,
}

impl NavigationIntent {
    #[must_use]
    pub fn new(section: impl Into<String>, question_number: u32) -> Self {
        Self {
            section: section.into(),
            question_number,
        }
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn question_number(&self) -> u32 {
        self.question_number
    }

    /// The partial-content address: `start` with `subject` and `q` set.
    ///
    /// Other query parameters on `start` are kept; existing `subject`/`q`
    /// values are replaced.
    #[must_use]
    pub fn target_url(&self, start: &Url) -> Url {
        let mut url = start.clone();
        let kept: Vec<(String, String)> = start
            .query_pairs()
            .filter(|(key, _)| key != "subject" && key != "q")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.extend_pairs(kept);
            query.append_pair("subject", &self.section);
            query.append_pair("q", &self.question_number.to_string());
        }
        url
    }
}
