use crate::rewrites::Rewrite;

pub const EXPECT_UNAUTHORIZED: &str = ".andExpect(status().isUnauthorized())";
pub const EXPECT_BAD_REQUEST: &str = ".andExpect(status().isBadRequest())";

/// Swaps one literal status expectation for another, everywhere in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusExpectationRewrite {
    pub from: String,
    pub to: String,
}

impl StatusExpectationRewrite {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Injection payloads are rejected by validation, so expect 400 instead of 401.
    pub fn unauthorized_to_bad_request() -> Self {
        Self::new(EXPECT_UNAUTHORIZED, EXPECT_BAD_REQUEST)
    }

    /// Occurrences of the old expectation in `text`.
    pub fn count(&self, text: &str) -> usize {
        if self.from.is_empty() {
            return 0;
        }
        text.matches(self.from.as_str()).count()
    }
}

impl Default for StatusExpectationRewrite {
    fn default() -> Self {
        Self::unauthorized_to_bad_request()
    }
}

impl Rewrite for StatusExpectationRewrite {
    fn id(&self) -> &'static str {
        "status_expectation"
    }

    fn apply(&self, text: &str) -> String {
        if self.from.is_empty() {
            return text.to_string();
        }
        text.replace(self.from.as_str(), &self.to)
    }
}
