//! Cheat sheet for the `suitefix guidance` command.
//!
//! The service tests are adapted to the mocked bean validator by hand; this
//! module only renders the patterns to follow.

use suitefix_domain::messages::ERROR_MESSAGES;
use suitefix_domain::mock::{Suggestion, TestSuggestion};

const RULE: &str =
    "================================================================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

/// One numbered pattern of the cheat sheet.
#[derive(Debug, Clone)]
pub struct GuidancePattern {
    pub title: &'static str,
    pub snippet: &'static str,
}

pub static PATTERNS: &[GuidancePattern] = &[
    GuidancePattern {
        title: "PASSING TESTS (no validation error)",
        snippet: r#"
        // After Arrange, before Act:
        when(mockValidator.validate(productDto)).thenReturn(Set.of());

        // In Assert, before verifying the repository:
        verify(mockValidator, times(1)).validate(productDto);
"#,
    },
    GuidancePattern {
        title: "FAILING TESTS (validation error)",
        snippet: r#"
        // After Arrange, before Act:
        ConstraintViolation<ProductDto> violation = mock(ConstraintViolation.class);
        when(violation.getMessage()).thenReturn("Error message here");
        when(mockValidator.validate(productDto)).thenReturn(Set.of(violation));

        // In Assert, before verifying the repository:
        verify(mockValidator, times(1)).validate(productDto);
"#,
    },
];

pub const NOTES: [&str; 3] = [
    "GetProduct, DeleteProduct and GetAllProducts tests do NOT need a validator mock",
    "Only CreateProduct and UpdateProduct tests need a validator mock",
    "Category validation still goes through Category.isValid(), outside Bean Validation",
];

pub fn render_guidance() -> String {
    let mut out = String::new();
    out.push_str(&format!("{RULE}\nPRODUCTSERVICETEST UPDATE GUIDE\n{RULE}\n\n"));
    out.push_str("This command only prints guidance for updating the test cases.\n");
    out.push_str("The test bodies vary too much to rewrite safely; update each test by hand.\n\n");
    out.push_str(&format!("PATTERNS TO APPLY:\n{RULE}\n\n"));

    for (i, pattern) in PATTERNS.iter().enumerate() {
        out.push_str(&format!("{}. {}:\n{THIN_RULE}\n", i + 1, pattern.title));
        out.push_str(pattern.snippet);
        out.push('\n');
    }

    out.push_str(&format!(
        "{}. CANONICAL ERROR MESSAGES:\n{THIN_RULE}\n",
        PATTERNS.len() + 1
    ));
    for message in ERROR_MESSAGES {
        out.push_str(&format!("  - \"{message}\"\n"));
    }
    out.push('\n');

    out.push_str(&format!("{RULE}\nNOTES:\n"));
    for note in NOTES {
        out.push_str(&format!("  - {note}\n"));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

/// Per-test suggestions for one file, as printed by `guidance --suggest`.
pub fn render_suggestions(file: &str, suggestions: &[TestSuggestion]) -> String {
    let mut out = format!("\n{file}\n{THIN_RULE}\n");
    if suggestions.is_empty() {
        out.push_str("  no test needs a validator mock\n");
        return out;
    }

    for s in suggestions {
        match &s.suggestion {
            Suggestion::SuccessStub => {
                out.push_str(&format!("  {}: stub an empty violation set\n", s.test));
            }
            Suggestion::Violation { message } => {
                out.push_str(&format!("  {}: stub violation \"{message}\"\n", s.test));
            }
            Suggestion::UnknownMessage { message } => {
                out.push_str(&format!(
                    "  {}: asserts \"{message}\", which is not a canonical message; fix by hand\n",
                    s.test
                ));
            }
        }
        if let Some(snippet) = s.suggestion.snippet() {
            out.push_str(&snippet);
        }
    }
    out
}
