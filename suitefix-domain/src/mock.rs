//! Helpers for adapting service tests to a mocked bean validator.
//!
//! None of these touch the filesystem. They either answer questions about a
//! test body or return a new body with the validator stubs inserted.

use crate::messages::violation_message;
use regex::Regex;
use std::sync::LazyLock;

static CONTAINS_ASSERTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"contains\("([^"]+)"\)"#).expect("regex for contains assertion")
});

static TEST_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"void\s+(\w+)\s*\(").expect("regex for test method name"));

const VERIFY_VALIDATOR: &str = "verify(mockValidator, times(1)).validate(productDto);";
const VERIFY_NEVER_SAVED: &str = "verify(productRepository, never()).save(any())";
const VERIFY_SAVED_ONCE: &str = "verify(productRepository, times(1)).save(any(Product.class))";

/// Stub for tests where validation passes.
pub const SUCCESS_STUB: &str = "\n            // Validator stub: no violations\n            when(mockValidator.validate(productDto)).thenReturn(Set.of());\n";

/// True when a test exercises create/update and has no validator stub yet.
pub fn needs_validator_mock(test: &str) -> bool {
    if test.contains("mockValidator.validate") {
        return false;
    }
    test.contains("createProduct(") || test.contains("updateProduct(")
}

/// The message of the first `contains("...")` assertion.
pub fn expected_message(test: &str) -> Option<&str> {
    CONTAINS_ASSERTION
        .captures(test)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Stub that makes the validator report one violation with `message`.
/// Only canonical messages get a stub.
pub fn violation_mock(message: &str) -> Option<String> {
    let message = violation_message(message)?;
    Some(format!(
        "\n            // Validator stub: one violation\n            \
         ConstraintViolation<ProductDto> violation = mock(ConstraintViolation.class);\n            \
         when(violation.getMessage()).thenReturn(\"{message}\");\n            \
         when(mockValidator.validate(productDto)).thenReturn(Set.of(violation));\n"
    ))
}

/// Adds a validator `verify` in front of the repository `verify`.
pub fn insert_validator_verify(test: &str) -> String {
    if test.contains("verify(mockValidator") {
        return test.to_string();
    }
    for anchor in [VERIFY_NEVER_SAVED, VERIFY_SAVED_ONCE] {
        if test.contains(anchor) {
            return test.replace(
                anchor,
                &format!("{VERIFY_VALIDATOR}\n            {anchor}"),
            );
        }
    }
    test.to_string()
}

/// Inserts [`SUCCESS_STUB`] right before the `// Act` line of a create test.
pub fn insert_success_mock(test: &str) -> String {
    if test.contains("mockValidator.validate") {
        return test.to_string();
    }
    if !test.contains("// Arrange") || !test.contains("createProduct(") {
        return test.to_string();
    }

    let mut lines: Vec<&str> = test.split('\n').collect();
    // A `// Act` on the very first line has no arrange section above it.
    match lines.iter().position(|l| l.contains("// Act")) {
        Some(act) if act > 0 => {
            lines.insert(act, SUCCESS_STUB);
            lines.join("\n")
        }
        _ => test.to_string(),
    }
}

/// One `@Test` method of a test class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase<'a> {
    pub name: &'a str,
    pub body: &'a str,
}

/// Splits a test class at its `@Test` annotations. Text before the first
/// annotation is not part of any case.
pub fn split_tests(source: &str) -> Vec<TestCase<'_>> {
    let starts: Vec<usize> = source.match_indices("@Test").map(|(i, _)| i).collect();
    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(source.len());
            let body = &source[start..end];
            let name = TEST_METHOD
                .captures(body)
                .and_then(|caps| caps.get(1))
                .map_or("<unnamed>", |m| m.as_str());
            TestCase { name, body }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// Validation passes; stub an empty violation set.
    SuccessStub,
    /// Validation fails with a canonical message.
    Violation { message: &'static str },
    /// The test asserts a message the validator does not produce.
    UnknownMessage { message: String },
}

impl Suggestion {
    pub fn snippet(&self) -> Option<String> {
        match self {
            Suggestion::SuccessStub => Some(SUCCESS_STUB.to_string()),
            Suggestion::Violation { message } => violation_mock(message),
            Suggestion::UnknownMessage { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuggestion {
    pub test: String,
    pub suggestion: Suggestion,
}

/// Suggestions for every test in `source` that still needs a validator stub.
pub fn suggest(source: &str) -> Vec<TestSuggestion> {
    split_tests(source)
        .into_iter()
        .filter(|case| needs_validator_mock(case.body))
        .map(|case| {
            let suggestion = match expected_message(case.body) {
                Some(msg) => match violation_message(msg) {
                    Some(message) => Suggestion::Violation { message },
                    None => Suggestion::UnknownMessage {
                        message: msg.to_string(),
                    },
                },
                None => Suggestion::SuccessStub,
            };
            TestSuggestion {
                test: case.name.to_string(),
                suggestion,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FAILING_TEST: &str = r#"    @Test
    void createProduct_emptyName_fails() {
        // Arrange
        productDto.setProductName("");

        // Act
        Exception ex = assertThrows(IllegalArgumentException.class,
            () -> productService.createProduct(productDto));

        // Assert
        assertTrue(ex.getMessage().contains("Product Name không được rỗng"));
        verify(productRepository, never()).save(any());
    }
"#;

    const PASSING_TEST: &str = r#"    @Test
    void createProduct_valid_saves() {
        // Arrange
        when(productRepository.save(any(Product.class))).thenReturn(product);
        // Act
        ProductDto result = productService.createProduct(productDto);
        // Assert
        verify(productRepository, times(1)).save(any(Product.class));
    }
"#;

    #[test]
    fn needs_mock_only_for_create_and_update() {
        assert!(needs_validator_mock(FAILING_TEST));
        assert!(needs_validator_mock("productService.updateProduct(1L, dto)"));
        assert!(!needs_validator_mock("productService.getProduct(1L)"));
        assert!(!needs_validator_mock(
            "when(mockValidator.validate(productDto)); productService.createProduct(dto)"
        ));
    }

    #[test]
    fn expected_message_takes_first_contains() {
        assert_eq!(
            expected_message(FAILING_TEST),
            Some("Product Name không được rỗng")
        );
        assert_eq!(expected_message(PASSING_TEST), None);
    }

    #[test]
    fn violation_mock_only_for_known_messages() {
        let snippet = violation_mock("Price phải > 0").unwrap();
        assert!(snippet.contains("thenReturn(\"Price phải > 0\")"));
        assert!(snippet.contains("thenReturn(Set.of(violation))"));
        assert_eq!(violation_mock("nope"), None);
    }

    #[test]
    fn snippet_comments_are_english_and_messages_verbatim() {
        let snippet = violation_mock("Category không được rỗng").unwrap();
        assert!(snippet.contains("// Validator stub: one violation"));
        assert!(snippet.contains("\"Category không được rỗng\""));
        assert!(SUCCESS_STUB.contains("// Validator stub: no violations"));
    }

    #[test]
    fn verify_goes_before_never_saved() {
        let out = insert_validator_verify(FAILING_TEST);
        assert!(out.contains(
            "verify(mockValidator, times(1)).validate(productDto);\n            verify(productRepository, never()).save(any());"
        ));
        assert_eq!(insert_validator_verify(&out), out);
    }

    #[test]
    fn verify_goes_before_saved_once() {
        let out = insert_validator_verify(PASSING_TEST);
        assert!(out.contains(
            "verify(mockValidator, times(1)).validate(productDto);\n            verify(productRepository, times(1)).save(any(Product.class));"
        ));
    }

    #[test]
    fn verify_without_anchor_is_unchanged() {
        let text = "assertNotNull(result);";
        assert_eq!(insert_validator_verify(text), text);
    }

    #[test]
    fn success_stub_lands_before_act() {
        let out = insert_success_mock(PASSING_TEST);
        let stub_at = out.find("thenReturn(Set.of())").unwrap();
        let act_at = out.find("// Act").unwrap();
        assert!(stub_at < act_at);
        assert_eq!(insert_success_mock(&out), out);
    }

    #[test]
    fn success_stub_needs_arrange_section() {
        let text = "// Act\nproductService.createProduct(dto);";
        assert_eq!(insert_success_mock(text), text);
    }

    #[test]
    fn split_and_suggest() {
        let source = format!(
            "class ProductServiceTest {{\n{FAILING_TEST}{PASSING_TEST}    @Test\n    void getProduct_found() {{ productService.getProduct(1L); }}\n}}\n"
        );
        let cases = split_tests(&source);
        assert_eq!(
            cases.iter().map(|c| c.name).collect::<Vec<_>>(),
            vec![
                "createProduct_emptyName_fails",
                "createProduct_valid_saves",
                "getProduct_found"
            ]
        );

        let suggestions = suggest(&source);
        assert_eq!(
            suggestions,
            vec![
                TestSuggestion {
                    test: "createProduct_emptyName_fails".to_string(),
                    suggestion: Suggestion::Violation {
                        message: "Product Name không được rỗng"
                    },
                },
                TestSuggestion {
                    test: "createProduct_valid_saves".to_string(),
                    suggestion: Suggestion::SuccessStub,
                },
            ]
        );
    }

    #[test]
    fn unknown_message_has_no_snippet() {
        let s = Suggestion::UnknownMessage {
            message: "x".to_string(),
        };
        assert_eq!(s.snippet(), None);
        assert!(Suggestion::SuccessStub.snippet().is_some());
    }
}
