//! Canonical validation messages of the product DTOs.
//!
//! Each phrase maps to itself: the violation a test mocks must carry exactly
//! the message the assertion looks for.

pub const ERROR_MESSAGES: [&str; 10] = [
    "Product Name không được rỗng",
    "Product Name phải từ 3 đến 100 ký tự",
    "Price không được để trống",
    "Price phải > 0",
    "Price không được vượt quá 999999999",
    "Quantity không được để trống",
    "Quantity phải >= 0",
    "Quantity không được vượt quá 99999",
    "Description không được vượt quá 500 ký tự",
    "Category không được rỗng",
];

/// Looks up the violation message for an expected assertion message.
pub fn violation_message(expected: &str) -> Option<&'static str> {
    ERROR_MESSAGES.iter().copied().find(|m| *m == expected)
}
