use crate::rewrites::Rewrite;

/// Enum constant and the string value the DTOs now take instead.
pub const CATEGORIES: [(&str, &str); 5] = [
    ("ELECTRONICS", "Electronics"),
    ("BOOKS", "Books"),
    ("CLOTHING", "Clothing"),
    ("TOYS", "Toys"),
    ("GROCERIES", "Groceries"),
];

/// Replaces `Category` enum accessors with their string literal.
pub struct CategoryEnumRewrite;

impl Rewrite for CategoryEnumRewrite {
    fn id(&self) -> &'static str {
        "category_enum"
    }

    fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (constant, value) in CATEGORIES {
            out = out.replace(
                &format!("Category.{constant}.getValue()"),
                &format!("\"{value}\""),
            );
        }
        for (constant, value) in CATEGORIES {
            out = out.replace(
                &format!(".setCategory(Category.{constant})"),
                &format!(".setCategory(\"{value}\")"),
            );
        }
        out
    }
}
