use crate::rewrites::Rewrite;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::trace;

// Indent and receiver are captured and compared with the declaration's.
static SETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(\w+)\.set(\w+)\((.*)\);").expect("regex for product setter")
});

/// Setter fields that must all be present before a block is collapsed.
const REQUIRED_FIELDS: [&str; 4] = ["ProductName", "Price", "Quantity", "Category"];

/// Collapses `new T()` followed by a run of `setX(...)` calls into
/// `new T(name, price, description, quantity, category)` for the product DTOs.
pub struct ProductRequestRewrite {
    id: &'static str,
    class: &'static str,
    declaration: Regex,
}

impl ProductRequestRewrite {
    pub fn new(id: &'static str, class: &'static str) -> Self {
        let declaration = Regex::new(&format!(
            r"^(\s*){0} (\w+) = new {0}\(\);",
            regex::escape(class)
        ))
        .expect("regex for product request declaration");
        Self {
            id,
            class,
            declaration,
        }
    }

    pub fn create() -> Self {
        Self::new("create_product_request", "CreateProductRequest")
    }

    pub fn update() -> Self {
        Self::new("update_product_request", "UpdateProductRequest")
    }

    fn declared(&self, line: &str) -> Option<(String, String)> {
        let caps = self.declaration.captures(line)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    }
}

impl Rewrite for ProductRequestRewrite {
    fn id(&self) -> &'static str {
        self.id
    }

    fn apply(&self, text: &str) -> String {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let mut i = 0;
        while i < lines.len() {
            if i + 5 < lines.len()
                && let Some((indent, var)) = self.declared(&lines[i])
            {
                let (fields, end) = collect_setters(&lines, i + 1, &indent, &var);
                match constructor_args(&fields) {
                    Some(args) => {
                        lines[i] = format!("{indent}{0} {var} = new {0}({args});", self.class);
                        lines.drain(i + 1..end);
                    }
                    None => trace!(class = self.class, var = %var, "required setters missing"),
                }
            }
            i += 1;
        }
        lines.join("\n")
    }
}

/// Gathers the setter run that starts at `start`. Returns the field values and
/// the index of the first line after the run.
fn collect_setters(
    lines: &[String],
    start: usize,
    indent: &str,
    var: &str,
) -> (HashMap<String, String>, usize) {
    let prefix = format!("{var}.set");

    let mut fields = HashMap::new();
    let mut j = start;
    while j < lines.len() && lines[j].trim().starts_with(&prefix) {
        let Some(caps) = SETTER.captures(&lines[j]) else {
            break;
        };
        if &caps[1] != indent || &caps[2] != var {
            break;
        }
        fields.insert(caps[3].to_string(), caps[4].to_string());
        j += 1;
    }
    (fields, j)
}

fn constructor_args(fields: &HashMap<String, String>) -> Option<String> {
    if !REQUIRED_FIELDS.iter().all(|f| fields.contains_key(*f)) {
        return None;
    }
    let description = fields.get("Description").map_or("null", String::as_str);
    Some(format!(
        "{}, {}, {}, {}, {}",
        fields["ProductName"], fields["Price"], description, fields["Quantity"], fields["Category"]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TAIL: &str = "\n        mockMvc.perform(post(\"/api/products\"));\n    }\n}";

    #[test]
    fn full_block_collapses_in_constructor_order() {
        let input = format!(
            "        CreateProductRequest req = new CreateProductRequest();\n\
             \x20       req.setProductName(\"Laptop\");\n\
             \x20       req.setPrice(1500.0);\n\
             \x20       req.setDescription(\"Gaming\");\n\
             \x20       req.setQuantity(10);\n\
             \x20       req.setCategory(\"Electronics\");{TAIL}"
        );
        let expected = format!(
            "        CreateProductRequest req = new CreateProductRequest(\"Laptop\", 1500.0, \"Gaming\", 10, \"Electronics\");{TAIL}"
        );
        assert_eq!(ProductRequestRewrite::create().apply(&input), expected);
    }

    #[test]
    fn missing_description_becomes_null() {
        let input = format!(
            "    UpdateProductRequest u = new UpdateProductRequest();\n    u.setCategory(cat);\n    u.setQuantity(0);\n    u.setPrice(p);\n    u.setProductName(name);{TAIL}"
        );
        let expected =
            format!("    UpdateProductRequest u = new UpdateProductRequest(name, p, null, 0, cat);{TAIL}");
        assert_eq!(ProductRequestRewrite::update().apply(&input), expected);
    }

    #[test]
    fn missing_required_field_leaves_block_untouched() {
        let input = format!(
            "    CreateProductRequest r = new CreateProductRequest();\n    r.setProductName(\"A\");\n    r.setPrice(1.0);\n    r.setQuantity(1);\n    r.setDescription(\"d\");{TAIL}"
        );
        assert_eq!(ProductRequestRewrite::create().apply(&input), input);
    }

    #[test]
    fn setter_run_stops_at_different_indent() {
        let input = format!(
            "    CreateProductRequest r = new CreateProductRequest();\n    r.setProductName(\"A\");\n    r.setPrice(1.0);\n    r.setQuantity(1);\n      r.setCategory(\"Toys\");{TAIL}"
        );
        assert_eq!(ProductRequestRewrite::create().apply(&input), input);
    }

    #[test]
    fn setter_run_stops_at_another_receiver() {
        let input = format!(
            "    CreateProductRequest r = new CreateProductRequest();\n    r.setProductName(\"A\");\n    r.setPrice(1.0);\n    r.setQuantity(1);\n    rr.setCategory(\"Toys\");\n    r.setCategory(\"Toys\");{TAIL}"
        );
        assert_eq!(ProductRequestRewrite::create().apply(&input), input);
    }

    #[test]
    fn setter_with_tab_indent_does_not_match_spaces() {
        let input = format!(
            "    CreateProductRequest r = new CreateProductRequest();\n    r.setProductName(\"A\");\n    r.setPrice(1.0);\n    r.setQuantity(1);\n\tr.setCategory(\"Toys\");{TAIL}"
        );
        assert_eq!(ProductRequestRewrite::create().apply(&input), input);
    }

    #[test]
    fn later_setter_for_same_field_wins() {
        let input = format!(
            "  CreateProductRequest r = new CreateProductRequest();\n  r.setProductName(\"A\");\n  r.setPrice(1.0);\n  r.setQuantity(1);\n  r.setCategory(\"Toys\");\n  r.setPrice(2.0);{TAIL}"
        );
        let expected =
            format!("  CreateProductRequest r = new CreateProductRequest(\"A\", 2.0, null, 1, \"Toys\");{TAIL}");
        assert_eq!(ProductRequestRewrite::create().apply(&input), expected);
    }

    #[test]
    fn only_the_configured_class_is_rewritten() {
        let input = format!(
            "  CreateProductRequest r = new CreateProductRequest();\n  r.setProductName(\"A\");\n  r.setPrice(1.0);\n  r.setQuantity(1);\n  r.setCategory(\"Toys\");{TAIL}"
        );
        assert_eq!(ProductRequestRewrite::update().apply(&input), input);
    }

    #[test]
    fn block_near_end_of_file_is_left_alone() {
        let input = "  CreateProductRequest r = new CreateProductRequest();\n  r.setProductName(\"A\");\n  r.setPrice(1.0);\n  r.setQuantity(1);\n  r.setCategory(\"Toys\");";
        assert_eq!(ProductRequestRewrite::create().apply(input), input);
    }
}
