pub mod category_enum;
pub mod login_request;
pub mod product_request;
pub mod status_expectation;

/// A pure text transformation over a whole source file.
///
/// Implementations must leave text they do not recognise untouched.
pub trait Rewrite {
    /// Stable identifier, used in reports and logs.
    fn id(&self) -> &'static str;

    fn apply(&self, text: &str) -> String;
}

/// Rewrites of the constructor migration, in the order they must run.
pub fn constructor_rewrites() -> Vec<Box<dyn Rewrite>> {
    vec![
        Box::new(login_request::LoginRequestRewrite),
        Box::new(product_request::ProductRequestRewrite::create()),
        Box::new(product_request::ProductRequestRewrite::update()),
        Box::new(category_enum::CategoryEnumRewrite),
    ]
}
