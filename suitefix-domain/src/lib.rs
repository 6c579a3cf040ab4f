//! Rewrite engine for suitefix.
//!
//! Everything in this crate is `&str -> String`. File access lives in
//! `suitefix-edit`; this crate only knows about text.

pub mod messages;
pub mod mock;
pub mod pipeline;
pub mod rewrites;

pub use pipeline::{Pipeline, PipelineOutput};
pub use rewrites::Rewrite;
pub use rewrites::category_enum::CategoryEnumRewrite;
pub use rewrites::login_request::LoginRequestRewrite;
pub use rewrites::product_request::ProductRequestRewrite;
pub use rewrites::status_expectation::StatusExpectationRewrite;
