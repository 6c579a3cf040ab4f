//! Ordered composition of rewrites.

use crate::rewrites::{Rewrite, constructor_rewrites};
use tracing::debug;

pub struct Pipeline {
    rewrites: Vec<Box<dyn Rewrite>>,
}

/// Text produced by a pipeline run plus the rewrites that changed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub text: String,
    pub applied: Vec<&'static str>,
}

impl PipelineOutput {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

impl Pipeline {
    pub fn new(rewrites: Vec<Box<dyn Rewrite>>) -> Self {
        Self { rewrites }
    }

    /// The setter-to-constructor migration.
    pub fn constructors() -> Self {
        Self::new(constructor_rewrites())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.rewrites.iter().map(|r| r.id()).collect()
    }

    pub fn run(&self, text: &str) -> PipelineOutput {
        let mut current = text.to_string();
        let mut applied = Vec::new();
        for rewrite in &self.rewrites {
            let next = rewrite.apply(&current);
            if next != current {
                debug!(rewrite = rewrite.id(), "rewrite changed text");
                applied.push(rewrite.id());
                current = next;
            }
        }
        PipelineOutput {
            text: current,
            applied,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::constructors()
    }
}
