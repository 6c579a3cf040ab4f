//! Edit engine for suitefix.
//!
//! Responsibilities:
//! - Read each target once and run a rewrite pipeline over it in memory.
//! - Write back only when the text changed (constructor run), or always
//!   (status-code run).
//! - Produce a unified diff of every change, for dry runs and logs.

pub mod error;

pub use error::{EditError, EditResult};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use sha2::{Digest, Sha256};
use suitefix_domain::{Pipeline, Rewrite, StatusExpectationRewrite};
use suitefix_types::ToolInfo;
use suitefix_types::outcome::{FileOutcome, FileStatus, ReplaceOutcome};
use suitefix_types::report::RunReport;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    /// Compute outcomes and patches without touching the disk.
    pub dry_run: bool,
}

/// Outcome of one file plus the diff of its change (empty when unchanged).
#[derive(Debug, Clone)]
pub struct FileRewrite {
    pub outcome: FileOutcome,
    pub patch: String,
}

/// Read a target in full. A path that does not exist is [`EditError::Missing`].
pub fn read_target(path: &Utf8Path) -> EditResult<String> {
    if !path.exists() {
        return Err(EditError::Missing {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|source| EditError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_target(path: &Utf8Path, contents: &str) -> EditResult<()> {
    fs::write(path, contents).map_err(|source| EditError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Run `pipeline` over one file and persist the result if it differs.
///
/// A missing file is not an error here: it yields a `missing` outcome.
pub fn rewrite_file(
    path: &Utf8Path,
    pipeline: &Pipeline,
    opts: &RewriteOptions,
) -> EditResult<FileRewrite> {
    let before = match read_target(path) {
        Ok(text) => text,
        Err(EditError::Missing { path }) => {
            warn!("file not found: {}", path);
            return Ok(FileRewrite {
                outcome: FileOutcome::missing(path),
                patch: String::new(),
            });
        }
        Err(e) => return Err(e),
    };

    let out = pipeline.run(&before);
    let sha_before = sha256_hex(before.as_bytes());

    if !out.changed() {
        debug!("no rewrite matched {}", path);
        return Ok(FileRewrite {
            outcome: FileOutcome {
                path: path.to_path_buf(),
                status: FileStatus::Unchanged,
                rewrites: vec![],
                written: false,
                sha256_before: Some(sha_before.clone()),
                sha256_after: Some(sha_before),
            },
            patch: String::new(),
        });
    }

    let patch = render_patch(path, &before, &out.text);
    if !opts.dry_run {
        write_target(path, &out.text)?;
        info!(rewrites = ?out.applied, "rewrote {}", path);
    }

    Ok(FileRewrite {
        outcome: FileOutcome {
            path: path.to_path_buf(),
            status: FileStatus::Changed,
            rewrites: out.applied.iter().map(|id| id.to_string()).collect(),
            written: !opts.dry_run,
            sha256_before: Some(sha_before),
            sha256_after: Some(sha256_hex(out.text.as_bytes())),
        },
        patch,
    })
}

/// Run `pipeline` over each `dir/name` in order.
///
/// `on_file` sees every existing path before it is processed and every
/// outcome after, so callers can print progress as the run goes. A missing
/// path only produces its `Finished` event. Any error other than a
/// missing file aborts the run.
pub fn rewrite_files<F>(
    dir: &Utf8Path,
    names: &[String],
    pipeline: &Pipeline,
    tool: ToolInfo,
    opts: &RewriteOptions,
    mut on_file: F,
) -> anyhow::Result<(RunReport, String)>
where
    F: FnMut(FileEvent<'_>),
{
    let mut report = RunReport::new(tool, opts.dry_run);
    let mut patch = String::new();

    for name in names {
        let path: Utf8PathBuf = dir.join(name);
        if path.exists() {
            on_file(FileEvent::Started(&path));
        }
        let rewrite =
            rewrite_file(&path, pipeline, opts).with_context(|| format!("rewrite {}", path))?;
        on_file(FileEvent::Finished(&rewrite.outcome));
        patch.push_str(&rewrite.patch);
        report.push(rewrite.outcome);
    }

    report.finish();
    Ok((report, patch))
}

/// Progress notifications from [`rewrite_files`].
#[derive(Debug, Clone, Copy)]
pub enum FileEvent<'a> {
    Started(&'a Utf8Path),
    Finished(&'a FileOutcome),
}

/// Apply a literal substitution to one file and write it back unconditionally.
///
/// A missing file is fatal.
pub fn replace_in_file(
    path: &Utf8Path,
    rewrite: &StatusExpectationRewrite,
    opts: &RewriteOptions,
) -> anyhow::Result<(ReplaceOutcome, String)> {
    let before = read_target(path)?;
    let occurrences_before = rewrite.count(&before) as u64;
    let after = rewrite.apply(&before);
    let occurrences_after = rewrite.count(&after) as u64;

    if !opts.dry_run {
        write_target(path, &after)?;
    }
    debug!(
        occurrences_before,
        occurrences_after, "replaced {:?} in {}", rewrite.from, path
    );

    let outcome = ReplaceOutcome {
        schema: suitefix_types::schema::SUITEFIX_REPLACE_V1.to_string(),
        path: path.to_path_buf(),
        from: rewrite.from.clone(),
        to: rewrite.to.clone(),
        occurrences_before,
        occurrences_after,
        written: !opts.dry_run,
    };
    Ok((outcome, render_patch(path, &before, &after)))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Unified diff of one file, with git-style headers. Empty when equal.
pub fn render_patch(path: &Utf8Path, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(old, new);
    let body = PatchFormatter::new().fmt_patch(&patch).to_string();
    let body = body
        .strip_prefix("--- original\n+++ modified\n")
        .unwrap_or(&body);
    out.push_str(body);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
