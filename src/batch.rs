// src/batch.rs
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use log::{error, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;
use crate::render::RenderReport;
use crate::wave::{ErrorKind, InspectError};
/// Marks full-resolution artifacts written by the test harness.
pub const LARGE_SUFFIX: &str = ":large";
/// One input root and the directory its figures are mirrored into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubBatch {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
}
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkItem {
    pub input: PathBuf,
    pub output: PathBuf,
}
/// Files directly under `input_root` whose name ends with `suffix`, sorted by name.
pub fn discover(batch: &SubBatch, suffix: &str) -> Result<Vec<WorkItem>, InspectError> {
    let mut items = Vec::new();
    for entry in WalkDir::new(&batch.input_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| InspectError::io(&batch.input_root, e.into()))?;
        // symlinked artifacts count, dangling links do not
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        if !name.to_string_lossy().ends_with(suffix) {
            continue;
        }
        items.push(WorkItem {
            input: entry.path().to_path_buf(),
            output: batch.output_root.join(name),
        });
    }
    info!(
        "{}: {} artifact(s) ending with {suffix:?}",
        batch.input_root.display(),
        items.len()
    );
    Ok(items)
}
pub fn collect_work_items(
    batches: &[SubBatch],
    suffix: &str,
) -> Result<Vec<WorkItem>, InspectError> {
    let mut items = Vec::new();
    for batch in batches {
        items.extend(discover(batch, suffix)?);
    }
    Ok(items)
}
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    Rendered(RenderReport),
    Failed { kind: ErrorKind, message: String },
    /// Not started because an earlier item failed under fail-fast.
    Skipped,
}
#[derive(Clone, Debug, Serialize)]
pub struct ItemOutcome {
    pub input: PathBuf,
    pub outcome: Outcome,
}
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchSummary {
    pub rendered: usize,
    pub failed: usize,
    pub skipped: usize,
    pub items: Vec<ItemOutcome>,
}
impl BatchSummary {
    fn from_items(items: Vec<ItemOutcome>) -> Self {
        let mut summary = BatchSummary::default();
        for item in &items {
            match item.outcome {
                Outcome::Rendered(_) => summary.rendered += 1,
                Outcome::Failed { .. } => summary.failed += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }
        summary.items = items;
        summary
    }
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
    pub fn write_json(&self, path: &Path) -> Result<(), InspectError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| InspectError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|e| InspectError::io(path, e))
    }
}
/// Runs a job over independent work items on a fixed-size pool.
///
/// Every item yields an [`ItemOutcome`]; a failure never cancels siblings unless
/// `fail_fast` is set, in which case items that have not started yet are skipped.
#[derive(Clone, Debug)]
pub struct BatchRunner {
    workers: usize,
    fail_fast: bool,
}
impl BatchRunner {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            fail_fast: false,
        }
    }
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
    pub fn workers(&self) -> usize {
        self.workers
    }
    pub fn run<F>(&self, items: &[WorkItem], job: F) -> Result<BatchSummary, InspectError>
    where
        F: Fn(&WorkItem) -> Result<RenderReport, InspectError> + Sync,
    {
        let abort = AtomicBool::new(false);
        let process = |item: &WorkItem| {
            if self.fail_fast && abort.load(Ordering::SeqCst) {
                warn!("skipping {}", item.input.display());
                return ItemOutcome {
                    input: item.input.clone(),
                    outcome: Outcome::Skipped,
                };
            }
            let outcome = match job(item) {
                Ok(report) => Outcome::Rendered(report),
                Err(e) => {
                    error!("{}: {e}", item.input.display());
                    abort.store(true, Ordering::SeqCst);
                    Outcome::Failed {
                        kind: e.kind(),
                        message: e.to_string(),
                    }
                }
            };
            ItemOutcome {
                input: item.input.clone(),
                outcome,
            }
        };
        let outcomes: Vec<ItemOutcome> = if self.workers == 1 {
            items.iter().map(process).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .map_err(|e| InspectError::WorkerPool(e.to_string()))?;
            pool.install(|| items.par_iter().map(process).collect())
        };
        let summary = BatchSummary::from_items(outcomes);
        info!(
            "batch done: {} rendered, {} failed, {} skipped",
            summary.rendered, summary.failed, summary.skipped
        );
        Ok(summary)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::AtomicUsize;
    fn report() -> RenderReport {
        RenderReport {
            outputs: Vec::new(),
            error_stats: Vec::new(),
        }
    }
    fn items(n: usize) -> Vec<WorkItem> {
        (0..n)
            .map(|i| WorkItem {
                input: PathBuf::from(format!("in/{i}:large")),
                output: PathBuf::from(format!("out/{i}:large")),
            })
            .collect()
    }
    #[test]
    fn discovers_only_large_files() {
        let dir = tempfile::tempdir().unwrap();
        let input_root = dir.path().join("in");
        fs::create_dir_all(input_root.join("dir:large")).unwrap();
        for name in ["b:large", "a:large", "a:small", "large", "c:large.png"] {
            fs::write(input_root.join(name), "{}").unwrap();
        }
        let batch = SubBatch {
            input_root: input_root.clone(),
            output_root: dir.path().join("out"),
        };
        let found = discover(&batch, LARGE_SUFFIX).unwrap();
        assert_eq!(
            found,
            vec![
                WorkItem {
                    input: input_root.join("a:large"),
                    output: dir.path().join("out").join("a:large"),
                },
                WorkItem {
                    input: input_root.join("b:large"),
                    output: dir.path().join("out").join("b:large"),
                },
            ]
        );
    }
    #[cfg(unix)]
    #[test]
    fn follows_symlinked_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input_root = dir.path().join("in");
        fs::create_dir_all(&input_root).unwrap();
        let target = dir.path().join("shared.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, input_root.join("linked:large")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), input_root.join("dangling:large"))
            .unwrap();
        let batch = SubBatch {
            input_root: input_root.clone(),
            output_root: input_root.clone(),
        };
        let found = discover(&batch, LARGE_SUFFIX).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].input, input_root.join("linked:large"));
    }
    #[test]
    fn collects_across_sub_batches_and_fails_on_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut batches = Vec::new();
        for sub in ["one", "two"] {
            let root = dir.path().join(sub);
            fs::create_dir_all(&root).unwrap();
            fs::write(root.join("x:large"), "{}").unwrap();
            batches.push(SubBatch {
                input_root: root.clone(),
                output_root: root,
            });
        }
        assert_eq!(collect_work_items(&batches, LARGE_SUFFIX).unwrap().len(), 2);
        batches.push(SubBatch {
            input_root: dir.path().join("missing"),
            output_root: dir.path().join("missing"),
        });
        let err = collect_work_items(&batches, LARGE_SUFFIX).unwrap_err();
        assert!(matches!(err, InspectError::Io { .. }));
    }
    #[test]
    fn failures_do_not_cancel_siblings() {
        let work = items(8);
        let calls = AtomicUsize::new(0);
        let summary = BatchRunner::new(4)
            .run(&work, |item| {
                calls.fetch_add(1, Ordering::SeqCst);
                if item.input.ends_with("3:large") {
                    Err(InspectError::decode(&item.input, "broken"))
                } else {
                    Ok(report())
                }
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 8);
        assert_eq!((summary.rendered, summary.failed, summary.skipped), (7, 1, 0));
        assert!(!summary.is_success());
        // outcomes keep input order
        let inputs: Vec<_> = summary.items.iter().map(|i| i.input.clone()).collect();
        assert_eq!(inputs, work.iter().map(|w| w.input.clone()).collect::<Vec<_>>());
        assert!(matches!(
            summary.items[3].outcome,
            Outcome::Failed { kind: ErrorKind::Decode, .. }
        ));
    }
    #[test]
    fn fail_fast_skips_remaining_items() {
        let work = items(5);
        let summary = BatchRunner::new(1)
            .with_fail_fast(true)
            .run(&work, |item| {
                if item.input.ends_with("1:large") {
                    Err(InspectError::Plot("boom".into()))
                } else {
                    Ok(report())
                }
            })
            .unwrap();
        assert_eq!((summary.rendered, summary.failed, summary.skipped), (1, 1, 3));
        assert!(matches!(summary.items[4].outcome, Outcome::Skipped));
    }
    #[test]
    fn summary_serializes_with_status_tags() {
        let summary = BatchRunner::new(1)
            .run(&items(2), |item| {
                if item.input.ends_with("0:large") {
                    Ok(report())
                } else {
                    Err(InspectError::InvalidChannelCount)
                }
            })
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        summary.write_json(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["rendered"], 1);
        assert_eq!(json["items"][0]["outcome"]["status"], "rendered");
        assert_eq!(json["items"][1]["outcome"]["status"], "failed");
        assert_eq!(json["items"][1]["outcome"]["kind"], "invalid-argument");
        assert!(BatchRunner::new(0).workers() == 1);
    }
}
