pub mod writer;

pub use writer::{ManifestRow, ManifestWriter, MANIFEST_HEADER};

use crate::error::{CoreError, CoreResult};
use crate::paths::BaseDir;
use crate::transcript::TranscriptMap;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use rayon::prelude::*;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Upper bound on subdirectories processed at once.
    pub workers: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            workers: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSummary {
    pub rows: usize,
    /// File names that found a transcript, in row order.
    pub matched_keys: Vec<String>,
}

impl ManifestSummary {
    pub fn matched(&self) -> usize {
        self.matched_keys.len()
    }
}

#[derive(Debug)]
pub struct ManifestOutcome {
    pub subdir: String,
    pub output: PathBuf,
    pub result: CoreResult<ManifestSummary>,
}

/// One outcome per subdirectory of the data root, in enumeration order.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub outcomes: Vec<ManifestOutcome>,
}

impl EmitReport {
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }

    pub fn total_rows(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|s| s.rows)
            .sum()
    }

    /// Transcript keys no emitted row picked up, sorted.
    pub fn unmatched_keys(&self, map: &TranscriptMap) -> Vec<String> {
        let used: HashSet<&str> = self
            .outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flat_map(|s| s.matched_keys.iter().map(|k| k.as_str()))
            .collect();
        let mut keys: Vec<String> = map
            .keys()
            .filter(|k| !used.contains(k))
            .map(|k| k.to_string())
            .collect();
        keys.sort();
        keys
    }
}

/// Write `<output_prefix>/<subdir>.csv` for every immediate subdirectory of
/// `data_root`. Relative paths resolve against `base`.
///
/// A missing data root or an output directory that cannot be created fails
/// before anything is written. After that, each subdirectory succeeds or fails
/// on its own and every worker is joined before this returns.
pub fn emit_manifests(
    map: &TranscriptMap,
    base: &BaseDir,
    data_root: impl AsRef<Path>,
    output_prefix: impl AsRef<Path>,
    opts: &EmitOptions,
) -> CoreResult<EmitReport> {
    let data_root = base.resolve(data_root);
    let output_dir = base.resolve(output_prefix);

    if !data_root.is_dir() {
        return Err(CoreError::InvalidInput(format!(
            "data directory is not a directory: {}",
            data_root.display()
        )));
    }
    fs::create_dir_all(&output_dir)?;

    let subdirs = list_subdirectories(&data_root)?;
    log::debug!(
        "{} subdirectories under {}",
        subdirs.len(),
        data_root.display()
    );

    let outcomes = run_bounded(&subdirs, opts.workers, |dir| {
        let subdir = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = output_dir.join(format!("{}.csv", subdir));
        let result = write_manifest(map, dir, &output);
        match &result {
            Ok(summary) => log::info!(
                "wrote {} ({} rows, {} with transcript)",
                output.display(),
                summary.rows,
                summary.matched()
            ),
            Err(e) => log::error!("manifest for {} failed: {}", dir.display(), e),
        }
        ManifestOutcome {
            subdir,
            output,
            result,
        }
    })?;

    Ok(EmitReport { outcomes })
}

/// Immediate subdirectories of `root`; symlinks are not followed.
pub fn list_subdirectories(root: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Header plus one row per entry of `dir`, nested directories included.
pub fn write_manifest(
    map: &TranscriptMap,
    dir: &Path,
    output: &Path,
) -> CoreResult<ManifestSummary> {
    let file = File::create(output)?;
    let mut writer = ManifestWriter::new(BufWriter::new(file))?;
    let mut matched_keys = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let size = entry.metadata()?.len();
        let name = entry.file_name().to_string_lossy();
        let transcript = match map.get(&name) {
            Some(t) => {
                matched_keys.push(name.to_string());
                t.to_string()
            }
            None => String::new(),
        };
        writer.write_row(&ManifestRow {
            path: entry.path().to_string_lossy().into_owned(),
            size,
            transcript,
        })?;
    }

    let rows = writer.rows();
    writer.finish()?;
    Ok(ManifestSummary { rows, matched_keys })
}

/// Map `f` over `items` on a pool of at most `workers` threads, keeping input order.
fn run_bounded<T, R, F>(items: &[T], workers: usize, f: F) -> CoreResult<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.clamp(1, items.len().max(1)))
        .build()?;
    Ok(pool.install(|| items.par_iter().map(|item| f(item)).collect()))
}
