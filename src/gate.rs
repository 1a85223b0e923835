use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::files::containment::{canonicalized, is_contained};
use crate::files::preview::{read_file_preview, FilePreview};
use crate::files::scan::{scan_directory, FileNode};
use crate::files::{MAX_PREVIEW_LINES, MAX_SCAN_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Depth used when a listing request does not ask for one.
pub const DEFAULT_SCAN_DEPTH: usize = 3;

/// Line count used when a preview request does not ask for one.
pub const DEFAULT_PREVIEW_LINES: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub dir: Option<String>,
    #[serde(default = "default_depth")]
    pub depth: usize,
    pub base_dir: Option<String>,
}

fn default_depth() -> usize {
    DEFAULT_SCAN_DEPTH
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewParams {
    pub path: Option<String>,
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    pub base_dir: Option<String>,
}

fn default_max_lines() -> usize {
    DEFAULT_PREVIEW_LINES
}

#[derive(Debug, Serialize)]
pub struct FileTree {
    pub tree: FileNode,
    pub root: String,
}

/// Decides, per request, whether a target path may be touched and with
/// what effective limits.
///
/// Every operation goes through the same sequence: resolve the boundary,
/// check containment, canonicalize the target, clamp the requested limit,
/// then do the filesystem work. Requests that name no boundary are checked
/// against the configured fallback rather than waved through.
pub struct Gate {
    fallback_boundary: PathBuf,
}

impl Gate {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let fallback_boundary = match &cfg.files.fallback_boundary {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("no home directory to use as fallback boundary"))?,
        };
        Ok(Self { fallback_boundary })
    }

    pub fn fallback_boundary(&self) -> &Path {
        self.fallback_boundary.as_path()
    }

    pub fn list(&self, params: &ListParams) -> AppResult<FileTree> {
        let dir = params.dir.as_deref().ok_or(AppError::MissingParam("dir"))?;
        let dir = Path::new(dir);
        self.check_boundary(dir, params.base_dir.as_deref())?;
        let root = canonicalized(dir).map_err(|_| AppError::OutsideScope)?;
        let depth = params.depth.min(MAX_SCAN_DEPTH);
        let tree = scan_directory(&root, depth).map_err(|err| {
            tracing::debug!(error = %err, "directory scan failed");
            AppError::ScanFailed
        })?;
        Ok(FileTree {
            root: root.display().to_string(),
            tree,
        })
    }

    pub fn preview(&self, params: &PreviewParams) -> AppResult<FilePreview> {
        let path = params
            .path
            .as_deref()
            .ok_or(AppError::MissingParam("path"))?;
        let path = Path::new(path);
        self.check_boundary(path, params.base_dir.as_deref())?;
        let file = canonicalized(path).map_err(|_| AppError::OutsideScope)?;
        let max_lines = params.max_lines.min(MAX_PREVIEW_LINES);
        read_file_preview(&file, max_lines).map_err(|err| {
            tracing::debug!(error = %err, "file preview failed");
            AppError::ReadFailed
        })
    }

    fn check_boundary(&self, target: &Path, base_dir: Option<&str>) -> AppResult<()> {
        let boundary = match base_dir {
            Some(dir) => Path::new(dir),
            None => self.fallback_boundary.as_path(),
        };
        if is_contained(boundary, target) {
            Ok(())
        } else {
            Err(AppError::OutsideScope)
        }
    }
}
