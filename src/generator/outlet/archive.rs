//! JSON存档：文件命名、保存、读取与历史列表

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::types::ResearchResult;
use crate::utils::text::sanitize_file_component;

pub const ARCHIVE_PREFIX: &str = "3C分析";
pub const ARCHIVE_EXTENSION: &str = "json";
pub const DECK_EXTENSION: &str = "pptx";

/// `3C分析_<客户名>_<created_at>.<ext>`，created_at 中的 ':' 与空格分别替换为 '-' 与 '_'
pub fn archive_file_name(client_name: &str, created_at: &str, extension: &str) -> String {
    let stamp = created_at.replace(':', "-").replace(' ', "_");
    format!(
        "{}_{}_{}.{}",
        ARCHIVE_PREFIX,
        sanitize_file_component(client_name),
        stamp,
        extension
    )
}

/// 以带缩进的UTF-8 JSON保存结果，返回文件路径
pub fn save_archive(dir: &Path, result: &ResearchResult) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create archive directory: {}", dir.display()))?;

    let path = dir.join(archive_file_name(
        &result.client_name,
        &result.created_at,
        ARCHIVE_EXTENSION,
    ));
    let json = serde_json::to_string_pretty(result).context("Failed to serialize research result")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write archive: {}", path.display()))?;

    debug!(path = %path.display(), "archive saved");
    Ok(path)
}

pub fn load_archive(path: &Path) -> Result<ResearchResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read archive: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse archive: {}", path.display()))
}

/// 按文件名降序（最新在前）列出目录中的存档；目录不存在时返回空列表
pub fn list_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let pattern = format!(
        "{}/{}_*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        ARCHIVE_PREFIX,
        ARCHIVE_EXTENSION
    );
    let mut archives = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid archive search pattern")? {
        match entry {
            Ok(path) if path.is_file() => archives.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable archive entry: {}", e),
        }
    }

    archives.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    Ok(archives)
}
