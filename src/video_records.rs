/*!
 * Video record helpers.
 *
 * Records describe one video each (title, link, counters) and are stored as
 * JSON arrays using the column names of the channel export. Two operations
 * work on them:
 * - engagement scoring of videos above the median view count
 * - attaching extracted hook texts to the record with the matching title
 */

use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{HookError, RecordsError};
use crate::file_utils::FileManager;

/// One video as exported from a channel listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Link", default)]
    pub link: String,

    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Thumbnail", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(rename = "View Count", default, deserialize_with = "deserialize_count")]
    pub view_count: u64,

    #[serde(rename = "Like Count", default, deserialize_with = "deserialize_count")]
    pub like_count: u64,

    #[serde(rename = "Comment Count", default, deserialize_with = "deserialize_count")]
    pub comment_count: u64,

    #[serde(rename = "Average Engagement per View", default, skip_serializing_if = "Option::is_none")]
    pub average_engagement_per_view: Option<f64>,

    #[serde(rename = "Text Content", default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
}

impl VideoRecord {
    pub fn new(title: &str, view_count: u64, like_count: u64, comment_count: u64) -> Self {
        VideoRecord {
            title: title.to_string(),
            link: String::new(),
            description: None,
            thumbnail: None,
            view_count,
            like_count,
            comment_count,
            average_engagement_per_view: None,
            text_content: None,
        }
    }
}

// Statistics APIs report counters as strings; exports may hold either form.
#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Number(u64),
    Text(String),
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match CountRepr::deserialize(deserializer)? {
        CountRepr::Number(n) => Ok(n),
        CountRepr::Text(s) if s.trim().is_empty() => Ok(0),
        CountRepr::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// `(likes + comments) / views`, or 0 for a video nobody watched
pub fn average_engagement_per_view(view_count: u64, like_count: u64, comment_count: u64) -> f64 {
    if view_count == 0 {
        return 0.0;
    }
    like_count.saturating_add(comment_count) as f64 / view_count as f64
}

pub fn median_view_count(records: &[VideoRecord]) -> Option<f64> {
    let mut counts: Vec<u64> = records.iter().map(|r| r.view_count).collect();
    if counts.is_empty() {
        return None;
    }
    counts.sort_unstable();

    let mid = counts.len() / 2;
    let median = if counts.len() % 2 == 0 {
        (counts[mid - 1] as f64 + counts[mid] as f64) / 2.0
    } else {
        counts[mid] as f64
    };
    Some(median)
}

/// Videos with more views than the median, ascending by views, scored.
pub fn filter_above_median(records: &[VideoRecord]) -> Vec<VideoRecord> {
    let Some(median) = median_view_count(records) else {
        return Vec::new();
    };

    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.view_count);

    sorted
        .into_iter()
        .filter(|r| r.view_count as f64 > median)
        .map(|mut r| {
            r.average_engagement_per_view =
                Some(average_engagement_per_view(r.view_count, r.like_count, r.comment_count));
            r
        })
        .collect()
}

/// Result of attaching hook files to records
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub matched: usize,
    pub unmatched: Vec<PathBuf>,
}

/// Copy each `.txt` hook in `hooks_dir` into the record whose title matches
/// the file stem with its language suffix removed.
pub fn merge_hooks<S: AsRef<str>>(
    records: &mut [VideoRecord],
    hooks_dir: &Path,
    language_suffixes: &[S],
) -> Result<MergeReport> {
    if !FileManager::dir_exists(hooks_dir) {
        return Err(HookError::MissingInput(hooks_dir.to_path_buf()).into());
    }

    let mut report = MergeReport::default();

    for hook_file in FileManager::list_files(hooks_dir, "txt")? {
        let stem = hook_file.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let title = FileManager::title_from_stem(&stem, language_suffixes);

        match records.iter_mut().find(|r| r.title == title) {
            Some(record) => {
                record.text_content = Some(FileManager::read_to_string(&hook_file)?);
                report.matched += 1;
            }
            None => {
                warn!("No matching title found for text file '{}'", hook_file.display());
                report.unmatched.push(hook_file);
            }
        }
    }

    info!("Attached {} hook(s), {} unmatched", report.matched, report.unmatched.len());
    Ok(report)
}

pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<VideoRecord>, RecordsError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|source| RecordsError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content)
        .map_err(|source| RecordsError::Json { path: path.to_path_buf(), source })
}

pub fn save_records<P: AsRef<Path>>(path: P, records: &[VideoRecord]) -> Result<(), RecordsError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records)
        .map_err(|source| RecordsError::Json { path: path.to_path_buf(), source })?;
    fs::write(path, json)
        .map_err(|source| RecordsError::Io { path: path.to_path_buf(), source })
}

/// `videos.json` -> `videos_updated.json`
pub fn updated_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = match path.extension() {
        Some(ext) => format!("{}_updated.{}", stem, ext.to_string_lossy()),
        None => format!("{}_updated", stem),
    };
    path.with_file_name(file_name)
}
