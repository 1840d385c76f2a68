/*!
 * # subhook - opening hooks from caption tracks
 *
 * A Rust library for turning downloaded WebVTT caption files into plain
 * "hook" texts: the deduplicated narration of each video.
 *
 * ## Features
 *
 * - Strip WebVTT headers, notes and inline markup
 * - Merge rolling auto-caption updates that share a start time
 * - Drop caption bodies repeated at later times
 * - Batch a whole folder tree, one hook file per caption file
 * - Score video records by engagement per view and attach hooks to them
 *
 * ## Architecture
 *
 * - `subtitle_processor`: cleaning, cue extraction, deduplication, hook building
 * - `app_controller`: batch run over a subtitles folder
 * - `app_config`: configuration management
 * - `file_utils`: file system operations
 * - `video_records`: engagement scoring and hook merging for video records
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod video_records;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{BatchSummary, Controller, FileOutcome};
pub use errors::{ConfigError, HookError, RecordsError};
pub use subtitle_processor::{CaptionTrack, Cue, CueMap, extract_hook};
pub use video_records::VideoRecord;
