use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn, info, debug};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::HookError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::CaptionTrack;

// @module: Batch controller turning caption files into hook files

/// What happened to a single caption file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Hook written to the given path
    Written(PathBuf),
    /// No cue survived parsing
    NoCues,
    /// Cues were found but the joined hook is empty
    NoHook,
    /// Output already present and `skip_existing` is set
    Skipped(PathBuf),
}

/// Counters for one batch run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
    pub empty: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Written(path) => self.written.push(path),
            FileOutcome::Skipped(_) => self.skipped += 1,
            FileOutcome::NoCues | FileOutcome::NoHook => self.empty += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.skipped + self.empty + self.failed
    }
}

/// Main application controller for hook extraction
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Walk the subtitles folder and write one hook per caption file.
    ///
    /// Per-file failures are logged and counted and unreadable entries in the
    /// tree are skipped. Only a missing subtitles folder aborts the run.
    pub fn run(&self) -> Result<BatchSummary> {
        let start_time = std::time::Instant::now();
        let input_dir = &self.config.subtitles_dir;

        if !FileManager::dir_exists(input_dir) {
            error!("Subtitles folder '{}' does not exist.", input_dir.display());
            return Err(HookError::MissingInput(input_dir.clone()).into());
        }

        FileManager::ensure_dir(&self.config.hooks_dir)?;

        let caption_files = FileManager::find_files(input_dir, self.config.extensions.as_slice())?;
        if caption_files.is_empty() {
            warn!("No caption files found in {}", input_dir.display());
        }

        let progress = Self::progress_bar(caption_files.len() as u64);
        let mut summary = BatchSummary::default();

        for caption_file in &caption_files {
            let file_name = caption_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress.set_message(format!("Processing: {}", file_name));

            let outcome = progress.suspend(|| self.process_file(caption_file));
            match outcome {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    progress.suspend(|| error!("Error parsing {}: {}", caption_file.display(), e));
                    summary.failed += 1;
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();

        info!(
            "Processed {} file(s) in {:.2?}: {} written, {} skipped, {} empty, {} failed",
            summary.total(),
            start_time.elapsed(),
            summary.written.len(),
            summary.skipped,
            summary.empty,
            summary.failed
        );

        Ok(summary)
    }

    /// Extract the hook of one caption file and write it next to the others
    pub fn process_file(&self, caption_file: &Path) -> Result<FileOutcome, HookError> {
        let output_path = FileManager::generate_output_path(caption_file, &self.config.hooks_dir, "txt");
        if self.config.skip_existing && output_path.exists() {
            debug!("Skipping {}, hook already exists", caption_file.display());
            return Ok(FileOutcome::Skipped(output_path));
        }

        let content = FileManager::read_to_string(caption_file)?;
        let track = CaptionTrack::parse(caption_file.to_path_buf(), &content);
        debug!("{}", track);

        if track.is_empty() {
            warn!("No subtitles found in {}", caption_file.display());
            return Ok(FileOutcome::NoCues);
        }

        if let Some(span) = track.span_ms() {
            debug!("{} cue(s) spanning {} ms", track.cues.len(), span);
        }

        let hook = track.hook();
        if hook.is_empty() {
            warn!("No hook found in {}", caption_file.display());
            return Ok(FileOutcome::NoHook);
        }

        FileManager::write_to_file(&output_path, &hook)?;
        info!("Hook saved to {}", output_path.display());

        Ok(FileOutcome::Written(output_path))
    }

    fn progress_bar(len: u64) -> ProgressBar {
        if !std::io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style.progress_chars("#>-"));
        progress
    }
}
