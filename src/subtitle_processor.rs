use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};

// @module: WebVTT cleaning and hook extraction

// @const: Inline markup such as <c>, <i> or <00:00:01.200>
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").unwrap()
});

// @const: Cue timing line, followed by the single whitespace that opens the body
static CUE_HEAD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2}\.\d{3}) --> (\d{2}:\d{2}:\d{2}\.\d{3})\s").unwrap()
});

// @const: Whitespace directly in front of the next timestamp ends a cue body
static CUE_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s\d{2}:\d{2}:\d{2}\.\d{3}").unwrap()
});

// @const: Cue settings trailing the timing line (align:start position:0% ...)
static CUE_SETTINGS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:align|position|line|size|vertical|region):\S+").unwrap()
});

/// A single timed caption entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Start timestamp, `HH:MM:SS.mmm`
    pub start_time: String,

    /// End timestamp, `HH:MM:SS.mmm`
    pub end_time: String,

    /// Cleaned caption text
    pub text: String,
}

impl Cue {
    pub fn new(start_time: &str, end_time: &str, text: &str) -> Self {
        Cue {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            text: text.to_string(),
        }
    }

    pub fn start_ms(&self) -> Result<u64> {
        parse_timestamp(&self.start_time)
    }

    pub fn end_ms(&self) -> Result<u64> {
        parse_timestamp(&self.end_time)
    }
}

/// Body stored under a start time in a [`CueMap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueBody {
    pub end_time: String,
    pub text: String,
}

/// Cues keyed by start time, iterated in first-insertion order
#[derive(Debug, Default, Clone)]
pub struct CueMap {
    entries: Vec<(String, CueBody)>,
    index: HashMap<String, usize>,
}

impl CueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, start_time: &str) -> Option<&CueBody> {
        self.index.get(start_time).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CueBody)> {
        self.entries.iter().map(|(start, body)| (start.as_str(), body))
    }

    /// Record a cue. A repeated start time keeps its first end time and only
    /// grows when the new text is not already contained in what it holds.
    pub fn merge(&mut self, start_time: &str, end_time: &str, text: &str) {
        match self.index.get(start_time) {
            Some(&i) => {
                let body = &mut self.entries[i].1;
                if !body.text.contains(text) {
                    body.text.push(' ');
                    body.text.push_str(text);
                }
            }
            None => {
                self.index.insert(start_time.to_string(), self.entries.len());
                self.entries.push((
                    start_time.to_string(),
                    CueBody {
                        end_time: end_time.to_string(),
                        text: text.to_string(),
                    },
                ));
            }
        }
    }
}

/// Parse a WebVTT timestamp (`HH:MM:SS.mmm`) to milliseconds
pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
    let parts: Vec<&str> = timestamp.split(&[':', '.'][..]).collect();

    if parts.len() != 4 {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

fn is_noise_line(line: &str) -> bool {
    line.starts_with("WEBVTT") || line.starts_with("NOTE") || line.trim().is_empty()
}

/// Remove header, note and blank lines, then strip inline tags.
///
/// Surviving lines keep their terminators, so the result is still line
/// oriented. Line endings are normalised to `\n` first.
pub fn clean_vtt(raw: &str) -> String {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");

    normalized
        .split_inclusive('\n')
        .filter(|line| !is_noise_line(line))
        .map(|line| TAG_REGEX.replace_all(line, ""))
        .collect()
}

// Settings only live on the rest of the timing line, never in the caption text
fn strip_cue_settings(body: &str, timing_line_ended: bool) -> String {
    let settings_len = if timing_line_ended {
        0
    } else {
        body.find('\n').unwrap_or(body.len())
    };
    let (settings, caption) = body.split_at(settings_len);

    let mut text = CUE_SETTINGS_REGEX.replace_all(settings, "").into_owned();
    text.push_str(caption);
    text
}

/// Scan cleaned text for cues and merge those sharing a start time.
///
/// A body runs from the timing line up to the first whitespace that sits
/// right before another timestamp, or up to a final whitespace character at
/// the end of input. A cue with neither boundary ends the scan.
pub fn extract_cues(plain_text: &str) -> CueMap {
    let mut cues = CueMap::new();
    let mut pos = 0;

    while let Some(head) = CUE_HEAD_REGEX.captures_at(plain_text, pos) {
        let (Some(whole), Some(start), Some(end)) = (head.get(0), head.get(1), head.get(2)) else {
            break;
        };
        let body_start = whole.end();

        let (body_end, resume_at) = match CUE_BOUNDARY_REGEX.find_at(plain_text, body_start) {
            Some(boundary) => {
                let ws_len = plain_text[boundary.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                (boundary.start(), boundary.start() + ws_len)
            }
            None => match plain_text[body_start..].chars().next_back() {
                Some(last) if last.is_whitespace() => {
                    (plain_text.len() - last.len_utf8(), plain_text.len())
                }
                _ => break,
            },
        };

        let body = &plain_text[body_start..body_end];
        let text = strip_cue_settings(body, whole.as_str().ends_with('\n'));
        cues.merge(start.as_str(), end.as_str(), text.trim());

        pos = resume_at;
    }

    cues
}

/// Keep non-empty cue texts the first time they appear anywhere in the map.
pub fn dedupe_and_order(cues: &CueMap) -> Vec<Cue> {
    let mut seen_texts: HashSet<&str> = HashSet::new();

    cues.iter()
        .filter(|&(_, body)| !body.text.is_empty() && seen_texts.insert(body.text.as_str()))
        .map(|(start, body)| Cue::new(start, &body.end_time, &body.text))
        .collect()
}

/// Space-join the cue texts. Empty input gives an empty hook.
pub fn build_hook(cues: &[Cue]) -> String {
    cues.iter()
        .map(|cue| cue.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full pipeline from raw WebVTT content to hook text
pub fn extract_hook(raw_text: &str) -> String {
    let cues = dedupe_and_order(&extract_cues(&clean_vtt(raw_text)));
    build_hook(&cues)
}

/// Unique cues of one caption file
#[derive(Debug, Clone)]
pub struct CaptionTrack {
    /// Source filename
    pub source_file: PathBuf,

    /// Deduplicated cues in first-appearance order
    pub cues: Vec<Cue>,
}

impl CaptionTrack {
    /// Parse raw WebVTT content read from `source_file`
    pub fn parse(source_file: PathBuf, raw_text: &str) -> Self {
        let cue_map = extract_cues(&clean_vtt(raw_text));
        CaptionTrack {
            source_file,
            cues: dedupe_and_order(&cue_map),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn hook(&self) -> String {
        build_hook(&self.cues)
    }

    /// Milliseconds from the first cue start to the last cue end
    pub fn span_ms(&self) -> Option<u64> {
        let first = self.cues.first()?.start_ms().ok()?;
        let last = self.cues.last()?.end_ms().ok()?;
        Some(last.saturating_sub(first))
    }
}

impl fmt::Display for CaptionTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Caption Track")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
