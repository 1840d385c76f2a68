/*!
 * Tests for caption cleaning and hook extraction
 */

use std::path::PathBuf;
use subhook::subtitle_processor::{
    build_hook, clean_vtt, dedupe_and_order, extract_cues, extract_hook, parse_timestamp,
    CaptionTrack, Cue, CueMap,
};
use crate::common;

/// Header, note and blank lines leave nothing behind
#[test]
fn test_clean_vtt_withOnlyNoiseLines_shouldReturnEmpty() {
    let raw = "WEBVTT\n\nNOTE generated by a tool\n   \n\t\n";
    assert_eq!(clean_vtt(raw), "");
}

/// Inline tags are stripped and line terminators survive
#[test]
fn test_clean_vtt_withInlineTags_shouldStripAllMarkup() {
    let raw = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n<v Roger><b>Hello</b> <i>there</i><00:00:01.500><c> friend</c>\n";
    let cleaned = clean_vtt(raw);

    assert_eq!(cleaned, "00:00:01.000 --> 00:00:02.000\nHello there friend\n");
    assert!(!cleaned.contains('<'));
    assert!(!cleaned.contains('>'));
}

/// Windows line endings behave like Unix ones
#[test]
fn test_clean_vtt_withCrlfLineEndings_shouldNormalize() {
    let raw = "WEBVTT\r\n\r\n00:00:01.000 --> 00:00:02.000\r\nHello\r\n";
    assert_eq!(clean_vtt(raw), "00:00:01.000 --> 00:00:02.000\nHello\n");
    assert_eq!(extract_hook(raw), "Hello");
}

/// Metadata lines such as Kind: are kept by cleaning but never become cues
#[test]
fn test_extract_cues_withHeaderMetadata_shouldIgnoreTextBeforeFirstCue() {
    let plain = "Kind: captions\nLanguage: en\n00:00:01.000 --> 00:00:02.000\nHi\n";
    let cues = extract_cues(plain);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues.get("00:00:01.000").map(|b| b.text.as_str()), Some("Hi"));
}

/// No timing lines means no cues
#[test]
fn test_extract_cues_withNoTimingLines_shouldReturnEmptyMap() {
    assert!(extract_cues("just some words\nand more\n").is_empty());
    assert!(extract_cues("").is_empty());
}

/// Cues sharing a start time merge in file order, keeping the first end time
#[test]
fn test_extract_cues_withSharedStartTime_shouldAppendNewText() {
    let plain = "00:00:01.000 --> 00:00:02.000\nfirst part\n00:00:01.000 --> 00:00:03.000\nsecond part\n";
    let cues = extract_cues(plain);

    assert_eq!(cues.len(), 1);
    let body = cues.get("00:00:01.000").unwrap();
    assert_eq!(body.text, "first part second part");
    assert_eq!(body.end_time, "00:00:02.000");
}

/// A repeat whose text is already contained is not appended again
#[test]
fn test_extract_cues_withContainedText_shouldKeepAccumulatedText() {
    let plain = "00:00:01.000 --> 00:00:02.000\nthe quick fox\n00:00:01.000 --> 00:00:02.000\nquick\n";
    let cues = extract_cues(plain);

    assert_eq!(cues.get("00:00:01.000").unwrap().text, "the quick fox");
}

/// Cue settings after the timing line never reach the text
#[test]
fn test_extract_cues_withCueSettings_shouldStripThem() {
    let plain = "00:00:01.000 --> 00:00:02.000 align:start position:0% line:90% size:80%\nspoken words\n";
    let cues = extract_cues(plain);

    assert_eq!(cues.get("00:00:01.000").unwrap().text, "spoken words");
}

/// Setting-like words in the caption text are spoken words and stay
#[test]
fn test_extract_hook_withSettingLikeWordsInText_shouldKeepThem() {
    let raw = "00:00:01.000 --> 00:00:02.000\nShoe size:10 and line:up\n";
    assert_eq!(extract_hook(raw), "Shoe size:10 and line:up");

    let raw = "00:00:01.000 --> 00:00:02.000 align:start\nShoe size:10\n";
    assert_eq!(extract_hook(raw), "Shoe size:10");
}

/// An empty first text is contained in anything, so the next text follows a space
#[test]
fn test_cue_map_merge_withEmptyFirstText_shouldAppendAfterSpace() {
    let mut cues = CueMap::new();
    cues.merge("00:00:01.000", "00:00:02.000", "");
    cues.merge("00:00:01.000", "00:00:03.000", "abc");
    cues.merge("00:00:01.000", "00:00:03.000", "");

    let body = cues.get("00:00:01.000").unwrap();
    assert_eq!(body.text, " abc");
    assert_eq!(body.end_time, "00:00:02.000");
}

/// Any Unicode whitespace in front of a timestamp ends the body
#[test]
fn test_extract_cues_withUnicodeWhitespaceBoundary_shouldSplitCues() {
    let plain = "00:00:01.000 --> 00:00:02.000\nHi\u{2003}00:00:03.000 --> 00:00:04.000\nBye\n";
    let cues = extract_cues(plain);

    assert_eq!(cues.len(), 2);
    assert_eq!(cues.get("00:00:01.000").unwrap().text, "Hi");
    assert_eq!(cues.get("00:00:03.000").unwrap().text, "Bye");
}

/// Insertion order follows the first appearance of each start time
#[test]
fn test_extract_cues_withOutOfOrderStarts_shouldKeepFileOrder() {
    let plain = "00:00:05.000 --> 00:00:06.000\nlater\n00:00:01.000 --> 00:00:02.000\nearlier\n";
    let cues = extract_cues(plain);
    let starts: Vec<&str> = cues.iter().map(|(start, _)| start).collect();

    assert_eq!(starts, vec!["00:00:05.000", "00:00:01.000"]);
}

/// The final cue needs trailing whitespace to be recognised
#[test]
fn test_extract_cues_withoutTrailingWhitespace_shouldDropLastCue() {
    let plain = "00:00:01.000 --> 00:00:02.000\nkept\n00:00:02.000 --> 00:00:03.000\ndropped";
    let cues = extract_cues(plain);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues.get("00:00:01.000").unwrap().text, "kept");
}

/// A timestamp inside cue text ends that cue's body
#[test]
fn test_extract_cues_withTimestampInText_shouldCutBodyAtTimestamp() {
    let plain = "00:00:01.000 --> 00:00:02.000\nat 00:00:05.000 we start\n";
    let cues = extract_cues(plain);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues.get("00:00:01.000").unwrap().text, "at");
}

/// Identical text under a later start time is dropped
#[test]
fn test_dedupe_and_order_withRepeatedText_shouldDropLaterOccurrence() {
    let mut cues = CueMap::new();
    cues.merge("00:00:01.000", "00:00:02.000", "Hello world");
    cues.merge("00:00:02.000", "00:00:03.000", "Hello world");
    cues.merge("00:00:03.000", "00:00:04.000", "Goodbye");

    let ordered = dedupe_and_order(&cues);

    assert_eq!(ordered, vec![
        Cue::new("00:00:01.000", "00:00:02.000", "Hello world"),
        Cue::new("00:00:03.000", "00:00:04.000", "Goodbye"),
    ]);
}

/// Empty bodies are never kept
#[test]
fn test_dedupe_and_order_withEmptyText_shouldSkipEntry() {
    let mut cues = CueMap::new();
    cues.merge("00:00:01.000", "00:00:02.000", "");
    cues.merge("00:00:02.000", "00:00:03.000", "words");

    let ordered = dedupe_and_order(&cues);

    assert_eq!(ordered.len(), 1);
    assert_eq!(ordered[0].start_time, "00:00:02.000");
}

/// Hooks are the space-joined texts; nothing gives an empty hook
#[test]
fn test_build_hook_withCues_shouldSpaceJoinTexts() {
    let cues = vec![
        Cue::new("00:00:01.000", "00:00:02.000", "one"),
        Cue::new("00:00:02.000", "00:00:03.000", "two"),
    ];

    assert_eq!(build_hook(&cues), "one two");
    assert_eq!(build_hook(&[]), "");
}

/// The duplicate second cue disappears from the hook
#[test]
fn test_extract_hook_withDuplicateCue_shouldReturnSingleText() {
    let raw = "WEBVTT

00:00:01.000 --> 00:00:02.000
Hello world

00:00:02.000 --> 00:00:03.000
Hello world
";

    assert_eq!(extract_hook(raw), "Hello world");
}

/// Rolling auto-captions keep only the first copy of each exact body
#[test]
fn test_extract_hook_withAutoCaptions_shouldDropExactRepeats() {
    let hook = extract_hook(common::AUTO_CAPTION_VTT);

    assert_eq!(hook, "what if I told you what if I told you\nthis works this works");
    assert!(!hook.contains("align:"));
    assert!(!hook.contains('<'));
}

/// Timestamp parsing accepts HH:MM:SS.mmm only
#[test]
fn test_parse_timestamp_withVariousInputs_shouldValidate() {
    assert_eq!(parse_timestamp("01:02:03.456").unwrap(), 3_723_456);
    assert_eq!(parse_timestamp("00:00:00.000").unwrap(), 0);
    assert!(parse_timestamp("00:61:00.000").is_err());
    assert!(parse_timestamp("00:00:00").is_err());
    assert!(parse_timestamp("aa:00:00.000").is_err());
}

/// Caption tracks expose their hook and covered span
#[test]
fn test_caption_track_withParsedContent_shouldExposeHookAndSpan() {
    let raw = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nfirst\n\n00:00:02.000 --> 00:00:04.500\nsecond\n";
    let track = CaptionTrack::parse(PathBuf::from("video.vtt"), raw);

    assert!(!track.is_empty());
    assert_eq!(track.cues.len(), 2);
    assert_eq!(track.hook(), "first second");
    assert_eq!(track.span_ms(), Some(3_500));
    assert!(track.to_string().contains("Cues: 2"));
}
