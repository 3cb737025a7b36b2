//! Integration tests for lyricsync
//!
//! Runs the parsers the way a player does: parse once, then look up the
//! active line or section on every tick.

use lyricsync::{
    active_line, active_section, active_section_index, clean_lrc, find_active_index, format_lrc,
    join_sections, parse_lrc, parse_sections, LrcDocument, Settings, TimedLyricLine,
};

const GENERATED_LYRICS: &str = "[Verse 1]
Neon on the water
Engines in the rain

[Chorus]
Drive until the morning
Drive until it's gone

[Bridge]
Hold on
[Outro]";

const GENERATED_LRC: &str = "[ti:Night Drive]
[ar:Studio]
[offset:0]
[00:00.00][Verse 1]
[00:04.20]Neon on the water
[00:08.750]Engines in the rain
[00:12.00]
[00:12.50]Chorus
[00:13.00]Drive until the morning
[00:17.40]Drive until it's gone
[00:21.00]副歌
[00:22.10]Hold on";

#[test]
fn test_generated_lyrics_sections() {
    let sections = parse_sections(Some(GENERATED_LYRICS));
    let tags: Vec<&str> = sections.iter().map(|s| s.tag.as_str()).collect();
    assert_eq!(tags, vec!["Verse 1", "Chorus", "Bridge", "Outro"]);
    assert_eq!(
        sections[0].lines,
        vec!["Neon on the water", "Engines in the rain", ""]
    );
    assert!(sections[3].lines.is_empty());
    assert_eq!(join_sections(&sections), GENERATED_LYRICS);
}

#[test]
fn test_section_estimate_over_track() {
    let sections = parse_sections(Some(GENERATED_LYRICS));
    let duration = 80.0;
    let seen: Vec<Option<usize>> = [0.0, 19.9, 20.0, 45.0, 79.0, 120.0]
        .iter()
        .map(|&t| active_section_index(t, duration, sections.len()))
        .collect();
    assert_eq!(seen, vec![Some(0), Some(0), Some(1), Some(2), Some(3), Some(3)]);

    let section = active_section(Some(GENERATED_LYRICS), 45.0, duration).unwrap();
    assert_eq!(section.tag, "Bridge");
    assert!(active_section(None, 45.0, duration).is_none());
}

#[test]
fn test_generated_lrc_lines() {
    let lines = parse_lrc(GENERATED_LRC);
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Neon on the water",
            "Engines in the rain",
            "Drive until the morning",
            "Drive until it's gone",
            "Hold on",
        ]
    );
    assert_eq!(lines[0].time, 4.2);
    assert_eq!(lines[1].time, 8.75);
}

#[test]
fn test_playback_ticks() {
    let lines = parse_lrc(GENERATED_LRC);
    let mut active = Vec::new();
    let mut t = 0.0;
    while t < 25.0 {
        active.push(find_active_index(&lines, t));
        t += 5.0;
    }
    assert_eq!(active, vec![None, Some(0), Some(1), Some(2), Some(3)]);

    let line = active_line(GENERATED_LRC, 22.5).unwrap();
    assert_eq!(line.text, "Hold on");
    assert!(active_line(GENERATED_LRC, 1.0).is_none());
}

#[test]
fn test_clean_then_parse_matches_parse() {
    let cleaned = clean_lrc(GENERATED_LRC);
    assert_eq!(cleaned.lines().count(), 5);
    assert_eq!(parse_lrc(&cleaned), parse_lrc(GENERATED_LRC));
    assert!(cleaned.starts_with("[00:04.20]Neon on the water"));
}

#[test]
fn test_document_metadata() {
    let doc = LrcDocument::parse(GENERATED_LRC);
    assert_eq!(doc.metadata.title.as_deref(), Some("Night Drive"));
    assert_eq!(doc.metadata.artist.as_deref(), Some("Studio"));
    assert_eq!(doc.adjusted_lines(), doc.lines);
}

#[test]
fn test_format_lrc_output() {
    let lines = vec![
        TimedLyricLine::new(4.2, "Neon on the water"),
        TimedLyricLine::new(130.05, "late"),
    ];
    assert_eq!(
        format_lrc(&lines),
        "[00:04.20]Neon on the water\n[02:10.05]late\n"
    );
}

#[test]
fn test_settings_extend_marker_filter() {
    let settings = Settings::from_yaml("extra-markers: [Hook]").unwrap();
    let filter = settings.marker_filter().unwrap();
    let doc = LrcDocument::parse_with("[00:01.00]Hook\n[00:02.00]Chorus\n[00:03.00]real", &filter);
    assert_eq!(doc.lines, vec![TimedLyricLine::new(3.0, "real")]);
}

#[test]
fn test_serialized_shape() {
    let sections = parse_sections(Some("[Chorus]\nla"));
    let json = serde_json::to_value(&sections).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "tag": "Chorus", "lines": ["la"], "index": 0 }])
    );

    let doc = LrcDocument::parse("[offset:-50]\n[00:01.00]hi");
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["metadata"]["offsetMs"], -50);
    assert_eq!(json["lines"][0]["time"], 1.0);
}
