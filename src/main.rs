use std::env;
use std::fs;
use std::process;

use log::LevelFilter;
use serde::Serialize;

use lyricsync::{
    active_section_index, clean_lrc_with, find_active_index, format_lrc, parse_sections,
    LrcDocument, LyricSection, LyricsError, OutputFormat, Settings, TimedLyricLine,
};

const USAGE: &str = "\
Usage: lyricsync [-v] [--config <file.yaml>] [--json|--text] <command> ...

Commands:
  sections <file>                        Split tagged lyrics into sections
  lrc <file>                             Parse an LRC file
  clean <file> [output]                  Remove markers and untimed lines from an LRC file
  at <file> <seconds>                    Show the LRC line playing at a time
  estimate <file> <seconds> <duration>   Estimate the section playing at a time";

fn init_logging(verbosity: usize) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbosity {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    let _ = builder.format_timestamp(None).try_init();
}

/// What the command line asked for
#[derive(Debug)]
enum Request {
    Help,
    Run(Invocation),
}

/// Parsed command line
#[derive(Debug)]
struct Invocation {
    verbosity: usize,
    config: Option<String>,
    format: Option<OutputFormat>,
    command: String,
    args: Vec<String>,
}

fn parse_args(args: Vec<String>) -> Result<Request, LyricsError> {
    let mut verbosity = 0;
    let mut config = None;
    let mut format = None;
    let mut rest = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => verbosity += 1,
            "-vv" => verbosity += 2,
            "--json" => format = Some(OutputFormat::Json),
            "--text" => format = Some(OutputFormat::Text),
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| LyricsError::Usage("--config requires a file".to_string()))?;
                config = Some(path);
            }
            "-h" | "--help" => return Ok(Request::Help),
            _ => rest.push(arg),
        }
    }

    if rest.is_empty() {
        return Err(LyricsError::Usage(USAGE.to_string()));
    }
    let command = rest.remove(0);

    Ok(Request::Run(Invocation {
        verbosity,
        config,
        format,
        command,
        args: rest,
    }))
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, LyricsError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| LyricsError::Usage(format!("missing <{}>\n\n{}", name, USAGE)))
}

fn number_arg(args: &[String], index: usize, name: &str) -> Result<f64, LyricsError> {
    let value = arg(args, index, name)?;
    value.parse().map_err(|_| LyricsError::InvalidNumber {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn read_file(path: &str) -> Result<String, LyricsError> {
    fs::read_to_string(path).map_err(|e| LyricsError::Io {
        path: path.to_string(),
        source: e,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveLineReport {
    time: f64,
    index: i64,
    line: Option<TimedLyricLine>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveSectionReport {
    time: f64,
    duration: f64,
    index: i64,
    section: Option<LyricSection>,
}

fn to_js_index(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}

fn active_line_report(lines: &[TimedLyricLine], time: f64) -> ActiveLineReport {
    let index = find_active_index(lines, time);
    ActiveLineReport {
        time,
        index: to_js_index(index),
        line: index.map(|i| lines[i].clone()),
    }
}

fn active_section_report(lyrics: &str, time: f64, duration: f64) -> ActiveSectionReport {
    let sections = parse_sections(Some(lyrics));
    let index = active_section_index(time, duration, sections.len());
    ActiveSectionReport {
        time,
        duration,
        index: to_js_index(index),
        section: index.map(|i| sections[i].clone()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), LyricsError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_sections_text(sections: &[LyricSection]) {
    for section in sections {
        let tag = if section.tag.is_empty() { "(untagged)" } else { section.tag.as_str() };
        println!("#{} {}", section.index, tag);
        for line in &section.lines {
            println!("    {}", line);
        }
    }
}

fn load_document(path: &str, settings: &Settings) -> Result<(LrcDocument, Vec<TimedLyricLine>), LyricsError> {
    let text = read_file(path)?;
    let filter = settings.marker_filter()?;
    let document = LrcDocument::parse_with(&text, &filter);
    let offset_ms = document.metadata.offset_ms.saturating_add(settings.offset_ms);
    let lines = document.shifted_lines(offset_ms);
    Ok((document, lines))
}

fn run(invocation: Invocation, settings: Settings) -> Result<(), LyricsError> {
    let format = invocation.format.unwrap_or(settings.format);
    let args = &invocation.args;

    match invocation.command.as_str() {
        "sections" => {
            let text = read_file(arg(args, 0, "file")?)?;
            let sections = parse_sections(Some(&text));
            match format {
                OutputFormat::Json => print_json(&sections)?,
                OutputFormat::Text => print_sections_text(&sections),
            }
        }
        "lrc" => {
            let (document, lines) = load_document(arg(args, 0, "file")?, &settings)?;
            match format {
                OutputFormat::Json => print_json(&LrcDocument {
                    metadata: document.metadata,
                    lines,
                })?,
                OutputFormat::Text => print!("{}", format_lrc(&lines)),
            }
        }
        "clean" => {
            let input = arg(args, 0, "file")?;
            let text = read_file(input)?;
            let cleaned = clean_lrc_with(&text, &settings.marker_filter()?);
            match args.get(1) {
                Some(output) => {
                    fs::write(output, format!("{}\n", cleaned)).map_err(|e| LyricsError::Io {
                        path: output.clone(),
                        source: e,
                    })?;
                    eprintln!("Wrote cleaned LRC to {}", output);
                }
                None => println!("{}", cleaned),
            }
        }
        "at" => {
            let (_, lines) = load_document(arg(args, 0, "file")?, &settings)?;
            let time = number_arg(args, 1, "seconds")?;
            let report = active_line_report(&lines, time);
            match format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Text => match &report.line {
                    Some(line) => println!("{} {}", report.index, line.text),
                    None => println!("-1"),
                },
            }
        }
        "estimate" => {
            let text = read_file(arg(args, 0, "file")?)?;
            let time = number_arg(args, 1, "seconds")?;
            let duration = number_arg(args, 2, "duration")?;
            let report = active_section_report(&text, time, duration);
            match format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Text => match &report.section {
                    Some(section) => println!("{} {}", report.index, section.tag),
                    None => println!("-1"),
                },
            }
        }
        other => {
            return Err(LyricsError::Usage(format!(
                "unknown command '{}'\n\n{}",
                other, USAGE
            )))
        }
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let invocation = match parse_args(args) {
        Ok(Request::Run(invocation)) => invocation,
        Ok(Request::Help) => {
            println!("{}", USAGE);
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    init_logging(invocation.verbosity);

    let settings = match &invocation.config {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        },
        None => Settings::default(),
    };

    if let Err(e) = run(invocation, settings) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn invocation(list: &[&str]) -> Invocation {
        match parse_args(args(list)).unwrap() {
            Request::Run(invocation) => invocation,
            Request::Help => panic!("expected a command"),
        }
    }

    fn lrc_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_args_flags_anywhere() {
        let inv = invocation(&["-v", "at", "--config", "cfg.yaml", "song.lrc", "--text", "12.5"]);
        assert_eq!(inv.verbosity, 1);
        assert_eq!(inv.config.as_deref(), Some("cfg.yaml"));
        assert_eq!(inv.format, Some(OutputFormat::Text));
        assert_eq!(inv.command, "at");
        assert_eq!(inv.args, vec!["song.lrc", "12.5"]);
    }

    #[test]
    fn test_parse_args_verbosity() {
        assert_eq!(invocation(&["-vv", "lrc", "a"]).verbosity, 2);
        assert_eq!(invocation(&["-v", "--verbose", "lrc", "a"]).verbosity, 2);
        assert_eq!(invocation(&["lrc", "a"]).verbosity, 0);
        assert_eq!(invocation(&["lrc", "a"]).format, None);
    }

    #[test]
    fn test_parse_args_help() {
        assert!(matches!(parse_args(args(&["--help"])), Ok(Request::Help)));
        assert!(matches!(parse_args(args(&["lrc", "-h"])), Ok(Request::Help)));
    }

    #[test]
    fn test_parse_args_errors() {
        let err = parse_args(args(&["lrc", "--config"])).unwrap_err();
        assert!(matches!(err, LyricsError::Usage(ref m) if m.contains("--config")));

        assert!(matches!(parse_args(Vec::new()), Err(LyricsError::Usage(_))));
        assert!(matches!(parse_args(args(&["-v", "--json"])), Err(LyricsError::Usage(_))));
    }

    #[test]
    fn test_number_arg() {
        let list = args(&["song.lrc", "abc", "3.5"]);
        assert_eq!(number_arg(&list, 2, "duration").unwrap(), 3.5);

        let err = number_arg(&list, 1, "seconds").unwrap_err();
        assert_eq!(err.to_string(), "Invalid number for seconds: 'abc'");

        assert!(matches!(number_arg(&list, 5, "duration"), Err(LyricsError::Usage(_))));
    }

    #[test]
    fn test_load_document_combines_offsets() {
        let file = lrc_file("[offset:500]\n[00:02.00]one\n[00:05.00]two\n");
        let settings = Settings {
            offset_ms: 1000,
            ..Settings::default()
        };
        let path = file.path().to_str().unwrap();
        let (document, lines) = load_document(path, &settings).unwrap();
        assert_eq!(document.metadata.offset_ms, 500);
        assert_eq!(document.lines[0].time, 2.0);
        assert_eq!(lines[0].time, 0.5);
        assert_eq!(lines[1].time, 3.5);
    }

    #[test]
    fn test_load_document_offset_does_not_overflow() {
        let file = lrc_file("[offset:9223372036854775807]\n[00:01.00]a\n");
        let settings = Settings {
            offset_ms: 1,
            ..Settings::default()
        };
        let (_, lines) = load_document(file.path().to_str().unwrap(), &settings).unwrap();
        assert_eq!(lines, vec![TimedLyricLine::new(0.0, "a")]);
    }

    #[test]
    fn test_load_document_uses_extra_markers() {
        let file = lrc_file("[00:01.00]Hook\n[00:02.00]sung\n");
        let settings = Settings::from_yaml("extra-markers: [Hook]").unwrap();
        let (_, lines) = load_document(file.path().to_str().unwrap(), &settings).unwrap();
        assert_eq!(lines, vec![TimedLyricLine::new(2.0, "sung")]);
    }

    #[test]
    fn test_load_document_missing_file() {
        let err = load_document("/nonexistent/song.lrc", &Settings::default()).unwrap_err();
        assert!(matches!(err, LyricsError::Io { .. }));
    }

    #[test]
    fn test_active_line_report() {
        let lines = vec![TimedLyricLine::new(1.0, "one"), TimedLyricLine::new(2.0, "two")];

        let report = active_line_report(&lines, 2.5);
        assert_eq!(report.index, 1);
        assert_eq!(report.line.as_ref().map(|l| l.text.as_str()), Some("two"));

        let report = active_line_report(&lines, 0.5);
        assert_eq!(report.index, -1);
        assert!(report.line.is_none());

        let json = serde_json::to_value(active_line_report(&[], 3.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "time": 3.0, "index": -1, "line": null }));
    }

    #[test]
    fn test_active_section_report() {
        let lyrics = "[Verse]\na\n[Chorus]\nb";
        let report = active_section_report(lyrics, 60.0, 100.0);
        assert_eq!(report.index, 1);
        assert_eq!(report.section.map(|s| s.tag), Some("Chorus".to_string()));

        let report = active_section_report(lyrics, 60.0, 0.0);
        assert_eq!(report.index, -1);
        assert!(report.section.is_none());
    }
}
