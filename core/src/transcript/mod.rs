pub mod record;

use crate::config::ColumnConfig;
use crate::error::{CoreError, CoreResult};
use crate::normalize::Normalizer;
use std::collections::HashMap;
use std::io::BufRead;

/// File key -> normalized transcript. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptMap {
    entries: HashMap<String, String>,
}

impl TranscriptMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins.
    pub fn insert(&mut self, key: impl Into<String>, transcript: impl Into<String>) {
        self.entries.insert(key.into(), transcript.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub map: TranscriptMap,
    pub lines_read: usize,
    pub lines_skipped: usize,
}

/// Extract `(file key, normalized transcript)` from one sheet line.
pub fn parse_line(
    line: &str,
    config: &ColumnConfig,
    normalizer: &Normalizer,
) -> CoreResult<(String, String)> {
    let mut fields = record::parse_record(line)?;
    let raw_transcript = fields
        .get(config.transcript)
        .map(|s| s.as_str())
        .unwrap_or("");
    let transcript = normalizer.normalize(raw_transcript)?;

    if config.file_name >= fields.len() {
        return Err(CoreError::MalformedRecord(format!(
            "no file key in column {}",
            config.file_name
        )));
    }
    let key = fields.swap_remove(config.file_name);
    Ok((key, transcript))
}

/// Consume the whole sheet and build the transcript mapping.
///
/// Bad lines are logged and skipped; only a read error on the source is fatal.
pub fn build_transcript_map<R: BufRead>(
    reader: R,
    config: &ColumnConfig,
    normalizer: &Normalizer,
) -> CoreResult<ParseReport> {
    let mut report = ParseReport::default();
    for line in reader.lines() {
        let line = line?;
        report.lines_read += 1;
        match parse_line(&line, config, normalizer) {
            Ok((key, transcript)) => report.map.insert(key, transcript),
            Err(e) => {
                log::warn!("can not parse this line: {} ({})", line, e);
                report.lines_skipped += 1;
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cfg(file_name: usize, transcript: usize) -> ColumnConfig {
        ColumnConfig {
            file_name,
            transcript,
        }
    }

    fn build(input: &str, config: ColumnConfig) -> ParseReport {
        let n = Normalizer::standard().unwrap();
        build_transcript_map(Cursor::new(input), &config, &n).unwrap()
    }

    #[test]
    fn parse_line_uses_configured_columns() {
        let n = Normalizer::standard().unwrap();
        let (k, t) = parse_line(r#"wav1,,"Run 5 km!""#, &cfg(0, 2), &n).unwrap();
        assert_eq!(k, "wav1");
        assert_eq!(t, "run five kilometer");

        let (k, t) = parse_line("Hello There,b.wav", &cfg(1, 0), &n).unwrap();
        assert_eq!(k, "b.wav");
        assert_eq!(t, "hello there");
    }

    #[test]
    fn missing_transcript_column_is_empty() {
        let n = Normalizer::standard().unwrap();
        let (k, t) = parse_line("only.wav", &cfg(0, 5), &n).unwrap();
        assert_eq!(k, "only.wav");
        assert_eq!(t, "");
    }

    #[test]
    fn missing_key_column_is_malformed() {
        let n = Normalizer::standard().unwrap();
        assert!(matches!(
            parse_line("hello", &cfg(3, 0), &n),
            Err(CoreError::MalformedRecord(_))
        ));
    }

    #[test]
    fn empty_key_is_stored_as_is() {
        let n = Normalizer::standard().unwrap();
        let (k, t) = parse_line(",Hello", &cfg(0, 1), &n).unwrap();
        assert_eq!(k, "");
        assert_eq!(t, "hello");

        let report = build(",Hello\na.wav,x\n", cfg(0, 1));
        assert_eq!(report.lines_skipped, 0);
        assert_eq!(report.map.get(""), Some("hello"));
    }

    #[test]
    fn last_duplicate_wins() {
        let report = build("a.wav,first\na.wav,second\n", cfg(0, 1));
        assert_eq!(report.map.len(), 1);
        assert_eq!(report.map.get("a.wav"), Some("second"));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let input = "a.wav,ok one\nb.wav,\"broken\nc.wav,ok three\n";
        let report = build(input, cfg(0, 1));
        assert_eq!(report.lines_read, 3);
        assert_eq!(report.lines_skipped, 1);
        assert_eq!(report.map.get("a.wav"), Some("ok one"));
        assert_eq!(report.map.get("b.wav"), None);
        assert_eq!(report.map.get("c.wav"), Some("ok three"));
    }

    #[test]
    fn crlf_and_blank_lines() {
        let report = build("a.wav,One\r\n\r\nb.wav,Two\r\n", cfg(0, 1));
        assert_eq!(report.lines_read, 3);
        assert_eq!(report.lines_skipped, 1);
        assert_eq!(report.map.get("a.wav"), Some("one"));
        assert_eq!(report.map.get("b.wav"), Some("two"));
    }

    #[test]
    fn no_header_row_is_assumed() {
        let report = build("wav_filename,transcript\nx.wav,hi\n", cfg(0, 1));
        assert_eq!(report.map.get("wav_filename"), Some("transcript"));
        assert_eq!(report.map.get("x.wav"), Some("hi"));
    }

    #[test]
    fn unexpandable_number_skips_line() {
        let report = build("a.wav,call 99999999999999999999\nb.wav,ok\n", cfg(0, 1));
        assert_eq!(report.lines_skipped, 1);
        assert!(report.map.get("a.wav").is_none());
        assert_eq!(report.map.get("b.wav"), Some("ok"));
    }
}
