//! Marker line recognition.
//!
//! A marker line contains the sentinel (`CITES` by default) and carries the
//! English name after "separator + space", terminated by a comma:
//!
//! ```text
//! Panthera leo                                   <- lookback line (Latin name)
//! CITES II / Lion, Löwe, IUCN: VU                <- standard form
//! CITES I OBSOLETE A/B / Lion, IUCN: VU          <- superseded form
//! ```
//!
//! In the superseded form the flag token precedes another separator fragment
//! that is not the name, so the name search starts after the flag.

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::lines::LineStream;
use crate::records::SpeciesCandidate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matcher for the built-in grammar
    static ref DEFAULT_MATCHER: EntryMatcher = EntryMatcher::new(&ExtractionConfig::default()).unwrap();
}

/// Outcome of matching a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerMatch {
    /// Sentinel absent
    NotMarker,
    /// Sentinel present but no English name could be captured
    Unparseable,
    /// A species entry
    Entry(SpeciesCandidate),
}

/// Compiled marker grammar.
#[derive(Debug, Clone)]
pub struct EntryMatcher {
    sentinel: String,
    superseded_flag: String,
    default_status: String,
    re_name: Regex,
    re_superseded_name: Regex,
    re_status: Regex,
}

impl Default for EntryMatcher {
    fn default() -> Self {
        DEFAULT_MATCHER.clone()
    }
}

impl EntryMatcher {
    /// Compile the grammar described by `config`.
    ///
    /// Configured tokens are matched literally.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;

        let sep = regex::escape(&config.separator);
        let flag = regex::escape(&config.superseded_flag);
        let label = regex::escape(&config.status_label);

        Ok(Self {
            sentinel: config.sentinel.clone(),
            superseded_flag: config.superseded_flag.clone(),
            default_status: config.default_status.clone(),
            re_name: compile(&format!("{} (.+?),", sep))?,
            re_superseded_name: compile(&format!("{}.*?{} (.+?),", flag, sep))?,
            re_status: compile(&format!("{} (.+?)(?:,|$)", label))?,
        })
    }

    /// True if `line` contains the sentinel.
    pub fn is_marker(&self, line: &str) -> bool {
        line.contains(self.sentinel.as_str())
    }

    /// Match one line given its lookback line.
    ///
    /// `previous` is taken verbatim as the Latin name; pass `None` for the
    /// first line of the stream.
    pub fn match_line(&self, line: &str, previous: Option<&str>) -> MarkerMatch {
        if !self.is_marker(line) {
            return MarkerMatch::NotMarker;
        }

        let Some(english_name) = self.english_name(line) else {
            return MarkerMatch::Unparseable;
        };

        MarkerMatch::Entry(SpeciesCandidate {
            english_name: english_name.to_string(),
            latin_name: previous.map(str::to_string),
            status: self.status(line).unwrap_or(self.default_status.as_str()).to_string(),
        })
    }

    /// Capture the English name of a marker line.
    pub fn english_name<'a>(&self, line: &'a str) -> Option<&'a str> {
        let re = if line.contains(self.superseded_flag.as_str()) {
            &self.re_superseded_name
        } else {
            &self.re_name
        };
        re.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str())
    }

    /// Capture the status field of a marker line, if present.
    pub fn status<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.re_status
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Walk a stream with lookback, yielding `(line_index, outcome)` for every
    /// line that contains the sentinel.
    pub fn scan<'a>(&'a self, stream: &'a LineStream) -> impl Iterator<Item = (usize, MarkerMatch)> + 'a {
        let lines = stream.as_slice();
        lines.iter().enumerate().filter_map(move |(i, line)| {
            let previous = if i > 0 { Some(lines[i - 1].as_str()) } else { None };
            match self.match_line(line, previous) {
                MarkerMatch::NotMarker => None,
                outcome => Some((i, outcome)),
            }
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern(format!("{}: {}", pattern, e)))
}
