//! Line stream construction from paginated text.
//!
//! Both scans walk the same [`LineStream`]: every page split into lines,
//! each line trimmed, page boundaries dissolved. Empty lines are kept
//! because they take part in lookback counting.
//!
//! Adjacency across a page break is whatever the extractor produced; the
//! builder does not try to repair it.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Page separator written by `pdftotext`-style extractors.
pub const PAGE_BREAK: char = '\x0c';

/// Ordered, trimmed lines of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStream {
    lines: Vec<String>,
}

impl LineStream {
    /// Build a stream from page texts in document order.
    ///
    /// # Example
    ///
    /// ```
    /// use cites_ledger::lines::LineStream;
    ///
    /// let stream = LineStream::from_pages(["  Panthera leo \nCITES I / Lion, x", "\nPL001"]);
    /// assert_eq!(stream.as_slice(), ["Panthera leo", "CITES I / Lion, x", "", "PL001"]);
    /// ```
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = pages
            .into_iter()
            .flat_map(|page| {
                page.as_ref()
                    .lines()
                    .map(|line| line.trim().to_string())
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { lines }
    }

    /// Build a stream from one text whose pages are separated by form feeds.
    pub fn from_text(text: &str) -> Self {
        Self::from_pages(text.split(PAGE_BREAK))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if the stream holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Iterate over lines in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// All lines as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

impl<'a> IntoIterator for &'a LineStream {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Load page texts from `path`.
///
/// - a directory yields one page per `*.txt` file, ordered by file name;
/// - a `.pdf` file is extracted with `pdf-extract` (feature `pdf`);
/// - any other file is read as UTF-8 and split on form feeds.
pub fn read_pages(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();

    if path.is_dir() {
        return read_page_directory(path);
    }

    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        return read_pdf_pages(path);
    }

    let text = std::fs::read_to_string(path)?;
    Ok(text.split(PAGE_BREAK).map(str::to_string).collect())
}

/// Load and flatten `path` in one step.
pub fn read_line_stream(path: impl AsRef<Path>) -> Result<LineStream> {
    let pages = read_pages(path.as_ref())?;
    let stream = LineStream::from_pages(&pages);
    log::info!(
        "Loaded {} pages ({} lines) from {}",
        pages.len(),
        stream.len(),
        path.as_ref().display()
    );
    Ok(stream)
}

fn read_page_directory(dir: &Path) -> Result<Vec<String>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(Error::UnsupportedInput(format!(
            "no .txt pages in directory {}",
            dir.display()
        )));
    }

    files
        .iter()
        .map(|file| std::fs::read_to_string(file).map_err(Error::from))
        .collect()
}

#[cfg(feature = "pdf")]
fn read_pdf_pages(path: &Path) -> Result<Vec<String>> {
    // pdf-extract can panic on malformed files
    let owned = path.to_path_buf();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text(&owned)
    }));

    match result {
        Ok(Ok(text)) => Ok(text.split(PAGE_BREAK).map(str::to_string).collect()),
        Ok(Err(e)) => Err(Error::Pdf(e.to_string())),
        Err(_) => Err(Error::Pdf(format!("extraction panicked on {}", path.display()))),
    }
}

#[cfg(not(feature = "pdf"))]
fn read_pdf_pages(path: &Path) -> Result<Vec<String>> {
    Err(Error::UnsupportedInput(format!(
        "{} is a PDF; rebuild with the `pdf` feature or pass extracted text",
        path.display()
    )))
}
