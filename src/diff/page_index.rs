use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

/// Marker emitted by text-conversion tools between pages of a paginated
/// document.
pub const PAGE_BREAK: char = '\u{000C}';

/// Line numbers at which each page of one converted document ends, in
/// encounter order. The final page has no break and therefore no entry, so
/// the page count is always one more than the number of boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    boundaries: Vec<usize>,
}

impl PageIndex {
    /// Scan a line-oriented text stream, recording the 0-based line number of
    /// every line carrying a page break. A mid-stream read error ends the
    /// scan with whatever was collected.
    pub fn from_reader<R: BufRead>(reader: R) -> Self {
        let mut boundaries = Vec::new();
        let mut line_number = 0usize;

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("stopping page scan after read error: {e}");
                    break;
                }
            };
            if line.contains(PAGE_BREAK) {
                boundaries.push(line_number);
            }
            line_number += 1;
        }

        Self { boundaries }
    }

    /// An unreadable document degrades to an empty index: the caller then
    /// treats the whole document as a single page.
    pub fn from_path(path: &Path) -> Self {
        match File::open(path) {
            Ok(file) => Self::from_reader(BufReader::new(file)),
            Err(e) => {
                warn!("cannot open '{}' for page indexing: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Page holding the passed line: the first page ending beyond it, or the
    /// final page when no recorded boundary does.
    pub fn page_of_line(&self, line: usize) -> usize {
        for (page, boundary) in self.boundaries.iter().enumerate() {
            if *boundary > line {
                return page;
            }
        }
        self.boundaries.len()
    }

    pub fn page_count(&self) -> usize {
        self.boundaries.len() + 1
    }

    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_indexes_page_breaks_by_line_number() {
        let text = "alpha\nbravo\n\u{000C}\ncharlie\ndelta\n\u{000C}echo\nfoxtrot\n";
        let index = PageIndex::from_reader(Cursor::new(text));
        assert_eq!(index.boundaries(), &[2, 5]);
        assert_eq!(index.page_count(), 3);
    }

    #[test]
    fn test_no_breaks_is_single_page() {
        let index = PageIndex::from_reader(Cursor::new("one\ntwo\nthree\n"));
        assert_eq!(index.boundaries(), &[] as &[usize]);
        assert_eq!(index.page_count(), 1);
        assert_eq!(index.page_of_line(2), 0);
        assert_eq!(index.page_of_line(999), 0);
    }

    #[test]
    fn test_page_of_line_uses_first_boundary_beyond() {
        let text = "a\nb\n\u{000C}\nc\nd\n\u{000C}\ne\n";
        let index = PageIndex::from_reader(Cursor::new(text));
        assert_eq!(index.boundaries(), &[2, 5]);
        assert_eq!(index.page_of_line(0), 0);
        assert_eq!(index.page_of_line(1), 0);
        // The boundary line itself already belongs to the next page.
        assert_eq!(index.page_of_line(2), 1);
        assert_eq!(index.page_of_line(4), 1);
        assert_eq!(index.page_of_line(5), 2);
        assert_eq!(index.page_of_line(100), 2);
    }
}
