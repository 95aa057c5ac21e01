use super::page_index::PageIndex;
use super::parser::LineChange;

/// Per-page changed-line counts for the two documents of a diff. Every valid
/// page of each document has an entry, so `counts(d).len()` always equals
/// the document's page count.
#[derive(Debug, Clone)]
pub struct ChangeDistribution {
    pages: [PageIndex; 2],
    counts: [Vec<u64>; 2],
}

impl ChangeDistribution {
    /// Seed a zero counter for every page of both documents.
    pub fn new(first: PageIndex, second: PageIndex) -> Self {
        let counts = [vec![0; first.page_count()], vec![0; second.page_count()]];
        Self {
            pages: [first, second],
            counts,
        }
    }

    /// Attribute every changed line of one parsed diff operation to the page
    /// it falls on.
    pub fn tally(&mut self, change: &LineChange) {
        for (document, lines) in [&change.first, &change.second].into_iter().enumerate() {
            for &line in lines {
                let page = self.pages[document].page_of_line(line);
                self.counts[document][page] += 1;
            }
        }
    }

    pub fn tally_all<'a, I>(&mut self, changes: I)
    where
        I: IntoIterator<Item = &'a LineChange>,
    {
        for change in changes {
            self.tally(change);
        }
    }

    /// Changed-line count per page for one document (0 = original,
    /// 1 = updated).
    pub fn counts(&self, document: usize) -> &[u64] {
        &self.counts[document]
    }

    /// 1-based page numbers of the updated document carrying at least one
    /// change, ascending.
    pub fn changed_pages(&self) -> Vec<usize> {
        self.counts[1]
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(page, _)| page + 1)
            .collect()
    }
}
