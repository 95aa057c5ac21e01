use super::distribution::ChangeDistribution;

/// Renders the change distribution of the updated document as the short
/// "changed pages" fragment embedded into notification mails.
pub struct DiffSummary<'a> {
    distribution: &'a ChangeDistribution,
    prefix: &'a str,
    max_chars: usize,
}

impl<'a> DiffSummary<'a> {
    pub fn new(distribution: &'a ChangeDistribution, prefix: &'a str, max_chars: usize) -> Self {
        Self {
            distribution,
            prefix,
            max_chars,
        }
    }

    /// E.g. "Changed pages: 2, 4, 7" (1-based, ascending).
    pub fn render(&self) -> String {
        let pages: Vec<String> = self
            .distribution
            .changed_pages()
            .iter()
            .map(|page| page.to_string())
            .collect();
        format!("{}{}", self.prefix, pages.join(", "))
    }

    /// False when so many distinct pages changed that listing them is
    /// useless; callers then fall back to reporting only the count. The
    /// threshold counts characters, not bytes, so a non-ASCII prefix does
    /// not shorten the list.
    pub fn has_acceptable_amount_of_changes(&self) -> bool {
        self.render().chars().count() <= self.max_chars
    }

    pub fn changed_page_count(&self) -> usize {
        self.distribution.changed_pages().len()
    }
}
