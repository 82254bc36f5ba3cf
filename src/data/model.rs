use std::fmt;

// ---------------------------------------------------------------------------
// Publication – one row of the source table
// ---------------------------------------------------------------------------

/// A single publication record.
///
/// Delimited source cells are already split by the loader: `authors` holds
/// one entry per comma-separated token, `index_keywords` the raw
/// semicolon-separated tokens (not yet lowercased).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub authors: Vec<String>,
    pub title: String,
    pub year: i32,
    /// Normalised to 0 when the source cell was blank.
    pub cited_by: u64,
    pub index_keywords: Vec<String>,
}

impl Publication {
    /// Surname of the first author, or an empty string for an anonymous record.
    pub fn first_author(&self) -> &str {
        self.authors.first().map(String::as_str).unwrap_or("")
    }

    /// Short label used on the citation chart, e.g. `"Hart, 1992"`.
    pub fn label(&self) -> String {
        format!("{}, {}", self.first_author(), self.year)
    }
}

// ---------------------------------------------------------------------------
// PublicationTable – an ordered sequence of records
// ---------------------------------------------------------------------------

/// Ordered publication records. Row order is meaningful: tables produced by
/// the loader are sorted by citation count, highest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationTable {
    pub publications: Vec<Publication>,
}

impl PublicationTable {
    /// Wrap records without reordering them.
    pub fn new(publications: Vec<Publication>) -> Self {
        PublicationTable { publications }
    }

    /// Wrap records after a stable sort by citation count, descending.
    pub fn sorted_by_citations(mut publications: Vec<Publication>) -> Self {
        publications.sort_by(|a, b| b.cited_by.cmp(&a.cited_by));
        PublicationTable { publications }
    }

    /// Number of publications.
    pub fn len(&self) -> usize {
        self.publications.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Publication> {
        self.publications.iter()
    }

    /// Smallest and largest year present, if any.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.iter().map(|p| p.year).min()?;
        let max = self.iter().map(|p| p.year).max()?;
        Some((min, max))
    }
}

// ---------------------------------------------------------------------------
// Derived rows
// ---------------------------------------------------------------------------

/// Number of publications in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// One bar of the most-cited chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRank {
    pub label: String,
    pub cited_by: u64,
    pub title: String,
}

/// How often an index keyword occurs across a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFrequency {
    pub keyword: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// YearRange – inclusive filter bounds
// ---------------------------------------------------------------------------

/// Inclusive `[from, to]` year range. `from > to` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl YearRange {
    pub fn new(from: i32, to: i32) -> Self {
        YearRange { from, to }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.from <= year && year <= self.to
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

#[cfg(test)]
pub(crate) fn publication(
    authors: &str,
    year: i32,
    cited_by: u64,
    title: &str,
    keywords: &str,
) -> Publication {
    Publication {
        authors: authors
            .split(',')
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect(),
        title: title.to_string(),
        year,
        cited_by,
        index_keywords: if keywords.is_empty() {
            Vec::new()
        } else {
            keywords.split(';').map(|k| k.trim().to_string()).collect()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_uses_first_author_and_year() {
        let p = publication("Hart, G", 1992, 100, "X", "load");
        assert_eq!(p.first_author(), "Hart");
        assert_eq!(p.label(), "Hart, 1992");
    }

    #[test]
    fn test_label_without_authors() {
        let p = publication("", 2001, 0, "Anon", "");
        assert_eq!(p.label(), ", 2001");
    }

    #[test]
    fn test_sorted_by_citations_is_stable() {
        let table = PublicationTable::sorted_by_citations(vec![
            publication("A", 2000, 5, "a", ""),
            publication("B", 2001, 50, "b", ""),
            publication("C", 2002, 5, "c", ""),
        ]);
        let titles: Vec<&str> = table.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_year_bounds() {
        let table = PublicationTable::new(vec![
            publication("A", 2005, 0, "a", ""),
            publication("B", 1999, 0, "b", ""),
            publication("C", 2011, 0, "c", ""),
        ]);
        assert_eq!(table.year_bounds(), Some((1999, 2011)));
        assert_eq!(PublicationTable::default().year_bounds(), None);
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let range = YearRange::new(2000, 2002);
        assert!(range.contains(2000));
        assert!(range.contains(2002));
        assert!(!range.contains(1999));
        assert!(!YearRange::new(2003, 2000).contains(2001));
        assert_eq!(range.to_string(), "2000-2002");
    }
}
