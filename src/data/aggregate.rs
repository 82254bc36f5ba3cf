use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::model::{CitationRank, KeywordFrequency, PublicationTable, YearCount};

/// Placeholder written by spreadsheet exports for an empty keyword cell.
const MISSING_MARKER: &str = "nan";

// ---------------------------------------------------------------------------
// Publications per year
// ---------------------------------------------------------------------------

/// One entry per distinct year, ascending by year.
pub fn count_by_year(table: &PublicationTable) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for p in table.iter() {
        *counts.entry(p.year).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

// ---------------------------------------------------------------------------
// Most cited papers
// ---------------------------------------------------------------------------

/// One entry per publication, in the order of `table`.
///
/// No sorting happens here: the "most cited" ordering comes from the loader,
/// which sorts every table by citation count before handing it out.
pub fn rank_by_citations(table: &PublicationTable) -> Vec<CitationRank> {
    table
        .iter()
        .map(|p| CitationRank {
            label: p.label(),
            cited_by: p.cited_by,
            title: p.title.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Index keyword frequency
// ---------------------------------------------------------------------------

/// Lowercased, trimmed keyword tokens across all publications, skipping blanks
/// and the `nan` marker.
fn keyword_tokens(table: &PublicationTable) -> impl Iterator<Item = String> + '_ {
    table
        .iter()
        .flat_map(|p| p.index_keywords.iter())
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty() && k != MISSING_MARKER)
}

/// One entry per distinct keyword, most frequent first; ties are ordered by
/// keyword.
pub fn frequency_by_keyword(table: &PublicationTable) -> Vec<KeywordFrequency> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for keyword in keyword_tokens(table) {
        *counts.entry(keyword).or_default() += 1;
    }
    let mut frequencies: Vec<KeywordFrequency> = counts
        .into_iter()
        .map(|(keyword, count)| KeywordFrequency { keyword, count })
        .collect();
    // Stable: equal counts keep the BTreeMap's lexicographic order.
    frequencies.sort_by_key(|f| Reverse(f.count));
    frequencies
}

// ---------------------------------------------------------------------------
// Views – the three aggregates of one filtered table
// ---------------------------------------------------------------------------

/// All derived tables for the currently filtered publications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Views {
    pub per_year: Vec<YearCount>,
    pub most_cited: Vec<CitationRank>,
    pub keywords: Vec<KeywordFrequency>,
}

impl Views {
    pub fn compute(table: &PublicationTable) -> Self {
        Views {
            per_year: count_by_year(table),
            most_cited: rank_by_citations(table),
            keywords: frequency_by_keyword(table),
        }
    }

    /// First `n` entries of the citation ranking.
    pub fn top_papers(&self, n: usize) -> &[CitationRank] {
        &self.most_cited[..n.min(self.most_cited.len())]
    }

    /// First `n` entries of the keyword ranking.
    pub fn top_keywords(&self, n: usize) -> &[KeywordFrequency] {
        &self.keywords[..n.min(self.keywords.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.per_year.is_empty()
    }
}
