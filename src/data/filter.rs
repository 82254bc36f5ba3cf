use super::model::{PublicationTable, YearRange};

// ---------------------------------------------------------------------------
// Year filter
// ---------------------------------------------------------------------------

/// Return a new table holding the publications whose year lies in `range`
/// (inclusive on both ends), in their original relative order.
///
/// A reversed range (`from > to`) is not rejected; it simply matches nothing.
pub fn filter_by_year_range(table: &PublicationTable, range: YearRange) -> PublicationTable {
    PublicationTable::new(
        table
            .iter()
            .filter(|p| range.contains(p.year))
            .cloned()
            .collect(),
    )
}
