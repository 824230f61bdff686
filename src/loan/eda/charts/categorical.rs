use std::collections::BTreeMap;

use serde::Serialize;

/// Number of rows carrying one literal category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Counts occurrences of each distinct value, ordered lexicographically.
///
/// Grouping is exact string equality: `"18-30"` and `"18-30 "` are different
/// categories, and so are spellings that differ only in case.
pub fn count_categories<I, S>(values: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value.into()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}
