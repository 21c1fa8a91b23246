use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::OutputConfig;

/// Separator between a resource's category and the rest of its slug
/// (`c-api--abstract` belongs to `c-api`).
pub const CATEGORY_SEPARATOR: &str = "--";

/// Translation counters for one resource in one language.
///
/// Extra fields in the Transifex payload (`completed`, `last_update`, ...)
/// are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStats {
    pub reviewed: u64,
    pub translated_entities: u64,
    pub translated_words: u64,
    pub untranslated_entities: u64,
    pub untranslated_words: u64,
}

impl ResourceStats {
    pub fn total_entities(&self) -> u64 {
        self.translated_entities + self.untranslated_entities
    }

    pub fn total_words(&self) -> u64 {
        self.translated_words + self.untranslated_words
    }

    /// Translated entities as a percentage of all entities.
    pub fn completion(&self) -> f64 {
        match self.total_entities() {
            0 => 0.0,
            total => self.translated_entities as f64 * 100.0 / total as f64,
        }
    }
}

impl AddAssign for ResourceStats {
    fn add_assign(&mut self, other: Self) {
        self.reviewed += other.reviewed;
        self.translated_entities += other.translated_entities;
        self.translated_words += other.translated_words;
        self.untranslated_entities += other.untranslated_entities;
        self.untranslated_words += other.untranslated_words;
    }
}

impl std::iter::Sum for ResourceStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, s| {
            acc += s;
            acc
        })
    }
}

/// How per-resource stats are folded into a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
    pub group_by_category: bool,
    pub aliases: BTreeMap<String, String>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for AggregateOptions {
    fn from(output: &OutputConfig) -> Self {
        Self {
            group_by_category: output.group_by_category,
            aliases: output.aliases.clone(),
        }
    }
}

/// Stats keyed by resource slug or category.
///
/// Serializes as a JSON object with keys in descending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct StatsReport {
    entries: BTreeMap<String, ResourceStats>,
}

impl StatsReport {
    /// Fold `(slug, stats)` pairs into a report.
    pub fn aggregate<I>(entries: I, options: &AggregateOptions) -> Self
    where
        I: IntoIterator<Item = (String, ResourceStats)>,
    {
        let mut report = Self::default();
        for (slug, stats) in entries {
            let key = if options.group_by_category {
                category(&slug).to_owned()
            } else {
                slug
            };
            *report.entries.entry(key).or_default() += stats;
        }

        // single pass: aliases do not chain
        for (from, to) in &options.aliases {
            if let Some(stats) = report.entries.remove(from) {
                *report.entries.entry(to.clone()).or_default() += stats;
            }
        }

        report
    }

    pub fn get(&self, key: &str) -> Option<&ResourceStats> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in descending key order, the order they are written in.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceStats)> {
        self.entries.iter().rev().map(|(k, v)| (k.as_str(), v))
    }

    pub fn totals(&self) -> ResourceStats {
        self.entries.values().copied().sum()
    }
}

impl Serialize for StatsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, stats) in self.iter() {
            map.serialize_entry(key, stats)?;
        }
        map.end()
    }
}

/// Grouping key of a resource: the slug up to the first `--`.
pub fn category(slug: &str) -> &str {
    slug.split(CATEGORY_SEPARATOR).next().unwrap_or(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_strips_suffix() {
        assert_eq!(category("c-api--abstract"), "c-api");
        assert_eq!(category("library--asyncio-task"), "library");
        assert_eq!(category("glossary_"), "glossary_");
        assert_eq!(category(""), "");
    }

    #[test]
    fn completion_handles_empty_resource() {
        assert_eq!(ResourceStats::default().completion(), 0.0);

        let half = ResourceStats {
            translated_entities: 5,
            untranslated_entities: 5,
            ..Default::default()
        };
        assert!((half.completion() - 50.0).abs() < f64::EPSILON);
    }
}
