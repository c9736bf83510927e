//! Fuzzy catalog search backed by `nucleo-matcher`.
//!
//! # Responsibility
//! - Index `title`, `description` and `tags` of every tool.
//! - Score queries per field and keep the best field per tool.
//!
//! # Invariants
//! - Blank queries return the full catalog in catalog order.
//! - Scores are distances in `0.0..=1.0`, `0.0` being a perfect match.
//! - Tools whose best distance exceeds the threshold are dropped.
//! - Equal distances keep catalog order.

use crate::model::tool::ToolDescriptor;
use log::debug;
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Distance threshold used by the listing page.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Descriptor field that participates in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Title,
    Description,
    Tags,
}

/// Index configuration: searched fields and maximum accepted distance.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub keys: Vec<SearchKey>,
    pub threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keys: vec![SearchKey::Title, SearchKey::Description, SearchKey::Tags],
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Single search hit returned by [`SearchIndex::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub tool: &'a ToolDescriptor,
    /// Field that produced the best match.
    pub key: SearchKey,
    /// Normalized distance, `0.0` is a perfect match.
    pub score: f64,
}

struct IndexedTool<'a> {
    tool: &'a ToolDescriptor,
    fields: Vec<(SearchKey, String)>,
}

/// Fuzzy index over a borrowed list of tools.
pub struct SearchIndex<'a> {
    entries: Vec<IndexedTool<'a>>,
    threshold: f64,
}

impl<'a> SearchIndex<'a> {
    /// Builds an index with the default keys and threshold.
    pub fn new(tools: &'a [ToolDescriptor]) -> Self {
        Self::with_options(tools, &SearchOptions::default())
    }

    pub fn with_options(tools: &'a [ToolDescriptor], options: &SearchOptions) -> Self {
        let entries = tools
            .iter()
            .map(|tool| IndexedTool {
                tool,
                fields: indexed_fields(tool, &options.keys),
            })
            .collect();

        Self {
            entries,
            threshold: options.threshold.clamp(0.0, 1.0),
        }
    }

    /// Returns tools matching `query`, best match first.
    ///
    /// Blank queries return an empty list; see [`SearchIndex::filter`] for
    /// the listing-page behavior.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'a>> {
        let needle_text = query.trim().to_lowercase();
        if needle_text.is_empty() {
            return Vec::new();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut needle_buf = Vec::new();
        let needle = Utf32Str::new(&needle_text, &mut needle_buf);

        let mut self_buf = Vec::new();
        let perfect = matcher
            .fuzzy_match(Utf32Str::new(&needle_text, &mut self_buf), needle)
            .map_or(1.0, f64::from)
            .max(1.0);

        let mut haystack_buf = Vec::new();
        let mut hits: Vec<SearchHit<'a>> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let mut best: Option<(SearchKey, f64)> = None;
                for (key, text) in &entry.fields {
                    haystack_buf.clear();
                    let haystack = Utf32Str::new(text, &mut haystack_buf);
                    let Some(raw) = matcher.fuzzy_match(haystack, needle) else {
                        continue;
                    };
                    let distance = 1.0 - (f64::from(raw) / perfect).min(1.0);
                    if best.map_or(true, |(_, current)| distance < current) {
                        best = Some((*key, distance));
                    }
                }
                best.filter(|(_, distance)| *distance <= self.threshold)
                    .map(|(key, score)| SearchHit {
                        tool: entry.tool,
                        key,
                        score,
                    })
            })
            .collect();

        // Stable sort keeps catalog order for equal scores.
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        debug!(
            "event=catalog_search module=search status=ok query_len={} hits={}",
            needle_text.chars().count(),
            hits.len()
        );
        hits
    }

    /// Listing-page view: the whole catalog for a blank query, otherwise the
    /// matching tools in relevance order.
    pub fn filter(&self, query: &str) -> Vec<&'a ToolDescriptor> {
        if query.trim().is_empty() {
            return self.entries.iter().map(|entry| entry.tool).collect();
        }
        self.search(query).into_iter().map(|hit| hit.tool).collect()
    }
}

fn indexed_fields(tool: &ToolDescriptor, keys: &[SearchKey]) -> Vec<(SearchKey, String)> {
    let mut fields = Vec::new();
    for key in keys {
        match key {
            SearchKey::Title => fields.push((*key, tool.title.to_lowercase())),
            SearchKey::Description => fields.push((*key, tool.description.to_lowercase())),
            SearchKey::Tags => fields.extend(tool.tags.iter().map(|tag| (*key, tag.to_lowercase()))),
        }
    }
    fields
}
