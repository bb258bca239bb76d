//! The search engine: per-field scoring, item aggregation, ranking.
//!
//! Scoring an item walks its fields in declared order. Each field runs
//! every packed token group against every field token, keeping the best
//! score per lane and the index of the field token that produced it;
//! in-order matches collect a bonus. Field scores are boosted by a
//! decaying position bonus, the best field wins the item, and for
//! multi-token queries the result is mixed half-and-half with the
//! query-wide per-token score. A running inclusion threshold keeps the
//! result list tight as better items show up.

use std::sync::Arc;

use crate::field::FieldPath;
use crate::highlight::highlight_ranges;
use crate::item::{IndexedItem, SearchResult, Searchable};
use crate::normalize::{normalize, tokenize, truncate_chars};
use crate::options::SearchOptions;
use crate::query::Query;
use crate::score::llcs::score_single;
use crate::score::packed::score_pack;
use crate::score::ScoreType;

/// Approximate-search engine over a set of records.
///
/// Records are tokenised once when installed; searches are synchronous
/// and leave the engine untouched, so a shared reference suffices.
pub struct SearchEngine {
    options: SearchOptions,
    keys: Vec<FieldPath>,
    items: Vec<IndexedItem>,
}

impl SearchEngine {
    /// Create an empty engine. Until keys are set, records are indexed
    /// whole (the empty path addresses the record itself).
    pub fn new(options: SearchOptions) -> Self {
        SearchEngine {
            options,
            keys: vec![FieldPath::parse("")],
            items: Vec::new(),
        }
    }

    /// The engine's options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no records are installed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the field paths and re-index the current records.
    pub fn set_keys<I>(&mut self, keys: I)
    where
        I: IntoIterator,
        I::Item: Into<FieldPath>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        if self.keys.is_empty() {
            self.keys.push(FieldPath::parse(""));
        }
        let sources: Vec<Arc<dyn Searchable>> = self.items.iter().map(|i| i.item.clone()).collect();
        self.install(sources);
    }

    /// Replace the record source and index it.
    pub fn set_source(&mut self, source: Vec<Arc<dyn Searchable>>) {
        self.install(source);
    }

    fn install(&mut self, source: Vec<Arc<dyn Searchable>>) {
        self.items = source
            .into_iter()
            .map(|item| index_item(item, &self.keys, &self.options))
            .collect();
        debug!("indexed {} records over {} keys", self.items.len(), self.keys.len());
    }

    /// Run a search and return matching records, best first.
    pub fn search(&self, raw_query: &str) -> Vec<SearchResult> {
        let query = Query::prepare(raw_query, &self.options);
        if query.is_empty() {
            return Vec::new();
        }

        let opts = &self.options;
        let mut scorer = Scorer::new(&query, opts);
        let mut results = Vec::new();
        let mut threshold = opts.thresh_include;
        let mut best = 0.0;

        for item in &self.items {
            let (score, matched_field) = scorer.score_item(item);
            if score <= threshold {
                continue;
            }
            if score > best {
                best = score;
                threshold = threshold.max(best * opts.thresh_relative_to_best);
            }
            results.push(SearchResult {
                item: item.item.clone(),
                score,
                matched_field,
                sort_key: item.sort_key.clone(),
            });
        }
        trace!("matched {} of {} items", results.len(), self.items.len());

        if opts.score_round > 0.0 {
            for r in &mut results {
                r.score = (r.score / opts.score_round).round() * opts.score_round;
            }
        }
        results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.sort_key.cmp(&b.sort_key)));
        if opts.output_limit > 0 && results.len() > opts.output_limit {
            results.truncate(opts.output_limit);
        }
        results
    }

    /// Char ranges of `text` to mark for the given query.
    pub fn highlight(&self, raw_query: &str, text: &str) -> Vec<(usize, usize)> {
        highlight_ranges(raw_query, text, &self.options)
    }
}

/// Tokenise one record under the current keys.
fn index_item(item: Arc<dyn Searchable>, keys: &[FieldPath], opts: &SearchOptions) -> IndexedItem {
    let mut fields = Vec::with_capacity(keys.len());
    let mut values = Vec::new();
    for key in keys {
        values.clear();
        item.collect_field(key, &mut values);
        let mut tokens = Vec::new();
        for value in &values {
            let norm = normalize(value);
            for tok in tokenize(&norm) {
                if tok.chars().count() >= opts.token_field_min_length {
                    tokens.push(truncate_chars(tok, opts.token_field_max_length).to_owned());
                }
            }
        }
        fields.push(tokens);
    }
    let sort_key = fields.first().map(|f| f.join(" ")).unwrap_or_default();
    IndexedItem { item, fields, sort_key }
}

/// Per-search scoring state, reset at the start of every item.
struct Scorer<'a> {
    query: &'a Query,
    opts: &'a SearchOptions,
    /// Best score per query token across the current item's fields.
    lane_best: Vec<ScoreType>,
    /// Best fused score across the current item's fields.
    fused_score: ScoreType,
    pack_buf: Vec<ScoreType>,
    group_best: Vec<ScoreType>,
    group_index: Vec<usize>,
}

impl<'a> Scorer<'a> {
    fn new(query: &'a Query, opts: &'a SearchOptions) -> Self {
        Scorer {
            query,
            opts,
            lane_best: vec![0.0; query.tokens.len()],
            fused_score: 0.0,
            pack_buf: Vec::new(),
            group_best: Vec::new(),
            group_index: Vec::new(),
        }
    }

    fn score_item(&mut self, item: &IndexedItem) -> (ScoreType, usize) {
        for best in &mut self.lane_best {
            *best = 0.0;
        }
        self.fused_score = 0.0;

        let mut item_score = 0.0;
        let mut matched_field = 0;
        let mut position_bonus = 1.0;

        for (idx, tokens) in item.fields.iter().enumerate() {
            let mut field_score = self.score_field(tokens);
            field_score *= 1.0 + position_bonus;
            position_bonus *= self.opts.bonus_position_decay;
            if field_score > item_score {
                item_score = field_score;
                matched_field = idx;
            }
            if field_score > self.opts.field_good_enough {
                break;
            }
        }

        if self.query.mixes_tokens() {
            let token_sum: ScoreType = self.lane_best.iter().sum();
            let query_score = token_sum.max(self.fused_score);
            item_score = 0.5 * item_score + 0.5 * query_score;
        }
        (item_score, matched_field)
    }

    fn score_field(&mut self, field_tokens: &[String]) -> ScoreType {
        let query = self.query;
        let opts = self.opts;
        let mut field_score = 0.0;
        let mut last_index: isize = -1;
        let mut lane_base = 0;

        for group in &query.groups {
            let lanes = group.lanes();
            self.group_best.clear();
            self.group_best.resize(lanes, 0.0);
            self.group_index.clear();
            self.group_index.resize(lanes, 0);

            for (token_idx, field_token) in field_tokens.iter().enumerate() {
                if lanes == 1 {
                    let sc = score_single(&group.tokens[0], field_token, &group.map, opts);
                    if sc > self.group_best[0] {
                        self.group_best[0] = sc;
                        self.group_index[0] = token_idx;
                    }
                } else {
                    score_pack(group, field_token, opts, &mut self.pack_buf);
                    for lane in 0..lanes {
                        if self.pack_buf[lane] > self.group_best[lane] {
                            self.group_best[lane] = self.pack_buf[lane];
                            self.group_index[lane] = token_idx;
                        }
                    }
                }
            }

            for lane in 0..lanes {
                let best = self.group_best[lane];
                if best > self.lane_best[lane_base + lane] {
                    self.lane_best[lane_base + lane] = best;
                }
                field_score += best;
                if best > opts.minimum_match && (self.group_index[lane] as isize) > last_index {
                    field_score += opts.bonus_token_order;
                    last_index = self.group_index[lane] as isize;
                }
            }
            lane_base += lanes;
        }

        if opts.score_test_fused || !opts.score_per_token || query.tokens.is_empty() {
            let joined = field_tokens.join(" ");
            let fused = score_single(&query.fused, &joined, &query.fused_map, opts);
            if fused > self.fused_score {
                self.fused_score = fused;
            }
            field_score = field_score.max(fused);
        }
        field_score
    }
}
