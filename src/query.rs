//! Query preparation: normalisation, token filtering, lane packing.

use crate::normalize::{normalize, tokenize, truncate_chars};
use crate::options::SearchOptions;
use crate::score::alphabet::AlphabetMap;
use crate::score::pack::{pack_tokens, TokenGroup};

/// A query readied for scoring.
///
/// Holds the fused (whole-query) string with its alphabet map, the
/// filtered token list, and the packed token groups. All of it is
/// immutable once built; per-item scoring state lives in the engine's
/// scorer, not here.
#[derive(Debug)]
pub struct Query {
    /// Normalised whole query, truncated to the fused length cap.
    pub fused: String,
    /// Alphabet map of the fused string.
    pub fused_map: AlphabetMap,
    /// Filtered, truncated query tokens in input order.
    pub tokens: Vec<String>,
    /// Tokens packed into bit lanes, in token order.
    pub groups: Vec<TokenGroup>,
}

impl Query {
    /// Normalise and pack `raw` under the given options.
    pub fn prepare(raw: &str, opts: &SearchOptions) -> Query {
        let norm = normalize(raw);
        let fused = truncate_chars(&norm, opts.token_fused_max_length).to_owned();

        let tokens: Vec<String> = if opts.score_per_token {
            tokenize(&norm)
                .filter(|t| t.chars().count() >= opts.token_query_min_length)
                .map(|t| truncate_chars(t, opts.token_query_max_length).to_owned())
                .collect()
        } else {
            Vec::new()
        };

        let groups = pack_tokens(&tokens);
        let fused_map = AlphabetMap::build(&fused);
        debug!(
            "prepared query {:?}: {} tokens in {} groups",
            fused,
            tokens.len(),
            groups.len()
        );

        Query {
            fused,
            fused_map,
            tokens,
            groups,
        }
    }

    /// True when nothing scoreable survived preparation.
    pub fn is_empty(&self) -> bool {
        self.fused.is_empty()
    }

    /// True when the item score should be mixed with the per-token
    /// query score; a lone token (or fused-only mode) skips the mix.
    pub(crate) fn mixes_tokens(&self) -> bool {
        self.tokens.len() > 1
    }
}
