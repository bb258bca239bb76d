use clap::Parser;
use derive_builder::Builder;

use crate::score::ScoreType;

/// Tuning knobs for scoring, filtering and output.
///
/// Every option has a serviceable default; inconsistent combinations
/// (say, an inclusion threshold above the early-exit score) are accepted
/// and only change ranking behaviour.
#[derive(Debug, Clone, Builder, Parser)]
#[builder(default)]
#[command(name = "sift", about = "Approximate string-matching search over structured records", args_override_self = true)]
pub struct SearchOptions {
    //  --- Scoring ---
    /// Floor below which a token-pair score is treated as noise
    #[arg(long, default_value_t = 1.0, help_heading = "Scoring")]
    pub minimum_match: ScoreType,
    /// Absolute minimum item score for inclusion
    #[arg(long, default_value_t = 2.0, help_heading = "Scoring")]
    pub thresh_include: ScoreType,
    /// Fraction of the best score so far an item must reach
    #[arg(long, default_value_t = 0.5, help_heading = "Scoring")]
    pub thresh_relative_to_best: ScoreType,
    /// Field score that ends an item's evaluation early
    #[arg(long, default_value_t = 20.0, help_heading = "Scoring")]
    pub field_good_enough: ScoreType,
    /// Bonus per matching prefix character
    #[arg(long, default_value_t = 0.5, help_heading = "Scoring")]
    pub bonus_match_start: ScoreType,
    /// Bonus per query token matched in field order
    #[arg(long, default_value_t = 2.0, help_heading = "Scoring")]
    pub bonus_token_order: ScoreType,
    /// Multiplicative decay of the per-field position bonus
    #[arg(long, default_value_t = 0.7, help_heading = "Scoring")]
    pub bonus_position_decay: ScoreType,
    /// Score tokens separately (false scores the fused query only)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, help_heading = "Scoring")]
    pub score_per_token: bool,
    /// Also score the fused query against each field and keep the max
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set, help_heading = "Scoring")]
    pub score_test_fused: bool,
    /// Quantum scores are rounded to before sorting
    #[arg(long, default_value_t = 0.1, help_heading = "Scoring")]
    pub score_round: ScoreType,
    //  --- Tokens ---
    /// Drop query tokens shorter than this
    #[arg(long, default_value_t = 2, help_heading = "Tokens")]
    pub token_query_min_length: usize,
    /// Drop field tokens shorter than this
    #[arg(long, default_value_t = 3, help_heading = "Tokens")]
    pub token_field_min_length: usize,
    /// Truncate query tokens longer than this
    #[arg(long, default_value_t = 64, help_heading = "Tokens")]
    pub token_query_max_length: usize,
    /// Truncate field tokens longer than this
    #[arg(long, default_value_t = 64, help_heading = "Tokens")]
    pub token_field_max_length: usize,
    /// Truncate the fused query string beyond this many chars
    #[arg(long, default_value_t = 64, help_heading = "Tokens")]
    pub token_fused_max_length: usize,
    /// Reject field tokens shorter than this fraction of the query token
    #[arg(long, default_value_t = 0.6, help_heading = "Tokens")]
    pub token_min_rel_size: ScoreType,
    /// Reject field tokens longer than this multiple of the query token
    #[arg(long, default_value_t = 6.0, help_heading = "Tokens")]
    pub token_max_rel_size: ScoreType,
    //  --- Output ---
    /// Maximum number of results (0 means unlimited)
    #[arg(long, default_value_t = 0, help_heading = "Output")]
    pub output_limit: usize,
    /// Field chars a highlight range may jump over and stay whole
    #[arg(long, default_value_t = 2, help_heading = "Output")]
    pub highlight_bridge_gap: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::parse_from::<_, &str>([])
    }
}
