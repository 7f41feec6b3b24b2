// Ranking — top-K leaderboards over scored terms.

pub mod leaderboard;

pub use leaderboard::{rank_all, top_k, Leaderboard, LeaderboardEntry, Leaderboards};

/// Default leaderboard size.
pub const DEFAULT_TOP_K: usize = 10;

/// Largest leaderboard size accepted from configuration.
pub const MAX_TOP_K: usize = 100;
