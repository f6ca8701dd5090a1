//! Headless match configuration.
use std::env;
use std::path::PathBuf;

use tactics_core::TeamId;
use tactics_runtime::MatchConfig;

/// Everything needed to set up and run one headless match.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub content_dir: PathBuf,
    pub map: String,
    pub matches: MatchConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/content")),
            map: "yard".to_string(),
            matches: MatchConfig::default(),
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_CONTENT_DIR` - Directory holding roster, weapons and maps (default: bundled content)
    /// - `TACTICS_MAP` - Map name under `maps/` (default: yard)
    /// - `TACTICS_SEED` - Seed of the match dice (default: 0)
    /// - `TACTICS_ROUNDS` - Rounds to play (default: 5)
    /// - `TACTICS_TICK_MS` - Simulated milliseconds per tick (default: 50)
    /// - `TACTICS_FIRST_ATTACKING` - Team attacking in round one (default: Alpha)
    /// - `TACTICS_ALTERNATE_SIDES` - Swap sides every round (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("TACTICS_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(map) = env::var("TACTICS_MAP") {
            config.map = map;
        }

        if let Some(seed) = read_env::<u64>("TACTICS_SEED") {
            config.matches.seed = seed;
        }
        if let Some(rounds) = read_env::<u32>("TACTICS_ROUNDS") {
            config.matches.rounds = rounds.max(1);
        }
        if let Some(tick_ms) = read_env::<u64>("TACTICS_TICK_MS") {
            config.matches.tick_ms = tick_ms.max(1);
        }
        if let Some(team) = read_env::<TeamId>("TACTICS_FIRST_ATTACKING") {
            config.matches.first_attacking = team;
        }
        if let Some(alternate) = read_env::<bool>("TACTICS_ALTERNATE_SIDES") {
            config.matches.alternate_sides = alternate;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
