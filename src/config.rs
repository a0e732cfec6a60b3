use crate::consts;
use crate::game::{Grid, Settings, SpeedPolicy};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Boards smaller than this in either direction are rejected
const MIN_GRID_SIDE: u16 = 2;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Board and autopilot settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// How fast the snake moves and speeds up
    #[serde(default)]
    pub(crate) speed: SpeedConfig,

    /// Autopilot search settings
    #[serde(default)]
    pub(crate) search: SearchConfig,

    /// Where and how much to log
    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("autosnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// The settings a game should be started with
    pub(crate) fn settings(&self) -> Settings {
        Settings {
            grid: self.game.grid,
            speed: self.speed.policy,
            autopilot: self.game.autopilot,
            horizon: self.search.horizon,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    pub(crate) grid: Grid,
    pub(crate) autopilot: bool,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            grid: Grid::new(consts::DEFAULT_GRID_WIDTH, consts::DEFAULT_GRID_HEIGHT),
            autopilot: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct RawGameConfig {
    width: u16,
    height: u16,
    autopilot: bool,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        RawGameConfig {
            width: consts::DEFAULT_GRID_WIDTH,
            height: consts::DEFAULT_GRID_HEIGHT,
            autopilot: true,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = InvalidValue;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, InvalidValue> {
        let max = consts::MAX_GRID_SIZE;
        if !(MIN_GRID_SIDE..=max.width).contains(&value.width) {
            return Err(InvalidValue::Width {
                value: value.width,
                min: MIN_GRID_SIDE,
                max: max.width,
            });
        }
        if !(MIN_GRID_SIDE..=max.height).contains(&value.height) {
            return Err(InvalidValue::Height {
                value: value.height,
                min: MIN_GRID_SIDE,
                max: max.height,
            });
        }
        Ok(GameConfig {
            grid: Grid::new(value.width, value.height),
            autopilot: value.autopilot,
        })
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawSpeedConfig")]
pub(crate) struct SpeedConfig {
    pub(crate) policy: SpeedPolicy,
}

impl Default for SpeedConfig {
    fn default() -> SpeedConfig {
        SpeedConfig {
            policy: SpeedPolicy {
                initial: consts::INITIAL_TICK_INTERVAL,
                minimum: consts::MINIMUM_TICK_INTERVAL,
                step: consts::TICK_INTERVAL_STEP,
                points_per_step: consts::POINTS_PER_SPEED_STEP,
            },
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct RawSpeedConfig {
    initial_interval_ms: u64,
    minimum_interval_ms: u64,
    step_ms: u64,
    points_per_step: u32,
}

impl Default for RawSpeedConfig {
    fn default() -> RawSpeedConfig {
        let SpeedConfig { policy } = SpeedConfig::default();
        RawSpeedConfig {
            initial_interval_ms: millis(policy.initial),
            minimum_interval_ms: millis(policy.minimum),
            step_ms: millis(policy.step),
            points_per_step: policy.points_per_step,
        }
    }
}

impl TryFrom<RawSpeedConfig> for SpeedConfig {
    type Error = InvalidValue;

    fn try_from(value: RawSpeedConfig) -> Result<SpeedConfig, InvalidValue> {
        if value.minimum_interval_ms == 0 {
            return Err(InvalidValue::ZeroInterval);
        }
        if value.minimum_interval_ms > value.initial_interval_ms {
            return Err(InvalidValue::IntervalOrder {
                minimum: value.minimum_interval_ms,
                initial: value.initial_interval_ms,
            });
        }
        if value.points_per_step == 0 {
            return Err(InvalidValue::ZeroPointsPerStep);
        }
        Ok(SpeedConfig {
            policy: SpeedPolicy {
                initial: Duration::from_millis(value.initial_interval_ms),
                minimum: Duration::from_millis(value.minimum_interval_ms),
                step: Duration::from_millis(value.step_ms),
                points_per_step: value.points_per_step,
            },
        })
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawSearchConfig")]
pub(crate) struct SearchConfig {
    pub(crate) horizon: u32,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            horizon: consts::DEFAULT_SEARCH_HORIZON,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct RawSearchConfig {
    horizon: u32,
}

impl Default for RawSearchConfig {
    fn default() -> RawSearchConfig {
        RawSearchConfig {
            horizon: consts::DEFAULT_SEARCH_HORIZON,
        }
    }
}

impl TryFrom<RawSearchConfig> for SearchConfig {
    type Error = InvalidValue;

    fn try_from(value: RawSearchConfig) -> Result<SearchConfig, InvalidValue> {
        if !(1..=consts::MAX_SEARCH_HORIZON).contains(&value.horizon) {
            return Err(InvalidValue::Horizon {
                value: value.horizon,
                max: consts::MAX_SEARCH_HORIZON,
            });
        }
        Ok(SearchConfig {
            horizon: value.horizon,
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawLogConfig")]
pub(crate) struct LogConfig {
    /// File to write log messages to.  Nothing is logged if this is unset.
    pub(crate) file: Option<PathBuf>,

    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct RawLogConfig {
    file: Option<String>,
    level: Option<String>,
}

impl TryFrom<RawLogConfig> for LogConfig {
    type Error = InvalidValue;

    fn try_from(value: RawLogConfig) -> Result<LogConfig, InvalidValue> {
        let level = match value.level {
            Some(s) => s.parse().map_err(|_| InvalidValue::LogLevel(s))?,
            None => LevelFilter::Info,
        };
        Ok(LogConfig {
            file: value.file.as_deref().map(expand_home),
            level,
        })
    }
}

/// Replace a leading `~/` with the user's home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum InvalidValue {
    #[error("game.width must be between {min} and {max}, got {value}")]
    Width { value: u16, min: u16, max: u16 },
    #[error("game.height must be between {min} and {max}, got {value}")]
    Height { value: u16, min: u16, max: u16 },
    #[error("speed.minimum-interval-ms must be nonzero")]
    ZeroInterval,
    #[error("speed.minimum-interval-ms ({minimum}) exceeds speed.initial-interval-ms ({initial})")]
    IntervalOrder { minimum: u64, initial: u64 },
    #[error("speed.points-per-step must be nonzero")]
    ZeroPointsPerStep,
    #[error("search.horizon must be between 1 and {max}, got {value}")]
    Horizon { value: u32, max: u32 },
    #[error("invalid log.level {0:?}")]
    LogLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        let settings = cfg.settings();
        assert_eq!(settings.grid, Grid::new(40, 19));
        assert!(settings.autopilot);
        assert_eq!(settings.horizon, 10);
        assert_eq!(settings.speed.initial, Duration::from_millis(200));
        assert_eq!(settings.speed.minimum, Duration::from_millis(10));
        assert_eq!(settings.speed.step, Duration::from_millis(10));
        assert_eq!(settings.speed.points_per_step, 1);
    }

    #[test]
    fn full_file() {
        let src = concat!(
            "[game]\n",
            "width = 20\n",
            "height = 10\n",
            "autopilot = false\n",
            "\n",
            "[speed]\n",
            "initial-interval-ms = 150\n",
            "minimum-interval-ms = 50\n",
            "step-ms = 5\n",
            "points-per-step = 3\n",
            "\n",
            "[search]\n",
            "horizon = 6\n",
            "\n",
            "[log]\n",
            "file = \"/tmp/autosnake.log\"\n",
            "level = \"debug\"\n",
        );
        let cfg = toml::from_str::<Config>(src).unwrap();
        pretty_assertions::assert_eq!(
            cfg,
            Config {
                game: GameConfig {
                    grid: Grid::new(20, 10),
                    autopilot: false,
                },
                speed: SpeedConfig {
                    policy: SpeedPolicy {
                        initial: Duration::from_millis(150),
                        minimum: Duration::from_millis(50),
                        step: Duration::from_millis(5),
                        points_per_step: 3,
                    },
                },
                search: SearchConfig { horizon: 6 },
                log: LogConfig {
                    file: Some(PathBuf::from("/tmp/autosnake.log")),
                    level: LevelFilter::Debug,
                },
            }
        );
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = toml::from_str::<Config>("[game]\nwidth = 12\n").unwrap();
        assert_eq!(cfg.game.grid, Grid::new(12, consts::DEFAULT_GRID_HEIGHT));
        assert!(cfg.game.autopilot);
        assert_eq!(cfg.speed, SpeedConfig::default());
    }

    #[test]
    fn board_too_wide() {
        let e = toml::from_str::<Config>("[game]\nwidth = 100\n").unwrap_err();
        assert!(
            e.to_string()
                .contains("game.width must be between 2 and 76, got 100"),
            "{e}"
        );
    }

    #[test]
    fn minimum_above_initial() {
        let e = toml::from_str::<Config>(
            "[speed]\ninitial-interval-ms = 100\nminimum-interval-ms = 150\n",
        )
        .unwrap_err();
        assert!(e.to_string().contains("exceeds"), "{e}");
    }

    #[test]
    fn horizon_out_of_range() {
        assert!(toml::from_str::<Config>("[search]\nhorizon = 0\n").is_err());
        let e = toml::from_str::<Config>("[search]\nhorizon = 13\n").unwrap_err();
        assert!(
            e.to_string()
                .contains("search.horizon must be between 1 and 12, got 13"),
            "{e}"
        );
        let cfg = toml::from_str::<Config>("[search]\nhorizon = 12\n").unwrap();
        assert_eq!(cfg.search.horizon, 12);
    }

    #[test]
    fn bad_log_level() {
        let e = toml::from_str::<Config>("[log]\nlevel = \"loud\"\n").unwrap_err();
        assert!(e.to_string().contains("invalid log.level \"loud\""), "{e}");
    }

    #[test]
    fn unknown_key() {
        assert!(toml::from_str::<Config>("[game]\nwrap = true\n").is_err());
    }

    #[test]
    fn load_missing_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
    }

    #[test]
    fn load_missing_not_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let e = Config::load(&path, false).unwrap_err();
        assert!(matches!(e, ConfigError::Read(_)));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(&path, "[search]\nhorizon = 4\n").unwrap();
        let cfg = Config::load(&path, false).unwrap();
        assert_eq!(cfg.search.horizon, 4);
    }

    #[test]
    fn load_invalid_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(&path, "[game]\nheight = 1\n").unwrap();
        let e = Config::load(&path, false).unwrap_err();
        assert!(matches!(e, ConfigError::Parse(_)));
        assert!(e.source().is_some());
    }

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        assert_eq!(expand_home("/var/log/x.log"), PathBuf::from("/var/log/x.log"));
        assert_eq!(expand_home("logs/x.log"), PathBuf::from("logs/x.log"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.log"), home.join("x.log"));
        }
    }
}
