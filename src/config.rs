//! 游戏配置
//!
//! 默认值可以通过环境变量（或工作目录下的 `.env` 文件）覆盖。

use serde::Serialize;
use std::{path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;

pub const ENV_SAVE_DIR: &str = "RAP_LEGACY_SAVE_DIR";
pub const ENV_LOG_DIR: &str = "RAP_LEGACY_LOG_DIR";
pub const ENV_LOG_FILTER: &str = "RAP_LEGACY_LOG_FILTER";
pub const ENV_SEED: &str = "RAP_LEGACY_SEED";
pub const ENV_TICK_MS: &str = "RAP_LEGACY_TICK_MS";
pub const ENV_ENEMY_DELAY_MS: &str = "RAP_LEGACY_ENEMY_DELAY_MS";
pub const ENV_MOVE_STEP: &str = "RAP_LEGACY_MOVE_STEP";

/// 配置项解析失败
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: cannot parse {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{key}: move step must be positive, got {value}")]
    NonPositiveStep { key: &'static str, value: f64 },
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// 存档目录
    pub save_dir: PathBuf,
    /// 日志目录
    pub log_dir: PathBuf,
    /// 默认日志过滤（`RUST_LOG` 优先）
    pub log_filter: String,
    /// 固定战斗随机种子，None 时使用随机种子
    pub seed: Option<u64>,
    /// 事件轮询间隔（毫秒）
    pub tick_ms: u64,
    /// 敌人出手前的停顿（毫秒）
    pub enemy_delay_ms: u64,
    /// 每次按键的移动距离（地图单位）
    pub move_step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            log_dir: PathBuf::from("logs"),
            log_filter: "info".to_string(),
            seed: None,
            tick_ms: 50,
            enemy_delay_ms: 600,
            move_step: 8.0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取 `.env`（可选）后从进程环境构建配置
    ///
    /// 日志此时还没有初始化，被忽略的值随配置一起返回，由调用方记录。
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Values that fail to
    /// parse keep their default and are returned alongside the config.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(dir) = non_empty(lookup(ENV_SAVE_DIR)) {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty(lookup(ENV_LOG_DIR)) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(filter) = non_empty(lookup(ENV_LOG_FILTER)) {
            config.log_filter = filter;
        }

        if let Some(seed) = read(&lookup, ENV_SEED, &mut errors) {
            config.seed = Some(seed);
        }
        if let Some(ms) = read::<u64, _>(&lookup, ENV_TICK_MS, &mut errors) {
            config.tick_ms = ms.max(1);
        }
        if let Some(ms) = read(&lookup, ENV_ENEMY_DELAY_MS, &mut errors) {
            config.enemy_delay_ms = ms;
        }
        if let Some(step) = read::<f64, _>(&lookup, ENV_MOVE_STEP, &mut errors) {
            if step.is_finite() && step > 0.0 {
                config.move_step = step;
            } else {
                errors.push(ConfigError::NonPositiveStep {
                    key: ENV_MOVE_STEP,
                    value: step,
                });
            }
        }

        (config, errors)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn enemy_delay(&self) -> Duration {
        Duration::from_millis(self.enemy_delay_ms)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// 解析单个变量
pub fn parse_var<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn read<T, L>(lookup: &L, key: &'static str, errors: &mut Vec<ConfigError>) -> Option<T>
where
    T: FromStr,
    L: Fn(&str) -> Option<String>,
{
    let raw = non_empty(lookup(key))?;
    parse_var(key, &raw).map_err(|err| errors.push(err)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(|_| None), (Config::default(), Vec::new()));
    }

    #[test]
    fn overrides_are_applied() {
        let (config, errors) = Config::from_lookup(lookup_from(&[
            (ENV_SAVE_DIR, "/tmp/rap/saves"),
            (ENV_SEED, "42"),
            (ENV_TICK_MS, "16"),
            (ENV_ENEMY_DELAY_MS, "0"),
            (ENV_MOVE_STEP, "12.5"),
            (ENV_LOG_FILTER, "debug"),
        ]));
        assert_eq!(config.save_dir, PathBuf::from("/tmp/rap/saves"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick(), Duration::from_millis(16));
        assert_eq!(config.enemy_delay(), Duration::ZERO);
        assert_eq!(config.move_step, 12.5);
        assert_eq!(config.log_filter, "debug");
        assert!(errors.is_empty());
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let (config, errors) = Config::from_lookup(lookup_from(&[
            (ENV_SEED, "not-a-number"),
            (ENV_TICK_MS, "-3"),
            (ENV_MOVE_STEP, "-1"),
            (ENV_LOG_DIR, "   "),
        ]));
        assert_eq!(config, Config::default());
        assert_eq!(
            errors,
            vec![
                ConfigError::InvalidValue {
                    key: ENV_SEED,
                    value: "not-a-number".to_string()
                },
                ConfigError::InvalidValue {
                    key: ENV_TICK_MS,
                    value: "-3".to_string()
                },
                ConfigError::NonPositiveStep {
                    key: ENV_MOVE_STEP,
                    value: -1.0
                },
            ]
        );
    }

    #[test]
    fn parse_var_reports_key_and_value() {
        let err = parse_var::<u64>(ENV_SEED, "x1").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_SEED,
                value: "x1".to_string()
            }
        );
        assert!(err.to_string().contains(ENV_SEED));
    }
}
