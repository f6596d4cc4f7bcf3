use thiserror::Error;

use crate::data::skill::SkillId;

/// Catalog or roster data that cannot be turned into a battle participant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{participant} has no {skill:?} skill")]
    MissingSkill { participant: String, skill: SkillId },
    #[error("{champion} skill policy references {skill:?}, which it does not have")]
    UnknownPolicySkill { champion: String, skill: SkillId },
    #[error("{name} has non-positive speed {speed}")]
    InvalidSpeed { name: String, speed: f64 },
    #[error("participant name '{0}' appears more than once")]
    DuplicateName(String),
    #[error("unknown boss level '{0}'")]
    UnknownBossLevel(String),
    #[error("unknown champion '{0}'")]
    UnknownChampion(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0} never gains turn meter")]
    NoTurnMeterIncrease(String),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Battle(#[from] BattleError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
