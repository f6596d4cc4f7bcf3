//! Clan boss difficulty tiers and their fixed three-skill rotation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::skill::{Debuff, Skill, SkillId, TurnAction};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossLevel {
    Easy,
    Normal,
    Hard,
    Brutal,
    Nightmare,
    UltraNightmare,
}

impl BossLevel {
    pub const ALL: [BossLevel; 6] = [
        Self::Easy,
        Self::Normal,
        Self::Hard,
        Self::Brutal,
        Self::Nightmare,
        Self::UltraNightmare,
    ];

    pub const fn speed(self) -> f64 {
        match self {
            Self::Easy => 90.0,
            Self::Normal => 120.0,
            Self::Hard => 140.0,
            Self::Brutal => 160.0,
            Self::Nightmare => 170.0,
            Self::UltraNightmare => 190.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Brutal => "brutal",
            Self::Nightmare => "nightmare",
            Self::UltraNightmare => "ultra_nightmare",
        }
    }
}

impl fmt::Display for BossLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BossLevel {
    type Err = ConfigError;

    /// Accepts `ultra_nightmare`, `Ultra Nightmare`, `unm`, `nm`, ...
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            "brutal" => Ok(Self::Brutal),
            "nightmare" | "nm" => Ok(Self::Nightmare),
            "ultranightmare" | "unm" => Ok(Self::UltraNightmare),
            _ => Err(ConfigError::UnknownBossLevel(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClanBoss {
    pub level: BossLevel,
    pub speed: f64,
    pub skills: Vec<Skill>,
}

impl ClanBoss {
    pub fn get(level: BossLevel) -> Self {
        Self {
            level,
            speed: level.speed(),
            skills: vec![
                Skill::new(
                    "Dark Fists",
                    SkillId::A1,
                    0,
                    TurnAction::attack_all_enemies(1).with_debuff(Debuff::DecreaseDefense, 2),
                ),
                Skill::new("Demonic Breath", SkillId::A2, 0, TurnAction::attack_all_enemies(1)),
                Skill::new(
                    "Crushing Stomp",
                    SkillId::A3,
                    0,
                    TurnAction::attack_one_enemy(1).with_debuff(Debuff::Stun, 1),
                ),
            ],
        }
    }
}
