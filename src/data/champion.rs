//! Champion definitions: identity, speed build and skill kit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::data::constants::{PERCEPTION_SET_BONUS, SPEED_SET_BONUS};
use crate::data::skill::{Skill, SkillId};
use crate::error::ConfigError;

/// Two ordered skill lists driving a champion's automatic skill choice.
///
/// `opening[n]` is tried on the champion's n-th turn (0-based); when it is
/// missing or still cooling down, the first ready skill in `priority` wins,
/// and A1 is the final fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillPolicy {
    #[serde(default)]
    pub opening: Vec<SkillId>,
    #[serde(default)]
    pub priority: Vec<SkillId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub name: String,
    pub base_speed: f64,
    /// Speed from gear and masteries, excluding set bonuses.
    #[serde(default)]
    pub bonus_speed: f64,
    #[serde(default)]
    pub speed_sets: u32,
    #[serde(default)]
    pub perception_sets: u32,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub policy: SkillPolicy,
}

impl Champion {
    /// Champion whose gear puts it at exactly `effective_speed` with no set bonuses.
    pub fn new(
        name: impl Into<String>,
        base_speed: f64,
        effective_speed: f64,
        skills: Vec<Skill>,
    ) -> Self {
        Self {
            name: name.into(),
            base_speed,
            bonus_speed: effective_speed - base_speed,
            speed_sets: 0,
            perception_sets: 0,
            skills,
            policy: SkillPolicy::default(),
        }
    }

    pub fn with_policy(mut self, opening: Vec<SkillId>, priority: Vec<SkillId>) -> Self {
        self.policy = SkillPolicy { opening, priority };
        self
    }

    pub fn with_sets(mut self, speed_sets: u32, perception_sets: u32) -> Self {
        self.speed_sets = speed_sets;
        self.perception_sets = perception_sets;
        self
    }

    pub fn effective_speed(&self) -> f64 {
        let set_bonus = SPEED_SET_BONUS * f64::from(self.speed_sets)
            + PERCEPTION_SET_BONUS * f64::from(self.perception_sets);
        self.base_speed + self.bonus_speed + self.base_speed * set_bonus
    }

    /// Re-tune the speed build: shift gear speed by `speed_delta` and wear
    /// `speed_sets` speed sets instead of the current count.
    pub fn with_speed_tuning(&self, speed_delta: i32, speed_sets: u32) -> Self {
        Self {
            bonus_speed: self.bonus_speed + f64::from(speed_delta),
            speed_sets,
            ..self.clone()
        }
    }

    /// Re-gear so the effective speed lands on `effective_speed`, keeping set counts.
    pub fn with_effective_speed(&self, effective_speed: f64) -> Self {
        let delta = effective_speed - self.effective_speed();
        Self {
            bonus_speed: self.bonus_speed + delta,
            ..self.clone()
        }
    }

    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn basic_attack(&self) -> Option<&Skill> {
        self.skill(SkillId::A1)
    }

    /// Checks everything the engine relies on: a positive speed, an A1, and a
    /// policy that only names skills the champion actually has.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = self.effective_speed();
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed {
                name: self.name.clone(),
                speed,
            });
        }
        if self.basic_attack().is_none() {
            return Err(ConfigError::MissingSkill {
                participant: self.name.clone(),
                skill: SkillId::A1,
            });
        }
        let known: HashSet<SkillId> = self
            .skills
            .iter()
            .filter(|skill| !skill.is_passive())
            .map(|skill| skill.id)
            .collect();
        if let Some(unknown) = self
            .policy
            .opening
            .iter()
            .chain(self.policy.priority.iter())
            .find(|id| !known.contains(id))
        {
            return Err(ConfigError::UnknownPolicySkill {
                champion: self.name.clone(),
                skill: *unknown,
            });
        }
        Ok(())
    }
}

/// Index of the slowest champion by effective speed; the first one wins ties.
pub fn slowest_champion(champions: &[Champion]) -> Option<usize> {
    let mut slowest: Option<(usize, f64)> = None;
    for (index, champion) in champions.iter().enumerate() {
        let speed = champion.effective_speed();
        match slowest {
            Some((_, best)) if speed >= best => {}
            _ => slowest = Some((index, speed)),
        }
    }
    slowest.map(|(index, _)| index)
}
