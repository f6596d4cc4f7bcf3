//! Declarative skill records: what a skill attacks and which buffs, debuffs and
//! effects it hands out. Pure data; the engine interprets it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillId {
    A1,
    A2,
    A3,
    A4,
    Passive,
}

impl SkillId {
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Passive)
    }
}

/// Who an attack lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackTarget {
    OneEnemy,
    AllEnemies,
    #[default]
    None,
}

/// Who a buff or effect lands on. The boss is never part of the team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// The acting champion only.
    Caster,
    /// Every champion except the caster.
    AllAllies,
    /// Every champion including the caster.
    FullTeam,
}

/// When a passive skill's effect fires during its owner's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeInTurn {
    #[default]
    Beginning,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Buff {
    Unkillable,
    BlockDamage,
    Counterattack,
    IncreaseSpeed,
    IncreaseAttack,
    IncreaseDefense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Debuff {
    Stun,
    DecreaseSpeed,
    DecreaseAttack,
    DecreaseDefense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Fill `percent` % of a full turn meter.
    IncreaseTurnMeter { percent: u32 },
    ReduceCooldowns { turns: u32 },
    ExtendBuffs { turns: u32 },
    RemoveDebuffs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffToApply {
    pub buff: Buff,
    pub duration: u32,
    pub target: Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebuffToApply {
    pub debuff: Debuff,
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectToApply {
    pub effect: Effect,
    pub target: Target,
    /// Only meaningful on passive skills.
    #[serde(default)]
    pub when: TimeInTurn,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnAction {
    #[serde(default)]
    pub attack_target: AttackTarget,
    #[serde(default)]
    pub attack_count: u32,
    #[serde(default)]
    pub buffs: Vec<BuffToApply>,
    #[serde(default)]
    pub debuffs: Vec<DebuffToApply>,
    #[serde(default)]
    pub effects: Vec<EffectToApply>,
}

impl TurnAction {
    pub fn attack_one_enemy(hits: u32) -> Self {
        Self {
            attack_target: AttackTarget::OneEnemy,
            attack_count: hits,
            ..Self::default()
        }
    }

    pub fn attack_all_enemies(hits: u32) -> Self {
        Self {
            attack_target: AttackTarget::AllEnemies,
            attack_count: hits,
            ..Self::default()
        }
    }

    pub fn with_buff(mut self, buff: Buff, duration: u32, target: Target) -> Self {
        self.buffs.push(BuffToApply {
            buff,
            duration,
            target,
        });
        self
    }

    pub fn with_debuff(mut self, debuff: Debuff, duration: u32) -> Self {
        self.debuffs.push(DebuffToApply { debuff, duration });
        self
    }

    pub fn with_effect(mut self, effect: Effect, target: Target, when: TimeInTurn) -> Self {
        self.effects.push(EffectToApply {
            effect,
            target,
            when,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default)]
    pub action: TurnAction,
}

impl Skill {
    pub fn new(name: impl Into<String>, id: SkillId, cooldown: u32, action: TurnAction) -> Self {
        Self {
            id,
            name: name.into(),
            cooldown,
            action,
        }
    }

    /// Passive skills are never chosen; their effects fire around the owner's turn.
    pub fn passive(name: impl Into<String>, action: TurnAction) -> Self {
        Self::new(name, SkillId::Passive, 0, action)
    }

    pub fn is_passive(&self) -> bool {
        self.id.is_passive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_buffs_debuffs_and_effects() {
        let action = TurnAction::attack_one_enemy(2)
            .with_buff(Buff::Unkillable, 2, Target::FullTeam)
            .with_debuff(Debuff::Stun, 1)
            .with_effect(
                Effect::IncreaseTurnMeter { percent: 15 },
                Target::AllAllies,
                TimeInTurn::End,
            );

        assert_eq!(action.attack_target, AttackTarget::OneEnemy);
        assert_eq!(action.attack_count, 2);
        assert_eq!(action.buffs.len(), 1);
        assert_eq!(action.debuffs[0].debuff, Debuff::Stun);
        assert_eq!(action.effects[0].when, TimeInTurn::End);
    }

    #[test]
    fn skill_deserializes_with_defaulted_action_fields() {
        let raw = r#"{ "id": "A2", "name": "Holy Flame", "cooldown": 3,
                       "action": { "attack_target": "OneEnemy", "attack_count": 4 } }"#;
        let skill: Skill = serde_json::from_str(raw).expect("skill json");
        assert_eq!(skill.id, SkillId::A2);
        assert_eq!(skill.action.attack_count, 4);
        assert!(skill.action.buffs.is_empty());
        assert!(!skill.is_passive());
    }
}
