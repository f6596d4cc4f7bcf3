//! The capability set every seat in a battle exposes to the engine.
//!
//! There are exactly two kinds of participant, so this is a closed enum rather
//! than a trait object: the engine matches on it where behavior differs and
//! the compiler checks every case. Mutators that make no sense for the boss
//! (buffs, debuffs, effects, hits, counterattacks) are silent no-ops on it.

use std::collections::BTreeMap;

use either::Either;

use crate::combat::boss::BossInBattle;
use crate::combat::champion::ChampionInBattle;
use crate::data::skill::{Buff, BuffToApply, Debuff, DebuffToApply, Effect, Skill, SkillId};

#[derive(Debug, Clone)]
pub enum Participant {
    Boss(BossInBattle),
    Champion(ChampionInBattle),
}

impl Participant {
    pub fn name(&self) -> &str {
        match self {
            Self::Boss(boss) => boss.name(),
            Self::Champion(champion) => champion.name(),
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, Self::Boss(_))
    }

    pub fn as_champion(&self) -> Option<&ChampionInBattle> {
        match self {
            Self::Boss(_) => None,
            Self::Champion(champion) => Some(champion),
        }
    }

    pub fn turn_meter(&self) -> f64 {
        match self {
            Self::Boss(boss) => boss.turn_meter(),
            Self::Champion(champion) => champion.turn_meter(),
        }
    }

    pub fn turn_meter_per_tick(&self) -> f64 {
        match self {
            Self::Boss(boss) => boss.turn_meter_per_tick(),
            Self::Champion(champion) => champion.turn_meter_per_tick(),
        }
    }

    pub fn turn_count(&self) -> u32 {
        match self {
            Self::Boss(boss) => boss.turn_count(),
            Self::Champion(champion) => champion.turn_count(),
        }
    }

    pub fn buffs(&self) -> &BTreeMap<Buff, u32> {
        match self {
            Self::Boss(boss) => boss.buffs(),
            Self::Champion(champion) => champion.buffs(),
        }
    }

    pub fn debuffs(&self) -> &BTreeMap<Debuff, u32> {
        match self {
            Self::Boss(boss) => boss.debuffs(),
            Self::Champion(champion) => champion.debuffs(),
        }
    }

    pub fn has_buff(&self, buff: Buff) -> bool {
        self.buffs().contains_key(&buff)
    }

    pub fn has_debuff(&self, debuff: Debuff) -> bool {
        self.debuffs().contains_key(&debuff)
    }

    /// Remaining cooldown per skill. Always empty for the boss.
    pub fn cooldowns(&self) -> BTreeMap<SkillId, u32> {
        match self {
            Self::Boss(_) => BTreeMap::new(),
            Self::Champion(champion) => champion.cooldowns().clone(),
        }
    }

    pub fn clock_tick(&mut self) {
        match self {
            Self::Boss(boss) => boss.clock_tick(),
            Self::Champion(champion) => champion.clock_tick(),
        }
    }

    pub fn next_ai_skill(&self) -> &Skill {
        match self {
            Self::Boss(boss) => boss.next_ai_skill(),
            Self::Champion(champion) => champion.next_ai_skill(),
        }
    }

    /// Every skill that may legally be used right now. The boss never branches:
    /// it yields exactly its rotation skill.
    pub fn available_skills(&self) -> impl Iterator<Item = &Skill> + '_ {
        match self {
            Self::Boss(boss) => Either::Left(std::iter::once(boss.next_ai_skill())),
            Self::Champion(champion) => Either::Right(champion.available_skills()),
        }
    }

    pub fn passive_skills(&self) -> impl Iterator<Item = &Skill> + '_ {
        match self {
            Self::Boss(_) => Either::Left(std::iter::empty()),
            Self::Champion(champion) => Either::Right(champion.passive_skills()),
        }
    }

    pub fn basic_attack(&self) -> &Skill {
        match self {
            Self::Boss(boss) => boss.basic_attack(),
            Self::Champion(champion) => champion.basic_attack(),
        }
    }

    pub fn take_turn(&mut self, skill: &Skill) {
        match self {
            Self::Boss(boss) => boss.take_turn(skill),
            Self::Champion(champion) => champion.take_turn(skill),
        }
    }

    pub fn get_attacked(&mut self, hit_count: u32) {
        if let Self::Champion(champion) = self {
            champion.get_attacked(hit_count);
        }
    }

    pub fn apply_buff(&mut self, buff: &BuffToApply) {
        if let Self::Champion(champion) = self {
            champion.apply_buff(buff);
        }
    }

    pub fn apply_debuff(&mut self, debuff: &DebuffToApply) {
        if let Self::Champion(champion) = self {
            champion.apply_debuff(debuff);
        }
    }

    pub fn apply_effect(&mut self, effect: &Effect) {
        if let Self::Champion(champion) = self {
            champion.apply_effect(effect);
        }
    }

    pub fn counterattack(&mut self) {
        if let Self::Champion(champion) = self {
            champion.counterattack();
        }
    }
}

impl From<BossInBattle> for Participant {
    fn from(boss: BossInBattle) -> Self {
        Self::Boss(boss)
    }
}

impl From<ChampionInBattle> for Participant {
    fn from(champion: ChampionInBattle) -> Self {
        Self::Champion(champion)
    }
}
