use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::boss::ClanBoss;
use crate::data::constants::{turn_meter_per_tick, BOSS_NAME};
use crate::data::skill::{Buff, Debuff, Skill, SkillId};
use crate::error::ConfigError;

const ROTATION_LEN: usize = 3;

/// The clan boss during a battle.
///
/// Its only state is the turn meter and turn count: the skill used is
/// `rotation[turn_count % 3]`, and buffs, debuffs and effects never stick.
/// The buff/debuff maps exist so every participant reports the same shape;
/// they stay empty.
#[derive(Debug, Clone)]
pub struct BossInBattle {
    rotation: Arc<[Skill; ROTATION_LEN]>,
    turn_meter: f64,
    turn_meter_per_tick: f64,
    turn_count: u32,
    buffs: BTreeMap<Buff, u32>,
    debuffs: BTreeMap<Debuff, u32>,
}

impl BossInBattle {
    pub fn new(boss: &ClanBoss) -> Result<Self, ConfigError> {
        let find = |id: SkillId| {
            boss.skills
                .iter()
                .find(|skill| skill.id == id)
                .cloned()
                .ok_or_else(|| ConfigError::MissingSkill {
                    participant: BOSS_NAME.to_string(),
                    skill: id,
                })
        };
        let rotation = [find(SkillId::A1)?, find(SkillId::A2)?, find(SkillId::A3)?];

        Ok(Self {
            rotation: Arc::new(rotation),
            turn_meter: 0.0,
            turn_meter_per_tick: turn_meter_per_tick(boss.speed),
            turn_count: 0,
            buffs: BTreeMap::new(),
            debuffs: BTreeMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        BOSS_NAME
    }

    pub fn turn_meter(&self) -> f64 {
        self.turn_meter
    }

    pub fn turn_meter_per_tick(&self) -> f64 {
        self.turn_meter_per_tick
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn buffs(&self) -> &BTreeMap<Buff, u32> {
        &self.buffs
    }

    pub fn debuffs(&self) -> &BTreeMap<Debuff, u32> {
        &self.debuffs
    }

    pub fn clock_tick(&mut self) {
        self.turn_meter += self.turn_meter_per_tick;
    }

    pub fn next_ai_skill(&self) -> &Skill {
        &self.rotation[self.turn_count as usize % ROTATION_LEN]
    }

    pub fn basic_attack(&self) -> &Skill {
        &self.rotation[0]
    }

    pub fn take_turn(&mut self, _skill: &Skill) {
        self.turn_count += 1;
        self.turn_meter = 0.0;
    }
}
