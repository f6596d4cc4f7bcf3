use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::champion::Champion;
use crate::data::constants::{turn_meter_per_tick, SPEED_BUFF_FACTOR, TURN_METER_FULL};
use crate::data::skill::{Buff, BuffToApply, Debuff, DebuffToApply, Effect, Skill, SkillId};
use crate::error::ConfigError;

/// A champion's mutable battle state on top of its shared definition.
#[derive(Debug, Clone)]
pub struct ChampionInBattle {
    champion: Arc<Champion>,
    basic_attack: usize,
    speed: f64,
    turn_meter: f64,
    turn_meter_per_tick: f64,
    turn_count: u32,
    buffs: BTreeMap<Buff, u32>,
    debuffs: BTreeMap<Debuff, u32>,
    cooldowns: BTreeMap<SkillId, u32>,
    hits_taken: u32,
    counterattacks: u32,
}

fn age(durations: &mut BTreeMap<impl Ord, u32>) {
    for remaining in durations.values_mut() {
        *remaining = remaining.saturating_sub(1);
    }
    durations.retain(|_, remaining| *remaining > 0);
}

impl ChampionInBattle {
    pub fn new(champion: &Champion) -> Result<Self, ConfigError> {
        champion.validate()?;
        let basic_attack = champion
            .skills
            .iter()
            .position(|skill| skill.id == SkillId::A1)
            .ok_or_else(|| ConfigError::MissingSkill {
                participant: champion.name.clone(),
                skill: SkillId::A1,
            })?;
        let cooldowns = champion
            .skills
            .iter()
            .filter(|skill| !skill.is_passive())
            .map(|skill| (skill.id, 0))
            .collect();
        let speed = champion.effective_speed();

        Ok(Self {
            champion: Arc::new(champion.clone()),
            basic_attack,
            speed,
            turn_meter: 0.0,
            turn_meter_per_tick: turn_meter_per_tick(speed),
            turn_count: 0,
            buffs: BTreeMap::new(),
            debuffs: BTreeMap::new(),
            cooldowns,
            hits_taken: 0,
            counterattacks: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.champion.name
    }

    pub fn champion(&self) -> &Champion {
        &self.champion
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

    pub fn cooldowns(&self) -> &BTreeMap<SkillId, u32> {
        &self.cooldowns
    }

    pub fn hits_taken(&self) -> u32 {
        self.hits_taken
    }

    pub fn counterattacks(&self) -> u32 {
        self.counterattacks
    }

    pub fn clock_tick(&mut self) {
        self.turn_meter += self.turn_meter_per_tick;
    }

    fn ready_skill(&self, id: SkillId) -> Option<&Skill> {
        if self.cooldowns.get(&id) != Some(&0) {
            return None;
        }
        self.champion.skill(id)
    }

    pub fn basic_attack(&self) -> &Skill {
        &self.champion.skills[self.basic_attack]
    }

    pub fn available_skills(&self) -> impl Iterator<Item = &Skill> + '_ {
        self.champion
            .skills
            .iter()
            .filter(move |skill| !skill.is_passive() && self.cooldowns.get(&skill.id) == Some(&0))
    }

    pub fn passive_skills(&self) -> impl Iterator<Item = &Skill> + '_ {
        self.champion.skills.iter().filter(|skill| skill.is_passive())
    }

    pub fn next_ai_skill(&self) -> &Skill {
        let policy = &self.champion.policy;
        let opening = policy
            .opening
            .get(self.turn_count as usize)
            .and_then(|id| self.ready_skill(*id));
        opening
            .or_else(|| policy.priority.iter().find_map(|id| self.ready_skill(*id)))
            .unwrap_or_else(|| self.basic_attack())
    }

    /// Commit to `skill`: the meter empties, the skill's cooldown starts, and
    /// every cooldown, buff and debuff ages by one turn.
    pub fn take_turn(&mut self, skill: &Skill) {
        self.turn_count += 1;
        self.turn_meter = 0.0;
        if let Some(remaining) = self.cooldowns.get_mut(&skill.id) {
            *remaining = skill.cooldown;
        }
        for remaining in self.cooldowns.values_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        age(&mut self.buffs);
        age(&mut self.debuffs);
        self.refresh_speed();
    }

    pub fn get_attacked(&mut self, hit_count: u32) {
        self.hits_taken += hit_count;
    }

    pub fn counterattack(&mut self) {
        self.counterattacks += 1;
    }

    pub fn apply_buff(&mut self, buff: &BuffToApply) {
        let remaining = self.buffs.entry(buff.buff).or_insert(0);
        *remaining = (*remaining).max(buff.duration);
        self.refresh_speed();
    }

    pub fn apply_debuff(&mut self, debuff: &DebuffToApply) {
        let remaining = self.debuffs.entry(debuff.debuff).or_insert(0);
        *remaining = (*remaining).max(debuff.duration);
        self.refresh_speed();
    }

    pub fn apply_effect(&mut self, effect: &Effect) {
        match *effect {
            Effect::IncreaseTurnMeter { percent } => {
                self.turn_meter += TURN_METER_FULL * f64::from(percent) / 100.0;
            }
            Effect::ReduceCooldowns { turns } => {
                for remaining in self.cooldowns.values_mut() {
                    *remaining = remaining.saturating_sub(turns);
                }
            }
            Effect::ExtendBuffs { turns } => {
                for remaining in self.buffs.values_mut() {
                    *remaining += turns;
                }
            }
            Effect::RemoveDebuffs => {
                self.debuffs.clear();
                self.refresh_speed();
            }
        }
    }

    fn refresh_speed(&mut self) {
        let mut factor = 1.0;
        if self.buffs.contains_key(&Buff::IncreaseSpeed) {
            factor += SPEED_BUFF_FACTOR;
        }
        if self.debuffs.contains_key(&Debuff::DecreaseSpeed) {
            factor -= SPEED_BUFF_FACTOR;
        }
        self.turn_meter_per_tick = turn_meter_per_tick(self.speed * factor);
    }
}
