//! Branching turn-meter simulation.
//!
//! A battle is a FIFO queue of snapshots. Each step pops one snapshot and
//! advances the clock; when someone's meter passes full, that participant acts
//! once per candidate skill, producing one successor snapshot per skill. Boss
//! turns never branch (the boss always has exactly one skill), so a branch can
//! finish at most once per step. Finished branches come out of [Branches] in
//! the order they finish.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::combat::boss::BossInBattle;
use crate::combat::champion::ChampionInBattle;
use crate::combat::participant::Participant;
use crate::combat::result::{Attack, BattleLog, BattleResult, Hit, ParticipantStats, ResultTrail};
use crate::combat::targeting::{SlowestChampion, StunTargetSelector};
use crate::data::boss::{BossLevel, ClanBoss};
use crate::data::champion::Champion;
use crate::data::constants::TURN_METER_FULL;
use crate::data::skill::{AttackTarget, Buff, Debuff, Skill, Target, TimeInTurn};
use crate::error::{BattleError, ConfigError};

const fn default_max_boss_turns() -> u32 {
    50
}

const fn default_last_killable_turn() -> u32 {
    7
}

const fn default_explore_until_boss_turn() -> u32 {
    7
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// A branch finishes once the boss has taken this many turns.
    #[serde(default = "default_max_boss_turns")]
    pub max_boss_turns: u32,
    /// Boss hits after this boss turn kill any champion without Unkillable.
    #[serde(default = "default_last_killable_turn")]
    pub last_killable_turn: u32,
    /// Exhaustive runs branch on every available skill while the boss turn
    /// count is below this value, then follow the AI policy.
    #[serde(default = "default_explore_until_boss_turn")]
    pub explore_until_boss_turn: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_boss_turns: default_max_boss_turns(),
            last_killable_turn: default_last_killable_turn(),
            explore_until_boss_turn: default_explore_until_boss_turn(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// AI skill choice only; kills are recorded but never end the branch.
    SinglePath,
    /// Branch on every available skill early on; a kill drops the branch.
    Exhaustive,
}

impl RunMode {
    const fn explores(self) -> bool {
        matches!(self, Self::Exhaustive)
    }

    const fn fails_on_kill(self) -> bool {
        matches!(self, Self::Exhaustive)
    }
}

#[derive(Debug, Clone)]
struct BattleSnapshot {
    /// Champions in roster order, then the boss.
    participants: Vec<Participant>,
    trail: ResultTrail,
}

impl BattleSnapshot {
    fn boss_index(&self) -> usize {
        self.participants.len() - 1
    }

    fn boss_turn(&self) -> u32 {
        self.participants[self.boss_index()].turn_count()
    }

    fn capture(&self) -> Vec<ParticipantStats> {
        self.participants.iter().map(ParticipantStats::capture).collect()
    }
}

pub struct BattleEngine {
    initial: BattleSnapshot,
    config: BattleConfig,
    stun_target: Arc<dyn StunTargetSelector>,
}

impl fmt::Debug for BattleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleEngine")
            .field("participants", &self.initial.participants)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BattleEngine {
    pub fn new(
        level: BossLevel,
        champions: &[Champion],
        config: BattleConfig,
    ) -> Result<Self, BattleError> {
        let mut participants = Vec::with_capacity(champions.len() + 1);
        for champion in champions {
            if participants
                .iter()
                .any(|seated: &Participant| seated.name() == champion.name)
            {
                return Err(ConfigError::DuplicateName(champion.name.clone()).into());
            }
            participants.push(Participant::from(ChampionInBattle::new(champion)?));
        }
        let boss = BossInBattle::new(&ClanBoss::get(level))?;
        if participants.iter().any(|seated| seated.name() == boss.name()) {
            return Err(ConfigError::DuplicateName(boss.name().to_string()).into());
        }
        participants.push(boss.into());

        if let Some(stalled) = participants.iter().find(|participant| {
            let rate = participant.turn_meter_per_tick();
            !rate.is_finite() || rate <= 0.0
        }) {
            return Err(BattleError::NoTurnMeterIncrease(stalled.name().to_string()));
        }

        debug!(
            level = %level,
            champions = champions.len(),
            max_boss_turns = config.max_boss_turns,
            "battle engine ready"
        );
        Ok(Self {
            initial: BattleSnapshot {
                participants,
                trail: ResultTrail::new(),
            },
            config,
            stun_target: Arc::new(SlowestChampion),
        })
    }

    /// Replace the default (slowest champion) single-target selector.
    pub fn with_stun_target(mut self, selector: impl StunTargetSelector + 'static) -> Self {
        self.stun_target = Arc::new(selector);
        self
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Participants before the first tick, champions first.
    pub fn participants(&self) -> &[Participant] {
        &self.initial.participants
    }

    /// The log of the battle as the built-in policies play it.
    pub fn run(&self) -> Option<BattleLog> {
        self.branches(RunMode::SinglePath).next()
    }

    /// Every early-game skill sequence that keeps the whole team alive, lazily.
    pub fn find_unkillable_sequences(&self) -> Branches<'_> {
        self.branches(RunMode::Exhaustive)
    }

    pub fn branches(&self, mode: RunMode) -> Branches<'_> {
        Branches {
            engine: self,
            mode,
            queue: VecDeque::from([self.initial.clone()]),
            finished: VecDeque::new(),
        }
    }
}

/// Lazy iterator over finished battle logs. Dropping it abandons every
/// unfinished branch.
pub struct Branches<'a> {
    engine: &'a BattleEngine,
    mode: RunMode,
    queue: VecDeque<BattleSnapshot>,
    finished: VecDeque<BattleLog>,
}

impl fmt::Debug for Branches<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branches")
            .field("mode", &self.mode)
            .field("pending", &self.queue.len())
            .field("finished", &self.finished.len())
            .finish()
    }
}

impl Iterator for Branches<'_> {
    type Item = BattleLog;

    fn next(&mut self) -> Option<BattleLog> {
        loop {
            if let Some(log) = self.finished.pop_front() {
                return Some(log);
            }
            let snapshot = self.queue.pop_front()?;
            self.step(snapshot);
        }
    }
}

/// Whether the participant at `index` receives something aimed at `target`
/// by the champion at `caster`.
fn receives(target: Target, index: usize, caster: usize, participant: &Participant) -> bool {
    if participant.is_boss() {
        return false;
    }
    match target {
        Target::Caster => index == caster,
        Target::AllAllies => index != caster,
        Target::FullTeam => true,
    }
}

fn apply_passives(participants: &mut [Participant], actor: usize, when: TimeInTurn) {
    let effects: Vec<_> = participants[actor]
        .passive_skills()
        .flat_map(|passive| passive.action.effects.iter())
        .filter(|effect| effect.when == when)
        .copied()
        .collect();
    for effect in effects {
        for (index, participant) in participants.iter_mut().enumerate() {
            if receives(effect.target, index, actor, participant) {
                participant.apply_effect(&effect.effect);
            }
        }
    }
}

fn reflexive_attack(participant: &Participant) -> Attack {
    let basic = participant.basic_attack();
    Attack {
        attacker: participant.name().to_string(),
        turn: participant.turn_count(),
        turn_meter: participant.turn_meter(),
        skill: basic.id,
        skill_name: basic.name.clone(),
        preferred_skill: basic.id,
    }
}

/// What the current turn looked like before any branch acted on it.
struct TurnContext {
    actor: usize,
    turn_meter: f64,
    preferred: Skill,
}

impl Branches<'_> {
    fn step(&mut self, mut snapshot: BattleSnapshot) {
        for participant in &mut snapshot.participants {
            participant.clock_tick();
        }

        let participants = &snapshot.participants;
        let mut actor = 0;
        for (index, participant) in participants.iter().enumerate() {
            if participant.turn_meter() > participants[actor].turn_meter() {
                actor = index;
            }
        }
        if participants[actor].turn_meter() <= TURN_METER_FULL {
            self.queue.push_back(snapshot);
            return;
        }

        let turn_meter = snapshot.participants[actor].turn_meter();
        apply_passives(&mut snapshot.participants, actor, TimeInTurn::Beginning);

        let acting = &snapshot.participants[actor];
        let preferred = acting.next_ai_skill().clone();
        let skills: Vec<Skill> = if self.mode.explores()
            && snapshot.boss_turn() < self.engine.config.explore_until_boss_turn
        {
            acting.available_skills().cloned().collect()
        } else {
            vec![preferred.clone()]
        };
        let context = TurnContext {
            actor,
            turn_meter,
            preferred,
        };

        let mut pending = Some(snapshot);
        let mut skills = skills.into_iter().peekable();
        while let Some(skill) = skills.next() {
            let branch = if skills.peek().is_some() {
                pending.clone()
            } else {
                pending.take()
            };
            let Some(branch) = branch else {
                break;
            };
            if branch.participants[actor].is_boss() {
                self.resolve_boss_turn(branch, &context, &skill);
            } else {
                self.resolve_champion_turn(branch, &context, &skill);
            }
        }
    }

    fn resolve_champion_turn(
        &mut self,
        mut branch: BattleSnapshot,
        context: &TurnContext,
        skill: &Skill,
    ) {
        let actor = context.actor;
        branch.participants[actor].take_turn(skill);

        for buff in &skill.action.buffs {
            for (index, participant) in branch.participants.iter_mut().enumerate() {
                if receives(buff.target, index, actor, participant) {
                    participant.apply_buff(buff);
                }
            }
        }
        for effect in &skill.action.effects {
            for (index, participant) in branch.participants.iter_mut().enumerate() {
                if receives(effect.target, index, actor, participant) {
                    participant.apply_effect(&effect.effect);
                }
            }
        }
        apply_passives(&mut branch.participants, actor, TimeInTurn::End);

        let result = BattleResult {
            boss_turn: branch.boss_turn(),
            attack: self.attack_record(&branch, context, skill),
            hits: Vec::new(),
            participants: branch.capture(),
            counterattacks: Vec::new(),
        };
        trace!(
            actor = %result.attack.attacker,
            skill = ?skill.id,
            boss_turn = result.boss_turn,
            "champion turn"
        );
        branch.trail.push(result);
        self.queue.push_back(branch);
    }

    fn resolve_boss_turn(&mut self, mut branch: BattleSnapshot, context: &TurnContext, skill: &Skill) {
        let config = &self.engine.config;
        let boss_index = branch.boss_index();
        branch.participants[boss_index].take_turn(skill);
        let boss_turn = branch.boss_turn();
        let action = &skill.action;

        let targets: Vec<usize> = match action.attack_target {
            AttackTarget::AllEnemies => (0..boss_index).collect(),
            AttackTarget::OneEnemy => self
                .engine
                .stun_target
                .select(&branch.participants)
                .filter(|&index| index < boss_index)
                .into_iter()
                .collect(),
            AttackTarget::None => Vec::new(),
        };

        let mut hits = Vec::with_capacity(targets.len());
        let mut counterattackers = Vec::new();
        let mut lethal = false;
        for index in targets {
            let target = &mut branch.participants[index];
            target.get_attacked(action.attack_count);
            for debuff in &action.debuffs {
                target.apply_debuff(debuff);
            }
            let protected = target.has_buff(Buff::Unkillable);
            if boss_turn > config.last_killable_turn && !protected {
                lethal = true;
            }
            if target.has_buff(Buff::Counterattack) && !target.has_debuff(Debuff::Stun) {
                counterattackers.push(index);
            }
            hits.push(Hit {
                target: target.name().to_string(),
                hit_count: action.attack_count,
                protected,
            });
        }

        let mut counterattacks = Vec::with_capacity(counterattackers.len());
        for index in counterattackers {
            let participant = &mut branch.participants[index];
            participant.counterattack();
            counterattacks.push(reflexive_attack(participant));
        }

        // A kill on the last boss turn still completes the battle.
        let final_turn = boss_turn >= config.max_boss_turns;
        if lethal && self.mode.fails_on_kill() && !final_turn {
            debug!(boss_turn, skill = %skill.name, "branch dropped: champion killed");
            return;
        }

        let result = BattleResult {
            boss_turn,
            attack: self.attack_record(&branch, context, skill),
            hits,
            participants: branch.capture(),
            counterattacks,
        };
        trace!(boss_turn, skill = %skill.name, "boss turn");
        branch.trail.push(result);

        if final_turn {
            debug!(boss_turn, entries = branch.trail.len(), "branch finished");
            self.finished.push_back(branch.trail.to_log());
        } else {
            self.queue.push_back(branch);
        }
    }

    fn attack_record(&self, branch: &BattleSnapshot, context: &TurnContext, skill: &Skill) -> Attack {
        let actor = &branch.participants[context.actor];
        Attack {
            attacker: actor.name().to_string(),
            turn: actor.turn_count(),
            turn_meter: context.turn_meter,
            skill: skill.id,
            skill_name: skill.name.clone(),
            preferred_skill: context.preferred.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::skill::{SkillId, TurnAction};

    fn striker(name: &str, speed: f64) -> Champion {
        Champion::new(
            name,
            100.0,
            speed,
            vec![Skill::new("Strike", SkillId::A1, 0, TurnAction::attack_one_enemy(1))],
        )
    }

    fn short_config(max_boss_turns: u32) -> BattleConfig {
        BattleConfig {
            max_boss_turns,
            ..BattleConfig::default()
        }
    }

    #[test]
    fn config_defaults() {
        let config = BattleConfig::default();
        assert_eq!(config.max_boss_turns, 50);
        assert_eq!(config.last_killable_turn, 7);
        assert_eq!(config.explore_until_boss_turn, 7);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let champions = vec![striker("Twin", 150.0), striker("Twin", 160.0)];
        let err = BattleEngine::new(BossLevel::Easy, &champions, BattleConfig::default())
            .expect_err("duplicate");
        assert_eq!(
            err,
            BattleError::Config(ConfigError::DuplicateName("Twin".to_string()))
        );
    }

    #[test]
    fn single_path_run_ends_on_the_last_boss_turn() {
        let engine =
            BattleEngine::new(BossLevel::Easy, &[striker("Solo", 180.0)], short_config(3))
                .expect("engine");
        let log = engine.run().expect("single path always finishes");
        let last = log.last().expect("non-empty");
        assert_eq!(last.boss_turn, 3);
        assert_eq!(last.attack.attacker, "Clan Boss");
        assert_eq!(log.iter().filter(|r| r.is_boss_turn()).count(), 3);
    }

    #[test]
    fn equal_meters_act_in_roster_order() {
        let champions = vec![striker("First", 150.0), striker("Second", 150.0)];
        let engine = BattleEngine::new(BossLevel::Easy, &champions, short_config(1))
            .expect("engine");
        let log = engine.run().expect("log");
        assert_eq!(log[0].attack.attacker, "First");
        assert_eq!(log[1].attack.attacker, "Second");
    }

    #[test]
    fn attack_records_pre_turn_meter() {
        let engine =
            BattleEngine::new(BossLevel::Easy, &[striker("Solo", 200.0)], short_config(1))
                .expect("engine");
        let log = engine.run().expect("log");
        assert!(log[0].attack.turn_meter > TURN_METER_FULL);
        assert_eq!(log[0].participants[0].turn_meter, 0.0);
    }
}
