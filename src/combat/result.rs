//! Per-turn battle records and the one query the tuning search needs.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::combat::participant::Participant;
use crate::data::skill::{Buff, SkillId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attack {
    pub attacker: String,
    /// The attacker's own turn count after acting.
    pub turn: u32,
    pub turn_meter: f64,
    pub skill: SkillId,
    pub skill_name: String,
    /// What the built-in policy would have used this turn.
    pub preferred_skill: SkillId,
}

/// One boss hit on one champion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    pub target: String,
    pub hit_count: u32,
    /// The target held Unkillable when the hit landed.
    pub protected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantStats {
    pub name: String,
    pub is_boss: bool,
    pub turn_meter: f64,
    pub buffs: BTreeMap<Buff, u32>,
    pub cooldowns: BTreeMap<SkillId, u32>,
}

impl ParticipantStats {
    pub fn capture(participant: &Participant) -> Self {
        Self {
            name: participant.name().to_string(),
            is_boss: participant.is_boss(),
            turn_meter: participant.turn_meter(),
            buffs: participant.buffs().clone(),
            cooldowns: participant.cooldowns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleResult {
    pub boss_turn: u32,
    pub attack: Attack,
    pub hits: Vec<Hit>,
    pub participants: Vec<ParticipantStats>,
    pub counterattacks: Vec<Attack>,
}

impl BattleResult {
    pub fn is_boss_turn(&self) -> bool {
        self.participants
            .iter()
            .any(|stats| stats.is_boss && stats.name == self.attack.attacker)
    }
}

/// Ordered results of one finished branch.
pub type BattleLog = Vec<BattleResult>;

/// Append-only result list shared between branches.
///
/// Branches that split from a common ancestor share that ancestor's entries,
/// so cloning a trail is O(1) no matter how long the battle has run.
#[derive(Debug, Clone, Default)]
pub struct ResultTrail {
    head: Option<Arc<TrailNode>>,
    len: usize,
}

#[derive(Debug)]
struct TrailNode {
    result: BattleResult,
    previous: Option<Arc<TrailNode>>,
}

impl ResultTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, result: BattleResult) {
        let previous = self.head.take();
        self.head = Some(Arc::new(TrailNode { result, previous }));
        self.len += 1;
    }

    pub fn last(&self) -> Option<&BattleResult> {
        self.head.as_deref().map(|node| &node.result)
    }

    /// Materialize the trail, oldest entry first.
    pub fn to_log(&self) -> BattleLog {
        let mut log = Vec::with_capacity(self.len);
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            log.push(node.result.clone());
            cursor = node.previous.as_deref();
        }
        log.reverse();
        log
    }
}

impl Drop for ResultTrail {
    // Unlink iteratively so very long trails cannot overflow the stack.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut owned) => next = owned.previous.take(),
                Err(_) => break,
            }
        }
    }
}

/// Highest boss turn on which `champion` was hit without Unkillable, if any.
pub fn last_killable_turn(log: &[BattleResult], champion: &str) -> Option<u32> {
    log.iter()
        .filter(|result| {
            result
                .hits
                .iter()
                .any(|hit| hit.target == champion && !hit.protected)
        })
        .map(|result| result.boss_turn)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(boss_turn: u32, hits: Vec<Hit>) -> BattleResult {
        BattleResult {
            boss_turn,
            attack: Attack {
                attacker: "Clan Boss".to_string(),
                turn: boss_turn,
                turn_meter: 101.0,
                skill: SkillId::A1,
                skill_name: "Dark Fists".to_string(),
                preferred_skill: SkillId::A1,
            },
            hits,
            participants: vec![],
            counterattacks: vec![],
        }
    }

    fn hit(target: &str, protected: bool) -> Hit {
        Hit {
            target: target.to_string(),
            hit_count: 1,
            protected,
        }
    }

    #[test]
    fn trail_preserves_order_and_shares_prefix() {
        let mut trunk = ResultTrail::new();
        trunk.push(result(1, vec![]));
        trunk.push(result(2, vec![]));

        let mut left = trunk.clone();
        let mut right = trunk.clone();
        left.push(result(3, vec![]));
        right.push(result(30, vec![]));

        let turns = |trail: &ResultTrail| -> Vec<u32> {
            trail.to_log().iter().map(|r| r.boss_turn).collect()
        };
        assert_eq!(turns(&trunk), vec![1, 2]);
        assert_eq!(turns(&left), vec![1, 2, 3]);
        assert_eq!(turns(&right), vec![1, 2, 30]);
        assert_eq!(left.len(), 3);
        assert_eq!(right.last().map(|r| r.boss_turn), Some(30));
    }

    #[test]
    fn long_trail_drops_without_recursion() {
        let mut trail = ResultTrail::new();
        for turn in 0..200_000 {
            trail.push(result(turn, vec![]));
        }
        drop(trail);
    }

    #[test]
    fn last_killable_turn_ignores_protected_hits_and_other_targets() {
        let log = vec![
            result(3, vec![hit("Slow", false), hit("Fast", false)]),
            result(8, vec![hit("Slow", true), hit("Fast", false)]),
            result(12, vec![hit("Fast", false)]),
        ];
        assert_eq!(last_killable_turn(&log, "Slow"), Some(3));
        assert_eq!(last_killable_turn(&log, "Fast"), Some(12));
        assert_eq!(last_killable_turn(&log, "Nobody"), None);
    }
}
