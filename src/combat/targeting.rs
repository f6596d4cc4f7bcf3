//! Who the boss's single-target skill lands on.
//!
//! The selector is handed every participant in roster order and returns the
//! index of its pick. Picks naming the boss (or nobody) are ignored by the
//! engine, so a selector never has to filter the boss out itself.

use crate::combat::participant::Participant;

pub trait StunTargetSelector: Send + Sync {
    fn select(&self, participants: &[Participant]) -> Option<usize>;
}

impl<F> StunTargetSelector for F
where
    F: Fn(&[Participant]) -> Option<usize> + Send + Sync,
{
    fn select(&self, participants: &[Participant]) -> Option<usize> {
        self(participants)
    }
}

/// Default: the champion with the lowest turn meter gain per tick, first one
/// in roster order on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlowestChampion;

impl StunTargetSelector for SlowestChampion {
    fn select(&self, participants: &[Participant]) -> Option<usize> {
        let mut slowest: Option<(usize, f64)> = None;
        for (index, participant) in participants.iter().enumerate() {
            if participant.is_boss() {
                continue;
            }
            let rate = participant.turn_meter_per_tick();
            match slowest {
                Some((_, best)) if rate >= best => {}
                _ => slowest = Some((index, rate)),
            }
        }
        slowest.map(|(index, _)| index)
    }
}

/// Always targets the participant with this name.
#[derive(Debug, Clone)]
pub struct NamedTarget(pub String);

impl StunTargetSelector for NamedTarget {
    fn select(&self, participants: &[Participant]) -> Option<usize> {
        participants
            .iter()
            .position(|participant| participant.name() == self.0)
    }
}
