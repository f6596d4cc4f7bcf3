pub mod boss;
pub mod champion;
pub mod engine;
pub mod participant;
pub mod result;
pub mod targeting;

pub use boss::BossInBattle;
pub use champion::ChampionInBattle;
pub use engine::{BattleConfig, BattleEngine, Branches, RunMode};
pub use participant::Participant;
pub use result::{
    last_killable_turn, Attack, BattleLog, BattleResult, Hit, ParticipantStats, ResultTrail,
};
pub use targeting::{NamedTarget, SlowestChampion, StunTargetSelector};
