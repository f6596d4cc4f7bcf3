pub mod boss;
pub mod catalog;
pub mod champion;
pub mod config;
pub mod constants;
pub mod roster;
pub mod skill;

pub use boss::{BossLevel, ClanBoss};
pub use catalog::{builtin_champions, find_champion, resolve_champion_spec};
pub use champion::{slowest_champion, Champion, SkillPolicy};
pub use config::{load_config, load_config_from_env, SimulatorConfig, DEFAULT_CONFIG_PATH};
pub use roster::{load_roster, merge_into_catalog, RosterFile};
pub use skill::{
    AttackTarget, Buff, BuffToApply, Debuff, DebuffToApply, Effect, EffectToApply, Skill, SkillId,
    Target, TimeInTurn, TurnAction,
};
