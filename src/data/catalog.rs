//! Built-in champion catalog and name lookup.
//! Roster files (see [crate::data::roster]) extend or override these entries.

use crate::data::champion::Champion;
use crate::data::skill::{Buff, Effect, Skill, SkillId, Target, TimeInTurn, TurnAction};
use crate::error::ConfigError;

fn aothar() -> Champion {
    Champion::new(
        "Aothar",
        92.0,
        175.0,
        vec![
            Skill::new("Rage", SkillId::A1, 0, TurnAction::attack_one_enemy(2)),
            Skill::new("Holy Flame", SkillId::A2, 3, TurnAction::attack_one_enemy(4)),
            Skill::new("Brand", SkillId::A3, 3, TurnAction::attack_one_enemy(1)),
        ],
    )
    .with_policy(vec![], vec![SkillId::A3, SkillId::A2, SkillId::A1])
}

fn maneater() -> Champion {
    Champion::new(
        "Maneater",
        100.0,
        230.0,
        vec![
            Skill::new("Savage Swing", SkillId::A1, 0, TurnAction::attack_one_enemy(1)),
            Skill::new(
                "Blood Rite",
                SkillId::A2,
                4,
                TurnAction::attack_one_enemy(1).with_effect(
                    Effect::IncreaseTurnMeter { percent: 15 },
                    Target::Caster,
                    TimeInTurn::Beginning,
                ),
            ),
            Skill::new(
                "Spirit Guard",
                SkillId::A3,
                4,
                TurnAction::default()
                    .with_buff(Buff::Unkillable, 2, Target::FullTeam)
                    .with_buff(Buff::BlockDamage, 1, Target::FullTeam),
            ),
        ],
    )
    .with_policy(vec![SkillId::A3], vec![SkillId::A3, SkillId::A1])
}

fn pain_keeper() -> Champion {
    Champion::new(
        "Pain Keeper",
        100.0,
        205.0,
        vec![
            Skill::new("Hook", SkillId::A1, 0, TurnAction::attack_one_enemy(1)),
            Skill::new(
                "Combat Tactics",
                SkillId::A2,
                3,
                TurnAction::default().with_effect(
                    Effect::ReduceCooldowns { turns: 1 },
                    Target::AllAllies,
                    TimeInTurn::Beginning,
                ),
            ),
            Skill::new("Bleed Out", SkillId::A3, 4, TurnAction::attack_all_enemies(1)),
        ],
    )
    .with_policy(vec![SkillId::A1], vec![SkillId::A2, SkillId::A1])
}

fn deacon_armstrong() -> Champion {
    Champion::new(
        "Deacon Armstrong",
        110.0,
        250.0,
        vec![
            Skill::new("Feral Kick", SkillId::A1, 0, TurnAction::attack_one_enemy(1)),
            Skill::new(
                "Gloom",
                SkillId::A2,
                3,
                TurnAction::default()
                    .with_buff(Buff::IncreaseSpeed, 2, Target::FullTeam)
                    .with_effect(
                        Effect::IncreaseTurnMeter { percent: 15 },
                        Target::AllAllies,
                        TimeInTurn::Beginning,
                    ),
            ),
            Skill::new("Incapacitate", SkillId::A3, 4, TurnAction::attack_one_enemy(1)),
        ],
    )
    .with_policy(vec![SkillId::A1], vec![SkillId::A2, SkillId::A1])
}

fn skullcrusher() -> Champion {
    Champion::new(
        "Skullcrusher",
        93.0,
        160.0,
        vec![
            Skill::new("Mace Blow", SkillId::A1, 0, TurnAction::attack_one_enemy(1)),
            Skill::new(
                "Shield Wall",
                SkillId::A2,
                4,
                TurnAction::default().with_buff(Buff::Counterattack, 2, Target::FullTeam),
            ),
            Skill::new("Crusade", SkillId::A3, 4, TurnAction::attack_all_enemies(2)),
        ],
    )
    .with_policy(vec![], vec![SkillId::A2, SkillId::A3, SkillId::A1])
}

fn seer() -> Champion {
    Champion::new(
        "Seer",
        104.0,
        220.0,
        vec![
            Skill::new("Gaze", SkillId::A1, 0, TurnAction::attack_one_enemy(1)),
            Skill::new(
                "Cleanse",
                SkillId::A2,
                3,
                TurnAction::default().with_effect(
                    Effect::RemoveDebuffs,
                    Target::FullTeam,
                    TimeInTurn::Beginning,
                ),
            ),
            Skill::passive(
                "Foresight",
                TurnAction::default().with_effect(
                    Effect::IncreaseTurnMeter { percent: 5 },
                    Target::AllAllies,
                    TimeInTurn::End,
                ),
            ),
        ],
    )
    .with_policy(vec![], vec![SkillId::A2, SkillId::A1])
}

pub fn builtin_champions() -> Vec<Champion> {
    vec![
        aothar(),
        maneater(),
        pain_keeper(),
        deacon_armstrong(),
        skullcrusher(),
        seer(),
    ]
}

fn normalize_lookup_key(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case- and punctuation-insensitive lookup ("pain_keeper" finds "Pain Keeper").
pub fn find_champion<'a>(catalog: &'a [Champion], name: &str) -> Option<&'a Champion> {
    let key = normalize_lookup_key(name);
    catalog
        .iter()
        .find(|champion| normalize_lookup_key(&champion.name) == key)
}

/// Resolve `Name` or `Name:speed`; the speed re-gears the champion to that
/// effective speed.
pub fn resolve_champion_spec(catalog: &[Champion], spec: &str) -> Result<Champion, ConfigError> {
    let (name, speed) = match spec.rsplit_once(':') {
        Some((name, raw_speed)) => match raw_speed.trim().parse::<f64>() {
            Ok(speed) => (name, Some(speed)),
            Err(_) => (spec, None),
        },
        None => (spec, None),
    };
    let champion = find_champion(catalog, name)
        .ok_or_else(|| ConfigError::UnknownChampion(name.trim().to_string()))?;
    let resolved = match speed {
        Some(speed) => champion.with_effective_speed(speed),
        None => champion.clone(),
    };
    resolved.validate()?;
    Ok(resolved)
}
