// Property-based tests for participant turn meters, boss rotation and clone independence
use proptest::prelude::*;
use unkillable::combat::{BossInBattle, ChampionInBattle, Participant};
use unkillable::data::{
    BossLevel, Buff, BuffToApply, ClanBoss, Champion, Skill, SkillId, Target, TurnAction,
};

fn champion(speed: f64) -> Participant {
    let definition = Champion::new(
        "Prop",
        90.0,
        speed,
        vec![
            Skill::new("Strike", SkillId::A1, 0, TurnAction::attack_one_enemy(1)),
            Skill::new("Charge", SkillId::A2, 3, TurnAction::attack_one_enemy(2)),
        ],
    );
    ChampionInBattle::new(&definition)
        .expect("generated champion is valid")
        .into()
}

fn boss(level: BossLevel) -> Participant {
    BossInBattle::new(&ClanBoss::get(level))
        .expect("builtin boss is valid")
        .into()
}

proptest! {
    #[test]
    fn proptest_ticks_accumulate_linearly(speed in 50.0f64..400.0, ticks in 0usize..60) {
        let mut participant = champion(speed);
        for _ in 0..ticks {
            participant.clock_tick();
        }
        let expected = speed * 0.07 * ticks as f64;
        prop_assert!((participant.turn_meter() - expected).abs() < 1e-6);
    }

    #[test]
    fn proptest_take_turn_resets_meter(speed in 50.0f64..400.0, ticks in 1usize..40) {
        let mut participant = champion(speed);
        for _ in 0..ticks {
            participant.clock_tick();
        }
        let skill = participant.next_ai_skill().clone();
        participant.take_turn(&skill);
        prop_assert_eq!(participant.turn_meter(), 0.0);
        prop_assert_eq!(participant.turn_count(), 1);
    }

    #[test]
    fn proptest_boss_rotation_is_periodic(
        level in prop::sample::select(BossLevel::ALL.to_vec()),
        turns in 0usize..30
    ) {
        let mut participant = boss(level);
        for _ in 0..turns {
            let skill = participant.next_ai_skill().clone();
            participant.take_turn(&skill);
        }
        let expected = [SkillId::A1, SkillId::A2, SkillId::A3][turns % 3];
        prop_assert_eq!(participant.next_ai_skill().id, expected);
        prop_assert_eq!(participant.available_skills().count(), 1);
    }

    #[test]
    fn proptest_clone_is_independent(speed in 50.0f64..400.0, ticks in 1usize..20) {
        let original = champion(speed);
        let mut copy = original.clone();
        for _ in 0..ticks {
            copy.clock_tick();
        }
        copy.apply_buff(&BuffToApply { buff: Buff::Unkillable, duration: 2, target: Target::Caster });
        let skill = copy.next_ai_skill().clone();
        copy.take_turn(&skill);

        prop_assert_eq!(original.turn_meter(), 0.0);
        prop_assert_eq!(original.turn_count(), 0);
        prop_assert!(!original.has_buff(Buff::Unkillable));
        prop_assert!(original.cooldowns().values().all(|remaining| *remaining == 0));
    }
}
