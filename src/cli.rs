use serde::Serialize;
use serde_json::json;

use crate::combat::{BattleEngine, BattleLog};
use crate::data::boss::BossLevel;
use crate::data::catalog::{builtin_champions, resolve_champion_spec};
use crate::data::champion::Champion;
use crate::data::config::{load_config_from_env, SimulatorConfig};
use crate::data::roster::{load_roster, merge_into_catalog};
use crate::optimizer::TuningSearch;
use crate::parallel::WorkerPool;

const USAGE: &str = "usage: unkillable <simulate|explore|search|catalog|validate> [--roster <file>]";
const DEFAULT_EXPLORE_LIMIT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Explore,
    Search,
    Catalog,
    Validate,
}

impl Command {
    fn usage(self) -> &'static str {
        match self {
            Self::Simulate => "usage: unkillable simulate <level> <champion[:speed]>...",
            Self::Explore => {
                "usage: unkillable explore <level> <champion[:speed]>... [--limit N]"
            }
            Self::Search => "usage: unkillable search <level> <champion[:speed]>... [--workers N]",
            Self::Catalog => "usage: unkillable catalog",
            Self::Validate => "usage: unkillable validate <roster-file>",
        }
    }
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("explore") => Some(Command::Explore),
        Some("search") => Some(Command::Search),
        Some("catalog") => Some(Command::Catalog),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

/// Arguments after the command name, with flags pulled out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Invocation {
    positionals: Vec<String>,
    roster: Option<String>,
    limit: Option<usize>,
    workers: Option<usize>,
}

fn parse_invocation(args: &[String]) -> Result<Invocation, String> {
    let mut invocation = Invocation::default();
    let mut rest = args.iter().skip(2);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--roster" => {
                let path = rest.next().ok_or("--roster needs a file path")?;
                invocation.roster = Some(path.clone());
            }
            "--limit" => invocation.limit = Some(parse_count(rest.next(), "--limit")?),
            "--workers" => invocation.workers = Some(parse_count(rest.next(), "--workers")?),
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            _ => invocation.positionals.push(arg.clone()),
        }
    }
    Ok(invocation)
}

fn parse_count(raw: Option<&String>, name: &str) -> Result<usize, String> {
    let raw = raw.ok_or_else(|| format!("{name} needs a number"))?;
    raw.parse::<usize>()
        .map_err(|_| format!("invalid {name} '{raw}'"))
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let invocation = match parse_invocation(args) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{}", command.usage());
            return 2;
        }
    };

    match command {
        Command::Simulate => handle_simulate(&invocation),
        Command::Explore => handle_explore(&invocation),
        Command::Search => handle_search(&invocation),
        Command::Catalog => handle_catalog(&invocation),
        Command::Validate => handle_validate(&invocation),
    }
}

fn print_json<T: Serialize>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

fn catalog(invocation: &Invocation) -> Result<Vec<Champion>, String> {
    let builtin = builtin_champions();
    match &invocation.roster {
        Some(path) => load_roster(path)
            .map(|roster| merge_into_catalog(builtin, roster))
            .map_err(|err| format!("roster load failed: {err}")),
        None => Ok(builtin),
    }
}

/// A boss level and team from `<level> <champion[:speed]>...`.
struct Battle {
    level: BossLevel,
    champions: Vec<Champion>,
    config: SimulatorConfig,
}

enum SetupError {
    Usage,
    Invalid(String),
}

fn battle_setup(invocation: &Invocation) -> Result<Battle, SetupError> {
    let Some((level, specs)) = invocation.positionals.split_first() else {
        return Err(SetupError::Usage);
    };
    if specs.is_empty() {
        return Err(SetupError::Usage);
    }
    let level = level
        .parse::<BossLevel>()
        .map_err(|err| SetupError::Invalid(err.to_string()))?;
    let catalog = catalog(invocation).map_err(SetupError::Invalid)?;
    let champions = specs
        .iter()
        .map(|spec| resolve_champion_spec(&catalog, spec))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| SetupError::Invalid(err.to_string()))?;
    Ok(Battle {
        level,
        champions,
        config: load_config_from_env(),
    })
}

/// Run `body` with a resolved battle, mapping setup failures to exit codes.
fn with_battle(command: Command, invocation: &Invocation, body: impl FnOnce(Battle) -> i32) -> i32 {
    match battle_setup(invocation) {
        Ok(battle) => body(battle),
        Err(SetupError::Usage) => {
            eprintln!("{}", command.usage());
            2
        }
        Err(SetupError::Invalid(message)) => {
            eprintln!("{message}");
            1
        }
    }
}

fn handle_simulate(invocation: &Invocation) -> i32 {
    with_battle(Command::Simulate, invocation, |battle| {
        let engine = match BattleEngine::new(battle.level, &battle.champions, battle.config.battle) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("simulate failed: {err}");
                return 1;
            }
        };
        match engine.run() {
            Some(log) => print_json(&log, "battle log"),
            None => {
                eprintln!("simulate failed: battle produced no log");
                1
            }
        }
    })
}

/// Number of surviving sequences plus the first few of them.
#[derive(Debug, Serialize)]
struct Exploration {
    count: usize,
    logs: Vec<BattleLog>,
}

fn handle_explore(invocation: &Invocation) -> i32 {
    let limit = invocation.limit.unwrap_or(DEFAULT_EXPLORE_LIMIT);
    with_battle(Command::Explore, invocation, |battle| {
        let engine = match BattleEngine::new(battle.level, &battle.champions, battle.config.battle) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("explore failed: {err}");
                return 1;
            }
        };
        let mut count = 0usize;
        let mut logs = Vec::new();
        for log in engine.find_unkillable_sequences() {
            count += 1;
            if logs.len() < limit {
                logs.push(log);
            }
        }
        print_json(&Exploration { count, logs }, "exploration")
    })
}

fn handle_search(invocation: &Invocation) -> i32 {
    with_battle(Command::Search, invocation, |battle| {
        let mut search_config = battle.config.search;
        if let Some(workers) = invocation.workers {
            search_config.workers = workers;
        }
        let pool = WorkerPool::with_workers(search_config.workers);
        let search = TuningSearch::new(battle.champions, battle.config.battle, search_config);
        match search.search_parallel(battle.level, &pool) {
            Ok(accepted) => print_json(&accepted, "search result"),
            Err(err) => {
                eprintln!("search failed: {err}");
                1
            }
        }
    })
}

fn handle_catalog(invocation: &Invocation) -> i32 {
    let champions = match catalog(invocation) {
        Ok(champions) => champions,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };
    let entries: Vec<_> = champions
        .iter()
        .map(|champion| {
            json!({
                "name": champion.name,
                "base_speed": champion.base_speed,
                "effective_speed": champion.effective_speed(),
            })
        })
        .collect();
    print_json(&entries, "catalog")
}

fn handle_validate(invocation: &Invocation) -> i32 {
    let Some(path) = invocation.positionals.first() else {
        eprintln!("{}", Command::Validate.usage());
        return 2;
    };

    match load_roster(path) {
        Ok(champions) => {
            println!("validation passed: {path} ({} champion(s))", champions.len());
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(&args(&["unkillable", "explore"])), Some(Command::Explore));
        assert_eq!(parse_command(&args(&["unkillable", "serve"])), None);
        assert_eq!(parse_command(&args(&["unkillable"])), None);
    }

    #[test]
    fn flags_are_separated_from_positionals() {
        let invocation = parse_invocation(&args(&[
            "unkillable",
            "search",
            "brutal",
            "--workers",
            "3",
            "Maneater:240",
            "--roster",
            "team.yaml",
        ]))
        .expect("valid flags");
        assert_eq!(invocation.positionals, vec!["brutal", "Maneater:240"]);
        assert_eq!(invocation.workers, Some(3));
        assert_eq!(invocation.roster.as_deref(), Some("team.yaml"));
        assert_eq!(invocation.limit, None);
    }

    #[test]
    fn bad_flags_are_usage_errors() {
        assert!(parse_invocation(&args(&["unkillable", "explore", "--limit"])).is_err());
        assert!(parse_invocation(&args(&["unkillable", "explore", "--limit", "x"])).is_err());
        assert!(parse_invocation(&args(&["unkillable", "explore", "--fast"])).is_err());
    }

    #[test]
    fn unknown_command_exits_with_usage_code() {
        assert_eq!(run_with_args(&args(&["unkillable", "serve"])), 2);
        assert_eq!(run_with_args(&args(&["unkillable", "simulate", "brutal"])), 2);
    }
}
