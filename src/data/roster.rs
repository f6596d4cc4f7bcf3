//! Roster files: user-supplied champion definitions in JSON or YAML.
//! `{ "champions": [ { "name": ..., "base_speed": ..., "skills": [...] } ] }`

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::champion::Champion;
use crate::error::LoadError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub champions: Vec<Champion>,
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

pub(crate) fn read_document<T>(path: &Path) -> Result<T, LoadError>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    if is_yaml(path) {
        Ok(serde_yaml::from_str(&raw)?)
    } else {
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Load and validate every champion in a roster file.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Champion>, LoadError> {
    let roster: RosterFile = read_document(path.as_ref())?;
    for champion in &roster.champions {
        champion.validate()?;
    }
    Ok(roster.champions)
}

/// Roster entries replace catalog entries with the same name; new names are appended.
pub fn merge_into_catalog(mut catalog: Vec<Champion>, roster: Vec<Champion>) -> Vec<Champion> {
    for champion in roster {
        match catalog.iter_mut().find(|known| known.name == champion.name) {
            Some(slot) => *slot = champion,
            None => catalog.push(champion),
        }
    }
    catalog
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::data::catalog::builtin_champions;
    use crate::error::ConfigError;

    fn temp_path(name: &str, ext: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("unkillable-roster-{name}-{stamp}.{ext}"))
    }

    #[test]
    fn loads_yaml_roster() {
        let path = temp_path("yaml", "yaml");
        fs::write(
            &path,
            "champions:\n  - name: Tank\n    base_speed: 95\n    bonus_speed: 80\n    skills:\n      - id: A1\n        name: Bash\n        action:\n          attack_target: OneEnemy\n          attack_count: 1\n",
        )
        .expect("write roster");

        let champions = load_roster(&path).expect("roster loads");
        let _ = fs::remove_file(&path);

        assert_eq!(champions.len(), 1);
        assert_eq!(champions[0].name, "Tank");
        assert!((champions[0].effective_speed() - 175.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_champion_without_basic_attack() {
        let path = temp_path("no-a1", "json");
        fs::write(
            &path,
            r#"{ "champions": [ { "name": "Mute", "base_speed": 100, "skills": [
                 { "id": "A2", "name": "Whisper", "cooldown": 2 } ] } ] }"#,
        )
        .expect("write roster");

        let result = load_roster(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(
            result,
            Err(LoadError::Config(ConfigError::MissingSkill { .. }))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = load_roster(temp_path("missing", "json"));
        assert!(matches!(result, Err(LoadError::Read { .. })));
    }

    #[test]
    fn merge_replaces_same_name_and_appends_new() {
        let catalog = builtin_champions();
        let original_len = catalog.len();
        let mut faster = catalog[0].with_effective_speed(300.0);
        faster.name = catalog[0].name.clone();
        let mut extra = catalog[1].clone();
        extra.name = "Newcomer".to_string();

        let merged = merge_into_catalog(catalog, vec![faster, extra]);

        assert_eq!(merged.len(), original_len + 1);
        assert!((merged[0].effective_speed() - 300.0).abs() < 1e-9);
        assert_eq!(merged.last().map(|c| c.name.as_str()), Some("Newcomer"));
    }
}
