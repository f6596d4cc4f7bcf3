//! Speed-tuning search: which re-tunings of a team keep its slowest champion
//! safe through the early boss turns when every champion plays its policy.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::{last_killable_turn, BattleConfig, BattleEngine};
use crate::data::boss::BossLevel;
use crate::data::champion::{slowest_champion, Champion};
use crate::error::SearchError;
use crate::optimizer::candidates::{CandidateLists, TunedChampion};
use crate::optimizer::speed_variants::speed_variants;
use crate::parallel::{batches, WorkerPool};

const fn default_max_delta_step() -> u32 {
    20
}

const fn default_max_speed_sets() -> u32 {
    3
}

const fn default_safety_turn() -> u32 {
    10
}

const fn default_batch_size() -> usize {
    256
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_delta_step")]
    pub max_delta_step: u32,
    #[serde(default = "default_max_speed_sets")]
    pub max_speed_sets: u32,
    /// Accept a tuning when the designated champion is last hit unprotected
    /// strictly before this boss turn.
    #[serde(default = "default_safety_turn")]
    pub safety_turn: u32,
    /// Candidates evaluated per parallel batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Worker threads for the parallel search; 0 = all cores.
    #[serde(default)]
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_delta_step: default_max_delta_step(),
            max_speed_sets: default_max_speed_sets(),
            safety_turn: default_safety_turn(),
            batch_size: default_batch_size(),
            workers: 0,
        }
    }
}

/// An accepted team tuning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuningCandidate {
    pub champions: Vec<TunedChampion>,
    /// The slowest champion of the tuned team, whose safety decides acceptance.
    pub designated: Option<String>,
    pub last_killable_turn: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct TuningSearch {
    champions: Vec<Champion>,
    battle: BattleConfig,
    config: SearchConfig,
}

impl TuningSearch {
    pub fn new(champions: Vec<Champion>, battle: BattleConfig, config: SearchConfig) -> Self {
        Self {
            champions,
            battle,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn candidates(&self) -> CandidateLists {
        let variants = speed_variants(self.config.max_delta_step, self.config.max_speed_sets);
        CandidateLists::new(&self.champions, &variants)
    }

    /// Run one tuned team through a single-path battle. `Ok(None)` means the
    /// team was evaluated and rejected.
    pub fn evaluate(
        &self,
        level: BossLevel,
        team: Vec<TunedChampion>,
    ) -> Result<Option<TuningCandidate>, SearchError> {
        let champions: Vec<Champion> = team.iter().map(|tuned| tuned.champion.clone()).collect();
        let engine = BattleEngine::new(level, &champions, self.battle)?;
        let Some(log) = engine.run() else {
            return Ok(None);
        };

        let designated = slowest_champion(&champions).map(|index| champions[index].name.clone());
        let last_killable = designated
            .as_deref()
            .and_then(|name| last_killable_turn(&log, name));
        let accepted = last_killable.map_or(true, |turn| turn < self.config.safety_turn);
        debug!(
            designated = designated.as_deref().unwrap_or("-"),
            last_killable = ?last_killable,
            accepted,
            "tuning evaluated"
        );

        Ok(accepted.then(|| TuningCandidate {
            champions: team,
            designated,
            last_killable_turn: last_killable,
        }))
    }

    /// Accepted tunings in candidate order, evaluated one at a time on demand.
    pub fn search(&self, level: BossLevel) -> Search<'_> {
        info!(
            level = %level,
            champions = self.champions.len(),
            "starting tuning search"
        );
        Search {
            search: self,
            level,
            candidates: self.candidates(),
            failed: false,
        }
    }

    /// Same results as [TuningSearch::search], evaluated batch by batch on `pool`.
    pub fn search_parallel(
        &self,
        level: BossLevel,
        pool: &WorkerPool,
    ) -> Result<Vec<TuningCandidate>, SearchError> {
        info!(
            level = %level,
            champions = self.champions.len(),
            workers = pool.workers,
            batch_size = self.config.batch_size,
            "starting parallel tuning search"
        );
        let accepted = pool.install(|| -> Result<Vec<TuningCandidate>, SearchError> {
            let mut accepted = Vec::new();
            let mut evaluated = 0usize;
            for batch in batches(self.candidates(), self.config.batch_size) {
                evaluated += batch.len();
                let outcomes: Vec<Result<Option<TuningCandidate>, SearchError>> = batch
                    .into_par_iter()
                    .map(|team| self.evaluate(level, team))
                    .collect();
                for outcome in outcomes {
                    if let Some(candidate) = outcome? {
                        accepted.push(candidate);
                    }
                }
            }
            info!(evaluated, accepted = accepted.len(), "tuning search finished");
            Ok(accepted)
        })??;
        Ok(accepted)
    }
}

/// Lazy sequential search. Stops for good after yielding an error.
#[derive(Debug)]
pub struct Search<'a> {
    search: &'a TuningSearch,
    level: BossLevel,
    candidates: CandidateLists,
    failed: bool,
}

impl Iterator for Search<'_> {
    type Item = Result<TuningCandidate, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for team in self.candidates.by_ref() {
            match self.search.evaluate(self.level, team) {
                Ok(Some(candidate)) => {
                    info!(
                        designated = candidate.designated.as_deref().unwrap_or("-"),
                        "tuning accepted"
                    );
                    return Some(Ok(candidate));
                }
                Ok(None) => {}
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}
