//! Lazy cross product of per-champion speed variants.

use serde::Serialize;

use crate::data::champion::Champion;
use crate::optimizer::speed_variants::SpeedVariant;

/// One champion re-tuned by one [SpeedVariant].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TunedChampion {
    pub name: String,
    pub speed_delta: i32,
    pub speed_sets: u32,
    pub effective_speed: f64,
    #[serde(skip)]
    pub champion: Champion,
}

impl TunedChampion {
    pub fn new(base: &Champion, variant: SpeedVariant) -> Self {
        let champion = base.with_speed_tuning(variant.speed_delta, variant.speed_sets);
        Self {
            name: champion.name.clone(),
            speed_delta: variant.speed_delta,
            speed_sets: variant.speed_sets,
            effective_speed: champion.effective_speed(),
            champion,
        }
    }

    /// Tunings that drop effective speed below base speed are not buildable.
    pub fn is_legal(&self) -> bool {
        self.champion.effective_speed() >= self.champion.base_speed
    }
}

/// Every team obtained by picking one legal variant per champion.
///
/// Teams keep roster order and the first champion varies slowest. An empty
/// roster yields exactly one empty team; a champion with no legal variant
/// yields none.
#[derive(Debug, Clone)]
pub struct CandidateLists {
    options: Vec<Vec<TunedChampion>>,
    cursor: Option<Vec<usize>>,
}

impl CandidateLists {
    pub fn new(champions: &[Champion], variants: &[SpeedVariant]) -> Self {
        let options: Vec<Vec<TunedChampion>> = champions
            .iter()
            .map(|champion| {
                variants
                    .iter()
                    .map(|variant| TunedChampion::new(champion, *variant))
                    .filter(TunedChampion::is_legal)
                    .collect()
            })
            .collect();
        let cursor = if options.iter().any(Vec::is_empty) {
            None
        } else {
            Some(vec![0; options.len()])
        };
        Self { options, cursor }
    }

    /// Number of teams the iterator yields in total.
    pub fn total(&self) -> usize {
        self.options.iter().map(Vec::len).product()
    }

    fn advance(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        for position in (0..cursor.len()).rev() {
            cursor[position] += 1;
            if cursor[position] < self.options[position].len() {
                return;
            }
            cursor[position] = 0;
        }
        self.cursor = None;
    }
}

impl Iterator for CandidateLists {
    type Item = Vec<TunedChampion>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_ref()?;
        let team = cursor
            .iter()
            .zip(&self.options)
            .map(|(&index, options)| options[index].clone())
            .collect();
        self.advance();
        Some(team)
    }
}
