use super::{Pattern, MAX_CELL_COMMITS, PATTERN_DAYS, PATTERN_WEEKS};
use crate::error::{ArtError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSettings {
    pub min_commits: u32,
    pub max_commits: u32,
    /// Chance that a given day receives commits at all.
    pub frequency: f64,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            min_commits: 0,
            max_commits: 3,
            frequency: 0.7,
        }
    }
}

impl FillSettings {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.frequency) {
            return Err(ArtError::Validation(format!(
                "frequency must be between 0 and 1, got {}",
                self.frequency
            )));
        }
        if self.min_commits > self.max_commits {
            return Err(ArtError::Validation(format!(
                "min commits ({}) is larger than max commits ({})",
                self.min_commits, self.max_commits
            )));
        }
        if self.max_commits > MAX_CELL_COMMITS {
            return Err(ArtError::Validation(format!(
                "max commits is {}, at most {MAX_CELL_COMMITS} allowed",
                self.max_commits
            )));
        }
        Ok(())
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Drop `count` single commits on random cells of the window.
pub fn random_scatter(count: u32, seed: Option<u64>) -> Result<Pattern> {
    let max = MAX_CELL_COMMITS as u64 * (PATTERN_DAYS * PATTERN_WEEKS) as u64;
    if count as u64 > max {
        return Err(ArtError::Validation(format!(
            "{count} commits do not fit, at most {max} allowed"
        )));
    }

    let mut rng = rng_for(seed);
    let mut pattern = Pattern::blank(PATTERN_WEEKS);
    let mut placed = 0;
    while placed < count {
        let day = rng.gen_range(0..PATTERN_DAYS);
        let week = rng.gen_range(0..PATTERN_WEEKS);
        let cell = &mut pattern.rows[day][week];
        if *cell < MAX_CELL_COMMITS {
            *cell += 1;
            placed += 1;
        }
    }
    Ok(pattern)
}

/// Give every day of the window a random commit count.
pub fn random_fill(settings: FillSettings, seed: Option<u64>) -> Result<Pattern> {
    settings.validate()?;
    let mut rng = rng_for(seed);
    let mut pattern = Pattern::blank(PATTERN_WEEKS);
    for week in 0..PATTERN_WEEKS {
        for day in 0..PATTERN_DAYS {
            if rng.gen_bool(settings.frequency) {
                pattern.rows[day][week] = rng.gen_range(settings.min_commits..=settings.max_commits);
            }
        }
    }
    Ok(pattern)
}
