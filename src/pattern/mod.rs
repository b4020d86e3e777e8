pub mod font;
pub mod random;
pub mod shapes;

pub use font::{render_text, TextRender};
pub use random::{random_fill, random_scatter, FillSettings};
pub use shapes::Shape;

use crate::error::{ArtError, Result};
use crate::grid::{CoordinateMapper, GridCoordinate, DAYS_PER_WEEK};
use crate::model::CommitSpec;
use serde::Serialize;

/// Widest pattern that fits the completed weeks of the graph.
pub const PATTERN_WEEKS: usize = 52;
pub const PATTERN_DAYS: usize = DAYS_PER_WEEK as usize;
pub const MAX_CELL_COMMITS: u32 = 100;

/// Desired commit counts, indexed `[day][week]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Pattern {
    rows: Vec<Vec<u32>>,
}

impl Pattern {
    pub fn new(rows: Vec<Vec<u32>>) -> Result<Self> {
        if rows.len() != PATTERN_DAYS {
            return Err(ArtError::Validation(format!(
                "pattern needs exactly {PATTERN_DAYS} rows, got {}",
                rows.len()
            )));
        }
        let width = rows[0].len();
        if width > PATTERN_WEEKS {
            return Err(ArtError::Validation(format!(
                "pattern is {width} columns wide, at most {PATTERN_WEEKS} fit"
            )));
        }
        for (day, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ArtError::Validation(format!(
                    "row {day} has {} columns, expected {width}",
                    row.len()
                )));
            }
            if let Some((week, value)) = row.iter().enumerate().find(|(_, v)| **v > MAX_CELL_COMMITS) {
                return Err(ArtError::Validation(format!(
                    "cell [{day}][{week}] asks for {value} commits, at most {MAX_CELL_COMMITS} allowed"
                )));
            }
        }
        Ok(Self { rows })
    }

    pub fn blank(width: usize) -> Self {
        let width = width.min(PATTERN_WEEKS);
        Self {
            rows: vec![vec![0; width]; PATTERN_DAYS],
        }
    }

    /// Parse an uploaded `[day][week]` array of non-negative integers.
    pub fn from_json(input: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| ArtError::Validation(format!("pattern is not valid JSON: {e}")))?;
        let rows = raw
            .as_array()
            .ok_or_else(|| ArtError::Validation("pattern must be an array of rows".to_string()))?;

        let mut parsed = Vec::with_capacity(rows.len());
        for (day, row) in rows.iter().enumerate() {
            let cells = row
                .as_array()
                .ok_or_else(|| ArtError::Validation(format!("row {day} is not an array")))?;
            let mut parsed_row = Vec::with_capacity(cells.len());
            for (week, cell) in cells.iter().enumerate() {
                let value = cell
                    .as_u64()
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| {
                        ArtError::Validation(format!(
                            "cell [{day}][{week}] must be a non-negative integer, got {cell}"
                        ))
                    })?;
                parsed_row.push(value);
            }
            parsed.push(parsed_row);
        }
        Self::new(parsed)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a hand-drawn grid: one line per day, one character per week.
    ///
    /// `0`-`9` are counts, `#` is one commit, `.` and space are empty. Lines
    /// starting with `;` are skipped, short lines and missing rows are empty.
    pub fn from_grid_text(input: &str) -> Result<Self> {
        let lines: Vec<&str> = input
            .lines()
            .filter(|line| !line.trim_start().starts_with(';'))
            .collect();
        let lines = trim_trailing_blank(&lines);
        if lines.len() > PATTERN_DAYS {
            return Err(ArtError::Validation(format!(
                "grid has {} rows, at most {PATTERN_DAYS} allowed",
                lines.len()
            )));
        }

        let mut rows = Vec::with_capacity(PATTERN_DAYS);
        for (day, line) in lines.iter().enumerate() {
            let mut row = Vec::new();
            for (week, ch) in line.trim_end().chars().enumerate() {
                let value = match ch {
                    '.' | ' ' => 0,
                    '#' => 1,
                    c => c.to_digit(10).ok_or_else(|| {
                        ArtError::Validation(format!("unexpected '{c}' at row {day}, column {week}"))
                    })?,
                };
                row.push(value);
            }
            rows.push(row);
        }
        rows.resize(PATTERN_DAYS, Vec::new());

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width > PATTERN_WEEKS {
            return Err(ArtError::Validation(format!(
                "grid is {width} columns wide, at most {PATTERN_WEEKS} fit"
            )));
        }
        for row in &mut rows {
            row.resize(width, 0);
        }
        Self::new(rows)
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    pub fn get(&self, day: usize, week: usize) -> Option<u32> {
        self.rows.get(day).and_then(|row| row.get(week)).copied()
    }

    pub fn total_commits(&self) -> u64 {
        self.rows.iter().flatten().map(|&v| v as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|&v| v == 0)
    }

    /// Multiply every cell by `intensity`.
    pub fn scaled(self, intensity: u32) -> Result<Self> {
        if intensity == 0 {
            return Err(ArtError::Validation("intensity must be at least 1".to_string()));
        }
        let rows = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(|v| v.saturating_mul(intensity)).collect())
            .collect();
        Self::new(rows)
    }

    /// Copy this pattern into an empty window starting at column `offset`.
    pub fn placed_at(&self, offset: usize) -> Result<Self> {
        let width = self.width();
        let end = offset
            .checked_add(width)
            .filter(|end| *end <= PATTERN_WEEKS)
            .ok_or_else(|| {
                ArtError::Validation(format!(
                    "a {width} column pattern at offset {offset} overflows the {PATTERN_WEEKS} week window"
                ))
            })?;
        let mut placed = Self::blank(end);
        for (day, row) in self.rows.iter().enumerate() {
            placed.rows[day][offset..].copy_from_slice(row);
        }
        Ok(placed)
    }

    pub fn centered(&self) -> Self {
        let offset = (PATTERN_WEEKS - self.width()) / 2;
        let mut placed = Self::blank(PATTERN_WEEKS);
        for (day, row) in self.rows.iter().enumerate() {
            placed.rows[day][offset..offset + row.len()].copy_from_slice(row);
        }
        placed
    }

    pub fn place(&self, placement: Placement) -> Result<Self> {
        match placement {
            Placement::Center => Ok(self.centered()),
            Placement::Column(offset) => self.placed_at(offset),
        }
    }

    /// Commit specs for every non-empty cell, oldest date first.
    ///
    /// Column `c` maps to graph week `c`, which is always a completed week.
    pub fn plan(&self, mapper: &CoordinateMapper) -> Result<Vec<CommitSpec>> {
        let mut specs = Vec::new();
        for week in 0..self.width() {
            for day in 0..PATTERN_DAYS {
                let count = self.rows[day][week];
                if count == 0 {
                    continue;
                }
                let coord = GridCoordinate::new(week as u32, day as u32)?;
                specs.push(CommitSpec::new(mapper.target_date(coord)?, count));
            }
        }
        specs.sort();
        Ok(specs)
    }
}

/// Where a pattern comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternSource {
    Shape { shape: Shape, tile: bool },
    Text(String),
    /// Hand-drawn grid text, see [`Pattern::from_grid_text`].
    Grid(String),
    /// Uploaded JSON array, see [`Pattern::from_json`].
    Json(String),
    Scatter { count: u32, seed: Option<u64> },
    Fill { settings: FillSettings, seed: Option<u64> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPattern {
    pub pattern: Pattern,
    /// Text characters that did not fit.
    pub truncated: usize,
}

/// Build, place and scale a pattern.
///
/// Text and single shapes are centered unless `offset` is given; everything
/// else starts at column `offset` or 0.
pub fn build(source: &PatternSource, intensity: u32, offset: Option<usize>) -> Result<BuiltPattern> {
    let mut truncated = 0;
    let (raw, placement) = match source {
        PatternSource::Shape { shape, tile: false } => (shape.pattern(), Placement::from(offset)),
        PatternSource::Shape { shape, tile: true } => {
            (shape.tiled()?, Placement::Column(offset.unwrap_or(0)))
        }
        PatternSource::Text(text) => {
            let render = render_text(text)?;
            truncated = render.truncated;
            (render.pattern, Placement::from(offset))
        }
        PatternSource::Grid(input) => {
            (Pattern::from_grid_text(input)?, Placement::Column(offset.unwrap_or(0)))
        }
        PatternSource::Json(input) => {
            (Pattern::from_json(input)?, Placement::Column(offset.unwrap_or(0)))
        }
        PatternSource::Scatter { count, seed } => {
            (random_scatter(*count, *seed)?, Placement::Column(offset.unwrap_or(0)))
        }
        PatternSource::Fill { settings, seed } => {
            (random_fill(*settings, *seed)?, Placement::Column(offset.unwrap_or(0)))
        }
    };

    let pattern = raw.place(placement)?.scaled(intensity)?;
    Ok(BuiltPattern { pattern, truncated })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Center,
    Column(usize),
}

impl From<Option<usize>> for Placement {
    fn from(offset: Option<usize>) -> Self {
        offset.map(Placement::Column).unwrap_or(Placement::Center)
    }
}

fn trim_trailing_blank<'a>(lines: &'a [&'a str]) -> &'a [&'a str] {
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);
    &lines[..end]
}
