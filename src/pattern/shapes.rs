use super::{Pattern, PATTERN_WEEKS};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Heart,
    Star,
    Diamond,
    Arrow,
    Smile,
    Cross,
}

const HEART: [&str; 7] = [
    ".##.##.",
    "#######",
    "#######",
    ".#####.",
    "..###..",
    "...#...",
    ".......",
];

const STAR: [&str; 7] = [
    "...#...",
    "...#...",
    "#######",
    ".#####.",
    "..###..",
    ".##.##.",
    "##...##",
];

const DIAMOND: [&str; 7] = [
    "...#...",
    "..###..",
    ".#####.",
    "#######",
    ".#####.",
    "..###..",
    "...#...",
];

const ARROW: [&str; 7] = [
    "....#...",
    "....##..",
    "#######.",
    "########",
    "#######.",
    "....##..",
    "....#...",
];

const SMILE: [&str; 7] = [
    ".#####.",
    "#.....#",
    "#.#.#.#",
    "#.....#",
    "#.###.#",
    "#.....#",
    ".#####.",
];

const CROSS: [&str; 7] = [
    "..#..",
    "..#..",
    "#####",
    "..#..",
    "..#..",
    ".....",
    ".....",
];

impl Shape {
    fn bitmap(self) -> &'static [&'static str; 7] {
        match self {
            Shape::Heart => &HEART,
            Shape::Star => &STAR,
            Shape::Diamond => &DIAMOND,
            Shape::Arrow => &ARROW,
            Shape::Smile => &SMILE,
            Shape::Cross => &CROSS,
        }
    }

    /// The shape as a 0/1 pattern of its own width.
    pub fn pattern(self) -> Pattern {
        let rows = self
            .bitmap()
            .iter()
            .map(|line| line.chars().map(|c| u32::from(c == '#')).collect())
            .collect();
        Pattern { rows }
    }

    /// Repeat the shape across the whole window with one empty column between copies.
    pub fn tiled(self) -> Result<Pattern> {
        let unit = self.pattern();
        let stride = unit.width() + 1;
        let copies = (PATTERN_WEEKS + 1) / stride;
        let mut tiled = Pattern::blank(copies * stride - 1);
        for copy in 0..copies {
            let start = copy * stride;
            for (day, row) in unit.rows().iter().enumerate() {
                tiled.rows[day][start..start + row.len()].copy_from_slice(row);
            }
        }
        Pattern::new(tiled.rows)
    }
}
