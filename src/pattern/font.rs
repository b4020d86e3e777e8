//! 5x7 bitmap font for writing text onto the graph.

use super::{Pattern, PATTERN_DAYS, PATTERN_WEEKS};
use crate::error::{ArtError, Result};
use tracing::warn;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_GAP: usize = 1;

type Glyph = [&'static str; 7];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRender {
    pub pattern: Pattern,
    /// Characters dropped because they did not fit.
    pub truncated: usize,
}

/// Most characters that fit side by side in the window.
pub const fn max_chars() -> usize {
    (PATTERN_WEEKS + GLYPH_GAP) / (GLYPH_WIDTH + GLYPH_GAP)
}

/// Render `text` left to right as a 0/1 pattern.
///
/// Characters that would not fit completely are dropped from the end; the
/// output never contains a partial glyph.
pub fn render_text(text: &str) -> Result<TextRender> {
    let glyphs = text
        .chars()
        .map(|c| {
            glyph(c).ok_or_else(|| ArtError::Validation(format!("no glyph for character {c:?}")))
        })
        .collect::<Result<Vec<_>>>()?;
    if glyphs.is_empty() {
        return Err(ArtError::Validation("text is empty".to_string()));
    }

    let fits = glyphs.len().min(max_chars());
    let truncated = glyphs.len() - fits;
    if truncated > 0 {
        warn!(
            kept = fits,
            dropped = truncated,
            "text is wider than {PATTERN_WEEKS} weeks, truncating"
        );
    }

    let width = fits * GLYPH_WIDTH + (fits - 1) * GLYPH_GAP;
    let mut rows = vec![vec![0u32; width]; PATTERN_DAYS];
    for (index, glyph) in glyphs.iter().take(fits).enumerate() {
        let start = index * (GLYPH_WIDTH + GLYPH_GAP);
        for (day, line) in glyph.iter().enumerate() {
            for (col, px) in line.chars().enumerate() {
                rows[day][start + col] = u32::from(px == '#');
            }
        }
    }

    Ok(TextRender {
        pattern: Pattern::new(rows)?,
        truncated,
    })
}

fn glyph(c: char) -> Option<&'static Glyph> {
    let glyph = match c.to_ascii_uppercase() {
        'A' => &A,
        'B' => &B,
        'C' => &C,
        'D' => &D,
        'E' => &E,
        'F' => &F,
        'G' => &G,
        'H' => &H,
        'I' => &I,
        'J' => &J,
        'K' => &K,
        'L' => &L,
        'M' => &M,
        'N' => &N,
        'O' => &O,
        'P' => &P,
        'Q' => &Q,
        'R' => &R,
        'S' => &S,
        'T' => &T,
        'U' => &U,
        'V' => &V,
        'W' => &W,
        'X' => &X,
        'Y' => &Y,
        'Z' => &Z,
        '0' => &DIGIT_0,
        '1' => &DIGIT_1,
        '2' => &DIGIT_2,
        '3' => &DIGIT_3,
        '4' => &DIGIT_4,
        '5' => &DIGIT_5,
        '6' => &DIGIT_6,
        '7' => &DIGIT_7,
        '8' => &DIGIT_8,
        '9' => &DIGIT_9,
        ' ' => &SPACE,
        '!' => &BANG,
        '?' => &QUESTION,
        '.' => &PERIOD,
        ',' => &COMMA,
        '-' => &DASH,
        ':' => &COLON,
        '\'' => &APOSTROPHE,
        '+' => &PLUS,
        '=' => &EQUALS,
        '/' => &SLASH,
        '#' => &HASH,
        _ => return None,
    };
    Some(glyph)
}

const A: Glyph = [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"];
const B: Glyph = ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."];
const C: Glyph = [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."];
const D: Glyph = ["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."];
const E: Glyph = ["#####", "#....", "#....", "####.", "#....", "#....", "#####"];
const F: Glyph = ["#####", "#....", "#....", "####.", "#....", "#....", "#...."];
const G: Glyph = [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"];
const H: Glyph = ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"];
const I: Glyph = [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."];
const J: Glyph = ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."];
const K: Glyph = ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"];
const L: Glyph = ["#....", "#....", "#....", "#....", "#....", "#....", "#####"];
const M: Glyph = ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"];
const N: Glyph = ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"];
const O: Glyph = [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."];
const P: Glyph = ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."];
const Q: Glyph = [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"];
const R: Glyph = ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"];
const S: Glyph = [".####", "#....", "#....", ".###.", "....#", "....#", "####."];
const T: Glyph = ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."];
const U: Glyph = ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."];
const V: Glyph = ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."];
const W: Glyph = ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."];
const X: Glyph = ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"];
const Y: Glyph = ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."];
const Z: Glyph = ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"];

const DIGIT_0: Glyph = [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."];
const DIGIT_1: Glyph = ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."];
const DIGIT_2: Glyph = [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"];
const DIGIT_3: Glyph = ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."];
const DIGIT_4: Glyph = ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."];
const DIGIT_5: Glyph = ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."];
const DIGIT_6: Glyph = ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."];
const DIGIT_7: Glyph = ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."];
const DIGIT_8: Glyph = [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."];
const DIGIT_9: Glyph = [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."];

const SPACE: Glyph = [".....", ".....", ".....", ".....", ".....", ".....", "....."];
const BANG: Glyph = ["..#..", "..#..", "..#..", "..#..", "..#..", ".....", "..#.."];
const QUESTION: Glyph = [".###.", "#...#", "....#", "...#.", "..#..", ".....", "..#.."];
const PERIOD: Glyph = [".....", ".....", ".....", ".....", ".....", ".##..", ".##.."];
const COMMA: Glyph = [".....", ".....", ".....", ".....", ".##..", "..#..", ".#..."];
const DASH: Glyph = [".....", ".....", ".....", "#####", ".....", ".....", "....."];
const COLON: Glyph = [".....", ".##..", ".##..", ".....", ".##..", ".##..", "....."];
const APOSTROPHE: Glyph = ["..#..", "..#..", ".#...", ".....", ".....", ".....", "....."];
const PLUS: Glyph = [".....", "..#..", "..#..", "#####", "..#..", "..#..", "....."];
const EQUALS: Glyph = [".....", ".....", "#####", ".....", "#####", ".....", "....."];
const SLASH: Glyph = [".....", "....#", "...#.", "..#..", ".#...", "#....", "....."];
const HASH: Glyph = [".#.#.", ".#.#.", "#####", ".#.#.", "#####", ".#.#.", ".#.#."];
