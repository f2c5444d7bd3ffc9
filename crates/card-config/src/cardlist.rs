//! Card list files
//!
//! A card list is a series of blocks separated by blank lines:
//!
//! ```text
//! /path/to/back.png
//! 0        <- bleed (mm) included in the back image
//! 2.5      <- bleed (mm) included in the front images
//! /path/to/front1.png
//! /path/to/front2.png
//! ```

use crate::types::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// Fronts sharing one back image
#[derive(Debug, Clone, PartialEq)]
pub struct CardSet {
    pub back: PathBuf,
    /// Bleed already present in the back image
    pub back_bleed_mm: f32,
    /// Bleed already present in the front images
    pub front_bleed_mm: f32,
    pub fronts: Vec<PathBuf>,
}

enum State {
    Back,
    BackBleed { back: PathBuf },
    FrontBleed { back: PathBuf, back_bleed_mm: f32 },
    Fronts(CardSet),
}

fn parse_bleed(text: &str, line: usize) -> Result<f32> {
    match text.trim().parse::<f32>() {
        Ok(bleed) if bleed.is_finite() && bleed >= 0.0 => Ok(bleed),
        _ => Err(ConfigError::CardList {
            line,
            message: format!("expected a bleed in mm, got \"{}\"", text),
        }),
    }
}

/// Parse a card list
pub fn parse_card_list(text: &str) -> Result<Vec<CardSet>> {
    let mut sets = Vec::new();
    let mut state = State::Back;
    let mut block_start = 1;

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim_end_matches(['\r', '\n']);

        if line.is_empty() {
            match std::mem::replace(&mut state, State::Back) {
                State::Back => {}
                State::Fronts(set) => sets.push(set),
                State::BackBleed { .. } | State::FrontBleed { .. } => {
                    return Err(incomplete(block_start));
                }
            }
            continue;
        }

        state = match state {
            State::Back => {
                block_start = number;
                State::BackBleed {
                    back: PathBuf::from(line),
                }
            }
            State::BackBleed { back } => State::FrontBleed {
                back,
                back_bleed_mm: parse_bleed(line, number)?,
            },
            State::FrontBleed {
                back,
                back_bleed_mm,
            } => State::Fronts(CardSet {
                back,
                back_bleed_mm,
                front_bleed_mm: parse_bleed(line, number)?,
                fronts: Vec::new(),
            }),
            State::Fronts(mut set) => {
                set.fronts.push(PathBuf::from(line));
                State::Fronts(set)
            }
        };
    }

    match state {
        State::Back => {}
        State::Fronts(set) => sets.push(set),
        State::BackBleed { .. } | State::FrontBleed { .. } => {
            return Err(incomplete(block_start));
        }
    }

    log::debug!("parsed {} card sets", sets.len());
    Ok(sets)
}

fn incomplete(line: usize) -> ConfigError {
    ConfigError::CardList {
        line,
        message: "block ends before both bleed values".to_string(),
    }
}

/// Read and parse a card list file
pub async fn load_card_list(path: impl AsRef<Path>) -> Result<Vec<CardSet>> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_card_list(&text)
}

/// Format one block, including its terminating blank line
pub fn format_card_set(set: &CardSet) -> String {
    let mut lines = vec![
        set.back.display().to_string(),
        set.back_bleed_mm.to_string(),
        set.front_bleed_mm.to_string(),
    ];
    lines.extend(set.fronts.iter().map(|front| front.display().to_string()));
    lines.push(String::new());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
