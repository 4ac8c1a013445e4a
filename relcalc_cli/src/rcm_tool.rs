//! Interactive RCM Decision Tool: pick an asset and failure mode, work
//! through the yes/no decision diagram, then optionally export the
//! completed analysis as JSON.

use std::fs;

use anyhow::{Context, Result};
use relcalc_core::rcm::{DecisionExport, RcmState, YesNo, ASSETS};

use crate::prompts::{prompt_line, prompt_u32, prompt_yes_no};

pub fn run() -> Result<()> {
    println!();
    println!("RCM Decision Tool");
    println!("-----------------");

    let (asset, failure_mode) = match select_failure_mode() {
        Some(selection) => selection,
        None => return Ok(()),
    };

    let mut state = RcmState::new(asset, failure_mode);
    println!();
    println!("Analysing: {} / {}", state.asset, state.failure_mode);
    println!("Answer y/n, or: b = back, i = info, r = restart, q = quit");

    while let Some(question) = state.current_question() {
        println!();
        println!(
            "[{} of up to {}] {} ({:.0}%)",
            state.current_step_number(),
            state.total_steps,
            question.header,
            state.progress
        );
        println!("{}", question.main_text);

        match prompt_line("> ").to_lowercase().as_str() {
            "y" | "yes" => state.answer(YesNo::Yes)?,
            "n" | "no" => state.answer(YesNo::No)?,
            "b" | "back" => {
                if !state.back() {
                    println!("Already at the first question.");
                }
            }
            "i" | "info" => println!("{}", question.info),
            "r" | "restart" => state.reset(),
            "q" | "quit" => return Ok(()),
            other => println!("Unrecognised input '{}'.", other),
        }
    }

    let recommendation = state
        .recommendation()
        .expect("loop only exits once a recommendation is reached");
    println!();
    println!("=======================================");
    println!("  RECOMMENDATION: {}", recommendation.recommendation);
    println!("=======================================");
    println!("{}", recommendation.explanation);

    if prompt_yes_no("\nExport this analysis as JSON?", false) {
        let export = DecisionExport::from_state(&state)?;
        let filename = export.filename();
        fs::write(&filename, export.to_json()?)
            .with_context(|| format!("writing {}", filename))?;
        println!("Saved {}", filename);
    }
    Ok(())
}

fn select_failure_mode() -> Option<(String, String)> {
    println!();
    for (i, asset) in ASSETS.iter().enumerate() {
        println!("  {}. {}", i + 1, asset.name);
    }
    println!("  0. Other (enter your own)");

    let choice = prompt_u32("Asset", 1) as usize;
    if choice == 0 || choice > ASSETS.len() {
        let asset = prompt_line("Asset name: ");
        let mode = prompt_line("Failure mode: ");
        if asset.is_empty() || mode.is_empty() {
            return None;
        }
        return Some((asset, mode));
    }

    let asset = &ASSETS[choice - 1];
    println!();
    for (i, mode) in asset.failure_modes.iter().enumerate() {
        println!("  {}. {}", i + 1, mode);
    }
    let mode_choice = prompt_u32("Failure mode", 1) as usize;
    let mode = asset
        .failure_modes
        .get(mode_choice.saturating_sub(1))
        .unwrap_or(&asset.failure_modes[0]);
    Some((asset.name.to_string(), mode.to_string()))
}
