//! The two-step optimal-interval wizard: MTBF and unit first, then the
//! inspection and failure costs against the carried failure rate. Step 2
//! accepts "b" to go back and re-enter the MTBF.

use anyhow::Result;
use relcalc_core::calculators::optimal_interval::OptimalIntervalFlow;
use relcalc_core::units::{format_currency, TimeUnit};
use relcalc_core::Settings;

use crate::prompts::{prompt_choice, prompt_f64, prompt_line};

pub fn run(settings: &Settings) -> Result<()> {
    println!();
    println!("Optimal Inspection Interval");
    println!("---------------------------");

    let mut flow = OptimalIntervalFlow::new();
    let mut rate = match enter_mtbf(&mut flow) {
        Some(rate) => rate,
        None => return Ok(()),
    };

    loop {
        let entry = prompt_line(&format!(
            "Step 2 - Failure rate per hour (b = back) [{:.4e}]: ",
            rate
        ));
        if entry.eq_ignore_ascii_case("b") || entry.eq_ignore_ascii_case("back") {
            flow.back();
            rate = match enter_mtbf(&mut flow) {
                Some(rate) => rate,
                None => return Ok(()),
            };
            continue;
        }

        let rate = entry.parse().unwrap_or(rate);
        let inspection_cost = prompt_f64("Cost of one inspection", 500.0);
        let failure_cost = prompt_f64("Cost of one failure", 10000.0);

        match flow.submit_costs(rate, inspection_cost, failure_cost) {
            Ok(result) => {
                println!();
                println!(
                    "Optimal interval: {} (inspection {}, failure {})",
                    result,
                    format_currency(inspection_cost, &settings.currency),
                    format_currency(failure_cost, &settings.currency),
                );
            }
            Err(e) => eprintln!("Error: {}", e),
        }
        return Ok(());
    }
}

/// Step 1: prompt for MTBF and unit, derive the failure rate.
fn enter_mtbf(flow: &mut OptimalIntervalFlow) -> Option<f64> {
    let mtbf = prompt_f64("Step 1 - Mean time between failures", 7.0);
    let unit: TimeUnit = prompt_choice(
        "Unit",
        &["hours", "days", "weeks", "months", "years"],
        "years",
    )
    .parse()
    .expect("choice is constrained to valid units");

    match flow.submit_mtbf(mtbf, unit) {
        Ok(rate) => {
            println!("Failure rate: {:.4e} per hour", rate);
            println!();
            Some(rate)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}
