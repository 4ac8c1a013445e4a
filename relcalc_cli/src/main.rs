//! # Relcalc CLI Application
//!
//! Terminal interface for the reliability calculators: failure-finding
//! intervals, reliability checks, the optimal-interval wizard and the
//! RCM Decision Tool. Results are printed alongside their JSON form so
//! the output can be piped into other tooling.

mod prompts;
mod rcm_tool;
mod wizard;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use relcalc_core::calculators::{
    availability, economic, failure_probability, reliability, risk, risk_voting, voting_systems,
    AvailabilityFfiInput, AvailabilityPolicy, EconomicFfiInput, FailureProbabilityInput, FfiResult,
    RateInput, ReliabilityInput, RiskFfiInput, RiskVotingFfiInput, VotingSystemsFfiInput,
};
use relcalc_core::formulas;
use relcalc_core::member::{decode_claims, MemberClient, UserSession};
use relcalc_core::units::{format_number, DecimalSeparator};
use relcalc_core::Settings;

use prompts::{prompt_choice, prompt_f64, prompt_line, prompt_u32, prompt_yes_no};

/// Environment variable carrying the ARMember API key for login.
const API_KEY_VAR: &str = "RELCALC_ARM_API_KEY";

fn config_dir() -> PathBuf {
    if let Some(dir) = env::var_os("RELCALC_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config").join("relcalc"),
        None => PathBuf::from("."),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings_path = config_dir().join("settings.json");
    let session_path = config_dir().join("session.json");
    let mut settings = Settings::load_or_default(&settings_path);
    let mut session = UserSession::load(&session_path).ok();

    println!("Relcalc - Reliability Engineering Calculators");
    println!("=============================================");

    loop {
        println!();
        println!("  1. FFI from target availability");
        println!("  2. FFI - economic optimum");
        println!("  3. FFI - risk based");
        println!("  4. FFI - risk based, voting system (premium)");
        println!("  5. FFI - voting systems");
        println!("  6. Reliability check");
        println!("  7. Failure probability");
        println!("  8. Optimal inspection interval");
        println!("  9. Tank voiding time");
        println!(" 10. RCM Decision Tool");
        println!(" 11. Settings");
        println!(" 12. Log in");
        println!("  0. Quit");

        match prompt_line("Choice: ").as_str() {
            "1" => run_availability(&settings),
            "2" => run_economic(&settings),
            "3" => run_risk(&settings),
            "4" => {
                if session.as_ref().is_some_and(UserSession::has_paid_plan) {
                    run_risk_voting(&settings);
                } else {
                    println!(
                        "The voting-system calculator needs a paid membership. \
                         Log in (option 12) with a Bronze, Silver or Gold plan."
                    );
                }
            }
            "5" => run_voting_systems(&settings),
            "6" => run_reliability(&settings),
            "7" => run_failure_probability(&settings),
            "8" => wizard::run(&settings)?,
            "9" => run_voiding_time(),
            "10" => rcm_tool::run()?,
            "11" => {
                edit_settings(&mut settings);
                if let Err(e) = settings.save(&settings_path) {
                    eprintln!("Could not save settings: {}", e);
                }
            }
            "12" => match log_in(&session_path) {
                Ok(new_session) => session = Some(new_session),
                Err(e) => eprintln!("Login failed: {}", e),
            },
            "0" | "q" | "quit" => break,
            other => println!("Unrecognised choice '{}'.", other),
        }
    }
    Ok(())
}

fn print_ffi_result(result: &FfiResult, settings: &Settings) {
    println!();
    println!(
        "Failure Finding Interval: {}",
        result.formatted(settings.decimal_separator)
    );
    for warning in &result.warnings {
        println!("  {}", warning);
    }
    print_json(result);
}

fn print_json<T: Serialize>(value: &T) {
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!();
        println!("JSON:");
        println!("{}", json);
    }
}

fn run_availability(settings: &Settings) {
    println!();
    println!("FFI from Target Availability");
    let defaults = AvailabilityFfiInput::default();
    let input = AvailabilityFfiInput {
        target_availability_pct: prompt_f64(
            "Target availability (%)",
            defaults.target_availability_pct,
        ),
        mtbf_years: prompt_f64("MTBF of the protective device (years)", defaults.mtbf_years),
        parallel_devices: prompt_u32("Parallel devices", defaults.parallel_devices),
        policy: if prompt_yes_no("Accept availability below 90% with a warning?", false) {
            AvailabilityPolicy::Warn
        } else {
            AvailabilityPolicy::Block
        },
    };
    match availability::calculate(&input) {
        Ok(result) => print_ffi_result(&result, settings),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_economic(settings: &Settings) {
    println!();
    println!("FFI - Economic Optimum");
    let defaults = EconomicFfiInput::default();
    let input = EconomicFfiInput {
        mtbf_protective_years: prompt_f64(
            "MTBF of the protective device (years)",
            defaults.mtbf_protective_years,
        ),
        mtbd_protective_years: prompt_f64(
            "Mean time between demands (years)",
            defaults.mtbd_protective_years,
        ),
        cost_failure_finding: prompt_f64(
            &format!("Cost of one failure-finding task ({})", settings.currency),
            defaults.cost_failure_finding,
        ),
        cost_multiple_failure: prompt_f64(
            &format!("Cost of a multiple failure ({})", settings.currency),
            defaults.cost_multiple_failure,
        ),
        parallel_devices: prompt_u32("Parallel devices", defaults.parallel_devices),
    };
    match economic::calculate(&input) {
        Ok(result) => print_ffi_result(&result, settings),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_risk(settings: &Settings) {
    println!();
    println!("FFI - Risk Based");
    let defaults = RiskFfiInput::default();
    let input = RiskFfiInput {
        mtbf_protective_years: prompt_f64(
            "MTBF of the protective device (years)",
            defaults.mtbf_protective_years,
        ),
        mean_period_between_demands_years: prompt_f64(
            "Mean period between demands (years)",
            defaults.mean_period_between_demands_years,
        ),
        mtbmf_years: prompt_f64(
            "Tolerable mean time between multiple failures (years)",
            defaults.mtbmf_years,
        ),
        parallel_devices: prompt_u32("Parallel devices", defaults.parallel_devices),
    };
    match risk::calculate(&input) {
        Ok(result) => print_ffi_result(&result, settings),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_risk_voting(settings: &Settings) {
    println!();
    println!("FFI - Risk Based, Voting System");
    let defaults = RiskVotingFfiInput::default();
    let input = RiskVotingFfiInput {
        mtbf_protective_years: prompt_f64(
            "MTBF of one channel (years)",
            defaults.mtbf_protective_years,
        ),
        mean_period_between_demands_years: prompt_f64(
            "Mean period between demands (years)",
            defaults.mean_period_between_demands_years,
        ),
        mtbmf_years: prompt_f64(
            "Tolerable mean time between multiple failures (years)",
            defaults.mtbmf_years,
        ),
        parallel_devices: prompt_u32("Total channels (n)", defaults.parallel_devices),
        devices_to_activate: prompt_u32(
            "Channels required to trip (m)",
            defaults.devices_to_activate,
        ),
    };
    match risk_voting::calculate(&input) {
        Ok(result) => print_ffi_result(&result, settings),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_voting_systems(settings: &Settings) {
    println!();
    println!("FFI - Voting Systems");
    let defaults = VotingSystemsFfiInput::default();
    let input = VotingSystemsFfiInput {
        total_voters: prompt_f64("Total voting units", defaults.total_voters),
        voting_period_years: prompt_f64("Voting period (years)", defaults.voting_period_years),
        failure_rate: prompt_f64("Failure rate per unit (per year)", defaults.failure_rate),
        detection_time_years: prompt_f64(
            "Time to detect a failed unit (years)",
            defaults.detection_time_years,
        ),
    };
    match voting_systems::calculate(&input) {
        Ok(result) => print_ffi_result(&result, settings),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_reliability(settings: &Settings) {
    println!();
    println!("Reliability Check");
    let rate = if prompt_yes_no("Enter an MTBF instead of a failure rate?", false) {
        RateInput::Mtbf(prompt_f64("MTBF (hours)", 1000.0))
    } else {
        RateInput::FailureRate(prompt_f64("Failure rate (per hour)", 0.001))
    };
    let defaults = ReliabilityInput::default();
    let input = ReliabilityInput {
        rate,
        inspection_interval_hours: prompt_f64(
            "Inspection interval (hours)",
            defaults.inspection_interval_hours,
        ),
        target_reliability: prompt_f64("Target reliability (0-1)", defaults.target_reliability),
    };
    match reliability::calculate(&input) {
        Ok(result) => {
            println!();
            println!(
                "Reliability over the interval: {}%",
                format_number(result.reliability * 100.0, settings.decimal_separator)
            );
            println!(
                "Target {}: {}",
                format_number(input.target_reliability * 100.0, settings.decimal_separator),
                if result.meets_target { "MET" } else { "NOT MET" }
            );
            print_json(&result);
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_failure_probability(settings: &Settings) {
    println!();
    println!("Failure Probability");
    let defaults = FailureProbabilityInput::default();
    let input = FailureProbabilityInput {
        failure_rate: prompt_f64("Failure rate (per hour)", defaults.failure_rate),
        inspection_interval_hours: prompt_f64(
            "Inspection interval (hours)",
            defaults.inspection_interval_hours,
        ),
    };
    match failure_probability::calculate(&input) {
        Ok(result) => {
            println!();
            println!(
                "Probability of failure: {}%",
                format_number(result.probability * 100.0, settings.decimal_separator)
            );
            print_json(&result);
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn run_voiding_time() {
    println!();
    println!("Tank Voiding Time");
    let tank_volume = prompt_f64("Tank volume (m3)", 10.0);
    let pipe_length = prompt_f64("Pipe length / head (m)", 2.0);
    let pipe_diameter = prompt_f64("Pipe diameter (mm)", 100.0);
    let (system, dp) = if prompt_yes_no("Pressurized system?", false) {
        (
            formulas::PipeSystem::Pressurized,
            Some(prompt_f64("Pressure difference (Pa)", 200_000.0)),
        )
    } else {
        (formulas::PipeSystem::Gravity, None)
    };
    match formulas::voiding_time(tank_volume, pipe_length, pipe_diameter, system, dp) {
        Ok(seconds) => {
            println!();
            if seconds >= 60.0 {
                println!("Voiding time: {:.1} s ({:.1} min)", seconds, seconds / 60.0);
            } else {
                println!("Voiding time: {:.1} s", seconds);
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn edit_settings(settings: &mut Settings) {
    println!();
    println!("Settings");
    let currency = prompt_line(&format!("Currency code [{}]: ", settings.currency));
    if !currency.is_empty() {
        settings.currency = currency.to_uppercase();
    }
    settings.dark_mode = prompt_yes_no("Dark mode?", settings.dark_mode);
    settings.decimal_separator = match prompt_choice(
        "Decimal separator (point/comma)",
        &["point", "comma"],
        match settings.decimal_separator {
            DecimalSeparator::Point => "point",
            DecimalSeparator::Comma => "comma",
        },
    )
    .as_str()
    {
        "comma" => DecimalSeparator::Comma,
        _ => DecimalSeparator::Point,
    };
}

fn log_in(session_path: &std::path::Path) -> Result<UserSession> {
    let api_key = env::var(API_KEY_VAR)
        .map_err(|_| anyhow::anyhow!("set {} to the ARMember API key first", API_KEY_VAR))?;

    let username = prompt_line("Username: ");
    let password = prompt_line("Password: ");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let session = runtime.block_on(async {
        let client = MemberClient::new(api_key)?;
        let login = client.login(&username, &password).await?;
        let claims = decode_claims(&login.token)?;
        let plans = client.member_plans(&claims.data.user.id).await?;
        Ok::<_, relcalc_core::CalcError>(UserSession::new(login, plans))
    })?;

    session.save(session_path)?;
    println!(
        "Logged in as {} ({})",
        session.user_display_name,
        if session.has_paid_plan() {
            "paid plan"
        } else {
            "free plan"
        }
    );
    Ok(session)
}
