use std::error::Error;

use clap::Parser;
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use biased_dice_core::io::{read_weights, write_weights};
use biased_dice_core::model::analysis::{consistency_report, normalization_cases, sample_frequencies};
use biased_dice_core::model::dice_table::DiceTable;
use biased_dice_core::model::distribution::Distribution;
use biased_dice_core::model::roll_input::{RollInput, clamp_dice_count};
use biased_dice_core::model::validator::Reason;

mod cli;

use cli::{Cli, Commands, WeightSource};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Cli::parse().command {
        Commands::Roll { source, dice, consistency, times, seed } => {
            let table = DiceTable::from_distribution(load(&source)?);
            let input = RollInput::new(sanitize_dice(dice), consistency)?;
            let mut rng = make_rng(seed);
            for _ in 0..times {
                let outcome = table.roll(&input, &mut rng);
                let values: Vec<String> = outcome.values.iter().map(u32::to_string).collect();
                println!("[{}] Total: {}", values.join(", "), outcome.total);
            }
        }

        Commands::Defaults { faces } => {
            print_distribution(&Distribution::build_default(faces)?);
        }

        Commands::Normalize { source, output } => {
            let mut table = DiceTable::from_distribution(load(&source)?);
            let normalized = table.normalize()?;
            print_distribution(normalized);
            if let Some(path) = output {
                write_weights(&path, normalized)?;
                println!("Written to {}", path.display());
            }
        }

        Commands::Validate { source } => {
            let result = DiceTable::from_distribution(load(&source)?).validate();
            match result.reason {
                Reason::Valid => println!("Total is 100%"),
                Reason::ZeroTotal => {
                    warn!("all weights are 0");
                    println!("All weights are 0: dice will use equiprobable faces")
                }
                Reason::OffTotal => {
                    println!("Total is {}% instead of 100%, run `normalize` to fix it", result.total)
                }
            }
        }

        Commands::Stats { source, iterations } => {
            let distribution = load(&source)?;
            let report = sample_frequencies(&distribution, iterations);
            println!("Probability test over {} rolls:", report.iterations);
            for (i, count) in report.counts.iter().enumerate() {
                println!(
                    "Face {}: {} times ({:.2}%, expected {:.2}%)",
                    i + 1,
                    count,
                    report.observed[i],
                    report.expected[i]
                );
            }
            println!("Largest deviation: {:.2} points", report.max_deviation());
        }

        Commands::Consistency { source, dice, consistency, iterations, seed } => {
            let distribution = load(&source)?;
            // Same policy as a regular roll
            let input = RollInput::new(dice, consistency)?;
            let report = consistency_report(
                &distribution,
                input.dice_count(),
                input.consistency_percent(),
                iterations,
                &mut make_rng(seed),
            );
            println!(
                "Consistency test at {}% with {} dice over {} rolls:",
                report.consistency_percent, report.dice_count, report.iterations
            );
            for (i, values) in report.samples.iter().enumerate() {
                let identical = values.iter().all(|&v| v == values[0]);
                println!("Roll {}: {:?} - Identical: {}", i + 1, values, identical);
            }
            let percent = |n: u64| if iterations > 0 { n as f64 / iterations as f64 * 100.0 } else { 0.0 };
            println!("Identical results: {}/{} ({:.1}%)", report.identical, iterations, percent(report.identical));
            println!("Similar results: {}/{} ({:.1}%)", report.similar, iterations, percent(report.similar));
        }

        Commands::NormalizationCases => {
            for case in normalization_cases()? {
                println!("Case {}:", case.name);
                println!("  Original total: {}", case.original_total);
                println!("  Normalized total: {}", case.normalized_total);
                println!("  Values: {:?}", case.normalized);
                println!("  {}", if case.normalized_total == 100 { "SUCCESS" } else { "FAILURE" });
            }
        }
    }

    Ok(())
}

/// Resolves the weights of a command: explicit list, then file, then defaults.
fn load(source: &WeightSource) -> Result<Distribution, Box<dyn Error>> {
    let distribution = if let Some(weights) = &source.weights {
        Distribution::new(weights.clone())?
    } else if let Some(path) = &source.profile {
        read_weights(path)?
    } else {
        Distribution::build_default(source.faces)?
    };
    debug!("weights: {:?}", distribution.weights());
    Ok(distribution)
}

/// Brings a typed dice count back into the roll policy, like the dice field of a form.
fn sanitize_dice(raw: i64) -> u32 {
    let dice = clamp_dice_count(raw);
    if dice as i64 != raw {
        warn!("dice count {raw} out of range, using {dice}");
    }
    dice
}

/// Seeded generator when a seed is given, entropy otherwise.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn print_distribution(distribution: &Distribution) {
    for ((face, weight), width) in distribution.iter().zip(distribution.bar_widths()) {
        println!("{face:>3}: {weight:>3}% {}", "#".repeat((width / 2.0).round() as usize));
    }
    println!("Total: {}", distribution.total());
}
