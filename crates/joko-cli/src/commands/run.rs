//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use joko_sim::Simulator;

use super::common::{print_counts, print_steps, resolve_circuit};
use crate::config::CliConfig;

/// Execute the run command.
pub fn execute(
    config: &CliConfig,
    input: Option<&str>,
    preset: Option<&str>,
    seed: Option<u64>,
    shots: Option<u32>,
    format: &str,
) -> Result<()> {
    let json = match format.to_lowercase().as_str() {
        "table" => false,
        "json" => true,
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    };

    let (label, circuit) = resolve_circuit(input, preset)?;
    info!(
        "Loaded circuit {label}: {} qubits, {} gates",
        circuit.num_qubits(),
        circuit.num_gates()
    );

    let mut sim_config = config.simulator.clone();
    if let Some(seed) = seed {
        sim_config.seed = Some(seed);
    }
    debug!(?sim_config, "Simulator configuration");
    let mut sim = Simulator::with_config(sim_config)?;

    if !json {
        println!(
            "{} Running {} ({} qubits, {} gates)",
            style("→").cyan().bold(),
            style(&label).green(),
            circuit.num_qubits(),
            circuit.num_gates()
        );
    }

    let steps = sim
        .execute_circuit(&circuit)
        .with_context(|| format!("Failed to execute {label}"))?;
    info!("Executed {} steps", steps.len());

    let counts = match shots {
        Some(shots) => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .context("Invalid progress template")?,
            );
            spinner.set_message(format!("Sampling {shots} shots..."));
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));

            let counts = sim.sample_counts(&circuit, shots);
            spinner.finish_and_clear();
            let counts = counts?;
            info!("Sampled {} shots into {} outcomes", counts.total(), counts.len());
            Some(counts)
        }
        None => None,
    };

    if json {
        let output = match &counts {
            Some(counts) => serde_json::json!({ "steps": steps, "counts": counts }),
            None => serde_json::json!({ "steps": steps }),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_steps(&steps)?;
    if let Some(counts) = &counts {
        print_counts(counts);
    }

    Ok(())
}
