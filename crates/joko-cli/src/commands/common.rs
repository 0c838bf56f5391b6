//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use joko_ir::{Circuit, PlacedGate, Preset, QubitId};
use joko_sim::{Counts, ExecutionStep, StateVector};

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "json" | "" => serde_json::from_str(&source)
            .with_context(|| format!("Failed to parse circuit JSON: {path}")),
        other => anyhow::bail!("Unsupported circuit format: .{other} (expected .json)"),
    }
}

/// Resolve `--input` / `--preset` into a label and a circuit.
pub fn resolve_circuit(input: Option<&str>, preset: Option<&str>) -> Result<(String, Circuit)> {
    match (input, preset) {
        (Some(path), None) => Ok((path.to_string(), load_circuit(path)?)),
        (None, Some(name)) => {
            let preset: Preset = name.parse()?;
            Ok((format!("preset {preset}"), preset.circuit()))
        }
        _ => anyhow::bail!("Specify exactly one of --input or --preset"),
    }
}

/// `H q0` / `CNOT q0,q1`.
pub fn gate_label(gate: &PlacedGate) -> String {
    let targets: Vec<String> = gate.target_qubits.iter().map(ToString::to_string).collect();
    format!("{} {}", gate.gate_id, targets.join(","))
}

fn qubit_probabilities(state: &StateVector) -> Result<String> {
    let mut parts = Vec::with_capacity(state.num_qubits());
    for q in 0..state.num_qubits() {
        let qubit = QubitId::from(q);
        parts.push(format!("{qubit}={:.3}", state.qubit_probability(qubit)?));
    }
    Ok(parts.join("  "))
}

/// Print execution steps as a readable trace.
pub fn print_steps(steps: &[ExecutionStep]) -> Result<()> {
    if steps.is_empty() {
        println!("  (no gates)");
        return Ok(());
    }

    for step in steps {
        let gates: Vec<String> = step.gates_applied.iter().map(gate_label).collect();
        println!(
            "\n{} {}",
            style(format!("Column {}:", step.column)).cyan().bold(),
            gates.join(", ")
        );
        println!("  before: {}", step.state_before);
        println!("  after:  {}", style(&step.state_after).green());

        if let Some(results) = &step.measurement_results {
            let measured: Vec<String> = results
                .iter()
                .map(|(q, outcome)| format!("{q}={outcome}"))
                .collect();
            println!("  measured: {}", style(measured.join("  ")).yellow());
        }

        println!("  P(1):   {}", qubit_probabilities(&step.state_after)?);
    }

    Ok(())
}

/// Print a shot histogram.
pub fn print_counts(counts: &Counts) {
    let total = f64::from(counts.total());
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        counts.total()
    );

    let mut sorted: Vec<(&str, u32)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = f64::from(*count) / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}
