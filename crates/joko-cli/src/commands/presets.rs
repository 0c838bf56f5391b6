//! Presets command implementation.

use console::style;

use joko_ir::Preset;

/// Execute the presets command.
pub fn execute() {
    println!("{} Built-in circuits:\n", style("Joko").cyan().bold());

    for preset in Preset::all() {
        let circuit = preset.circuit();
        println!(
            "  {:<26} {} qubits, {} gates",
            style(preset.name()).green(),
            circuit.num_qubits(),
            circuit.num_gates()
        );
        println!("    {}", preset.description());
    }

    println!("\nRun one with: {}", style("joko run --preset <name>").yellow());
}
