//! Gates command implementation.

use console::style;

use joko_ir::{GateOp, catalogue};

/// Execute the gates command.
pub fn execute() {
    println!("{} Gate catalogue:\n", style("Joko").cyan().bold());

    for spec in catalogue() {
        let kind = match spec.op {
            GateOp::Unitary(_) => "unitary",
            GateOp::Measurement => "measurement",
        };
        println!(
            "  {:<5} {} ({} qubit{}, {})",
            style(spec.id).bold(),
            spec.name,
            spec.num_qubits,
            if spec.num_qubits == 1 { "" } else { "s" },
            style(kind).dim()
        );
        println!("        {}", spec.description);
    }

    println!("\n  {} CX is accepted as an alias for CNOT.", style("note:").dim());
}
