// src/circuits/mod.rs

//! Ordered gate sequences as authored by the player.
//!
//! A [`Circuit`] is the one piece of mutable authoring state in the game:
//! created empty, appended to one gate at a time, trimmed with `undo`,
//! wiped with `clear`, and consumed in full on every run. It performs no
//! gate math itself — the simulation module does — and no reordering or
//! cancellation of gates ever happens: the sequence is applied exactly as
//! placed.

use crate::gates::{Gate, GateKind};
use std::fmt;

/// An ordered sequence of gates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circuit {
    gates: Vec<Gate>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self { gates: Vec::new() }
    }

    /// Appends a single gate to the end of the sequence.
    pub fn add_gate(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Appends multiple gates from an iterator.
    pub fn add_gates<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        self.gates.extend(gates);
    }

    /// Removes and returns the most recently placed gate.
    pub fn undo(&mut self) -> Option<Gate> {
        self.gates.pop()
    }

    /// Removes every gate.
    pub fn clear(&mut self) {
        self.gates.clear();
    }

    /// The ordered gate sequence.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates placed.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// `true` if no gates have been placed.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// One more than the highest qubit index any gate references; 0 for an
    /// empty circuit. The register simulated must be at least this wide.
    pub fn qubit_span(&self) -> usize {
        self.gates
            .iter()
            .filter_map(Gate::max_qubit)
            .max()
            .map_or(0, |q| q + 1)
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Helper for constructing [`Circuit`] values with method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self {
            circuit: Circuit::new(),
        }
    }

    /// Adds a single gate to the circuit being built.
    pub fn add_gate(mut self, gate: Gate) -> Self {
        self.circuit.add_gate(gate);
        self
    }

    /// Adds multiple gates from an iterator.
    pub fn add_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.circuit.add_gates(gates);
        self
    }

    /// Finalizes and returns the built circuit.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// ASCII diagram
//-------------------------------------------------------------------------

const GATE_WIDTH: usize = 7; // e.g. "───H───"
const WIRE: &str = "───────"; // GATE_WIDTH dashes
const V_WIRE: char = '│';
const H_WIRE: char = '─';

/// Centers a gate glyph on a wire segment.
fn format_gate(symbol: &str) -> String {
    let slen = symbol.chars().count();
    if slen >= GATE_WIDTH {
        symbol.chars().take(GATE_WIDTH).collect()
    } else {
        let total_dashes = GATE_WIDTH - slen;
        let pre = total_dashes / 2;
        let post = total_dashes - pre;
        format!(
            "{}{}{}",
            H_WIRE.to_string().repeat(pre),
            symbol,
            H_WIRE.to_string().repeat(post)
        )
    }
}

impl fmt::Display for Circuit {
    /// Renders the circuit as a wire diagram, one row per qubit (qubit 0 on
    /// top), one column per gate. Controls are drawn as `@` with a vertical
    /// connector down to the target glyph.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_wires = self.qubit_span();
        let num_cols = self.gates.len();
        if num_wires == 0 {
            return writeln!(
                f,
                "ketlab::Circuit[{} gate{} on 0 qubits]",
                num_cols,
                if num_cols == 1 { "" } else { "s" },
            );
        }

        // op_grid[row][col] is the wire/gate segment; v_connect[row][col] is
        // the connector drawn below that row in that column.
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_cols]; num_wires];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_cols]; num_wires];

        for (t, gate) in self.gates.iter().enumerate() {
            // The circuit accepts unvalidated gates; one with the wrong
            // operand count stays a bare wire segment instead of indexing
            // operands it doesn't have.
            if gate.qubits.len() != gate.kind.arity() {
                continue;
            }
            match gate.kind {
                GateKind::H
                | GateKind::X
                | GateKind::Y
                | GateKind::Z
                | GateKind::S
                | GateKind::T => {
                    op_grid[gate.qubits[0]][t] = format_gate(gate.kind.symbol());
                }
                GateKind::Cnot | GateKind::Cz | GateKind::Toffoli => {
                    let (controls, target) = gate.qubits.split_at(gate.qubits.len() - 1);
                    let target = target[0];
                    for &c in controls {
                        op_grid[c][t] = format_gate("@");
                    }
                    op_grid[target][t] = format_gate(gate.kind.symbol());

                    let r_min = gate.qubits.iter().copied().min().unwrap_or(target);
                    let r_max = gate.qubits.iter().copied().max().unwrap_or(target);
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
            }
        }

        writeln!(
            f,
            "ketlab::Circuit[{} gate{} on {} qubit{}]",
            num_cols,
            if num_cols == 1 { "" } else { "s" },
            num_wires,
            if num_wires == 1 { "" } else { "s" },
        )?;
        let label_width = format!("q{}: ", num_wires - 1).len();
        for r in 0..num_wires {
            let label = format!("q{r}: ");
            write!(f, "{label:<label_width$}")?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_wires - 1 {
                write!(f, "{}", " ".repeat(label_width))?;
                for t in 0..num_cols {
                    let connector = v_connect[r][t];
                    let padding = GATE_WIDTH.saturating_sub(1);
                    let pre = padding / 2;
                    let post = padding - pre;
                    write!(f, "{}{}{}", " ".repeat(pre), connector, " ".repeat(post))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_pops_last_gate_only() {
        let mut circuit = Circuit::new();
        circuit.add_gate(Gate::h(0));
        circuit.add_gate(Gate::cnot(0, 1));
        assert_eq!(circuit.undo(), Some(Gate::cnot(0, 1)));
        assert_eq!(circuit.gates(), &[Gate::h(0)]);
        assert_eq!(circuit.undo(), Some(Gate::h(0)));
        assert_eq!(circuit.undo(), None);
    }

    #[test]
    fn qubit_span_tracks_highest_operand() {
        let circuit = CircuitBuilder::new()
            .add_gate(Gate::h(0))
            .add_gate(Gate::toffoli(0, 1, 3))
            .build();
        assert_eq!(circuit.qubit_span(), 4);
        assert_eq!(Circuit::new().qubit_span(), 0);
    }

    #[test]
    fn diagram_tolerates_unvalidated_gates() {
        // add_gate never validates, so a gate with too few operands must
        // render as empty wire rather than panic.
        let mut circuit = Circuit::new();
        circuit.add_gate(Gate::new(GateKind::Cnot, vec![]));
        circuit.add_gate(Gate::h(1));
        let drawn = format!("{circuit}");
        assert!(drawn.contains("H"));
        assert!(!drawn.contains('@'));

        let mut only_malformed = Circuit::new();
        only_malformed.add_gate(Gate::new(GateKind::H, vec![]));
        assert!(format!("{only_malformed}").contains("1 gate on 0 qubits"));
    }

    #[test]
    fn diagram_places_controls_and_targets() {
        let circuit = CircuitBuilder::new()
            .add_gate(Gate::h(0))
            .add_gate(Gate::cnot(0, 1))
            .build();
        let drawn = format!("{circuit}");
        assert!(drawn.contains("H"));
        assert!(drawn.contains("@"));
        assert!(drawn.contains(V_WIRE));
    }
}
