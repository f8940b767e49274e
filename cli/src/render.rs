// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use blokus_core::GameSnapshot;

/// Render the board as ASCII art, one letter per colored cell
pub fn render_board(state: &GameSnapshot) -> String {
    let mut output = String::new();

    // Column labels
    output.push_str("   ");
    for col in 0..state.width {
        output.push_str(&format!("{:>2}", col % 100));
    }
    output.push('\n');

    for (row, cells) in state.cells.chunks(state.width.max(1)).enumerate() {
        output.push_str(&format!("{:>2} ", row));
        for &cell in cells {
            output.push(' ');
            output.push(cell.symbol());
        }
        output.push('\n');
    }

    output
}
