//! Languages command - list registered readers, writers and backends.

use reword_syntax::{readers, writers};
use reword_typegen::backends;

/// Render the registry listing.
pub fn listing() -> String {
    let mut out = String::from("Readers:\n");
    for reader in readers() {
        out.push_str(&format!(
            "  {} (.{})\n",
            reader.language(),
            reader.extensions().join(", .")
        ));
    }
    out.push_str("Writers:\n");
    for writer in writers() {
        out.push_str(&format!("  {} (.{})\n", writer.language(), writer.extension()));
    }
    out.push_str("Backends:\n");
    for backend in backends() {
        out.push_str(&format!("  {} -> {}\n", backend.name(), backend.language()));
    }
    out
}

/// Run the languages command
pub fn run() {
    print!("{}", listing());
}
