//! Program-tagged stderr diagnostics.
//!
//! Rendered output goes to stdout; per-URL notes and warnings go to stderr
//! with the program name in front so the two streams can be told apart when
//! piped. Fatal errors are printed by the binary from the error taxonomy.

/// Program tag used on every stderr diagnostic line.
pub const PROGRAM: &str = "urledit";

/// Print a non-fatal warning line: `urledit note: <msg>`.
pub fn note(msg: &str) {
    eprintln!("{PROGRAM} note: {msg}");
    tracing::debug!("note: {msg}");
}
