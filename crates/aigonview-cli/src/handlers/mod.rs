//! Command handlers.
//!
//! Each handler builds the context for its directory argument, calls the
//! lifecycle controller, prints the result for the terminal and returns the
//! process exit code. Lifecycle logic stays in `aigonview-runtime`.

pub mod kill;
pub mod launch;
pub mod status;
