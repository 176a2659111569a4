//! Enclave driver.
//!
//! Re-exports the embedding surface of the workspace crates and implements
//! the `encl` commands on top of it. The binary in `main.rs` only parses
//! arguments and reports errors.

pub mod commands;
pub mod diagnostic;

use std::sync::Once;

pub use encl_eval::{
    buffer_handler, root_scope, silent_handler, stdout_handler, EvalError, EvalResult, Interpreter,
    ModuleReference, PrintHandler, SharedPrintHandler, Value,
};
pub use encl_ir::{Body, Name};
pub use encl_module::{
    standard_registry, ExportPolicy, LibraryRegistry, ModuleLoader, ModuleValue,
    SearchPathRegistry, Session, SessionConfig, StaticRegistry,
};
pub use encl_parse::{parse_source, ParseError};

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "ENCL_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Does nothing unless `ENCL_LOG` is set, e.g. `ENCL_LOG=encl_module=debug`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if let Ok(filter) = std::env::var(LOG_ENV) {
            tracing_subscriber::registry()
                .with(EnvFilter::new(filter))
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
    });
}
