//! Log setup for the plugin binary.
//!
//! stdout carries the protoc response, so everything goes to stderr.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` overrides the default filter,
/// which raises only this crate to `debug` when the `debug` option is set.
///
/// Calling this more than once is harmless.
pub fn init(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(debug))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

// Dependencies (handlebars logs every expression at debug) stay at info.
fn default_directives(debug: bool) -> &'static str {
    if debug {
        "info,protoc_gen_template=debug"
    } else {
        "info"
    }
}
