//! Tracing setup for the `worksheet` binary.
//!
//! - `LOG_LEVEL` holds the filter directives (e.g. `debug` or
//!   `info,worksheet=debug`).
//! - `LOG_FORMAT=json` switches to structured JSON lines; anything else is
//!   the human-readable format.
//!
//! Logs go to stderr so worksheet output on stdout stays clean.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,worksheet=info,worksheet_gen=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
