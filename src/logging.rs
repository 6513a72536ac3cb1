use std::fs::File;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages are printed; otherwise only info
/// and above. `RUST_LOG` overrides either. The terminal front-end owns the
/// screen while a game runs, so it passes a `log_file` to keep log lines out
/// of the frame.
pub fn init(verbose: bool, log_file: Option<File>) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    if let Some(file) = log_file {
        builder.target(Target::Pipe(Box::new(file)));
    }

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
