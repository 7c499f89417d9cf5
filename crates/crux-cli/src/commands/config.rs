//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// Prints the effective configuration (file plus per-run overrides) and
/// optionally writes it back.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    println!("{}", config.to_toml()?);

    if args.write {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Config::default_path()?,
        };
        config.save(&path)?;
        println!("{}", formatter.success(&format!("Config written to {}", path.display())));
    }

    Ok(())
}
