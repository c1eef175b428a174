//! Config subcommand handlers.

use std::io::BufRead;

use secrecy::SecretString;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(
                &mistly_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load()?;
            let out = match global.output {
                OutputFormat::Table => cfg.to_redacted_toml()?,
                other => output::render_single(other, &cfg.redacted(), |_| String::new())?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetToken => {
            let cfg = config::load()?;
            let profile = global
                .profile
                .clone()
                .or(cfg.default_profile)
                .unwrap_or_else(|| "default".into());

            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            let token = line.trim();
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "no token on stdin".into(),
                });
            }

            mistly_config::store_api_token(&profile, &SecretString::from(token.to_owned()))?;
            if !global.quiet {
                eprintln!("API token stored in the system keyring for profile '{profile}'");
            }
            Ok(())
        }
    }
}
