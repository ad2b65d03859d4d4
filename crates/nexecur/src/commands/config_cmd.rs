//! Config subcommand handlers.

use dialoguer::{Input, Password};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use nexecur_config::config_path;
use nexecur_core::{ConfigurationStore, UserConfiguration};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{credential_store, resolve_settings};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() { "" } else { "[REDACTED]" }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let settings = resolve_settings(global)?;
    let store = credential_store(&settings);

    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            eprintln!("Nexecur CLI: credential setup");
            eprintln!("   Credential record: {}\n", store.path().display());

            let id_site: String = Input::new()
                .with_prompt("Site id")
                .interact_text()
                .map_err(prompt_err)?;

            let password = SecretString::from(
                Password::new()
                    .with_prompt("Account password")
                    .interact()
                    .map_err(prompt_err)?,
            );

            let device_name: String = Input::new()
                .with_prompt("Device name")
                .default(settings.device_name.clone())
                .interact_text()
                .map_err(prompt_err)?;

            if id_site.trim().is_empty() || password.expose_secret().is_empty() {
                return Err(CliError::Validation {
                    field: "credentials".into(),
                    reason: "site id and password cannot be empty".into(),
                });
            }

            // A fresh record drops any token, device id and hashes so the
            // next command registers from scratch.
            let record = UserConfiguration {
                id_site: id_site.trim().to_owned(),
                password: password.expose_secret().to_owned(),
                device_name,
                ..UserConfiguration::default()
            };
            store
                .replace(&record)
                .map_err(nexecur_core::CoreError::from)?;

            if !config_path().exists() {
                let path = settings.save()?;
                eprintln!("   Settings written to {}", path.display());
            }
            eprintln!("   Credential record written. Run `nexecur register` to pair this device.");
            Ok(())
        }

        // ── Show: resolved settings + redacted record ───────────────
        ConfigCommand::Show => {
            let record = store.load().map_err(nexecur_core::CoreError::from)?;
            let view = json!({
                "settings": settings,
                "credentials": {
                    "path": store.path(),
                    "id_site": record.id_site,
                    "device_name": record.device_name,
                    "token": redact(&record.token),
                    "password": redact(&record.password),
                    "pin": redact(&record.pin),
                    "id_device": record.id_device,
                    "registered": record.is_device_registered(),
                },
            });

            let settings_toml = toml::to_string_pretty(&settings)?;
            let rendered = output::render_single(
                &global.output,
                &view,
                |_| {
                    format!(
                        "{settings_toml}\n# {}\nid_site = {:?}\ndevice_name = {:?}\nid_device = {:?}\nregistered = {}",
                        store.path().display(),
                        record.id_site,
                        record.device_name,
                        record.id_device,
                        record.is_device_registered(),
                    )
                },
                |_| store.path().display().to_string(),
            )?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), false);
            output::print_output(&store.path().display().to_string(), false);
            Ok(())
        }
    }
}
