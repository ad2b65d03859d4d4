//! Arm / disarm handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use nexecur_core::{AlarmCommand, Controller};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct OrderResult {
    command: AlarmCommand,
    applied: bool,
}

pub async fn handle(
    controller: &Controller,
    command: AlarmCommand,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let spinner = waiting_spinner(command, global.quiet);
    let result = controller
        .control_alarm_system_with_cancel(command, cancel)
        .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result?;

    let rendered = output::render_single(
        &global.output,
        &OrderResult {
            command,
            applied: true,
        },
        |r| match r.command {
            AlarmCommand::Disarm => "Alarm disarmed".to_owned(),
            AlarmCommand::PartialArm => "Alarm armed (partial)".to_owned(),
            AlarmCommand::TotalArm => "Alarm armed (total)".to_owned(),
        },
        |r| r.command.to_string(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn waiting_spinner(command: AlarmCommand, quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("{} alarm, waiting for the panel", capitalize(command.action())));
    spinner.enable_steady_tick(Duration::from_millis(120));
    Some(spinner)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
