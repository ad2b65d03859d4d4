//! Alarm status handler.

use serde::Serialize;

use nexecur_core::{AlarmStatus, Controller};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct StatusView {
    status: AlarmStatus,
    armed: bool,
    label: String,
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let status = controller.alarm_status().await?;
    let view = StatusView {
        status,
        armed: status.is_armed(),
        label: status.to_string(),
    };

    let color = output::should_color(&global.color);
    let rendered = output::render_single(
        &global.output,
        &view,
        |v| format!("Alarm: {}", output::paint_status(v.status, color)),
        |v| v.label.clone(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
