//! Event history handler.

use tabled::Tabled;

use nexecur_core::{Controller, Event};

use crate::cli::{GlobalOpts, HistoryArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl EventRow {
    fn new(e: &Event) -> Self {
        Self {
            time: e.timestamp.map_or_else(
                || "-".into(),
                |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
            device: e.device.clone().unwrap_or_default(),
            message: e.message.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    controller: &Controller,
    args: HistoryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut events = controller.event_history().await?;
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    if let Some(limit) = args.limit {
        events.truncate(limit);
    }

    let rendered = output::render_list(&global.output, &events, EventRow::new, |e| {
        e.message.clone().unwrap_or_default()
    })?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
