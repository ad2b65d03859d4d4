//! Device registration handler.

use nexecur_core::Controller;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    controller.ensure_registered().await?;

    let record = controller.user_configuration().await;
    let rendered = output::render_single(
        &global.output,
        &serde_json::json!({
            "id_site": record.id_site,
            "id_device": record.id_device,
            "registered": record.is_device_registered(),
        }),
        |_| format!("Device registered (id {})", record.id_device),
        |_| record.id_device.clone(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
