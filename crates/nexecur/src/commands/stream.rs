//! Camera stream handler.

use nexecur_core::Controller;

use crate::cli::{GlobalOpts, StreamArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    controller: &Controller,
    args: StreamArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let stream = controller.stream(&args.serial).await?;

    let rendered = output::render_single(
        &global.output,
        &stream,
        |s| match s.uri {
            Some(ref uri) => format!("Stream for {}: {uri}", args.serial),
            None => format!("No stream URI returned for {}", args.serial),
        },
        |s| s.uri.clone().unwrap_or_default(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
