//! Command dispatch: bridges CLI args -> controller calls -> output formatting.

pub mod alarm;
pub mod config_cmd;
pub mod history;
pub mod register;
pub mod status;
pub mod stream;

use tokio_util::sync::CancellationToken;

use nexecur_core::{AlarmCommand, Controller};

use crate::cli::{ArmMode, Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(controller, global).await,
        Command::History(args) => history::handle(controller, args, global).await,
        Command::Arm(args) => {
            let command = match args.mode {
                ArmMode::Partial => AlarmCommand::PartialArm,
                ArmMode::Total => AlarmCommand::TotalArm,
            };
            alarm::handle(controller, command, global, cancel).await
        }
        Command::Disarm => alarm::handle(controller, AlarmCommand::Disarm, global, cancel).await,
        Command::Stream(args) => stream::handle(controller, args, global).await,
        Command::Register => register::handle(controller, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
