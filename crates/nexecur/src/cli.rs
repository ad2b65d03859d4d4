//! Clap derive structures for the `nexecur` CLI.
//!
//! Defines the command tree, global flags, and shared types. Shared with
//! `build.rs` for man page generation, so only clap may be used here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nexecur -- arm, disarm and inspect a Nexecur alarm panel
#[derive(Debug, Parser)]
#[command(
    name = "nexecur",
    version,
    about = "Control a Nexecur alarm system from the command line",
    long_about = "Arm, disarm and inspect a Nexecur alarm panel.\n\n\
        The first command registers this machine as a device with the\n\
        vendor and replaces the stored password with its derived hash.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Credential record to use (overrides settings)
    #[arg(long, env = "NEXECUR_CREDENTIALS", global = true)]
    pub credentials: Option<PathBuf>,

    /// Request timeout in seconds (overrides settings)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Seconds to wait for the panel to apply an order (overrides settings)
    #[arg(long, global = true)]
    pub operation_timeout: Option<u64>,

    /// Accept invalid TLS certificates (intercepting proxies only)
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show whether the alarm is armed
    #[command(alias = "st")]
    Status,

    /// List recent panel events
    #[command(alias = "events")]
    History(HistoryArgs),

    /// Arm the alarm and wait for the panel to confirm
    Arm(ArmArgs),

    /// Disarm the alarm and wait for the panel to confirm
    Disarm,

    /// Request a camera stream URI
    Stream(StreamArgs),

    /// Register this machine with the vendor without sending an order
    Register,

    /// Manage settings and the credential record
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Alarm ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ArmArgs {
    /// Which partition set to arm
    #[arg(long, short = 'm', default_value = "partial")]
    pub mode: ArmMode,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ArmMode {
    /// Partition SP1
    Partial,
    /// Partition SP2
    Total,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Show at most this many events, newest first
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct StreamArgs {
    /// Device serial as listed by the site
    pub serial: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the credential record with guided setup
    Init,

    /// Display the resolved settings and the redacted credential record
    Show,

    /// Print the settings and credential file locations
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
