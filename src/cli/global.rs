use clap::Args;
use std::path::PathBuf;

/// Global arguments that apply to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Extra pattern table merged over the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Ignore user and local pattern overrides
    #[arg(long, global = true)]
    pub builtin: bool,

    /// Suppress informational notices
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl GlobalArgs {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether stdout output may carry ANSI colors.
    pub fn use_color(&self) -> bool {
        use std::io::IsTerminal;
        !self.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    }
}
