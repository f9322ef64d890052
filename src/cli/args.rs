use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode passwords the way the legacy application stores them
    Encode(EncodeArgs),
    /// Check a password against stored values
    Verify(VerifyArgs),
    /// Guess whether stored values are already encoded
    Classify(ClassifyArgs),
    /// Re-encode password columns in an exported user list
    Migrate(MigrateArgs),
    /// Show the exact pattern table
    Table(TableArgs),
    /// Re-encode the recorded legacy samples and report divergences
    Check(CheckArgs),
}

/// Arguments for encoding
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Text to encode (reads one value per line from stdin if not provided)
    pub text: Option<String>,

    /// Show the chunk chosen for every symbol
    #[arg(short = 'e', long)]
    pub explain: bool,

    /// Output as JSON
    #[arg(long, conflicts_with = "explain")]
    pub json: bool,
}

/// Arguments for credential verification
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Submitted password
    pub submitted: String,

    /// Stored values to compare against (an empty string means no value)
    #[arg(required = true, num_args = 1..)]
    pub stored: Vec<String>,

    /// Also accept a raw match against unmigrated plaintext values
    #[arg(long)]
    pub allow_plaintext: bool,

    /// Login the password belongs to; blocked logins never match
    #[arg(short = 'l', long)]
    pub login: Option<String>,
}

/// Arguments for classification
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Value to classify (reads one value per line from stdin if not provided)
    pub text: Option<String>,
}

/// Arguments for migration
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// JSON array of user records
    pub file: PathBuf,

    /// Write the re-encoded records (default is a dry run)
    #[arg(long, requires = "output")]
    pub apply: bool,

    /// Where to write the re-encoded records
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print plaintext values in the report instead of masking them
    #[arg(long)]
    pub reveal: bool,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the table listing
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Only show entries for this symbol
    #[arg(short = 's', long)]
    pub symbol: Option<char>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the conformance check
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
