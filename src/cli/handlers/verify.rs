use crate::cli::{args::VerifyArgs, global::GlobalArgs};
use legacy_codec::{PasswordCodec, PlaintextPolicy, Verdict, verify};
use std::process::ExitCode;

pub fn handle(
    args: VerifyArgs,
    global: &GlobalArgs,
    codec: &PasswordCodec,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let stored: Vec<Option<&str>> = args
        .stored
        .iter()
        .map(|s| if s.is_empty() { None } else { Some(s.as_str()) })
        .collect();

    let policy = if args.allow_plaintext {
        PlaintextPolicy::AllowLegacy
    } else {
        PlaintextPolicy::Reject
    };

    let verdict = match &args.login {
        Some(login) => verify::verify_login(codec, login, &args.submitted, &stored, policy),
        None => verify::verify(codec, &args.submitted, &stored, policy),
    };

    if !global.quiet {
        match verdict {
            Verdict::Encoded { slot } => println!("match (encoded, stored value {})", slot + 1),
            Verdict::Plaintext { slot } => {
                println!("match (plaintext, stored value {})", slot + 1)
            }
            Verdict::Mismatch => println!("mismatch"),
            Verdict::Blocked => println!("blocked login"),
        }
    }

    Ok(if verdict.is_match() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
