use crate::cli::{args::CheckArgs, global::GlobalArgs};
use legacy_codec::{PasswordCodec, SampleKind, conformance};
use std::process::ExitCode;

pub fn handle(
    args: CheckArgs,
    global: &GlobalArgs,
    codec: &PasswordCodec,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let report = conformance::check(codec);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let color = global.use_color();
        for sample in &report.samples {
            let status = match (sample.matched(), sample.kind) {
                (true, _) => paint("ok", "32", color),
                (false, SampleKind::Calibrated) => paint("FAIL", "31", color),
                (false, SampleKind::Observed) => paint("flagged", "33", color),
            };
            println!("{:<8} {}", status, sample.input);
            if let Some(offset) = sample.first_difference {
                println!("         expected {}", sample.expected);
                println!("         got      {}", sample.actual);
                println!("         first difference at offset {}", offset);
            }
            if !sample.best_effort_positions.is_empty() {
                println!(
                    "         best-effort positions {:?}",
                    sample.best_effort_positions
                );
            }
        }

        let failed = report.failures().count();
        let flagged = report.flagged().count();
        println!();
        println!(
            "{} samples, {} calibrated failures, {} flagged for table augmentation",
            report.samples.len(),
            failed,
            flagged
        );
    }

    Ok(if report.is_conformant() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
