use crate::cli::{args::MigrateArgs, config::expand_path, global::GlobalArgs};
use legacy_codec::{FieldAction, PasswordCodec, UserRecord, migration};
use std::fs;

const MASK: &str = "********";

pub fn handle(
    args: MigrateArgs,
    global: &GlobalArgs,
    codec: &PasswordCodec,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = expand_path(&args.file);
    let content = fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read records from {:?}: {}", path, e))?;
    let mut records: Vec<UserRecord> = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid record file {:?}: {}", path, e))?;

    let mut plan = migration::plan(codec, &records);

    if args.apply
        && let Some(output) = &args.output
    {
        let changed = plan.apply(&mut records);
        fs::write(expand_path(output), serde_json::to_string_pretty(&records)?)?;
        log::info!("wrote {} records ({} changed) to {:?}", records.len(), changed, output);
    }

    if !args.reveal {
        for record in &mut plan.records {
            mask(&mut record.password);
            mask(&mut record.app_password);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for record in &plan.records {
        println!("{} (id {})", record.login, record.id);
        println!("  password:     {}", describe(&record.password));
        println!("  app password: {}", describe(&record.app_password));
    }

    let summary = plan.summary;
    println!();
    println!("Total users:      {}", summary.total);
    println!("To re-encode:     {}", summary.migrated);
    println!("Unchanged:        {}", summary.unchanged);
    println!("Disabled/skipped: {}", summary.skipped_disabled);

    if !args.apply && !global.quiet {
        eprintln!("Dry run: nothing written. Use --apply -o FILE to write the result.");
    }

    Ok(())
}

fn mask(action: &mut FieldAction) {
    if let FieldAction::Encode { from, .. } = action {
        *from = MASK.to_string();
    }
}

fn describe(action: &FieldAction) -> String {
    match action {
        FieldAction::Absent => "(none)".to_string(),
        FieldAction::AlreadyEncoded => "already encoded".to_string(),
        FieldAction::Encode { from, to } => format!("{} -> {}", from, to),
    }
}
