use legacy_codec::{PasswordCodec, PatternTable};
use std::io::{self, BufRead};
use std::path::PathBuf;

use super::global::GlobalArgs;

/// Builds the codec for this run from the built-in table and any overrides.
pub fn load_codec(global: &GlobalArgs) -> Result<PasswordCodec, Box<dyn std::error::Error>> {
    let mut table = if global.builtin {
        PatternTable::load_default()?
    } else {
        PatternTable::load_with_overrides()?
    };

    if let Some(path) = &global.patterns {
        let path = expand_path(path);
        let extra = PatternTable::load_from_file(&path)?;
        let replaced = table.replaced_by(&extra);
        if replaced > 0 {
            log::warn!("{:?} replaces {} existing entries", path, replaced);
        }
        log::info!("merging {} entries from {:?}", extra.len(), path);
        table.merge(extra);
    }

    log::debug!("pattern table has {} entries", table.len());
    Ok(PasswordCodec::new(table))
}

/// Expands a leading `~` in a user-supplied path.
pub fn expand_path(path: &std::path::Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

/// The positional value if given, otherwise one value per stdin line.
pub fn read_inputs(value: Option<String>) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if let Some(value) = value {
        return Ok(vec![value]);
    }

    let mut inputs = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        inputs.push(line.strip_suffix('\r').unwrap_or(&line).to_string());
    }
    Ok(inputs)
}
