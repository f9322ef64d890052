use crate::cli::args::TableArgs;
use legacy_codec::{PasswordCodec, value_of};

pub fn handle(args: TableArgs, codec: &PasswordCodec) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match args.symbol {
        Some(c) => Some(value_of(c).ok_or_else(|| {
            format!("'{}' is not in the supported alphabet (0-9, a-z, A-Z)", c)
        })?),
        None => None,
    };

    let entries: Vec<_> = codec
        .table()
        .entries()
        .filter(|(key, _)| filter.is_none_or(|v| key.value == v))
        .collect();

    if args.json {
        let output: Vec<_> = entries
            .iter()
            .map(|(key, chunk)| {
                serde_json::json!({
                    "symbol": key.symbol().map(String::from),
                    "value": key.value,
                    "position": key.position,
                    "chunk": chunk.to_string(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (key, chunk) in &entries {
        let symbol = key.symbol().unwrap_or('?');
        println!("  {}  {:>3}  {}", symbol, key.position, chunk);
    }
    println!("{} entries", entries.len());

    Ok(())
}
