use crate::cli::{args::EncodeArgs, config::read_inputs, global::GlobalArgs};
use legacy_codec::{ChunkSource, EncodedSymbol, PasswordCodec, TracedSymbol};

pub fn handle(
    args: EncodeArgs,
    global: &GlobalArgs,
    codec: &PasswordCodec,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = read_inputs(args.text)?;

    if args.json {
        let output: Vec<_> = inputs
            .iter()
            .map(|input| {
                let trace = codec.trace(input);
                serde_json::json!({
                    "input": input,
                    "encoded": codec.encode(input),
                    "best_effort_positions": best_effort_positions(&trace),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for input in &inputs {
        println!("{}", codec.encode(input));
        if args.explain {
            explain(&codec.trace(input), global.use_color());
        }
    }

    Ok(())
}

fn best_effort_positions(trace: &[TracedSymbol]) -> Vec<usize> {
    trace
        .iter()
        .filter(|t| t.encoded.is_best_effort())
        .map(|t| t.position)
        .collect()
}

fn explain(trace: &[TracedSymbol], use_color: bool) {
    for t in trace {
        let line = match t.encoded {
            EncodedSymbol::Chunk(source) => {
                let chunk = source.chunk();
                let origin = match source {
                    ChunkSource::Exact(_) => "exact",
                    ChunkSource::Formula(_) => "formula (best-effort)",
                };
                format!(
                    "  {:>4}  {}  {}  {}  {}",
                    t.position,
                    t.symbol,
                    chunk,
                    hex::encode(chunk.as_bytes()),
                    origin
                )
            }
            EncodedSymbol::Passthrough(c) => {
                format!("  {:>4}  {}  {:<4}  {:<8}  passthrough", t.position, c, c, "")
            }
        };

        if use_color && t.encoded.is_best_effort() {
            println!("\x1b[33m{}\x1b[0m", line);
        } else {
            println!("{}", line);
        }
    }
}
