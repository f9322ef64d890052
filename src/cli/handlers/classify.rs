use crate::cli::{args::ClassifyArgs, config::read_inputs};
use legacy_codec::StoredFormat;

pub fn handle(args: ClassifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    for input in read_inputs(args.text)? {
        println!("{}", StoredFormat::classify(&input).as_str());
    }
    Ok(())
}
