pub mod chunk;
pub mod codec;
pub mod formula;
