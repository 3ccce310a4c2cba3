mod dummy_synthesizer;

pub use dummy_synthesizer::*;
