mod synthesizer;

pub use synthesizer::*;
