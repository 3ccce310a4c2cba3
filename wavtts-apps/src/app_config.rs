use std::{env, str::FromStr};

use wavtts::{DummySynthesizer, Synthesizer};
use wavtts_cmd::LocalCommand;

use crate::Error;

/// Environment variable selecting the engine.
pub const ENGINE_ENV_NAME: &str = "TEXT2WAV_ENGINE";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineKind {
    /// The host's text-to-speech command. See [`LocalCommand`].
    #[default]
    Command,
    /// Writes silent audio. See [`DummySynthesizer`].
    Dummy,
}

impl EngineKind {
    pub const NAMES: &'static [&'static str] = &["command", "dummy"];
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "command" => Ok(Self::Command),
            "dummy" => Ok(Self::Dummy),
            _ => Err(Error::UnknownEngine(s.to_string())),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub engine: EngineKind,
}

impl AppConfig {
    /// Reads the configuration from [`ENGINE_ENV_NAME`].
    pub fn from_env() -> Result<Self, Error> {
        match env::var(ENGINE_ENV_NAME) {
            Ok(engine) => Self::with_engine(&engine),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(engine)) => {
                Err(Error::UnknownEngine(engine.to_string_lossy().into_owned()))
            }
        }
    }

    fn with_engine(engine: &str) -> Result<Self, Error> {
        Ok(Self {
            engine: engine.parse()?,
        })
    }

    pub fn create_synthesizer(&self) -> Box<dyn Synthesizer> {
        match self.engine {
            EngineKind::Command => Box::new(LocalCommand::from_env()),
            EngineKind::Dummy => Box::new(DummySynthesizer::new()),
        }
    }
}
