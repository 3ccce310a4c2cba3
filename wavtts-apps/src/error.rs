use std::ffi::OsString;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("wavtts-apps: Unknown engine {:?} in {} (expected one of {:?}).", .0, crate::ENGINE_ENV_NAME, crate::EngineKind::NAMES)]
    UnknownEngine(String),
    #[error("wavtts-apps: Text is not valid UTF-8: {:?}", .0)]
    InvalidText(OsString),
    #[error("wavtts-apps: wavtts: {}", .0)]
    Wavtts(#[from] wavtts::Error),
}
