use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("wavtts: Io error : {}", .0)]
    Io(#[from] std::io::Error),
    #[error("wavtts: Wav error : {}", .0)]
    Wav(#[from] hound::Error),
    #[error("wavtts: Unavailable : {}", message)]
    Unavailable { message: String },
    #[error("wavtts: Command `{}` failed ({}) : {}", program, status, stderr)]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("wavtts: Invalid output {:?} : {}", path, message)]
    InvalidOutput { path: PathBuf, message: String },
    #[error("wavtts: Canceled : {}", message)]
    Canceled { message: String },
    #[error("wavtts: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}
