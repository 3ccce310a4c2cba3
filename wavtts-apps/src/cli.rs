use std::{ffi::OsString, iter, path::PathBuf};

use clap::{CommandFactory, Parser};

/// Exit status for an invalid invocation.
pub const USAGE_EXIT_CODE: u8 = 1;
/// Exit status for a failure raised while synthesizing.
pub const FAILURE_EXIT_CODE: u8 = 2;

/// Render a text into a WAV file with the host's speech engine.
#[derive(Debug, Parser)]
#[command(
    name = "text2wav",
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// Text to speak.
    #[arg(value_parser = clap::value_parser!(OsString))]
    pub text: OsString,
    /// Path of the WAV file to write. Overwritten if it exists.
    pub output_path: PathBuf,
    #[arg(hide = true, num_args = 1.., value_parser = clap::value_parser!(OsString))]
    pub ignored: Vec<OsString>,
}

impl Args {
    /// Parses the arguments positionally: nothing after the binary name is an option.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args = args.into_iter().map(Into::into);
        let bin = args.next();
        // after the escape, a user's own `--` is a plain value
        Self::try_parse_from(bin.into_iter().chain(iter::once("--".into())).chain(args))
    }

    /// One-line usage, e.g. `Usage: text2wav <TEXT> <OUTPUT_PATH>`.
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }
}
