#![doc = include_str!("../README.md")]
#![warn(missing_docs, rust_2018_idioms)]

use std::{
    env,
    ffi::OsStr,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{ChildStdin, Command, Stdio},
    thread,
};

use tracing::debug;
use wavtts::{Error, Synthesizer, WaitFuture};

/// Environment variable to override the synthesis command.
pub const BIN_ENV_NAME: &str = "WAVTTS_CMD_BIN";

#[cfg(not(any(windows, target_os = "macos")))]
const DEFAULT_PROGRAMS: &[&str] = &["espeak-ng", "espeak"];
#[cfg(target_os = "macos")]
const DEFAULT_PROGRAMS: &[&str] = &["say"];
#[cfg(windows)]
const DEFAULT_PROGRAMS: &[&str] = &["powershell", "pwsh"];

const TEXT_ENV_NAME: &str = "WAVTTS_TEXT";
const OUTPUT_ENV_NAME: &str = "WAVTTS_OUTPUT";
// Text and path are read from the environment so they are never parsed as script.
const SAPI_SCRIPT: &str = "$ErrorActionPreference = 'Stop'; \
    Add-Type -AssemblyName System.Speech; \
    $synth = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
    try { $synth.SetOutputToWaveFile($env:WAVTTS_OUTPUT); $synth.Speak($env:WAVTTS_TEXT) } \
    finally { $synth.Dispose() }";

/// A [`Synthesizer`] implementation using a local command.
///
/// Currently, this uses the following command:
///
/// - On macOS, use `say` command.
/// - On Windows, call [SAPI] via PowerShell.
/// - On others, use `espeak-ng` command, or `espeak` if not installed.
///
/// **Disclaimer**: These commands might change over time.
///
/// [SAPI]: https://en.wikipedia.org/wiki/Microsoft_Speech_API
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct LocalCommand {
    program: Option<PathBuf>,
}

impl LocalCommand {
    /// Creates a new `LocalCommand` using the platform's default command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `LocalCommand` running `program`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    /// Creates a new `LocalCommand`, honoring [`BIN_ENV_NAME`] if it is set.
    pub fn from_env() -> Self {
        match env::var_os(BIN_ENV_NAME) {
            Some(program) if !program.is_empty() => Self::with_program(program),
            _ => Self::new(),
        }
    }

    /// Returns the command that will be run.
    pub fn program(&self) -> Result<PathBuf, Error> {
        if let Some(program) = &self.program {
            return Ok(program.clone());
        }
        let paths = env::var_os("PATH").unwrap_or_default();
        DEFAULT_PROGRAMS
            .iter()
            .find_map(|name| find_in(&paths, name))
            .ok_or_else(|| Error::Unavailable {
                message: format!("none of {DEFAULT_PROGRAMS:?} is found in PATH"),
            })
    }
}

impl Synthesizer for LocalCommand {
    fn synthesize_to_file(&self, text: &str, path: &Path) -> Result<WaitFuture, Error> {
        let invocation = Invocation::new(&self.program()?, text, path);
        let (sender, receiver) = tokio::sync::oneshot::channel();

        thread::spawn(move || {
            let res = invocation.run();
            let _ = sender.send(res);
        });

        Ok(WaitFuture::new(async move {
            receiver.await.map_err(|e| Error::Canceled {
                message: e.to_string(),
            })?
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Espeak,
    Say,
    PowerShell,
}

impl Flavor {
    fn detect(program: &Path) -> Self {
        let name = program
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_ascii_lowercase();
        match name.as_str() {
            "say" => Self::Say,
            "powershell" | "pwsh" => Self::PowerShell,
            _ => Self::Espeak,
        }
    }
}

#[derive(Debug)]
struct Invocation {
    command: Command,
    stdin: Option<String>,
}

impl Invocation {
    fn new(program: &Path, text: &str, path: &Path) -> Self {
        let mut command = Command::new(program);
        let stdin = match Flavor::detect(program) {
            Flavor::Espeak => {
                command.arg("-w").arg(path).arg("--stdin");
                Some(text.to_string())
            }
            Flavor::Say => {
                // `say` rejects WAVE output unless the sample format is given too.
                command.arg("-o").arg(path).args([
                    "--file-format=WAVE",
                    "--data-format=LEI16@22050",
                    "-f",
                    "-",
                ]);
                Some(text.to_string())
            }
            Flavor::PowerShell => {
                command
                    .args(["-NoProfile", "-NonInteractive", "-Command", SAPI_SCRIPT])
                    .env(TEXT_ENV_NAME, text)
                    .env(OUTPUT_ENV_NAME, path);
                None
            }
        };
        Self { command, stdin }
    }

    fn run(mut self) -> Result<(), Error> {
        let program = self.command.get_program().to_string_lossy().into_owned();
        self.command
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!(command = ?self.command, "running synthesis command");
        let mut child = self.command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::Unavailable {
                message: format!("failed to run `{program}`: {e}"),
            },
            _ => Error::Io(e),
        })?;

        // stdin is fed while stderr is drained, so neither pipe can fill up and stall the other.
        let input = child.stdin.take().zip(self.stdin);
        let (written, output) = thread::scope(|s| {
            let writer = s.spawn(|| write_input(input, &program));
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        written.map_err(|_| Error::Canceled {
            message: format!("writing the text to `{program}` panicked"),
        })??;
        let output = output?;
        if output.status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

fn write_input(input: Option<(ChildStdin, String)>, program: &str) -> Result<(), Error> {
    let Some((mut stdin, text)) = input else {
        return Ok(());
    };
    // The exit status tells more than a pipe closed early.
    match stdin.write_all(text.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!(%program, "command closed stdin early");
            Ok(())
        }
        res => Ok(res?),
    }
}

fn find_in(paths: &OsStr, bin: &str) -> Option<PathBuf> {
    env::split_paths(paths).find_map(|dir| {
        let candidate = dir.join(bin);
        if candidate.is_file() {
            return Some(candidate);
        }
        let candidate = dir.join(format!("{bin}{}", env::consts::EXE_SUFFIX));
        candidate.is_file().then_some(candidate)
    })
}

#[cfg(test)]
mod tests {
    use std::{ffi::OsString, fs};

    use super::*;

    fn args(invocation: &Invocation) -> Vec<&OsStr> {
        invocation.command.get_args().collect()
    }

    fn envs(command: &Command) -> Vec<(OsString, Option<OsString>)> {
        command
            .get_envs()
            .map(|(k, v)| (k.to_owned(), v.map(OsStr::to_owned)))
            .collect()
    }

    #[test]
    fn test_flavor() {
        assert_eq!(Flavor::detect(Path::new("espeak-ng")), Flavor::Espeak);
        assert_eq!(Flavor::detect(Path::new("/usr/bin/espeak")), Flavor::Espeak);
        assert_eq!(Flavor::detect(Path::new("/usr/bin/say")), Flavor::Say);
        assert_eq!(Flavor::detect(Path::new("powershell.exe")), Flavor::PowerShell);
        assert_eq!(Flavor::detect(Path::new("pwsh")), Flavor::PowerShell);
        assert_eq!(Flavor::detect(Path::new("")), Flavor::Espeak);
    }

    #[test]
    fn test_espeak_invocation() {
        let invocation = Invocation::new(Path::new("espeak-ng"), "-hello", Path::new("out.wav"));
        assert_eq!(args(&invocation), ["-w", "out.wav", "--stdin"]);
        assert_eq!(invocation.stdin.as_deref(), Some("-hello"));
    }

    #[test]
    fn test_say_invocation() {
        let invocation = Invocation::new(Path::new("/usr/bin/say"), "hello", Path::new("a.wav"));
        assert_eq!(
            args(&invocation),
            [
                "-o",
                "a.wav",
                "--file-format=WAVE",
                "--data-format=LEI16@22050",
                "-f",
                "-"
            ]
        );
        assert_eq!(invocation.stdin.as_deref(), Some("hello"));
    }

    #[test]
    fn test_powershell_invocation() {
        let invocation = Invocation::new(Path::new("powershell"), "it's", Path::new("a.wav"));
        let args = args(&invocation);
        assert_eq!(args.len(), 4);
        assert_eq!(args[3], SAPI_SCRIPT);
        assert!(!SAPI_SCRIPT.contains("it's"));
        assert_eq!(invocation.stdin, None);

        let envs = envs(&invocation.command);
        assert!(envs.contains(&(TEXT_ENV_NAME.into(), Some("it's".into()))));
        assert!(envs.contains(&(OUTPUT_ENV_NAME.into(), Some("a.wav".into()))));
    }

    #[test]
    fn test_find_in() {
        let dir = tempfile::tempdir().unwrap();
        let empty = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("espeak"), "").unwrap();
        let paths = env::join_paths([empty.path(), dir.path()]).unwrap();

        assert_eq!(find_in(&paths, "espeak"), Some(dir.path().join("espeak")));
        assert_eq!(find_in(&paths, "espeak-ng"), None);
        assert_eq!(find_in(OsStr::new(""), "espeak"), None);
    }

    #[test]
    fn test_explicit_program() {
        let synthesizer = LocalCommand::with_program("/opt/tts/espeak-ng");
        assert_eq!(
            synthesizer.program().unwrap(),
            PathBuf::from("/opt/tts/espeak-ng")
        );
    }

    #[tokio::test]
    async fn test_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = LocalCommand::with_program(dir.path().join("no-such-tts"));

        let err = synthesizer
            .synthesize_to_file("hello", &dir.path().join("out.wav"))
            .unwrap()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unavailable { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_failed() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = LocalCommand::with_program("false");

        let err = synthesizer
            .synthesize_to_file("hello", &dir.path().join("out.wav"))
            .unwrap()
            .await
            .unwrap_err();
        match err {
            Error::CommandFailed {
                program, status, ..
            } => {
                assert_eq!(program, "false");
                assert!(!status.success());
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_long_text_with_chatty_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("espeak");
        // reports errors before it reads any input
        fs::write(
            &script,
            "#!/bin/sh\nhead -c 1000000 /dev/zero | tr '\\0' x >&2\ncat >/dev/null\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        let synthesizer = LocalCommand::with_program(&script);
        let text = "hello ".repeat(200_000);

        synthesizer
            .synthesize_to_file(&text, &dir.path().join("out.wav"))
            .unwrap()
            .await
            .unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_succeeded() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = LocalCommand::with_program("true");

        synthesizer
            .synthesize_to_file("hello", &dir.path().join("out.wav"))
            .unwrap()
            .await
            .unwrap();
    }
}
