use std::path::PathBuf;

use thiserror::Error;

pub const HELP: &str = "\
Commands:
  files <path>...   select documents; quote paths with spaces (none clears)
  jd <text>         set the job description
  jd+ <text>        append a line to the job description
  upload            upload the first selected document
  upload-all        upload every selected document
  match [top_k]     rank uploaded resumes against the job description
  show              print the current state
  help              print this help
  quit              exit once outstanding requests have settled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectFiles(Vec<PathBuf>),
    SetJobDescription(String),
    AppendJobDescription(String),
    UploadOne,
    UploadAll,
    Match { top_k: u32 },
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("top_k must be a positive integer, got {0:?}")]
    InvalidTopK(String),
    #[error("`{0}` takes no arguments")]
    UnexpectedArguments(&'static str),
    #[error("could not split paths: {0}")]
    MalformedPaths(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// Job-description text is kept verbatim; trimming happens when matching.
pub fn parse(line: &str, default_top_k: u32) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word {
        "files" => Command::SelectFiles(split_paths(rest)?),
        "jd" => Command::SetJobDescription(rest.to_string()),
        "jd+" => Command::AppendJobDescription(rest.to_string()),
        "upload" => no_arguments("upload", rest, Command::UploadOne)?,
        "upload-all" => no_arguments("upload-all", rest, Command::UploadAll)?,
        "match" => match rest.trim() {
            "" => Command::Match {
                top_k: default_top_k,
            },
            raw => match raw.parse::<u32>() {
                Ok(top_k) if top_k > 0 => Command::Match { top_k },
                _ => return Err(CommandError::InvalidTopK(raw.to_string())),
            },
        },
        "show" => no_arguments("show", rest, Command::Show)?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Splits shell-style, so quoted or escaped paths may contain spaces.
fn split_paths(rest: &str) -> Result<Vec<PathBuf>, CommandError> {
    let words =
        shell_words::split(rest).map_err(|err| CommandError::MalformedPaths(err.to_string()))?;
    Ok(words.into_iter().map(PathBuf::from).collect())
}

fn no_arguments(name: &'static str, rest: &str, command: Command) -> Result<Command, CommandError> {
    if rest.trim().is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnexpectedArguments(name))
    }
}
