// Chunk: docs/chunks/run_output - Running the open file and capturing its output

//! Resolving the command that runs the open file.
//!
//! A project can override the default with an INI-like `build.<ext>` file
//! next to the source, where `<ext>` is the source file's extension:
//!
//! ```ini
//! ; build.py
//! [run]
//! cmd = "python3 -u {file}"
//! ```
//!
//! `{file}` and `{dir}` expand to the open file's path and directory.
//! Without a config file a per-language default is used.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gapline_syntax::Language;

use crate::RunError;

/// Config files larger than this are ignored.
pub const MAX_CONFIG_BYTES: u64 = 64 * 1024;

const CONFIG_STEM: &str = "build";
const RUN_SECTION: &str = "[run]";
const CMD_KEY: &str = "cmd";

/// Where a resolved command came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSource {
    ConfigFile(PathBuf),
    LanguageDefault,
}

/// A command line ready for [`crate::RunProcess::spawn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub command: String,
    /// Directory to run in: the open file's directory.
    pub working_dir: Option<PathBuf>,
    pub source: RunSource,
}

impl RunConfig {
    /// Resolves the run command for `file_path`.
    ///
    /// A missing, empty, oversized or `cmd`-less config file falls back to
    /// the language default. Only an existing file that cannot be read is an
    /// error.
    pub fn resolve(file_path: &Path, language: Language) -> Result<Self, RunError> {
        let working_dir = file_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);

        if let Some(config_path) = config_path(file_path) {
            if let Some(template) = read_run_command(&config_path)? {
                tracing::debug!(config = %config_path.display(), "using configured run command");
                return Ok(Self {
                    command: substitute(&template, file_path),
                    working_dir,
                    source: RunSource::ConfigFile(config_path),
                });
            }
        }

        Ok(Self {
            command: substitute(&default_command(language), file_path),
            working_dir,
            source: RunSource::LanguageDefault,
        })
    }
}

/// `build.<ext>` beside `file_path`, if the file has an extension.
pub fn config_path(file_path: &Path) -> Option<PathBuf> {
    let ext = file_path.extension()?.to_str()?;
    let name = format!("{CONFIG_STEM}.{ext}");
    Some(match file_path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    })
}

fn read_run_command(path: &Path) -> Result<Option<String>, RunError> {
    let config_err = |source| RunError::Config {
        path: path.to_path_buf(),
        source,
    };

    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(config_err(err)),
    };
    if size == 0 {
        return Ok(None);
    }
    if size > MAX_CONFIG_BYTES {
        tracing::warn!(config = %path.display(), size, "run config too large; ignoring");
        return Ok(None);
    }

    let bytes = fs::read(path).map_err(config_err)?;
    Ok(parse_run_command(&String::from_utf8_lossy(&bytes)))
}

/// Extracts `cmd` from the `[run]` section. Section and key names are
/// case-insensitive; a later `cmd` overrides an earlier one.
pub fn parse_run_command(text: &str) -> Option<String> {
    let mut in_run = false;
    let mut command = None;

    for line in text.lines() {
        if line.starts_with('[') {
            in_run = line.trim_end().eq_ignore_ascii_case(RUN_SECTION);
        } else if in_run {
            if let Some((key, value)) = parse_key_value(line) {
                if key.eq_ignore_ascii_case(CMD_KEY) {
                    command = Some(value.to_string());
                }
            }
        }
    }

    command
}

/// Parses `key = value`, skipping blank and `#`/`;` comment lines.
///
/// A value starting with `"` runs to the next `"`; otherwise to the end of
/// the line. Trailing whitespace is trimmed and empty values are rejected.
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
        return None;
    }

    let key_end = line
        .find(|c: char| c == '=' || c.is_whitespace())
        .unwrap_or(line.len());
    let (key, rest) = line.split_at(key_end);
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();

    let value = match rest.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or(quoted),
        None => rest,
    };
    let value = value.trim_end();

    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

fn substitute(template: &str, file_path: &Path) -> String {
    let dir = file_path
        .parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    template
        .replace("{file}", &file_path.display().to_string())
        .replace("{dir}", &dir)
}

/// Default command template for `language`.
pub fn default_command(language: Language) -> String {
    match language {
        Language::Python => r#"python "{file}""#.to_string(),
        Language::JavaScript => r#"node "{file}""#.to_string(),
        Language::Go => r#"go run "{file}""#.to_string(),
        Language::C => compile_and_run("cc", "-O2"),
        Language::Rust => compile_and_run("rustc", "-O"),
        Language::Shell => r#"sh "{file}""#.to_string(),
        Language::Lua => r#"lua "{file}""#.to_string(),
        _ => r#""{file}""#.to_string(),
    }
}

fn compile_and_run(compiler: &str, opt: &str) -> String {
    let binary = std::env::temp_dir().join(format!(
        "gapline_run{}",
        std::env::consts::EXE_SUFFIX
    ));
    let binary = binary.display();
    format!(r#"{compiler} "{{file}}" {opt} -o "{binary}" && "{binary}""#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_run_section() {
        let text = "\
# project settings
[build]
cmd = make

[RUN]
; comment
CMD = \"python3 -u {file}\"  trailing
other = x
";
        assert_eq!(parse_run_command(text), Some("python3 -u {file}".to_string()));
    }

    #[test]
    fn test_parse_unquoted_value_is_trimmed() {
        assert_eq!(
            parse_run_command("[run]\ncmd=./a.out --fast   \r\n"),
            Some("./a.out --fast".to_string())
        );
    }

    #[test]
    fn test_parse_requires_run_section_and_value() {
        assert_eq!(parse_run_command("cmd = top level"), None);
        assert_eq!(parse_run_command("[run]\ncmd =   \n"), None);
        assert_eq!(parse_run_command("[run]\ncmd \"no equals\""), None);
        assert_eq!(parse_run_command("[other]\ncmd = x"), None);
    }

    #[test]
    fn test_last_cmd_wins() {
        assert_eq!(
            parse_run_command("[run]\ncmd = a\ncmd = b\n"),
            Some("b".to_string())
        );
    }

    #[test]
    fn test_config_path_uses_file_extension() {
        assert_eq!(
            config_path(Path::new("/src/main.py")),
            Some(PathBuf::from("/src/build.py"))
        );
        assert_eq!(config_path(Path::new("/src/Makefile")), None);
    }

    #[test]
    fn test_resolve_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.py");
        fs::write(dir.path().join("build.py"), "[run]\ncmd = run {file} in {dir}\n").unwrap();

        let config = RunConfig::resolve(&file, Language::Python).unwrap();
        assert_eq!(
            config.command,
            format!("run {} in {}", file.display(), dir.path().display())
        );
        assert_eq!(config.working_dir.as_deref(), Some(dir.path()));
        assert_eq!(config.source, RunSource::ConfigFile(dir.path().join("build.py")));
    }

    #[test]
    fn test_resolve_falls_back_to_language_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.js");

        let config = RunConfig::resolve(&file, Language::JavaScript).unwrap();
        assert_eq!(config.command, format!("node \"{}\"", file.display()));
        assert_eq!(config.source, RunSource::LanguageDefault);
    }

    #[test]
    fn test_oversized_config_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tool.lua");
        let mut text = String::from("[run]\ncmd = custom\n");
        text.push_str(&"#".repeat(MAX_CONFIG_BYTES as usize));
        fs::write(dir.path().join("build.lua"), text).unwrap();

        let config = RunConfig::resolve(&file, Language::Lua).unwrap();
        assert_eq!(config.source, RunSource::LanguageDefault);
        assert!(config.command.starts_with("lua "));
    }

    #[test]
    fn test_compiled_languages_build_then_run() {
        let cmd = default_command(Language::C);
        assert!(cmd.starts_with(r#"cc "{file}" -O2 -o "#));
        assert!(cmd.contains(" && "));
        assert!(default_command(Language::Rust).starts_with("rustc "));
        assert_eq!(default_command(Language::Markdown), r#""{file}""#);
    }
}
