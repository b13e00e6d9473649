//! Compiler flag injection
//!
//! Builds the `AUTO_GIT_HASH` / `ENV_NAME` defines the firmware uses to report
//! its revision, and appends them to a [`BuildConfig`].

use crate::defaults::{ENV_NAME_DEFINE, GIT_HASH_DEFINE};
use crate::describe::{Descriptor, resolve_descriptor};
use log::info;
use serde::Serialize;
use std::path::Path;

/// The slice of build-tool configuration these helpers touch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    /// Name of the active build environment (e.g. `esp8266-release`)
    pub env_name: String,
    /// Flags handed to the compiler, in append order
    pub build_flags: Vec<String>,
}

impl BuildConfig {
    pub fn new<S: Into<String>>(env_name: S) -> Self {
        Self {
            env_name: env_name.into(),
            build_flags: Vec::new(),
        }
    }

    /// Flags joined the way a build tool reads them from a command's stdout
    pub fn flags_line(&self) -> String {
        self.build_flags.concat().trim_end().to_string()
    }
}

/// Escape a value for use inside a `\"...\"` quoted define
///
/// The value passes two unescaping layers: the build tool's shell-style
/// splitting, then the C string literal. `"` becomes `\\\"` and `\` becomes
/// `\\\\`.
pub fn escape_define_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str(r#"\\\""#),
            '\\' => escaped.push_str(r"\\\\"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format the firmware specifier flag for a descriptor and environment
///
/// `-D AUTO_GIT_HASH=\"<hash>\" -DENV_NAME=\"<env>\" `, quotes escaped for the
/// build tool's command line, descriptor with its leading character dropped.
pub fn firmware_specifier_flag(descriptor: &Descriptor, env_name: &str) -> String {
    format!(
        "-D {}=\\\"{}\\\" -D{}=\\\"{}\\\" ",
        GIT_HASH_DEFINE,
        escape_define_value(descriptor.stripped()),
        ENV_NAME_DEFINE,
        escape_define_value(env_name),
    )
}

/// Resolve the descriptor for `repo_root` and append its flag to `config`
///
/// Never fails: an undescribable repository yields the fallback descriptor.
pub fn inject(config: &mut BuildConfig, repo_root: &Path) -> Descriptor {
    let descriptor = resolve_descriptor(repo_root);

    eprintln!("Firmware Revision: {}", descriptor);
    info!(
        "🔖 Firmware revision {} for environment {}",
        descriptor, config.env_name
    );

    let flag = firmware_specifier_flag(&descriptor, &config.env_name);
    config.build_flags.push(flag);
    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::FallbackReason;
    use tempfile::TempDir;

    #[test]
    fn test_flag_format() {
        let descriptor = Descriptor::new("v0.8.1-3-g1a2b3c4");
        assert_eq!(
            firmware_specifier_flag(&descriptor, "esp8266-release"),
            r#"-D AUTO_GIT_HASH=\"0.8.1-3-g1a2b3c4\" -DENV_NAME=\"esp8266-release\" "#
        );
    }

    #[test]
    fn test_fallback_flag_format() {
        let descriptor = Descriptor::fallback(FallbackReason::GitUnavailable);
        assert_eq!(
            firmware_specifier_flag(&descriptor, "generic"),
            r#"-D AUTO_GIT_HASH=\"0000000\" -DENV_NAME=\"generic\" "#
        );
    }

    /// Unquoted shell-style word splitting: whitespace separates, `\` escapes
    fn shell_split(line: &str) -> Vec<String> {
        let mut words = Vec::new();
        let mut word = String::new();
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => word.extend(chars.next()),
                c if c.is_whitespace() => {
                    if !word.is_empty() {
                        words.push(std::mem::take(&mut word));
                    }
                }
                c => word.push(c),
            }
        }
        if !word.is_empty() {
            words.push(word);
        }
        words
    }

    #[test]
    fn test_escape_define_value() {
        assert_eq!(escape_define_value("1a2b3c4"), "1a2b3c4");
        assert_eq!(escape_define_value(r#"a"b"#), r#"a\\\"b"#);
        assert_eq!(escape_define_value(r"a\b"), r"a\\\\b");
    }

    #[test]
    fn test_quoted_env_name_survives_shell_splitting() {
        let flag = firmware_specifier_flag(&Descriptor::new("vx"), r#"a"b"#);
        let words = shell_split(&flag);
        assert_eq!(
            words,
            vec![
                "-D".to_string(),
                r#"AUTO_GIT_HASH="x""#.to_string(),
                r#"-DENV_NAME="a\"b""#.to_string(),
            ]
        );
    }

    #[test]
    fn test_backslash_env_name_survives_shell_splitting() {
        let flag = firmware_specifier_flag(&Descriptor::new("vx"), r"a\b");
        let words = shell_split(&flag);
        assert_eq!(words[2], r#"-DENV_NAME="a\\b""#);
    }

    #[test]
    fn test_inject_appends_to_existing_flags() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = BuildConfig::new("esp32");
        config.build_flags.push("-Os ".to_string());

        let descriptor = inject(&mut config, temp_dir.path());

        assert!(descriptor.is_fallback());
        assert_eq!(config.build_flags.len(), 2);
        assert_eq!(config.build_flags[0], "-Os ");
        assert_eq!(
            config.build_flags[1],
            r#"-D AUTO_GIT_HASH=\"0000000\" -DENV_NAME=\"esp32\" "#
        );
    }

    #[test]
    fn test_flags_line() {
        let mut config = BuildConfig::new("esp32");
        config.build_flags.push("-Os ".to_string());
        config.build_flags.push("-DX=1 ".to_string());
        assert_eq!(config.flags_line(), "-Os -DX=1");
    }
}
