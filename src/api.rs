//! High-level API for fwstamp operations

use crate::defaults::{
    DEFAULT_BASE_PATH, DEFAULT_FLAGS_REPO_ROOT, DEFAULT_HEADER_FILE, DEFAULT_LABEL,
    DEFAULT_RENAME_REPO_ROOT,
};
use crate::describe::{Descriptor, resolve_descriptor};
use crate::exceptions::Result;
use crate::flags::{self, BuildConfig};
use crate::header::{read_version_fragments, version_stem};
use crate::renamer::{self, RenamedArtifact, Variant};
use crate::utils::resolve_env_name;
use chrono::{Local, NaiveDate};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

/// Options for injecting the version flags
#[derive(Debug, Clone)]
pub struct FlagOptions {
    /// Repository root to describe
    pub repo_root: PathBuf,
    /// Build environment name; resolved from the environment when `None`
    pub env_name: Option<String>,
}

impl Default for FlagOptions {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from(DEFAULT_FLAGS_REPO_ROOT),
            env_name: None,
        }
    }
}

/// Options for renaming build artifacts
#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Project directory containing the header and `.pio/build`
    pub base_path: PathBuf,
    /// Version header, relative to `base_path`
    pub header_file: PathBuf,
    /// Repository root to describe
    pub repo_root: PathBuf,
    /// Project label placed after the date stamp
    pub label: String,
    /// Date stamp; today (local time) when `None`
    pub date: Option<NaiveDate>,
    /// Variants to rename, in order
    pub variants: Vec<Variant>,
    /// Compute names only, leave the filesystem alone
    pub dry_run: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            header_file: PathBuf::from(DEFAULT_HEADER_FILE),
            repo_root: PathBuf::from(DEFAULT_RENAME_REPO_ROOT),
            label: DEFAULT_LABEL.to_string(),
            date: None,
            variants: Variant::defaults(),
            dry_run: false,
        }
    }
}

/// Result of an artifact rename run
#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    pub stem: String,
    pub descriptor: Descriptor,
    pub dry_run: bool,
    pub artifacts: Vec<RenamedArtifact>,
}

/// Build a configuration carrying the firmware specifier flag
pub fn inject_version_flags(options: FlagOptions) -> BuildConfig {
    let mut config = BuildConfig::new(resolve_env_name(options.env_name));
    flags::inject(&mut config, &options.repo_root);
    config
}

/// Rename the build artifacts into the versioned output directory
///
/// The header is read before anything on disk changes, so a bad header leaves
/// the build tree untouched.
pub fn rename_versioned_artifacts(options: RenameOptions) -> Result<RenameReport> {
    let header_path = options.base_path.join(&options.header_file);
    let fragments = read_version_fragments(&header_path)?;

    let date = options.date.unwrap_or_else(|| Local::now().date_naive());
    let stem = version_stem(date, &options.label, &fragments);
    let descriptor = resolve_descriptor(&options.repo_root);
    info!("🏷️ Version stem {} ({})", stem, descriptor);

    let artifacts = if options.dry_run {
        renamer::plan_renames(&options.base_path, &stem, &descriptor, &options.variants)
    } else {
        renamer::rename_artifacts(&options.base_path, &stem, &descriptor, &options.variants)?
    };

    Ok(RenameReport {
        stem,
        descriptor,
        dry_run: options.dry_run,
        artifacts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exceptions::FwstampError;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("defines.h"),
            "#define VERSION_MAJOR       0\n#define VERSION_MINOR       8\n#define VERSION_PATCH       36\n",
        )
        .unwrap();
        for variant in Variant::defaults() {
            let path = temp_dir.path().join(&variant.source);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"firmware").unwrap();
        }
        temp_dir
    }

    fn options(base: &TempDir) -> RenameOptions {
        RenameOptions {
            base_path: base.path().to_path_buf(),
            repo_root: base.path().to_path_buf(),
            date: NaiveDate::from_ymd_opt(2024, 3, 7),
            ..RenameOptions::default()
        }
    }

    #[test]
    fn test_inject_version_flags_explicit_env() {
        let temp_dir = TempDir::new().unwrap();
        let config = inject_version_flags(FlagOptions {
            repo_root: temp_dir.path().to_path_buf(),
            env_name: Some("esp8266-release".to_string()),
        });
        assert_eq!(config.env_name, "esp8266-release");
        assert_eq!(
            config.flags_line(),
            r#"-D AUTO_GIT_HASH=\"0000000\" -DENV_NAME=\"esp8266-release\""#
        );
    }

    #[test]
    fn test_rename_with_fallback_descriptor() {
        let base = project();
        let report = rename_versioned_artifacts(options(&base)).unwrap();

        assert_eq!(report.stem, "240307_ahoy_0.8.36");
        assert!(report.descriptor.is_fallback());
        assert!(
            base.path()
                .join(".pio/build/out/240307_ahoy_0.8.36_esp8266_debug_g0000000.bin")
                .exists()
        );
    }

    #[test]
    fn test_dry_run_leaves_tree_untouched() {
        let base = project();
        let report = rename_versioned_artifacts(RenameOptions {
            dry_run: true,
            ..options(&base)
        })
        .unwrap();

        assert_eq!(report.artifacts.len(), 2);
        assert!(!base.path().join(".pio/build/out").exists());
        assert!(report.artifacts.iter().all(|a| a.source.exists()));
    }

    #[test]
    fn test_missing_header_changes_nothing() {
        let base = project();
        fs::remove_file(base.path().join("defines.h")).unwrap();

        let err = rename_versioned_artifacts(options(&base)).unwrap_err();
        assert!(matches!(err, FwstampError::HeaderRead { .. }));
        assert!(!base.path().join(".pio/build/out").exists());
    }

    #[test]
    fn test_report_serializes() {
        let base = project();
        let report = rename_versioned_artifacts(RenameOptions {
            dry_run: true,
            ..options(&base)
        })
        .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stem"], "240307_ahoy_0.8.36");
        assert_eq!(json["descriptor"]["raw"], "g0000000");
        assert_eq!(json["descriptor"]["fallback"], "not_a_repository");
    }
}
