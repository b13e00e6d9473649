//! Versioned renaming of build artifacts

use crate::defaults::{ARTIFACT_EXTENSION, DEFAULT_VARIANTS, OUTPUT_DIR};
use crate::describe::Descriptor;
use crate::exceptions::{FwstampError, Result};
use crate::utils::split_key_value;
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A build variant and the artifact it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// Label used in the output filename (e.g. `esp8266_debug`)
    pub label: String,
    /// Artifact path relative to the base path
    pub source: PathBuf,
}

impl Variant {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(label: S, source: P) -> Self {
        Self {
            label: label.into(),
            source: source.into(),
        }
    }

    /// The debug and release ESP8266 builds
    pub fn defaults() -> Vec<Variant> {
        DEFAULT_VARIANTS
            .iter()
            .map(|(label, source)| Variant::new(*label, *source))
            .collect()
    }
}

impl FromStr for Variant {
    type Err = FwstampError;

    /// Parse `<label>=<relative artifact path>`
    fn from_str(spec: &str) -> Result<Self> {
        let (label, source) = split_key_value(spec).ok_or_else(|| {
            FwstampError::invalid_argument(format!(
                "variant must look like <label>=<path>, got {spec:?}"
            ))
        })?;
        Ok(Variant::new(label, source))
    }
}

/// One planned or completed rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedArtifact {
    pub variant: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Output directory for versioned artifacts under `base`
pub fn output_dir(base: &Path) -> PathBuf {
    base.join(OUTPUT_DIR)
}

/// `<stem>_<variant>_<descriptor>.bin`
pub fn output_file_name(stem: &str, variant: &Variant, descriptor: &Descriptor) -> String {
    format!(
        "{}_{}_{}.{}",
        stem, variant.label, descriptor, ARTIFACT_EXTENSION
    )
}

/// Compute source and destination for every variant without touching disk
pub fn plan_renames(
    base: &Path,
    stem: &str,
    descriptor: &Descriptor,
    variants: &[Variant],
) -> Vec<RenamedArtifact> {
    let out_dir = output_dir(base);
    variants
        .iter()
        .map(|variant| RenamedArtifact {
            variant: variant.label.clone(),
            source: base.join(&variant.source),
            destination: out_dir.join(output_file_name(stem, variant, descriptor)),
        })
        .collect()
}

/// Create the output directory and move each variant's artifact into it
///
/// The directory must not exist yet. Renames run in variant order and stop at
/// the first failure; completed renames are left in place.
pub fn rename_artifacts(
    base: &Path,
    stem: &str,
    descriptor: &Descriptor,
    variants: &[Variant],
) -> Result<Vec<RenamedArtifact>> {
    let out_dir = output_dir(base);

    debug!("📁 Creating output directory: {:?}", out_dir);
    fs::create_dir(&out_dir).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => FwstampError::OutputDirExists(out_dir.clone()),
        _ => FwstampError::IoError(e),
    })?;

    let plan = plan_renames(base, stem, descriptor, variants);
    for artifact in &plan {
        if !artifact.source.is_file() {
            return Err(FwstampError::MissingArtifact(artifact.source.clone()));
        }
        fs::rename(&artifact.source, &artifact.destination)?;
        info!(
            "📦 {} -> {}",
            artifact.source.display(),
            artifact.destination.display()
        );
    }

    Ok(plan)
}
