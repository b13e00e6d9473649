// Centralized default values for the flag injector and the artifact renamer

// =================================
// Repository descriptor defaults
// =================================
pub const FALLBACK_DESCRIPTOR: &str = "g0000000"; // Used whenever describe fails
pub const DESCRIBE_ABBREV: usize = 7; // Abbreviated hash length
pub const UNTAGGED_PREFIX: &str = "g"; // Prefix for hash-only descriptors

// =================================
// Build flag defaults
// =================================
pub const GIT_HASH_DEFINE: &str = "AUTO_GIT_HASH";
pub const ENV_NAME_DEFINE: &str = "ENV_NAME";
pub const UNKNOWN_ENV_NAME: &str = "unknown";
pub const DEFAULT_FLAGS_REPO_ROOT: &str = "..";

// =================================
// Version header defaults
// =================================
pub const DEFAULT_HEADER_FILE: &str = "defines.h";
pub const VERSION_LINE_MARKER: &str = "VERSION_";
pub const COMPONENT_MARKERS: [&str; 3] = ["_MAJOR", "_MINOR", "_PATCH"];
pub const MARKER_VALUE_OFFSET: usize = 13; // Marker plus column padding
pub const VERSION_SEPARATOR: &str = ".";

// =================================
// Artifact naming defaults
// =================================
pub const DATE_STAMP_FORMAT: &str = "%y%m%d";
pub const DEFAULT_LABEL: &str = "ahoy";
pub const DEFAULT_BASE_PATH: &str = "../";
pub const DEFAULT_RENAME_REPO_ROOT: &str = "../../";
pub const OUTPUT_DIR: &str = ".pio/build/out";
pub const ARTIFACT_EXTENSION: &str = "bin";
pub const DEFAULT_VARIANTS: [(&str, &str); 2] = [
    ("esp8266_debug", ".pio/build/esp8266-debug/firmware.bin"),
    ("esp8266_release", ".pio/build/esp8266-release/firmware.bin"),
];

// =================================
// Environment variables
// =================================
pub const ENV_LOG_LEVEL: &str = "FWSTAMP_LOG_LEVEL";
pub const ENV_LOG_PATH: &str = "FWSTAMP_LOG_PATH";
pub const ENV_ENV_NAME: &str = "FWSTAMP_ENV_NAME";
pub const ENV_PIOENV: &str = "PIOENV";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
