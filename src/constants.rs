//! # Logging Constants
//!
//! Defaults and fixed formats shared by the configuration, the initializer and
//! the file channel. The line pattern and archive format are part of the
//! on-disk contract: log shippers and the support tooling parse them.

use crate::severity::Severity;

/// Default number of days archived log files are kept
pub const DEFAULT_NUM_LOG_DAYS: u32 = 7;

/// Default threshold for a configured component logger (everything enabled)
pub const DEFAULT_LOG_SEVERITY: Severity = Severity::Trace;

/// Threshold of a logger that was looked up but never configured
pub const UNCONFIGURED_LOG_SEVERITY: Severity = Severity::Information;

/// `YYYY-MM-DD HH:MM:SS <Severity>\t\t<text>\n`, in local time
pub const LINE_PATTERN: &str = "%Y-%m-%d %H:%M:%S %p\t\t%t\n";

/// Extension of the active log file, `<component>.log`
pub const LOG_FILE_EXTENSION: &str = "log";

/// Suffix appended to archived log files: `<component>.log.20240601235959123`
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S%3f";

/// Leading part of [`ARCHIVE_TIMESTAMP_FORMAT`] read back when purging
pub const ARCHIVE_TIMESTAMP_PARSE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Directory under the platform data directory used when no log directory is configured
pub const DEFAULT_LOG_SUBDIR: &str = "rtsp-server/logs";

/// Fallback log directory when the platform data directory is unknown
pub const FALLBACK_LOG_DIR: &str = "./logs";
