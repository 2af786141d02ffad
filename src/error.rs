//! Domain-specific error types for the provisioning engine.
//!
//! Internal modules return typed errors (e.g. [`PlatformError`],
//! [`FetchError`]) while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ProvisionError              — aborts the run
//! ├── Config(ConfigError)     — TOML parsing, proxy settings
//! └── Platform(PlatformError) — privilege check, host profile detection
//!
//! FetchError                  — HTTP status, redirect budget, transport
//! ResourceError               — backups, external commands
//! TaskError                   — per-step failure accounting
//! ```
//!
//! Only the privilege check and configuration loading abort a run. The
//! remaining errors travel inside [`anyhow::Error`] to the task that hit
//! them, which is recorded as failed while the pipeline moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the provisioning engine.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Host platform error.
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors that arise from loading the TOML configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unexpected fields.
    #[error("Invalid TOML in {}: {message}", .path.display())]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The configured HTTP proxy URL cannot be used.
    #[error("Invalid proxy '{url}': {message}")]
    InvalidProxy {
        /// Proxy URL as given.
        url: String,
        /// Reason reported by the HTTP client.
        message: String,
    },

    /// `$HOME` is required to expand `~/` paths.
    #[error("HOME environment variable is not set")]
    MissingHome,
}

/// Errors that arise from host inspection.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The process is not running with superuser privilege.
    #[error("Needs to run this as root!")]
    PrivilegeRequired,

    /// The requested distribution is not one of `debian`, `centos`.
    #[error("The OS '{0}' does not have support yet")]
    UnsupportedDistro(String),

    /// The version file does not name a supported release.
    #[error("The {distro} version '{version}' does not have support yet")]
    UnsupportedVersion {
        /// Distribution whose version file was read.
        distro: String,
        /// Raw version string (trimmed file contents or extracted number).
        version: String,
    },

    /// The distribution's version file does not exist.
    #[error("The version file {} does not exist", .0.display())]
    MissingVersionFile(PathBuf),

    /// The version file exists but could not be read as text.
    #[error("Could not read the version file {}: {source}", .path.display())]
    UnreadableVersionFile {
        /// Path to the version file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from downloading a remote template.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-2xx, non-redirect status.
    #[error("{url} answered HTTP {status}")]
    Status {
        /// URL of the final request.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The redirect budget was exhausted.
    #[error("{url}: more than {limit} redirects")]
    TooManyRedirects {
        /// URL originally requested.
        url: String,
        /// Maximum number of redirects followed.
        limit: u32,
    },

    /// A redirect response carried no usable `Location` header.
    #[error("{url} answered HTTP {status} without a Location header")]
    MissingLocation {
        /// URL of the redirecting request.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Connection, TLS or protocol failure.
    #[error("{url}: {message}")]
    Transport {
        /// URL of the failing request.
        url: String,
        /// Error reported by the HTTP client.
        message: String,
    },
}

/// Errors that arise from resource operations (backups, commands).
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A command invoked by a resource failed with a non-zero exit code.
    #[error("command '{program}' failed (exit {exit_code}): {stderr}")]
    ExecutionFailed {
        /// Name of the program that was invoked.
        program: String,
        /// Exit code returned by the process.
        exit_code: i32,
        /// Captured standard error output.
        stderr: String,
    },

    /// A required file or directory was not found.
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// A filesystem operation on a resource failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted (e.g. `"backing up"`).
        action: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise during task execution.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Some of the steps making up a task failed.
    #[error("{failed} of {total} steps failed")]
    StepsFailed {
        /// Number of failed steps.
        failed: u32,
        /// Number of steps attempted.
        total: u32,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_error_io_display() {
        let e = ConfigError::Io {
            path: PathBuf::from("/etc/easy-debian.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/etc/easy-debian.toml"));
        assert!(e.to_string().contains("IO error reading config file"));
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("/etc/easy-debian.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn platform_error_display() {
        assert_eq!(
            PlatformError::PrivilegeRequired.to_string(),
            "Needs to run this as root!"
        );
        assert_eq!(
            PlatformError::UnsupportedDistro("arch".to_string()).to_string(),
            "The OS 'arch' does not have support yet"
        );
        let e = PlatformError::UnsupportedVersion {
            distro: "debian".to_string(),
            version: "9".to_string(),
        };
        assert_eq!(e.to_string(), "The debian version '9' does not have support yet");
        let e = PlatformError::MissingVersionFile(PathBuf::from("/etc/debian_version"));
        assert_eq!(
            e.to_string(),
            "The version file /etc/debian_version does not exist"
        );
        let e = PlatformError::UnreadableVersionFile {
            path: PathBuf::from("/etc/debian_version"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            e.to_string(),
            "Could not read the version file /etc/debian_version: denied"
        );
    }

    #[test]
    fn fetch_error_display() {
        let e = FetchError::Status {
            url: "https://example.com/vimrc".to_string(),
            status: 404,
        };
        assert_eq!(e.to_string(), "https://example.com/vimrc answered HTTP 404");
        let e = FetchError::TooManyRedirects {
            url: "https://example.com/loop".to_string(),
            limit: 10,
        };
        assert_eq!(e.to_string(), "https://example.com/loop: more than 10 redirects");
    }

    #[test]
    fn resource_error_io_display() {
        let e = ResourceError::Io {
            action: "backing up",
            path: PathBuf::from("/etc/apt/sources.list"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(e.to_string(), "backing up /etc/apt/sources.list: denied");
    }

    #[test]
    fn task_error_display() {
        let e = TaskError::StepsFailed {
            failed: 1,
            total: 4,
        };
        assert_eq!(e.to_string(), "1 of 4 steps failed");
    }

    #[test]
    fn provision_error_from_sub_errors() {
        let e: ProvisionError = PlatformError::PrivilegeRequired.into();
        assert!(e.to_string().contains("Platform error"));
        let e: ProvisionError = ConfigError::MissingHome.into();
        assert!(e.to_string().contains("Configuration error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ProvisionError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<PlatformError>();
        assert_send_sync::<FetchError>();
        assert_send_sync::<ResourceError>();
        assert_send_sync::<TaskError>();
    }

    #[test]
    fn platform_error_converts_to_anyhow() {
        let _anyhow_err: anyhow::Error = PlatformError::PrivilegeRequired.into();
    }
}
