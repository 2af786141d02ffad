//! Host inspection: distribution, release and privilege.
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::PlatformError;
use crate::exec::Executor;

/// Distribution family the host belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distro {
    /// Debian, read from `debian_version`.
    Debian,
    /// CentOS, read from `redhat-release`.
    CentOS,
}

impl Distro {
    /// File under `etc_dir` whose contents carry the release number.
    #[must_use]
    pub fn version_file(self, etc_dir: &Path) -> PathBuf {
        match self {
            Self::Debian => etc_dir.join("debian_version"),
            Self::CentOS => etc_dir.join("redhat-release"),
        }
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debian => write!(f, "debian"),
            Self::CentOS => write!(f, "centos"),
        }
    }
}

impl FromStr for Distro {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debian" => Ok(Self::Debian),
            "centos" => Ok(Self::CentOS),
            _ => Err(PlatformError::UnsupportedDistro(s.to_string())),
        }
    }
}

/// Debian releases with a known repository list and package set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Codename {
    /// Debian 6.
    Squeeze,
    /// Debian 7.
    Wheezy,
    /// Debian 8.
    Jessie,
}

impl Codename {
    /// Every supported release, oldest first.
    pub const ALL: [Self; 3] = [Self::Squeeze, Self::Wheezy, Self::Jessie];

    /// Map a Debian major version to its codename.
    #[must_use]
    pub const fn from_major(major: u32) -> Option<Self> {
        match major {
            6 => Some(Self::Squeeze),
            7 => Some(Self::Wheezy),
            8 => Some(Self::Jessie),
            _ => None,
        }
    }

    /// Lowercase codename as used in repository URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Squeeze => "squeeze",
            Self::Wheezy => "wheezy",
            Self::Jessie => "jessie",
        }
    }
}

impl fmt::Display for Codename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the provisioner knows about the host, fixed for the whole run.
///
/// For Debian the version code is the release codename; for CentOS it is the
/// major release number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    /// Distribution family.
    pub distro: Distro,
    /// Release codename (Debian) or major version (CentOS).
    pub version_code: String,
}

impl HostProfile {
    /// Detect the host profile from the distribution's version file.
    ///
    /// Reads `<etc_dir>/debian_version` (or `<etc_dir>/redhat-release`),
    /// takes the first run of digits as the major version and, for Debian,
    /// maps it to a codename.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::UnsupportedDistro`] if `distro_hint` is not a known distribution
    /// - [`PlatformError::MissingVersionFile`] if the version file does not exist
    /// - [`PlatformError::UnreadableVersionFile`] if it exists but cannot be read as text
    /// - [`PlatformError::UnsupportedVersion`] if no known release matches
    pub fn detect(distro_hint: &str, etc_dir: &Path) -> Result<Self, PlatformError> {
        let distro: Distro = distro_hint.parse()?;
        let file = distro.version_file(etc_dir);
        let contents = std::fs::read_to_string(&file).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PlatformError::MissingVersionFile(file.clone())
            } else {
                PlatformError::UnreadableVersionFile {
                    path: file.clone(),
                    source,
                }
            }
        })?;

        let unsupported = |version: &str| PlatformError::UnsupportedVersion {
            distro: distro.to_string(),
            version: version.to_string(),
        };

        let major = leading_number(&contents).ok_or_else(|| unsupported(contents.trim()))?;
        let version_code = match distro {
            Distro::Debian => major
                .parse::<u32>()
                .ok()
                .and_then(Codename::from_major)
                .ok_or_else(|| unsupported(major))?
                .to_string(),
            Distro::CentOS => major.to_string(),
        };

        Ok(Self {
            distro,
            version_code,
        })
    }

    /// The Debian codename, if this is a supported Debian host.
    #[must_use]
    pub fn codename(&self) -> Option<Codename> {
        if self.distro != Distro::Debian {
            return None;
        }
        Codename::ALL
            .into_iter()
            .find(|c| c.as_str() == self.version_code)
    }
}

impl fmt::Display for HostProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.distro, self.version_code)
    }
}

/// First run of ASCII digits in `s`.
fn leading_number(s: &str) -> Option<&str> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = s.get(start..)?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest.get(..end)
}

/// Fail unless the process runs with an effective uid of 0.
///
/// # Errors
///
/// Returns [`PlatformError::PrivilegeRequired`] when `id -u` reports a
/// non-zero uid or cannot be run.
pub fn ensure_root(executor: &dyn Executor) -> Result<(), PlatformError> {
    match executor.run("id", &["-u"]) {
        Ok(result) if result.stdout.trim() == "0" => Ok(()),
        _ => Err(PlatformError::PrivilegeRequired),
    }
}

/// Release string of the running kernel (`uname -r`).
#[must_use]
pub fn kernel_release(executor: &dyn Executor) -> Option<String> {
    executor
        .run("uname", &["-r"])
        .ok()
        .map(|r| r.stdout.trim().to_string())
        .filter(|s| !s.is_empty())
}
