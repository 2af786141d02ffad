//! Provisioning settings: built-in defaults with an optional TOML override.
pub mod packages;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use packages::PackageTable;

/// Location every template is fetched from by default.
pub const TEMPLATE_BASE_URL: &str = "https://raw.githubusercontent.com/douglas-dksh/easy-debian/master/";

/// Placeholder in repository URLs replaced by the detected codename.
pub const CODENAME_PLACEHOLDER: &str = "{codename}";

fn template(name: &str) -> String {
    format!("{TEMPLATE_BASE_URL}{name}")
}

/// A file fetched over HTTP and written to a local path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteFile {
    /// Source URL.
    pub url: String,
    /// Destination on the host.
    pub path: PathBuf,
}

impl RemoteFile {
    fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }

    /// Copy of this entry with `{codename}` in the URL replaced.
    #[must_use]
    pub fn for_codename(&self, codename: &str) -> Self {
        Self {
            url: self.url.replace(CODENAME_PLACEHOLDER, codename),
            path: self.path.clone(),
        }
    }
}

/// GPG keys imported into the apt trust store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyringConfig {
    /// Keyserver passed to `gpg --keyserver`.
    pub server: String,
    /// Key ids, received in order.
    pub keys: Vec<String>,
    /// Keyring handed to `apt-key add` once the keys are imported.
    pub pubring: PathBuf,
}

impl Default for KeyringConfig {
    fn default() -> Self {
        Self {
            server: "pgpkeys.mit.edu".to_string(),
            keys: ["1F41B907", "A2098A6E", "65558117"]
                .map(String::from)
                .to_vec(),
            pubring: PathBuf::from("~/.gnupg/pubring.gpg"),
        }
    }
}

/// Crontab template and where the previous crontab is saved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrontabConfig {
    /// Template URL.
    pub url: String,
    /// Where the template is written before `crontab` loads it.
    pub path: PathBuf,
    /// File receiving the output of `crontab -l`.
    pub backup: PathBuf,
}

impl Default for CrontabConfig {
    fn default() -> Self {
        Self {
            url: template("crontab"),
            path: PathBuf::from("/tmp/crontab"),
            backup: PathBuf::from("~/crontab.bkp"),
        }
    }
}

impl CrontabConfig {
    /// The template download as a [`RemoteFile`].
    #[must_use]
    pub fn template(&self) -> RemoteFile {
        RemoteFile::new(self.url.clone(), self.path.clone())
    }
}

/// Git repository cloned locally and copied into a system directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirmwareConfig {
    /// Repository to clone; empty disables the task.
    pub url: String,
    /// Local clone directory, backed up before each clone.
    pub path: PathBuf,
    /// Destination of the copy; empty disables it. A trailing `/` is kept
    /// as given.
    pub copy_to: String,
    /// Name used in log messages.
    pub label: String,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            url: "git://git.kernel.org/pub/scm/linux/kernel/git/firmware/linux-firmware.git"
                .to_string(),
            path: PathBuf::from("/usr/src/firmware"),
            copy_to: "/lib/firmware/".to_string(),
            label: "Kernel Firmwares".to_string(),
        }
    }
}

/// All provisioning settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Distribution name used for host detection.
    pub distro: String,
    /// Directory holding the distribution version files.
    pub etc_dir: PathBuf,
    /// Pause after package-manager calls and key imports.
    pub settle_secs: u64,
    /// HTTP proxy for template downloads.
    pub proxy: Option<String>,
    /// Signing keys to import.
    pub keyring: KeyringConfig,
    /// Repository list; `{codename}` in the URL is substituted.
    pub repositories: RemoteFile,
    /// Dotfiles downloaded into the home directory.
    pub dotfiles: Vec<RemoteFile>,
    /// Crontab template and backup location.
    pub crontab: CrontabConfig,
    /// Firmware repository clone and copy.
    pub firmware: FirmwareConfig,
    /// Files converted with `dos2unix`.
    pub normalize: Vec<PathBuf>,
    /// Package sets per release codename.
    pub packages: PackageTable,
}

impl Default for Config {
    fn default() -> Self {
        let dotfiles = vec![
            RemoteFile::new(template("vimrc"), "~/.vimrc"),
            RemoteFile::new(template("bashrc_root"), "~/.bashrc"),
            RemoteFile::new(template("bashrc_common"), "/etc/skel/.bashrc"),
        ];
        let normalize = dotfiles.iter().map(|f| f.path.clone()).collect();
        Self {
            distro: "debian".to_string(),
            etc_dir: PathBuf::from("/etc"),
            settle_secs: 2,
            proxy: None,
            keyring: KeyringConfig::default(),
            repositories: RemoteFile::new(
                template("sources-{codename}.list"),
                "/etc/apt/sources.list",
            ),
            dotfiles,
            crontab: CrontabConfig::default(),
            firmware: FirmwareConfig::default(),
            normalize,
            packages: PackageTable::default(),
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// Without a path the built-in defaults are used; with one, the TOML file
    /// overrides any field it names. Paths starting with `~/` are expanded
    /// against `home` afterwards.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>, home: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = match path {
            Some(p) => toml_loader::load_config(p)?,
            None => Self::default(),
        };
        config.expand_home(home);
        Ok(config)
    }

    fn expand_home(&mut self, home: &Path) {
        let expand = |p: &mut PathBuf| *p = expand_tilde(p, home);
        expand(&mut self.keyring.pubring);
        expand(&mut self.repositories.path);
        self.dotfiles.iter_mut().for_each(|f| expand(&mut f.path));
        expand(&mut self.crontab.path);
        expand(&mut self.crontab.backup);
        expand(&mut self.firmware.path);
        self.normalize.iter_mut().for_each(expand);
    }
}

/// Replace a leading `~/` with `home`.
#[must_use]
pub fn expand_tilde(path: &Path, home: &Path) -> PathBuf {
    path.strip_prefix("~")
        .map_or_else(|_| path.to_path_buf(), |rest| home.join(rest))
}
