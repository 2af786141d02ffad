//! Package sets keyed by Debian codename.
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::platform::Codename;

/// Placeholder replaced by the running kernel release.
pub const KERNEL_PLACEHOLDER: &str = "{kernel}";

const BASE: &[&str] = &[
    "vim",
    "vim-scripts",
    "vim-doc",
    "zip",
    "unzip",
    "rar",
    "p7zip",
    "bzip2",
    "less",
    "links",
    "telnet",
    "locate",
    "openssh-server",
    "sysv-rc-conf",
    "rsync",
    "build-essential",
    "linux-headers-{kernel}",
    "libncurses5-dev",
    "ntpdate",
    "postfix",
    "cmake",
    "sudo",
    "git",
    "makepasswd",
    "debian-archive-keyring",
];

const TOOLS: &[&str] = &[
    "atsar",
    "tcpstat",
    "ifstat",
    "dstat",
    "procinfo",
    "pciutils",
    "dmidecode",
    "htop",
    "nmap",
    "tcpdump",
    "usbutils",
    "strace",
    "ltrace",
    "hdparm",
    "fish",
    "sdparm",
    "atop",
    "iotop",
    "iftop",
    "sntop",
    "powertop",
    "itop",
    "kerneltop",
    "dos2unix",
    "tofrodos",
    "chkconfig",
    "zsh",
    "xz-utils",
    "unrar",
    "libjs-jquery",
    "arp-scan",
];

/// Which of a release's package sets to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageGroup {
    /// System packages, including kernel headers.
    Base,
    /// Everyday command-line tools.
    Tools,
}

impl fmt::Display for PackageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "Base Packages"),
            Self::Tools => write!(f, "Tools Packages"),
        }
    }
}

/// Package sets for one release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageGroups {
    /// Names for [`PackageGroup::Base`].
    pub base: Vec<String>,
    /// Names for [`PackageGroup::Tools`].
    pub tools: Vec<String>,
}

impl PackageGroups {
    /// Names in `group`, in declared order.
    #[must_use]
    pub fn get(&self, group: PackageGroup) -> &[String] {
        match group {
            PackageGroup::Base => &self.base,
            PackageGroup::Tools => &self.tools,
        }
    }
}

/// Codename-keyed package table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PackageTable(BTreeMap<String, PackageGroups>);

impl Default for PackageTable {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(ToString::to_string).collect();
        Self(
            Codename::ALL
                .into_iter()
                .map(|c| {
                    (
                        c.as_str().to_string(),
                        PackageGroups {
                            base: owned(BASE),
                            tools: owned(TOOLS),
                        },
                    )
                })
                .collect(),
        )
    }
}

impl PackageTable {
    /// Package sets for `codename`, if the table has an entry.
    #[must_use]
    pub fn for_codename(&self, codename: &str) -> Option<&PackageGroups> {
        self.0.get(codename)
    }
}

/// Substitute the kernel release into package names.
///
/// Entries carrying the placeholder are dropped when the kernel release is
/// unknown.
#[must_use]
pub fn resolve(names: &[String], kernel: Option<&str>) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| match kernel {
            Some(k) => Some(name.replace(KERNEL_PLACEHOLDER, k)),
            None if name.contains(KERNEL_PLACEHOLDER) => None,
            None => Some(name.clone()),
        })
        .collect()
}
