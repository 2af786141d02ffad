//! Unattended first-boot provisioning for Debian hosts.
//!
//! Configures a freshly installed machine in one fixed, ordered pass:
//! repository list, GPG keyrings, base and tool packages, dotfiles, crontab,
//! line-ending normalisation and kernel firmware. Every step is idempotent
//! and backs up whatever it overwrites to a `.bkp` sibling, so rerunning the
//! binary is the recovery path for any failure.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — embedded defaults and optional TOML overrides
//! - **[`resources`]** — backup-then-write files, HTTP fetches and command plans
//! - **[`tasks`]** — the named pipeline steps wired to resources
//! - **[`commands`]** — top-level subcommand orchestration (`provision`, `detect`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod fetch;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod tasks;
