//! Task: import repository signing keys.
use anyhow::Result;

use super::helpers::StepTally;
use super::{Context, Task, TaskResult};
use crate::platform::Distro;
use crate::resources::keyring;

/// Receive each configured key from the keyserver, then hand the pubring to
/// `apt-key`. Debian only.
#[derive(Debug)]
pub struct ImportKeyrings;

impl Task for ImportKeyrings {
    fn name(&self) -> &'static str {
        "Import keyrings"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.distro.parse::<Distro>().ok() == Some(Distro::Debian)
            && !ctx.config.keyring.keys.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let cfg = &ctx.config.keyring;
        let mut tally = StepTally::default();
        for id in &cfg.keys {
            tally.record(ctx.run_command(&keyring::recv_key(&cfg.server, id)));
        }
        tally.record(ctx.run_command(&keyring::add_pubring(&cfg.pubring)));
        tally.finish(ctx)
    }
}
