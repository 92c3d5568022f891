//! SSH command: guided setup or quick repair.

use anyhow::Result;

use super::{GlobalArgs, Session};
use crate::application::{Git, SshManager};

pub fn cmd_ssh(quick: bool, globals: GlobalArgs) -> Result<()> {
    let session = Session::open(std::path::Path::new("."), globals)?;
    let services = session.services();
    let ssh = SshManager::for_home(services);

    let ok = if quick {
        ssh.quick_fix()
    } else {
        let git = Git::new(services, &session.root);
        ssh.setup_wizard(git.is_repository().then_some(&git))
    };

    if !ok {
        anyhow::bail!("SSH is not set up yet; see the steps above");
    }
    Ok(())
}
