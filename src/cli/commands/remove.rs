use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::keystore::KeystoreName;

/// Execute the `devca rm` command. Removing a missing keystore succeeds.
pub fn execute_rm(ctx: &Context, name: &KeystoreName) -> Result<()> {
    let existed = ctx.keystores.exists(name);
    ctx.keystores.remove(name)?;

    if existed {
        output::success(&format!("Removed keystore '{name}'"));
    } else {
        output::warning(&format!("Keystore '{name}' does not exist, nothing to remove"));
    }
    Ok(())
}

/// Execute the `devca nuke` command.
pub fn execute_nuke(ctx: &Context) -> Result<()> {
    let removed = ctx.keystores.nuke()?;

    if removed.is_empty() {
        output::warning(&format!("No keystores in {}", ctx.root().display()));
        return Ok(());
    }

    output::header(&format!("Keystores in {}", ctx.root().display()));
    output::success(&format!("Removed {} keystore(s)", removed.len()));
    for name in &removed {
        output::detail(name.as_str());
    }
    Ok(())
}
