use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::keystore::KeystoreName;

/// Execute the `devca trust` command.
pub fn execute(ctx: &Context, name: &KeystoreName, to_trust: &KeystoreName) -> Result<()> {
    ctx.truststores.trust(name, to_trust)?;
    output::success(&format!("'{name}' now trusts '{to_trust}'"));
    Ok(())
}
