use crate::cli::IssueArgs;
use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::keystore::KeystoreName;

/// Execute the `devca sign` command on two existing keystores.
pub fn execute(
    ctx: &Context,
    name: &KeystoreName,
    signer: &KeystoreName,
    issue: &IssueArgs,
) -> Result<()> {
    let validity = ctx.validity(issue)?;

    let sp = output::spinner(&format!("Signing '{name}' with '{signer}'..."));
    if let Err(e) = ctx.keystores.sign(name, signer, issue.cn.as_deref(), validity) {
        output::abandon_spinner(sp);
        return Err(e);
    }
    output::finish_spinner(sp, &format!("'{name}' signed by '{signer}', valid for {validity}"));

    Ok(())
}
