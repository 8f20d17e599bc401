use crate::cli::context::Context;
use crate::core::errors::Result;
use crate::core::models::keystore::KeystoreName;

/// Execute the `devca describe` command.
///
/// Prints keytool's verbose listing untouched so it can be piped.
pub fn execute(ctx: &Context, name: &KeystoreName) -> Result<()> {
    let description = ctx.keystores.describe(name)?;
    print!("{description}");
    Ok(())
}
