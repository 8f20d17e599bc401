use crate::cli::context::Context;
use crate::core::errors::Result;

/// Execute the `devca ls` command: one name per line, or a JSON array.
pub fn execute(ctx: &Context, json: bool) -> Result<()> {
    let names = ctx.keystores.list()?;

    if json {
        println!("{}", serde_json::to_string(&names)?);
        return Ok(());
    }

    for name in &names {
        println!("{name}");
    }
    Ok(())
}
