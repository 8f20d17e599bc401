use chrono::{TimeDelta, Utc};

use crate::cli::context::Context;
use crate::cli::output;
use crate::cli::{IssueArgs, NewKind};
use crate::core::errors::Result;
use crate::core::models::keystore::KeystoreName;
use crate::core::models::validity::Validity;

/// Execute the `devca new` command.
pub fn execute(ctx: &Context, kind: &NewKind) -> Result<()> {
    match kind {
        NewKind::Root {
            name,
            issue,
            if_absent,
        } => execute_root(ctx, name, issue, *if_absent),
        NewKind::Child {
            name,
            parent,
            issue,
        } => execute_child(ctx, name, parent, issue),
        NewKind::Truststore { name, to_trust } => execute_truststore(ctx, name, to_trust),
    }
}

fn execute_root(ctx: &Context, name: &KeystoreName, issue: &IssueArgs, if_absent: bool) -> Result<()> {
    let validity = ctx.validity(issue)?;

    if if_absent {
        if ctx
            .keystores
            .ensure_created(name, issue.cn.as_deref(), validity)?
        {
            report_created(name, validity, None);
        } else {
            output::warning(&format!("Keystore '{name}' already exists, left unchanged"));
        }
        return Ok(());
    }

    let sp = output::spinner(&format!("Creating root keystore '{name}'..."));
    if let Err(e) = ctx
        .keystores
        .create_keystore(name, issue.cn.as_deref(), validity, None)
    {
        output::abandon_spinner(sp);
        return Err(e);
    }
    output::abandon_spinner(sp);
    report_created(name, validity, None);
    Ok(())
}

fn execute_child(
    ctx: &Context,
    name: &KeystoreName,
    parent: &KeystoreName,
    issue: &IssueArgs,
) -> Result<()> {
    let validity = ctx.validity(issue)?;

    let sp = output::spinner(&format!("Creating '{name}' signed by '{parent}'..."));
    if let Err(e) = ctx
        .keystores
        .create_keystore(name, issue.cn.as_deref(), validity, Some(parent))
    {
        output::abandon_spinner(sp);
        return Err(e);
    }
    output::abandon_spinner(sp);
    report_created(name, validity, Some(parent));
    Ok(())
}

fn execute_truststore(ctx: &Context, name: &KeystoreName, to_trust: &[KeystoreName]) -> Result<()> {
    ctx.truststores.create_truststore(name, to_trust)?;

    output::success(&format!("Created truststore '{name}'"));
    for trusted in to_trust {
        output::detail(&format!("trusts {trusted}"));
    }
    Ok(())
}

fn report_created(name: &KeystoreName, validity: Validity, parent: Option<&KeystoreName>) {
    match parent {
        Some(parent) => output::success(&format!("Created keystore '{name}' signed by '{parent}'")),
        None => output::success(&format!("Created root keystore '{name}'")),
    }
    let expires = Utc::now() + TimeDelta::seconds(validity.window().effective_seconds());
    output::detail(&format!(
        "valid for {validity}, until about {}",
        expires.format("%Y-%m-%d %H:%M:%S UTC")
    ));
}
