// User administration commands.

use crate::context::{spinner, Context};
use crate::error::{CliError, Result};
use crate::models::{CompleteRegistration, NewUser, Role, User};
use crate::table::Table;
use std::io::Write;

fn user_table(user: &User) -> Table {
    let mut table = Table::key_value();
    table
        .entry("Email", &user.email)
        .entry("Name", &user.name)
        .entry("Role", &user.user_role)
        .entry("Enabled", user.enabled)
        .entry("Registered", user.registered);
    table
}

/// Look up the account for `email`. Email is unique server-side, so the
/// first match is the user.
fn find_user(ctx: &Context<'_>, email: &str) -> Result<User> {
    ctx.api
        .list_users(Some(email))?
        .into_iter()
        .next()
        .ok_or_else(|| CliError::NotFound(format!("User not found: {}", email)))
}

pub fn list_users(ctx: &mut Context<'_>) -> Result<()> {
    let pb = spinner("Fetching users...");
    let users = ctx.api.list_users(None);
    pb.finish_and_clear();
    let users = users?;

    let mut table = Table::with_header(["Email", "Name", "Role", "Enabled", "Registered"]);
    for user in &users {
        table.row([
            user.email.clone(),
            user.name.clone(),
            user.user_role.clone(),
            user.enabled.to_string(),
            user.registered.to_string(),
        ]);
    }
    write!(ctx.out, "{}", table)?;
    Ok(())
}

pub fn create_user(ctx: &mut Context<'_>, email: &str, name: &str, role: Role) -> Result<()> {
    let user = ctx.api.create_user(&NewUser {
        email,
        name,
        user_role: role,
    })?;

    let mut table = user_table(&user);
    table.entry("Token", user.token.as_deref().unwrap_or(""));
    write!(ctx.out, "{}", table)?;
    Ok(())
}

pub fn complete_registration(ctx: &mut Context<'_>, token: &str) -> Result<()> {
    let password = ctx.prompter.password()?;
    let user = ctx.api.complete_registration(&CompleteRegistration {
        token,
        password: &password,
    })?;
    write!(ctx.out, "{}", user_table(&user))?;
    Ok(())
}

pub fn enable_user(ctx: &mut Context<'_>, email: &str, enable: bool) -> Result<()> {
    let user = find_user(ctx, email)?;
    let updated = ctx.api.set_user_enabled(&user.id, enable)?;
    write!(ctx.out, "{}", user_table(&updated))?;
    Ok(())
}

pub fn remove_user(ctx: &mut Context<'_>, email: &str, force: bool) -> Result<()> {
    let user = find_user(ctx, email)?;

    if !force && !ctx.prompter.confirm("Are you sure?")? {
        return Ok(());
    }

    ctx.api.delete_user(&user.id)?;
    writeln!(ctx.out, "User {} deleted.", email)?;
    Ok(())
}
