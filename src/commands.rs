use crate::cli::Command;
use crate::context::{spinner, Context};
use crate::error::{CliError, Result};
use crate::models::Role;
use crate::{packages, session, users};
use std::io::Write;

/// Run one parsed command against `ctx`.
pub fn run(command: Command, ctx: &mut Context<'_>) -> Result<()> {
    match command {
        Command::Login => {
            session::login(ctx.api, &mut *ctx.prompter)?;
            writeln!(ctx.out, "Logged in.")?;
            Ok(())
        }
        Command::Logout => {
            let pb = spinner("Logging out...");
            let result = session::logout(ctx.api);
            pb.finish_and_clear();
            result?;
            writeln!(ctx.out, "Logged out.")?;
            Ok(())
        }
        Command::ListUsers => users::list_users(ctx),
        Command::CreateUser {
            email,
            name,
            admin,
            reporter,
            deployer,
        } => {
            let role = Role::from_flags(admin, reporter, deployer).ok_or(CliError::MissingRole)?;
            let name = name
                .filter(|n| !n.trim().is_empty())
                .ok_or(CliError::MissingName)?;
            users::create_user(ctx, &email, &name, role)
        }
        Command::CompleteRegistration { token } => users::complete_registration(ctx, &token),
        Command::EnableUser {
            email,
            enable: _,
            disable,
        } => users::enable_user(ctx, &email, !disable),
        Command::RemoveUser { email, force } => users::remove_user(ctx, &email, force),
        Command::ListPackages { long } => packages::list_packages(ctx, long),
        Command::CreatePackage {
            app_version,
            back_end_version,
            front_end_version,
        } => packages::create_package(
            ctx,
            &app_version,
            back_end_version.as_deref(),
            front_end_version.as_deref(),
        ),
        Command::ShowPackage { app_version } => packages::show_package(ctx, &app_version),
        Command::RemovePackage { app_version, force } => {
            packages::remove_package(ctx, &app_version, force)
        }
        Command::DownloadPackage {
            app_version,
            output,
        } => packages::download_package(ctx, &app_version, &output),
    }
}
