// Package administration commands. Lookups by application version may
// match several builds; the user picks among them before anything is
// shown, removed or downloaded.

use crate::context::{download_bar, spinner, Context};
use crate::error::{CliError, Result};
use crate::models::{display_value, NewPackage, Package, RecordId};
use crate::table::Table;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// How many packages a command may act on after a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    One,
    AtLeastOne,
}

fn detail_table(pkg: &Package) -> Table {
    let mut table = Table::key_value();
    table
        .entry("User", &pkg.email)
        .entry("Version", &pkg.application_version)
        .entry("Timestamp", display_value(&pkg.build_timestamp))
        .entry("BE Version", pkg.be_version.as_deref().unwrap_or(""))
        .entry("FE Version", pkg.fe_version.as_deref().unwrap_or(""))
        .entry("Status", pkg.status())
        .entry("Error", pkg.error_message.as_deref().unwrap_or(""))
        .entry("Completed At", display_value(&pkg.processing_completed_at))
        .entry("Created At", display_value(&pkg.created_at));
    table
}

fn package_id(pkg: &Package) -> Result<&RecordId> {
    pkg.id.as_ref().ok_or_else(|| {
        CliError::MalformedRecord(format!(
            "package {} has no id",
            pkg.application_version
        ))
    })
}

/// Fetch the packages for `version`. Prints a notice and returns `None`
/// when there are none.
fn lookup(ctx: &mut Context<'_>, version: &str) -> Result<Option<Vec<Package>>> {
    let packages = ctx.api.list_packages(Some(version))?;
    if packages.is_empty() {
        writeln!(ctx.out, "No package with version {} found", version)?;
        return Ok(None);
    }
    Ok(Some(packages))
}

/// Narrow `packages` down to the user's choice. A single match is taken
/// without asking.
fn choose(ctx: &mut Context<'_>, mut packages: Vec<Package>, pick: Pick) -> Result<Vec<Package>> {
    if packages.len() == 1 {
        return Ok(packages);
    }

    let labels: Vec<String> = packages.iter().map(Package::selection_label).collect();
    let mut chosen = ctx.prompter.select("Which package?", &labels)?;
    chosen.sort_unstable();
    chosen.dedup();

    let valid = match pick {
        Pick::One => chosen.len() == 1,
        Pick::AtLeastOne => !chosen.is_empty(),
    };
    if !valid || chosen.iter().any(|&i| i >= packages.len()) {
        return Err(CliError::InvalidSelection);
    }

    // Walk indices from the back so earlier ones stay valid.
    let mut selected: Vec<Package> = chosen
        .iter()
        .rev()
        .map(|&i| packages.swap_remove(i))
        .collect();
    selected.reverse();
    Ok(selected)
}

fn choose_one(ctx: &mut Context<'_>, packages: Vec<Package>) -> Result<Package> {
    choose(ctx, packages, Pick::One)?
        .into_iter()
        .next()
        .ok_or(CliError::InvalidSelection)
}

pub fn list_packages(ctx: &mut Context<'_>, long: bool) -> Result<()> {
    let pb = spinner("Fetching packages...");
    let packages = ctx.api.list_packages(None);
    pb.finish_and_clear();
    let packages = packages?;

    let table = if long {
        let mut table = Table::with_header([
            "User",
            "Version",
            "Timestamp",
            "BE Version",
            "FE Version",
            "Processed",
            "Created",
        ]);
        for pkg in &packages {
            table.row([
                pkg.email.clone(),
                pkg.application_version.clone(),
                display_value(&pkg.build_timestamp),
                pkg.be_version.clone().unwrap_or_default(),
                pkg.fe_version.clone().unwrap_or_default(),
                pkg.status().to_string(),
                display_value(&pkg.created_at),
            ]);
        }
        table
    } else {
        let mut table =
            Table::with_header(["User", "Version", "Timestamp", "Processed", "Created"]);
        for pkg in &packages {
            table.row([
                pkg.email.clone(),
                pkg.application_version.clone(),
                display_value(&pkg.build_timestamp),
                pkg.status().to_string(),
                display_value(&pkg.created_at),
            ]);
        }
        table
    };

    write!(ctx.out, "{}", table)?;
    Ok(())
}

/// Register a new build. Backend and frontend versions default to the
/// application version.
pub fn create_package(
    ctx: &mut Context<'_>,
    app_version: &str,
    be_version: Option<&str>,
    fe_version: Option<&str>,
) -> Result<()> {
    let pkg = ctx.api.create_package(&NewPackage {
        application_version: app_version,
        be_version: be_version.unwrap_or(app_version),
        fe_version: fe_version.unwrap_or(app_version),
    })?;

    let mut table = Table::key_value();
    table
        .entry("Version", &pkg.application_version)
        .entry("Timestamp", display_value(&pkg.timestamp))
        .entry("BE Version", pkg.be_version.as_deref().unwrap_or(""))
        .entry("FE Version", pkg.fe_version.as_deref().unwrap_or(""));
    write!(ctx.out, "{}", table)?;
    Ok(())
}

pub fn show_package(ctx: &mut Context<'_>, app_version: &str) -> Result<()> {
    let Some(packages) = lookup(ctx, app_version)? else {
        return Ok(());
    };
    let pkg = choose_one(ctx, packages)?;

    write!(ctx.out, "{}", detail_table(&pkg))?;
    for (heading, log) in [("stdout", &pkg.stdout), ("stderr", &pkg.stderr)] {
        if let Some(log) = log.as_deref().filter(|l| !l.is_empty()) {
            writeln!(ctx.out)?;
            writeln!(ctx.out, "{}", heading)?;
            writeln!(ctx.out, "{}", log)?;
        }
    }
    Ok(())
}

pub fn remove_package(ctx: &mut Context<'_>, app_version: &str, force: bool) -> Result<()> {
    let Some(packages) = lookup(ctx, app_version)? else {
        return Ok(());
    };
    let selected = choose(ctx, packages, Pick::AtLeastOne)?;

    if !force && !ctx.prompter.confirm("Are you sure?")? {
        return Ok(());
    }

    writeln!(ctx.out, "Delete package(s)")?;
    for pkg in &selected {
        ctx.api.delete_package(package_id(pkg)?)?;
        write!(ctx.out, "{}", detail_table(pkg))?;
    }
    Ok(())
}

/// Stream the artifact into `output`. "Complete" is only reported once the
/// whole body is on disk.
pub fn download_package(ctx: &mut Context<'_>, app_version: &str, output: &Path) -> Result<()> {
    let Some(packages) = lookup(ctx, app_version)? else {
        return Ok(());
    };
    let pkg = choose_one(ctx, packages)?;

    let mut response = ctx.api.download_package(package_id(&pkg)?, app_version)?;
    tracing::debug!(path = %output.display(), len = ?response.content_length(), "downloading");

    let mut file = File::create(output)?;
    let bar = download_bar(response.content_length());
    let streamed = {
        let mut sink = bar.wrap_write(&mut file);
        response.copy_to(&mut sink)
    };
    let copied = streamed.map_err(CliError::from).and_then(|n| {
        file.flush()?;
        file.sync_all()?;
        Ok(n)
    });
    bar.finish_and_clear();

    match copied {
        Ok(bytes) => {
            tracing::info!(bytes, path = %output.display(), "download finished");
            writeln!(ctx.out, "Complete")?;
            Ok(())
        }
        Err(e) => {
            drop(file);
            let _ = std::fs::remove_file(output);
            Err(e)
        }
    }
}
