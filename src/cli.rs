// Command-line surface. Parsing only; `commands::run` does the work.

use crate::config::{Config, DEFAULT_HOST, DEFAULT_PORT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vault-build")]
#[command(about = "Manage users and build packages on a vault-build server")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Host of the vault-build server
    #[arg(short = 'H', long, global = true, env = "VAULT_BUILD_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port of the vault-build server
    #[arg(short, long, global = true, env = "VAULT_BUILD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Use https
    #[arg(short, long, global = true)]
    pub secure: bool,

    /// Be noisy: debug logging and full error details
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::new(self.host.clone(), self.port, self.secure, self.verbose)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store a session token
    #[command(alias = "l")]
    Login,

    /// Remove the stored session token and revoke it
    Logout,

    /// List all users
    #[command(alias = "lu")]
    ListUsers,

    /// Create a user; prints the one-time registration token
    #[command(alias = "cu")]
    CreateUser {
        email: String,

        /// Name of the user
        #[arg(short, long)]
        name: Option<String>,

        /// User is an admin
        #[arg(short, long)]
        admin: bool,

        /// User is a reporter
        #[arg(short, long)]
        reporter: bool,

        /// User is a deployer
        #[arg(short, long)]
        deployer: bool,
    },

    /// Set a password using a registration token
    #[command(alias = "cr")]
    CompleteRegistration { token: String },

    /// Enable or disable a user
    #[command(alias = "eu")]
    EnableUser {
        email: String,

        /// Enable the user (default)
        #[arg(short, long)]
        enable: bool,

        /// Disable the user
        #[arg(short, long)]
        disable: bool,
    },

    /// Delete a user
    #[command(alias = "ru")]
    RemoveUser {
        email: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// List build packages
    #[command(alias = "lp")]
    ListPackages {
        /// Include backend and frontend versions
        #[arg(short, long)]
        long: bool,
    },

    /// Register a build package
    #[command(alias = "cp")]
    CreatePackage {
        app_version: String,

        /// Backend version (defaults to the application version)
        #[arg(short = 'b', long)]
        back_end_version: Option<String>,

        /// Frontend version (defaults to the application version)
        #[arg(short = 'f', long)]
        front_end_version: Option<String>,
    },

    /// Show a package with its build logs
    #[command(alias = "sp")]
    ShowPackage { app_version: String },

    /// Delete one or more packages
    #[command(alias = "rp")]
    RemovePackage {
        app_version: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Download a package artifact to a file
    #[command(alias = "dp")]
    DownloadPackage {
        app_version: String,
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_build_config() {
        let cli = Cli::try_parse_from([
            "vault-build",
            "-H",
            "builds.example.com",
            "-p",
            "8443",
            "-s",
            "list-users",
        ])
        .unwrap();
        assert_eq!(cli.config().base_url(), "https://builds.example.com:8443");
        assert!(matches!(cli.command, Command::ListUsers));
    }

    #[test]
    fn global_flags_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["vault-build", "logout", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn aliases_resolve() {
        let cli = Cli::try_parse_from(["vault-build", "lp", "-l"]).unwrap();
        assert!(matches!(cli.command, Command::ListPackages { long: true }));
    }

    #[test]
    fn create_user_flags_parse() {
        let cli =
            Cli::try_parse_from(["vault-build", "cu", "a@x.com", "-n", "Ann", "-r"]).unwrap();
        match cli.command {
            Command::CreateUser {
                email,
                name,
                admin,
                reporter,
                deployer,
            } => {
                assert_eq!(email, "a@x.com");
                assert_eq!(name.as_deref(), Some("Ann"));
                assert!(!admin && reporter && !deployer);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn download_requires_output() {
        assert!(Cli::try_parse_from(["vault-build", "download-package", "1.0"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
