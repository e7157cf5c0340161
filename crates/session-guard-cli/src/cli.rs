//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// JSON file in the user cache directory
    File,
    /// OS keychain
    Keyring,
}

#[derive(Debug, Parser)]
#[command(
    name = "session-guard",
    version,
    about = "Log in, keep the access token locally, and send authenticated requests."
)]
pub struct Args {
    /// Where the access token is kept
    #[arg(long, value_enum, default_value_t = StoreKind::File, env = "SESSION_GUARD_STORE", global = true)]
    pub store: StoreKind,

    /// Also write logs to a daily-rolling file in the cache directory
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show whether a session token is stored
    Status,

    /// Log in (prompts for the password) and store the token
    Login {
        username: String,
    },

    /// Delete the stored token
    Logout,

    /// Send authenticated GET requests; every URL is reported even if some fail
    Get {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Run the page guard as if PATH was loaded
    Visit {
        path: String,
    },

    /// Validate account form input (prompts for the password)
    CheckAccount {
        email: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["session-guard", "status"]).unwrap();
        assert_eq!(args.store, StoreKind::File);
        assert!(!args.log_file);
        assert_eq!(args.command, Command::Status);
    }

    #[test]
    fn test_parse_flags_and_command() {
        let args = Args::try_parse_from([
            "session-guard",
            "--store",
            "keyring",
            "--log-file",
            "login",
            "admin@example.com",
        ])
        .unwrap();
        assert_eq!(args.store, StoreKind::Keyring);
        assert!(args.log_file);
        assert_eq!(
            args.command,
            Command::Login {
                username: "admin@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["session-guard", "logout", "--store", "keyring"]).unwrap();
        assert_eq!(args.store, StoreKind::Keyring);
        assert_eq!(args.command, Command::Logout);
    }

    #[test]
    fn test_parse_get_multiple() {
        let args = Args::try_parse_from(["session-guard", "get", "/api/v1/books", "/api/v1/users/me"]).unwrap();
        assert_eq!(
            args.command,
            Command::Get {
                urls: vec!["/api/v1/books".to_string(), "/api/v1/users/me".to_string()]
            }
        );
    }

    #[test]
    fn test_parse_kebab_case_subcommand() {
        let args = Args::try_parse_from(["session-guard", "check-account", "admin@example.com"]).unwrap();
        assert_eq!(
            args.command,
            Command::CheckAccount {
                email: "admin@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Args::try_parse_from(["session-guard"]).is_err());
        assert!(Args::try_parse_from(["session-guard", "get"]).is_err());
        assert!(Args::try_parse_from(["session-guard", "login"]).is_err());
        assert!(Args::try_parse_from(["session-guard", "visit", "/a", "/b"]).is_err());
        assert!(Args::try_parse_from(["session-guard", "--store", "cloud", "status"]).is_err());
        assert!(Args::try_parse_from(["session-guard", "frobnicate"]).is_err());
        assert!(Args::try_parse_from(["session-guard", "--verbose", "status"]).is_err());
    }
}
