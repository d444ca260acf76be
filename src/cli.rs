use chrono::NaiveDate;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// TTRank athlete roster manager
///
/// Manages tournament athlete records against a TTRank API instance:
/// listing, creating, editing and deleting athletes, plus CSV bulk
/// import/export. Log in once with `ttrank login`; the session token pair is
/// stored locally and refreshed automatically until it expires for good.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Specify a custom log file path. If not provided, logs will be written
    /// to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,

    /// Also print logs to stdout (debug level). Without this flag logs go to
    /// the log file only.
    #[arg(short = 'v', long = "verbose", global = true, help_heading = "Debug")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token pair
    Login {
        #[arg(short, long)]
        username: String,

        /// Password. Read from standard input when omitted.
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session tokens
    Logout,

    /// List all athletes
    List,

    /// Show a single athlete by id
    Show { id: i64 },

    /// Create a new athlete
    Add {
        /// Full name of the athlete
        #[arg(long = "name")]
        full_name: String,

        /// Birth date in YYYY-MM-DD format
        #[arg(long = "birth-date", value_name = "YYYY-MM-DD")]
        birth_date: NaiveDate,

        /// Phone number (free-form)
        #[arg(long = "phone")]
        phone_number: String,

        /// Ranking points (non-negative)
        #[arg(long = "points", default_value_t = 0)]
        ranking_points: u32,

        /// Club name, if any
        #[arg(long)]
        club: Option<String>,
    },

    /// Update fields of an existing athlete; unset fields keep their value
    Update {
        id: i64,

        /// New full name
        #[arg(long = "name")]
        full_name: Option<String>,

        /// New birth date in YYYY-MM-DD format
        #[arg(long = "birth-date", value_name = "YYYY-MM-DD")]
        birth_date: Option<NaiveDate>,

        /// New phone number
        #[arg(long = "phone")]
        phone_number: Option<String>,

        /// New ranking points
        #[arg(long = "points")]
        ranking_points: Option<u32>,

        /// New club name. Pass an empty string to clear the club.
        #[arg(long)]
        club: Option<String>,
    },

    /// Delete an athlete by id
    Remove { id: i64 },

    /// Bulk-import athletes from a CSV file.
    /// Expected header: full_name,birth_date,phone_number,ranking_points,club
    Import {
        /// Path to the CSV file to upload
        file: PathBuf,
    },

    /// Export all athletes to a CSV file
    Export {
        /// Output path (default: athletes_export.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change configuration
    Config {
        /// Set the API domain, e.g. http://localhost:8000
        #[arg(long = "api-domain", value_name = "URL", help_heading = "Configuration")]
        api_domain: Option<String>,

        /// Update log file path in config. This sets a persistent custom log
        /// file location.
        #[arg(long = "set-log-file", help_heading = "Configuration")]
        set_log_file: Option<String>,

        /// Clear the custom log file path from config. This reverts to using
        /// the default log location.
        #[arg(long = "clear-log-file", help_heading = "Configuration")]
        clear_log_file: bool,
    },
}
