//! Thin command handlers: wire config, token store, API client and roster
//! together, run one operation and print the outcome. No business rules live
//! here.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::api::ApiClient;
use crate::auth::TokenStore;
use crate::cli::Command;
use crate::config::Config;
use crate::constants;
use crate::error::AppError;
use crate::models::{Athlete, AthleteInput, AthleteUpdate, CsvImportResult, LoginCredentials};
use crate::roster::AthleteRoster;

pub async fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Login { username, password } => login(username, password).await,
        Command::Logout => logout().await,
        Command::List => list().await,
        Command::Show { id } => show(id).await,
        Command::Add {
            full_name,
            birth_date,
            phone_number,
            ranking_points,
            club,
        } => {
            add(AthleteInput {
                full_name,
                birth_date,
                phone_number,
                ranking_points,
                club,
            })
            .await
        }
        Command::Update {
            id,
            full_name,
            birth_date,
            phone_number,
            ranking_points,
            club,
        } => {
            update(
                id,
                AthleteUpdate {
                    full_name,
                    birth_date,
                    phone_number,
                    ranking_points,
                    club,
                },
            )
            .await
        }
        Command::Remove { id } => remove(id).await,
        Command::Import { file } => import(&file).await,
        Command::Export { output } => export(output).await,
        Command::Config {
            api_domain,
            set_log_file,
            clear_log_file,
        } => configure(api_domain, set_log_file, clear_log_file).await,
    }
}

async fn build_client() -> Result<ApiClient, AppError> {
    let config = Config::load().await?;
    let tokens = TokenStore::load().await?;
    ApiClient::new(&config, tokens)
}

async fn build_roster() -> Result<AthleteRoster, AppError> {
    Ok(AthleteRoster::new(build_client().await?))
}

async fn login(username: String, password: Option<String>) -> Result<(), AppError> {
    let password = match password {
        Some(password) => password,
        None => prompt_for_password()?,
    };

    let mut client = build_client().await?;
    client
        .login(&LoginCredentials { username: username.clone(), password })
        .await?;
    println!("Logged in as {username}.");
    Ok(())
}

fn prompt_for_password() -> Result<String, AppError> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

async fn logout() -> Result<(), AppError> {
    let mut tokens = TokenStore::load().await?;
    if tokens.is_authenticated() {
        tokens.clear().await?;
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

async fn list() -> Result<(), AppError> {
    let mut roster = build_roster().await?;
    roster.refresh().await?;

    let athletes = roster.athletes();
    if athletes.is_empty() {
        println!("No athletes found.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<25} {:<12} {:<16} {:>7}  {}",
        "ID", "NAME", "BORN", "PHONE", "POINTS", "CLUB"
    );
    for athlete in athletes {
        print_athlete_row(athlete);
    }
    println!("{} athletes.", athletes.len());
    Ok(())
}

fn print_athlete_row(athlete: &Athlete) {
    println!(
        "{:>5}  {:<25} {:<12} {:<16} {:>7}  {}",
        athlete.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
        athlete.full_name,
        athlete.birth_date,
        athlete.phone_number,
        athlete.ranking_points,
        athlete.club.as_deref().unwrap_or("-")
    );
}

async fn show(id: i64) -> Result<(), AppError> {
    let mut client = build_client().await?;
    let athlete = client.get_athlete(id).await?;

    println!("Name:        {}", athlete.full_name);
    println!("Born:        {}", athlete.birth_date);
    println!("Phone:       {}", athlete.phone_number);
    println!("Points:      {}", athlete.ranking_points);
    println!("Club:        {}", athlete.club.as_deref().unwrap_or("-"));
    if let Some(created_at) = athlete.created_at {
        println!("Created:     {created_at}");
    }
    if let Some(updated_at) = athlete.updated_at {
        println!("Updated:     {updated_at}");
    }
    Ok(())
}

async fn add(input: AthleteInput) -> Result<(), AppError> {
    let mut roster = build_roster().await?;
    let created = roster.create(&input).await?;
    match created.id {
        Some(id) => println!("Created athlete '{}' (id {id}).", created.full_name),
        None => println!("Created athlete '{}'.", created.full_name),
    }
    Ok(())
}

async fn update(id: i64, changes: AthleteUpdate) -> Result<(), AppError> {
    if changes.is_empty() {
        return Err(AppError::config_error(
            "Nothing to update: pass at least one of --name, --birth-date, --phone, --points, --club",
        ));
    }

    let mut roster = build_roster().await?;
    let updated = roster.update(id, &changes).await?;
    println!("Updated athlete '{}' (id {id}).", updated.full_name);
    Ok(())
}

async fn remove(id: i64) -> Result<(), AppError> {
    let mut roster = build_roster().await?;
    roster.delete(id).await?;
    println!("Deleted athlete {id}.");
    Ok(())
}

async fn import(file: &Path) -> Result<(), AppError> {
    let mut roster = build_roster().await?;
    let result = roster.import_csv(file).await?;
    print_import_result(&result);
    Ok(())
}

fn print_import_result(result: &CsvImportResult) {
    if !result.message.is_empty() {
        println!("{}", result.message);
    }
    println!(
        "Processed {} rows: {} imported, {} failed.",
        result.total_processed, result.successful, result.failed
    );
    for name in &result.created_athletes {
        println!("  + {name}");
    }
    for error in &result.errors {
        println!("  ! {error}");
    }
}

async fn export(output: Option<PathBuf>) -> Result<(), AppError> {
    let path = output.unwrap_or_else(|| PathBuf::from(constants::csv::DEFAULT_EXPORT_FILE));
    let mut roster = build_roster().await?;
    let written = roster.export_csv(&path).await?;
    println!("Exported {written} bytes to {}.", path.display());
    Ok(())
}

async fn configure(
    api_domain: Option<String>,
    set_log_file: Option<String>,
    clear_log_file: bool,
) -> Result<(), AppError> {
    if api_domain.is_none() && set_log_file.is_none() && !clear_log_file {
        return Config::display().await;
    }

    let mut config = Config::load().await.unwrap_or_else(|_| Config::default());

    if let Some(new_domain) = api_domain {
        config.api_domain = new_domain;
    }

    if let Some(new_log_path) = set_log_file {
        config.log_file_path = Some(new_log_path);
    } else if clear_log_file {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save().await?;
    println!("Config updated successfully!");
    Ok(())
}
