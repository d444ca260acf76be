//! Endpoint URL builders over the configured API domain.
//!
//! All paths are fixed; only the base URL varies per deployment.

use crate::constants::endpoints;

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

pub fn build_login_url(base: &str) -> String {
    join(base, endpoints::LOGIN)
}

pub fn build_refresh_url(base: &str) -> String {
    join(base, endpoints::REFRESH)
}

pub fn build_athletes_url(base: &str) -> String {
    join(base, endpoints::ATHLETES)
}

pub fn build_athlete_url(base: &str, id: i64) -> String {
    format!("{}{}{}/", base.trim_end_matches('/'), endpoints::ATHLETES, id)
}

pub fn build_import_csv_url(base: &str) -> String {
    join(base, endpoints::IMPORT_CSV)
}

pub fn build_export_csv_url(base: &str) -> String {
    join(base, endpoints::EXPORT_CSV)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_login_url() {
        assert_eq!(
            build_login_url("http://localhost:8000"),
            "http://localhost:8000/api/auth/login/"
        );
    }

    #[test]
    fn test_build_refresh_url() {
        assert_eq!(
            build_refresh_url("https://api.example.com"),
            "https://api.example.com/api/auth/refresh/"
        );
    }

    #[test]
    fn test_build_athletes_url_trims_trailing_slash() {
        assert_eq!(
            build_athletes_url("https://api.example.com/"),
            "https://api.example.com/api/athletes/"
        );
    }

    #[test]
    fn test_build_athlete_url() {
        assert_eq!(
            build_athlete_url("http://localhost:8000", 42),
            "http://localhost:8000/api/athletes/42/"
        );
    }

    #[test]
    fn test_build_csv_urls() {
        assert_eq!(
            build_import_csv_url("http://localhost:8000"),
            "http://localhost:8000/api/athletes/import_csv/"
        );
        assert_eq!(
            build_export_csv_url("http://localhost:8000"),
            "http://localhost:8000/api/athletes/export_csv/"
        );
    }
}
