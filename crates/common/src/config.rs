use serde::Deserialize;

use crate::error::AppError;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Firebase project the messages:send endpoint is scoped to
    pub fcm_project_id: String,

    /// Path to the service-account key file used to mint access tokens
    pub credentials_path: String,

    /// Broadcast topic all subscribed devices listen on (default: daily-updates)
    pub dispatch_topic: String,

    /// Seconds between scheduled dispatch invocations (default: 900)
    pub dispatch_interval_secs: u64,

    /// FCM API base URL, overridable for staging (default: https://fcm.googleapis.com)
    pub fcm_endpoint: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            fcm_project_id: std::env::var("FCM_PROJECT_ID").map_err(|_| {
                AppError::Config("FCM_PROJECT_ID environment variable is required".to_string())
            })?,
            credentials_path: std::env::var("GOOGLE_APPLICATION_CREDENTIALS").map_err(|_| {
                AppError::Config(
                    "GOOGLE_APPLICATION_CREDENTIALS environment variable is required".to_string(),
                )
            })?,
            dispatch_topic: std::env::var("DISPATCH_TOPIC")
                .unwrap_or_else(|_| "daily-updates".to_string()),
            dispatch_interval_secs: std::env::var("DISPATCH_INTERVAL_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Config("DISPATCH_INTERVAL_SECS must be a valid u64".to_string())
                })?,
            fcm_endpoint: std::env::var("FCM_ENDPOINT")
                .unwrap_or_else(|_| "https://fcm.googleapis.com".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global, so tests touching them
    // must not run concurrently.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Set the required variables and clear the optional ones, so each test
    /// starts from a known environment.
    fn set_base_env() {
        unsafe {
            std::env::set_var("FCM_PROJECT_ID", "github-wallpaper");
            std::env::set_var("GOOGLE_APPLICATION_CREDENTIALS", "/tmp/key.json");
            std::env::remove_var("DISPATCH_TOPIC");
            std::env::remove_var("DISPATCH_INTERVAL_SECS");
            std::env::remove_var("FCM_ENDPOINT");
        }
    }

    #[test]
    fn test_defaults_applied_for_optional_vars() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_base_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.fcm_project_id, "github-wallpaper");
        assert_eq!(config.credentials_path, "/tmp/key.json");
        assert_eq!(config.dispatch_topic, "daily-updates");
        assert_eq!(config.dispatch_interval_secs, 900);
        assert_eq!(config.fcm_endpoint, "https://fcm.googleapis.com");
    }

    #[test]
    fn test_optional_vars_override_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_base_env();
        unsafe {
            std::env::set_var("DISPATCH_TOPIC", "beta-updates");
            std::env::set_var("DISPATCH_INTERVAL_SECS", "300");
            std::env::set_var("FCM_ENDPOINT", "https://fcm.staging.example.com");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.dispatch_topic, "beta-updates");
        assert_eq!(config.dispatch_interval_secs, 300);
        assert_eq!(config.fcm_endpoint, "https://fcm.staging.example.com");
    }

    #[test]
    fn test_missing_project_id_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_base_env();
        unsafe {
            std::env::remove_var("FCM_PROJECT_ID");
        }

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("FCM_PROJECT_ID"));
    }

    #[test]
    fn test_missing_credentials_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_base_env();
        unsafe {
            std::env::remove_var("GOOGLE_APPLICATION_CREDENTIALS");
        }

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("GOOGLE_APPLICATION_CREDENTIALS"));
    }

    #[test]
    fn test_non_numeric_interval_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_base_env();
        unsafe {
            std::env::set_var("DISPATCH_INTERVAL_SECS", "every 15 minutes");
        }

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("DISPATCH_INTERVAL_SECS"));
    }
}
