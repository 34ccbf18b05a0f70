//! payment-client/src/config.rs
//!
//! Deployment configuration, baked in at compile time and handed to the
//! component tree through a context provider. Nothing here mutates after
//! startup.

use yew::functional::hook;
use yew::prelude::*;

/// Environment configuration for one deployment of the client.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Public base URL of this application, used to build provider return URLs.
    pub app_url: String,
    /// Base URL of the backend checkout/transaction API.
    pub api_base_url: String,
    /// Stripe publishable key (`pk_...`).
    pub publishable_key: String,
}

impl AppConfig {
    /// Read configuration from compile-time environment variables, falling
    /// back to local development defaults.
    pub fn from_env() -> Self {
        Self {
            app_url: option_env!("APP_URL")
                .unwrap_or("http://localhost:3000")
                .to_string(),
            api_base_url: option_env!("API_BASE_URL")
                .unwrap_or("http://localhost:8000")
                .to_string(),
            publishable_key: option_env!("STRIPE_PUBLISHABLE_KEY")
                .unwrap_or("pk_test_placeholder")
                .to_string(),
        }
    }

    /// Return URL for the by-secret page, which Stripe redirects back to after
    /// off-page authentication.
    pub fn return_url(&self, client_secret: &str) -> String {
        format!(
            "{}/payment/secret?client_secret={}",
            self.app_url, client_secret
        )
    }
}

/// Fetch the [`AppConfig`] provided by the root component.
///
/// Panics if called outside the provider, which would be a wiring bug.
#[hook]
pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig context not provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_url_carries_client_secret_query() {
        let cfg = AppConfig {
            app_url: "https://pay.example.com".into(),
            api_base_url: "https://api.example.com".into(),
            publishable_key: "pk_test_1".into(),
        };
        assert_eq!(
            cfg.return_url("cs_42"),
            "https://pay.example.com/payment/secret?client_secret=cs_42"
        );
    }
}
