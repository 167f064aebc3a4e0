// Application state shared across all modules

use super::config::AppConfig;
use crate::register::validators::RegisterValidator;

/// Application state: immutable configuration plus the rule engine built
/// from it once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub register_validator: RegisterValidator,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let register_validator = RegisterValidator::new(config.register_form);
        Self {
            config,
            register_validator,
        }
    }
}
