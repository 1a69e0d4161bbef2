use serde::{Deserialize, Serialize};

use crate::utils::constants::{DEFAULT_LOGIN_PATH, DEFAULT_ROOT_ELEMENT_ID, DEFAULT_WHOAMI_PATH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origen del servidor de autenticación. Vacío = mismo origen que la página.
    pub auth_base_url: String,
    pub whoami_path: String,
    pub login_path: String,
    pub log_level: String,
    pub root_element_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_base_url: String::new(),
            whoami_path: DEFAULT_WHOAMI_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            log_level: "info".to_string(),
            root_element_id: DEFAULT_ROOT_ELEMENT_ID.to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auth_base_url: option_env!("AUTH_BASE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.auth_base_url),
            whoami_path: option_env!("WHOAMI_PATH")
                .map(str::to_string)
                .unwrap_or(defaults.whoami_path),
            login_path: option_env!("LOGIN_PATH")
                .map(str::to_string)
                .unwrap_or(defaults.login_path),
            log_level: option_env!("LOG_LEVEL")
                .map(str::to_string)
                .unwrap_or(defaults.log_level),
            root_element_id: option_env!("ROOT_ELEMENT_ID")
                .map(str::to_string)
                .unwrap_or(defaults.root_element_id),
        }
    }

    /// Nivel de log para wasm-logger; valores desconocidos caen a Info
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
