// ============================================================================
// ERRORES - Taxonomía de fallos del inicio de sesión
// ============================================================================
// Cada variante de SignInError se muestra al usuario en el diálogo modal.
// ApiError queda en la capa de transporte y nunca llega a la vista tal cual.
// ============================================================================

use thiserror::Error;

/// Fallo visible para el usuario. `Display` es el mensaje del diálogo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignInError {
    /// La comprobación de sesión devolvió 403
    #[error("This account is disabled")]
    AccountDisabled,

    /// Error de red, servidor >= 500 o redirección fallida
    #[error("Failed to reach the authentication server")]
    CommunicationFailure,

    /// Login con 401
    #[error("Invalid credentials, please retry")]
    InvalidCredentials,

    /// Login con 403
    #[error("Account disabled, contact the administrator")]
    AccountDisabledContactAdmin,

    /// El navegador rechazó la navegación hacia `url`
    #[error("Unable to redirect to {url}")]
    RedirectFailure { url: String },
}

impl SignInError {
    /// Título del diálogo
    pub fn title(&self) -> &'static str {
        match self {
            Self::AccountDisabled | Self::CommunicationFailure => "Error",
            Self::InvalidCredentials | Self::AccountDisabledContactAdmin => "Login failed",
            Self::RedirectFailure { .. } => "Redirect failed",
        }
    }

    /// Cuerpo del diálogo
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Fallo de transporte devuelto por `AuthApi`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Request build error: {0}")]
    Build(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Petición abortada al desmontar el componente
    #[error("Request aborted")]
    Aborted,
}
