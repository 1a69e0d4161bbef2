// ============================================================================
// AUTH MODELS - Tipos del flujo de inicio de sesión
// ============================================================================
// Sin dependencias del navegador: la clasificación de respuestas se prueba
// en nativo.
// ============================================================================

use std::fmt;

use crate::models::error::SignInError;

/// Destino de redirección, leído una sola vez del query param `redirect`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedirectTarget {
    value: String,
}

impl RedirectTarget {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    /// Parámetro ausente => cadena vacía
    pub fn from_param(param: Option<String>) -> Self {
        Self::new(param.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Credenciales enviadas al endpoint de login
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Ambos campos requeridos presentes
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

// El password nunca aparece en logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Resumen de una respuesta HTTP (la final, si hubo redirecciones)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub ok: bool,
    pub redirected: bool,
    pub url: String,
}

impl HttpReply {
    /// Respuesta directa; `ok` sigue la regla de fetch (2xx)
    pub fn new(status: u16, url: impl Into<String>) -> Self {
        Self {
            status,
            ok: (200..300).contains(&status),
            redirected: false,
            url: url.into(),
        }
    }

    /// Marca la respuesta como resultado de seguir una redirección
    pub fn after_redirect(mut self) -> Self {
        self.redirected = true;
        self
    }
}

/// Resultado de la comprobación de sesión (`whoami`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Ya hay sesión: navegar al destino de redirección
    Authenticated,
    /// Sin sesión y sin nada que mostrar: formulario limpio
    Anonymous,
    /// Sin sesión y con diálogo de error
    Failed(SignInError),
}

impl SessionOutcome {
    pub fn from_reply(reply: &HttpReply) -> Self {
        if reply.ok {
            Self::Authenticated
        } else if reply.status == 403 {
            Self::Failed(SignInError::AccountDisabled)
        } else if reply.status >= 500 {
            Self::Failed(SignInError::CommunicationFailure)
        } else {
            Self::Anonymous
        }
    }
}

/// Resultado del envío del formulario (`login`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Se siguió una redirección y la respuesta final es correcta
    Redirected { url: String },
    /// Se siguió una redirección pero la respuesta final falló.
    /// Se trata igual que un error de red.
    AmbiguousFailure,
    /// Respuesta directa del servidor rechazando el intento
    Rejected(SignInError),
}

impl AuthOutcome {
    pub fn from_reply(reply: &HttpReply) -> Self {
        if reply.redirected {
            if reply.ok {
                return Self::Redirected {
                    url: reply.url.clone(),
                };
            }
            return Self::AmbiguousFailure;
        }

        match reply.status {
            401 => Self::Rejected(SignInError::InvalidCredentials),
            403 => Self::Rejected(SignInError::AccountDisabledContactAdmin),
            _ => Self::Rejected(SignInError::CommunicationFailure),
        }
    }
}
