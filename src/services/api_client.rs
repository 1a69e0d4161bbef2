// ============================================================================
// API CLIENT - SOLO comunicación HTTP con el servidor de autenticación
// ============================================================================
// No interpreta códigos de estado: devuelve un HttpReply y el ViewModel
// decide. Cada petición se aborta si el componente se desmonta.
// ============================================================================

use gloo_net::http::{Request, Response};
use web_sys::{AbortController, AbortSignal, RequestRedirect};

use crate::config::CONFIG;
use crate::models::{ApiError, Credentials, HttpReply, RedirectTarget};
use crate::state::{CancelGuard, CancellationToken};
use crate::utils::{build_login_url, encode_credentials, join_url};

/// Transporte del flujo de login. En el navegador es `ApiClient`; en tests,
/// un doble en memoria.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `GET whoami`
    async fn whoami(&self) -> Result<HttpReply, ApiError>;

    /// `POST login?redirect=...` siguiendo redirecciones
    async fn login(
        &self,
        credentials: &Credentials,
        redirect: &RedirectTarget,
    ) -> Result<HttpReply, ApiError>;
}

/// Cliente HTTP (stateless salvo el token de vida del componente)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    whoami_path: String,
    login_path: String,
    token: CancellationToken,
}

impl ApiClient {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            base_url: CONFIG.auth_base_url.clone(),
            whoami_path: CONFIG.whoami_path.clone(),
            login_path: CONFIG.login_path.clone(),
            token,
        }
    }

    pub fn whoami_url(&self) -> String {
        join_url(&self.base_url, &self.whoami_path)
    }

    pub fn login_url(&self, redirect: &RedirectTarget) -> String {
        build_login_url(&self.base_url, &self.login_path, redirect)
    }

    /// Señal de aborto enganchada al token mientras viva la petición.
    /// `None` si el navegador no soporta AbortController; la petición sigue
    /// sin cancelación.
    fn bind_abort(&self) -> Option<AbortBinding> {
        let controller = AbortController::new().ok()?;
        let signal = controller.signal();
        let guard = self.token.on_cancel(move || controller.abort());
        Some(AbortBinding {
            signal,
            _guard: guard,
        })
    }

    fn transport_error(&self, error: gloo_net::Error) -> ApiError {
        if self.token.is_cancelled() {
            ApiError::Aborted
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

/// Al soltarse (fin de la petición) retira el hook del token
struct AbortBinding {
    signal: AbortSignal,
    _guard: CancelGuard,
}

impl AbortBinding {
    fn signal(binding: &Option<Self>) -> Option<&AbortSignal> {
        binding.as_ref().map(|binding| &binding.signal)
    }
}

fn reply_from(response: &Response) -> HttpReply {
    HttpReply {
        status: response.status(),
        ok: response.ok(),
        redirected: response.redirected(),
        url: response.url(),
    }
}

impl AuthApi for ApiClient {
    async fn whoami(&self) -> Result<HttpReply, ApiError> {
        let url = self.whoami_url();
        log::debug!("🌐 [API] GET {}", url);

        let abort = self.bind_abort();
        let response = Request::get(&url)
            .abort_signal(AbortBinding::signal(&abort))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let reply = reply_from(&response);
        log::debug!("🌐 [API] whoami -> {}", reply.status);
        Ok(reply)
    }

    async fn login(
        &self,
        credentials: &Credentials,
        redirect: &RedirectTarget,
    ) -> Result<HttpReply, ApiError> {
        let url = self.login_url(redirect);
        log::info!("🔐 [API] POST {} (usuario: {})", url, credentials.username);

        let abort = self.bind_abort();
        let request = Request::post(&url)
            .header("content-type", "application/x-www-form-urlencoded")
            .redirect(RequestRedirect::Follow)
            .abort_signal(AbortBinding::signal(&abort))
            .body(encode_credentials(credentials))
            .map_err(|e| ApiError::Build(e.to_string()))?;

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let reply = reply_from(&response);
        log::debug!(
            "🌐 [API] login -> {} (redirected: {}, url: {})",
            reply.status,
            reply.redirected,
            reply.url
        );
        Ok(reply)
    }
}
