// ============================================================================
// SIGN-IN VIEWMODEL - Comprobación de sesión + login + diálogo
// ============================================================================
// Flujo: montar -> check_session() -> (sesión) navegar | (sin sesión) form
//        submit() -> (redirección OK) navegar | (fallo) diálogo
// Toda mutación pasa por SignInState, que notifica a la vista.
// ============================================================================

use crate::models::{AuthOutcome, Credentials, RedirectTarget, SessionOutcome, SignInError};
use crate::services::{AuthApi, Navigator};
use crate::state::{CancellationToken, SignInState, ViewPhase};

pub struct SignInViewModel<A, N> {
    api: A,
    navigator: N,
    state: SignInState,
    redirect: RedirectTarget,
    token: CancellationToken,
}

impl<A, N> SignInViewModel<A, N>
where
    A: AuthApi,
    N: Navigator,
{
    /// `token` debe ser el mismo que usa `api` para abortar peticiones
    pub fn new(api: A, navigator: N, redirect: RedirectTarget, token: CancellationToken) -> Self {
        Self {
            api,
            navigator,
            state: SignInState::new(),
            redirect,
            token,
        }
    }

    pub fn state(&self) -> &SignInState {
        &self.state
    }

    /// Comprobación inicial de sesión. Una sola petición, sin reintentos.
    pub async fn check_session(&self) {
        log::info!("🔍 [SIGN-IN] Comprobando sesión existente...");
        let result = self.api.whoami().await;

        if self.is_stale() {
            log::debug!("🛑 [SIGN-IN] Respuesta de whoami descartada (componente desmontado)");
            return;
        }

        match result {
            Ok(reply) => match SessionOutcome::from_reply(&reply) {
                SessionOutcome::Authenticated => {
                    log::info!("✅ [SIGN-IN] Sesión activa, redirigiendo a '{}'", self.redirect.as_str());
                    if self.redirect.is_empty() {
                        log::warn!("⚠️ [SIGN-IN] Sin parámetro redirect: se navega a la URL vacía");
                    }
                    self.navigate(self.redirect.as_str());
                }
                SessionOutcome::Anonymous => {
                    log::info!("👤 [SIGN-IN] Sin sesión (HTTP {}), mostrando formulario", reply.status);
                    self.state.mark_checked();
                }
                SessionOutcome::Failed(error) => {
                    log::warn!("⚠️ [SIGN-IN] whoami HTTP {}: {}", reply.status, error);
                    self.state.mark_checked();
                    self.present(&error);
                }
            },
            Err(e) => {
                log::error!("❌ [SIGN-IN] whoami falló: {}", e);
                self.state.mark_checked();
                self.present(&SignInError::CommunicationFailure);
            }
        }
    }

    /// Envío del formulario
    pub async fn submit(&self, credentials: Credentials) {
        if self.token.is_cancelled() {
            return;
        }
        if !credentials.is_complete() {
            log::warn!("⚠️ [SIGN-IN] Formulario incompleto, no se envía");
            return;
        }
        if self.state.phase() != ViewPhase::Ready {
            log::warn!("⚠️ [SIGN-IN] Envío ignorado en fase {:?}", self.state.phase());
            return;
        }

        log::info!("🔐 [SIGN-IN] Iniciando login para {}", credentials.username);
        let result = self.api.login(&credentials, &self.redirect).await;

        if self.is_stale() {
            log::debug!("🛑 [SIGN-IN] Respuesta de login descartada (componente desmontado)");
            return;
        }

        match result {
            Ok(reply) => {
                let outcome = AuthOutcome::from_reply(&reply);
                match outcome {
                    AuthOutcome::Redirected { url } => {
                        log::info!("✅ [SIGN-IN] Login correcto, navegando a {}", url);
                        self.navigate(&url);
                    }
                    AuthOutcome::AmbiguousFailure => {
                        log::warn!(
                            "⚠️ [SIGN-IN] Redirección seguida pero respuesta final HTTP {}",
                            reply.status
                        );
                        self.present(&SignInError::CommunicationFailure);
                    }
                    AuthOutcome::Rejected(error) => {
                        log::warn!("⚠️ [SIGN-IN] Login rechazado HTTP {}: {}", reply.status, error);
                        self.present(&error);
                    }
                }
            }
            Err(e) => {
                log::error!("❌ [SIGN-IN] login falló: {}", e);
                self.present(&SignInError::CommunicationFailure);
            }
        }
    }

    /// Mostrar el diálogo para un fallo
    pub fn present(&self, error: &SignInError) {
        self.state.show_dialog(error.title(), &error.message());
    }

    /// Botón "Cancel" del diálogo
    pub fn dismiss_dialog(&self) {
        self.state.hide_dialog();
    }

    /// Desmontaje: aborta peticiones y descarta respuestas tardías
    pub fn teardown(&self) {
        log::info!("👋 [SIGN-IN] Desmontando componente");
        self.token.cancel();
    }

    fn is_stale(&self) -> bool {
        self.token.is_cancelled() || self.state.phase() == ViewPhase::Navigating
    }

    fn navigate(&self, url: &str) {
        match self.navigator.navigate(url) {
            Ok(()) => self.state.mark_navigating(url),
            Err(e) => {
                log::error!("❌ [SIGN-IN] Navegación a '{}' rechazada: {}", url, e);
                // Si falla desde la comprobación inicial, el diálogo necesita el formulario visible
                if !self.state.is_checked() {
                    self.state.mark_checked();
                }
                self.present(&SignInError::RedirectFailure { url: url.to_string() });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiError, HttpReply};
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Reply = Result<HttpReply, ApiError>;

    /// Doble de AuthApi con respuestas programadas
    #[derive(Default)]
    struct FakeApi {
        whoami: RefCell<Option<Reply>>,
        login: RefCell<Option<Reply>>,
        login_calls: Rc<RefCell<Vec<(Credentials, RedirectTarget)>>>,
        cancel_during_whoami: Option<CancellationToken>,
        cancel_during_login: Option<CancellationToken>,
    }

    impl FakeApi {
        fn session(reply: Reply) -> Self {
            Self {
                whoami: RefCell::new(Some(reply)),
                ..Self::default()
            }
        }

        fn with_login(self, reply: Reply) -> Self {
            *self.login.borrow_mut() = Some(reply);
            self
        }

        /// El componente se desmonta mientras whoami está en vuelo
        fn cancelling_whoami(mut self, token: &CancellationToken) -> Self {
            self.cancel_during_whoami = Some(token.clone());
            self
        }

        /// El componente se desmonta mientras login está en vuelo
        fn cancelling_login(mut self, token: &CancellationToken) -> Self {
            self.cancel_during_login = Some(token.clone());
            self
        }
    }

    fn teardown_in_flight(token: &Option<CancellationToken>) {
        if let Some(token) = token {
            token.cancel();
        }
    }

    impl AuthApi for FakeApi {
        async fn whoami(&self) -> Result<HttpReply, ApiError> {
            teardown_in_flight(&self.cancel_during_whoami);
            self.whoami.borrow_mut().take().expect("whoami not scripted")
        }

        async fn login(
            &self,
            credentials: &Credentials,
            redirect: &RedirectTarget,
        ) -> Result<HttpReply, ApiError> {
            self.login_calls
                .borrow_mut()
                .push((credentials.clone(), redirect.clone()));
            teardown_in_flight(&self.cancel_during_login);
            self.login.borrow_mut().take().expect("login not scripted")
        }
    }

    #[derive(Clone, Default)]
    struct FakeNavigator {
        visits: Rc<RefCell<Vec<String>>>,
        reject: bool,
    }

    impl Navigator for FakeNavigator {
        fn navigate(&self, url: &str) -> Result<(), String> {
            if self.reject {
                return Err("SecurityError".to_string());
            }
            self.visits.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn view_model(
        api: FakeApi,
        redirect: &str,
    ) -> (SignInViewModel<FakeApi, FakeNavigator>, FakeNavigator) {
        view_model_with_token(api, redirect, CancellationToken::new())
    }

    fn view_model_with_token(
        api: FakeApi,
        redirect: &str,
        token: CancellationToken,
    ) -> (SignInViewModel<FakeApi, FakeNavigator>, FakeNavigator) {
        let navigator = FakeNavigator::default();
        let vm = SignInViewModel::new(api, navigator.clone(), RedirectTarget::new(redirect), token);
        (vm, navigator)
    }

    fn ok(status: u16) -> Reply {
        Ok(HttpReply::new(status, "/auth/api/login"))
    }

    fn checked_vm(login: Reply, redirect: &str) -> (SignInViewModel<FakeApi, FakeNavigator>, FakeNavigator) {
        let (vm, navigator) = view_model(
            FakeApi::session(Ok(HttpReply::new(401, "/auth/api/whoami"))).with_login(login),
            redirect,
        );
        block_on(vm.check_session());
        (vm, navigator)
    }

    #[test]
    fn active_session_navigates_once_to_redirect() {
        let (vm, navigator) = view_model(
            FakeApi::session(Ok(HttpReply::new(200, "/auth/api/whoami"))),
            "/dashboard",
        );
        block_on(vm.check_session());

        assert_eq!(*navigator.visits.borrow(), vec!["/dashboard".to_string()]);
        assert_eq!(vm.state().phase(), ViewPhase::Navigating);
        assert!(!vm.state().is_checked());
        assert!(!vm.state().dialog.get().visible);
    }

    #[test]
    fn active_session_without_redirect_navigates_to_empty_target() {
        let (vm, navigator) = view_model(
            FakeApi::session(Ok(HttpReply::new(204, "/auth/api/whoami"))),
            "",
        );
        block_on(vm.check_session());
        assert_eq!(*navigator.visits.borrow(), vec![String::new()]);
    }

    #[test]
    fn disabled_account_on_session_check() {
        let (vm, navigator) = view_model(
            FakeApi::session(Ok(HttpReply::new(403, "/auth/api/whoami"))),
            "/x",
        );
        block_on(vm.check_session());

        assert!(vm.state().is_checked());
        let dialog = vm.state().dialog.get();
        assert!(dialog.visible);
        assert_eq!(dialog.title, "Error");
        assert_eq!(dialog.message, "This account is disabled");
        assert!(navigator.visits.borrow().is_empty());
    }

    #[test]
    fn server_error_on_session_check() {
        let (vm, _) = view_model(
            FakeApi::session(Ok(HttpReply::new(503, "/auth/api/whoami"))),
            "/x",
        );
        block_on(vm.check_session());

        let dialog = vm.state().dialog.get();
        assert!(dialog.visible);
        assert_eq!(dialog.message, "Failed to reach the authentication server");
    }

    #[test]
    fn unauthenticated_session_shows_plain_form() {
        let (vm, _) = view_model(
            FakeApi::session(Ok(HttpReply::new(401, "/auth/api/whoami"))),
            "/x",
        );
        block_on(vm.check_session());

        assert_eq!(vm.state().phase(), ViewPhase::Ready);
        assert!(!vm.state().dialog.get().visible);
    }

    #[test]
    fn network_error_on_session_check() {
        let (vm, _) = view_model(
            FakeApi::session(Err(ApiError::Network("connection refused".to_string()))),
            "/x",
        );
        block_on(vm.check_session());

        assert_eq!(vm.state().phase(), ViewPhase::Ready);
        assert_eq!(
            vm.state().dialog.get().message,
            "Failed to reach the authentication server"
        );
    }

    #[test]
    fn invalid_credentials_dialog() {
        let (vm, navigator) = checked_vm(ok(401), "/x");
        block_on(vm.submit(Credentials::new("ana@example.com", "wrong")));

        let dialog = vm.state().dialog.get();
        assert!(dialog.visible);
        assert_eq!(dialog.title, "Login failed");
        assert_eq!(dialog.message, "Invalid credentials, please retry");
        assert!(navigator.visits.borrow().is_empty());
    }

    #[test]
    fn disabled_account_on_login() {
        let (vm, _) = checked_vm(ok(403), "/x");
        block_on(vm.submit(Credentials::new("ana@example.com", "pw")));

        let dialog = vm.state().dialog.get();
        assert_eq!(dialog.title, "Login failed");
        assert_eq!(dialog.message, "Account disabled, contact the administrator");
    }

    #[test]
    fn other_login_status_is_communication_failure() {
        let (vm, _) = checked_vm(ok(500), "/x");
        block_on(vm.submit(Credentials::new("ana@example.com", "pw")));

        let dialog = vm.state().dialog.get();
        assert_eq!(dialog.title, "Error");
        assert_eq!(dialog.message, "Failed to reach the authentication server");
    }

    #[test]
    fn redirected_success_navigates_to_final_url() {
        let reply = Ok(HttpReply::new(200, "https://portal.local/home").after_redirect());
        let (vm, navigator) = checked_vm(reply, "https://portal.local/home");
        block_on(vm.submit(Credentials::new("ana@example.com", "pw")));

        assert_eq!(*navigator.visits.borrow(), vec!["https://portal.local/home".to_string()]);
        assert_eq!(vm.state().phase(), ViewPhase::Navigating);
        assert!(!vm.state().dialog.get().visible);
    }

    #[test]
    fn redirected_failure_is_ambiguous() {
        let reply = Ok(HttpReply::new(404, "https://portal.local/missing").after_redirect());
        let (vm, navigator) = checked_vm(reply, "/x");
        block_on(vm.submit(Credentials::new("ana@example.com", "pw")));

        assert!(navigator.visits.borrow().is_empty());
        assert_eq!(
            vm.state().dialog.get().message,
            "Failed to reach the authentication server"
        );
    }

    #[test]
    fn network_error_on_login() {
        let (vm, _) = checked_vm(Err(ApiError::Network("offline".to_string())), "/x");
        block_on(vm.submit(Credentials::new("ana@example.com", "pw")));
        assert_eq!(vm.state().dialog.get().title, "Error");
    }

    #[test]
    fn login_receives_credentials_and_redirect() {
        let api = FakeApi::session(Ok(HttpReply::new(401, "/auth/api/whoami"))).with_login(ok(401));
        let calls = Rc::clone(&api.login_calls);
        let (vm, _) = view_model(api, "/reports");
        block_on(vm.check_session());
        block_on(vm.submit(Credentials::new("ana@example.com", "pw")));

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.username, "ana@example.com");
        assert_eq!(calls[0].1.as_str(), "/reports");
    }

    #[test]
    fn incomplete_form_is_not_sent() {
        let api = FakeApi::session(Ok(HttpReply::new(401, "/auth/api/whoami")));
        let calls = Rc::clone(&api.login_calls);
        let (vm, _) = view_model(api, "/x");
        block_on(vm.check_session());
        block_on(vm.submit(Credentials::new("ana@example.com", "")));

        assert!(calls.borrow().is_empty());
        assert!(!vm.state().dialog.get().visible);
    }

    #[test]
    fn submit_before_check_is_ignored() {
        let api = FakeApi::default();
        let calls = Rc::clone(&api.login_calls);
        let (vm, _) = view_model(api, "/x");
        block_on(vm.submit(Credentials::new("ana", "pw")));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn dismiss_always_hides_dialog() {
        let (vm, _) = checked_vm(ok(401), "/x");
        vm.dismiss_dialog();
        assert!(!vm.state().dialog.get().visible);

        block_on(vm.submit(Credentials::new("ana", "pw")));
        assert!(vm.state().dialog.get().visible);
        vm.dismiss_dialog();

        let dialog = vm.state().dialog.get();
        assert!(!dialog.visible);
        assert_eq!(dialog.message, "Invalid credentials, please retry");
    }

    #[test]
    fn response_after_teardown_is_dropped() {
        let token = CancellationToken::new();
        let api = FakeApi::session(Ok(HttpReply::new(200, "/auth/api/whoami"))).cancelling_whoami(&token);
        let (vm, navigator) = view_model_with_token(api, "/x", token.clone());
        block_on(vm.check_session());

        assert!(token.is_cancelled());
        assert!(navigator.visits.borrow().is_empty());
        assert_eq!(vm.state().phase(), ViewPhase::Loading);
    }

    #[test]
    fn submit_after_teardown_is_not_sent() {
        let token = CancellationToken::new();
        let api = FakeApi::session(Ok(HttpReply::new(401, "/auth/api/whoami")))
            .with_login(Err(ApiError::Aborted));
        let (vm, _) = view_model_with_token(api, "/x", token.clone());
        block_on(vm.check_session());

        vm.teardown();
        block_on(vm.submit(Credentials::new("ana", "pw")));
        assert!(!vm.state().dialog.get().visible);
    }

    #[test]
    fn login_response_arriving_after_teardown_is_dropped() {
        let token = CancellationToken::new();
        let api = FakeApi::session(Ok(HttpReply::new(401, "/auth/api/whoami")))
            .with_login(ok(401))
            .cancelling_login(&token);
        let calls = Rc::clone(&api.login_calls);
        let (vm, navigator) = view_model_with_token(api, "/x", token.clone());
        block_on(vm.check_session());
        block_on(vm.submit(Credentials::new("ana@example.com", "wrong")));

        // La petición salió; su respuesta llegó ya desmontado
        assert_eq!(calls.borrow().len(), 1);
        assert!(token.is_cancelled());
        assert!(!vm.state().dialog.get().visible);
        assert_eq!(vm.state().phase(), ViewPhase::Ready);
        assert!(navigator.visits.borrow().is_empty());
    }

    #[test]
    fn redirect_arriving_after_teardown_does_not_navigate() {
        let token = CancellationToken::new();
        let reply = Ok(HttpReply::new(200, "https://portal.local/home").after_redirect());
        let api = FakeApi::session(Ok(HttpReply::new(401, "/auth/api/whoami")))
            .with_login(reply)
            .cancelling_login(&token);
        let (vm, navigator) = view_model_with_token(api, "/x", token);
        block_on(vm.check_session());
        block_on(vm.submit(Credentials::new("ana@example.com", "pw")));

        assert!(navigator.visits.borrow().is_empty());
        assert_eq!(vm.state().phase(), ViewPhase::Ready);
    }

    #[test]
    fn rejected_navigation_shows_redirect_failure() {
        let api = FakeApi::session(Ok(HttpReply::new(200, "/auth/api/whoami")));
        let navigator = FakeNavigator {
            reject: true,
            ..FakeNavigator::default()
        };
        let vm = SignInViewModel::new(
            api,
            navigator,
            RedirectTarget::new("javascript:void(0)"),
            CancellationToken::new(),
        );
        block_on(vm.check_session());

        assert_eq!(vm.state().phase(), ViewPhase::Ready);
        let dialog = vm.state().dialog.get();
        assert_eq!(dialog.title, "Redirect failed");
        assert_eq!(dialog.message, "Unable to redirect to javascript:void(0)");
    }
}
