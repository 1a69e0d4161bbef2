// ============================================================================
// SIGN-IN STATE - Estado del componente de inicio de sesión
// ============================================================================
// Solo vive mientras el componente está montado. Lo muta el ViewModel y lo
// lee la vista.
// ============================================================================

use std::rc::Rc;

use crate::state::ReactiveState;

/// ¿Terminó la comprobación inicial de sesión?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckState {
    pub is_checked: bool,
}

/// Diálogo modal de error
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogState {
    pub visible: bool,
    pub title: String,
    pub message: String,
}

/// Fase de la vista, derivada del estado
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    /// Comprobación de sesión en curso
    Loading,
    /// Formulario visible (con o sin diálogo)
    Ready,
    /// Navegación emitida, la página se descarga. Terminal.
    Navigating,
}

#[derive(Clone, Default)]
pub struct SignInState {
    pub check: ReactiveState<CheckState>,
    pub dialog: ReactiveState<DialogState>,
    /// Destino de la navegación emitida, si la hubo
    pub navigation: ReactiveState<Option<String>>,
}

impl SignInState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ViewPhase {
        if self.navigation.with(Option::is_some) {
            ViewPhase::Navigating
        } else if self.check.with(|check| check.is_checked) {
            ViewPhase::Ready
        } else {
            ViewPhase::Loading
        }
    }

    pub fn is_checked(&self) -> bool {
        self.check.with(|check| check.is_checked)
    }

    pub fn mark_checked(&self) {
        self.check.set(CheckState { is_checked: true });
    }

    pub fn show_dialog(&self, title: &str, message: &str) {
        self.dialog.set(DialogState {
            visible: true,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    /// Oculta el diálogo. Título y mensaje se quedan; el próximo
    /// `show_dialog` los sobrescribe.
    pub fn hide_dialog(&self) {
        self.dialog.update(|dialog| dialog.visible = false);
    }

    pub fn mark_navigating(&self, url: &str) {
        self.navigation.set(Some(url.to_string()));
    }

    /// Un único callback para cualquier cambio de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        {
            let callback = Rc::clone(&callback);
            self.check.subscribe(move || callback());
        }
        {
            let callback = Rc::clone(&callback);
            self.dialog.subscribe(move || callback());
        }
        self.navigation.subscribe(move || callback());
    }
}
