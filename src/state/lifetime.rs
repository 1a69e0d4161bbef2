// ============================================================================
// LIFETIME - Cancelación ligada a la vida del componente
// ============================================================================
// Al desmontar se cancela el token: las peticiones en vuelo se abortan y las
// respuestas que lleguen después se descartan sin tocar el estado.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type CancelHook = Box<dyn FnOnce()>;

#[derive(Default)]
struct TokenInner {
    cancelled: Cell<bool>,
    next_id: Cell<u64>,
    hooks: RefCell<Vec<(u64, CancelHook)>>,
}

#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Rc<TokenInner>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Idempotente: los hooks corren una sola vez
    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        let hooks = std::mem::take(&mut *self.inner.hooks.borrow_mut());
        log::debug!("🛑 [LIFETIME] Cancelando {} operaciones en vuelo", hooks.len());
        for (_, hook) in hooks {
            hook();
        }
    }

    /// Registrar una acción para la cancelación. Si ya está cancelado, corre
    /// en el acto. El hook se retira al soltar el guard.
    pub fn on_cancel<F>(&self, hook: F) -> CancelGuard
    where
        F: FnOnce() + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        if self.is_cancelled() {
            hook();
        } else {
            self.inner.hooks.borrow_mut().push((id, Box::new(hook)));
        }

        CancelGuard {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Hooks registrados y aún vivos
    pub fn pending_hooks(&self) -> usize {
        self.inner.hooks.borrow().len()
    }
}

/// Mantiene registrado un hook de `on_cancel` mientras viva
#[must_use = "soltar el guard retira el hook de cancelación"]
pub struct CancelGuard {
    inner: Weak<TokenInner>,
    id: u64,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.hooks.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Eventos de ciclo de vida de la página que afectan al componente
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEvent {
    /// `pagehide`; `persisted` = la página entra en la back/forward cache
    Hide { persisted: bool },
    /// `pageshow`; `persisted` = la página sale de la back/forward cache
    Show { persisted: bool },
}

/// Qué hacer con el componente ante un evento de página
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Cancelar peticiones en vuelo sin tocar el DOM
    Suspend,
    /// Montar un componente nuevo sobre el DOM restaurado
    Remount,
    Ignore,
}

impl PageEvent {
    /// Nunca se vacía el DOM en `pagehide`: si la página vuelve de la
    /// back/forward cache, el DOM restaurado es el que quedó.
    pub fn action(self) -> LifecycleAction {
        match self {
            Self::Hide { .. } => LifecycleAction::Suspend,
            Self::Show { persisted: true } => LifecycleAction::Remount,
            Self::Show { persisted: false } => LifecycleAction::Ignore,
        }
    }
}
