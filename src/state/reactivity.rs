// ============================================================================
// REACTIVITY - Estado compartido con notificación a subscribers
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Valor reactivo. Los clones comparten valor y subscribers, así que un
/// `set` hecho desde una tarea async notifica a la vista.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Leer el valor sin clonarlo
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Reemplazar el valor y notificar
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Modificar en sitio y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn notify(&self) {
        // Copia de la lista: un callback puede suscribir a otro
        let subscribers: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T: Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(0u32);
        let hits = Rc::new(Cell::new(0));
        {
            let hits = Rc::clone(&hits);
            state.subscribe(move || hits.set(hits.get() + 1));
        }

        let handle = state.clone();
        handle.set(3);
        handle.update(|value| *value += 1);

        assert_eq!(state.get(), 4);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn callback_may_read_the_value() {
        let state = ReactiveState::new(String::from("a"));
        let seen = Rc::new(RefCell::new(String::new()));
        {
            let reader = state.clone();
            let seen = Rc::clone(&seen);
            state.subscribe(move || *seen.borrow_mut() = reader.get());
        }
        state.set("b".to_string());
        assert_eq!(seen.borrow().as_str(), "b");
    }
}
