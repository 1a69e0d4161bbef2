// ============================================================================
// STATE MODULE - Estado con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod sign_in_state;
pub mod lifetime;

pub use reactivity::*;
pub use sign_in_state::*;
pub use lifetime::*;
