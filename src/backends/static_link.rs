use super::symbols::Symbols;
use tracing::info;

/// Function table bound to the engine exports linked into this binary.
///
/// `build.rs` emits the link directives; resolution cannot fail at runtime.
pub(crate) fn link() -> Symbols {
    info!("Using statically linked facerec library");
    Symbols::linked()
}
