


// Unit system tests
mod analysis;
mod unit_system;

// Engine tests
mod engine;

use crate::{MessageCatalog, ParserContext, UnitSystem};

/// Run `f` with a parser context over `system` and the default messages
pub(crate) fn with_context<T>(system: &UnitSystem, f: impl FnOnce(&ParserContext<'_>) -> T) -> T {
    let messages = MessageCatalog::default();
    let context = ParserContext::new(&messages, system);
    f(&context)
}
