#![no_main]

use libfuzzer_sys::fuzz_target;
use metrum::message_builder::render;
use metrum::{parse_expression, MessageCatalog, ParserContext, UnitSystem};

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let messages = MessageCatalog::default();
        let unit_system = UnitSystem::empty();
        let context = ParserContext::new(&messages, &unit_system);

        let output = parse_expression(source, &context);
        let char_count = source.chars().count();
        for diagnostic in &output.diagnostics {
            assert!(diagnostic.span.end <= char_count);
        }
        let _ = render(source, &output.diagnostics);
    }
});
