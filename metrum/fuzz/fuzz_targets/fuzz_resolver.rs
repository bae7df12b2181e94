#![no_main]

use libfuzzer_sys::fuzz_target;
use metrum::{Engine, UnitSystem};

// First line is a unit system in JSON, the rest is the expression
fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let (json, source) = input.split_once('\n').unwrap_or(("{}", input));

        let mut engine = Engine::new().with_unit_system(UnitSystem::empty());
        if let Ok(system) = UnitSystem::from_json(json) {
            let _ = engine.add_unit_system(system);
        }

        let _ = engine.parse_units(source);
        let _ = engine.validate();
    }
});
