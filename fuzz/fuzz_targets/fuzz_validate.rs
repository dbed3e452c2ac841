#![no_main]

use integration_manifest::parse::Format;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let document = match integration_manifest::parse(&s, Format::Json) {
        Ok(d) => d,
        Err(_) => return,
    };

    // Failure must always come with at least one violation.
    if let Err(errors) = integration_manifest::validate(&document) {
        assert!(!errors.is_empty(), "validate returned Err with no violations");
    }
});
