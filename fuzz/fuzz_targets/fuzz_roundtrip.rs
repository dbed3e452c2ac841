#![no_main]

use integration_manifest::parse::Format;
use integration_manifest::serialize::to_json;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let document = match integration_manifest::parse(&s, Format::Json) {
        Ok(d) => d,
        Err(_) => return,
    };
    let integration = match integration_manifest::validate(&document) {
        Ok(i) => i,
        Err(_) => return,
    };

    let json = to_json(&integration).expect("a validated integration always serializes");
    let reparsed =
        integration_manifest::parse(&json, Format::Json).expect("serialized JSON parses");

    // Anything that validated once must validate again to the same value.
    match integration_manifest::validate(&reparsed) {
        Ok(again) => assert_eq!(again, integration, "roundtrip changed the integration"),
        Err(errors) => panic!(
            "Roundtrip failure: serialized integration no longer validates.\n{}\nJSON:\n{}",
            errors,
            json.get(..500).unwrap_or(&json),
        ),
    }
});
