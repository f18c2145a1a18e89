#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let content = infracheck::Content::new("fuzz.tf", text);

        if let Ok(outputs) = content.outputs() {
            for name in outputs {
                let _ = content.has_description("output", name);
            }
        }
        let _ = content.has_validation_for("cluster_version");
        let _ = content.resource_count("aws_nat_gateway");
    }
});
