#![no_main]

use libfuzzer_sys::fuzz_target;
use mdpanel_runtime::{AppConfig, PanelApp};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for parsed in [AppConfig::from_toml_str(text), AppConfig::from_json_str(text)] {
        let Ok(config) = parsed else {
            continue;
        };
        // A configuration either validates and builds, or reports problems.
        let problems = config.validate();
        match PanelApp::new(config) {
            Ok(_) => assert!(problems.is_empty(), "built despite {problems:?}"),
            Err(_) => assert!(!problems.is_empty(), "rejected without problems"),
        }
    }
});
