//! Startup configuration loading from the process environment.

use bg_core::{RolesConfig, config};

#[test]
fn config_loads_from_process_environment() {
    // SAFETY: these variables are read and written only by this test.
    unsafe {
        std::env::set_var(config::ENDPOINT_VAR, "https://roles.example.com/v3/identities/roles");
        std::env::set_var(config::API_KEY_VAR, "env-key");
    }

    let loaded = RolesConfig::from_env().expect("env config");

    assert_eq!(
        loaded.endpoint.as_str(),
        "https://roles.example.com/v3/identities/roles"
    );
    assert_eq!(loaded.api_key, "env-key");
    assert_eq!(loaded.timeout, config::DEFAULT_TIMEOUT);
}
