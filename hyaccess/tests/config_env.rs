use hyaccess::{config::EmitterConfig, magic::ENV_EMITTER_CONFIG_PATH};

// Lives in its own test binary: it mutates the process environment.
#[test]
fn environment_variable_overrides_default_path() {
    let dir = std::env::temp_dir().join(format!("hyaccess-env-{}", std::process::id()));
    let path = dir.join("custom.toml");

    // SAFETY: no other thread of this test binary reads the environment.
    unsafe { std::env::set_var(ENV_EMITTER_CONFIG_PATH, &path) };
    assert_eq!(EmitterConfig::default_path(), path);

    // Nothing there yet.
    assert_eq!(EmitterConfig::load_or_default().unwrap(), EmitterConfig::default());

    let config = EmitterConfig {
        decode_fields: true,
        ..Default::default()
    };
    config.save_to_toml(&path).unwrap();
    assert_eq!(EmitterConfig::load_or_default().unwrap(), config);

    std::fs::remove_dir_all(&dir).unwrap();
    unsafe { std::env::remove_var(ENV_EMITTER_CONFIG_PATH) };
}
