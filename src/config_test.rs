use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_only_database_url_set() {
    let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")])).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert_eq!(config.images_dir, PathBuf::from("instance/images"));
    assert_eq!(config.display_offset.local_minus_utc(), 8 * 3600);
}

#[test]
fn missing_database_url_is_an_error() {
    assert_eq!(Config::from_lookup(lookup_from(&[])), Err(ConfigError::Missing("DATABASE_URL")));
    assert_eq!(
        Config::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])),
        Err(ConfigError::Missing("DATABASE_URL"))
    );
}

#[test]
fn overrides_are_parsed() {
    let config = Config::from_lookup(lookup_from(&[
        ("DATABASE_URL", "postgres://x"),
        ("PORT", "9000"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("IMAGES_DIR", "/var/feeder"),
        ("DISPLAY_UTC_OFFSET_HOURS", "-5"),
    ]))
    .unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.db_max_connections, 12);
    assert_eq!(config.images_dir, PathBuf::from("/var/feeder"));
    assert_eq!(config.display_offset.local_minus_utc(), -5 * 3600);
}

#[test]
fn invalid_values_name_the_variable() {
    let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x"), ("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "eighty".to_owned() });

    let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x"), ("DISPLAY_UTC_OFFSET_HOURS", "30")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "DISPLAY_UTC_OFFSET_HOURS", .. }));
}
