use pocket_invaders::config::*;

#[test]
fn defaults_are_valid() {
    assert!(Rules::default().validate().is_ok());
}

#[test]
fn derived_geometry() {
    let r = Rules::default();
    assert_eq!(r.floor_y(), 57);
    assert_eq!(r.player_max_x(), 117);
    assert_eq!(r.player_start_x(), 59);
    assert_eq!(r.muzzle_y(), 55);
}

#[test]
fn empty_document_gives_defaults() {
    let r = Rules::from_toml_str("").unwrap();
    assert_eq!(r, Rules::default());
}

#[test]
fn partial_document_overrides_only_given_keys() {
    let r = Rules::from_toml_str(
        r#"
            alien_move_interval_ms = 250
            player_step = 4
        "#,
    )
    .unwrap();
    assert_eq!(r.alien_move_interval_ms, 250);
    assert_eq!(r.player_step, 4);
    assert_eq!(r.screen_width, 128);
    assert_eq!(r.explosion_duration_ms, 200);
}

#[test]
fn unknown_key_is_a_parse_error() {
    let err = Rules::from_toml_str("lives = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_step_is_rejected() {
    let err = Rules::from_toml_str("alien_step = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("alien_step"));
}

#[test]
fn zero_interval_is_rejected() {
    let err = Rules::from_toml_str("animation_interval_ms = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn formation_must_fit_the_field() {
    let err = Rules::from_toml_str("alien_spacing_x = 40").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = Rules::from_toml_str("formation_origin_y = 30").unwrap_err();
    assert!(err.to_string().contains("floor"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Rules::load("/definitely/not/here/rules.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn oversized_screen_is_rejected() {
    let err = Rules::from_toml_str("screen_width = 70000").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("screen_width"));

    let err = Rules::from_toml_str("screen_height = 1025").unwrap_err();
    assert!(err.to_string().contains("screen_height"));
}

#[test]
fn largest_screen_is_accepted() {
    let r = Rules::from_toml_str(&format!(
        "screen_width = {MAX_SCREEN_SIDE}\nscreen_height = {MAX_SCREEN_SIDE}"
    ))
    .unwrap();
    assert_eq!(r.screen_width, MAX_SCREEN_SIDE);
}
