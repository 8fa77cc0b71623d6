use dft_testkit::{
    TestKit,
    config::{ConfigError, KitConfig},
    log::Level,
    token::TokenVariant,
};

#[test]
fn parse_full_config() {
    let toml = r#"
        host = "http://127.0.0.1:4943"
        default_identity = "dft_main"

        [identities]
        dft_main = "2vxsx-fae"
        dft_miner = "aaaaa-aa"

        [tokens.dft_all_features]
        decimals = 18

        [tokens.dft_all_features.fee]
        minimum = "1"
        rate = 0

        [log]
        level = "warn"
    "#;

    // Should parse and validate
    let cfg = KitConfig::from_toml(toml).expect("init config");
    assert_eq!(cfg.host, "http://127.0.0.1:4943");
    assert_eq!(cfg.log.level, Level::Warn);

    let token = cfg.get_token(TokenVariant::AllFeatures).expect("token config");
    let fee = token.token_fee().expect("fee").expect("fee present");
    assert_eq!(fee.minimum.0.to_string(), "1000000000000000000");
    assert_eq!(fee.rate_decimals, 8);

    let kit = TestKit::new(cfg).expect("kit");
    assert_eq!(kit.identities().names().count(), 2);
}

#[test]
fn reject_unknown_token_variant() {
    let toml = r#"
        [tokens.dft_gold]
        decimals = 8
    "#;

    let err = KitConfig::from_toml(toml).unwrap_err();
    assert!(matches!(err, ConfigError::CannotParseToml(msg) if msg.contains("dft_gold")));
}

#[test]
fn reject_inexact_fee_minimum() {
    let toml = r#"
        [tokens.dft_basic]
        decimals = 0

        [tokens.dft_basic.fee]
        minimum = "0.5"
    "#;

    let err = KitConfig::from_toml(toml).unwrap_err();
    assert!(matches!(err, ConfigError::ConfigSchema(_)));
    assert!(err.to_string().contains("dft_basic"));
}

#[test]
fn reject_invalid_principal() {
    let toml = r#"
        [identities]
        dft_main = "not-a-principal"
    "#;

    assert!(KitConfig::from_toml(toml).is_err());
}
