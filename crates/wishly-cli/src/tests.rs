use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["wishly-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_scrape_command_with_default_timeout() {
    let cli = Cli::try_parse_from(["wishly-cli", "scrape", "jumia.com.ng/item/123"])
        .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Scrape { url, timeout_secs }) => {
            assert_eq!(url, "jumia.com.ng/item/123");
            assert_eq!(timeout_secs, None);
        }
        other => panic!("expected scrape command, got {other:?}"),
    }
}

#[test]
fn parses_scrape_timeout_override() {
    let cli = Cli::try_parse_from([
        "wishly-cli",
        "scrape",
        "https://example.com/p",
        "--timeout-secs",
        "3",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Scrape {
            timeout_secs: Some(3),
            ..
        })
    ));
}

#[test]
fn scrape_requires_url() {
    assert!(Cli::try_parse_from(["wishly-cli", "scrape"]).is_err());
}

#[test]
fn rejects_non_numeric_timeout() {
    let result = Cli::try_parse_from([
        "wishly-cli",
        "scrape",
        "example.com",
        "--timeout-secs",
        "soon",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_price_command() {
    let cli = Cli::try_parse_from(["wishly-cli", "price", "₦15,500"]).expect("expected valid cli args");
    match cli.command {
        Some(Commands::Price { text }) => assert_eq!(text, "₦15,500"),
        other => panic!("expected price command, got {other:?}"),
    }
}

#[test]
fn parses_currency_command_with_domain() {
    let cli = Cli::try_parse_from(["wishly-cli", "currency", "1,200", "--domain", "jumia.com.ng"])
        .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Currency { text, domain }) => {
            assert_eq!(text, "1,200");
            assert_eq!(domain, "jumia.com.ng");
        }
        other => panic!("expected currency command, got {other:?}"),
    }
}

#[test]
fn currency_domain_defaults_to_empty() {
    let cli = Cli::try_parse_from(["wishly-cli", "currency", "$5"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Currency { ref domain, .. }) if domain.is_empty()
    ));
}

#[test]
fn format_price_prints_decimal_or_none() {
    assert_eq!(scrape::format_price("₦15,500"), "15500");
    assert_eq!(scrape::format_price("$19.99"), "19.99");
    assert_eq!(scrape::format_price("Call for price"), "none");
}
