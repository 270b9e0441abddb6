//! Flag parsing and base-variant construction.

use super::parse;
use crate::cli::{build_base, exclusive, Cli};
use clap::Parser;
use urledit_core::error::Error;

#[test]
fn parse_repeatable_flags() {
    let cli = parse(&[
        "urledit",
        "--url",
        "https://a.example/",
        "--set",
        "host=b.example",
        "--set",
        "port=8080",
        "--trim",
        "query=utm_*",
        "https://c.example/",
    ]);
    assert_eq!(cli.url, ["https://a.example/"]);
    assert_eq!(cli.set, ["host=b.example", "port=8080"]);
    assert_eq!(cli.trim, ["query=utm_*"]);
    assert_eq!(cli.urls, ["https://c.example/"]);
}

#[test]
fn parse_short_aliases() {
    let cli = parse(&[
        "urledit",
        "-g",
        "{host}",
        "-s",
        "scheme=https",
        "-a",
        "path=x",
        "-f",
        "-",
    ]);
    assert_eq!(cli.get, ["{host}"]);
    assert_eq!(cli.set, ["scheme=https"]);
    assert_eq!(cli.append, ["path=x"]);
    assert_eq!(cli.url_file, ["-"]);
}

#[test]
fn parse_mode_flags() {
    let cli = parse(&["urledit", "--json", "--verify", "--accept-space"]);
    assert!(cli.json);
    assert!(cli.verify);
    assert!(cli.accept_space);

    let cli = parse(&["urledit"]);
    assert!(!cli.json);
    assert!(!cli.verify);
    assert!(!cli.accept_space);
}

#[test]
fn base_variant_encodes_appends_at_insertion() {
    let cli = parse(&[
        "urledit",
        "--append",
        "path=a b",
        "--append",
        "query=n=v w",
        "--append",
        "PATH=c/d",
    ]);
    let base = build_base(&cli).unwrap();
    assert_eq!(base.append_path, ["a%20b", "c%2Fd"]);
    assert_eq!(base.append_query, ["n=v%20w"]);
}

#[test]
fn base_variant_rejects_unknown_append_target() {
    let cli = parse(&["urledit", "--append", "fragment=x"]);
    let err = build_base(&cli).unwrap_err();
    assert!(matches!(err, Error::Append(_)));
    assert_eq!(
        err.to_string(),
        "--append unsupported component: fragment=x"
    );
}

#[test]
fn exclusive_flags_allow_at_most_one() {
    assert_eq!(exclusive(&[], "--get").unwrap(), None);
    let one = ["{host}".to_string()];
    assert_eq!(exclusive(&one, "--get").unwrap(), Some("{host}"));

    let two = ["a".to_string(), "b".to_string()];
    let err = exclusive(&two, "--get").unwrap_err();
    assert!(matches!(err, Error::Flag(_)));
    assert_eq!(err.to_string(), "only one --get is supported");
}

#[test]
fn unknown_flag_is_a_parse_error() {
    assert!(Cli::try_parse_from(["urledit", "--bogus"]).is_err());
}
