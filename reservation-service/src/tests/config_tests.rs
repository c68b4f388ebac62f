use super::*;

#[test]
fn default_seed_matches_restaurant_floor() {
    let tables = parse_seed_tables(DEFAULT_SEED_TABLES).expect("seed");
    let layout: Vec<(u32, u32)> = tables.iter().map(|t| (t.id, t.seats)).collect();
    assert_eq!(layout, vec![(1, 4), (2, 4), (3, 6), (4, 6), (5, 8)]);
    assert!(tables.iter().all(|t| t.available));
}

#[test]
fn seed_tolerates_whitespace_and_trailing_comma() {
    let tables = parse_seed_tables(" 10 : 2 , 11:12 ,").expect("seed");
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].id, 10);
    assert_eq!(tables[1].seats, 12);
}

#[test]
fn seed_rejects_duplicates_and_zero_values() {
    let err = parse_seed_tables("1:4,1:6").expect_err("duplicate");
    assert!(err.to_string().contains("more than once"));

    assert!(parse_seed_tables("0:4").is_err());
    assert!(parse_seed_tables("2:0").is_err());
}

#[test]
fn seed_rejects_malformed_entries() {
    assert!(parse_seed_tables("").is_err());
    assert!(parse_seed_tables("1-4").is_err());
    assert!(parse_seed_tables("a:4").is_err());
    assert!(parse_seed_tables("1:four").is_err());
}

#[test]
fn args_fall_back_to_defaults() {
    let args = Args::try_parse_from(["reservation-service", "--host", "127.0.0.1"]).expect("args");
    assert_eq!(args.bind_address(), format!("127.0.0.1:{}", args.port));
    assert_eq!(args.public_dir, PathBuf::from("public"));
    assert_eq!(args.seed_tables().expect("seed").len(), 5);
}

#[test]
fn args_accept_custom_tables() {
    let args = Args::try_parse_from([
        "reservation-service",
        "--host",
        "0.0.0.0",
        "--port",
        "8080",
        "--tables",
        "7:2",
    ])
    .expect("args");
    assert_eq!(args.bind_address(), "0.0.0.0:8080");
    assert_eq!(args.seed_tables().expect("seed")[0].id, 7);
}
