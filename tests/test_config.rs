use warden::config::{Config, DEFAULT_WORKERS};
use warden::server::{DEFAULT_PORT, DEFAULT_SECURE_PORT};

#[test]
fn test_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.port, None);
    assert!(!cfg.tls);
    assert_eq!(cfg.max_workers, DEFAULT_WORKERS);
    assert!(cfg.db.is_none());
}

#[test]
fn test_effective_port_defaults_to_80() {
    let cfg = Config::default();
    assert_eq!(cfg.effective_port(), DEFAULT_PORT);
}

#[test]
fn test_effective_port_defaults_to_443_with_tls() {
    let cfg = Config {
        tls: true,
        ..Config::default()
    };
    assert_eq!(cfg.effective_port(), DEFAULT_SECURE_PORT);
}

#[test]
fn test_explicit_port_wins_over_defaults() {
    let cfg = Config {
        port: Some(8080),
        tls: true,
        ..Config::default()
    };
    assert_eq!(cfg.effective_port(), 8080);
}

#[test]
fn test_config_from_yaml() {
    let yaml = "\
port: 8080
tls: true
max_workers: 16
db:
  url: postgres://localhost/app
  username: app
  password: secret
";
    let cfg: Config = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(cfg.port, Some(8080));
    assert!(cfg.tls);
    assert_eq!(cfg.max_workers, 16);
    let db = cfg.db.unwrap();
    assert_eq!(db.url, "postgres://localhost/app");
    assert_eq!(db.username, "app");
    assert_eq!(db.password, "secret");
}

#[test]
fn test_partial_yaml_falls_back_to_defaults() {
    let cfg: Config = serde_yaml::from_str("port: 3000\n").unwrap();

    assert_eq!(cfg.port, Some(3000));
    assert!(!cfg.tls);
    assert_eq!(cfg.max_workers, DEFAULT_WORKERS);
    assert!(cfg.db.is_none());
}

#[test]
fn test_config_from_file() {
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warden.yaml");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"port: 9090\nmax_workers: 4\n")
        .unwrap();

    let cfg = Config::from_file(&path).unwrap();
    assert_eq!(cfg.port, Some(9090));
    assert_eq!(cfg.max_workers, 4);
}

#[test]
fn test_config_from_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::from_file(dir.path().join("absent.yaml")).is_err());
}

#[test]
fn test_load_reads_environment() {
    unsafe {
        std::env::set_var("WARDEN_PORT", "7070");
        std::env::set_var("WARDEN_TLS", "true");
        std::env::set_var("WARDEN_WORKERS", "32");
    }
    let cfg = Config::load();
    assert_eq!(cfg.port, Some(7070));
    assert!(cfg.tls);
    assert_eq!(cfg.max_workers, 32);
    unsafe {
        std::env::remove_var("WARDEN_PORT");
        std::env::remove_var("WARDEN_TLS");
        std::env::remove_var("WARDEN_WORKERS");
    }
}
