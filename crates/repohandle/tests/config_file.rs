use std::fs;

use repohandle::{Handle, HandleConfig, HandleError, OptValue};
use tempfile::TempDir;

#[test]
fn test_config_file_seeds_handle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("handle.toml");
    fs::write(
        &path,
        r#"
urls = ["http://mirror.example.org/$releasever/os/"]
varsub = [["releasever", "40"]]
ipresolve = "v6"
proxytype = "socks5hostname"
sslverifypeer = false
yumdlist = ["primary", "filelists"]
allowedmirrorfailures = 1
"#,
    )
    .unwrap();

    let config = HandleConfig::load(&path).unwrap();
    let handle = Handle::from_config(&config).unwrap();
    let view = handle.view();

    assert_eq!(view.substituted_urls(), vec!["http://mirror.example.org/40/os/"]);
    assert_eq!(handle.attr("ipresolve").unwrap(), OptValue::Enum("v6"));
    assert_eq!(view.proxy_type().as_str(), "socks5hostname");
    assert!(!view.ssl_verify_peer());
    assert!(view.ssl_verify_host());
    assert_eq!(
        view.yum_dlist(),
        Some(&["primary".to_string(), "filelists".to_string()][..])
    );
    assert_eq!(view.allowed_mirror_failures(), 1);
    assert_eq!(view.max_parallel_downloads(), 3);
}

#[test]
fn test_missing_file_leaves_defaults() {
    let dir = TempDir::new().unwrap();
    let config = HandleConfig::load(dir.path().join("absent.toml")).unwrap();
    let handle = Handle::from_config(&config).unwrap();
    assert_eq!(handle.attr("urls").unwrap(), OptValue::List(Some(vec![])));
    assert_eq!(handle.attr("proxyport").unwrap(), OptValue::Int(1080));
}

#[test]
fn test_out_of_range_value_in_file_is_rejected_on_apply() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("handle.toml");
    fs::write(&path, "proxyport = 123456\n").unwrap();

    let config = HandleConfig::load(&path).unwrap();
    let err = Handle::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        HandleError::InvalidValue { option: "proxyport", .. }
    ));
}

#[test]
fn test_unparseable_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("handle.toml");
    fs::write(&path, "urls = [\n").unwrap();
    assert!(matches!(
        HandleConfig::load(&path),
        Err(HandleError::Config(_))
    ));
}
