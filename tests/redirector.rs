//! End-to-end tests against a running redirector.

use std::time::Duration;

use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_plain_mapping() {
    let common::Running { addr, shutdown, .. } =
        common::start_redirector("9fans.net/go", "https://github.com/9fans/go").await;

    let res = common::get(addr, "9fans.net", "/go/acme/editinacme").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/html; charset=utf-8");
    let body = res.text().await.unwrap();
    assert!(body.contains(
        r#"<meta name="go-import" content="9fans.net/go git https://github.com/9fans/go">"#
    ));
    assert!(body.contains(
        r#"<meta http-equiv="refresh" content="0; url=https://github.com/9fans/go">"#
    ));

    let res = common::get(addr, "9fans.net", "/other").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
}

#[tokio::test]
async fn test_wildcard_mapping() {
    let common::Running { addr, shutdown, .. } =
        common::start_redirector("rsc.io/*", "https://github.com/rsc/*").await;

    let res = common::get(addr, "rsc.io", "/x86/x86asm").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains(r#"content="rsc.io/x86 git https://github.com/rsc/x86""#));
    assert!(body.contains(r#"content="0; url=https://github.com/rsc/x86""#));

    let res = common::get(addr, "rsc.io", "/").await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "https://github.com/rsc");

    let res = common::get(addr, "golang.org", "/x/net").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
}

#[tokio::test]
async fn test_two_level_wildcard_needs_both_segments() {
    let common::Running { addr, shutdown, .. } =
        common::start_redirector("example.com/*/*", "https://git.example.com/*/*").await;

    let res = common::get(addr, "example.com", "/team").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = common::get(addr, "example.com", "/team/tool/cmd").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains(
        r#"content="example.com/team/tool git https://git.example.com/team/tool""#
    ));

    shutdown.trigger();
}

#[tokio::test]
async fn test_ping() {
    let common::Running { addr, shutdown, .. } =
        common::start_redirector("rsc.io/*", "https://github.com/rsc/*").await;

    let res = common::get(addr, "rsc.io", "/.ping").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "pong");

    shutdown.trigger();
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let common::Running { addr, shutdown, .. } =
        common::start_redirector("rsc.io/*", "https://github.com/rsc/*").await;

    let first = common::get(addr, "rsc.io", "/x86/x86asm").await.bytes().await.unwrap();
    let second = common::get(addr, "rsc.io", "/x86/x86asm").await.bytes().await.unwrap();
    assert_eq!(first, second);

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let running = common::start_redirector("rsc.io/*", "https://github.com/rsc/*").await;
    let res = common::get(running.addr, "rsc.io", "/.ping").await;
    assert_eq!(res.status(), StatusCode::OK);
    drop(res);

    running.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), running.task)
        .await
        .expect("server did not stop after shutdown")
        .expect("server task panicked");
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_percent_encoded_wildcard_segment() {
    let common::Running { addr, shutdown, .. } =
        common::start_redirector("rsc.io/*", "https://github.com/rsc/*").await;

    let res = common::get(addr, "rsc.io", "/x%38%36/x86asm").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains(r#"content="rsc.io/x86 git https://github.com/rsc/x86""#));

    shutdown.trigger();
}
