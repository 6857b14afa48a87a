use super::*;
use serde_json::json;
use shared::error::ErrorCode;

fn context() -> RelayContext {
    RelayContext::new(
        SessionStore::new(),
        Url::parse("http://relay.test/").expect("url"),
    )
}

fn query(session: Option<&str>) -> SessionQuery {
    SessionQuery {
        session: session.map(str::to_string),
    }
}

#[tokio::test]
async fn unparseable_body_is_malformed() {
    let ctx = context();
    let bodies: [&[u8]; 3] = [b"", b"{", b"not json"];
    for body in bodies {
        let err = ingest_motion(&ctx, body).await.expect_err("should fail");
        assert_eq!(err.code, ErrorCode::MalformedRequest);
    }
    assert_eq!(ctx.store.session_count().await, 0);
}

#[tokio::test]
async fn missing_or_non_string_session_is_invalid() {
    let ctx = context();
    let bodies = [
        json!({ "sample": null }),
        json!({ "session": "", "sample": null }),
        json!({ "session": 42 }),
        json!([1, 2, 3]),
        Value::Null,
    ];
    for body in bodies {
        let err = ingest_motion(&ctx, body.to_string().as_bytes())
            .await
            .expect_err("should fail");
        assert_eq!(err.code, ErrorCode::InvalidSession);
    }
}

#[tokio::test]
async fn sample_of_wrong_shape_is_malformed() {
    let ctx = context();
    let body = json!({ "session": "s", "sample": { "orientation": { "alpha": "north" } } });
    let err = ingest_motion(&ctx, body.to_string().as_bytes())
        .await
        .expect_err("should fail");
    assert_eq!(err.code, ErrorCode::MalformedRequest);
    assert!(ctx.store.fetch("s").await.expect("fetch").is_none());
}

#[tokio::test]
async fn ingest_then_fetch_reports_sequence_and_sample() {
    let ctx = context();
    let body = json!({
        "session": "s",
        "sample": { "orientation": { "alpha": 90.0, "beta": 0.0, "gamma": 0.0, "absolute": true } }
    });

    let first = ingest_motion(&ctx, body.to_string().as_bytes())
        .await
        .expect("first");
    let second = ingest_motion(&ctx, body.to_string().as_bytes())
        .await
        .expect("replayed");
    assert_eq!(first.seq, 1);
    assert_eq!(second.seq, 2);
    assert!(second.ok);

    let fetched = fetch_motion(&ctx, &query(Some("s"))).await.expect("fetch");
    let entry = fetched.entry.expect("entry");
    assert_eq!(entry.sequence, 2);
    assert_eq!(entry.arrived_at_ms, second.t);
    let orientation = entry.sample.and_then(|s| s.orientation).expect("orientation");
    assert_eq!(orientation.alpha, Some(90.0));
    assert_eq!(orientation.absolute, Some(true));
}

#[tokio::test]
async fn fetch_without_entry_is_successful_and_empty() {
    let ctx = context();
    let fetched = fetch_motion(&ctx, &query(Some("nobody"))).await.expect("fetch");
    assert!(fetched.ok);
    assert!(fetched.entry.is_none());
}

#[tokio::test]
async fn fetch_without_session_is_invalid() {
    let ctx = context();
    for q in [query(None), query(Some(""))] {
        let err = fetch_motion(&ctx, &q).await.expect_err("should fail");
        assert_eq!(err.code, ErrorCode::InvalidSession);
    }
}

#[test]
fn pairing_keeps_requested_session() {
    let ctx = context();
    let issued = issue_pairing(&ctx, &query(Some("desk 1")));
    assert_eq!(issued.session.as_str(), "desk 1");
    assert_eq!(issued.url, "http://relay.test/?role=phone&session=desk+1");
}

#[test]
fn pairing_mints_session_when_missing() {
    let ctx = context();
    let first = issue_pairing(&ctx, &query(None));
    let second = issue_pairing(&ctx, &query(Some("")));
    assert_ne!(first.session, second.session);
    assert!(first.url.ends_with(first.session.as_str()));
}

#[test]
fn raw_query_takes_first_session() {
    let parsed = SessionQuery::from_raw(Some("session=a&session=b"));
    assert_eq!(parsed.session.as_deref(), Some("a"));

    let parsed = SessionQuery::from_raw(Some("cache=1&session=desk%201"));
    assert_eq!(parsed.session.as_deref(), Some("desk 1"));

    assert!(SessionQuery::from_raw(Some("other=1")).session.is_none());
    assert!(SessionQuery::from_raw(None).session.is_none());
}
