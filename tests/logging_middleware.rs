//! End-to-end behaviour of the server and client logging layers.

use std::sync::{Arc, Mutex};

use tower::util::BoxCloneService;
use tower::{service_fn, Layer, ServiceBuilder, ServiceExt};

use rpc_logging::middleware::{truncate, DEFAULT_HALF_LENGTH, MARKER};
use rpc_logging::{
    client, server, BoxError, Call, CallContext, JsonLogger, Level, LoggingLayer, Side, Status,
};

mod common;

use common::{http_client_context, http_server_context, CaptureLogger};

/// Handler answering `"reply"`, or failing with `err`.
fn reply_with(err: Option<&'static str>) -> BoxCloneService<Call<String>, String, BoxError> {
    BoxCloneService::new(service_fn(move |_: Call<String>| async move {
        match err {
            None => Ok("reply".to_string()),
            Some(msg) => Err(BoxError::from(msg)),
        }
    }))
}

#[tokio::test]
async fn test_http_server_success() {
    let logger = CaptureLogger::new();
    let svc = server(logger.clone()).layer(reply_with(None));

    let reply = svc
        .oneshot(Call::new(http_server_context(), "req.args".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "reply");

    let records = logger.records();
    assert_eq!(records.len(), 1);
    let rec = &records[0];
    assert_eq!(rec.level, Level::Info);
    assert_eq!(rec.side, Side::Server);
    assert_eq!(rec.kind, "http");
    assert_eq!(rec.component, "logging");
    assert_eq!(rec.endpoint, "endpoint");
    assert_eq!(rec.operation, "/package.service/method");
    assert_eq!(rec.args, truncate("req.args", DEFAULT_HALF_LENGTH));
    assert_eq!(rec.reply.as_deref(), Some("reply"));
    assert_eq!(rec.code, 0);
    assert_eq!(rec.reason, "");
    assert!(rec.stack.is_none());
}

#[tokio::test]
async fn test_http_server_failure() {
    let logger = CaptureLogger::new();
    let svc = server(logger.clone()).layer(reply_with(Some("reply.error")));

    let err = svc
        .oneshot(Call::new(http_server_context(), "req.args".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "reply.error");

    let records = logger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Error);
    assert_eq!(records[0].reason, "reply.error");
    assert_eq!(records[0].code, 500);
    assert!(records[0].reply.is_none());
}

#[tokio::test]
async fn test_http_client_success() {
    let logger = CaptureLogger::new();
    let svc = client(logger.clone()).layer(reply_with(None));

    let reply = svc
        .oneshot(Call::new(http_client_context(), "req.args".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "reply");

    let rec = &logger.records()[0];
    assert_eq!(rec.side, Side::Client);
    assert_eq!(rec.level, Level::Info);
    assert_eq!(rec.endpoint, "endpoint");
    assert_eq!(rec.operation, "/package.service/method");
    assert_eq!(rec.reply.as_deref(), Some("reply"));
}

#[tokio::test]
async fn test_http_client_failure() {
    let logger = CaptureLogger::new();
    let svc = client(logger.clone()).layer(reply_with(Some("reply.error")));

    let err = svc
        .oneshot(Call::new(http_client_context(), "req.args".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "reply.error");

    let records = logger.records();
    assert_eq!(records.len(), 1);
    let rec = &records[0];
    assert!(matches!(rec.level, Level::Warn | Level::Error));
    assert_eq!(rec.reason, "reply.error");
    assert!(rec.reply.is_none());
    assert_eq!(rec.side, Side::Client);
}

#[tokio::test]
async fn test_client_structured_error_passthrough() {
    let logger = CaptureLogger::new();
    let svc = client(logger.clone()).layer(service_fn(|_: Call<String>| async {
        Err::<String, _>(Status::conflict("version mismatch").with_metadata("expected", "3"))
    }));

    let err = svc
        .oneshot(Call::new(http_client_context(), "update".to_string()))
        .await
        .unwrap_err();
    let status = err.downcast_ref::<Status>().expect("status error preserved");
    assert_eq!(status.code(), 409);
    assert_eq!(status.metadata().get("expected").map(String::as_str), Some("3"));

    let rec = &logger.records()[0];
    assert_eq!(rec.level, Level::Warn);
    assert_eq!(rec.code, 409);
    assert_eq!(rec.reason, "version mismatch");
}

#[tokio::test]
async fn test_wrapped_matches_unwrapped() {
    for err in [None, Some("reply.error")] {
        let direct = reply_with(err)
            .oneshot(Call::new(http_server_context(), "req.args".to_string()))
            .await;
        let wrapped = server(CaptureLogger::new())
            .layer(reply_with(err))
            .oneshot(Call::new(http_server_context(), "req.args".to_string()))
            .await;

        match (direct, wrapped) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            _ => panic!("wrapping changed the outcome"),
        }
    }
}

#[tokio::test]
async fn test_long_payload_truncated() {
    let logger = CaptureLogger::new();
    let svc = LoggingLayer::new(Side::Server, logger.clone())
        .with_half_length(8)
        .layer(reply_with(None));

    let payload = format!("{}{}", "a".repeat(8), "b".repeat(100));
    svc.oneshot(Call::new(http_server_context(), payload))
        .await
        .unwrap();

    let rec = &logger.records()[0];
    assert_eq!(rec.args, format!("aaaaaaaa{}bbbbbbbb", MARKER));
    assert_eq!(rec.args.len(), 16 + MARKER.len());
}

#[tokio::test]
async fn test_no_context_still_logs() {
    let logger = CaptureLogger::new();
    let svc = server(logger.clone()).layer(reply_with(None));

    svc.oneshot(Call::new(CallContext::new(), "req.args".to_string()))
        .await
        .unwrap();

    let records = logger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, "");
    assert_eq!(records[0].endpoint, "");
    assert_eq!(records[0].operation, "");
}

#[tokio::test]
async fn test_stacked_server_and_client_layers() {
    let logger = CaptureLogger::new();
    let svc = ServiceBuilder::new()
        .layer(client(logger.clone()))
        .layer(server(logger.clone()))
        .service(reply_with(None));

    let ctx = http_server_context().with_client(Arc::new(common::http_transport()));
    svc.oneshot(Call::new(ctx, "req.args".to_string()))
        .await
        .unwrap();

    let records = logger.records();
    assert_eq!(records.len(), 2);
    // Inner (server) layer completes first.
    assert_eq!(records[0].side, Side::Server);
    assert_eq!(records[1].side, Side::Client);
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_json_logger_output() {
    let buf = SharedBuf::default();
    let svc = server(JsonLogger::new(buf.clone())).layer(reply_with(Some("reply.error")));

    let _ = svc
        .oneshot(Call::new(http_server_context(), "req.args".to_string()))
        .await;

    let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    let line: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(line["kind"], "http");
    assert_eq!(line["component"], "logging");
    assert_eq!(line["operation"], "/package.service/method");
    assert_eq!(line["args"], "req.args");
    assert_eq!(line["reason"], "reply.error");
    assert_eq!(line["level"], "ERROR");
    assert!(line.get("reply").is_none());
    assert!(line["latency"].is_f64());
}
