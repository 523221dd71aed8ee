//! 端到端测试：事件 → payload → Rocket.Chat（mockito 模拟服务器）

use mockito::{Matcher, Server};
use sensu_rocketchat_handler::{
    DeliveryPolicy, Dispatcher, Event, EventHandler, HandlerConfig, HandlerError, SendResult,
};

const LOGIN_OK: &str = r#"{"status":"success","data":{"userId":"u1","authToken":"t1"}}"#;

fn config(url: &str, template: &str) -> HandlerConfig {
    HandlerConfig {
        url: url.to_string(),
        channel: "sandbox".to_string(),
        username: "sensu".to_string(),
        password: "sensu".to_string(),
        description_template: template.to_string(),
    }
}

fn critical_event() -> Event {
    Event::new("entity1", "check1")
        .with_status(2)
        .with_output("disk is full")
}

#[test]
fn test_critical_event_end_to_end() {
    let mut server = Server::new();
    let login = server
        .mock("POST", "/api/v1/login")
        .match_body(Matcher::Json(serde_json::json!({"user": "sensu", "password": "sensu"})))
        .with_status(200)
        .with_body(LOGIN_OK)
        .create();
    let post = server
        .mock("POST", "/api/v1/chat.postMessage")
        .match_header("x-auth-token", "t1")
        .match_header("x-user-id", "u1")
        .match_body(Matcher::Json(serde_json::json!({
            "channel": "#sandbox",
            "alias": "Sensu",
            "text": "disk is full",
            "attachments": [{
                "title": "Description",
                "text": "disk is full",
                "color": "danger",
                "fallback": "ALERT - entity1/check1:disk is full",
                "fields": [
                    {"title": "Status", "value": "Critical", "short": false},
                    {"title": "Entity", "value": "entity1", "short": true},
                    {"title": "Check", "value": "check1", "short": true}
                ]
            }]
        })))
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create();

    let handler = EventHandler::new(
        config(&server.url(), "{{ .Check.Output }}"),
        Dispatcher::default(),
    );
    let result = handler.handle(&critical_event()).unwrap();

    assert_eq!(result, SendResult::Sent);
    login.assert();
    post.assert();
}

#[test]
fn test_login_failure_still_sends() {
    let mut server = Server::new();
    let _login = server
        .mock("POST", "/api/v1/login")
        .with_status(401)
        .with_body(r#"{"status":"error","message":"Unauthorized"}"#)
        .create();
    let post = server
        .mock("POST", "/api/v1/chat.postMessage")
        .match_header("x-auth-token", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create();

    let handler = EventHandler::new(
        config(&server.url(), "{{ .Check.Output }}"),
        Dispatcher::default(),
    );
    assert_eq!(handler.handle(&critical_event()).unwrap(), SendResult::Sent);
    post.assert();
}

#[test]
fn test_login_failure_fail_fast_skips_send() {
    let mut server = Server::new();
    let _login = server
        .mock("POST", "/api/v1/login")
        .with_status(401)
        .with_body(r#"{"status":"error","message":"Unauthorized"}"#)
        .create();
    let post = server
        .mock("POST", "/api/v1/chat.postMessage")
        .expect(0)
        .create();

    let handler = EventHandler::new(
        config(&server.url(), "{{ .Check.Output }}"),
        Dispatcher::new(DeliveryPolicy::FailFast),
    );
    let err = handler.handle(&critical_event()).unwrap_err();

    assert!(matches!(err, HandlerError::AuthenticationFailure(_)));
    post.assert();
}

#[test]
fn test_bad_template_sends_empty_description() {
    let mut server = Server::new();
    let _login = server
        .mock("POST", "/api/v1/login")
        .with_status(200)
        .with_body(LOGIN_OK)
        .create();
    let post = server
        .mock("POST", "/api/v1/chat.postMessage")
        .match_body(Matcher::PartialJson(serde_json::json!({"text": ""})))
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create();

    let handler = EventHandler::new(
        config(&server.url(), "{{ .Check.Output "),
        Dispatcher::default(),
    );
    assert_eq!(handler.handle(&critical_event()).unwrap(), SendResult::Sent);
    post.assert();
}

#[test]
fn test_send_failure_is_terminal() {
    let mut server = Server::new();
    let _login = server
        .mock("POST", "/api/v1/login")
        .with_status(200)
        .with_body(LOGIN_OK)
        .create();
    let _post = server
        .mock("POST", "/api/v1/chat.postMessage")
        .with_status(500)
        .with_body("internal error")
        .create();

    let handler = EventHandler::new(
        config(&server.url(), "{{ .Check.Output }}"),
        Dispatcher::default(),
    );
    let err = handler.handle(&critical_event()).unwrap_err();

    assert!(matches!(err, HandlerError::DispatchFailure(_)));
    assert!(err.to_string().contains("500"));
}

#[test]
fn test_invalid_url_attempts_dispatch_and_fails() {
    let handler = EventHandler::new(config("not a url", "{{ .Check.Output }}"), Dispatcher::default());
    let err = handler.handle(&critical_event()).unwrap_err();
    assert!(matches!(err, HandlerError::DispatchFailure(_)));
}

#[test]
fn test_invalid_url_fail_fast() {
    let handler = EventHandler::new(
        config("not a url", "{{ .Check.Output }}"),
        Dispatcher::new(DeliveryPolicy::FailFast),
    );
    let err = handler.handle(&critical_event()).unwrap_err();
    assert!(matches!(err, HandlerError::InvalidUrl { .. }));
}

#[test]
fn test_event_json_to_payload() {
    let json = r#"{
        "entity": {"metadata": {"name": "entity1", "namespace": "default"}},
        "check": {"metadata": {"name": "check1"}, "status": 1, "output": "load is high\n"}
    }"#;
    let event = Event::from_reader(json.as_bytes()).unwrap();

    let handler = EventHandler::new(
        config("http://chat.example.com", "{{ .Entity.Name }}: {{ .Check.Output }}"),
        Dispatcher::default(),
    );
    let payload = handler.build_payload(&event).unwrap();

    assert_eq!(payload.text, "entity1: load is high\n");
    assert_eq!(payload.attachments[0].color, "warning");
    assert_eq!(payload.attachments[0].fields[0].value, "Warning");
    assert_eq!(payload.attachments[0].fallback, "ALERT - entity1/check1:load is high");
}
