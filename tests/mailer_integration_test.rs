use capdoc::domain::model::Artifact;
use capdoc::domain::ports::Notifier;
use capdoc::{FileActivityLog, MailerConfig, MailgunNotifier};
use httpmock::prelude::*;
use tempfile::TempDir;

fn artifact() -> Artifact {
    Artifact {
        filename: "capacidad_docente_GAPGC_20250101_120000.xlsx".to_string(),
        bytes: vec![0x50, 0x4b, 0x03, 0x04],
    }
}

#[tokio::test]
async fn dispatch_posts_authenticated_multipart_and_logs_to_file() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start();

    let mailgun = server.mock(|when, then| {
        when.method(POST)
            .path("/scs.example/messages")
            .header_exists("authorization")
            .body_contains("Capacidad docente GAPGC")
            .body_contains("Adjunto archivo de capacidad docente para GAPGC")
            .body_contains("capacidad_docente_GAPGC_20250101_120000.xlsx");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"message": "Queued."}));
    });

    let log = FileActivityLog::new(temp.path().join("actividad.log"));
    let config = MailerConfig {
        domain: Some("scs.example".to_string()),
        api_key: Some("key-test".to_string()),
        recipient: "fse.scs.evalres@gmail.com".to_string(),
        api_base: server.base_url(),
    };
    let notifier = MailgunNotifier::new(config, log.clone());

    let outcome = notifier.dispatch(&artifact(), "GAPGC").await;

    mailgun.assert();
    assert!(outcome.sent);

    let content = std::fs::read_to_string(log.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["accion"], "Email enviado exitosamente para GAPGC");
    assert_eq!(record["usuario"], "sistema");
    assert_eq!(record["version"], "1.0");
}

#[tokio::test]
async fn each_dispatch_appends_exactly_one_record() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/scs.example/messages");
        then.status(503);
    });

    let log = FileActivityLog::new(temp.path().join("actividad.log"));
    let config = MailerConfig {
        domain: Some("scs.example".to_string()),
        api_key: Some("key-test".to_string()),
        recipient: "fse.scs.evalres@gmail.com".to_string(),
        api_base: server.base_url(),
    };
    let notifier = MailgunNotifier::new(config, log.clone());

    notifier.dispatch(&artifact(), "GAPGC").await;
    notifier.dispatch(&artifact(), "GAPGC").await;

    let content = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("Error enviando email: 503"));
}
