use std::process::Command;
use std::time::Duration;

use content_studio::config::{Config, DEFAULT_COMPLETION_NOTICE};
use content_studio::controller::{Message, StudioView};
use content_studio::model::{Properties, SessionStatus};
use serde_json::json;
use tokio::sync::watch;

mod common;
use common::TestStudio;

async fn wait_until<F>(views: &mut watch::Receiver<StudioView>, pred: F) -> StudioView
where
    F: FnMut(&StudioView) -> bool,
{
    views
        .wait_for(pred)
        .await
        .expect("Studio loop stopped unexpectedly")
        .clone()
}

fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

#[tokio::test(start_paused = true)]
async fn test_generate_passes_through_generating() {
    let studio = TestStudio::new();
    let mut views = studio.handle.subscribe();
    assert_eq!(studio.handle.current().session.status, SessionStatus::Editing);

    studio.handle.send(Message::Generate).unwrap();

    // Record every status the surface observes until the loop settles
    let mut seen = vec![views.borrow_and_update().session.status];
    while seen.last() != Some(&SessionStatus::Ready) {
        views.changed().await.unwrap();
        seen.push(views.borrow_and_update().session.status);
    }

    let first_ready = seen
        .iter()
        .position(|s| *s == SessionStatus::Ready)
        .unwrap();
    assert!(seen[..first_ready].contains(&SessionStatus::Generating));
    assert_eq!(studio.notifier.get_notices(), vec![DEFAULT_COMPLETION_NOTICE]);

    studio.handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_ready_only_after_delay() {
    let studio = TestStudio::with_config(Config {
        generation_delay_ms: 500,
        ..Config::default()
    });
    let mut views = studio.handle.subscribe();

    studio.handle.send(Message::Generate).unwrap();
    wait_until(&mut views, |v| v.session.status == SessionStatus::Generating).await;
    let started = tokio::time::Instant::now();

    wait_until(&mut views, |v| v.session.status == SessionStatus::Ready).await;
    assert!(started.elapsed() >= Duration::from_millis(500));

    studio.handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_regenerate_supersedes_pending() {
    let studio = TestStudio::new();
    let mut views = studio.handle.subscribe();

    studio.handle.send(Message::Generate).unwrap();
    wait_until(&mut views, |v| v.session.status == SessionStatus::Generating).await;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    studio.handle.send(Message::Generate).unwrap();
    let restarted = tokio::time::Instant::now();

    // The first timer would have fired 500ms from here
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(
        studio.handle.current().session.status,
        SessionStatus::Generating
    );

    wait_until(&mut views, |v| v.session.status == SessionStatus::Ready).await;
    assert!(restarted.elapsed() >= Duration::from_millis(2000));
    assert_eq!(studio.notifier.get_notices().len(), 1);

    studio.handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_generation() {
    let studio = TestStudio::new();
    let mut views = studio.handle.subscribe();

    studio.handle.send(Message::Generate).unwrap();
    wait_until(&mut views, |v| v.session.status == SessionStatus::Generating).await;
    studio.handle.send(Message::CancelGeneration).unwrap();
    wait_until(&mut views, |v| v.session.status == SessionStatus::Editing).await;

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(studio.handle.current().session.status, SessionStatus::Editing);
    assert!(studio.notifier.get_notices().is_empty());

    studio.handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_notifier_failure_does_not_block_ready() {
    let studio = TestStudio::new();
    studio.notifier.fail_next();
    let mut views = studio.handle.subscribe();

    studio.handle.send(Message::Generate).unwrap();
    let view = wait_until(&mut views, |v| v.session.status == SessionStatus::Ready).await;
    assert_eq!(view.last_notice.as_deref(), Some(DEFAULT_COMPLETION_NOTICE));
    assert!(studio.notifier.get_notices().is_empty());

    studio.handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_editing_scenario_through_loop() {
    let studio = TestStudio::new();
    let handle = &studio.handle;
    let templates_before = handle.current().templates.len();

    handle.send(Message::UpdateInput("hello".into())).unwrap();
    handle
        .send(Message::UpdateProperties(props(&[("tone", "formal")])))
        .unwrap();
    handle
        .send(Message::UpdateProperties(props(&[("length", "short")])))
        .unwrap();
    handle
        .send(Message::SaveTemplate {
            name: "T1".into(),
            description: "d".into(),
        })
        .unwrap();

    let controller = studio.handle.shutdown().await.unwrap();
    let session = controller.session();
    assert_eq!(session.input_character_count, 5);
    assert_eq!(session.properties.get("tone"), Some(&json!("formal")));
    assert_eq!(session.properties.get("length"), Some(&json!("short")));
    assert_eq!(controller.templates().len(), templates_before + 1);
    assert_eq!(controller.templates()[0].usage_count, 0);
}

#[tokio::test]
async fn test_template_snapshot_survives_later_edits() {
    let studio = TestStudio::new();
    let mut views = studio.handle.subscribe();

    studio
        .handle
        .send(Message::UpdateProperties(props(&[("tone", "playful")])))
        .unwrap();
    studio
        .handle
        .send(Message::SaveTemplate {
            name: "A".into(),
            description: "B".into(),
        })
        .unwrap();
    let view = wait_until(&mut views, |v| {
        v.templates.first().map(|t| t.name.as_str()) == Some("A")
    })
    .await;
    let saved = view.templates[0].clone();

    studio
        .handle
        .send(Message::UpdateProperties(props(&[("tone", "grim")])))
        .unwrap();
    studio
        .handle
        .send(Message::LoadTemplate(saved.id.clone()))
        .unwrap();

    let controller = studio.handle.shutdown().await.unwrap();
    assert_eq!(controller.session().properties, saved.properties);
    assert_eq!(
        controller.session().properties.get("tone"),
        Some(&json!("playful"))
    );
}

#[tokio::test]
async fn test_permissive_unknown_ids() {
    let studio = TestStudio::new();
    let before = studio.handle.current();

    studio
        .handle
        .send(Message::SelectVoiceClone("vc-unknown".into()))
        .unwrap();
    studio
        .handle
        .send(Message::LoadTemplate("tpl-unknown".into()))
        .unwrap();
    studio
        .handle
        .send(Message::DeleteTemplate("tpl-unknown".into()))
        .unwrap();

    let controller = studio.handle.shutdown().await.unwrap();
    assert_eq!(
        controller.session().voice_clone_id.as_deref(),
        Some("vc-unknown")
    );
    assert_eq!(controller.session().properties, before.session.properties);
    assert_eq!(controller.templates(), before.templates.as_slice());
}

#[tokio::test]
async fn test_strict_mode_rejects_unknown_ids() {
    let studio = TestStudio::strict();
    let mut views = studio.handle.subscribe();

    studio
        .handle
        .send(Message::SelectVoiceClone("vc-unknown".into()))
        .unwrap();
    let view = wait_until(&mut views, |v| v.last_error.is_some()).await;
    assert!(view.last_error.unwrap().contains("vc-unknown"));
    assert_eq!(view.session.voice_clone_id.as_deref(), Some("vc-001"));

    studio
        .handle
        .send(Message::DeleteTemplate("tpl-001".into()))
        .unwrap();
    let view = wait_until(&mut views, |v| v.last_error.is_none()).await;
    assert!(view.templates.iter().all(|t| t.id != "tpl-001"));

    studio.handle.shutdown().await.unwrap();
}

#[test]
fn test_cli_script_run() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let script = dir.path().join("session.script");
    std::fs::write(
        &script,
        "# preview walkthrough\n\
         voice vc-002\n\
         input hello\n\
         set tone=formal\n\
         save Launch | launch day\n\
         templates\n\
         generate\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_content-studio"))
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .args(["--delay-ms", "20", "--notifier", "console", "--script"])
        .arg(&script)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run content-studio");

    assert!(output.status.success(), "exit status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Launch - launch day"), "stdout: {}", stdout);
    assert!(stdout.contains(DEFAULT_COMPLETION_NOTICE), "stdout: {}", stdout);
}

#[test]
fn test_cli_reports_strict_error_after_instant_generation() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let script = dir.path().join("strict.script");
    std::fs::write(&script, "generate\nload tpl-missing\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_content-studio"))
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .args(["--delay-ms", "0", "--strict", "--script"])
        .arg(&script)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run content-studio");

    assert!(output.status.success(), "exit status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Error: "), "stdout: {}", stdout);
    assert!(stdout.contains("tpl-missing"), "stdout: {}", stdout);
}
