//! Action sequence execution against fake OS seams.

mod fakes;

use std::time::Duration;

use config::{
    ActionPayload, ButtonAction, CommandPayload, MAX_NESTING, MultiActionPayload, OpenPayload,
    SystemAction, SystemPayload, TextMode, TextPayload,
};
use fakes::{CTRL, Harness, Launch, VK_A, VK_C, VK_V, hotkey, step};
use quickpad_engine::Error;
use serde_json::json;
use tokio::time::Instant;

fn command(cmd: &str, wait_for_exit: bool) -> ButtonAction {
    ButtonAction::new(
        &ActionPayload::Command(CommandPayload {
            command: cmd.into(),
            show_window: false,
            wait_for_exit,
        }),
        0,
    )
}

fn multi(actions: Vec<ButtonAction>, delay_ms: u64) -> ButtonAction {
    ButtonAction::new(
        &ActionPayload::MultiAction(MultiActionPayload { actions }),
        delay_ms,
    )
}

fn system(action: SystemAction, value: Option<i32>) -> ButtonAction {
    ButtonAction::new(&ActionPayload::System(SystemPayload { action, value }), 0)
}

fn text(text: &str, mode: TextMode) -> ButtonAction {
    ButtonAction::new(
        &ActionPayload::Text(TextPayload {
            text: text.into(),
            mode,
        }),
        0,
    )
}

#[tokio::test(start_paused = true)]
async fn copy_then_paste_honours_delay_between() {
    let h = Harness::new();
    h.dispatcher
        .execute(&[hotkey("Ctrl+C", 50), hotkey("Ctrl+V", 0)])
        .await
        .unwrap();

    assert_eq!(
        h.keys.key_events(),
        vec![
            (CTRL, true),
            (VK_C, true),
            (VK_C, false),
            (CTRL, false),
            (CTRL, true),
            (VK_V, true),
            (VK_V, false),
            (CTRL, false),
        ]
    );
    let copy = h.key_down_at(VK_C).unwrap();
    let paste = h.key_down_at(VK_V).unwrap();
    assert!(paste.duration_since(copy) >= Duration::from_millis(50));
}

#[tokio::test(start_paused = true)]
async fn delay_applies_after_its_own_step() {
    let h = Harness::new();
    let start = Instant::now();
    h.dispatcher
        .execute(&[hotkey("Ctrl+C", 0), hotkey("Ctrl+V", 50)])
        .await
        .unwrap();

    let copy = h.key_down_at(VK_C).unwrap();
    let paste = h.key_down_at(VK_V).unwrap();
    assert!(paste.duration_since(copy) < Duration::from_millis(50));
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[tokio::test(start_paused = true)]
async fn wait_for_exit_holds_the_next_step() {
    let h = Harness::new();
    h.launcher.set_run_for(Duration::from_millis(200));
    h.dispatcher
        .execute(&[command("build.bat", true), hotkey("a", 0)])
        .await
        .unwrap();

    assert_eq!(
        h.launcher.launches(),
        vec![
            Launch::Spawn("build.bat".into()),
            Launch::Exited("build.bat".into())
        ]
    );
    let spawned = h
        .launcher
        .time_of(&Launch::Spawn("build.bat".into()))
        .unwrap();
    let pressed = h.key_down_at(VK_A).unwrap();
    assert!(pressed.duration_since(spawned.into_std()) >= Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn fire_and_forget_command_does_not_block() {
    let h = Harness::new();
    h.launcher.set_run_for(Duration::from_millis(200));
    h.dispatcher
        .execute(&[command("server.exe", false), hotkey("a", 0)])
        .await
        .unwrap();

    assert_eq!(
        h.launcher.launches(),
        vec![Launch::Spawn("server.exe".into())]
    );
    let spawned = h
        .launcher
        .time_of(&Launch::Spawn("server.exe".into()))
        .unwrap();
    let pressed = h.key_down_at(VK_A).unwrap();
    assert!(pressed.duration_since(spawned.into_std()) < Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn malformed_steps_are_skipped_but_still_delay() {
    let h = Harness::new();
    let start = Instant::now();
    h.dispatcher
        .execute(&[
            step(json!({"type": "Hotkey", "delayMs": 30})),
            step(json!({"type": "Folder", "payload": {"id": "x"}})),
            step(json!({"type": "Teleport", "payload": {}})),
            step(json!({"type": "System", "payload": {"action": "Explode"}})),
            hotkey("a", 0),
        ])
        .await
        .unwrap();

    assert_eq!(h.keys.key_events(), vec![(VK_A, true), (VK_A, false)]);
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn open_failure_aborts_remaining_steps() {
    let h = Harness::new();
    h.launcher.fail_open();
    let open = ButtonAction::new(
        &ActionPayload::Open(OpenPayload {
            path: "missing.exe".into(),
            arguments: None,
            working_directory: None,
            run_as_admin: false,
        }),
        0,
    );
    let err = h
        .dispatcher
        .execute(&[hotkey("a", 0), open, hotkey("c", 0)])
        .await
        .unwrap_err();

    match err {
        Error::Launch { step, target, .. } => {
            assert_eq!(step, 1);
            assert_eq!(target, "missing.exe");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(h.keys.key_events(), vec![(VK_A, true), (VK_A, false)]);
}

#[tokio::test]
async fn nested_spawn_failure_reports_top_level_step() {
    let h = Harness::new();
    h.launcher.fail_spawn();
    let err = h
        .dispatcher
        .execute(&[
            hotkey("a", 0),
            hotkey("a", 0),
            multi(vec![hotkey("c", 0), command("x", false), hotkey("v", 0)], 0),
            hotkey("v", 0),
        ])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Launch { step: 2, .. }), "{err:?}");
    assert!(h.key_down_at(VK_C).is_some());
    assert!(h.key_down_at(VK_V).is_none());
}

#[tokio::test]
async fn open_passes_the_payload_through() {
    let h = Harness::new();
    let open = step(json!({
        "type": "Open",
        "payload": {"path": "https://example.com", "runAsAdmin": true}
    }));
    h.dispatcher.execute(&[open]).await.unwrap();
    assert_eq!(
        h.launcher.launches(),
        vec![Launch::Open("https://example.com".into())]
    );
}

#[tokio::test]
async fn clipboard_text_is_pasted() {
    let h = Harness::new();
    h.dispatcher
        .execute(&[text("hello", TextMode::Clipboard)])
        .await
        .unwrap();
    assert_eq!(h.clipboard.texts(), vec!["hello".to_string()]);
    assert_eq!(
        h.keys.key_events(),
        vec![(CTRL, true), (VK_V, true), (VK_V, false), (CTRL, false)]
    );
}

#[tokio::test]
async fn clipboard_failure_skips_the_paste_only() {
    let h = Harness::new();
    h.clipboard.set_failing();
    h.dispatcher
        .execute(&[text("hello", TextMode::Clipboard), hotkey("a", 0)])
        .await
        .unwrap();
    assert_eq!(h.keys.key_events(), vec![(VK_A, true), (VK_A, false)]);
}

#[tokio::test]
async fn typed_text_goes_through_unicode_input() {
    let h = Harness::new();
    h.dispatcher
        .execute(&[text("ok\n", TextMode::Type)])
        .await
        .unwrap();
    assert_eq!(h.keys.typed_text(), "ok\n");
    assert!(h.clipboard.texts().is_empty());
}

#[tokio::test]
async fn system_actions_map_to_media_keys() {
    let h = Harness::new();
    h.dispatcher
        .execute(&[
            system(SystemAction::VolumeUp, Some(3)),
            system(SystemAction::MediaNext, Some(9)),
            system(SystemAction::BrightnessUp, None),
            system(SystemAction::VolumeDown, Some(-4)),
        ])
        .await
        .unwrap();

    let downs: Vec<u16> = h
        .keys
        .key_events()
        .into_iter()
        .filter(|(_, down)| *down)
        .map(|(vk, _)| vk)
        .collect();
    assert_eq!(downs, vec![0xAF, 0xAF, 0xAF, 0xB0, 0xAE]);
}

#[tokio::test]
async fn volume_repeat_is_clamped() {
    let h = Harness::new();
    h.dispatcher
        .execute(&[system(SystemAction::VolumeDown, Some(1000))])
        .await
        .unwrap();
    assert_eq!(h.keys.key_events().len(), 100);
}

#[tokio::test(start_paused = true)]
async fn multi_action_children_keep_their_delays() {
    let h = Harness::new();
    h.dispatcher
        .execute(&[
            multi(vec![hotkey("a", 20), hotkey("c", 0)], 10),
            hotkey("v", 0),
        ])
        .await
        .unwrap();

    let a = h.key_down_at(VK_A).unwrap();
    let c = h.key_down_at(VK_C).unwrap();
    let v = h.key_down_at(VK_V).unwrap();
    assert!(c.duration_since(a) >= Duration::from_millis(20));
    assert!(v.duration_since(a) >= Duration::from_millis(30));
}

fn nested(levels: usize) -> ButtonAction {
    let mut s = hotkey("a", 0);
    for _ in 0..levels {
        s = multi(vec![s], 0);
    }
    s
}

#[tokio::test]
async fn nesting_up_to_the_limit_runs() {
    let h = Harness::new();
    h.dispatcher.execute(&[nested(MAX_NESTING)]).await.unwrap();
    assert_eq!(h.keys.key_events(), vec![(VK_A, true), (VK_A, false)]);
}

#[tokio::test]
async fn nesting_past_the_limit_is_skipped() {
    let h = Harness::new();
    h.dispatcher
        .execute(&[nested(MAX_NESTING + 1), hotkey("c", 0)])
        .await
        .unwrap();
    assert_eq!(h.keys.key_events(), vec![(VK_C, true), (VK_C, false)]);
}

#[tokio::test]
async fn empty_sequence_is_a_no_op() {
    let h = Harness::new();
    h.dispatcher.execute(&[]).await.unwrap();
    assert!(h.keys.events().is_empty());
    assert!(h.launcher.launches().is_empty());
}
