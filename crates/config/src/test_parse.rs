#[cfg(test)]
mod tests {
    use std::{env, fs, path::Path, process};

    use serde_json::json;

    use crate::*;

    const SAMPLE: &str = r#"{
      "version": "1.0",
      "panels": [
        {
          "id": "4f0c7c58-8a53-4d1e-9f61-0c1f0d3b2a11",
          "name": "Main",
          "rows": 2,
          "cols": 3,
          "mode": "Dynamic",
          "hotkey": "Ctrl+Shift+Space",
          "position": { "x": 10.0, "y": 20.0 },
          "appearance": { "opacity": 0.9 },
          "buttons": [
            {
              "id": "b1",
              "position": { "row": 0, "col": 0 },
              "label": "Copy",
              "actions": [
                { "type": "Hotkey", "payload": { "keys": "Ctrl+C" }, "delayMs": 50 },
                { "type": "Text", "payload": { "text": "hi", "mode": "Clipboard" } }
              ],
              "isToggle": true,
              "toggleState": false
            }
          ]
        },
        { "name": "Docked", "mode": "Docked", "buttons": [] }
      ],
      "profiles": [],
      "settings": { "startWithOS": true, "hideOnActionExecute": false }
    }"#;

    #[test]
    fn sample_parses_and_ignores_ui_fields() {
        let cfg = Config::from_json_str(SAMPLE).unwrap();
        assert_eq!(cfg.panels.len(), 2);
        let main = &cfg.panels[0];
        assert_eq!(main.hotkey_text(), Some("Ctrl+Shift+Space"));
        assert_eq!(main.mode, PanelMode::Dynamic);
        assert_eq!((main.rows, main.cols), (2, 3));
        let b = &main.buttons[0];
        assert!(b.is_toggle);
        assert_eq!(b.actions.len(), 2);
        assert_eq!(b.actions[0].delay_ms, 50);
        assert_eq!(b.actions[1].delay_ms, 0);

        let docked = &cfg.panels[1];
        assert_eq!(docked.mode, PanelMode::Docked);
        assert_eq!(docked.hotkey_text(), None);
        assert_eq!(docked.rows, 3);

        assert!(cfg.settings.start_with_os);
        assert!(!cfg.settings.hide_on_action_execute);
        assert_eq!(cfg.settings.animation_duration_ms, 150);
        assert!(cfg.settings.show_in_tray);
    }

    #[test]
    fn empty_object_uses_defaults() {
        let cfg = Config::from_json_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.settings.hide_on_action_execute);
    }

    #[test]
    fn blank_hotkey_counts_as_none() {
        let cfg = Config::from_json_str(r#"{"panels":[{"hotkey":"  "}]}"#).unwrap();
        assert_eq!(cfg.panels[0].hotkey_text(), None);
    }

    #[test]
    fn decode_each_payload_kind() {
        let cases = vec![
            (
                json!({"type": "Hotkey", "payload": {"keys": "Alt+F4"}}),
                ActionPayload::Hotkey(HotkeyPayload {
                    keys: "Alt+F4".into(),
                }),
            ),
            (
                json!({"type": "Text", "payload": {"text": "abc"}}),
                ActionPayload::Text(TextPayload {
                    text: "abc".into(),
                    mode: TextMode::Type,
                }),
            ),
            (
                json!({"type": "Open", "payload": {
                    "path": "notepad.exe",
                    "arguments": "a.txt",
                    "workingDirectory": "C:\\tmp",
                    "runAsAdmin": true
                }}),
                ActionPayload::Open(OpenPayload {
                    path: "notepad.exe".into(),
                    arguments: Some("a.txt".into()),
                    working_directory: Some("C:\\tmp".into()),
                    run_as_admin: true,
                }),
            ),
            (
                json!({"type": "Command", "payload": {"command": "echo hi", "waitForExit": true}}),
                ActionPayload::Command(CommandPayload {
                    command: "echo hi".into(),
                    show_window: false,
                    wait_for_exit: true,
                }),
            ),
            (
                json!({"type": "System", "payload": {"action": "VolumeUp", "value": 3}}),
                ActionPayload::System(SystemPayload {
                    action: SystemAction::VolumeUp,
                    value: Some(3),
                }),
            ),
        ];
        for (raw, want) in cases {
            let step: ButtonAction = serde_json::from_value(raw).unwrap();
            assert_eq!(step.decode().unwrap(), want);
        }
    }

    #[test]
    fn decode_multi_action_children() {
        let step: ButtonAction = serde_json::from_value(json!({
            "type": "MultiAction",
            "payload": {"actions": [
                {"type": "Hotkey", "payload": {"keys": "Ctrl+A"}},
                {"type": "Hotkey", "payload": {"keys": "Ctrl+C"}, "delayMs": 20}
            ]}
        }))
        .unwrap();
        let ActionPayload::MultiAction(multi) = step.decode().unwrap() else {
            panic!("expected MultiAction");
        };
        assert_eq!(multi.actions.len(), 2);
        assert_eq!(multi.actions[1].delay_ms, 20);
    }

    #[test]
    fn malformed_payloads_are_errors() {
        let bad = vec![
            json!({"type": "Hotkey"}),
            json!({"type": "Hotkey", "payload": {"nope": 1}}),
            json!({"type": "System", "payload": {"action": "Explode"}}),
            json!({"type": "Folder", "payload": {}}),
            json!({"type": "ProfileSwitch", "payload": {}}),
            json!({"type": "Teleport", "payload": {}}),
        ];
        for raw in bad {
            let step: ButtonAction = serde_json::from_value(raw.clone()).unwrap();
            assert!(
                matches!(step.decode(), Err(Error::Payload { .. })),
                "expected payload error for {raw}"
            );
        }
    }

    #[test]
    fn unknown_type_tag_still_loads() {
        let step: ButtonAction =
            serde_json::from_value(json!({"type": "Teleport", "delayMs": 5})).unwrap();
        assert_eq!(step.action_type, ActionType::Unknown);
        assert_eq!(step.delay_ms, 5);
    }

    #[test]
    fn tags_and_enum_names_ignore_case() {
        let step: ButtonAction =
            serde_json::from_value(json!({"type": "hotkey", "payload": {"keys": "Ctrl+C"}}))
                .unwrap();
        assert_eq!(step.action_type, ActionType::Hotkey);
        assert_eq!(
            step.decode().unwrap(),
            ActionPayload::Hotkey(HotkeyPayload {
                keys: "Ctrl+C".into()
            })
        );

        let step: ButtonAction = serde_json::from_value(json!({
            "type": "TEXT",
            "payload": {"text": "hi", "mode": "clipboard"}
        }))
        .unwrap();
        assert_eq!(
            step.decode().unwrap(),
            ActionPayload::Text(TextPayload {
                text: "hi".into(),
                mode: TextMode::Clipboard,
            })
        );

        let step: ButtonAction = serde_json::from_value(json!({
            "type": "system",
            "payload": {"action": "volumeUP"}
        }))
        .unwrap();
        assert_eq!(
            step.decode().unwrap(),
            ActionPayload::System(SystemPayload {
                action: SystemAction::VolumeUp,
                value: None,
            })
        );

        let step: ButtonAction =
            serde_json::from_value(json!({"type": "multiAction", "payload": {"actions": []}}))
                .unwrap();
        assert_eq!(step.action_type, ActionType::MultiAction);

        let cfg = Config::from_json_str(r#"{"panels":[{"mode":"docked"}]}"#).unwrap();
        assert_eq!(cfg.panels[0].mode, PanelMode::Docked);
    }

    #[test]
    fn unknown_enum_name_is_a_payload_error() {
        let step: ButtonAction = serde_json::from_value(json!({
            "type": "Text",
            "payload": {"text": "hi", "mode": "shout"}
        }))
        .unwrap();
        match step.decode() {
            Err(Error::Payload { kind, message }) => {
                assert_eq!(kind, ActionType::Text);
                assert!(message.contains("shout"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negative_delay_reads_as_zero() {
        let cfg = Config::from_json_str(
            r#"{"panels":[{"buttons":[{"actions":[
                {"type":"Hotkey","payload":{"keys":"a"},"delayMs":-1},
                {"type":"Hotkey","payload":{"keys":"b"},"delayMs":25}
            ]}]}]}"#,
        )
        .unwrap();
        let actions = &cfg.panels[0].buttons[0].actions;
        assert_eq!(actions[0].delay_ms, 0);
        assert_eq!(actions[1].delay_ms, 25);
    }

    #[test]
    fn typed_step_roundtrips_through_raw_form() {
        let payload = ActionPayload::Command(CommandPayload {
            command: "dir".into(),
            show_window: true,
            wait_for_exit: false,
        });
        let step = ButtonAction::new(&payload, 10);
        assert_eq!(step.action_type, ActionType::Command);
        assert_eq!(step.decode().unwrap(), payload);
    }

    #[test]
    fn check_reports_nested_paths() {
        let cfg = Config::from_json_str(
            r#"{"panels":[{"buttons":[
                {"actions":[]},
                {"actions":[
                    {"type":"Hotkey","payload":{"keys":"a"}},
                    {"type":"MultiAction","payload":{"actions":[
                        {"type":"Text"},
                        {"type":"Folder","payload":{}}
                    ]}}
                ]}
            ]}]}"#,
        )
        .unwrap();
        let problems = cfg.check();
        let located: Vec<(usize, usize, String)> = problems
            .iter()
            .map(|p| (p.panel, p.button, p.problem.path_string()))
            .collect();
        assert_eq!(
            located,
            vec![(0, 1, "1.0".to_string()), (0, 1, "1.1".to_string())]
        );
    }

    #[test]
    fn check_flags_excessive_nesting() {
        let mut step = ButtonAction::new(
            &ActionPayload::Hotkey(HotkeyPayload { keys: "a".into() }),
            0,
        );
        for _ in 0..=MAX_NESTING {
            step = ButtonAction::new(
                &ActionPayload::MultiAction(MultiActionPayload {
                    actions: vec![step],
                }),
                0,
            );
        }
        let problems = check_actions(&[step]);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].path.len(), MAX_NESTING + 1);
    }

    #[test]
    fn parse_error_has_location() {
        let err = Config::from_json_str("{\n  \"panels\": [\n    {\"rows\": \"x\"}\n  ]\n}")
            .unwrap_err();
        match err {
            Error::Parse { line, excerpt, .. } => {
                assert_eq!(line, 3);
                assert!(excerpt.contains('^'));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn load_from_path_reads_file_and_reports_missing() {
        let dir = env::temp_dir().join(format!("quickpad-config-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("config.json");
        fs::write(&file, SAMPLE).unwrap();
        let cfg = load_from_path(&file).unwrap();
        assert_eq!(cfg.panels[0].name, "Main");

        let missing = dir.join("missing.json");
        let err = load_from_path(&missing).unwrap_err();
        assert_eq!(err.path(), Some(missing.as_path()));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let p = Path::new("/some/where.json");
        assert_eq!(resolve_config_path(Some(p)).unwrap(), p);
    }
}
