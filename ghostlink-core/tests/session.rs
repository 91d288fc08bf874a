//! Whole-session tests: scripted user, fake firmware

mod common;

use common::{link_and_clock, FakeClock, FakeLink, MemStore, ScriptedUi};
use ghostlink_core::config::{BridgeConfig, SessionConfig};
use ghostlink_core::input::Strictness;
use ghostlink_core::menu::ghost_esp;
use ghostlink_core::traits::DialogOutcome;
use ghostlink_core::{Bridge, Controller, ExitReason, MenuId, NavState};
use ghostlink_protocol::{Catalog, CatalogVersion};

const ROOT: &str = "Select a utility:";
const WIFI: &str = "Wifi Utilities:";

fn controller(
    replies: &[&'static [u8]],
    config: SessionConfig,
) -> Controller<FakeLink, FakeClock> {
    let (link, clock) = link_and_clock(replies);
    let catalog = Catalog::new(config.catalog);
    Controller::from_config(link, clock, ghost_esp().unwrap(), catalog, &config)
}

fn written(controller: &Controller<FakeLink, FakeClock>) -> String {
    controller.bridge().link().written_str()
}

#[test]
fn test_scan_wifi_returns_to_wifi_menu() {
    let mut controller = controller(&[b"AP: home\n"], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(0), Some(0), None, None]);

    let summary = controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "scanap\nstop\nstop\n");
    assert_eq!(ui.menus_shown, [ROOT, WIFI, WIFI, ROOT]);
    assert_eq!(ui.surface.headers, ["scanap"]);
    assert_eq!(ui.surface.content, b"AP: home\n");
    assert_eq!(summary.cycles, 1);
    assert!(summary.exit_stop_sent);

    let cycle = controller.session().last_cycle().unwrap();
    assert_eq!(cycle.return_to, MenuId::WIFI);
    assert_eq!(cycle.reason, ExitReason::Dismissed);
}

#[test]
fn test_valid_index_is_appended() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(0), Some(6), None, None]).with_inputs(&[Some("12")]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "select -a 12\nstop\nstop\n");
    assert!(ui.messages.is_empty());
}

#[test]
fn test_invalid_index_writes_nothing() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(0), Some(6), None, None]).with_inputs(&[Some("abc")]);

    let summary = controller.run(&mut ui, &mut MemStore::default());

    // Only the exit stop
    assert_eq!(written(&controller), "stop\n");
    assert_eq!(
        ui.messages,
        [("Error".to_string(), "Invalid number entered.".to_string())]
    );
    assert_eq!(ui.menus_shown, [ROOT, WIFI, WIFI, ROOT]);
    assert_eq!(summary.rejected_inputs, 1);
    assert_eq!(summary.cycles, 0);
}

#[test]
fn test_large_index_is_sent() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(0), Some(6), None, None]).with_inputs(&[Some("70000")]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "select -a 70000\nstop\nstop\n");
    assert!(ui.messages.is_empty());
}

#[test]
fn test_oversized_index_is_out_of_range() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(0), Some(6), None, None])
        .with_inputs(&[Some("123456789012345678901234567890")]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "stop\n");
    assert_eq!(
        ui.messages,
        [("Error".to_string(), "Number out of range.".to_string())]
    );
}

#[test]
fn test_too_long_command_has_its_own_message() {
    let config = SessionConfig::default();
    let (link, clock) = link_and_clock(&[]);
    let mut catalog = Catalog::new(config.catalog);
    let long_spelling = "ssid -a -n ".repeat(11);
    catalog
        .set_override(ghostlink_protocol::Action::AddSsid, long_spelling.trim_end())
        .unwrap();
    let mut controller =
        Controller::from_config(link, clock, ghost_esp().unwrap(), catalog, &config);
    let mut ui = ScriptedUi::new(&[Some(0), Some(3), None, None]).with_inputs(&[Some("Free WiFi")]);

    let summary = controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "stop\n");
    assert_eq!(ui.messages, [("Error".to_string(), "Input too long.".to_string())]);
    assert_eq!(summary.rejected_inputs, 1);
}

#[test]
fn test_empty_index_strict_is_rejected() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(0), Some(7), None, None]).with_inputs(&[Some("")]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "stop\n");
    assert_eq!(ui.messages.len(), 1);
}

#[test]
fn test_empty_index_lenient_sends_bare_command() {
    let config = SessionConfig {
        strictness: Strictness::Lenient,
        ..SessionConfig::default()
    };
    let mut controller = controller(&[], config);
    let mut ui = ScriptedUi::new(&[Some(0), Some(7), None, None]).with_inputs(&[Some("")]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "select -s\nstop\nstop\n");
    assert!(ui.messages.is_empty());
}

#[test]
fn test_ssid_text_passes_through() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(0), Some(3), None, None]).with_inputs(&[Some("Free WiFi")]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "ssid -a -n Free WiFi\nstop\nstop\n");
}

#[test]
fn test_cancelled_prompt_sends_nothing() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(0), Some(3), None, None]).with_inputs(&[None]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "stop\n");
    assert!(ui.messages.is_empty());
}

#[test]
fn test_root_cancel_then_dialog_cancel_reenters_root() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[None, None])
        .with_dialogs(&[DialogOutcome::Cancel, DialogOutcome::Confirm]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(ui.menus_shown, [ROOT, ROOT]);
    assert_eq!(written(&controller), "stop\n");
    assert_eq!(controller.session().state(), NavState::Exited);
}

#[test]
fn test_exit_flag_follows_dialog() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[None]).with_dialogs(&[DialogOutcome::Cancel]);
    let mut store = MemStore::default();

    assert_eq!(controller.step(&mut ui, &mut store), NavState::ConfirmExit);
    assert!(controller.session().exit_requested());

    assert_eq!(
        controller.step(&mut ui, &mut store),
        NavState::Menu(MenuId::ROOT)
    );
    assert!(!controller.session().exit_requested());
}

#[test]
fn test_legacy_give_up_ends_menu_tree() {
    let config = SessionConfig {
        bridge: BridgeConfig::legacy(),
        catalog: CatalogVersion::Legacy,
        ..SessionConfig::default()
    };
    let mut controller = controller(&[b"AP: home"], config);
    let mut ui = ScriptedUi::new(&[Some(0), Some(0)]);
    ui.surface.polls_per_cycle = u32::MAX;

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "scanapstopstop");
    assert_eq!(ui.menus_shown, [ROOT, WIFI]);
    assert_eq!(controller.bridge().clock().delays, [10_000, 2_000]);
    assert_eq!(
        controller.session().last_cycle().unwrap().reason,
        ExitReason::IdleTimeout
    );
}

#[test]
fn test_catalog_version_selects_beacon_spelling() {
    for (version, expected) in [
        (CatalogVersion::Legacy, "attack beacon -l\nstop\nstop\n"),
        (CatalogVersion::Flagged, "attack -t beacon -l\nstop\nstop\n"),
        (CatalogVersion::Bundled, "beaconspam -l\nstop\nstop\n"),
    ] {
        let config = SessionConfig {
            catalog: version,
            ..SessionConfig::default()
        };
        let mut controller = controller(&[], config);
        let mut ui = ScriptedUi::new(&[Some(0), Some(8), None, None]);

        controller.run(&mut ui, &mut MemStore::default());

        assert_eq!(written(&controller), expected);
    }
}

#[test]
fn test_ble_spam_returns_to_ble_menu() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(1), Some(4), None, None]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "blespam -t all\nstop\nstop\n");
    assert_eq!(
        ui.menus_shown,
        [ROOT, "BLE Spam Options:", "BLE Spam Options:", ROOT]
    );
}

#[test]
fn test_upload_payload() {
    let mut controller = controller(&[b"ok"], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(5), Some(0), None, None]).with_picks(&[Some(1)]);
    let mut store = MemStore {
        files: vec![("blink.txt", b"LED 1\n"), ("combo.txt", b"A 100\nB 50\n")],
    };

    let summary = controller.run(&mut ui, &mut store);

    assert_eq!(
        controller.bridge().link().written,
        b"controller -s A 100\nB 50\n\x0cstop\nstop\n"
    );
    assert_eq!(ui.surface.headers, ["Controller Script"]);
    assert_eq!(summary.cycles, 1);
}

#[test]
fn test_upload_without_payloads() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(5), Some(1), None, None]);

    controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(written(&controller), "stop\n");
    assert_eq!(
        ui.messages,
        [("Error".to_string(), "No payloads found.".to_string())]
    );
}

#[test]
fn test_upload_rejects_form_feed() {
    let mut controller = controller(&[], SessionConfig::default());
    let mut ui = ScriptedUi::new(&[Some(5), Some(1), None, None]).with_picks(&[Some(0)]);
    let mut store = MemStore {
        files: vec![("bad.txt", b"A\x0cB")],
    };

    controller.run(&mut ui, &mut store);

    assert_eq!(written(&controller), "stop\n");
    assert_eq!(ui.messages.len(), 1);
}

#[test]
fn test_write_failure_keeps_session_alive() {
    let (mut link, clock) = link_and_clock(&[]);
    link.fail_writes = true;
    let bridge = Bridge::new(link, clock, BridgeConfig::default());
    let mut controller = Controller::new(
        bridge,
        ghost_esp().unwrap(),
        Catalog::default(),
        Strictness::Strict,
    );
    let mut ui = ScriptedUi::new(&[Some(2), Some(0), None, None]);

    let summary = controller.run(&mut ui, &mut MemStore::default());

    assert_eq!(summary.transport_errors, 1);
    assert_eq!(summary.cycles, 0);
    assert!(!summary.exit_stop_sent);
    assert_eq!(
        ui.messages,
        [("Error".to_string(), "Device not responding.".to_string())]
    );
    assert_eq!(ui.menus_shown, [ROOT, "LED Utilities:", "LED Utilities:", ROOT]);
}
