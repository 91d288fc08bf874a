//! Stock GhostESP menus

use ghostlink_protocol::{Action, PayloadKind};

use super::{Item, Menu, MenuError, MenuId, MenuTree};

const ROOT_ITEMS: &[Item] = &[
    Item::submenu("Wifi Utils", MenuId::WIFI),
    Item::submenu("BLE Spam", MenuId::BLE_SPAM),
    Item::submenu("LED Utils", MenuId::LED),
    Item::submenu("BLE Scan", MenuId::BLE_SCAN),
    Item::submenu("Capture", MenuId::CAPTURE),
    Item::submenu("Payloads", MenuId::PAYLOADS),
];

const WIFI_ITEMS: &[Item] = &[
    Item::action("Scan Wifi", Action::ScanAp),
    Item::action("Scan Stations", Action::ScanStations),
    Item::action("Add SSID Random", Action::AddRandomSsid),
    Item::text("Add SSID", Action::AddSsid, "Enter SSID"),
    Item::action("List AP", Action::ListAp),
    Item::action("List Stations", Action::ListStations),
    Item::index("Select AP", Action::SelectAp, "Enter AP Index"),
    Item::index("Select Station", Action::SelectStation, "Enter Station Index"),
    Item::action("Beacon Spam SSID List", Action::BeaconSpamList),
    Item::action("Beacon Spam Random", Action::BeaconSpamRandom),
    Item::action("Beacon Spam Rickroll", Action::BeaconSpamRickroll),
    Item::action("Cast V2 Connect", Action::CastV2Connect),
    Item::action("Dial Connect", Action::DialConnect),
    Item::action("Deauth", Action::Deauth),
    Item::action("Stop Scan", Action::StopScan),
    Item::action("Stop Deauth", Action::StopDeauth),
    Item::action("Stop Spam", Action::StopSpam),
];

const BLE_SPAM_ITEMS: &[Item] = &[
    Item::action("Samsung Spam", Action::BleSpamSamsung),
    Item::action("Apple Spam", Action::BleSpamApple),
    Item::action("Google Spam", Action::BleSpamGoogle),
    Item::action("Windows Spam", Action::BleSpamWindows),
    Item::action("All", Action::BleSpamAll),
];

const LED_ITEMS: &[Item] = &[Item::action("Rainbow LED", Action::RainbowLed)];

const BLE_SCAN_ITEMS: &[Item] = &[
    Item::action("Find Flippers", Action::BleFindFlippers),
    Item::action("Spam Detector", Action::BleSpamDetector),
    Item::action("AirTag Scanner", Action::BleAirTags),
    Item::action("Raw Scan", Action::BleRawScan),
    Item::action("Stop BLE Scan", Action::BleStopScan),
];

const CAPTURE_ITEMS: &[Item] = &[
    Item::action("Probes", Action::CaptureProbes),
    Item::action("Beacons", Action::CaptureBeacons),
    Item::action("Deauth", Action::CaptureDeauth),
    Item::action("Raw", Action::CaptureRaw),
    Item::action("WPS", Action::CaptureWps),
    Item::action("Pwnagotchi", Action::CapturePwnagotchi),
    Item::action("Stop", Action::CaptureStop),
];

const PAYLOAD_ITEMS: &[Item] = &[
    Item::upload("Controller Script", PayloadKind::Controller),
    Item::upload("USB Control Script", PayloadKind::UsbControl),
];

const MENUS: &[Menu] = &[
    Menu {
        id: MenuId::ROOT,
        header: "Select a utility:",
        parent: None,
        items: ROOT_ITEMS,
    },
    Menu {
        id: MenuId::WIFI,
        header: "Wifi Utilities:",
        parent: Some(MenuId::ROOT),
        items: WIFI_ITEMS,
    },
    Menu {
        id: MenuId::BLE_SPAM,
        header: "BLE Spam Options:",
        parent: Some(MenuId::ROOT),
        items: BLE_SPAM_ITEMS,
    },
    Menu {
        id: MenuId::LED,
        header: "LED Utilities:",
        parent: Some(MenuId::ROOT),
        items: LED_ITEMS,
    },
    Menu {
        id: MenuId::BLE_SCAN,
        header: "BLE Scan Options:",
        parent: Some(MenuId::ROOT),
        items: BLE_SCAN_ITEMS,
    },
    Menu {
        id: MenuId::CAPTURE,
        header: "Capture Options:",
        parent: Some(MenuId::ROOT),
        items: CAPTURE_ITEMS,
    },
    Menu {
        id: MenuId::PAYLOADS,
        header: "Upload Payload:",
        parent: Some(MenuId::ROOT),
        items: PAYLOAD_ITEMS,
    },
];

/// Build the stock GhostESP menu tree
pub fn ghost_esp() -> Result<MenuTree, MenuError> {
    let mut tree = MenuTree::new();
    for menu in MENUS {
        tree.add_menu(*menu)?;
    }
    tree.validate()?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{ArgSpec, Entry, Leaf};

    #[test]
    fn test_stock_tree_is_valid() {
        let tree = ghost_esp().unwrap();
        assert_eq!(tree.menus().len(), 7);
        assert_eq!(tree.root().unwrap().header, "Select a utility:");
    }

    #[test]
    fn test_wifi_item_order() {
        let tree = ghost_esp().unwrap();
        let wifi = tree.menu(MenuId::WIFI).unwrap();
        let labels: std::vec::Vec<_> = wifi.labels().take(13).collect();
        assert_eq!(
            labels,
            [
                "Scan Wifi",
                "Scan Stations",
                "Add SSID Random",
                "Add SSID",
                "List AP",
                "List Stations",
                "Select AP",
                "Select Station",
                "Beacon Spam SSID List",
                "Beacon Spam Random",
                "Beacon Spam Rickroll",
                "Cast V2 Connect",
                "Dial Connect",
            ]
        );
    }

    #[test]
    fn test_select_ap_prompts_for_index() {
        let tree = ghost_esp().unwrap();
        assert_eq!(
            tree.resolve(MenuId::WIFI, 6),
            Some(Entry::Leaf(Leaf {
                action: Action::SelectAp,
                arg: ArgSpec::Index {
                    header: "Enter AP Index"
                },
            }))
        );
    }

    #[test]
    fn test_every_submenu_returns_to_root() {
        let tree = ghost_esp().unwrap();
        for menu in tree.menus().iter().filter(|m| !m.id.is_root()) {
            assert_eq!(menu.parent, Some(MenuId::ROOT));
        }
    }
}
