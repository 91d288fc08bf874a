//! Command catalog
//!
//! Maps every firmware action to its command spelling. The GhostESP shell
//! changed some flags between releases (`attack beacon -l` became
//! `attack -t beacon -l`, and some builds use `beaconspam -l` instead), so
//! spellings are chosen by [`CatalogVersion`] and individual actions can be
//! overridden at runtime.

use heapless::Vec;

use crate::command::{Command, CommandError};

/// Maximum number of per-action overrides
pub const MAX_OVERRIDES: usize = 16;

/// Firmware command dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CatalogVersion {
    /// Positional attack types: `attack beacon -l`
    Legacy,
    /// Flagged attack types: `attack -t beacon -l`
    #[default]
    Flagged,
    /// Shell of the firmware this tool ships with: `beaconspam -l`,
    /// `blespam -samsung`
    Bundled,
}

impl CatalogVersion {
    /// Parse a version name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "legacy" => Some(CatalogVersion::Legacy),
            "flagged" => Some(CatalogVersion::Flagged),
            "bundled" => Some(CatalogVersion::Bundled),
            _ => None,
        }
    }
}

macro_rules! actions {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $key:literal,
                $legacy:literal, $flagged:literal, $bundled:literal, $arg:literal;
        )+
    ) => {
        /// Every action the firmware understands
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum Action {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl Action {
            /// All actions, in declaration order
            pub const ALL: &'static [Action] = &[$(Action::$variant,)+];

            /// Stable snake_case key, used in configuration files
            pub fn key(self) -> &'static str {
                match self {
                    $(Action::$variant => $key,)+
                }
            }

            /// Look an action up by its configuration key
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(Action::$variant),)+
                    _ => None,
                }
            }

            /// Whether this action appends a prompted argument
            pub fn takes_argument(self) -> bool {
                match self {
                    $(Action::$variant => $arg,)+
                }
            }

            fn spelling(self, version: CatalogVersion) -> &'static str {
                match (self, version) {
                    $(
                        (Action::$variant, CatalogVersion::Legacy) => $legacy,
                        (Action::$variant, CatalogVersion::Flagged) => $flagged,
                        (Action::$variant, CatalogVersion::Bundled) => $bundled,
                    )+
                }
            }
        }
    };
}

actions! {
    // WiFi scanning
    /// Scan for access points
    ScanAp => "scan_ap", "scanap", "scanap", "scanap", false;
    /// Scan for client stations
    ScanStations => "scan_stations", "scansta", "scansta", "scansta", false;
    /// Stop a running scan
    StopScan => "stop_scan", "stopscan", "stopscan", "stopscan", false;
    /// List scanned access points
    ListAp => "list_ap", "list -a", "list -a", "list -a", false;
    /// List scanned stations
    ListStations => "list_stations", "list -c", "list -s", "list -s", false;
    /// Select an access point by index
    SelectAp => "select_ap", "select -a", "select -a", "select -a", true;
    /// Select a station by index
    SelectStation => "select_station", "select -s", "select -s", "select -s", true;

    // SSID list
    /// Add a random SSID to the beacon list
    AddRandomSsid => "add_random_ssid", "ssid -a -g", "ssid -a -g", "ssid -a -g", false;
    /// Add a named SSID to the beacon list
    AddSsid => "add_ssid", "ssid -a -n", "ssid -a -n", "ssid -a -n", true;

    // Attacks
    /// Beacon spam using the SSID list
    BeaconSpamList => "beacon_spam_list",
        "attack beacon -l", "attack -t beacon -l", "beaconspam -l", false;
    /// Beacon spam with random SSIDs
    BeaconSpamRandom => "beacon_spam_random",
        "attack beacon -r", "attack -t beacon -r", "beaconspam -r", false;
    /// Rickroll beacon spam
    BeaconSpamRickroll => "beacon_spam_rickroll",
        "attack rickroll", "attack -t rickroll", "beaconspam -rr", false;
    /// Deauthenticate the selected target
    Deauth => "deauth", "attack -d", "attack -d", "attack -d", false;
    /// Stop deauthentication
    StopDeauth => "stop_deauth", "stopdeauth", "stopdeauth", "stopdeauth", false;
    /// Stop beacon spam
    StopSpam => "stop_spam", "stopspam", "stopspam", "stopspam", false;

    // Casting
    /// Connect and cast a video over CastV2
    CastV2Connect => "castv2_connect",
        "castv2connect -s SSID -p PASSWORD -v Y7uhkyameuk",
        "castv2connect -s SSID -p PASSWORD -v Y7uhkyameuk",
        "castv2connect -s SSID -p PASSWORD -v Y7uhkyameuk", false;
    /// Connect and launch a video over DIAL
    DialConnect => "dial_connect",
        "dialconnect -s SSID -p PASSWORD -t youtube -v Y7uhkyameuk",
        "dialconnect -s SSID -p PASSWORD -t youtube -v Y7uhkyameuk",
        "dialconnect -s SSID -p PASSWORD -t youtube -v Y7uhkyameuk", false;

    // BLE spam
    /// Samsung pairing popup spam
    BleSpamSamsung => "ble_spam_samsung",
        "blespam -t samsung", "blespam -t samsung", "blespam -samsung", false;
    /// Apple pairing popup spam
    BleSpamApple => "ble_spam_apple",
        "blespam -t apple", "blespam -t apple", "blespam -apple", false;
    /// Google fast pair spam
    BleSpamGoogle => "ble_spam_google",
        "blespam -t google", "blespam -t google", "blespam -google", false;
    /// Windows swift pair spam
    BleSpamWindows => "ble_spam_windows",
        "blespam -t windows", "blespam -t windows", "blespam -microsoft", false;
    /// Cycle through every spam type
    BleSpamAll => "ble_spam_all", "blespam -t all", "blespam -t all", "blespam -t all", false;

    // BLE scanning
    /// Find nearby Flipper devices
    BleFindFlippers => "ble_find_flippers", "blescan -f", "blescan -f", "blescan -f", false;
    /// Detect BLE spam
    BleSpamDetector => "ble_spam_detector", "blescan -ds", "blescan -ds", "blescan -ds", false;
    /// Scan for AirTags
    BleAirTags => "ble_airtags", "blescan -a", "blescan -a", "blescan -a", false;
    /// Raw advertisement scan
    BleRawScan => "ble_raw_scan", "blescan -r", "blescan -r", "blescan -r", false;
    /// Stop BLE scanning
    BleStopScan => "ble_stop_scan", "blescan -s", "blescan -s", "blescan -s", false;

    // Packet capture
    /// Capture probe requests
    CaptureProbes => "capture_probes", "capture -probe", "capture -probe", "capture -probe", false;
    /// Capture beacons
    CaptureBeacons => "capture_beacons",
        "capture -beacon", "capture -beacon", "capture -beacon", false;
    /// Capture deauth frames
    CaptureDeauth => "capture_deauth",
        "capture -deauth", "capture -deauth", "capture -deauth", false;
    /// Capture raw frames
    CaptureRaw => "capture_raw", "capture -raw", "capture -raw", "capture -raw", false;
    /// Capture WPS frames
    CaptureWps => "capture_wps", "capture -wps", "capture -wps", "capture -wps", false;
    /// Capture Pwnagotchi beacons
    CapturePwnagotchi => "capture_pwnagotchi",
        "capture -pwn", "capture -pwn", "capture -pwn", false;
    /// Stop capturing
    CaptureStop => "capture_stop", "capture -stop", "capture -stop", "capture -stop", false;

    // Misc
    /// Rainbow LED effect
    RainbowLed => "rainbow_led", "led", "led", "led", false;
    /// Cancel whatever is running
    Stop => "stop", "stop", "stop", "stop", false;
}

/// Versioned command catalog with optional per-action overrides
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    version: CatalogVersion,
    overrides: Vec<(Action, Command), MAX_OVERRIDES>,
}

/// Errors from catalog edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// Override spelling is not a valid command
    Command(CommandError),
    /// Too many overrides
    TooManyOverrides,
}

impl From<CommandError> for CatalogError {
    fn from(e: CommandError) -> Self {
        CatalogError::Command(e)
    }
}

impl Catalog {
    /// Create a catalog for a firmware dialect
    pub fn new(version: CatalogVersion) -> Self {
        Self {
            version,
            overrides: Vec::new(),
        }
    }

    /// Active dialect
    pub fn version(&self) -> CatalogVersion {
        self.version
    }

    /// Replace the spelling of one action
    ///
    /// A later override for the same action replaces the earlier one.
    pub fn set_override(&mut self, action: Action, spelling: &str) -> Result<(), CatalogError> {
        let command = Command::new(spelling)?;
        if let Some(slot) = self.overrides.iter_mut().find(|(a, _)| *a == action) {
            slot.1 = command;
            return Ok(());
        }
        self.overrides
            .push((action, command))
            .map_err(|_| CatalogError::TooManyOverrides)
    }

    /// Base spelling for an action, before any argument
    pub fn spelling(&self, action: Action) -> &str {
        self.overrides
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, c)| c.as_str())
            .unwrap_or_else(|| action.spelling(self.version))
    }

    /// Render the command line for an action
    pub fn command(&self, action: Action, arg: Option<&str>) -> Result<Command, CommandError> {
        Command::with_arg(self.spelling(action), arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beacon_spellings_per_version() {
        let legacy = Catalog::new(CatalogVersion::Legacy);
        let flagged = Catalog::new(CatalogVersion::Flagged);

        assert_eq!(
            legacy.command(Action::BeaconSpamList, None).unwrap().as_str(),
            "attack beacon -l"
        );
        assert_eq!(
            flagged.command(Action::BeaconSpamList, None).unwrap().as_str(),
            "attack -t beacon -l"
        );
        assert_eq!(
            legacy.command(Action::BeaconSpamRandom, None).unwrap().as_str(),
            "attack beacon -r"
        );
        assert_eq!(
            flagged.command(Action::BeaconSpamRandom, None).unwrap().as_str(),
            "attack -t beacon -r"
        );
    }

    #[test]
    fn test_bundled_spellings() {
        let bundled = Catalog::new(CatalogVersion::Bundled);
        assert_eq!(bundled.spelling(Action::BeaconSpamList), "beaconspam -l");
        assert_eq!(bundled.spelling(Action::BeaconSpamRandom), "beaconspam -r");
        assert_eq!(bundled.spelling(Action::BeaconSpamRickroll), "beaconspam -rr");
        assert_eq!(bundled.spelling(Action::BleSpamSamsung), "blespam -samsung");
        assert_eq!(bundled.spelling(Action::BleSpamApple), "blespam -apple");
        assert_eq!(bundled.spelling(Action::BleSpamGoogle), "blespam -google");
        assert_eq!(bundled.spelling(Action::BleSpamWindows), "blespam -microsoft");
        assert_eq!(bundled.spelling(Action::ListStations), "list -s");
        // Unchanged across dialects
        assert_eq!(bundled.spelling(Action::Deauth), "attack -d");
        assert_eq!(bundled.spelling(Action::ScanAp), "scanap");
    }

    #[test]
    fn test_stable_spellings() {
        let catalog = Catalog::default();
        assert_eq!(catalog.spelling(Action::ScanAp), "scanap");
        assert_eq!(catalog.spelling(Action::BleSpamApple), "blespam -t apple");
        assert_eq!(catalog.spelling(Action::RainbowLed), "led");
        assert_eq!(catalog.spelling(Action::Stop), crate::STOP);
    }

    #[test]
    fn test_argument_appended() {
        let catalog = Catalog::default();
        let cmd = catalog.command(Action::SelectAp, Some("3")).unwrap();
        assert_eq!(cmd.as_str(), "select -a 3");
        assert!(Action::SelectAp.takes_argument());
        assert!(!Action::ScanAp.takes_argument());
    }

    #[test]
    fn test_override_replaces_spelling() {
        let mut catalog = Catalog::new(CatalogVersion::Legacy);
        catalog.set_override(Action::ListStations, "list -s").unwrap();
        assert_eq!(catalog.spelling(Action::ListStations), "list -s");

        catalog.set_override(Action::ListStations, "list -c").unwrap();
        assert_eq!(catalog.spelling(Action::ListStations), "list -c");
        assert_eq!(catalog.overrides.len(), 1);
    }

    #[test]
    fn test_override_rejects_bad_spelling() {
        let mut catalog = Catalog::default();
        assert_eq!(
            catalog.set_override(Action::ScanAp, ""),
            Err(CatalogError::Command(CommandError::Empty))
        );
    }

    #[test]
    fn test_keys_roundtrip() {
        for &action in Action::ALL {
            assert_eq!(Action::from_key(action.key()), Some(action));
        }
        assert_eq!(Action::from_key("no_such_action"), None);
    }

    #[test]
    fn test_every_spelling_is_a_valid_command() {
        for version in [CatalogVersion::Legacy, CatalogVersion::Flagged, CatalogVersion::Bundled] {
            let catalog = Catalog::new(version);
            for &action in Action::ALL {
                assert!(catalog.command(action, None).is_ok(), "{:?}", action);
            }
        }
    }

    #[test]
    fn test_version_from_name() {
        assert_eq!(CatalogVersion::from_name("legacy"), Some(CatalogVersion::Legacy));
        assert_eq!(CatalogVersion::from_name("flagged"), Some(CatalogVersion::Flagged));
        assert_eq!(CatalogVersion::from_name("bundled"), Some(CatalogVersion::Bundled));
        assert_eq!(CatalogVersion::from_name("v3"), None);
    }
}
