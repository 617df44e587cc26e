//! Entitlement key to capability name table.
//!
//! Labels follow the names Apple uses on the developer portal's capability
//! list. Distribution profiles also get In-App Purchase and GameKit, which
//! have no entitlement key of their own.

use super::ProfileType;
use plist::Dictionary;

/// Label injected for ad hoc and App Store profiles.
pub const IN_APP_PURCHASE: &str = "In-App Purchase";
/// Label injected for ad hoc and App Store profiles.
pub const GAME_KIT: &str = "GameKit";

/// Known entitlement keys and their capability names.
pub static CAPABILITIES: &[(&str, &str)] = &[
    ("com.apple.developer.networking.wifi-info", "Access WiFi Information"),
    ("com.apple.developer.devicecheck.appattest-environment", "App Attest"),
    ("com.apple.security.application-groups", "App Groups"),
    ("com.apple.developer.in-app-payments", "Apple Pay Payment Processing"),
    ("com.apple.developer.associated-domains", "Associated Domains"),
    (
        "com.apple.developer.authentication-services.autofill-credential-provider",
        "AutoFill Credential Provider",
    ),
    ("com.apple.developer.ClassKit-environment", "ClassKit"),
    ("com.apple.developer.usernotifications.communication", "Communication Notifications"),
    ("com.apple.developer.networking.custom-protocol", "Custom Network Protocol"),
    ("com.apple.developer.default-data-protection", "Data Protection"),
    ("com.apple.developer.driverkit", "DriverKit for Development"),
    (
        "com.apple.developer.driverkit.allow-third-party-userclients",
        "DriverKit Allow Third Party UserClients",
    ),
    (
        "com.apple.developer.driverkit.communicates-with-drivers",
        "DriverKit Communicates with Drivers",
    ),
    ("com.apple.developer.driverkit.family.audio", "DriverKit Family Audio (development)"),
    (
        "com.apple.developer.driverkit.family.hid.device",
        "DriverKit Family HID Device (development)",
    ),
    (
        "com.apple.developer.driverkit.family.hid.eventservice",
        "DriverKit Family HID EventService (development)",
    ),
    (
        "com.apple.developer.driverkit.family.networking",
        "DriverKit Family Networking (development)",
    ),
    (
        "com.apple.developer.driverkit.family.scsicontroller",
        "DriverKit Family SCSIController (development)",
    ),
    ("com.apple.developer.driverkit.family.serial", "DriverKit Family Serial (development)"),
    ("com.apple.developer.driverkit.transport.hid", "DriverKit Transport HID (development)"),
    ("com.apple.developer.driverkit.transport.usb", "DriverKit USB Transport (development)"),
    (
        "com.apple.developer.kernel.extended-virtual-addressing",
        "Extended Virtual Address Space",
    ),
    ("com.apple.developer.family-controls", "Family Controls"),
    ("com.apple.developer.fileprovider.testing-mode", "FileProvider TestingMode"),
    ("com.apple.developer.user-fonts", "Fonts"),
    ("com.apple.developer.game-center", "Game Center"),
    ("com.apple.developer.group-session", "Group Activities"),
    ("com.apple.developer.healthkit", "HealthKit"),
    (
        "com.apple.developer.healthkit.recalibrate-estimates",
        "HealthKit Estimate Recalibration",
    ),
    ("com.apple.developer.healthkit.access", "HealthKit Access"),
    (
        "com.apple.developer.coremedia.hls.interstitial-preview",
        "HLS Interstitial Previews",
    ),
    ("com.apple.developer.homekit", "HomeKit"),
    ("com.apple.developer.networking.HotspotConfiguration", "Hotspot"),
    ("com.apple.developer.icloud-services", "iCloud"),
    ("com.apple.developer.icloud-container-identifiers", "iCloud Container"),
    ("com.apple.InAppPurchase", IN_APP_PURCHASE),
    ("com.apple.developer.kernel.increased-memory-limit", "Increased Memory Limit"),
    ("inter-app-audio", "Inter-App Audio"),
    ("com.apple.developer.coremedia.hls.low-latency", "Low Latency HLS"),
    ("com.apple.developer.maps", "Maps"),
    ("com.apple.developer.matter.allow-setup-payload", "Matter Allow Setup Payload"),
    (
        "com.apple.developer.associated-domains.mdm-managed",
        "MDM Managed Associated Domains",
    ),
    ("com.apple.developer.media-device-discovery-extension", "Media Device Discovery"),
    ("com.apple.developer.shared-with-you.collaboration", "Messages Collaboration"),
    ("com.apple.developer.networking.multipath", "Multipath"),
    ("com.apple.developer.networking.networkextension", "Network Extensions"),
    ("com.apple.developer.nfc.readersession.formats", "NFC Tag Reading"),
    (
        "com.apple.developer.on-demand-install-capable",
        "On Demand Install Capable for App Clip Extensions",
    ),
    ("com.apple.developer.networking.vpn.api", "Personal VPN"),
    ("aps-environment", "Push Notifications"),
    ("com.apple.developer.push-to-talk", "Push to Talk"),
    ("com.apple.developer.shared-with-you", "Shared with You"),
    ("com.apple.developer.applesignin", "Sign In with Apple"),
    ("com.apple.developer.siri", "SiriKit"),
    ("com.apple.developer.system-extension.install", "System Extension"),
    (
        "com.apple.developer.usernotifications.time-sensitive",
        "Time Sensitive Notifications",
    ),
    ("com.apple.developer.user-management", "User Management"),
    ("com.apple.developer.pass-type-identifiers", "Wallet"),
    ("com.apple.developer.weatherkit", "WeatherKit"),
    (
        "com.apple.external-accessory.wireless-configuration",
        "Wireless Accessory Configuration",
    ),
];

/// Capability name for an entitlement key.
pub fn capability_name(key: &str) -> Option<&'static str> {
    CAPABILITIES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

/// Capability names enabled by `entitlements` for a profile of type `kind`.
///
/// Distribution types come first, then entitlements in dictionary order.
/// Unknown keys are skipped and each label appears once.
pub fn capabilities_for(entitlements: &Dictionary, kind: Option<ProfileType>) -> Vec<&'static str> {
    let mut result = Vec::new();

    if kind.is_some_and(|k| k.is_distribution()) {
        result.push(IN_APP_PURCHASE);
        result.push(GAME_KIT);
    }

    for name in entitlements.keys().filter_map(|key| capability_name(key)) {
        if !result.contains(&name) {
            result.push(name);
        }
    }

    result
}
