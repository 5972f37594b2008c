//! Turns raw platform payloads into canonical notification events

use serde_json::{Map, Value};

use crate::domain::platform::AppState;

use super::event::NotificationEvent;
use super::payload::{AndroidNotification, IosNotification, RawNotification};

/// Normalize a raw payload into the canonical event shape.
///
/// `background_hint` forces the background flag when the caller already
/// knows how the notification arrived (the initial-notification replay
/// path is the only user). Without a hint the flag is derived from the
/// payload's own `foreground` field and the current app state.
pub fn normalize(
    raw: RawNotification,
    app_state: AppState,
    background_hint: Option<bool>,
) -> NotificationEvent {
    let from_background =
        background_hint.unwrap_or_else(|| derive_background(&raw, app_state));

    match raw {
        RawNotification::Ios(payload) => normalize_ios(payload, from_background),
        RawNotification::Android(payload) => normalize_android(payload, from_background),
    }
}

/// A delivery counts as background when the payload says it was not
/// foregrounded, or the process itself is currently backgrounded.
fn derive_background(raw: &RawNotification, app_state: AppState) -> bool {
    raw.foreground_flag() == Some(false) || app_state.is_background()
}

fn normalize_ios(payload: IosNotification, from_background: bool) -> NotificationEvent {
    NotificationEvent {
        foreground: !from_background,
        // The iOS bridge cannot distinguish a tap from plain background
        // delivery, so the two are reported as one and the same.
        user_interaction: Some(from_background),
        title: None,
        message: payload.message,
        badge: payload.badge,
        alert: payload.alert,
        sound: payload.sound,
        data: payload.data,
        extras: Map::new(),
    }
}

fn normalize_android(payload: AndroidNotification, from_background: bool) -> NotificationEvent {
    let mut fields = payload.into_fields();

    // The computed flag wins over whatever the bundle claimed.
    fields.remove("foreground");

    let user_interaction = take_bool(&mut fields, "userInteraction");
    let title = take_string(&mut fields, "title");
    let message = take_string(&mut fields, "message");
    let sound = take_string(&mut fields, "sound");
    let badge = take_badge(&mut fields);
    let alert = fields.remove("alert");
    let data = fields
        .remove("data")
        .map(parse_data_string)
        .unwrap_or(Value::Null);

    NotificationEvent {
        foreground: !from_background,
        user_interaction,
        title,
        message,
        badge,
        alert,
        sound,
        data,
        extras: fields,
    }
}

/// Parse a JSON-shaped string into structured data, keeping the original
/// string untouched when it does not parse.
fn parse_data_string(value: Value) -> Value {
    match value {
        Value::String(text) => match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(text),
        },
        other => other,
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(text)) => Some(text),
        Some(other) => {
            fields.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

fn take_bool(fields: &mut Map<String, Value>, key: &str) -> Option<bool> {
    match fields.remove(key) {
        Some(Value::Bool(flag)) => Some(flag),
        Some(other) => {
            fields.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

fn take_badge(fields: &mut Map<String, Value>) -> Option<u32> {
    match fields.remove("badge") {
        Some(value) => match value.as_u64().and_then(|count| u32::try_from(count).ok()) {
            Some(count) => Some(count),
            None => {
                fields.insert("badge".to_string(), value);
                None
            }
        },
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn android(fields: Value) -> RawNotification {
        let Value::Object(map) = fields else {
            panic!("fixture must be a JSON object");
        };
        RawNotification::Android(AndroidNotification::from_fields(map))
    }

    #[test]
    fn payload_foreground_false_derives_background() {
        let event = normalize(android(json!({"foreground": false})), AppState::Active, None);
        assert!(!event.foreground);
    }

    #[test]
    fn background_app_state_overrides_payload_claim() {
        let event = normalize(android(json!({"foreground": true})), AppState::Background, None);
        assert!(!event.foreground);
        // The bundle's own flag must not survive next to the computed one.
        assert!(!event.extras.contains_key("foreground"));
    }

    #[test]
    fn explicit_hint_wins_over_derivation() {
        let event = normalize(
            android(json!({"foreground": true})),
            AppState::Background,
            Some(false),
        );
        assert!(event.foreground);

        let event = normalize(android(json!({})), AppState::Active, Some(true));
        assert!(!event.foreground);
    }

    #[test]
    fn active_app_without_claims_is_foreground() {
        let event = normalize(android(json!({})), AppState::Active, None);
        assert!(event.foreground);
    }

    #[test]
    fn ios_accessors_map_onto_dedicated_fields() {
        let raw = RawNotification::Ios(IosNotification {
            foreground: Some(true),
            message: Some("hello".into()),
            data: json!({"k": 1}),
            badge: Some(3),
            alert: Some(json!({"title": "Hi", "body": "hello"})),
            sound: Some("default".into()),
        });
        let event = normalize(raw, AppState::Active, None);
        assert!(event.foreground);
        assert_eq!(event.user_interaction, Some(false));
        assert_eq!(event.message.as_deref(), Some("hello"));
        assert_eq!(event.data, json!({"k": 1}));
        assert_eq!(event.badge, Some(3));
        assert_eq!(event.alert, Some(json!({"title": "Hi", "body": "hello"})));
        assert_eq!(event.sound.as_deref(), Some("default"));
        assert!(event.extras.is_empty());
    }

    #[test]
    fn ios_background_delivery_reports_user_interaction() {
        let raw = RawNotification::Ios(IosNotification {
            foreground: Some(false),
            ..Default::default()
        });
        let event = normalize(raw, AppState::Active, None);
        assert!(!event.foreground);
        assert_eq!(event.user_interaction, Some(true));
    }

    #[test]
    fn json_data_string_is_parsed() {
        let event = normalize(
            android(json!({"data": "{\"a\":1}"})),
            AppState::Active,
            None,
        );
        assert_eq!(event.data, json!({"a": 1}));
    }

    #[test]
    fn unparseable_data_string_is_kept_raw() {
        let event = normalize(android(json!({"data": "not-json"})), AppState::Active, None);
        assert_eq!(event.data, json!("not-json"));
    }

    #[test]
    fn structured_data_passes_through_unparsed() {
        let event = normalize(
            android(json!({"data": {"already": "structured"}})),
            AppState::Active,
            None,
        );
        assert_eq!(event.data, json!({"already": "structured"}));
    }

    #[test]
    fn missing_data_normalizes_to_null() {
        let event = normalize(android(json!({})), AppState::Active, None);
        assert_eq!(event.data, Value::Null);
    }

    #[test]
    fn well_known_bundle_keys_are_lifted() {
        let event = normalize(
            android(json!({
                "title": "Update",
                "message": "hello",
                "sound": "chime",
                "badge": 7,
                "alert": "plain text",
                "userInteraction": true,
                "collapseKey": "u-1"
            })),
            AppState::Active,
            None,
        );
        assert_eq!(event.title.as_deref(), Some("Update"));
        assert_eq!(event.message.as_deref(), Some("hello"));
        assert_eq!(event.sound.as_deref(), Some("chime"));
        assert_eq!(event.badge, Some(7));
        assert_eq!(event.alert, Some(json!("plain text")));
        assert_eq!(event.user_interaction, Some(true));
        assert_eq!(event.extras.get("collapseKey"), Some(&json!("u-1")));
        assert_eq!(event.extras.len(), 1);
    }

    #[test]
    fn wrongly_typed_bundle_keys_stay_in_extras() {
        let event = normalize(
            android(json!({
                "title": 42,
                "badge": "seven",
                "userInteraction": "yes"
            })),
            AppState::Active,
            None,
        );
        assert_eq!(event.title, None);
        assert_eq!(event.badge, None);
        assert_eq!(event.user_interaction, None);
        assert_eq!(event.extras.get("title"), Some(&json!(42)));
        assert_eq!(event.extras.get("badge"), Some(&json!("seven")));
        assert_eq!(event.extras.get("userInteraction"), Some(&json!("yes")));
    }

    #[test]
    fn oversized_badge_stays_in_extras() {
        let event = normalize(
            android(json!({"badge": u64::from(u32::MAX) + 1})),
            AppState::Active,
            None,
        );
        assert_eq!(event.badge, None);
        assert!(event.extras.contains_key("badge"));
    }
}
