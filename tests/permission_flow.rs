//! Permission flow tests over the in-process bridge

use unipush::application::{ConfigureOptions, Notifications};
use unipush::domain::{PermissionPreferences, PermissionStatus, Platform};
use unipush::infrastructure::{InProcessBridge, SharedAppState};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn prompt_platform_grant_is_capped_by_preferences() {
    init_logging();
    let bridge = InProcessBridge::new(Platform::Ios);
    let facade = Notifications::new(bridge.clone(), SharedAppState::default());

    facade
        .configure(ConfigureOptions {
            permissions: Some(PermissionPreferences {
                alert: true,
                badge: false,
                sound: true,
            }),
            request_permissions: false,
            pop_initial_notification: false,
            ..Default::default()
        })
        .await
        .unwrap();

    let granted = facade.request_permissions().await.unwrap().unwrap();
    assert!(granted.alert);
    assert!(!granted.badge);
    assert!(granted.sound);
}

#[tokio::test]
async fn configure_registers_the_sender_in_the_background() {
    init_logging();
    let bridge = InProcessBridge::new(Platform::Android);
    let facade = Notifications::new(bridge.clone(), SharedAppState::default());

    facade
        .configure(ConfigureOptions {
            sender_id: Some("sender-99".into()),
            pop_initial_notification: false,
            ..Default::default()
        })
        .await
        .unwrap();
    settle().await;

    assert_eq!(bridge.registered_sender().as_deref(), Some("sender-99"));
}

#[tokio::test]
async fn request_without_a_sender_id_is_a_quiet_noop() {
    init_logging();
    let bridge = InProcessBridge::new(Platform::Android);
    let facade = Notifications::new(bridge.clone(), SharedAppState::default());

    assert_eq!(facade.request_permissions().await.unwrap(), None);
    assert_eq!(bridge.registered_sender(), None);
}

#[tokio::test]
async fn abandoning_revokes_the_granted_set() {
    init_logging();
    let bridge = InProcessBridge::new(Platform::Ios);
    let facade = Notifications::new(bridge.clone(), SharedAppState::default());

    let before = facade.check_permissions().await.unwrap().unwrap();
    assert!(before.any_granted());

    assert_eq!(facade.abandon_permissions().unwrap(), Some(()));
    assert!(bridge.was_abandoned());

    let after = facade.check_permissions().await.unwrap().unwrap();
    assert_eq!(after, PermissionStatus::default());
}

#[tokio::test]
async fn sender_registration_survives_until_abandoned() {
    init_logging();
    let bridge = InProcessBridge::new(Platform::Android);
    let facade = Notifications::new(bridge.clone(), SharedAppState::default());

    facade
        .configure(ConfigureOptions {
            sender_id: Some("sender-7".into()),
            pop_initial_notification: false,
            ..Default::default()
        })
        .await
        .unwrap();
    settle().await;
    assert_eq!(bridge.registered_sender().as_deref(), Some("sender-7"));

    facade.abandon_permissions().unwrap();
    assert_eq!(bridge.registered_sender(), None);
    assert!(bridge.was_abandoned());
}
