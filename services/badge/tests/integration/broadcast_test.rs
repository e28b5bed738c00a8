use cackalacky_badge::domain::catalog;
use cackalacky_badge::domain::types::{ActionStatus, FACT_CHANNEL};
use cackalacky_badge::usecase::ctf_action::{CtfActionInput, CtfActionUseCase};

use crate::helpers::{
    MockBroadcastGate, MockEventRepo, MockFactSource, MockPublisher, MockStaffRepo, MockUnlockRepo,
    MockUserRepo, test_staff, test_user,
};

fn input(achievement: &'static catalog::Achievement) -> CtfActionInput {
    let user = test_user();
    CtfActionInput {
        device_id: Some(user.device_id),
        device_mac: Some(user.device_mac),
        event_type_id: 17,
        achievement,
    }
}

#[tokio::test]
async fn should_broadcast_fact_at_most_once_per_window() {
    let publisher = MockPublisher::default();
    let uc = CtfActionUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        events: MockEventRepo::default(),
        unlocks: MockUnlockRepo::default(),
        staff: MockStaffRepo {
            member: Some(test_staff()),
        },
        facts: MockFactSource {
            text: Some("Honey never spoils.".to_owned()),
        },
        gate: MockBroadcastGate::default(),
        publisher: publisher.clone(),
    };

    // two resolved actions inside the same window
    uc.execute(input(&catalog::HELLO_WORLD)).await.unwrap();
    uc.execute(input(&catalog::SERIAL_PORT_INTERACTION))
        .await
        .unwrap();

    let facts = publisher.on_channel(FACT_CHANNEL);
    assert_eq!(facts.len(), 1, "window admits a single broadcast");
    let payload: serde_json::Value = serde_json::from_str(&facts[0]).unwrap();
    assert_eq!(payload["fact"], "Honey never spoils.");
    assert_eq!(payload["discord_handle"], "staffer#0007");
    assert_eq!(payload["discord_user_id"], "200000000000000007");
}

#[tokio::test]
async fn should_skip_broadcast_when_no_staff_configured() {
    let publisher = MockPublisher::default();
    let uc = CtfActionUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        events: MockEventRepo::default(),
        unlocks: MockUnlockRepo::default(),
        staff: MockStaffRepo { member: None },
        facts: MockFactSource {
            text: Some("Honey never spoils.".to_owned()),
        },
        gate: MockBroadcastGate::default(),
        publisher: publisher.clone(),
    };

    let outcome = uc.execute(input(&catalog::HELLO_WORLD)).await.unwrap();

    assert_eq!(outcome.status, ActionStatus::Success);
    assert!(publisher.on_channel(FACT_CHANNEL).is_empty());
}

#[tokio::test]
async fn should_not_fail_action_when_fact_source_is_down() {
    let publisher = MockPublisher::default();
    let gate = MockBroadcastGate::default();
    let uc = CtfActionUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        events: MockEventRepo::default(),
        unlocks: MockUnlockRepo::default(),
        staff: MockStaffRepo {
            member: Some(test_staff()),
        },
        facts: MockFactSource { text: None },
        gate: gate.clone(),
        publisher: publisher.clone(),
    };

    let outcome = uc.execute(input(&catalog::HELLO_WORLD)).await.unwrap();

    assert_eq!(outcome.status, ActionStatus::Success, "unlock must survive");
    assert!(publisher.on_channel(FACT_CHANNEL).is_empty());
    assert!(
        gate.held.lock().unwrap().is_empty(),
        "a failed fetch must not burn the broadcast window"
    );
}

#[tokio::test]
async fn should_broadcast_after_failed_fetch_did_not_burn_window() {
    let publisher = MockPublisher::default();
    let gate = MockBroadcastGate::default();
    let broken = CtfActionUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        events: MockEventRepo::default(),
        unlocks: MockUnlockRepo::default(),
        staff: MockStaffRepo {
            member: Some(test_staff()),
        },
        facts: MockFactSource { text: None },
        gate: gate.clone(),
        publisher: publisher.clone(),
    };
    let healthy = CtfActionUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        events: MockEventRepo::default(),
        unlocks: MockUnlockRepo::default(),
        staff: MockStaffRepo {
            member: Some(test_staff()),
        },
        facts: MockFactSource {
            text: Some("Bananas are berries.".to_owned()),
        },
        gate,
        publisher: publisher.clone(),
    };

    broken.execute(input(&catalog::HELLO_WORLD)).await.unwrap();
    healthy
        .execute(input(&catalog::SERIAL_PORT_INTERACTION))
        .await
        .unwrap();

    assert_eq!(publisher.on_channel(FACT_CHANNEL).len(), 1);
}
