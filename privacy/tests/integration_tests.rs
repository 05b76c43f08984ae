//! End-to-end tests wiring the profile ledger and the privacy endorser the way
//! a deployment does: one shared ledger, one endorser trusted by it, both
//! with their own verification caches and config ids.

use skillrep_crypto::{derive_address, skill_id};
use skillrep_ledger::{
    EndorsementChannel, LedgerConfig, LedgerError, LedgerEvent, ProfileLedger, SharedLedger,
};
use skillrep_privacy::{PrivacyEndorser, PrivacyEndorserConfig, PrivacyError};
use skillrep_types::{Address, ConfigId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const CONFIG_ID: &str = "0x7b6436b0c98f62380866d9432c2af0ee08ce16a171bda6951aecd95ee1307d61";

fn addr(s: &str) -> Address {
    derive_address(s.as_bytes())
}

fn owner() -> Address {
    addr("owner")
}

struct System {
    ledger: SharedLedger,
    endorser: PrivacyEndorser<SharedLedger>,
}

fn deploy() -> System {
    let config_id: ConfigId = CONFIG_ID.parse().unwrap();
    let delegate = addr("privacy-endorser");

    let mut ledger = ProfileLedger::new(LedgerConfig::new(owner(), addr("hub")));
    ledger.set_privacy_endorser(&owner(), delegate).unwrap();
    ledger.set_config_id(&owner(), config_id).unwrap();
    for user in ["user1", "user2"] {
        ledger.verify(&owner(), addr(user)).unwrap();
    }
    let ledger = SharedLedger::new(ledger);

    let mut endorser = PrivacyEndorser::new(
        PrivacyEndorserConfig {
            address: delegate,
            admin: owner(),
            hub: addr("hub"),
        },
        ledger.clone(),
    );
    endorser.set_config_id(&owner(), config_id).unwrap();

    System { ledger, endorser }
}

// ---------------------------------------------------------------------------
// 1. Deployment wiring
// ---------------------------------------------------------------------------

#[test]
fn both_components_carry_the_config_id() {
    let system = deploy();
    let expected: ConfigId = CONFIG_ID.parse().unwrap();
    let ledger = system.ledger.lock().unwrap();
    assert_eq!(ledger.config_id_for(&[0; 32], &[0; 32], &[]), expected);
    assert_eq!(system.endorser.config_id(), expected);
    assert_eq!(ledger.privacy_endorser(), Some(system.endorser.address()));
}

// ---------------------------------------------------------------------------
// 2. Privacy channel drives expert status
// ---------------------------------------------------------------------------

#[test]
fn hundred_private_endorsements_make_an_expert() {
    let mut system = deploy();
    let user2 = addr("user2");
    let skill = skill_id("Solidity");
    system
        .ledger
        .with(|l| l.set_skill(&user2, &user2, 0, "Solidity"))
        .unwrap()
        .unwrap();

    for i in 0..100 {
        let voter = addr(&format!("anon-{i}"));
        system.endorser.verify(&owner(), voter).unwrap();
        system
            .endorser
            .endorse_skill_privately(&voter, &user2, &skill)
            .unwrap();
    }

    let ledger = system.ledger.lock().unwrap();
    let slot = &ledger.get_skills(&user2).unwrap()[0];
    assert_eq!(slot.total_endorsements, 100);
    assert_eq!(slot.expert_endorsements, 0);
    assert!(slot.is_expert);
    // None of the anonymous endorsers is known to the ledger.
    assert!(!ledger.is_verified(&addr("anon-0")));
}

#[test]
fn private_and_regular_channels_are_parallel_tracks() {
    let mut system = deploy();
    let (user1, user2) = (addr("user1"), addr("user2"));
    let skill = skill_id("Rust");
    system
        .ledger
        .with(|l| l.set_skill(&user2, &user2, 0, "Rust"))
        .unwrap()
        .unwrap();

    // user1 endorses in the open, and again through the private channel.
    system
        .ledger
        .with(|l| l.endorse_skill(&user1, &user2, &skill))
        .unwrap()
        .unwrap();
    system.endorser.verify(&owner(), user1).unwrap();
    system
        .endorser
        .endorse_skill_privately(&user1, &user2, &skill)
        .unwrap();

    assert!(matches!(
        system.endorser.endorse_skill_privately(&user1, &user2, &skill),
        Err(PrivacyError::AlreadyEndorsed { .. })
    ));
    assert!(matches!(
        system.ledger.with(|l| l.endorse_skill(&user1, &user2, &skill)).unwrap(),
        Err(LedgerError::AlreadyEndorsed { .. })
    ));

    let mut ledger = system.ledger.lock().unwrap();
    assert_eq!(ledger.get_skills(&user2).unwrap()[0].total_endorsements, 2);

    let channels: Vec<_> = ledger
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            LedgerEvent::SkillEndorsed { channel, endorser, .. } => Some((channel, endorser)),
            _ => None,
        })
        .collect();
    assert_eq!(
        channels,
        vec![
            (EndorsementChannel::Regular, Some(user1)),
            (EndorsementChannel::Private, None),
        ]
    );
}

// ---------------------------------------------------------------------------
// 3. Direct calls to the private entry point
// ---------------------------------------------------------------------------

#[test]
fn nobody_but_the_endorser_may_use_the_private_entry_point() {
    let system = deploy();
    let user2 = addr("user2");
    let mut ledger = system.ledger.lock().unwrap();
    ledger.set_skill(&user2, &user2, 0, "Rust").unwrap();

    for caller in [owner(), addr("user1"), addr("user2"), addr("hub")] {
        assert_eq!(
            ledger.endorse_skill_privately(&caller, &user2, &skill_id("Rust")),
            Err(LedgerError::UnauthorizedEndorser(caller))
        );
    }
    assert_eq!(ledger.get_skills(&user2).unwrap()[0].total_endorsements, 0);
}

// ---------------------------------------------------------------------------
// 4. Expert endorsement after earning expertise
// ---------------------------------------------------------------------------

#[test]
fn expert_endorsement_unlocks_at_threshold() {
    let system = deploy();
    let (user1, user2) = (addr("user1"), addr("user2"));
    let skill = skill_id("TypeScript");
    let mut ledger = system.ledger.lock().unwrap();
    ledger.set_skill(&user1, &user1, 2, "TypeScript").unwrap();
    ledger.set_skill(&user2, &user2, 0, "TypeScript").unwrap();

    assert!(matches!(
        ledger.expert_endorse_skill(&user1, &user2, &skill),
        Err(LedgerError::NotExpert { .. })
    ));

    for i in 0..100 {
        let fan = addr(&format!("fan-{i}"));
        ledger.verify(&owner(), fan).unwrap();
        ledger.endorse_skill(&fan, &user1, &skill).unwrap();
    }
    assert!(ledger.get_skills(&user1).unwrap()[2].is_expert);

    ledger.expert_endorse_skill(&user1, &user2, &skill).unwrap();
    let slot = &ledger.get_skills(&user2).unwrap()[0];
    assert_eq!((slot.total_endorsements, slot.expert_endorsements), (1, 1));
}

// ---------------------------------------------------------------------------
// 5. Snapshot survives a restart, endorser state alongside
// ---------------------------------------------------------------------------

#[test]
fn restart_preserves_both_dedup_tracks() {
    let mut system = deploy();
    let (user1, user2) = (addr("user1"), addr("user2"));
    let skill = skill_id("Rust");
    system
        .ledger
        .with(|l| {
            l.set_skill(&user2, &user2, 0, "Rust")?;
            l.endorse_skill(&user1, &user2, &skill)
        })
        .unwrap()
        .unwrap();
    system.endorser.verify(&owner(), user1).unwrap();
    system
        .endorser
        .endorse_skill_privately(&user1, &user2, &skill)
        .unwrap();

    let bytes = system.ledger.lock().unwrap().snapshot().to_bytes().unwrap();
    let endorser_config = system.endorser.config();
    let endorser_state = system.endorser.state().clone();

    let snapshot = skillrep_ledger::LedgerSnapshot::from_bytes(&bytes).unwrap();
    let ledger = SharedLedger::new(ProfileLedger::restore(snapshot).unwrap());
    let mut endorser = PrivacyEndorser::with_state(endorser_config, endorser_state, ledger.clone());

    assert!(matches!(
        endorser.endorse_skill_privately(&user1, &user2, &skill),
        Err(PrivacyError::AlreadyEndorsed { .. })
    ));
    let guard = ledger.lock().unwrap();
    assert_eq!(guard.get_skills(&user2).unwrap()[0].total_endorsements, 2);
    assert_eq!(guard.privacy_endorser(), Some(endorser.address()));
}
