use std::sync::Arc;

use doll_animation_core::{
    decode_index, encode_index, parse_stored_library_json, AnimationState, Animator, PoseLibrary,
    PoseRead, Registry, Selection,
};

fn basic_registry() -> Arc<Registry> {
    let json = doll_test_fixtures::libraries::json("basic-dolls").expect("load basic-dolls fixture");
    let library = parse_stored_library_json(&json).expect("parse basic-dolls");
    Arc::new(Registry::with_library(library))
}

/// it should map the default sentinel to byte 255 and back
#[test]
fn default_round_trips_through_255() {
    assert_eq!(encode_index(-1), 255);
    assert_eq!(decode_index(255), -1);
    assert_eq!(Selection::Default.encode(), 255);
    assert_eq!(Selection::decode(255), Selection::Default);
    assert_eq!(Selection::decode(0), Selection::Index(0));
    assert_eq!(Selection::Index(254).encode(), 254);
}

/// it should reject indices the byte cannot carry
#[test]
fn oversized_index_is_not_encodable() {
    assert_eq!(Selection::try_from_index(254), Some(Selection::Index(254)));
    assert_eq!(Selection::try_from_index(255), None);
    assert_eq!(Selection::try_from_index(-1), Some(Selection::Default));
}

/// it should let an observer with the same registry mirror the authority from the byte alone
#[test]
fn observer_mirrors_authority() {
    // Separate registries with identical content, as on two machines.
    let mut authority = Animator::new(basic_registry());
    let mut observer = Animator::new(basic_registry());

    for _ in 0..7 {
        authority.cycle();
        observer.apply_sync_byte(authority.sync_byte());
        observer.tick();
        assert_eq!(observer.selection(), authority.selection());
        assert_eq!(observer.pose().name(), authority.pose().name());
        assert_eq!(observer.state(), authority.state());
    }
}

/// it should revert to Default when the replicated index does not exist locally
#[test]
fn stale_index_reverts_to_default() {
    let authority_registry = basic_registry();
    let mut authority = Animator::new(authority_registry);
    authority.set_pose_by_name("wave_up");
    let byte = authority.sync_byte();
    assert_eq!(byte, 4);

    let mut short = PoseLibrary::new();
    short.insert_pose(doll_animation_core::PoseData::new("standing"));
    short.insert_pose(doll_animation_core::PoseData::new("bow"));
    let mut observer = Animator::new(Arc::new(Registry::with_library(short)));
    observer.apply_sync_byte(byte);
    assert_eq!(observer.selection(), Selection::Default);
    assert_eq!(observer.state(), AnimationState::Default);
    assert_eq!(observer.sync_byte(), 255);
}

/// it should only re-resolve when the replicated byte changes
#[test]
fn unchanged_byte_is_ignored() {
    let mut observer = Animator::new(basic_registry());
    observer.apply_sync_byte(1);
    assert_eq!(observer.pose().name(), "bow");

    // A local action survives repeated delivery of the same byte.
    assert!(observer.set_action_by_name("bob"));
    observer.apply_sync_byte(1);
    observer.tick();
    assert_eq!(observer.state(), AnimationState::Playing);

    observer.apply_sync_byte(255);
    assert_eq!(observer.state(), AnimationState::Default);
    assert!(observer.action().is_none());
}
