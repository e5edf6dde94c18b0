use doll_animation_core::{
    parse_stored_library_json, LibraryError, Part, PlaybackMode, PoseRead, Registry,
    StoredLibrarySource,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn ticks(action: &doll_animation_core::Action) -> Vec<u32> {
    action.timeline().keyframes().iter().map(|k| k.tick).collect()
}

#[test]
fn parses_basic_fixture_poses() {
    let json = doll_test_fixtures::libraries::json("basic-dolls").expect("load basic-dolls fixture");
    let lib = parse_stored_library_json(&json).expect("parse basic-dolls");
    assert_eq!(lib.poses.len(), 5);
    assert_eq!(lib.actions.len(), 3);

    let wave_up = &lib.poses["wave_up"];
    approx(wave_up.rotation(Part::RightArm)[0], -1.5708, 1e-6);
    assert_eq!(wave_up.rotation(Part::LeftArm), [0.0, 0.0, 0.0]);
    assert_eq!(wave_up.label(), "Wave (arm up)");

    // Unspecified parts read as identity transforms.
    assert_eq!(wave_up.part_scale(Part::Head), [1.0, 1.0, 1.0]);
    assert_eq!(wave_up.part_position(Part::Body), [0.0, 0.0, 0.0]);
    assert_eq!(wave_up.scale(), [1.0, 1.0, 1.0]);

    let giant = &lib.poses["giant"];
    assert_eq!(giant.scale(), [2.0, 2.0, 2.0]);
    assert_eq!(giant.part_scale(Part::Head), [1.5, 1.5, 1.5]);
    // A part given only a scale keeps zero rotation.
    assert_eq!(giant.rotation(Part::Head), [0.0, 0.0, 0.0]);

    let sit = &lib.poses["sit"];
    approx(sit.position()[1], -0.6, 1e-6);

    // No display name: the label is the name.
    assert_eq!(lib.poses["bow"].label(), "bow");
}

#[test]
fn parses_basic_fixture_actions() {
    let json = doll_test_fixtures::libraries::json("basic-dolls").expect("load basic-dolls fixture");
    let lib = parse_stored_library_json(&json).expect("parse basic-dolls");

    let wave = &lib.actions["wave"];
    assert_eq!(wave.mode(), PlaybackMode::Once);
    assert_eq!(ticks(wave), vec![0, 5, 10]);
    assert_eq!(wave.duration(), 10);
    assert_eq!(wave.label(), "Wave");

    let bob = &lib.actions["bob"];
    assert_eq!(bob.mode(), PlaybackMode::Loop);
    assert_eq!(bob.duration(), 8);
    assert_eq!(bob.display_name(), None);

    let seat = &lib.actions["take_a_seat"];
    assert_eq!(seat.mode(), PlaybackMode::Hold);
    assert_eq!(ticks(seat), vec![10, 18]);
    assert_eq!(seat.timeline().first_keyframe_duration(), 10);

    // Keyframes share the library's pose allocations.
    let first = &wave.timeline().keyframes()[1].pose;
    assert!(first.same_as(&lib.poses["wave_up"]));
}

#[test]
fn unknown_pose_reference_is_an_error() {
    let json = doll_test_fixtures::libraries::json("broken-reference")
        .expect("load broken-reference fixture");
    match parse_stored_library_json(&json) {
        Err(LibraryError::UnknownPose { action, pose }) => {
            assert_eq!(action, "reach");
            assert_eq!(pose, "reach_out");
        }
        other => panic!("expected UnknownPose, got {other:?}"),
    }
}

#[test]
fn later_duplicates_win() {
    let json = doll_test_fixtures::libraries::json("duplicate-names")
        .expect("load duplicate-names fixture");
    let lib = parse_stored_library_json(&json).expect("parse duplicate-names");
    assert_eq!(lib.poses.len(), 2);
    assert_eq!(lib.poses["sit"].label(), "New sit");
    assert_eq!(lib.actions.len(), 1);
    assert_eq!(lib.actions["settle"].mode(), PlaybackMode::Once);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = parse_stored_library_json("{ \"poses\": [ { \"name\": 3 } ] }").unwrap_err();
    assert!(matches!(err, LibraryError::Parse(_)), "{err}");
}

#[test]
fn missing_sections_default_to_empty() {
    let lib = parse_stored_library_json("{}").expect("parse empty library");
    assert!(lib.poses.is_empty());
    assert!(lib.actions.is_empty());
}

#[test]
fn source_feeds_registry_reload() {
    let json = doll_test_fixtures::libraries::json("basic-dolls").expect("load basic-dolls fixture");
    let registry = Registry::new();
    let mut source = StoredLibrarySource::new(json);
    registry.reload(&mut source).expect("reload from stored source");
    let snap = registry.snapshot();
    assert_eq!(
        snap.sorted_pose_names(),
        ["standing", "bow", "giant", "sit", "wave_up"]
    );
    assert_eq!(snap.action_names(), vec!["bob", "take_a_seat", "wave"]);
}
