//! End-to-end: "standing" + "wave_up" poses and a ONCE "wave" action.

use std::sync::Arc;

use doll_animation_core::{
    Action, AnimationEvent, AnimationState, Animator, AuthoredKeyframe, Part, PlaybackMode, Pose,
    PoseData, PoseLibrary, PoseRead, Registry,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

struct Scene {
    standing: Pose,
    wave_up: Pose,
    wave: Action,
}

fn scene() -> Scene {
    let standing = PoseData::new("standing").into_pose();
    let wave_up = PoseData::new("wave_up")
        .with_rotation(Part::RightArm, [-1.5708, 0.0, 0.0])
        .into_pose();
    let wave = Action::new(
        "wave",
        PlaybackMode::Once,
        &[
            AuthoredKeyframe::new(0, standing.clone()),
            AuthoredKeyframe::new(5, wave_up.clone()),
            AuthoredKeyframe::new(5, standing.clone()),
        ],
    );
    Scene {
        standing,
        wave_up,
        wave,
    }
}

#[test]
fn wave_compiles_to_expected_ticks() {
    let s = scene();
    let ticks: Vec<u32> = s.wave.timeline().keyframes().iter().map(|k| k.tick).collect();
    assert_eq!(ticks, vec![0, 5, 10]);
    assert_eq!(s.wave.duration(), 10);
}

#[test]
fn wave_samples() {
    let s = scene();
    assert!(s.wave.sample(0).expect("tick 0").same_as(&s.standing));
    assert!(s.wave.sample(5).expect("tick 5").same_as(&s.wave_up));

    let t7 = s.wave.sample(7).expect("tick 7");
    assert!(t7.is_blended());
    approx(t7.rotation(Part::RightArm)[0], -0.9425, 1e-4);
    assert_eq!(t7.rotation(Part::LeftArm), [0.0, 0.0, 0.0]);
}

#[test]
fn wave_plays_through_animator_and_rests_on_standing() {
    let s = scene();
    let library = PoseLibrary::new()
        .with_pose(s.standing.clone())
        .with_pose(s.wave_up.clone())
        .with_action(s.wave.clone());
    let mut animator = Animator::new(Arc::new(Registry::with_library(library)));
    assert!(animator.set_action_by_name("wave"));
    assert!(animator.pose().same_as(&s.standing));

    let mut finished_at = None;
    for step in 1..=20u32 {
        let event = animator.tick();
        match step {
            5 => assert!(animator.pose().same_as(&s.wave_up)),
            7 => approx(animator.pose().rotation(Part::RightArm)[0], -0.9425, 1e-4),
            _ => {}
        }
        if let Some(AnimationEvent::ActionFinished { .. }) = event {
            finished_at = Some(step);
        }
        if step >= 10 {
            assert!(animator.pose().same_as(&s.standing), "step={step}");
            assert_eq!(animator.state(), AnimationState::Default);
        }
    }
    assert_eq!(finished_at, Some(10));
}
