use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use doll_animation_core::{
    Action, Animator, AuthoredKeyframe, Part, PlaybackMode, PoseData, PoseLibrary, PoseRead,
    Registry,
};

fn registry() -> Arc<Registry> {
    let rest = PoseData::new("standing").into_pose();
    let reach = PoseData::new("reach")
        .with_rotation(Part::RightArm, [-1.2, 0.0, 0.3])
        .with_rotation(Part::LeftArm, [-1.2, 0.0, -0.3])
        .with_part_position(Part::Body, [0.0, 0.1, 0.0])
        .into_pose();
    let mut keyframes = Vec::new();
    for i in 0..16 {
        let pose = if i % 2 == 0 { rest.clone() } else { reach.clone() };
        keyframes.push(AuthoredKeyframe::new(if i == 0 { 0 } else { 6 }, pose));
    }
    let library = PoseLibrary::new()
        .with_pose(rest)
        .with_pose(reach)
        .with_action(Action::new("stretch", PlaybackMode::Loop, &keyframes));
    Arc::new(Registry::with_library(library))
}

fn bench_tick(c: &mut Criterion) {
    let registry = registry();
    let mut animators: Vec<Animator> = (0..256)
        .map(|_| {
            let mut a = Animator::new(registry.clone());
            a.set_action_by_name("stretch");
            a
        })
        .collect();

    c.bench_function("tick_256_looping_animators", |b| {
        b.iter(|| {
            for a in animators.iter_mut() {
                black_box(a.tick());
            }
        })
    });

    c.bench_function("read_blended_pose_all_parts", |b| {
        let pose = animators[0].pose().clone();
        b.iter(|| {
            let mut acc = 0.0f32;
            for part in Part::ALL {
                acc += pose.rotation(part)[0] + pose.part_position(part)[1];
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
