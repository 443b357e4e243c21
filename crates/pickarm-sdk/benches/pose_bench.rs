//! 位姿与自动流程性能基准测试
//!
//! 每个 tick 都会重新计算位姿链和反馈，这里验证单次计算与完整取放流程的开销。

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pickarm_kinematics::{Deg, JointVector, KinematicChain, SafetyGate};
use pickarm_sdk::prelude::*;

fn bench_compute_pose(c: &mut Criterion) {
    let chain = KinematicChain::default();
    let joints = JointVector::from_degrees([-120.0, 30.0, 105.0, 90.0]);

    c.bench_function("compute_pose", |b| {
        b.iter(|| chain.compute_pose(black_box(&joints)))
    });
}

fn bench_safety_check(c: &mut Criterion) {
    let gate = SafetyGate::default();

    c.bench_function("safety_check", |b| {
        b.iter(|| gate.is_safe(black_box(Deg(35.0)), black_box(Deg(95.0))))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let arm = ArmController::new(ArmConfig::default()).unwrap();

    c.bench_function("snapshot", |b| b.iter(|| black_box(arm.snapshot())));
}

fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("automation");
    group.sample_size(20);

    group.bench_function("full_pick_and_place", |b| {
        b.iter(|| {
            let mut arm = ArmController::new(ArmConfig::default()).unwrap();
            arm.request_automation_toggle();
            while arm.tick().automation.active {}
            black_box(arm.status())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_pose,
    bench_safety_check,
    bench_snapshot,
    bench_full_cycle
);
criterion_main!(benches);
