//! Benchmarks for event stepping and record construction

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hadro_core::pdg::pid;
use hadro_core::Kinematics;
use hadro_session::GeneratorSession;
use hadro_testkit::Minijet;

fn ready_session() -> GeneratorSession<Minijet> {
    let mut s = GeneratorSession::new(Minijet::new());
    s.configure(Kinematics::center_of_mass(10.0, pid::PROTON, pid::PROTON))
        .unwrap();
    s.initialize(Some(1)).unwrap();
    s
}

fn bench_step(c: &mut Criterion) {
    let mut session = ready_session();

    c.bench_function("session_step", |b| {
        b.iter(|| black_box(session.step().unwrap().len()))
    });
}

fn bench_final_state_selection(c: &mut Criterion) {
    let mut session = ready_session();

    c.bench_function("final_state_selection", |b| {
        b.iter(|| {
            let mut ev = session.step().unwrap();
            ev.select_final_state_charged();
            black_box(ev.len())
        })
    });
}

criterion_group!(benches, bench_step, bench_final_state_selection);
criterion_main!(benches);
