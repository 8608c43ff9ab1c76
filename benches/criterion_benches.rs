use criterion::{criterion_group, criterion_main, Criterion};

use sokoban_planner::config::Method;
use sokoban_planner::solver::CancelToken;
use sokoban_planner::{LoadLevel, Solve};

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_two_crates_bfs(c: &mut Criterion) {
    bench_level(c, Method::Bfs, "levels/custom/03-two-crates.txt", 50);
}

#[allow(unused)]
fn bench_two_crates_hill_climbing(c: &mut Criterion) {
    bench_level(c, Method::HillClimbing, "levels/custom/03-two-crates.txt", 50);
}

#[allow(unused)]
fn bench_two_crates_hybrid(c: &mut Criterion) {
    bench_level(c, Method::HybridHeuristic, "levels/custom/03-two-crates.txt", 50);
}

#[allow(unused)]
fn bench_no_solution(c: &mut Criterion) {
    // exhausts the whole state space
    bench_level(c, Method::Bfs, "levels/custom/no-solution.txt", 100);
}

fn bench_level(c: &mut Criterion, method: Method, level_path: &str, samples: usize) {
    let level = level_path.load_level().unwrap();
    let cancel = CancelToken::new();

    let mut group = c.benchmark_group(method.to_string());
    group.sample_size(samples);
    group.bench_function(level_path, |b| {
        b.iter(|| criterion::black_box(level.solve(criterion::black_box(method), &cancel)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_two_crates_bfs,
    bench_two_crates_hill_climbing,
    bench_two_crates_hybrid,
    //bench_no_solution,
);
criterion_main!(benches);
