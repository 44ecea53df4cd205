use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use rand::Rng;

use rd_generation::Template;
use rd_generation::generate;

fn random_target(n: usize) -> String {
    let mut rng = rand::rng();
    (0..n).map(|_| ['A', 'C', 'G', 'U'][rng.random_range(0..4)]).collect()
}

pub fn candidate_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Generation");
    let target = random_target(2000);

    let hammerhead = Template::new(
        "CGUGGUUAGGGCCACGUUAAAUAGNNNNUUAAGCCCUAAGCGNNNNNN",
        "((((.[[[[[[.))))........0123.....]]]]]]...456789",
        "NNNNNNGUNNNN",
        "987654..3210",
    );
    group.bench_function("Fixed-length substrate", |b| {
        b.iter(|| generate(&hammerhead, &target).map(|c| c.count()));
    });

    let repeats = Template::new(
        "NNNNNNNCCUGAUGAGAACAAACCCNNNNNNNNCGUCGAAACNNnn",
        "01234567.......((........89abcdef..))...ghijkl",
        "nnNNGUCGNNNNNNNNNNNNNNN",
        "lkjihg.76543210fedcba98",
    );
    group.bench_function("Repeat regions", |b| {
        b.iter(|| generate(&repeats, &target).map(|c| c.count()));
    });

    let degenerate = Template::new("NNRYNNNN", "(((..)))", "N", ".");
    group.bench_function("Degenerate stem", |b| {
        b.iter(|| generate(&degenerate, "A").map(|c| c.count()));
    });
}

criterion_group!(benches, candidate_generation);
criterion_main!(benches);
