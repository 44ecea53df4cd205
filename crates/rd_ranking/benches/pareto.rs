use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use rand::Rng;

use rd_ranking::ScoredDesign;
use rd_ranking::Tolerances;
use rd_ranking::RankingStrategy;
use rd_ranking::rank_designs;

fn random_designs(n: usize) -> Vec<ScoredDesign> {
    let mut rng = rand::rng();
    (0..n).map(|i| ScoredDesign {
        sequence: format!("design_{}", i),
        structure: String::new(),
        cutsite_index: i,
        substrate_sequence_length: 12,
        desired_temperature_score: Some(rng.random_range(0.0..20.0)),
        highest_temperature_score: Some(rng.random_range(30.0..80.0)),
        specificity_score: Some(rng.random_range(0.0..5.0)),
        accessibility_score: Some(rng.random_range(-10.0..0.0)),
        structure_score: Some(rng.random_range(0.0..1.0)),
        malformation_score: Some(rng.random_range(0.0..1.0)),
        rank: None,
    }).collect()
}

pub fn pareto_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ranking");
    let designs = random_designs(500);
    let tolerances = Tolerances::uniform(0.1);

    group.bench_function("Pareto fronts", |b| {
        b.iter(|| {
            let mut work = designs.clone();
            let _ = rank_designs(&mut work, &tolerances, 1, RankingStrategy::Pareto);
        });
    });

    group.bench_function("Partial dominance", |b| {
        b.iter(|| {
            let mut work = designs.clone();
            let _ = rank_designs(&mut work, &tolerances, 1, RankingStrategy::PartialDominance);
        });
    });
}

criterion_group!(benches, pareto_ranking);
criterion_main!(benches);
