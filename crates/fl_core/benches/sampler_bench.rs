use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fl_core::{generate, Player, PlayerPool, Position, PositionSet, Rules, SamplerConfig};

fn bench_pool(size: usize) -> PlayerPool {
    let singles = [Position::PG, Position::SG, Position::SF, Position::PF, Position::C];
    let teams = ["BOS", "DEN", "LAL", "MIA", "PHX", "GSW", "NYK", "DAL"];
    let players = (0..size)
        .map(|i| {
            let mut positions = PositionSet::empty().with(singles[i % singles.len()]);
            if i % 4 == 0 {
                positions.insert(singles[(i + 2) % singles.len()]);
            }
            Player {
                id: format!("p{}", i),
                name: String::new(),
                salary: 3500 + ((i * 613) % 6000) as u32,
                positions,
                team: teams[i % teams.len()].to_string(),
                projection: 15.0 + (i % 30) as f64,
                ownership: 0.02 + 0.01 * (i % 30) as f64,
                active: true,
                injury_status: None,
            }
        })
        .collect();
    PlayerPool::new(players).expect("bench pool")
}

fn sampler_benchmark(c: &mut Criterion) {
    let pool = bench_pool(60);
    let rules = Rules::nba_classic();

    c.bench_function("generate_50_lineups_60_pool", |b| {
        b.iter(|| {
            let mut config = SamplerConfig::new(50, 1234);
            config.max_attempts_multiplier = 2_000;
            let batch = generate(black_box(&pool), black_box(&rules), config).expect("config ok");
            black_box(batch.lineups.len())
        })
    });
}

criterion_group!(benches, sampler_benchmark);
criterion_main!(benches);
