//! Seeded random player pools.

use courtside_core::{PlayerPool, PlayerRecord};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const TEAMS: [&str; 4] = ["BOS", "DEN", "NYK", "OKC"];

/// Generates a pool of `size` players drawn from `positions`.
///
/// Each player gets one or two positions, a salary between $3,000 and
/// $11,000 in $100 steps and a projection loosely tied to salary. The same
/// seed always produces the same pool.
///
/// # Example
///
/// ```
/// use courtside_test::random::random_pool;
///
/// let a = random_pool(7, 10, &["PG", "SG", "C"]);
/// let b = random_pool(7, 10, &["PG", "SG", "C"]);
/// assert_eq!(a.players(), b.players());
/// ```
pub fn random_pool(seed: u64, size: usize, positions: &[&str]) -> PlayerPool {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let records = (0..size)
        .map(|i| {
            let first = positions[rng.random_range(0..positions.len())];
            let mut eligible = vec![first];
            if rng.random_bool(0.3) {
                let second = positions[rng.random_range(0..positions.len())];
                if second != first {
                    eligible.push(second);
                }
            }
            let salary = i64::from(rng.random_range(30..=110u32)) * 100;
            let projection = salary as f64 / 200.0 + rng.random_range(-8.0..8.0);
            // Quarter points keep projections exact in milli-points.
            let projection = (projection.max(0.0) * 4.0).round() / 4.0;
            PlayerRecord::new(
                format!("p{:02}", i),
                format!("Player {}", i),
                TEAMS[rng.random_range(0..TEAMS.len())],
                &eligible,
                salary,
                projection,
            )
        })
        .collect();
    crate::fixtures::pool_of(records)
}
