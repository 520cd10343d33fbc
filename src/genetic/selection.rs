//! Tournament selection: single-elimination among `t` randomly sampled
//! contenders, each match won by the better individual with probability
//! `p_better`, else the worse one.

use rand::seq::index::sample;
use rand::Rng;

use super::population::Population;

pub fn tournament(population: &Population, t: usize, p_better: f64, rng: &mut impl Rng) -> usize {
    let size = population.len();
    let t = t.clamp(1, size);
    let mut contenders: Vec<usize> = sample(rng, size, t).into_iter().collect();

    while contenders.len() > 1 {
        let mut next_round = Vec::with_capacity(contenders.len().div_ceil(2));
        for pair in contenders.chunks(2) {
            if pair.len() == 1 {
                next_round.push(pair[0]);
                continue;
            }
            let (x, y) = (pair[0], pair[1]);
            let fx = population.individual(x).fitness();
            let fy = population.individual(y).fitness();
            let (better, worse) = if fx >= fy { (x, y) } else { (y, x) };
            let winner = if rng.gen_bool(p_better) { better } else { worse };
            next_round.push(winner);
        }
        contenders = next_round;
    }
    contenders[0]
}
