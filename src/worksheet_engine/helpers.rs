//! Shared integer and sampling helpers used by every problem type.
//!
//! Every problem type draws from the same pieces: pick a number in a range,
//! pick from a list, shuffle a pool, reduce by a common factor. These helpers
//! centralise that work so type files focus on the maths content only.
//!
//! ## RNG ordering
//!
//! Each helper consumes a fixed number of draws (`rand_int`, `pick` and `coin`
//! use exactly one; `shuffle` uses `len - 1`). Worksheet IDs depend on that:
//! reordering calls inside a type changes every worksheet of that type.
//!
//! None of these validate their inputs. `rand_int` with `max < min` returns
//! garbage; callers construct ranges so that never happens.

use rand::RngCore;

use crate::worksheet_engine::rng::unit_float;

/// Uniform integer in `min..=max`: `floor(r * (max - min + 1)) + min`.
pub fn rand_int<R: RngCore + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    (unit_float(rng) * (max - min + 1) as f64).floor() as i64 + min
}

/// Fair coin.
pub fn coin<R: RngCore + ?Sized>(rng: &mut R) -> bool {
    unit_float(rng) < 0.5
}

/// `n` or `-n` with equal odds.
pub fn random_sign<R: RngCore + ?Sized>(rng: &mut R, n: i64) -> i64 {
    if coin(rng) { -n } else { n }
}

/// Non-zero integer in `-limit..=limit`.
pub fn nonzero<R: RngCore + ?Sized>(rng: &mut R, limit: i64) -> i64 {
    let n = rand_int(rng, 1, limit);
    random_sign(rng, n)
}

/// Pick one element. `items` must not be empty.
pub fn pick<R: RngCore + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rand_int(rng, 0, items.len() as i64 - 1) as usize]
}

/// In-place Fisher-Yates shuffle drawing from the same stream.
pub fn shuffle<R: RngCore + ?Sized, T>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rand_int(rng, 0, i as i64) as usize;
        items.swap(i, j);
    }
}

/// `count` items taken from shuffled copies of `pool`, one copy after another.
///
/// Used by types whose whole question space is a small fixed list: every
/// block of `pool.len()` consecutive problems is a permutation, so a worksheet
/// never repeats a fact before the pool is exhausted.
pub fn shuffled_pool<R: RngCore + ?Sized, T: Clone>(rng: &mut R, pool: &[T], count: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(count);
    if pool.is_empty() {
        return out;
    }
    while out.len() < count {
        let mut copy = pool.to_vec();
        shuffle(rng, &mut copy);
        out.extend(copy);
    }
    out.truncate(count);
    out
}

/// Greatest common divisor; always non-negative.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Least common multiple; `lcm(0, x) == 0`.
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

/// Reduce `n/d` to lowest terms with a positive denominator.
pub fn reduce(n: i64, d: i64) -> (i64, i64) {
    let g = gcd(n, d).max(1);
    let (n, d) = (n / g, d / g);
    if d < 0 { (-n, -d) } else { (n, d) }
}

pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Split `n` into `(k, m)` with `n = k² · m` and `m` square-free.
pub fn square_free_split(n: i64) -> (i64, i64) {
    let mut outside = 1;
    let mut inside = n;
    let mut f = 2;
    while f * f <= inside {
        while inside % (f * f) == 0 {
            inside /= f * f;
            outside *= f;
        }
        f += 1;
    }
    (outside, inside)
}

/// Prime factors of `n` as `(prime, exponent)` pairs in ascending order.
pub fn prime_factors(mut n: i64) -> Vec<(i64, u32)> {
    let mut out = Vec::new();
    let mut p = 2;
    while p * p <= n {
        let mut e = 0;
        while n % p == 0 {
            n /= p;
            e += 1;
        }
        if e > 0 {
            out.push((p, e));
        }
        p += 1;
    }
    if n > 1 {
        out.push((n, 1));
    }
    out
}
