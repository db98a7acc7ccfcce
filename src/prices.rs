//! Price sources for the demo driver.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::BufRead;

/// Read one price per line. Blank lines and `#` comments are skipped; the
/// first column of comma-separated input is used. Non-finite values are passed
/// through so the engine can reject them.
pub fn read_prices(reader: impl BufRead) -> anyhow::Result<Vec<f64>> {
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read line {}", idx + 1))?;
        let field = line.split(',').next().unwrap_or("").trim();
        if field.is_empty() || field.starts_with('#') {
            continue;
        }
        let price: f64 = field
            .parse()
            .with_context(|| format!("line {}: not a price: {field:?}", idx + 1))?;
        out.push(price);
    }
    Ok(out)
}

/// Multiplicative random walk, reproducible for a given seed.
pub fn synthetic_walk(start: f64, steps: usize, max_step_pct: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = start;
    (0..steps)
        .map(|_| {
            price *= 1.0 + rng.gen_range(-max_step_pct..=max_step_pct);
            price
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn skips_blank_lines_and_comments() {
        let input = "# close\n101.5\n\n  99.25 \n100,2016-01-04\n";
        let prices = read_prices(input.as_bytes()).unwrap();
        assert_eq!(prices, vec![101.5, 99.25, 100.0]);
    }

    #[test]
    fn reports_the_offending_line() {
        let err = read_prices("1.0\nabc\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn nan_is_passed_through() {
        let prices = read_prices("NaN\n".as_bytes()).unwrap();
        assert!(prices[0].is_nan());
    }

    #[test]
    fn walk_is_seeded_and_positive() {
        let a = synthetic_walk(150.0, 200, 0.02, 7);
        let b = synthetic_walk(150.0, 200, 0.02, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 200);
        assert!(a.iter().all(|p| p.is_finite() && *p > 0.0));
    }
}
