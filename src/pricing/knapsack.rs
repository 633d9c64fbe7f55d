use log::trace;

use crate::pricing::traits::{PricingColumn, PricingSubproblem};
use crate::{Error, Result};

/// Cutting-stock pricing: an unbounded knapsack over integer item widths.
///
/// A pattern is a count per item type whose total width fits the roll; its
/// reduced cost is `1 - Σ dual_i · count_i` because every roll costs one.
#[derive(Debug, Clone)]
pub struct KnapsackPricer {
    widths: Vec<usize>,
    capacity: usize,
}

impl KnapsackPricer {
    pub fn new(widths: Vec<usize>, capacity: usize) -> Result<Self> {
        if widths.is_empty() || widths.contains(&0) {
            return Err(Error::InvalidConfig(
                "knapsack widths must be non-empty and positive".to_string(),
            ));
        }
        Ok(KnapsackPricer { widths, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }
}

impl PricingSubproblem for KnapsackPricer {
    fn name(&self) -> &'static str {
        "Knapsack"
    }

    fn row_count(&self) -> usize {
        self.widths.len()
    }

    fn solve(&mut self, duals: &[f64]) -> Result<Option<PricingColumn>> {
        if duals.len() != self.widths.len() {
            return Err(Error::DimensionMismatch {
                context: "duals",
                expected: self.widths.len(),
                found: duals.len(),
            });
        }

        // value[w]: best dual value packable into width w; last[w]: item added last
        let mut value = vec![0.0f64; self.capacity + 1];
        let mut last: Vec<Option<usize>> = vec![None; self.capacity + 1];
        for w in 1..=self.capacity {
            for (item, &width) in self.widths.iter().enumerate() {
                if width <= w {
                    let candidate = value[w - width] + duals[item];
                    if candidate > value[w] {
                        value[w] = candidate;
                        last[w] = Some(item);
                    }
                }
            }
        }

        let mut best_width = 0;
        for w in 1..=self.capacity {
            if value[w] > value[best_width] {
                best_width = w;
            }
        }

        let mut pattern = vec![0.0; self.widths.len()];
        let mut w = best_width;
        while let Some(item) = last[w] {
            pattern[item] += 1.0;
            w -= self.widths[item];
        }
        trace!("knapsack best width {} value {}", best_width, value[best_width]);

        Ok(Some(PricingColumn {
            pattern,
            reduced_cost: 1.0 - value[best_width],
            proven_optimal: true,
        }))
    }
}
