//! Market regimes
//!
//! A regime is a named parameter preset driving both the Hawkes order
//! process and the underlying GBM diffusion until the next switch
//! check.

use stochastics::SimRng;

/// The five simulated market regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketRegime {
    BullNormal,
    BearNormal,
    SidewaysNormal,
    BullExtreme,
    BearExtreme,
}

/// Parameter vector owned by a regime.
///
/// `hawkes_mu/alpha/beta` shape the self-exciting intensity,
/// `momentum_k` the direction bias, `offset_*` the truncated-Pareto
/// price placement, and `drift`/`volatility` (annualized decimals)
/// reconfigure the GBM between steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeParams {
    pub hawkes_mu: f64,
    pub hawkes_alpha: f64,
    pub hawkes_beta: f64,
    pub momentum_k: f64,
    pub offset_l: f64,
    pub offset_alpha: f64,
    pub offset_max: f64,
    pub drift: f64,
    pub volatility: f64,
}

impl MarketRegime {
    pub fn all() -> [MarketRegime; 5] {
        [
            MarketRegime::BullNormal,
            MarketRegime::BearNormal,
            MarketRegime::SidewaysNormal,
            MarketRegime::BullExtreme,
            MarketRegime::BearExtreme,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarketRegime::BullNormal => "BULL_NORMAL",
            MarketRegime::BearNormal => "BEAR_NORMAL",
            MarketRegime::SidewaysNormal => "SIDEWAYS_NORMAL",
            MarketRegime::BullExtreme => "BULL_EXTREME",
            MarketRegime::BearExtreme => "BEAR_EXTREME",
        }
    }

    /// Fixed parameter table per regime.
    pub fn params(&self) -> RegimeParams {
        match self {
            MarketRegime::BullNormal => RegimeParams {
                hawkes_mu: 10.0,
                hawkes_alpha: 2.0,
                hawkes_beta: 5.0,
                momentum_k: 3.0,
                offset_l: 0.10,
                offset_alpha: 3.0,
                offset_max: 5.0,
                drift: 0.08,
                volatility: 0.03,
            },
            MarketRegime::BearNormal => RegimeParams {
                hawkes_mu: 10.0,
                hawkes_alpha: 2.0,
                hawkes_beta: 5.0,
                momentum_k: -3.0,
                offset_l: 0.10,
                offset_alpha: 3.0,
                offset_max: 5.0,
                drift: -0.08,
                volatility: 0.03,
            },
            MarketRegime::SidewaysNormal => RegimeParams {
                hawkes_mu: 8.0,
                hawkes_alpha: 1.5,
                hawkes_beta: 4.0,
                momentum_k: 0.5,
                offset_l: 0.08,
                offset_alpha: 2.5,
                offset_max: 3.0,
                drift: 0.0,
                volatility: 0.02,
            },
            MarketRegime::BullExtreme => RegimeParams {
                hawkes_mu: 25.0,
                hawkes_alpha: 4.0,
                hawkes_beta: 8.0,
                momentum_k: 8.0,
                offset_l: 0.20,
                offset_alpha: 4.0,
                offset_max: 10.0,
                drift: 0.20,
                volatility: 0.15,
            },
            MarketRegime::BearExtreme => RegimeParams {
                hawkes_mu: 25.0,
                hawkes_alpha: 4.0,
                hawkes_beta: 8.0,
                momentum_k: -8.0,
                offset_l: 0.20,
                offset_alpha: 4.0,
                offset_max: 10.0,
                drift: -0.20,
                volatility: 0.15,
            },
        }
    }
}

/// Probability mix over regimes, sampled at each switch check.
#[derive(Debug, Clone)]
pub struct RegimeMix {
    entries: Vec<(MarketRegime, f64)>,
}

impl Default for RegimeMix {
    /// 25% for each normal regime, 12.5% for each extreme regime.
    fn default() -> Self {
        Self::new(vec![
            (MarketRegime::BullNormal, 0.25),
            (MarketRegime::BearNormal, 0.25),
            (MarketRegime::SidewaysNormal, 0.25),
            (MarketRegime::BullExtreme, 0.125),
            (MarketRegime::BearExtreme, 0.125),
        ])
    }
}

impl RegimeMix {
    /// Build a mix from (regime, probability) pairs.
    ///
    /// # Panics
    /// Panics if the probabilities do not sum to 1 (within 1e-9) or
    /// any entry is negative.
    pub fn new(entries: Vec<(MarketRegime, f64)>) -> Self {
        assert!(!entries.is_empty(), "regime mix cannot be empty");
        let total: f64 = entries.iter().map(|(_, p)| p).sum();
        assert!(
            (total - 1.0).abs() < 1e-9,
            "regime probabilities must sum to 1, got {total}"
        );
        assert!(
            entries.iter().all(|(_, p)| *p >= 0.0),
            "regime probabilities must be non-negative"
        );
        Self { entries }
    }

    /// Single-regime mix, useful for pinned simulations.
    pub fn fixed(regime: MarketRegime) -> Self {
        Self::new(vec![(regime, 1.0)])
    }

    /// Draw a regime: U ~ [0,1) falls into the cumulative envelope.
    pub fn sample(&self, rng: &mut SimRng) -> MarketRegime {
        let u = rng.uniform_01();
        let mut cumulative = 0.0;
        for (regime, p) in &self.entries {
            cumulative += p;
            if u < cumulative {
                return *regime;
            }
        }
        // Floating-point tail: U landed at/after the last boundary.
        self.entries.last().expect("non-empty mix").0
    }
}
