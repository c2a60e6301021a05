//! Hawkes microstructure model
//!
//! Couples a GBM mid-price to a self-exciting point process:
//!
//! 1. Advance the GBM to get the new mid `S_t`.
//! 2. Intensity `λ(t) = μ + Σ α·exp(−β·(t − t_j))` over recent events.
//! 3. An event fires with probability `min(λ·Δt, 1)`; each event emits
//!    a cloud of N orders.
//! 4. Per order: direction from a logistic of price momentum, offset
//!    from mid by a truncated Pareto draw, volume log-normal.
//!
//! Regime switches re-draw the parameter vector (and the GBM drift and
//! volatility) every fixed span of simulated time.

use std::collections::VecDeque;

use tracing::debug;

use stochastics::distributions::{
    logistic, sample_bernoulli, sample_lognormal, sample_truncated_pareto,
};
use stochastics::{GbmProcess, SimRng};

use super::{PriceModel, SECONDS_PER_YEAR};
use crate::params::GenerationConfig;
use crate::regime::{MarketRegime, RegimeMix, RegimeParams};

/// Events older than `6.9 / β` contribute less than 1e-3 to the
/// intensity and are pruned.
const PRUNE_LOG_FACTOR: f64 = 6.9;

/// One synthetic limit order produced at a Hawkes event.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedOrder {
    /// Simulated event time in seconds.
    pub time: f64,
    pub is_buy: bool,
    pub price: f64,
    pub volume: f64,
    /// Monotone per-generator counter.
    pub order_id: u64,
}

#[derive(Debug)]
pub struct HawkesModel {
    gbm: GbmProcess,
    rng: SimRng,
    params: RegimeParams,
    regime: MarketRegime,
    mix: RegimeMix,
    /// Simulated seconds between regime draws; 0 disables switching.
    switch_interval: f64,
    next_switch_at: f64,

    event_times: VecDeque<f64>,
    previous_price: f64,
    current_time: f64,
    dt: f64,

    volume_mu: f64,
    volume_sigma: f64,
    orders_per_event: usize,

    current_orders: Vec<GeneratedOrder>,
    next_order_id: u64,
}

impl HawkesModel {
    /// Build from the generation config with the default regime mix.
    pub fn new(config: &GenerationConfig) -> Self {
        Self::with_mix(config, RegimeMix::default())
    }

    /// Build with an explicit regime mix. The initial regime is drawn
    /// from the mix.
    pub fn with_mix(config: &GenerationConfig, mix: RegimeMix) -> Self {
        let mut rng = SimRng::new(config.seed);
        let regime = mix.sample(&mut rng);
        let params = regime.params();
        let gbm_seed = if config.seed == 0 {
            0
        } else {
            config.seed.wrapping_add(1)
        };
        let dt = config.dt_seconds();
        Self {
            gbm: GbmProcess::new(
                config.base_price,
                params.drift,
                params.volatility,
                dt / SECONDS_PER_YEAR,
                gbm_seed,
            ),
            rng,
            params,
            regime,
            mix,
            switch_interval: config.regime_switch_interval_secs,
            next_switch_at: config.regime_switch_interval_secs,
            event_times: VecDeque::new(),
            previous_price: config.base_price,
            current_time: 0.0,
            dt,
            volume_mu: config.volume_mu,
            volume_sigma: config.volume_sigma,
            orders_per_event: config.orders_per_event,
            current_orders: Vec::new(),
            next_order_id: 1,
        }
    }

    /// Build with a pinned parameter vector and switching disabled.
    pub fn with_params(config: &GenerationConfig, params: RegimeParams) -> Self {
        let mut model = Self::with_mix(config, RegimeMix::fixed(MarketRegime::SidewaysNormal));
        model.params = params;
        model.switch_interval = 0.0;
        model.gbm.set_drift(params.drift);
        model.gbm.set_volatility(params.volatility);
        model
    }

    /// Orders produced at the last step, draining the buffer.
    pub fn drain_orders(&mut self) -> Vec<GeneratedOrder> {
        std::mem::take(&mut self.current_orders)
    }

    /// Orders produced at the last step without draining.
    pub fn current_orders(&self) -> &[GeneratedOrder] {
        &self.current_orders
    }

    /// Intensity `λ(t)` at the current simulated time.
    pub fn current_intensity(&self) -> f64 {
        self.intensity_at(self.current_time)
    }

    pub fn regime(&self) -> MarketRegime {
        self.regime
    }

    pub fn params(&self) -> &RegimeParams {
        &self.params
    }

    fn intensity_at(&self, t: f64) -> f64 {
        let mut intensity = self.params.hawkes_mu;
        for &t_j in &self.event_times {
            intensity += self.params.hawkes_alpha * (-self.params.hawkes_beta * (t - t_j)).exp();
        }
        intensity
    }

    fn prune_old_events(&mut self, t: f64) {
        let cutoff = t - PRUNE_LOG_FACTOR / self.params.hawkes_beta;
        while self
            .event_times
            .front()
            .is_some_and(|&t_j| t_j < cutoff)
        {
            self.event_times.pop_front();
        }
    }

    fn maybe_switch_regime(&mut self) {
        if self.switch_interval <= 0.0 {
            return;
        }
        while self.current_time >= self.next_switch_at {
            self.next_switch_at += self.switch_interval;
            let drawn = self.mix.sample(&mut self.rng);
            if drawn == self.regime {
                continue;
            }
            // Swap the whole parameter vector atomically between
            // steps, including the diffusion parameters.
            self.regime = drawn;
            self.params = drawn.params();
            self.gbm.set_drift(self.params.drift);
            self.gbm.set_volatility(self.params.volatility);
            debug!(
                regime = drawn.name(),
                t = self.current_time,
                "regime switched"
            );
        }
    }

    fn generate_order_cloud(&mut self, mid_price: f64, event_time: f64) {
        let price_change = mid_price - self.previous_price;
        let buy_probability = logistic(self.params.momentum_k * price_change);

        for _ in 0..self.orders_per_event {
            let is_buy = sample_bernoulli(buy_probability, &mut self.rng);
            let offset = sample_truncated_pareto(
                self.params.offset_l,
                self.params.offset_alpha,
                self.params.offset_max,
                &mut self.rng,
            );
            let price = if is_buy {
                mid_price - offset
            } else {
                mid_price + offset
            };
            let volume = sample_lognormal(self.volume_mu, self.volume_sigma, &mut self.rng);

            let order_id = self.next_order_id;
            self.next_order_id += 1;
            self.current_orders.push(GeneratedOrder {
                time: event_time,
                is_buy,
                price,
                volume,
                order_id,
            });
        }
    }
}

impl PriceModel for HawkesModel {
    fn next_price(&mut self) -> f64 {
        self.current_orders.clear();
        self.maybe_switch_regime();

        let new_price = self.gbm.step();

        let lambda = self.intensity_at(self.current_time);
        let event_prob = (lambda * self.dt).min(1.0);
        if sample_bernoulli(event_prob, &mut self.rng) {
            self.event_times.push_back(self.current_time);
            self.prune_old_events(self.current_time);
            self.generate_order_cloud(new_price, self.current_time);
        }

        self.previous_price = new_price;
        self.current_time += self.dt;
        new_price
    }

    fn current_price(&self) -> f64 {
        self.gbm.current_price()
    }

    fn reset(&mut self) {
        self.gbm.reset();
        self.previous_price = self.gbm.current_price();
        self.current_time = 0.0;
        self.next_switch_at = self.switch_interval;
        self.event_times.clear();
        self.current_orders.clear();
        self.next_order_id = 1;
    }

    fn name(&self) -> &'static str {
        "hawkes"
    }

    fn description(&self) -> String {
        "Hawkes microstructure: self-exciting order clouds with momentum-biased direction"
            .to_string()
    }
}
