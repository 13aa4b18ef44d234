//! Band and linear scales, and the tick generator for the value axis.
//!
//! The numbers follow the usual d3 conventions: a band scale splits its range
//! into equal steps (optionally padded), a linear scale maps its domain
//! proportionally onto its range, and ticks are "nice" multiples of
//! 1, 2 or 5 × 10^k.

/// Categorical scale mapping each key to the start of a fixed-width band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Band scale with no padding: bands tile the range exactly.
    pub fn new(domain: &[String], range: (f64, f64)) -> Self {
        Self::with_padding(domain, range, 0.0, 0.0)
    }

    pub fn with_padding(
        domain: &[String],
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        let mut keys: Vec<String> = Vec::with_capacity(domain.len());
        for d in domain {
            if !keys.contains(d) {
                keys.push(d.clone());
            }
        }
        let padding_inner = padding_inner.clamp(0.0, 1.0);
        let padding_outer = padding_outer.max(0.0);
        let n = keys.len() as f64;
        let (r0, r1) = range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let step = (hi - lo) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - padding_inner)) * 0.5;
        Self {
            domain: keys,
            range,
            start,
            step,
            bandwidth: step * (1.0 - padding_inner),
        }
    }

    /// Start of the band for `key`, or `None` for keys outside the domain.
    pub fn position(&self, key: &str) -> Option<f64> {
        let idx = self.domain.iter().position(|d| d == key)?;
        Some(self.start + self.step * idx as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Continuous scale mapping `domain` linearly onto `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    tick_count: usize,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            tick_count: 10,
        }
    }

    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    /// Map a domain value to a range position. A degenerate domain maps
    /// everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0 + (r1 - r0) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn ticks(&self) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, self.tick_count)
    }

    /// Distance between consecutive ticks (used for label precision).
    pub fn tick_step(&self) -> f64 {
        tick_increment(self.domain.0, self.domain.1, self.tick_count)
            .map(|inc| if inc < 0.0 { -1.0 / inc } else { inc })
            .unwrap_or(0.0)
    }
}

/// Signed tick increment: positive values are the step itself, negative
/// values `-k` mean a step of `1/k` (keeps small steps exact).
fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return None;
    }
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let step = (hi - lo) / count as f64;
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    let inverse = 10f64.powf(-power) / factor;
    let inc = if power >= 0.0 || !inverse.is_finite() {
        // subnormal steps have no finite inverse
        10f64.powf(power) * factor
    } else {
        -inverse
    };
    (inc.is_finite() && inc != 0.0).then_some(inc)
}

/// Upper bound on generated ticks per requested tick.
const MAX_TICKS_PER_COUNT: i64 = 10;

/// Nice tick values covering `[start, stop]`, ascending.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if start == stop && start.is_finite() && count > 0 {
        return vec![start];
    }
    let Some(inc) = tick_increment(start, stop, count) else {
        return Vec::new();
    };
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let (i0, i1) = if inc > 0.0 {
        ((lo / inc).ceil(), (hi / inc).floor())
    } else {
        ((lo * -inc).ceil(), (hi * -inc).floor())
    };
    if !(i0.is_finite() && i1.is_finite()) {
        return Vec::new();
    }
    let (i0, i1) = (i0 as i64, i1 as i64);
    if i1.saturating_sub(i0) > count as i64 * MAX_TICKS_PER_COUNT {
        return Vec::new();
    }
    if inc > 0.0 {
        (i0..=i1).map(|i| i as f64 * inc).collect()
    } else {
        (i0..=i1).map(|i| i as f64 / -inc).collect()
    }
}

/// Factory for the scales the layout engine uses.
pub trait ScaleProvider {
    fn band(&self, domain: &[String], range: (f64, f64)) -> BandScale;
    fn linear(&self, domain: (f64, f64), range: (f64, f64)) -> LinearScale;
}

/// Default scales: unpadded bands and ten value ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct D3Scales {
    pub padding_inner: f64,
    pub padding_outer: f64,
    pub tick_count: usize,
}

impl Default for D3Scales {
    fn default() -> Self {
        Self {
            padding_inner: 0.0,
            padding_outer: 0.0,
            tick_count: 10,
        }
    }
}

impl ScaleProvider for D3Scales {
    fn band(&self, domain: &[String], range: (f64, f64)) -> BandScale {
        BandScale::with_padding(domain, range, self.padding_inner, self.padding_outer)
    }

    fn linear(&self, domain: (f64, f64), range: (f64, f64)) -> LinearScale {
        LinearScale::new(domain, range).with_tick_count(self.tick_count)
    }
}
