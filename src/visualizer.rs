// src/visualizer.rs
//! Parameter labs shown next to topic content: a linear function for the
//! math and classic ML modules, a sine wave for the deep and reinforcement
//! learning modules. Everything here is pure and synchronous.

use crate::catalog::ModuleType;

/// A bounded, stepped parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderSpec {
    /// Moves `current` by `steps` increments, snapped to the step grid and
    /// clamped to the range.
    pub fn step_value(&self, current: f64, steps: i32) -> f64 {
        let raw = current + self.step * steps as f64;
        let snapped = self.min + ((raw - self.min) / self.step).round() * self.step;
        // Strip float noise such as 0.30000000000000004.
        let cleaned = (snapped * 1e6).round() / 1e6;
        cleaned.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearParams {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearParams {
    pub const SLOPE: SliderSpec = SliderSpec { label: "斜率 (m)", min: -5.0, max: 5.0, step: 0.5 };
    pub const INTERCEPT: SliderSpec = SliderSpec { label: "截距 (b)", min: -10.0, max: 10.0, step: 1.0 };
    pub const X_DOMAIN: [f64; 2] = [-10.0, 10.0];
    pub const Y_BOUNDS: [f64; 2] = [-20.0, 20.0];

    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Integer x over [-10, 10].
    pub fn sample(&self) -> Vec<(f64, f64)> {
        (-10..=10)
            .map(|x| {
                let x = x as f64;
                (x, self.evaluate(x))
            })
            .collect()
    }

    pub fn formula(&self) -> String {
        format!("y = {}x + {}", self.slope, self.intercept)
    }
}

impl Default for LinearParams {
    fn default() -> Self {
        Self { slope: 1.0, intercept: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineParams {
    pub amplitude: f64,
    pub frequency: f64,
}

impl SineParams {
    pub const AMPLITUDE: SliderSpec = SliderSpec { label: "振幅 (A)", min: 0.1, max: 5.0, step: 0.1 };
    pub const FREQUENCY: SliderSpec = SliderSpec { label: "频率 (f)", min: 0.5, max: 5.0, step: 0.1 };
    pub const X_DOMAIN: [f64; 2] = [0.0, 360.0];
    pub const Y_BOUNDS: [f64; 2] = [-5.0, 5.0];

    /// `x` is in degrees.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.amplitude * (self.frequency * x.to_radians()).sin()
    }

    /// x over [0, 360] in steps of 10 degrees.
    pub fn sample(&self) -> Vec<(f64, f64)> {
        (0..=36)
            .map(|i| {
                let x = (i * 10) as f64;
                (x, self.evaluate(x))
            })
            .collect()
    }

    pub fn formula(&self) -> String {
        format!("y = {} * sin({}x)", self.amplitude, self.frequency)
    }
}

impl Default for SineParams {
    fn default() -> Self {
        Self { amplitude: 1.0, frequency: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lab {
    Linear,
    Sine,
}

impl Lab {
    pub fn for_module(module: ModuleType) -> Option<Lab> {
        match module {
            ModuleType::Math | ModuleType::Ml => Some(Lab::Linear),
            ModuleType::Dl | ModuleType::Rl => Some(Lab::Sine),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Lab::Linear => "交互式实验室: 线性回归基础 (y = mx + b)",
            Lab::Sine => "交互式实验室: 激活函数与波形 (Sine)",
        }
    }

    pub fn sliders(&self) -> [SliderSpec; 2] {
        match self {
            Lab::Linear => [LinearParams::SLOPE, LinearParams::INTERCEPT],
            Lab::Sine => [SineParams::AMPLITUDE, SineParams::FREQUENCY],
        }
    }
}

/// Slider state for both labs. Which one is visible depends on the module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Visualizer {
    pub linear: LinearParams,
    pub sine: SineParams,
    /// Index of the slider that arrow keys adjust (0 or 1).
    pub focused_slider: usize,
}

impl Visualizer {
    pub fn cycle_slider(&mut self) {
        self.focused_slider = (self.focused_slider + 1) % 2;
    }

    pub fn values(&self, lab: Lab) -> [f64; 2] {
        match lab {
            Lab::Linear => [self.linear.slope, self.linear.intercept],
            Lab::Sine => [self.sine.amplitude, self.sine.frequency],
        }
    }

    pub fn adjust(&mut self, lab: Lab, steps: i32) {
        let spec = lab.sliders()[self.focused_slider];
        let slot = match (lab, self.focused_slider) {
            (Lab::Linear, 0) => &mut self.linear.slope,
            (Lab::Linear, _) => &mut self.linear.intercept,
            (Lab::Sine, 0) => &mut self.sine.amplitude,
            (Lab::Sine, _) => &mut self.sine.frequency,
        };
        *slot = spec.step_value(*slot, steps);
    }

    pub fn sample(&self, lab: Lab) -> Vec<(f64, f64)> {
        match lab {
            Lab::Linear => self.linear.sample(),
            Lab::Sine => self.sine.sample(),
        }
    }

    pub fn formula(&self, lab: Lab) -> String {
        match lab {
            Lab::Linear => self.linear.formula(),
            Lab::Sine => self.sine.formula(),
        }
    }
}
