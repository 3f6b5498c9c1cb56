//! Sampled scalar functions answered by interpolation.

use serde::{Deserialize, Serialize};

use crate::error::{AtmoError, AtmoResult};

/// Interpolation method used between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Piecewise linear, extrapolating from the end segments.
    #[default]
    Linear,
    /// Output of the closest sample input.
    Nearest,
}

/// A scalar function known only at a set of (input, output) samples.
///
/// Samples are kept sorted by input; pairs are never split. Duplicate inputs
/// are accepted, and which of the overlapping samples answers a query at that
/// input is unspecified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFunction")]
pub struct InterpolatedFunction {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
    input_label: String,
    output_label: String,
    interpolation: Interpolation,
}

/// Serialized form, re-validated through [`InterpolatedFunction::new`].
#[derive(Deserialize)]
struct RawFunction {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
    input_label: String,
    output_label: String,
    #[serde(default)]
    interpolation: Interpolation,
}

impl TryFrom<RawFunction> for InterpolatedFunction {
    type Error = AtmoError;

    fn try_from(raw: RawFunction) -> AtmoResult<Self> {
        if raw.inputs.len() != raw.outputs.len() {
            return Err(AtmoError::invalid_input(format!(
                "{} inputs but {} outputs",
                raw.inputs.len(),
                raw.outputs.len()
            )));
        }
        Self::new(
            raw.inputs.into_iter().zip(raw.outputs),
            raw.input_label,
            raw.output_label,
            raw.interpolation,
        )
    }
}

impl InterpolatedFunction {
    /// Build a function from (input, output) pairs.
    ///
    /// Fails with [`AtmoError::InvalidInput`] when `samples` is empty or an
    /// input is not finite.
    pub fn new(
        samples: impl IntoIterator<Item = (f64, f64)>,
        input_label: impl Into<String>,
        output_label: impl Into<String>,
        interpolation: Interpolation,
    ) -> AtmoResult<Self> {
        let mut pairs: Vec<(f64, f64)> = samples.into_iter().collect();
        if pairs.is_empty() {
            return Err(AtmoError::invalid_input(
                "interpolated function needs at least one sample",
            ));
        }
        if let Some((x, _)) = pairs.iter().find(|(x, _)| !x.is_finite()) {
            return Err(AtmoError::invalid_input(format!(
                "sample input {} is not finite",
                x
            )));
        }

        // Stable, so duplicate inputs keep their original relative order
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (inputs, outputs) = pairs.into_iter().unzip();

        Ok(Self {
            inputs,
            outputs,
            input_label: input_label.into(),
            output_label: output_label.into(),
            interpolation,
        })
    }

    /// Shorthand for a linear function, the only mode the profile builder uses.
    pub fn linear(
        samples: impl IntoIterator<Item = (f64, f64)>,
        input_label: impl Into<String>,
        output_label: impl Into<String>,
    ) -> AtmoResult<Self> {
        Self::new(samples, input_label, output_label, Interpolation::Linear)
    }

    /// Evaluate the function at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self.interpolation {
            Interpolation::Linear => self.linear_at(x),
            Interpolation::Nearest => self.nearest_at(x),
        }
    }

    /// Evaluate the function at each value of `xs`.
    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    fn linear_at(&self, x: f64) -> f64 {
        let n = self.inputs.len();
        // Index of the first sample strictly above x
        let upper = self.inputs.partition_point(|&xi| xi <= x);

        if upper > 0 && self.inputs[upper - 1] == x {
            return self.outputs[upper - 1];
        }
        if n == 1 {
            return self.outputs[0];
        }

        // Nearest segment; end segments are extended past the sampled range
        let i1 = upper.clamp(1, n - 1);
        let i0 = i1 - 1;
        let (x0, x1) = (self.inputs[i0], self.inputs[i1]);
        let (y0, y1) = (self.outputs[i0], self.outputs[i1]);

        if x1 == x0 {
            return if x < x0 { y0 } else { y1 };
        }

        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }

    fn nearest_at(&self, x: f64) -> f64 {
        let upper = self.inputs.partition_point(|&xi| xi <= x);
        if upper == 0 {
            return self.outputs[0];
        }
        if upper == self.inputs.len() {
            return self.outputs[upper - 1];
        }
        if (x - self.inputs[upper - 1]) <= (self.inputs[upper] - x) {
            self.outputs[upper - 1]
        } else {
            self.outputs[upper]
        }
    }

    /// Smallest and largest sampled input.
    pub fn domain(&self) -> (f64, f64) {
        (self.inputs[0], self.inputs[self.inputs.len() - 1])
    }

    /// Sampled inputs, sorted ascending.
    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    /// Sampled outputs, aligned with [`Self::inputs`].
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Always false; construction rejects empty sample sets.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn input_label(&self) -> &str {
        &self.input_label
    }

    pub fn output_label(&self) -> &str {
        &self.output_label
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }
}
