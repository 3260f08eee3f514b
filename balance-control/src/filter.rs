//! Second-order IIR low-pass filters for sensor noise suppression
//!
//! Direct-form filters with a fixed `(1, 2, 1)` numerator and a tuned pole
//! pair, the classic Butterworth-style shape produced by filter design
//! tables. Each filter owns a three-deep delay line for inputs and outputs
//! (z⁻², z⁻¹, z⁰), zero-initialized at construction and never reset after,
//! so its state stays warm across safety-state changes.
//!
//! Update rule per tick:
//! ```text
//! y₂ = (x₀ + x₂) + 2·x₁ + fb₀·y₀ + fb₁·y₁
//! ```
//! with the new input pre-divided by the coefficient set's `gain`.

/// Coefficient set for one [`Biquad`] instance
#[derive(Debug, Clone, Copy)]
pub struct Coefficients {
    /// Input scaling divisor
    pub gain: f32,
    /// Feedback coefficients for y(z⁻²) and y(z⁻¹)
    pub feedback: [f32; 2],
}

/// Low-pass tuned for the x-axis accelerometer; its output is the tilt
/// correction term fed into the estimator every tick.
pub const ACCEL_X_LOW_PASS: Coefficients = Coefficients {
    gain: 1.013_464_636e3,
    feedback: [-0.913_148_772_1, 1.909_201_915_1],
};

/// Low-pass tuned for the gyro channel.
///
/// Currently not wired into the balance pipeline: the estimator integrates
/// the raw gyro rate directly. The coefficient set is kept so the gyro path
/// can be filtered without redoing the filter design.
pub const GYRO_LOW_PASS: Coefficients = Coefficients {
    gain: 1.565_078_650,
    feedback: [-0.412_801_598_1, -1.142_980_502_5],
};

/// One 2nd-order IIR low-pass filter with its delay lines
#[derive(Debug, Clone)]
pub struct Biquad {
    coefficients: Coefficients,
    /// Input delay line, oldest first
    x: [f32; 3],
    /// Output delay line, oldest first
    y: [f32; 3],
}

impl Biquad {
    /// Creates a filter with zeroed delay lines
    pub const fn new(coefficients: Coefficients) -> Self {
        Self {
            coefficients,
            x: [0.0; 3],
            y: [0.0; 3],
        }
    }

    /// Shifts the delay lines and returns the newest filtered output
    pub fn update(&mut self, input: f32) -> f32 {
        self.x[0] = self.x[1];
        self.x[1] = self.x[2];
        self.x[2] = input / self.coefficients.gain;
        self.y[0] = self.y[1];
        self.y[1] = self.y[2];
        self.y[2] = (self.x[0] + self.x[2])
            + 2.0 * self.x[1]
            + self.coefficients.feedback[0] * self.y[0]
            + self.coefficients.feedback[1] * self.y[1];
        self.y[2]
    }
}
