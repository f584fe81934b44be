use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};

/// Physical parameters of the smoothing spring.
///
/// Defaults give an over-damped spring that follows scroll closely without ringing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Friction coefficient.
    pub damping: f64,
    /// Spring constant.
    pub stiffness: f64,
    /// Mass of the moving body.
    pub mass: f64,
    /// Absolute velocity (units per second) under which the spring may come to rest.
    pub rest_speed: f64,
    /// Absolute distance to target under which the spring may come to rest.
    pub rest_delta: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 50.0,
            stiffness: 300.0,
            mass: 1.0,
            rest_speed: 0.5,
            rest_delta: 0.001,
        }
    }
}

impl SpringConfig {
    /// Validate that all parameters are finite and physically meaningful.
    pub fn validate(&self) -> ScrollSeqResult<()> {
        let all = [
            self.damping,
            self.stiffness,
            self.mass,
            self.rest_speed,
            self.rest_delta,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(ScrollSeqError::validation("spring parameters must be finite"));
        }
        if self.stiffness <= 0.0 || self.mass <= 0.0 {
            return Err(ScrollSeqError::validation(
                "spring stiffness and mass must be > 0",
            ));
        }
        if self.damping < 0.0 || self.rest_speed < 0.0 || self.rest_delta < 0.0 {
            return Err(ScrollSeqError::validation(
                "spring damping and rest thresholds must be >= 0",
            ));
        }
        Ok(())
    }

    /// Damping ratio `ζ = c / (2·√(k·m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency `ω₀ = √(k/m)`.
    pub fn angular_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

/// Position/velocity state of a spring pulled toward `target`.
///
/// Each [`Spring::step`] advances the closed-form solution of the damped oscillator from the
/// current state, so retargeting mid-flight keeps the velocity continuous.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring resting at `value`.
    pub fn new(config: SpringConfig, value: f64) -> Self {
        Self {
            config,
            position: value,
            velocity: 0.0,
            target: value,
            at_rest: true,
        }
    }

    /// Spring parameters.
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Current position.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Value the spring is pulled toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// `true` once the spring has settled on its target.
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Move the target. The spring wakes up unless it already sits on the new target.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        if self.at_rest && self.position == target {
            return;
        }
        self.at_rest = false;
    }

    /// Teleport to `value` with zero velocity.
    pub fn jump(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Advance the spring by `dt` seconds. Returns `true` if the position changed.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.at_rest || !dt.is_finite() || dt <= 0.0 {
            return false;
        }
        let before = self.position;

        let (x, v) = solve(self.config, self.position - self.target, self.velocity, dt);
        self.position = self.target + x;
        self.velocity = v;

        if !self.position.is_finite() || !self.velocity.is_finite() {
            tracing::warn!(dt, target = self.target, "spring state diverged, snapping to target");
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        } else if self.velocity.abs() <= self.config.rest_speed
            && (self.target - self.position).abs() <= self.config.rest_delta
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }

        self.position != before
    }
}

/// Displacement and velocity after `t` seconds for initial displacement `x0` and velocity `v0`.
fn solve(config: SpringConfig, x0: f64, v0: f64, t: f64) -> (f64, f64) {
    let zeta = config.damping_ratio();
    let w0 = config.angular_frequency();

    if (zeta - 1.0).abs() < 1e-9 {
        // Critically damped.
        let b = v0 + w0 * x0;
        let e = (-w0 * t).exp();
        let x = e * (x0 + b * t);
        let v = e * (b - w0 * (x0 + b * t));
        return (x, v);
    }

    let a = zeta * w0;
    if zeta < 1.0 {
        let e = (-a * t).exp();
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let b = (v0 + a * x0) / wd;
        let (s, c) = (wd * t).sin_cos();
        let x = e * (x0 * c + b * s);
        let v = e * ((b * wd - a * x0) * c - (a * b + x0 * wd) * s);
        (x, v)
    } else {
        // Over-damped: sum of two decaying exponentials, both roots negative.
        let wd = w0 * (zeta * zeta - 1.0).sqrt();
        let (r1, r2) = (-a + wd, -a - wd);
        let c1 = (v0 - r2 * x0) / (r1 - r2);
        let c2 = x0 - c1;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
