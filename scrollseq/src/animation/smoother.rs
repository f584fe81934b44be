use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::error::ScrollSeqResult;

/// Handle returned by [`Smoother::on_change`]; pass it to [`Smoother::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Observer = Box<dyn FnMut(f64)>;

/// Spring-smoothed progress signal.
///
/// The raw progress is fed in with [`Smoother::set_target`]; the smoothed value only moves when
/// the owner calls [`Smoother::tick`] once per scheduler tick. Observers run synchronously inside
/// `tick` (and `jump`) whenever the value changes.
pub struct Smoother {
    spring: Spring,
    observers: Vec<(Subscription, Observer)>,
    next_id: u64,
}

impl std::fmt::Debug for Smoother {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Smoother")
            .field("spring", &self.spring)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Smoother {
    /// Smoother resting at `initial`.
    pub fn new(config: SpringConfig, initial: f64) -> ScrollSeqResult<Self> {
        config.validate()?;
        Ok(Self {
            spring: Spring::new(config, initial),
            observers: Vec::new(),
            next_id: 0,
        })
    }

    /// Current smoothed value.
    pub fn get(&self) -> f64 {
        self.spring.position()
    }

    /// Current velocity (progress per second).
    pub fn velocity(&self) -> f64 {
        self.spring.velocity()
    }

    /// Latest raw value the spring is chasing.
    pub fn target(&self) -> f64 {
        self.spring.target()
    }

    /// `true` once the smoothed value has settled on the raw value.
    pub fn is_settled(&self) -> bool {
        self.spring.is_at_rest()
    }

    /// Spring parameters.
    pub fn config(&self) -> SpringConfig {
        self.spring.config()
    }

    /// Feed a new raw value.
    pub fn set_target(&mut self, raw: f64) {
        self.spring.set_target(raw);
    }

    /// Snap to `value` without animating. Observers are notified if the value changed.
    pub fn jump(&mut self, value: f64) -> Option<f64> {
        let before = self.spring.position();
        self.spring.jump(value);
        if before == value {
            return None;
        }
        self.notify(value);
        Some(value)
    }

    /// Advance the spring by `dt` seconds. Returns the new value if it changed.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        if !self.spring.step(dt) {
            return None;
        }
        let v = self.spring.position();
        self.notify(v);
        Some(v)
    }

    /// Register a change observer.
    pub fn on_change(&mut self, observer: impl FnMut(f64) + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != sub);
        self.observers.len() != before
    }

    /// Remove every observer.
    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, value: f64) {
        for (_, observer) in &mut self.observers {
            observer(value);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/smoother.rs"]
mod tests;
