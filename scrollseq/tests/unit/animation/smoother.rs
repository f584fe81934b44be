use std::cell::RefCell;
use std::rc::Rc;

use super::*;

const DT: f64 = 1.0 / 60.0;

#[test]
fn observers_see_every_change_in_order() {
    let mut s = Smoother::new(SpringConfig::default(), 0.0).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    s.on_change(move |v| sink.borrow_mut().push(v));

    s.set_target(1.0);
    let mut ticks = 0;
    while !s.is_settled() {
        assert!(s.tick(DT).is_some());
        ticks += 1;
        assert!(ticks < 600);
    }

    let seen = seen.borrow();
    assert_eq!(seen.len(), ticks);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*seen.last().unwrap(), 1.0);
    assert_eq!(s.get(), 1.0);
}

#[test]
fn settled_smoother_does_not_notify() {
    let mut s = Smoother::new(SpringConfig::default(), 0.5).unwrap();
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    s.on_change(move |_| *c.borrow_mut() += 1);

    assert_eq!(s.tick(DT), None);
    s.set_target(0.5);
    assert_eq!(s.tick(DT), None);
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn unsubscribe_stops_notifications() {
    let mut s = Smoother::new(SpringConfig::default(), 0.0).unwrap();
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let sub = s.on_change(move |_| *c.borrow_mut() += 1);
    assert_eq!(s.observer_count(), 1);

    s.set_target(1.0);
    s.tick(DT);
    assert_eq!(*count.borrow(), 1);

    assert!(s.unsubscribe(sub));
    assert!(!s.unsubscribe(sub));
    s.tick(DT);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn jump_notifies_once_and_settles() {
    let mut s = Smoother::new(SpringConfig::default(), 0.0).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    s.on_change(move |v| sink.borrow_mut().push(v));

    assert_eq!(s.jump(0.3), Some(0.3));
    assert_eq!(s.jump(0.3), None);
    assert!(s.is_settled());
    assert_eq!(*seen.borrow(), vec![0.3]);

    s.clear_observers();
    assert_eq!(s.observer_count(), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = SpringConfig {
        mass: 0.0,
        ..SpringConfig::default()
    };
    assert!(Smoother::new(cfg, 0.0).is_err());
}
