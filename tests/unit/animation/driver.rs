use super::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Log {
    ticks: Vec<f64>,
    completed: Vec<f64>,
}

struct Probe {
    log: Rc<RefCell<Log>>,
    fail_on_tick: Option<usize>,
}

impl TweenTarget for Probe {
    fn on_tick(&mut self, value: f64) -> GeoResult<()> {
        let mut log = self.log.borrow_mut();
        if Some(log.ticks.len()) == self.fail_on_tick {
            return Err(GeoError::animation("tick rejected"));
        }
        log.ticks.push(value);
        Ok(())
    }

    fn on_complete(&mut self, value: f64) -> GeoResult<()> {
        self.log.borrow_mut().completed.push(value);
        Ok(())
    }
}

fn probe(fail_on_tick: Option<usize>) -> (Rc<RefCell<Log>>, Box<dyn TweenTarget>) {
    let log = Rc::new(RefCell::new(Log::default()));
    (
        Rc::clone(&log),
        Box::new(Probe {
            log,
            fail_on_tick,
        }),
    )
}

fn fps10() -> Fps {
    Fps::new(10, 1).unwrap()
}

#[test]
fn ticks_then_completes_with_exact_end() {
    let mut d = FrameDriver::new(fps10());
    let (log, target) = probe(None);
    let c = d.start(Tween::new(0.0, 90.0, 1.0, Ease::Linear), target);
    let frames = d.run_until_idle(100).unwrap();
    assert_eq!(frames, 10);
    assert_eq!(c.status(), Status::Done);
    let log = log.borrow();
    assert_eq!(log.ticks.len(), 9);
    assert!((log.ticks[0] - 9.0).abs() < 1e-9);
    assert_eq!(log.completed, vec![90.0]);
}

#[test]
fn zero_duration_completes_on_first_step() {
    let mut d = FrameDriver::new(fps10());
    let (log, target) = probe(None);
    let c = d.start(Tween::new(0.0, 1.0, 0.0, Ease::InOutQuad), target);
    assert!(!c.is_settled());
    d.step();
    assert_eq!(c.status(), Status::Done);
    assert!(log.borrow().ticks.is_empty());
    assert_eq!(log.borrow().completed, vec![1.0]);
}

#[test]
fn cancelled_tween_never_completes() {
    let mut d = FrameDriver::new(fps10());
    let (log, target) = probe(None);
    let cancel = CancelToken::new();
    let c = d.start(
        Tween::new(0.0, 1.0, 1.0, Ease::Linear).with_cancel(cancel.clone()),
        target,
    );
    d.step();
    cancel.cancel();
    d.run_until_idle(100).unwrap();
    assert_eq!(c.status(), Status::Cancelled);
    assert_eq!(log.borrow().ticks.len(), 1);
    assert!(log.borrow().completed.is_empty());
}

#[test]
fn failing_target_fails_completion() {
    let mut d = FrameDriver::new(fps10());
    let (_log, target) = probe(Some(2));
    let c = d.start(Tween::new(0.0, 1.0, 1.0, Ease::Linear), target);
    d.run_until_idle(100).unwrap();
    assert_eq!(
        c.status(),
        Status::Failed("animation error: tick rejected".into())
    );
}

#[test]
fn concurrent_tweens_share_frames() {
    let mut d = FrameDriver::new(fps10());
    let (_a, ta) = probe(None);
    let (_b, tb) = probe(None);
    let ca = d.start(Tween::new(0.0, 1.0, 0.5, Ease::Linear), ta);
    let cb = d.start(Tween::new(0.0, 1.0, 1.0, Ease::Linear), tb);
    let all = Completion::all([ca.clone(), cb]);
    for _ in 0..5 {
        d.step();
    }
    assert_eq!(ca.status(), Status::Done);
    assert_eq!(all.status(), Status::Pending);
    d.run_until_idle(100).unwrap();
    assert_eq!(all.status(), Status::Done);
    assert_eq!(d.frame(), 10);
}

#[test]
fn frame_budget_is_enforced() {
    let mut d = FrameDriver::new(fps10());
    let (_log, target) = probe(None);
    d.start(Tween::new(0.0, 1.0, 10.0, Ease::Linear), target);
    let err = d.run_until_idle(5).unwrap_err();
    assert!(matches!(err, GeoError::Animation(_)));
    assert_eq!(d.active(), 1);
}
