use crate::animation::ease::Ease;
use crate::animation::join::{CancelToken, Completion, Settler, Status};
use crate::foundation::core::Fps;
use crate::foundation::error::{GeoError, GeoResult};
use crate::transform::linear::lerp;

/// A timed interpolation from `from` to `to`.
#[derive(Clone, Debug)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_secs: f64,
    pub ease: Ease,
    pub cancel: CancelToken,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_secs: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_secs,
            ease,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Interpolated value at normalized time `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        lerp(self.from, self.to, self.ease.apply(t))
    }
}

/// Receiver of tween values.
pub trait TweenTarget {
    /// Called with each intermediate value.
    fn on_tick(&mut self, value: f64) -> GeoResult<()>;

    /// Called exactly once with the exact end value.
    fn on_complete(&mut self, value: f64) -> GeoResult<()>;
}

/// Time source that runs tweens.
pub trait AnimationDriver {
    /// Schedule `tween`; the returned completion settles when the driver finishes it.
    fn start(&mut self, tween: Tween, target: Box<dyn TweenTarget>) -> Completion;
}

struct Running {
    tween: Tween,
    target: Box<dyn TweenTarget>,
    total_frames: u64,
    elapsed: u64,
    settler: Settler,
}

/// Deterministic [`AnimationDriver`] advanced one frame at a time by its owner.
pub struct FrameDriver {
    fps: Fps,
    running: Vec<Running>,
    frame: u64,
}

impl FrameDriver {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            running: Vec::new(),
            frame: 0,
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    pub fn active(&self) -> usize {
        self.running.len()
    }

    /// Advance every running tween by one frame, in start order.
    pub fn step(&mut self) {
        self.frame += 1;
        let frame = self.frame;
        self.running.retain_mut(|r| {
            if r.tween.cancel.is_cancelled() {
                r.settler.settle(Status::Cancelled);
                return false;
            }
            r.elapsed += 1;
            if r.elapsed >= r.total_frames {
                let status = match r.target.on_complete(r.tween.to) {
                    Ok(()) => Status::Done,
                    Err(e) => Status::Failed(e.to_string()),
                };
                r.settler.settle(status);
                return false;
            }
            let t = r.elapsed as f64 / r.total_frames as f64;
            let value = r.tween.value_at(t);
            tracing::trace!(frame, value, "tween tick");
            match r.target.on_tick(value) {
                Ok(()) => true,
                Err(e) => {
                    r.settler.settle(Status::Failed(e.to_string()));
                    false
                }
            }
        });
    }

    /// Step until no tween is running. Returns the number of frames stepped.
    #[tracing::instrument(skip(self))]
    pub fn run_until_idle(&mut self, max_frames: u64) -> GeoResult<u64> {
        let mut n = 0;
        while !self.is_idle() {
            if n >= max_frames {
                return Err(GeoError::animation(format!(
                    "{} tween(s) still running after {max_frames} frames",
                    self.running.len()
                )));
            }
            self.step();
            n += 1;
        }
        Ok(n)
    }
}

impl AnimationDriver for FrameDriver {
    fn start(&mut self, tween: Tween, target: Box<dyn TweenTarget>) -> Completion {
        let total_frames = self.fps.secs_to_frames_ceil(tween.duration_secs).max(1);
        let (completion, settler) = Completion::pending();
        self.running.push(Running {
            tween,
            target,
            total_frames,
            elapsed: 0,
            settler,
        });
        completion
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
