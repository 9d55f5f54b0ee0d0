//! Completion handles for running animations and their fan-out/join.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::foundation::error::{GeoError, GeoResult};

/// Settlement state of an animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Pending,
    Done,
    Cancelled,
    Failed(String),
}

impl Status {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Write side of a leaf [`Completion`]. Only the first settlement sticks.
#[derive(Debug)]
pub struct Settler(Rc<RefCell<Status>>);

impl Settler {
    /// Settle the completion; returns `false` if it was already settled.
    pub fn settle(&self, status: Status) -> bool {
        let mut cur = self.0.borrow_mut();
        if cur.is_settled() {
            return false;
        }
        *cur = status;
        true
    }
}

#[derive(Clone, Debug)]
enum Inner {
    Leaf(Rc<RefCell<Status>>),
    Join(Vec<Completion>),
}

/// Read side of one animation, or the join of several.
///
/// A join is failed as soon as any member fails, pending while any member is pending, cancelled if
/// any member was cancelled, and done otherwise.
#[derive(Clone, Debug)]
pub struct Completion {
    inner: Inner,
}

impl Completion {
    pub fn pending() -> (Self, Settler) {
        let cell = Rc::new(RefCell::new(Status::Pending));
        (
            Self {
                inner: Inner::Leaf(Rc::clone(&cell)),
            },
            Settler(cell),
        )
    }

    pub fn settled(status: Status) -> Self {
        Self {
            inner: Inner::Leaf(Rc::new(RefCell::new(status))),
        }
    }

    pub fn done() -> Self {
        Self::settled(Status::Done)
    }

    pub fn all(parts: impl IntoIterator<Item = Completion>) -> Self {
        Self {
            inner: Inner::Join(parts.into_iter().collect()),
        }
    }

    pub fn status(&self) -> Status {
        match &self.inner {
            Inner::Leaf(cell) => cell.borrow().clone(),
            Inner::Join(parts) => {
                let mut pending = false;
                let mut cancelled = false;
                for part in parts {
                    match part.status() {
                        Status::Failed(msg) => return Status::Failed(msg),
                        Status::Pending => pending = true,
                        Status::Cancelled => cancelled = true,
                        Status::Done => {}
                    }
                }
                if pending {
                    Status::Pending
                } else if cancelled {
                    Status::Cancelled
                } else {
                    Status::Done
                }
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status().is_settled()
    }

    /// Map a settled completion onto a result.
    pub fn result(&self) -> GeoResult<()> {
        match self.status() {
            Status::Done => Ok(()),
            Status::Failed(msg) => Err(GeoError::animation(msg)),
            Status::Cancelled => Err(GeoError::animation("animation was cancelled")),
            Status::Pending => Err(GeoError::animation("animation has not finished")),
        }
    }
}

/// Shared cancellation flag checked by the driver before every tick.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/join.rs"]
mod tests;
