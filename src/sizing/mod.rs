//! Canvas sizing: tracks a container's box size and derives the drawable
//! inner area after margins.
//!
//! The platform side (DOM element, GTK widget, test double) plugs in through
//! [`ContainerElement`] and [`ResizeObserverHost`]. Everything runs on the UI
//! thread, so shared state is `Rc<RefCell<_>>` rather than a lock.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::core::{BoxSize, Dimensions, Margin, PartialMargin};

/// Element whose box size drives the canvas.
pub trait ContainerElement {
    /// Current bounding box, or `None` when the element is detached.
    fn bounding_box(&self) -> Option<BoxSize>;
}

/// Invoked by the host on every observed size change.
pub type ResizeCallback = Box<dyn FnMut()>;

/// Handle returned by [`ResizeObserverHost::observe`].
pub trait ObserverRegistration {
    fn disconnect(&mut self);
}

/// Platform service that reports box-size changes of a container.
pub trait ResizeObserverHost {
    fn observe(
        &mut self,
        container: Rc<dyn ContainerElement>,
        on_resize: ResizeCallback,
    ) -> Box<dyn ObserverRegistration>;
}

#[derive(Debug, Default)]
struct SizeState {
    outer: BoxSize,
    revision: u64,
    recompute_count: u64,
}

impl SizeState {
    fn recompute(&mut self, container: Option<&dyn ContainerElement>) {
        self.recompute_count += 1;
        let Some(outer) = container.and_then(|element| element.bounding_box()) else {
            trace!("canvas recompute skipped: no attached container");
            return;
        };
        let outer = outer.sanitized();
        if outer != self.outer {
            self.outer = outer;
            self.revision += 1;
            trace!(
                width = outer.width,
                height = outer.height,
                revision = self.revision,
                "canvas size changed"
            );
        }
    }
}

/// Reactive width/height/margin/dimensions handle for one chart instance.
///
/// Dimensions are derived on read from the last observed box and the merged
/// margin. The handle owns the resize observer registration and releases it
/// on [`CanvasSizing::deactivate`] or on drop.
pub struct CanvasSizing {
    container: Option<Rc<dyn ContainerElement>>,
    margin: Margin,
    responsive: bool,
    state: Rc<RefCell<SizeState>>,
    live: Rc<Cell<bool>>,
    observer: Option<Box<dyn ObserverRegistration>>,
}

impl CanvasSizing {
    #[must_use]
    pub fn new(
        container: Option<Rc<dyn ContainerElement>>,
        margin: PartialMargin,
        responsive: bool,
    ) -> Self {
        Self {
            container,
            margin: Margin::merged(margin),
            responsive,
            state: Rc::new(RefCell::new(SizeState::default())),
            live: Rc::new(Cell::new(false)),
            observer: None,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.state.borrow().outer.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.state.borrow().outer.height
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.margin
    }

    #[must_use]
    pub fn responsive(&self) -> bool {
        self.responsive
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_outer(self.state.borrow().outer, self.margin)
    }

    /// Increments whenever the observed box size or the margin changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    /// Number of `recompute` runs, including observer-driven ones.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.state.borrow().recompute_count
    }

    #[must_use]
    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// Replaces the margin override; later fields still win over defaults.
    pub fn set_margin(&mut self, margin: PartialMargin) {
        let merged = Margin::merged(margin);
        if merged != self.margin {
            self.margin = merged;
            self.state.borrow_mut().revision += 1;
        }
    }

    /// Reads the container's current box. Without an attached container the
    /// last known size is kept.
    pub fn recompute(&self) {
        self.state.borrow_mut().recompute(self.container.as_deref());
    }

    /// Mount hook: one immediate recompute, then observer registration when
    /// responsive and a container is present.
    pub fn activate(&mut self, host: &mut dyn ResizeObserverHost) {
        self.deactivate();
        self.recompute();

        let Some(container) = self.container.clone() else {
            debug!("canvas activated without container");
            return;
        };
        if !self.responsive {
            debug!("canvas activated without resize tracking");
            return;
        }

        let live = Rc::new(Cell::new(true));
        self.live = Rc::clone(&live);
        let state: Weak<RefCell<SizeState>> = Rc::downgrade(&self.state);
        let target: Weak<dyn ContainerElement> = Rc::downgrade(&container);
        let on_resize: ResizeCallback = Box::new(move || {
            if !live.get() {
                return;
            }
            let (Some(state), Some(target)) = (state.upgrade(), target.upgrade()) else {
                return;
            };
            state.borrow_mut().recompute(Some(&*target));
        });

        self.observer = Some(host.observe(container, on_resize));
        debug!("resize observer registered");
    }

    /// Unmount hook: disconnects the observer, if any, exactly once.
    pub fn deactivate(&mut self) {
        self.live.set(false);
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
            debug!("resize observer disconnected");
        }
    }
}

impl Drop for CanvasSizing {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl std::fmt::Debug for CanvasSizing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSizing")
            .field("has_container", &self.has_container())
            .field("margin", &self.margin)
            .field("responsive", &self.responsive)
            .field("dimensions", &self.dimensions())
            .field("observing", &self.is_observing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasSizing, ContainerElement};
    use crate::core::{BoxSize, PartialMargin};
    use std::cell::Cell;
    use std::rc::Rc;

    struct FixedBox(Cell<Option<BoxSize>>);

    impl ContainerElement for FixedBox {
        fn bounding_box(&self) -> Option<BoxSize> {
            self.0.get()
        }
    }

    #[test]
    fn detached_container_keeps_last_known_size() {
        let element = Rc::new(FixedBox(Cell::new(Some(BoxSize::new(300.0, 200.0)))));
        let container: Rc<dyn ContainerElement> = element.clone();
        let sizing = CanvasSizing::new(Some(container), PartialMargin::default(), false);

        sizing.recompute();
        element.0.set(None);
        sizing.recompute();

        assert_eq!(sizing.width(), 300.0);
        assert_eq!(sizing.height(), 200.0);
        assert_eq!(sizing.recompute_count(), 2);
    }

    #[test]
    fn revision_only_moves_on_change() {
        let element = Rc::new(FixedBox(Cell::new(Some(BoxSize::new(100.0, 100.0)))));
        let container: Rc<dyn ContainerElement> = element.clone();
        let sizing = CanvasSizing::new(Some(container), PartialMargin::default(), false);

        sizing.recompute();
        sizing.recompute();
        assert_eq!(sizing.revision(), 1);

        element.0.set(Some(BoxSize::new(120.0, 100.0)));
        sizing.recompute();
        assert_eq!(sizing.revision(), 2);
    }
}
