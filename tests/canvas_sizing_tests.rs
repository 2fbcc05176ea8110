use std::cell::Cell;
use std::rc::Rc;

use barchart_rs::core::{BoxSize, Margin, PartialMargin};
use barchart_rs::sizing::{
    CanvasSizing, ContainerElement, ObserverRegistration, ResizeCallback, ResizeObserverHost,
};

struct MockElement {
    size: Cell<Option<BoxSize>>,
}

impl MockElement {
    fn sized(width: f64, height: f64) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new(Some(BoxSize::new(width, height))),
        })
    }

    fn resize(&self, width: f64, height: f64) {
        self.size.set(Some(BoxSize::new(width, height)));
    }
}

impl ContainerElement for MockElement {
    fn bounding_box(&self) -> Option<BoxSize> {
        self.size.get()
    }
}

struct MockRegistration {
    disconnects: Rc<Cell<usize>>,
}

impl ObserverRegistration for MockRegistration {
    fn disconnect(&mut self) {
        self.disconnects.set(self.disconnects.get() + 1);
    }
}

#[derive(Default)]
struct MockHost {
    observe_calls: usize,
    callbacks: Vec<ResizeCallback>,
    disconnects: Rc<Cell<usize>>,
}

impl MockHost {
    fn notify(&mut self) {
        for callback in &mut self.callbacks {
            callback();
        }
    }
}

impl ResizeObserverHost for MockHost {
    fn observe(
        &mut self,
        _container: Rc<dyn ContainerElement>,
        on_resize: ResizeCallback,
    ) -> Box<dyn ObserverRegistration> {
        self.observe_calls += 1;
        self.callbacks.push(on_resize);
        Box::new(MockRegistration {
            disconnects: Rc::clone(&self.disconnects),
        })
    }
}

fn attached(element: &Rc<MockElement>) -> Option<Rc<dyn ContainerElement>> {
    let container: Rc<dyn ContainerElement> = element.clone();
    Some(container)
}

#[test]
fn zero_dimensions_without_container() {
    let mut host = MockHost::default();
    let mut sizing = CanvasSizing::new(None, PartialMargin::default(), true);
    sizing.activate(&mut host);

    let dimensions = sizing.dimensions();
    assert_eq!(sizing.width(), 0.0);
    assert_eq!(sizing.height(), 0.0);
    assert_eq!(dimensions.width, 0.0);
    assert_eq!(dimensions.height, 0.0);
    assert_eq!(dimensions.inner_width, 0.0);
    assert_eq!(dimensions.inner_height, 0.0);
    assert_eq!(host.observe_calls, 0);
    assert!(!sizing.is_observing());
}

#[test]
fn default_margin_is_exposed() {
    let sizing = CanvasSizing::new(None, PartialMargin::default(), true);
    assert_eq!(sizing.margin(), Margin::new(20.0, 20.0, 40.0, 50.0));
}

#[test]
fn custom_margin_merges_over_defaults() {
    let margin = PartialMargin::default().with_top(30.0).with_left(60.0);
    let sizing = CanvasSizing::new(None, margin, true);
    assert_eq!(sizing.margin(), Margin::new(30.0, 20.0, 40.0, 60.0));
}

#[test]
fn recompute_derives_inner_dimensions() {
    let element = MockElement::sized(800.0, 600.0);
    let sizing = CanvasSizing::new(attached(&element), PartialMargin::default(), true);
    sizing.recompute();

    let dimensions = sizing.dimensions();
    assert_eq!(dimensions.width, 800.0);
    assert_eq!(dimensions.height, 600.0);
    assert_eq!(dimensions.inner_width, 730.0);
    assert_eq!(dimensions.inner_height, 540.0);
}

#[test]
fn small_container_floors_inner_dimensions_at_zero() {
    let element = MockElement::sized(50.0, 30.0);
    let sizing = CanvasSizing::new(attached(&element), PartialMargin::default(), true);
    sizing.recompute();

    let dimensions = sizing.dimensions();
    assert_eq!(dimensions.inner_width, 0.0);
    assert_eq!(dimensions.inner_height, 0.0);
}

#[test]
fn activate_measures_and_registers_observer() {
    let element = MockElement::sized(640.0, 480.0);
    let mut host = MockHost::default();
    let mut sizing = CanvasSizing::new(attached(&element), PartialMargin::default(), true);

    sizing.activate(&mut host);

    assert_eq!(host.observe_calls, 1);
    assert!(sizing.is_observing());
    assert_eq!(sizing.recompute_count(), 1);
    assert_eq!(sizing.width(), 640.0);
}

#[test]
fn observer_notifications_recompute_dimensions() {
    let element = MockElement::sized(640.0, 480.0);
    let mut host = MockHost::default();
    let mut sizing = CanvasSizing::new(attached(&element), PartialMargin::default(), true);
    sizing.activate(&mut host);

    element.resize(1000.0, 700.0);
    host.notify();

    assert_eq!(sizing.recompute_count(), 2);
    assert_eq!(sizing.dimensions().inner_width, 930.0);
    assert_eq!(sizing.dimensions().inner_height, 640.0);
}

#[test]
fn non_responsive_sizing_never_observes() {
    let element = MockElement::sized(640.0, 480.0);
    let mut host = MockHost::default();
    let mut sizing = CanvasSizing::new(attached(&element), PartialMargin::default(), false);

    sizing.activate(&mut host);

    assert_eq!(host.observe_calls, 0);
    assert!(!sizing.is_observing());
    assert_eq!(sizing.width(), 640.0);
}

#[test]
fn deactivate_disconnects_once_and_silences_late_notifications() {
    let element = MockElement::sized(800.0, 600.0);
    let mut host = MockHost::default();
    let mut sizing = CanvasSizing::new(attached(&element), PartialMargin::default(), true);
    sizing.activate(&mut host);

    sizing.deactivate();
    sizing.deactivate();
    assert_eq!(host.disconnects.get(), 1);

    let count_before = sizing.recompute_count();
    element.resize(100.0, 100.0);
    host.notify();

    assert_eq!(sizing.recompute_count(), count_before);
    assert_eq!(sizing.width(), 800.0);
}

#[test]
fn drop_releases_observer() {
    let element = MockElement::sized(800.0, 600.0);
    let mut host = MockHost::default();
    {
        let mut sizing = CanvasSizing::new(attached(&element), PartialMargin::default(), true);
        sizing.activate(&mut host);
    }

    assert_eq!(host.disconnects.get(), 1);
    // The callback outlives the sizing handle and must be inert.
    host.notify();
}

#[test]
fn reactivation_replaces_previous_observer() {
    let element = MockElement::sized(800.0, 600.0);
    let mut host = MockHost::default();
    let mut sizing = CanvasSizing::new(attached(&element), PartialMargin::default(), true);

    sizing.activate(&mut host);
    sizing.activate(&mut host);

    assert_eq!(host.observe_calls, 2);
    assert_eq!(host.disconnects.get(), 1);

    let before = sizing.recompute_count();
    host.notify();
    // Only the live registration reacts.
    assert_eq!(sizing.recompute_count(), before + 1);
}

#[test]
fn set_margin_bumps_revision_only_on_change() {
    let sizing_margin = PartialMargin::default().with_bottom(10.0);
    let mut sizing = CanvasSizing::new(None, PartialMargin::default(), true);
    let start = sizing.revision();

    sizing.set_margin(PartialMargin::default());
    assert_eq!(sizing.revision(), start);

    sizing.set_margin(sizing_margin);
    assert_eq!(sizing.revision(), start + 1);
    assert_eq!(sizing.margin().bottom, 10.0);
}
