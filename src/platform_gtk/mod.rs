//! GTK4 host: a `DrawingArea` acts as the chart container and its `resize`
//! signal stands in for a box-size observer.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gtk4 as gtk;
use gtk::glib::SignalHandlerId;
use gtk::prelude::*;
use tracing::warn;

use crate::api::{BarChart, BarChartConfig};
use crate::core::BoxSize;
use crate::error::ChartResult;
use crate::render::{CairoContextRenderer, CairoRenderer};
use crate::sizing::{ContainerElement, ObserverRegistration, ResizeCallback, ResizeObserverHost};

/// Drawing area measured through its allocated size.
pub struct GtkContainer {
    area: gtk::DrawingArea,
}

impl GtkContainer {
    #[must_use]
    pub fn new(area: gtk::DrawingArea) -> Self {
        Self { area }
    }
}

impl ContainerElement for GtkContainer {
    fn bounding_box(&self) -> Option<BoxSize> {
        // Widgets outside a window report stale allocations.
        if self.area.root().is_none() {
            return None;
        }
        Some(BoxSize::new(
            f64::from(self.area.width()),
            f64::from(self.area.height()),
        ))
    }
}

/// Resize observer backed by `DrawingArea::connect_resize`.
pub struct GtkResizeObserverHost {
    area: gtk::DrawingArea,
}

impl GtkResizeObserverHost {
    #[must_use]
    pub fn new(area: gtk::DrawingArea) -> Self {
        Self { area }
    }
}

struct GtkResizeRegistration {
    area: gtk::DrawingArea,
    handler: Option<SignalHandlerId>,
}

impl ObserverRegistration for GtkResizeRegistration {
    fn disconnect(&mut self) {
        if let Some(handler) = self.handler.take() {
            self.area.disconnect(handler);
        }
    }
}

impl ResizeObserverHost for GtkResizeObserverHost {
    fn observe(
        &mut self,
        _container: Rc<dyn ContainerElement>,
        on_resize: ResizeCallback,
    ) -> Box<dyn ObserverRegistration> {
        let on_resize = RefCell::new(on_resize);
        let handler = self.area.connect_resize(move |_, _, _| {
            (&mut *on_resize.borrow_mut())();
        });
        Box::new(GtkResizeRegistration {
            area: self.area.clone(),
            handler: Some(handler),
        })
    }
}

/// Binds a [`BarChart`] to a drawing area: mounts it, draws it through Cairo
/// and unmounts it when the adapter is dropped.
pub struct GtkChartAdapter {
    area: gtk::DrawingArea,
    chart: Rc<RefCell<BarChart>>,
}

impl GtkChartAdapter {
    pub fn attach(area: &gtk::DrawingArea, config: BarChartConfig) -> ChartResult<Self> {
        let container: Rc<dyn ContainerElement> = Rc::new(GtkContainer::new(area.clone()));
        let chart = Rc::new(RefCell::new(BarChart::new(config, Some(container))?));
        chart
            .borrow_mut()
            .mount(&mut GtkResizeObserverHost::new(area.clone()));

        let renderer = RefCell::new(CairoRenderer::new(1, 1)?);
        // The area holds only a weak handle; the adapter owns the chart.
        let draw_chart: Weak<RefCell<BarChart>> = Rc::downgrade(&chart);
        area.set_draw_func(move |_, context, _, _| {
            let Some(chart) = draw_chart.upgrade() else {
                return;
            };
            let Some(frame) = chart.borrow_mut().draw_frame() else {
                return;
            };
            if let Err(err) = renderer
                .borrow_mut()
                .render_on_cairo_context(context, &frame)
            {
                warn!(error = %err, "bar chart draw failed");
            }
        });

        Ok(Self {
            area: area.clone(),
            chart,
        })
    }

    #[must_use]
    pub fn chart(&self) -> Rc<RefCell<BarChart>> {
        Rc::clone(&self.chart)
    }
}

impl Drop for GtkChartAdapter {
    fn drop(&mut self) {
        self.area.unset_draw_func();
        if let Ok(mut chart) = self.chart.try_borrow_mut() {
            chart.unmount();
        }
    }
}
