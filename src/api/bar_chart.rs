use std::rc::Rc;

use tracing::debug;

use crate::core::{
    BarGeometry, BarStyle, DataPoint, Dimensions, PartialMargin, compute_bar_geometry,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};
use crate::sizing::{CanvasSizing, ContainerElement, ResizeObserverHost};

use super::axis_frame_builder::build_chart_frame;
use super::validation::{resolve_bar_style, validate_bar_chart_config};
use super::{AxisConfig, BarChartConfig, ColorSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    size_revision: u64,
    data_revision: u64,
}

/// Renderable bar chart bound to one container.
///
/// Geometry is a pull-based cache: it is recomputed on read whenever the
/// container size, margin, data or style changed since the last read.
/// Dropping the chart releases its resize observer.
#[derive(Debug)]
pub struct BarChart {
    config: BarChartConfig,
    style: BarStyle,
    sizing: CanvasSizing,
    data_revision: u64,
    mounted: bool,
    cache: Option<(CacheKey, BarGeometry)>,
}

impl BarChart {
    pub fn new(
        config: BarChartConfig,
        container: Option<Rc<dyn ContainerElement>>,
    ) -> ChartResult<Self> {
        let style = validate_bar_chart_config(&config)?;
        let sizing = CanvasSizing::new(container, config.margin, config.responsive);
        debug!(
            rows = config.data.len(),
            x_key = %config.x_key,
            y_key = %config.y_key,
            responsive = config.responsive,
            "bar chart created"
        );
        Ok(Self {
            config,
            style,
            sizing,
            data_revision: 0,
            mounted: false,
            cache: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &[DataPoint] {
        &self.config.data
    }

    #[must_use]
    pub fn style(&self) -> &BarStyle {
        &self.style
    }

    #[must_use]
    pub fn sizing(&self) -> &CanvasSizing {
        &self.sizing
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.sizing.dimensions()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mount hook: measures the container and starts resize tracking.
    pub fn mount(&mut self, host: &mut dyn ResizeObserverHost) {
        self.sizing.activate(host);
        self.mounted = true;
        debug!(
            width = self.sizing.width(),
            height = self.sizing.height(),
            observing = self.sizing.is_observing(),
            "bar chart mounted"
        );
    }

    /// Unmount hook: stops resize tracking. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.sizing.deactivate();
        self.mounted = false;
        debug!("bar chart unmounted");
    }

    /// Forces a container measurement outside of observer notifications.
    pub fn recompute(&self) {
        self.sizing.recompute();
    }

    pub fn set_data(&mut self, data: Vec<DataPoint>) {
        debug!(rows = data.len(), "set bar chart data");
        self.config.data = data;
        self.invalidate();
    }

    pub fn set_color(&mut self, color: Option<ColorSpec>) -> ChartResult<()> {
        let previous = std::mem::replace(&mut self.config.color, color);
        match resolve_bar_style(&self.config) {
            Ok(style) => {
                self.style = style;
                self.invalidate();
                Ok(())
            }
            Err(err) => {
                self.config.color = previous;
                Err(err)
            }
        }
    }

    pub fn set_gap_ratio(&mut self, gap_ratio: f64) -> ChartResult<()> {
        let style = self.style.clone().with_gap_ratio(gap_ratio).map_err(|_| {
            ChartError::InvalidConfig("gapRatio must be finite and in [0, 1)".to_owned())
        })?;
        self.config.gap_ratio = gap_ratio;
        self.style = style;
        self.invalidate();
        Ok(())
    }

    pub fn set_margin(&mut self, margin: PartialMargin) -> ChartResult<()> {
        margin.validate()?;
        self.config.margin = margin;
        self.sizing.set_margin(margin);
        Ok(())
    }

    pub fn set_x_axis(&mut self, axis: AxisConfig) {
        self.config.x_axis = axis;
    }

    pub fn set_y_axis(&mut self, axis: AxisConfig) {
        self.config.y_axis = axis;
    }

    /// Current bar geometry, recomputed only when its inputs changed.
    pub fn geometry(&mut self) -> &BarGeometry {
        let key = CacheKey {
            size_revision: self.sizing.revision(),
            data_revision: self.data_revision,
        };
        if self
            .cache
            .as_ref()
            .is_some_and(|(cached, _)| *cached != key)
        {
            self.cache = None;
        }
        let (_, geometry) = self.cache.get_or_insert_with(|| {
            (
                key,
                compute_bar_geometry(
                    &self.config.data,
                    &self.config.x_key,
                    &self.config.y_key,
                    self.sizing.dimensions().inner(),
                    &self.style,
                ),
            )
        });
        geometry
    }

    /// Builds the full scene: bars, grid lines and axes.
    pub fn build_frame(&mut self) -> RenderFrame {
        let dimensions = self.sizing.dimensions();
        let margin = self.sizing.margin();
        let x_axis = self.config.x_axis.clone();
        let y_axis = self.config.y_axis.clone();
        build_chart_frame(self.geometry(), dimensions, margin, &x_axis, &y_axis)
    }

    /// Frame for a host-driven draw pass: measures the container first, and
    /// returns `None` once the chart is unmounted so late draws stay inert.
    pub fn draw_frame(&mut self) -> Option<RenderFrame> {
        if !self.mounted {
            return None;
        }
        self.sizing.recompute();
        Some(self.build_frame())
    }

    pub fn render<R: Renderer>(&mut self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_frame();
        debug!(
            rects = frame.rects.len(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "render bar chart frame"
        );
        renderer.render(&frame)
    }

    /// Serializes the current geometry for host-side inspection.
    pub fn geometry_json_pretty(&mut self) -> ChartResult<String> {
        serde_json::to_string_pretty(self.geometry())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize geometry: {e}")))
    }

    fn invalidate(&mut self) {
        self.data_revision += 1;
    }
}
