use crate::core::{BarGeometry, Dimensions, Margin};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::AxisConfig;

const AXIS_COLOR: Color = Color::rgb(0.42, 0.45, 0.50);
const GRID_COLOR: Color = Color::rgb(0.89, 0.92, 0.95);
const LABEL_COLOR: Color = Color::rgb(0.10, 0.12, 0.16);
const AXIS_STROKE_PX: f64 = 1.0;
const TICK_SIZE_PX: f64 = 6.0;
const TICK_LABEL_GAP_PX: f64 = 3.0;
const LABEL_FONT_PX: f64 = 11.0;
const TITLE_FONT_PX: f64 = 12.0;

/// Lays out bars, grid and axes for one draw pass.
///
/// Geometry lives in inner-area coordinates; everything here is shifted by
/// the left/top margin. Axes are skipped while the inner area is empty, so a
/// collapsed container still yields a valid empty frame.
pub(super) fn build_chart_frame(
    geometry: &BarGeometry,
    dimensions: Dimensions,
    margin: Margin,
    x_axis: &AxisConfig,
    y_axis: &AxisConfig,
) -> RenderFrame {
    let mut frame = RenderFrame::new(dimensions.outer());
    if dimensions.inner_width <= 0.0 || dimensions.inner_height <= 0.0 {
        return frame;
    }

    let left = margin.left;
    let top = margin.top;
    let inner_width = dimensions.inner_width;
    let bottom = top + dimensions.inner_height;

    let value_ticks = geometry.y_scale.ticks(y_axis.tick_count);

    if y_axis.grid_lines {
        for &tick in &value_ticks {
            let y = top + geometry.y_scale.map(tick);
            frame.lines.push(LinePrimitive::new(
                left,
                y,
                left + inner_width,
                y,
                AXIS_STROKE_PX,
                GRID_COLOR,
            ));
        }
    }
    if x_axis.grid_lines {
        for bar in &geometry.bars {
            let x = left + geometry.x_scale.band_center(bar.index);
            frame.lines.push(LinePrimitive::new(
                x,
                top,
                x,
                bottom,
                AXIS_STROKE_PX,
                GRID_COLOR,
            ));
        }
    }

    for bar in &geometry.bars {
        frame.rects.push(RectPrimitive::new(
            left + bar.x,
            top + bar.y,
            bar.width,
            bar.height,
            bar.fill,
        ));
    }

    if x_axis.show {
        frame.lines.push(LinePrimitive::new(
            left,
            bottom,
            left + inner_width,
            bottom,
            AXIS_STROKE_PX,
            AXIS_COLOR,
        ));
        let label_y = bottom + TICK_SIZE_PX + TICK_LABEL_GAP_PX + LABEL_FONT_PX;
        for bar in &geometry.bars {
            let x = left + geometry.x_scale.band_center(bar.index);
            frame.lines.push(LinePrimitive::new(
                x,
                bottom,
                x,
                bottom + TICK_SIZE_PX,
                AXIS_STROKE_PX,
                AXIS_COLOR,
            ));
            if !bar.category.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    bar.category.clone(),
                    x,
                    label_y,
                    LABEL_FONT_PX,
                    LABEL_COLOR,
                    TextHAlign::Center,
                ));
            }
        }
        if let Some(title) = &x_axis.label {
            frame.texts.push(TextPrimitive::new(
                title.clone(),
                left + inner_width / 2.0,
                dimensions.height - TICK_LABEL_GAP_PX,
                TITLE_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Center,
            ));
        }
    }

    if y_axis.show {
        frame.lines.push(LinePrimitive::new(
            left,
            top,
            left,
            bottom,
            AXIS_STROKE_PX,
            AXIS_COLOR,
        ));
        for &tick in &value_ticks {
            let y = top + geometry.y_scale.map(tick);
            frame.lines.push(LinePrimitive::new(
                left - TICK_SIZE_PX,
                y,
                left,
                y,
                AXIS_STROKE_PX,
                AXIS_COLOR,
            ));
            frame.texts.push(TextPrimitive::new(
                format_tick(tick, y_axis.precision),
                left - TICK_SIZE_PX - TICK_LABEL_GAP_PX,
                y + LABEL_FONT_PX * 0.35,
                LABEL_FONT_PX,
                LABEL_COLOR,
                TextHAlign::Right,
            ));
        }
        if let Some(title) = &y_axis.label {
            let x = TITLE_FONT_PX;
            let y = top + dimensions.inner_height / 2.0;
            frame.texts.push(
                TextPrimitive::new(
                    title.clone(),
                    x,
                    y,
                    TITLE_FONT_PX,
                    LABEL_COLOR,
                    TextHAlign::Center,
                )
                .rotated(-90.0),
            );
        }
    }

    frame
}

/// Fixed decimals when `precision` is set, otherwise the shortest form.
pub(super) fn format_tick(value: f64, precision: Option<u8>) -> String {
    if let Some(precision) = precision {
        return format!("{value:.*}", usize::from(precision));
    }
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::format_tick;

    #[test]
    fn tick_labels_drop_trailing_zeros() {
        assert_eq!(format_tick(30.0, None), "30");
        assert_eq!(format_tick(0.25, None), "0.25");
        assert_eq!(format_tick(0.1 + 0.2, None), "0.3");
        assert_eq!(format_tick(5.0, Some(2)), "5.00");
    }
}
