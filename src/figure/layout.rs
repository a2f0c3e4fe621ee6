use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::core::{LinearScale, PixelRect, nice_ticks, tick_precision};
use crate::error::ChartResult;
use crate::render::{
    Color, DrawCommand, LegendEntry, LegendGlyph, LinePrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive, TextVAlign,
};

use super::{Axes, AxesConfig, LegendLocation, Tick};

pub const POINTS_PER_INCH: f64 = 72.0;

const SPINE_WIDTH_PT: f64 = 0.8;
const TICK_LENGTH_PT: f64 = 3.5;
const TICK_PAD_PT: f64 = 3.5;
const LABEL_PAD_PT: f64 = 4.0;
const LEGEND_BORDER_PAD_PT: f64 = 6.0;
// Rough advance of one glyph relative to the font size.
const GLYPH_ASPECT: f64 = 0.6;
const MINUS_SIGN: char = '\u{2212}';

/// Emits the primitives of one axes into `frame`, in paint order: face,
/// recorded commands, spines, ticks, axis labels, legend.
pub(super) fn layout_axes(
    axes: &Axes,
    rect: PixelRect,
    px_per_pt: f64,
    frame: &mut RenderFrame,
) -> ChartResult<()> {
    let config = &axes.config;
    let (x_min, x_max, y_min, y_max) = resolve_limits(axes);
    let x_scale = LinearScale::new(x_min, x_max, rect.x, rect.right())?;
    let y_scale = LinearScale::new(y_min, y_max, rect.bottom(), rect.y)?;
    trace!(x_min, x_max, y_min, y_max, ?rect, "axes limits");

    frame.push_rect(RectPrimitive::new(
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        Color::WHITE,
    ));

    let mut legend: IndexMap<String, LegendEntry> = IndexMap::new();
    for command in axes.canvas.commands() {
        match command {
            DrawCommand::Line(line) => {
                frame.push_line(
                    LinePrimitive::new(
                        x_scale.domain_to_pixel(line.x1)?,
                        y_scale.domain_to_pixel(line.y1)?,
                        x_scale.domain_to_pixel(line.x2)?,
                        y_scale.domain_to_pixel(line.y2)?,
                        line.width * px_per_pt,
                        line.color,
                    )
                    .with_stroke_style(line.style),
                );
            }
            DrawCommand::HorizontalRule(rule) => {
                let y = y_scale.domain_to_pixel(rule.y)?;
                frame.push_line(
                    LinePrimitive::new(rect.x, y, rect.right(), y, rule.width * px_per_pt, rule.color)
                        .with_stroke_style(rule.style),
                );
            }
            DrawCommand::Bar(bar) => {
                let left = x_scale.domain_to_pixel(bar.x_left())?;
                let right = x_scale.domain_to_pixel(bar.x_right())?;
                let base = y_scale.domain_to_pixel(0.0)?;
                let end = y_scale.domain_to_pixel(bar.height)?;
                frame.push_rect(RectPrimitive::new(
                    left.min(right),
                    base.min(end),
                    (right - left).abs(),
                    (end - base).abs(),
                    bar.color,
                ));
            }
            DrawCommand::Label(label) => {
                let x = x_scale.domain_to_pixel(label.x)?;
                let y = y_scale.domain_to_pixel(label.y)?;
                let offset = label.padding * px_per_pt;
                let (y, v_align) = if label.hangs_below() {
                    (y + offset, TextVAlign::Top)
                } else {
                    (y - offset, TextVAlign::Bottom)
                };
                frame.push_text(TextPrimitive::new(
                    label.text.clone(),
                    x,
                    y,
                    config.annotation_font_size * px_per_pt,
                    label.color,
                    TextHAlign::Center,
                    v_align,
                ));
            }
            DrawCommand::Legend(entry) => {
                if entry.label.is_empty() || entry.label.starts_with('_') {
                    continue;
                }
                if legend.contains_key(&entry.label) {
                    warn!(label = %entry.label, "duplicate legend label, keeping first entry");
                    continue;
                }
                legend.insert(entry.label.clone(), entry.clone());
            }
        }
    }

    push_spines(rect, px_per_pt, frame);
    let y_tick_width = push_ticks(config, rect, x_scale, y_scale, px_per_pt, frame)?;
    push_axis_labels(config, rect, y_tick_width, px_per_pt, frame);
    if let Some(location) = config.legend {
        push_legend(&legend, location, config.legend_font_size, rect, px_per_pt, frame);
    }
    Ok(())
}

fn resolve_limits(axes: &Axes) -> (f64, f64, f64, f64) {
    let bounds = axes.canvas.data_bounds();
    let margin = axes.config.margin;
    let (x_min, x_max) = axes
        .config
        .x_limits
        .map(|[low, high]| (low, high))
        .unwrap_or_else(|| padded(bounds.x_range(), margin));
    let (y_min, y_max) = axes
        .config
        .y_limits
        .map(|[low, high]| (low, high))
        .unwrap_or_else(|| padded(bounds.y_range(), margin));
    (x_min, x_max, y_min, y_max)
}

fn padded(range: Option<(f64, f64)>, margin: f64) -> (f64, f64) {
    match range {
        None => (0.0, 1.0),
        Some((low, high)) if high - low <= f64::EPSILON * low.abs().max(1.0) => {
            (low - 0.5, high + 0.5)
        }
        Some((low, high)) => {
            let pad = (high - low) * margin;
            (low - pad, high + pad)
        }
    }
}

fn push_spines(rect: PixelRect, px_per_pt: f64, frame: &mut RenderFrame) {
    let width = SPINE_WIDTH_PT * px_per_pt;
    let corners = [
        (rect.x, rect.y, rect.right(), rect.y),
        (rect.x, rect.bottom(), rect.right(), rect.bottom()),
        (rect.x, rect.y, rect.x, rect.bottom()),
        (rect.right(), rect.y, rect.right(), rect.bottom()),
    ];
    for (x1, y1, x2, y2) in corners {
        frame.push_line(LinePrimitive::new(x1, y1, x2, y2, width, Color::BLACK));
    }
}

/// Emits tick marks and tick labels; returns the estimated width of the
/// widest y tick label in pixels.
fn push_ticks(
    config: &AxesConfig,
    rect: PixelRect,
    x_scale: LinearScale,
    y_scale: LinearScale,
    px_per_pt: f64,
    frame: &mut RenderFrame,
) -> ChartResult<f64> {
    let tick_len = TICK_LENGTH_PT * px_per_pt;
    let pad = TICK_PAD_PT * px_per_pt;
    let font_px = config.tick_font_size * px_per_pt;
    let tick_width = SPINE_WIDTH_PT * px_per_pt;

    let (x_min, x_max) = x_scale.domain();
    let x_ticks = match &config.x_ticks {
        Some(ticks) => ticks.clone(),
        None => auto_ticks(x_min, x_max, config.x_bins)?,
    };
    for tick in x_ticks.iter().filter(|tick| within(tick.position, x_min, x_max)) {
        let x = x_scale.domain_to_pixel(tick.position)?;
        frame.push_line(LinePrimitive::new(
            x,
            rect.bottom(),
            x,
            rect.bottom() + tick_len,
            tick_width,
            Color::BLACK,
        ));
        if !tick.label.is_empty() {
            frame.push_text(TextPrimitive::new(
                tick.label.clone(),
                x,
                rect.bottom() + tick_len + pad,
                font_px,
                Color::BLACK,
                TextHAlign::Center,
                TextVAlign::Top,
            ));
        }
    }

    let (y_min, y_max) = y_scale.domain();
    let mut widest = 0.0f64;
    for tick in auto_ticks(y_min, y_max, config.y_bins)?
        .iter()
        .filter(|tick| within(tick.position, y_min, y_max))
    {
        let y = y_scale.domain_to_pixel(tick.position)?;
        frame.push_line(LinePrimitive::new(
            rect.x - tick_len,
            y,
            rect.x,
            y,
            tick_width,
            Color::BLACK,
        ));
        widest = widest.max(estimate_text_width(&tick.label, font_px));
        frame.push_text(TextPrimitive::new(
            tick.label.clone(),
            rect.x - tick_len - pad,
            y,
            font_px,
            Color::BLACK,
            TextHAlign::Right,
            TextVAlign::Middle,
        ));
    }

    Ok(widest)
}

fn push_axis_labels(
    config: &AxesConfig,
    rect: PixelRect,
    y_tick_width: f64,
    px_per_pt: f64,
    frame: &mut RenderFrame,
) {
    let font_px = config.label_font_size * px_per_pt;
    let tick_space = (TICK_LENGTH_PT + TICK_PAD_PT + LABEL_PAD_PT) * px_per_pt;

    if let Some(label) = config.x_label.as_deref().filter(|label| !label.is_empty()) {
        let tick_text = config.tick_font_size * px_per_pt * 1.2;
        frame.push_text(TextPrimitive::new(
            label,
            rect.x + rect.width / 2.0,
            rect.bottom() + tick_space + tick_text,
            font_px,
            Color::BLACK,
            TextHAlign::Center,
            TextVAlign::Top,
        ));
    }
    if let Some(label) = config.y_label.as_deref().filter(|label| !label.is_empty()) {
        frame.push_text(
            TextPrimitive::new(
                label,
                rect.x - tick_space - y_tick_width,
                rect.y + rect.height / 2.0,
                font_px,
                Color::BLACK,
                TextHAlign::Center,
                TextVAlign::Bottom,
            )
            .rotated(90.0),
        );
    }
}

fn push_legend(
    entries: &IndexMap<String, LegendEntry>,
    location: LegendLocation,
    font_size: f64,
    rect: PixelRect,
    px_per_pt: f64,
    frame: &mut RenderFrame,
) {
    if entries.is_empty() {
        return;
    }
    let font_px = font_size * px_per_pt;
    let border = LEGEND_BORDER_PAD_PT * px_per_pt;
    let row_height = font_px * 1.4;
    let glyph_width = font_px * 2.0;
    let text_gap = font_px * 0.8;
    let widest_label = entries
        .keys()
        .map(|label| estimate_text_width(label, font_px))
        .fold(0.0, f64::max);
    let block_width = glyph_width + text_gap + widest_label;
    let block_height = row_height * entries.len() as f64;

    let left = match location {
        LegendLocation::LowerLeft | LegendLocation::UpperLeft => rect.x + border,
        LegendLocation::LowerRight | LegendLocation::UpperRight => {
            rect.right() - border - block_width
        }
    };
    let top = match location {
        LegendLocation::UpperLeft | LegendLocation::UpperRight => rect.y + border,
        LegendLocation::LowerLeft | LegendLocation::LowerRight => {
            rect.bottom() - border - block_height
        }
    };

    for (row, entry) in entries.values().enumerate() {
        let center_y = top + row_height * (row as f64 + 0.5);
        match entry.glyph {
            LegendGlyph::Line { width, style } => frame.push_line(
                LinePrimitive::new(
                    left,
                    center_y,
                    left + glyph_width,
                    center_y,
                    width * px_per_pt,
                    entry.color,
                )
                .with_stroke_style(style),
            ),
            LegendGlyph::Patch => frame.push_rect(RectPrimitive::new(
                left,
                center_y - font_px * 0.35,
                glyph_width,
                font_px * 0.7,
                entry.color,
            )),
        }
        frame.push_text(TextPrimitive::new(
            entry.label.clone(),
            left + glyph_width + text_gap,
            center_y,
            font_px,
            Color::BLACK,
            TextHAlign::Left,
            TextVAlign::Middle,
        ));
    }
}

fn auto_ticks(min: f64, max: f64, bins: usize) -> ChartResult<Vec<Tick>> {
    let values = nice_ticks(min, max, bins)?;
    let step = match values.as_slice() {
        [first, second, ..] => second - first,
        _ => max - min,
    };
    let precision = tick_precision(step);
    Ok(values
        .into_iter()
        .map(|value| Tick::new(value, format_tick(value, precision)))
        .collect())
}

fn format_tick(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().any(|ch| matches!(ch, '1'..='9')) => {
            format!("{MINUS_SIGN}{magnitude}")
        }
        Some(magnitude) => magnitude.to_owned(),
        None => text,
    }
}

fn within(value: f64, min: f64, max: f64) -> bool {
    let slack = (max - min).abs() * 1e-9;
    value >= min - slack && value <= max + slack
}

fn estimate_text_width(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * GLYPH_ASPECT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_tick_labels_use_unicode_minus() {
        assert_eq!(format_tick(-1.5, 1), "\u{2212}1.5");
        assert_eq!(format_tick(-0.0, 1), "0.0");
        assert_eq!(format_tick(2.0, 0), "2");
    }

    #[test]
    fn degenerate_range_expands_by_half_unit() {
        assert_eq!(padded(Some((0.0, 0.0)), 0.05), (-0.5, 0.5));
        assert_eq!(padded(None, 0.05), (0.0, 1.0));
    }
}
