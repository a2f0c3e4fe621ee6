use rxn_coords::api::{DeltaBarOptions, StepDiagramOptions, render_delta_bars, render_step_diagram};
use rxn_coords::core::Viewport;
use rxn_coords::figure::reaction::{SAMPLE_ENERGIES, transition_ticks};
use rxn_coords::figure::{
    AxesConfig, Figure, FigureConfig, LegendLocation, ReactionFigureJob, delta_bar_figure,
    step_figure, step_with_inset_figure,
};
use rxn_coords::render::{
    Color, FramePrimitive, LineStrokeStyle, NullRenderer, Renderer, TextVAlign,
};

fn small_figure() -> Figure {
    Figure::new(FigureConfig::new(4.0, 3.0, 72.0)).expect("figure")
}

#[test]
fn viewport_follows_inches_times_dpi() {
    let figure = Figure::new(FigureConfig::new(8.0, 6.0, 300.0)).expect("figure");
    assert_eq!(figure.viewport(), Viewport::new(2400, 1800));
    assert!(Figure::new(FigureConfig::new(0.0, 6.0, 300.0)).is_err());
}

#[test]
fn step_lines_map_into_axes_rect_with_point_widths() {
    let mut figure = small_figure();
    let axes = figure
        .add_axes([0.1, 0.1, 0.8, 0.8], AxesConfig::default())
        .expect("axes");
    render_step_diagram(
        figure.canvas(axes).expect("canvas"),
        &[0.0, 1.0],
        &StepDiagramOptions::new(Color::RED, "path"),
    )
    .expect("render");

    let rect = figure.axes_rect(axes).expect("rect");
    let frame = figure.layout().expect("layout");
    let red: Vec<_> = frame.lines().filter(|line| line.color == Color::RED).collect();
    assert_eq!(red.len(), 3);
    for line in &red {
        for (x, y) in [(line.x1, line.y1), (line.x2, line.y2)] {
            assert!(x >= rect.x - 1e-9 && x <= rect.right() + 1e-9);
            assert!(y >= rect.y - 1e-9 && y <= rect.bottom() + 1e-9);
        }
        // 72 dpi: one point is one pixel.
        assert!((line.stroke_width - 2.0).abs() <= 1e-12);
    }
    assert_eq!(red[1].stroke_style, LineStrokeStyle::Dotted);
    // Higher energy sits higher on the page.
    assert!(red[2].y1 < red[0].y1);
}

#[test]
fn bars_become_rects_anchored_at_zero_baseline() {
    let mut figure = small_figure();
    let axes = figure.add_subplot(AxesConfig::default()).expect("axes");
    render_delta_bars(
        figure.canvas(axes).expect("canvas"),
        &[0.0, 1.0, 0.5],
        &DeltaBarOptions::new(Color::RED, "d").without_zero_line(),
    )
    .expect("render");

    let frame = figure.layout().expect("layout");
    let bars: Vec<_> = frame
        .rects()
        .filter(|rect| rect.fill_color == Color::RED)
        .collect();
    assert_eq!(bars.len(), 2);
    let positive_bottom = bars[0].y + bars[0].height;
    let negative_top = bars[1].y;
    assert!((positive_bottom - negative_top).abs() <= 1e-9);
    assert!(bars[0].height > bars[1].height);
}

#[test]
fn zero_rule_spans_full_axes_width() {
    let mut figure = small_figure();
    let axes = figure.add_subplot(AxesConfig::default()).expect("axes");
    render_delta_bars(
        figure.canvas(axes).expect("canvas"),
        &[2.0, 1.0, 3.0],
        &DeltaBarOptions::new(Color::RED, "d"),
    )
    .expect("render");

    let rect = figure.axes_rect(axes).expect("rect");
    let frame = figure.layout().expect("layout");
    let rule = frame
        .lines()
        .find(|line| line.stroke_style == LineStrokeStyle::Dotted)
        .expect("zero rule");
    assert!((rule.x1 - rect.x).abs() <= 1e-9);
    assert!((rule.x2 - rect.right()).abs() <= 1e-9);
    assert!((rule.y1 - rule.y2).abs() <= 1e-12);
}

#[test]
fn annotations_sit_above_positive_and_below_negative_bars() {
    let mut figure = small_figure();
    let config = AxesConfig {
        y_limits: Some([-2.0, 2.0]),
        ..AxesConfig::default()
    };
    let axes = figure.add_subplot(config).expect("axes");
    render_delta_bars(
        figure.canvas(axes).expect("canvas"),
        &[0.0, 1.0, 0.0],
        &DeltaBarOptions::new(Color::RED, "d")
            .with_annotations(Default::default(), 4.0)
            .without_zero_line(),
    )
    .expect("render");

    let frame = figure.layout().expect("layout");
    let labels: Vec<_> = frame
        .texts()
        .filter(|text| text.text == "1.00" || text.text == "-1.00")
        .collect();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].v_align, TextVAlign::Bottom);
    assert_eq!(labels[1].v_align, TextVAlign::Top);
}

#[test]
fn legend_lists_each_label_once() {
    let mut figure = small_figure();
    let axes = figure
        .add_subplot(AxesConfig::default().with_legend(LegendLocation::UpperRight, 10.0))
        .expect("axes");
    let canvas = figure.canvas(axes).expect("canvas");
    let options = StepDiagramOptions::new(Color::RED, "B3LYP");
    render_step_diagram(&mut *canvas, &[0.0, 1.0], &options).expect("first");
    render_step_diagram(&mut *canvas, &[0.5, 0.2], &options).expect("second");
    render_step_diagram(
        &mut *canvas,
        &[0.1, 0.3],
        &StepDiagramOptions::new(Color::BLACK, ""),
    )
    .expect("unlabeled");

    let frame = figure.layout().expect("layout");
    let legend_texts = frame.texts().filter(|text| text.text == "B3LYP").count();
    assert_eq!(legend_texts, 1);
}

#[test]
fn inset_is_painted_inside_parent_after_it() {
    let job = ReactionFigureJob::default();
    let figure = step_with_inset_figure(&job).expect("figure");
    let frame = figure.layout().expect("layout");

    let faces: Vec<usize> = frame
        .primitives
        .iter()
        .enumerate()
        .filter_map(|(index, primitive)| match primitive {
            FramePrimitive::Rect(rect) if rect.fill_color == Color::WHITE => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(faces.len(), 2);
    assert!(faces[0] < faces[1]);

    let (FramePrimitive::Rect(outer), FramePrimitive::Rect(inner)) =
        (&frame.primitives[faces[0]], &frame.primitives[faces[1]])
    else {
        panic!("faces must be rects");
    };
    assert!(inner.x > outer.x && inner.x + inner.width < outer.x + outer.width);
    assert!(inner.y > outer.y && inner.y + inner.height < outer.y + outer.height);
}

#[test]
fn stock_figures_render_through_null_renderer() {
    let job = ReactionFigureJob::default();
    for build in [delta_bar_figure, step_figure, step_with_inset_figure] {
        let figure = build(&job).expect("figure");
        let mut renderer = NullRenderer::default();
        let frame = figure.render(&mut renderer).expect("render");
        assert_eq!(frame.viewport, Viewport::new(2400, 1800));
        assert_eq!(renderer.frames_rendered, 1);
        assert!(renderer.last_line_count > 0);
        assert!(renderer.last_text_count > 0);
        renderer.render(&frame).expect("re-render");
    }
}

#[test]
fn delta_figure_labels_transitions() {
    let figure = delta_bar_figure(&ReactionFigureJob::default()).expect("figure");
    let frame = figure.layout().expect("layout");
    for tick in transition_ticks(SAMPLE_ENERGIES.len()) {
        assert!(frame.texts().any(|text| text.text == tick.label), "missing {}", tick.label);
    }
    assert!(frame.texts().any(|text| text.text == "-0.90"));
}

#[test]
fn job_json_overrides_defaults() {
    let job = ReactionFigureJob::from_json(
        r#"{ "schema_version": 1, "energies": [0.0, -0.4, 0.3], "color": "b", "energy_unit": "kcal/mol" }"#,
    )
    .expect("job");
    assert_eq!(job.energies, vec![0.0, -0.4, 0.3]);
    assert_eq!(job.label, "Dummy Data");

    let figure = step_figure(&job).expect("figure");
    let frame = figure.layout().expect("layout");
    assert!(frame.texts().any(|text| text.text == "E (kcal/mol)"));

    assert!(ReactionFigureJob::from_json(r#"{ "schema_version": 2 }"#).is_err());
    let empty = ReactionFigureJob::from_json(r#"{ "energies": [] }"#).expect("parses");
    assert!(step_figure(&empty).is_err());
}

#[test]
fn unknown_axes_and_bad_bounds_are_rejected() {
    let mut figure = small_figure();
    assert!(figure.add_axes([0.1, 0.1, 0.0, 0.5], AxesConfig::default()).is_err());
    let axes = figure.add_subplot(AxesConfig::default()).expect("axes");
    assert!(
        figure
            .add_inset(axes, [0.5, 0.5, 0.4, f64::NAN], AxesConfig::default())
            .is_err()
    );
    let bad = AxesConfig {
        y_bins: 0,
        ..AxesConfig::default()
    };
    assert!(figure.add_subplot(bad).is_err());
}
