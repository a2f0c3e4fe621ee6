use approx::assert_abs_diff_eq;
use rxn_coords::api::{DeltaBarOptions, LabelFormat, render_delta_bars};
use rxn_coords::error::ChartError;
use rxn_coords::render::{Color, DrawCommand, LegendGlyph, LineStrokeStyle, RecordingCanvas};

const PATHWAY: [f64; 7] = [6.0, 5.5, 5.7, 5.0, 4.3, 3.4, 3.0];

fn red_options() -> DeltaBarOptions {
    DeltaBarOptions::new(Color::RED, "Dummy Data")
}

#[test]
fn bar_heights_are_consecutive_differences() {
    let mut canvas = RecordingCanvas::new();
    render_delta_bars(&mut canvas, &PATHWAY, &red_options()).expect("render");

    let heights: Vec<f64> = canvas.bars().map(|bar| bar.height).collect();
    let expected = [-0.5, 0.2, -0.7, -0.7, -0.9, -0.4];
    assert_eq!(heights.len(), expected.len());
    for (height, want) in heights.iter().zip(expected) {
        assert_abs_diff_eq!(*height, want, epsilon = 1e-12);
    }
}

#[test]
fn bars_sit_on_destination_steps_with_default_width() {
    let mut canvas = RecordingCanvas::new();
    render_delta_bars(&mut canvas, &PATHWAY, &red_options()).expect("render");

    let centers: Vec<f64> = canvas.bars().map(|bar| bar.x_center).collect();
    assert_eq!(centers, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert!(canvas.bars().all(|bar| bar.width == 0.25));
    assert!(canvas.bars().all(|bar| bar.color == Color::RED));
}

#[test]
fn shift_offsets_bars_by_multiples_of_width() {
    let mut left = RecordingCanvas::new();
    let mut right = RecordingCanvas::new();
    let base = red_options().with_bar_width(0.4);
    render_delta_bars(&mut left, &PATHWAY, &base.clone().with_shift(-0.5)).expect("left");
    render_delta_bars(&mut right, &PATHWAY, &base.with_shift(0.5)).expect("right");

    for (index, (l, r)) in left.bars().zip(right.bars()).enumerate() {
        let step = (index + 2) as f64;
        assert_abs_diff_eq!(l.x_center, step - 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(r.x_center, step + 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(l.x_right(), r.x_left(), epsilon = 1e-12);
    }
}

#[test]
fn annotations_use_format_and_padding() {
    let mut canvas = RecordingCanvas::new();
    let options = red_options().with_annotations(LabelFormat::default(), 5.0);
    render_delta_bars(&mut canvas, &PATHWAY, &options).expect("render");

    let texts: Vec<&str> = canvas.labels().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, ["-0.50", "0.20", "-0.70", "-0.70", "-0.90", "-0.40"]);
    assert!(canvas.labels().all(|label| label.padding == 5.0));

    let first = canvas.labels().next().expect("label");
    assert!(first.hangs_below());
    let second = canvas.labels().nth(1).expect("label");
    assert!(!second.hangs_below());
}

#[test]
fn custom_label_format_is_applied() {
    let mut canvas = RecordingCanvas::new();
    let format: LabelFormat = "%+.1f eV".parse().expect("format");
    let options = red_options().with_annotations(format, 3.0);
    render_delta_bars(&mut canvas, &[1.0, 1.3, 0.0], &options).expect("render");

    let texts: Vec<&str> = canvas.labels().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, ["+0.3 eV", "-1.3 eV"]);
}

#[test]
fn annotations_are_off_by_default() {
    let mut canvas = RecordingCanvas::new();
    render_delta_bars(&mut canvas, &PATHWAY, &red_options()).expect("render");
    assert_eq!(canvas.labels().count(), 0);
}

#[test]
fn zero_rule_uses_configured_style() {
    let mut canvas = RecordingCanvas::new();
    let options = red_options().with_zero_line(1.5, LineStrokeStyle::Dashed);
    render_delta_bars(&mut canvas, &PATHWAY, &options).expect("render");

    let rules: Vec<_> = canvas.horizontal_rules().collect();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].y, 0.0);
    assert_eq!(rules[0].width, 1.5);
    assert_eq!(rules[0].style, LineStrokeStyle::Dashed);
    assert_eq!(rules[0].color, Color::BLACK);
}

#[test]
fn default_zero_rule_is_thin_and_dotted() {
    let mut canvas = RecordingCanvas::new();
    render_delta_bars(&mut canvas, &PATHWAY, &red_options()).expect("render");

    let rule = canvas.horizontal_rules().next().expect("zero rule");
    assert_eq!(rule.width, 1.0);
    assert_eq!(rule.style, LineStrokeStyle::Dotted);
}

#[test]
fn zero_rule_can_be_disabled() {
    let mut canvas = RecordingCanvas::new();
    render_delta_bars(&mut canvas, &PATHWAY, &red_options().without_zero_line())
        .expect("render");
    assert_eq!(canvas.horizontal_rules().count(), 0);
}

#[test]
fn single_step_draws_no_bars_but_keeps_zero_rule() {
    let mut canvas = RecordingCanvas::new();
    let options = red_options().with_annotations(LabelFormat::default(), 3.0);
    render_delta_bars(&mut canvas, &[3.0], &options).expect("single step is valid");

    assert_eq!(canvas.bars().count(), 0);
    assert_eq!(canvas.labels().count(), 0);
    assert_eq!(canvas.horizontal_rules().count(), 1);
}

#[test]
fn emission_order_is_legend_bars_labels_rule() {
    let mut canvas = RecordingCanvas::new();
    let options = red_options().with_annotations(LabelFormat::default(), 3.0);
    render_delta_bars(&mut canvas, &[1.0, 2.0, 4.0], &options).expect("render");

    let kinds: Vec<&str> = canvas
        .commands()
        .iter()
        .map(|command| match command {
            DrawCommand::Legend(_) => "legend",
            DrawCommand::Bar(_) => "bar",
            DrawCommand::Label(_) => "label",
            DrawCommand::HorizontalRule(_) => "rule",
            DrawCommand::Line(_) => "line",
        })
        .collect();
    assert_eq!(kinds, ["legend", "bar", "bar", "label", "label", "rule"]);

    let entry = canvas.legend_entries().next().expect("legend");
    assert_eq!(entry.glyph, LegendGlyph::Patch);
    assert_eq!(entry.label, "Dummy Data");
}

#[test]
fn invalid_inputs_and_options_fail() {
    let mut canvas = RecordingCanvas::new();
    let err = render_delta_bars(&mut canvas, &[1.0, f64::NAN], &red_options())
        .expect_err("nan energy");
    assert!(matches!(err, ChartError::NonFiniteEnergy { index: 1, .. }));

    let err = render_delta_bars(&mut canvas, &PATHWAY, &red_options().with_bar_width(-1.0))
        .expect_err("negative width");
    assert!(matches!(
        err,
        ChartError::InvalidOption {
            name: "bar_width",
            ..
        }
    ));

    let err = render_delta_bars(&mut canvas, &PATHWAY, &red_options().with_shift(f64::NAN))
        .expect_err("nan shift");
    assert!(matches!(err, ChartError::InvalidOption { name: "shift", .. }));
    assert!(canvas.is_empty());
}

#[test]
fn options_deserialize_with_defaults_and_string_styles() {
    let options: DeltaBarOptions = serde_json::from_str(
        r#"{ "color": "tab:blue", "label": "PBE", "zero_line_style": "--", "label_format": "%.3f" }"#,
    )
    .expect("options json");

    assert_eq!(options.label, "PBE");
    assert_eq!(options.bar_width, 0.25);
    assert_eq!(options.zero_line_style, LineStrokeStyle::Dashed);
    assert_eq!(options.label_format.format(0.1234), "0.123");
    assert!(options.draw_zero_line);

    let bad = serde_json::from_str::<DeltaBarOptions>(r#"{ "label_format": "%s" }"#);
    assert!(bad.is_err());
}

#[test]
fn overflowing_difference_fails_before_any_output() {
    let mut canvas = RecordingCanvas::new();
    let err = render_delta_bars(&mut canvas, &[f64::MAX, -f64::MAX], &red_options())
        .expect_err("difference overflows");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(canvas.is_empty());
}
