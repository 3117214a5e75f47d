use super::*;

#[test]
fn style_ids_round_trip_through_from_str() {
    assert_eq!(Style::ALL.len(), 19);
    for style in Style::ALL {
        assert_eq!(style.as_str().parse::<Style>().unwrap(), style);
        assert_eq!(StyleParams::default_for(style).style(), style);
    }
    assert!(matches!(
        "watercolor".parse::<Style>(),
        Err(SketchError::Validation(_))
    ));
}

#[test]
fn absent_values_take_documented_defaults() {
    let s = StyleSettings::from_json(r#"{"style":"pencil"}"#).unwrap();
    assert_eq!(s.common, CommonParams::default());
    assert_eq!(s.params, StyleParams::Pencil(PencilParams { pencil_hardness: 3.0 }));

    let s = StyleSettings::from_json(r#"{"style":"crosshatch","crosshatchDensity":80}"#).unwrap();
    let StyleParams::Crosshatch(p) = s.params else {
        panic!("expected crosshatch, got {:?}", s.params);
    };
    assert_eq!(p.crosshatch_angle, 45.0);
    assert_eq!(p.crosshatch_density, 80.0);
}

#[test]
fn flat_json_record_parses() {
    let json = r#"{"style":"pencil","lineStrength":70,"detail":40,"shading":0,"pencilHardness":1}"#;
    let s = StyleSettings::from_json(json).unwrap();
    assert_eq!(s.style(), Style::Pencil);
    assert_eq!(s.common.line_strength, 70.0);
    assert_eq!(s.common.detail, 40.0);
    assert_eq!(s.common.shading, 0.0);
    assert_eq!(s.params, StyleParams::Pencil(PencilParams { pencil_hardness: 1.0 }));

    let back = StyleSettings::from_json(&s.to_json().unwrap()).unwrap();
    assert_eq!(back, s);
}

#[test]
fn serialized_record_is_flat_camel_case() {
    let json = StyleSettings::new(Style::Topographic).to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["style"], "topographic");
    assert_eq!(v["lineStrength"], 50.0);
    assert_eq!(v["topographicLevels"], 8.0);
}

#[test]
fn unknown_style_is_a_validation_error() {
    let err = StyleSettings::from_json(r#"{"style":"oil"}"#).unwrap_err();
    assert!(matches!(err, SketchError::Validation(_)));
}

#[test]
fn out_of_range_values_are_clamped_on_read() {
    let common = CommonParams {
        line_strength: 500.0,
        detail: -3.0,
        shading: f64::NAN,
    };
    let c = common.clamped();
    assert_eq!(c.line_strength, 100.0);
    assert_eq!(c.detail, 1.0);
    assert_eq!(c.shading, 30.0);
    assert_eq!(common.sensitivity(), 0.01);

    let p = GeometricParams { geometric_cell_size: 1000.0 }.clamped();
    assert_eq!(p.geometric_cell_size, 40.0);
    let p = CrosshatchParams {
        crosshatch_angle: 0.0,
        crosshatch_density: 0.0,
    }
    .clamped();
    assert_eq!(p.crosshatch_angle, 15.0);
    assert_eq!(p.crosshatch_density, 1.0);
}

#[test]
fn scaled_rounds_common_parameters() {
    let s = StyleSettings::new(Style::Charcoal).scaled(0.05);
    assert_eq!(s.common.detail, 3.0);
    assert_eq!(s.common.line_strength, 3.0);
    assert_eq!(s.common.shading, 2.0);
    assert_eq!(s.style(), Style::Charcoal);

    let full = StyleSettings::new(Style::Charcoal).scaled(1.0);
    assert_eq!(full.common, CommonParams::default());
}

#[test]
fn blueprint_background_is_blue() {
    assert_eq!(Style::Blueprint.background(), Rgba::rgb(16, 60, 128));
    assert_eq!(Style::Pencil.background(), Rgba::WHITE);
}
