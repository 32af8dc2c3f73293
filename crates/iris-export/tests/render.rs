use iris_export::dxf::to_dxf_string;
use iris_export::svg::svg_document;
use iris_export::{DEFAULT_MARGIN, Drawing, Entity, ExportError, Layout};
use iris_mechanism::{
    IrisConfiguration, IrisParams, TabSize, actuator_ring, base_plate, compute_iris_geometry,
};

fn config() -> IrisConfiguration {
    IrisConfiguration::new(IrisParams {
        blade_count: 10,
        blade_radius: 48.0,
        subtended_angle: 0.6,
        blade_width: 5.0,
        pin_diameter: 3.0,
        clearance: 0.5,
        pinned_radius: 50.0,
        min_actuator_angle: 0.0,
        max_actuator_angle: 1.0,
    })
    .unwrap()
}

fn extract_path(svg: &str) -> &str {
    let needle = "<path d=\"";
    let start = svg
        .find(needle)
        .map(|idx| idx + needle.len())
        .expect("missing path");
    let rest = &svg[start..];
    let end = rest.find('"').expect("missing path end");
    &rest[..end]
}

fn count_command(path: &str, cmd: &str) -> usize {
    path.split_whitespace().filter(|tok| *tok == cmd).count()
}

fn numbers_after(path: &str, cmd: &str) -> Vec<Vec<f64>> {
    let tokens: Vec<&str> = path.split_whitespace().collect();
    let arity = match cmd {
        "M" | "L" => 2,
        "A" => 7,
        _ => 0,
    };
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| **t == cmd)
        .map(|(i, _)| {
            tokens[i + 1..=i + arity]
                .iter()
                .map(|t| t.parse::<f64>().unwrap())
                .collect()
        })
        .collect()
}

#[test]
fn fitted_iris_stays_inside_viewport() {
    let geometry = compute_iris_geometry(&config(), 0.5).unwrap();
    let drawing = Drawing::iris(&geometry);
    let layout = Layout::fit(400.0, 300.0, drawing.extent_radius(), DEFAULT_MARGIN).unwrap();
    let svg = svg_document(&layout.apply_drawing(&drawing), 400.0, 300.0).unwrap();

    assert!(svg.starts_with("<svg width=\"400mm\" height=\"300mm\" viewBox=\"0 0 400 300\""));
    let path = extract_path(&svg);
    // Four outline arcs per blade, two half-arcs per hole.
    assert_eq!(count_command(path, "A"), 10 * (4 + 2 * 2));

    for m in numbers_after(path, "M") {
        assert!(m[0] > 0.0 && m[0] < 400.0, "x {} outside", m[0]);
        assert!(m[1] > 0.0 && m[1] < 300.0, "y {} outside", m[1]);
    }
}

#[test]
fn svg_arcs_are_minor_with_positive_sweep() {
    let geometry = compute_iris_geometry(&config(), 0.0).unwrap();
    let svg = svg_document(&Drawing::iris(&geometry), 200.0, 200.0).unwrap();
    for a in numbers_after(extract_path(&svg), "A") {
        assert_eq!(a[3], 0.0, "large-arc flag");
        assert_eq!(a[4], 1.0, "sweep flag");
    }
}

#[test]
fn every_part_exports_to_dxf() {
    let cfg = config();
    let geometry = compute_iris_geometry(&cfg, cfg.min_actuator_angle()).unwrap();

    let blade = to_dxf_string(&Drawing::blade_profile(&geometry.blades[0]).unwrap()).unwrap();
    assert_eq!(blade.matches("\nLWPOLYLINE\n").count(), 1);
    assert_eq!(blade.matches("\nCIRCLE\n").count(), 2);

    let base = to_dxf_string(&Drawing::plate(&base_plate(&cfg, 0.0, None).unwrap())).unwrap();
    assert_eq!(base.matches("\nCIRCLE\n").count(), 2 + 10);
    assert_eq!(base.matches("\nLINE\n").count(), 0);

    let tab = Some(TabSize::for_config(&cfg));
    let ring = to_dxf_string(&Drawing::plate(&actuator_ring(&cfg, 0.0, tab).unwrap())).unwrap();
    // Ten slots plus the open rim around the tab.
    assert_eq!(ring.matches("\nLWPOLYLINE\n").count(), 10 + 1);
    assert_eq!(ring.matches("\nLINE\n").count(), 2);
    assert_eq!(ring.matches("\nARC\n").count(), 1);
    assert_eq!(ring.matches("\nCIRCLE\n").count(), 1);
    assert!(ring.ends_with("0\nEOF\n"));
}

#[test]
fn tabbed_ring_rim_is_a_large_arc_in_svg() {
    let cfg = config();
    let ring = actuator_ring(&cfg, 0.0, Some(TabSize::for_config(&cfg))).unwrap();
    let drawing = Drawing::plate(&ring);
    let layout = Layout::fit(300.0, 300.0, drawing.extent_radius(), DEFAULT_MARGIN).unwrap();
    let svg = svg_document(&layout.apply_drawing(&drawing), 300.0, 300.0).unwrap();
    let path = extract_path(&svg);

    let large: Vec<Vec<f64>> = numbers_after(path, "A")
        .into_iter()
        .filter(|a| a[3] == 1.0)
        .collect();
    assert_eq!(large.len(), 1, "only the rim sweeps past 180 degrees");
    assert_eq!(large[0][4], 1.0);
    assert!(count_command(path, "L") >= 2);
}

#[test]
fn svg_rejects_bad_input() {
    let mut drawing = Drawing::new();
    assert_eq!(svg_document(&drawing, 10.0, 10.0), Err(ExportError::Empty));

    drawing.push(Entity::Line {
        start: iris_geometry::Point2::ORIGIN,
        end: iris_geometry::Point2::new(1.0, 1.0),
    });
    assert!(matches!(
        svg_document(&drawing, 0.0, 10.0),
        Err(ExportError::InvalidViewport { .. })
    ));
    assert!(svg_document(&drawing, 10.0, 10.0).is_ok());
}
