use approx::assert_abs_diff_eq;
use sfma::error::Error;
use sfma::io::{read_results, read_trajectories, write_results, write_trajectories};
use sfma::normalize::{AxisTransform, MeasurementArea};
use sfma::{
    analyze, extract_steady_state, KinematicSample, CameraView, ExperimentConfig, ExperimentRegistry, Sample,
    TrajectoryTable, VelocityMethod,
};
use std::f64::consts::PI;

const LENGTH: f64 = 2.5;
const RADIUS: f64 = 1.85;
const FPS: f64 = 20.0;
const SPEED: f64 = 0.5;
const PEDESTRIANS: u32 = 5;
const FRAMES: i64 = 200;

fn circumference() -> f64 {
    2.0 * LENGTH + 2.0 * PI * RADIUS
}

// planar point on the centreline at arc length `s`
fn on_centreline(s: f64) -> (f64, f64) {
    let s = s.rem_euclid(circumference());
    let turn = PI * RADIUS;

    if s < LENGTH {
        (s, 0.0)
    } else if s < LENGTH + turn {
        let a = (s - LENGTH) / RADIUS;
        (LENGTH + RADIUS * a.sin(), RADIUS - RADIUS * a.cos())
    } else if s < 2.0 * LENGTH + turn {
        (LENGTH - (s - LENGTH - turn), 2.0 * RADIUS)
    } else {
        let a = (s - 2.0 * LENGTH - turn) / RADIUS;
        (-RADIUS * a.sin(), RADIUS + RADIUS * a.cos())
    }
}

fn oval_run() -> TrajectoryTable {
    let gap = circumference() / PEDESTRIANS as f64;
    let mut samples = Vec::new();

    for id in 0..PEDESTRIANS {
        for fr in 0..FRAMES {
            let s = id as f64 * gap + SPEED * fr as f64 / FPS;
            let (x, y) = on_centreline(s);

            samples.push(Sample::new(id + 1, fr, x, y, 1.75));
        }
    }

    TrajectoryTable::new(samples).unwrap()
}

fn oval_experiment() -> ExperimentConfig {
    let json = format!(
        r#"{{ "oval": {{ "fps": {}, "length": {}, "radius": {}, "camera": "top_view" }} }}"#,
        FPS, LENGTH, RADIUS
    );

    ExperimentRegistry::from_json(&json)
        .unwrap()
        .get("oval")
        .unwrap()
        .clone()
}

#[test]
fn oval_run_end_to_end() {
    // persist and reload, positions go through the 4-decimal text format
    let mut file = Vec::new();
    write_trajectories(&mut file, &oval_run()).unwrap();
    let table = read_trajectories(file.as_slice(), Some('\t')).unwrap();
    assert_eq!(table.len(), (PEDESTRIANS as i64 * FRAMES) as usize);

    let experiment = oval_experiment();
    let c = experiment.circumference();

    for method in [VelocityMethod::Longitudinal, VelocityMethod::Planar] {
        let rows = analyze(&experiment, &table, 1.0, method).unwrap();

        // the first and last 10 frames lack a neighbour frame, laps crossing
        // the wrap point inside the window are dropped
        assert!(!rows.is_empty());
        assert!(rows.len() < PEDESTRIANS as usize * 180);
        assert!(rows.iter().all(|r| (10..190).contains(&r.frame())));

        for r in &rows {
            assert_abs_diff_eq!(r.velocity, SPEED, epsilon = 2e-3);
            assert_abs_diff_eq!(r.headway, c / PEDESTRIANS as f64, epsilon = 1e-3);
            assert_abs_diff_eq!(r.rho, PEDESTRIANS as f64 / c, epsilon = 1e-3);
            assert_abs_diff_eq!(r.sample.y, 0.0, epsilon = 1e-3);
            assert!(r.sample.x >= 0.0 && r.sample.x < c + 1e-3);
        }

        let steady = extract_steady_state(&rows, 50, 150);
        assert!(steady.iter().all(|r| r.frame() > 50 && r.frame() < 150));
        assert_eq!(extract_steady_state(&steady, 50, 150), steady);

        let mut out = Vec::new();
        write_results(&mut out, &steady).unwrap();
        let back = read_results(out.as_slice()).unwrap();
        assert_eq!(back.len(), steady.len());
    }
}

#[test]
fn every_pedestrian_loses_rows_only_at_the_wrap() {
    let experiment = oval_experiment();
    let rows = analyze(&experiment, &oval_run(), 1.0, VelocityMethod::Longitudinal).unwrap();

    // 0.5 m over a 1 s window: a lap crossing removes at most 21 frames
    for id in 1..=PEDESTRIANS {
        let kept = rows.iter().filter(|r| r.id() == id).count();
        assert!(kept >= 180 - 21, "pedestrian {} kept {}", id, kept);
    }
}

#[test]
fn side_view_corridor() {
    let experiment = ExperimentConfig {
        camera: CameraView::SideView,
        fps: FPS,
        area: Some(MeasurementArea { min: 0.0, max: 8.0 }),
        ..Default::default()
    };

    // three pedestrians 1 m apart, the middle one undetected for a while
    let mut samples = Vec::new();
    for id in 0..3u32 {
        for fr in 0..100 {
            if id == 1 && (40..60).contains(&fr) {
                continue;
            }

            let x = id as f64 + SPEED * fr as f64 / FPS;
            samples.push(Sample::new(id, fr, x, 0.0, 0.0));
        }
    }
    let table = TrajectoryTable::new(samples).unwrap();

    let rows = analyze(&experiment, &table, 1.0, VelocityMethod::Longitudinal).unwrap();

    // only the middle pedestrian has neighbours on both sides
    assert!(rows.iter().all(|r| r.id() == 1));
    assert_eq!(rows.len(), 80);

    for r in &rows {
        assert_abs_diff_eq!(r.headway, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.rho, 1.0, epsilon = 1e-9);
    }

    // a one-sided difference spans half the window but is divided by the
    // whole of it, so it reads half the speed
    let one_sided = |fr: i64| {
        (0..10).contains(&fr)
            || (30..40).contains(&fr)
            || (60..70).contains(&fr)
            || (90..100).contains(&fr)
    };

    let (edges, inner): (Vec<&KinematicSample>, Vec<&KinematicSample>) =
        rows.iter().partition(|r| one_sided(r.frame()));
    assert_eq!(edges.len(), 40);
    assert_eq!(inner.len(), 40);

    for r in inner {
        assert_abs_diff_eq!(r.velocity, SPEED, epsilon = 1e-9);
    }
    for r in edges {
        assert_abs_diff_eq!(r.velocity, SPEED / 2.0, epsilon = 1e-9);
    }
}

#[test]
fn analyze_validates_the_experiment() {
    let experiment = ExperimentConfig {
        camera: CameraView::SideView,
        transform: AxisTransform {
            unit: 0.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let table = TrajectoryTable::new(vec![
        Sample::new(1, 0, 0.0, 0.0, 0.0),
        Sample::new(2, 0, 1.0, 0.0, 0.0),
    ])
    .unwrap();

    let res = analyze(&experiment, &table, 1.0, VelocityMethod::Longitudinal);
    assert!(matches!(res, Err(Error::InvalidConfig(_))));

    // a top view run without oval geometry
    let res = analyze(
        &ExperimentConfig::default(),
        &table,
        1.0,
        VelocityMethod::Longitudinal,
    );
    assert!(res.is_err());
}
