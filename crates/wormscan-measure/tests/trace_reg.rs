//! Length tracing and line detection regression test
//!
//! Run with:
//! ```
//! cargo test -p wormscan-measure --test trace_reg
//! ```

use wormscan_core::{FOREGROUND, PixelGrid};
use wormscan_measure::{Calibration, HoughTransform, INVALID_LENGTH, measure_skeleton};
use wormscan_test::{RegParams, binary_grid};

fn draw_hline(grid: &mut PixelGrid, y: u32, x0: u32, x1: u32) {
    for x in x0..=x1 {
        grid.set(x, y, FOREGROUND).unwrap();
    }
}

#[test]
fn trace_reg() {
    let mut rp = RegParams::new("trace");

    // 40-pixel synthetic line on a full-size frame, stage calibrated to
    // 2.0 units per pixel on both axes
    let mut frame = PixelGrid::new(256, 256).unwrap();
    draw_hline(&mut frame, 100, 50, 89);
    let calibration = Calibration::new(2.0, 2.0);
    let m = measure_skeleton(&frame, &calibration).unwrap();
    assert!(m.is_traceable());
    rp.compare_values(2.0, m.endpoints as f64, 0.0);
    rp.compare_values(0.0, m.branches as f64, 0.0);
    rp.compare_values(40.0, m.pixel_length as f64, 0.0);
    // 39 tip-to-tip steps at scale 2.0
    rp.compare_values(78.0, m.true_length, 1e-9);
    // within one calibrated step of the nominal pixel-count length
    rp.compare_values(80.0, m.true_length, 2.0);

    // diagonal steps cost the calibrated hypotenuse
    let mut diag = PixelGrid::new(40, 40).unwrap();
    for i in 10..30 {
        diag.set(i, i, FOREGROUND).unwrap();
    }
    let m = measure_skeleton(&diag, &Calibration::new(3.0, 4.0)).unwrap();
    rp.compare_values(95.0, m.true_length, 1e-9);

    // branched topology produces the sentinel, never a partial length
    let cross = binary_grid(&[
        "..#..",
        "..#..",
        "#####",
        "..#..",
        "..#..",
    ]);
    let m = measure_skeleton(&cross, &calibration).unwrap();
    rp.compare_values(INVALID_LENGTH, m.true_length, 0.0);
    assert!(!m.is_traceable());
    rp.compare_values(4.0, m.endpoints as f64, 0.0);
    rp.compare_values(1.0, m.branches as f64, 0.0);

    // the synthetic line dominates the accumulator at exactly one cell
    let transform = HoughTransform::from_grid(&frame).unwrap();
    let line = transform.strongest_line().unwrap();
    rp.compare_values(90.0, line.theta_deg as f64, 0.0);
    rp.compare_values(100.0, line.rho as f64, 0.0);
    rp.compare_values(40.0, line.votes as f64, 0.0);
    rp.compare_values(100.0, line.y_at(64.0).unwrap(), 1e-6);
    assert!(line.x_at(100.0).is_none());

    // suppression clears the peak so a weaker second line surfaces
    let mut second_frame = frame.clone();
    for y in 30..60 {
        second_frame.set(200, y, FOREGROUND).unwrap();
    }
    let mut transform = HoughTransform::from_grid(&second_frame).unwrap();
    let first = transform.strongest_line().unwrap();
    rp.compare_values(40.0, first.votes as f64, 0.0);
    transform.suppress(&first, 4, 4);
    rp.compare_values(0.0, transform.votes(90, 100) as f64, 0.0);
    let second = transform.strongest_line().unwrap();
    rp.compare_values(0.0, second.theta_deg as f64, 0.0);
    rp.compare_values(200.0, second.rho as f64, 0.0);
    rp.compare_values(30.0, second.votes as f64, 0.0);

    assert!(rp.cleanup(), "trace regression test failed");
}
