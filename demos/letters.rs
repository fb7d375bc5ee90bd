extern crate nifs3;

use nifs3::compute_spline;

// Each stroke is a list of x y pairs on a 60 x 60 canvas.
const STROKES: [&[(f64, f64)]; 3] = [
    &[
        (5.0, 10.0),
        (8.0, 40.0),
        (14.0, 45.0),
        (18.0, 30.0),
        (12.0, 25.0),
        (20.0, 10.0),
    ],
    &[
        (24.0, 10.0),
        (26.0, 30.0),
        (30.0, 32.0),
        (32.0, 20.0),
        (34.0, 10.0),
    ],
    &[
        (40.0, 30.0),
        (36.0, 20.0),
        (42.0, 10.0),
        (48.0, 18.0),
        (44.0, 30.0),
        (40.0, 30.0),
    ],
];

fn main() {
    env_logger::init();

    println!("stroke;x;y");
    for (stroke, points) in STROKES.iter().enumerate() {
        let x: Vec<f64> = points.iter().map(|p| p.0).collect();
        let y: Vec<f64> = points.iter().map(|p| p.1).collect();

        let (sx, sy) = compute_spline(&x, &y).unwrap();

        // every 100th of the 3001 samples
        for i in (0..sx.len()).step_by(100) {
            println!("{};{:.2};{:.2}", stroke, sx[i], sy[i]);
        }
    }
}
