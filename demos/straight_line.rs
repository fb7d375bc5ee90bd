extern crate nifs3;

use nifs3::{ParametricCurve, SamplerConfig};

fn main() {
    env_logger::init();

    // two points have no interior knot, the curve is the segment between them
    let curve = ParametricCurve::new(&[0.0, 6.0], &[1.0, 4.0]).unwrap();
    let polyline = curve.sample(&SamplerConfig::new(12).unwrap()).unwrap();

    println!("x;y");
    for point in polyline.points() {
        println!("{:.2};{:.2}", point.x, point.y);
    }

    match curve.evaluate(1.5) {
        Ok(point) => println!("{:.2};{:.2}", point.x, point.y),
        Err(error) => eprintln!("{}", error),
    }
}
