extern crate nifs3;

use nifs3::{Knot, ParametricCurve, SamplerConfig};

fn main() {
    env_logger::init();

    let knots = vec![
        Knot::new(10.0, 10.0),
        Knot::new(20.0, 40.0),
        Knot::new(35.0, 50.0),
        Knot::new(50.0, 30.0),
        Knot::new(40.0, 15.0),
        Knot::new(25.0, 20.0)
    ];

    let curve = ParametricCurve::from_knots(&knots).unwrap();
    let polyline = curve.sample(&SamplerConfig::new(60).unwrap()).unwrap();

    println!("x;y");
    for point in polyline.points() {
        println!("{:.2};{:.2}", point.x, point.y);
    }
}
