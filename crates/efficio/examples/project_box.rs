//! Rounded project box with a bolted lid, exported as STL plus drawings.

use efficio::container::RoundedBox;
use efficio::fasteners::M3BoltAssembly;
use efficio::{Length, Object, View};

fn main() {
    let enclosure = RoundedBox::new(
        Length::millimeters(40.0),
        Length::millimeters(30.0),
        Length::millimeters(20.0),
    );
    let shape = enclosure.shape().unwrap();
    shape.write_stl("project_box.stl").unwrap();
    shape.write_svg("project_box.svg", View::Top).unwrap();
    shape.write_png("project_box.png").unwrap();
    println!("wrote project_box.{{stl,svg,png}}");

    // The hardware that closes it.
    let fastener = M3BoltAssembly::new(Length::millimeters(16.0), false);
    fastener
        .shape()
        .unwrap()
        .write_stl("box_fastener.stl")
        .unwrap();
    println!("wrote box_fastener.stl");
}
