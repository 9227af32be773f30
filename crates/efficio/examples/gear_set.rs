//! A pair of spur gears — basic efficio usage.

use efficio::gears::Gear;
use efficio::{Length, Object};

fn main() {
    let drive = Gear::rectangular(Length::millimeters(25.0), 10, Length::millimeters(6.0));
    drive.shape().unwrap().write_stl("drive_gear.stl").unwrap();
    println!("wrote drive_gear.stl");

    let idler = Gear::trapezoidal(Length::millimeters(15.0), 8, Length::millimeters(6.0));
    idler.shape().unwrap().write_stl("idler_gear.stl").unwrap();
    println!("wrote idler_gear.stl");

    let ball = Gear::spherical(Length::millimeters(12.0), 12);
    ball.shape().unwrap().write_stl("ball_gear.stl").unwrap();
    println!("wrote ball_gear.stl");
}
