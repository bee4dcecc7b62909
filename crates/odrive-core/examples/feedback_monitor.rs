//! Put axis 0 into closed loop, spin it briefly and print feedback.
//!
//! Usage: feedback_monitor <port> [baud]

use std::{thread, time::Duration};

use anyhow::Context;
use odrive_core::{AxisState, OdriveUart, SerialLink, TrafficLog};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let port_name = args.next().context("missing serial port argument")?;
    let baud_rate = match args.next() {
        Some(b) => b.parse().context("invalid baud rate")?,
        None => 115_200,
    };

    let port = serialport::new(&port_name, baud_rate)
        .timeout(Duration::from_millis(50))
        .open()
        .with_context(|| format!("opening {port_name}"))?;
    let mut link = SerialLink::from_port(port);

    let traffic = TrafficLog::shared(256);
    let mut odrive = OdriveUart::new(&mut link).with_traffic_log(traffic.clone());

    println!("vbus: {} V", odrive.parameter_as_float("vbus_voltage"));

    odrive.clear_errors();
    odrive.set_state(AxisState::ClosedLoopControl);
    thread::sleep(Duration::from_millis(100));
    println!("state: {:?}", odrive.try_state()?);

    odrive.set_velocity(1.0);
    for _ in 0..10 {
        let fb = odrive.feedback();
        println!("pos {:>10.4}  vel {:>10.4}", fb.position, fb.velocity);
        thread::sleep(Duration::from_millis(100));
    }
    odrive.set_velocity(0.0);
    odrive.set_state(AxisState::Idle);

    print!("{}", traffic.lock().to_text(true, false));
    Ok(())
}
