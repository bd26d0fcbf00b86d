#![cfg(feature = "tracing")]

use std::{
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use shape_scale::{
    avec::{Config, Session, TracingDiagnostics},
    sans::channel::NotificationChannel,
};
use tracing_subscriber::{filter::LevelFilter, util::SubscriberInitExt};

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Buffer {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

fn line<'a>(lines: &'a [String], message: &str) -> &'a str {
    lines
        .iter()
        .find(|l| l.contains(message))
        .unwrap_or_else(|| panic!("no event {message:?} in {lines:#?}"))
}

#[test]
fn tracing_diagnostics_emit_events() {
    let buffer = Buffer::default();
    let writer = buffer.clone();
    let _guard = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish()
        .set_default();

    let mut session = Session::with_diagnostics(Config::default(), TracingDiagnostics);
    let now = Duration::ZERO;

    session.advance();
    assert!(
        session
            .on_notify(NotificationChannel::WeightMeasurement, &[0x00, 0xC8, 0x00], now)
            .is_ok()
    );
    assert!(
        session
            .on_notify(
                NotificationChannel::WeightMeasurement,
                &[0x02, 0xC8, 0x00, 0xE5, 0x07, 13, 15, 10, 30, 0],
                now,
            )
            .is_ok()
    );
    assert!(
        session
            .on_notify(NotificationChannel::BodyCompositionMeasurement, &[0x0A], now)
            .is_err()
    );
    assert!(
        session
            .on_notify_uuid(0x0000_2A37_0000_1000_8000_0080_5F9B_34FB, &[0xAB], now)
            .is_err()
    );

    let lines = buffer.lines();

    let subscribe = line(&lines, "subscribing to notifications");
    assert!(subscribe.contains("DEBUG"), "{subscribe}");
    assert!(subscribe.contains("channel=weight-measurement"), "{subscribe}");

    let received = line(&lines, "notification received channel=weight-measurement");
    assert!(received.contains("payload=00C800"), "{received}");
    assert!(line(&lines, "measurement decoded").contains("DEBUG"));

    let recovered = line(&lines, "recovered from decode error");
    assert!(recovered.contains("WARN"), "{recovered}");

    let dropped = line(&lines, "dropped message");
    assert!(dropped.contains("WARN"), "{dropped}");
    assert!(line(&lines, "payload=0A").contains("body-composition-measurement"));

    let unknown = line(&lines, "unknown characteristic");
    assert!(
        unknown.contains("uuid=00002a3700001000800000805f9b34fb"),
        "{unknown}"
    );
    assert!(unknown.contains("payload=AB"), "{unknown}");

    assert_eq!(
        lines.iter().filter(|l| l.contains("dropped message")).count(),
        2
    );
}
