use csv::{ReaderBuilder, StringRecord};
use shape_scale::{
    avec::{self, Decoded, Error, Height},
    sans::{channel::NotificationChannel, datetime::TimestampError},
};

#[test]
fn decode_weight_fixtures() {
    const PATH: &str = "fixtures/weight.csv";
    let validator = Validator::new(PATH);
    assert!(!validator.rows.is_empty());

    for row in &validator.rows {
        let Some(decoded) = row.decode(NotificationChannel::WeightMeasurement) else {
            continue;
        };
        let m = decoded.measurement;

        row.assert_f32("weight", m.weight());
        row.assert_f32("bmi", m.bmi());
        row.assert_timestamp(&decoded);
        row.assert_f32(
            "height",
            m.height().map(|h| match h {
                Height::Meters(h) => h,
                Height::Raw(h) => panic!("unexpected raw height {h} in {}", row.payload()),
            }),
        );

        assert!(!decoded.continues);
        assert_eq!(m.body_fat(), None);
        assert_eq!(m.basal_metabolism(), None);
    }
}

#[test]
fn decode_composition_fixtures() {
    const PATH: &str = "fixtures/composition.csv";
    let validator = Validator::new(PATH);
    assert!(!validator.rows.is_empty());

    for row in &validator.rows {
        let Some(decoded) = row.decode(NotificationChannel::BodyCompositionMeasurement) else {
            continue;
        };
        let m = decoded.measurement;

        row.assert_f32("body_fat", m.body_fat());
        row.assert_f32("weight", m.weight());
        row.assert_timestamp(&decoded);
        row.assert_f32("muscle_percentage", m.muscle_percentage());
        row.assert_f32("muscle_mass", m.muscle_mass());
        row.assert_f32("fat_free_mass", m.fat_free_mass());
        row.assert_f32("soft_lean_mass", m.soft_lean_mass());
        row.assert_f32("body_water_mass", m.body_water_mass());
        row.assert_f32("impedance", m.impedance());

        assert_eq!(
            m.basal_metabolism(),
            row.get("basal_metabolism").map(|v| v.parse().unwrap()),
            "basal_metabolism of {}",
            row.payload()
        );
        assert_eq!(
            m.height(),
            row.get("height").map(|v| Height::Raw(v.parse().unwrap())),
            "height of {}",
            row.payload()
        );
        assert_eq!(
            decoded.continues,
            row.get("continues") == Some("true"),
            "continues of {}",
            row.payload()
        );
        assert_eq!(m.bmi(), None);
    }
}

struct Validator {
    rows: Vec<Row>,
}

impl Validator {
    fn new(path: &str) -> Self {
        let mut reader = ReaderBuilder::new().from_path(path).unwrap();
        let headers = reader.headers().unwrap().clone();

        let rows = reader
            .records()
            .map(|r| Row {
                headers: headers.clone(),
                record: r.unwrap(),
            })
            .collect();

        Self { rows }
    }
}

struct Row {
    headers: StringRecord,
    record: StringRecord,
}

impl Row {
    fn get(&self, name: &str) -> Option<&str> {
        let i = self.headers.iter().position(|h| h == name).unwrap();
        self.record.get(i).filter(|v| !v.is_empty())
    }

    fn payload(&self) -> &str {
        self.get("payload").unwrap_or("")
    }

    fn bytes(&self) -> Vec<u8> {
        let s = self.payload();
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    /// Decode the payload and check the outcome, returning the successful
    /// result.
    fn decode(&self, channel: NotificationChannel) -> Option<Decoded> {
        let bytes = self.bytes();
        let result = avec::decode(channel, &bytes);

        match self.get("outcome").unwrap() {
            "ok" => Some(result.unwrap_or_else(|e| panic!("{}: {e}", self.payload()))),
            "truncated" => {
                let required = self.get("required").unwrap().parse().unwrap();
                assert_eq!(
                    result,
                    Err(Error::TruncatedPayload {
                        required,
                        found: bytes.len()
                    }),
                    "outcome of {}",
                    self.payload()
                );
                None
            }
            outcome => panic!("unknown outcome {outcome}"),
        }
    }

    fn assert_f32(&self, name: &str, found: Option<f32>) {
        let expected: Option<f32> = self.get(name).map(|v| v.parse().unwrap());

        match (expected, found) {
            (Some(e), Some(f)) => assert!(
                (e - f).abs() < 1e-4,
                "{name} of {}: expected {e}, found {f}",
                self.payload()
            ),
            (e, f) => assert_eq!(e, f, "{name} of {}", self.payload()),
        }
    }

    fn assert_timestamp(&self, decoded: &Decoded) {
        let found = decoded.measurement.timestamp().map(|t| t.to_string());
        assert_eq!(
            found.as_deref(),
            self.get("timestamp"),
            "timestamp of {}",
            self.payload()
        );

        let error = decoded.timestamp_error.map(|e| match e {
            TimestampError::Year(_) => "year",
            TimestampError::Month(_) => "month",
            TimestampError::Day(_) => "day",
            TimestampError::Hour(_) => "hour",
            TimestampError::Minute(_) => "minute",
            TimestampError::Second(_) => "second",
        });
        assert_eq!(
            error,
            self.get("timestamp_error"),
            "timestamp error of {}",
            self.payload()
        );
    }
}
