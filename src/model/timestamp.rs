use chrono::prelude::*;

// Unix timestamp in milliseconds, as found in the exposition format.
pub type Timestamp = i64;

pub trait TimestampTrait {
    fn to_string_millis(&self) -> String;
}

impl TimestampTrait for Timestamp {
    fn to_string_millis(&self) -> String {
        let ts = NaiveDateTime::from_timestamp(
            self.div_euclid(1000),
            (self.rem_euclid(1000) * 1_000_000) as u32,
        );
        ts.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_millis() {
        assert_eq!((0 as Timestamp).to_string_millis(), "1970-01-01T00:00:00.000");
        assert_eq!(
            (1622104500123 as Timestamp).to_string_millis(),
            "2021-05-27T09:15:00.123"
        );
    }
}
