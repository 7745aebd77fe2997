use serde::Deserializer;

struct Visitor;

impl<'de> serde::de::Visitor<'de> for Visitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a number, a string containing a number, or null")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Option<f64>, E>
    where
        E: serde::de::Error,
    {
        Ok(Some(v))
    }

    #[allow(clippy::cast_precision_loss, reason = "chapter numbers are far below 2^52")]
    fn visit_u64<E>(self, v: u64) -> Result<Option<f64>, E>
    where
        E: serde::de::Error,
    {
        Ok(Some(v as f64))
    }

    #[allow(clippy::cast_precision_loss, reason = "chapter numbers are far below 2^52")]
    fn visit_i64<E>(self, v: i64) -> Result<Option<f64>, E>
    where
        E: serde::de::Error,
    {
        Ok(Some(v as f64))
    }

    fn visit_str<E>(self, v: &str) -> Result<Option<f64>, E>
    where
        E: serde::de::Error,
    {
        let v = v.trim();
        if v.is_empty() {
            return Ok(None);
        }
        // `NaN` and `inf` parse, but are not chapter numbers.
        v.parse::<f64>()
            .map(|number| number.is_finite().then_some(number))
            .map_err(E::custom)
    }

    fn visit_none<E>(self) -> Result<Option<f64>, E>
    where
        E: serde::de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Option<f64>, E>
    where
        E: serde::de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

/// Chapter numbers come back as JSON numbers, but older rows carry them as strings.
pub fn f64_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(Visitor)
}
