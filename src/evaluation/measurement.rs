use serde::Serialize;

/// Named scalar computed for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Name lookup over an ordered list of measurements.
pub trait MeasurementsExt {
    /// Returns (name, Some(value)|None) for each requested name, preserving order.
    fn values<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>;

    fn value(&self, name: &str) -> Option<f64>;
}

impl MeasurementsExt for [Measurement] {
    fn values<'a, I>(&self, names: I) -> Vec<(String, Option<f64>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .map(|n| (n.to_string(), self.value(n)))
            .collect()
    }

    fn value(&self, name: &str) -> Option<f64> {
        self.iter().find(|m| m.name == name).map(|m| m.value)
    }
}
