use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::array::NdArray;

/// An unvalidated rate payload as supplied by a caller.
///
/// Fields are free-form JSON so that numbers may arrive as integers, floats,
/// or nested lists of either. The repository coerces and validates the
/// payload against the rate class it is stored under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRate(Map<String, Value>);

impl RawRate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.to_string(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for RawRate {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Excitation or recombination photon emission coefficient.
///
/// `rate` has shape `(ne.len(), te.len())`.
#[derive(Debug, Clone, PartialEq)]
pub struct PecRate {
    /// Electron density axis, m^-3.
    pub ne: Vec<f64>,
    /// Electron temperature axis, eV.
    pub te: Vec<f64>,
    /// Emission coefficient, photon.m^3.s^-1.
    pub rate: NdArray,
}

/// Thermal charge-exchange photon emission coefficient.
///
/// `rate` has shape `(ne.len(), te.len(), td.len())`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalCxRate {
    pub ne: Vec<f64>,
    pub te: Vec<f64>,
    /// Donor temperature axis, eV.
    pub td: Vec<f64>,
    pub rate: NdArray,
}

/// Beam emission rate split into energy/density and temperature factors.
///
/// The total rate is `sen * st / sref`; combining the factors is left to the
/// consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamEmissionRate {
    /// Interaction energy axis, eV/amu.
    pub e: Vec<f64>,
    /// Target electron density axis, m^-3.
    pub n: Vec<f64>,
    /// Target electron temperature axis, eV.
    pub t: Vec<f64>,
    /// Energy/density component, shape `(e.len(), n.len())`.
    pub sen: NdArray,
    /// Temperature component, same length as `t`.
    pub st: Vec<f64>,
    pub eref: f64,
    pub nref: f64,
    pub tref: f64,
    pub sref: f64,
}

fn list(values: &[f64]) -> Value {
    Value::Array(values.iter().copied().map(Value::from).collect())
}

impl From<&PecRate> for RawRate {
    fn from(rate: &PecRate) -> Self {
        RawRate::new()
            .with("ne", list(&rate.ne))
            .with("te", list(&rate.te))
            .with("rate", rate.rate.to_value())
    }
}

impl From<PecRate> for RawRate {
    fn from(rate: PecRate) -> Self {
        RawRate::from(&rate)
    }
}

impl From<&ThermalCxRate> for RawRate {
    fn from(rate: &ThermalCxRate) -> Self {
        RawRate::new()
            .with("ne", list(&rate.ne))
            .with("te", list(&rate.te))
            .with("td", list(&rate.td))
            .with("rate", rate.rate.to_value())
    }
}

impl From<ThermalCxRate> for RawRate {
    fn from(rate: ThermalCxRate) -> Self {
        RawRate::from(&rate)
    }
}

impl From<&BeamEmissionRate> for RawRate {
    fn from(rate: &BeamEmissionRate) -> Self {
        RawRate::new()
            .with("e", list(&rate.e))
            .with("n", list(&rate.n))
            .with("t", list(&rate.t))
            .with("sen", rate.sen.to_value())
            .with("st", list(&rate.st))
            .with("eref", rate.eref)
            .with("nref", rate.nref)
            .with("tref", rate.tref)
            .with("sref", rate.sref)
    }
}

impl From<BeamEmissionRate> for RawRate {
    fn from(rate: BeamEmissionRate) -> Self {
        RawRate::from(&rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_rate_builder_accepts_mixed_numbers() {
        let raw = RawRate::new()
            .with("ne", vec![1e19, 1e20])
            .with("te", json!([1, 10, 100]));
        assert_eq!(raw.get("ne"), Some(&json!([1e19, 1e20])));
        assert_eq!(raw.get("te"), Some(&json!([1, 10, 100])));
        assert!(raw.get("rate").is_none());
        assert_eq!(raw.fields().collect::<Vec<_>>(), vec!["ne", "te"]);
    }

    #[test]
    fn raw_rate_deserializes_from_json_object() {
        let raw: RawRate = serde_json::from_value(json!({"ne": [1.0], "te": [2.0]})).unwrap();
        assert_eq!(raw.get("te"), Some(&json!([2.0])));
    }

    #[test]
    fn beam_rate_converts_scalars() {
        let rate = BeamEmissionRate {
            e: vec![1.0],
            n: vec![2.0],
            t: vec![3.0],
            sen: NdArray::from_rows(vec![vec![4.0]]).unwrap(),
            st: vec![5.0],
            eref: 6.0,
            nref: 7.0,
            tref: 8.0,
            sref: 9.0,
        };
        let raw = RawRate::from(&rate);
        assert_eq!(raw.get("sen"), Some(&json!([[4.0]])));
        assert_eq!(raw.get("sref"), Some(&json!(9.0)));
    }
}
