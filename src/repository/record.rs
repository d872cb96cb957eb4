//! Per-class record schemas.
//!
//! Each rate class declares its axes, its table(s) and optional scalar
//! references. Validation coerces every field to `f64`, requires axes to be
//! one-dimensional and requires each table's shape to equal the lengths of
//! its axes in declared order. Decoding from a stored document performs no
//! shape checks; documents are trusted to have been validated on write.

use serde_json::Value;

use super::error::Error;
use crate::model::array::{ArrayError, NdArray};
use crate::model::rate::{BeamEmissionRate, PecRate, RawRate, ThermalCxRate};

/// A rate record type that can be validated from a raw payload and stored in
/// a repository document.
pub trait RateRecord: Sized {
    /// Validates and normalises a raw payload.
    fn validate(raw: &RawRate) -> Result<Self, Error>;

    /// Document entry with every numeric field as plain nested lists.
    fn to_entry(&self) -> Value;

    /// Reconstructs a record from a stored entry without shape validation.
    fn from_entry(entry: &Value) -> Result<Self, EntryError>;
}

/// Reason a stored entry could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryError {
    pub field: &'static str,
    pub detail: String,
}

impl EntryError {
    fn new(field: &'static str, detail: impl Into<String>) -> Self {
        Self {
            field,
            detail: detail.into(),
        }
    }
}

fn field<'a>(raw: &'a RawRate, name: &'static str) -> Result<&'a Value, Error> {
    raw.get(name).ok_or(Error::MissingField { field: name })
}

fn array(raw: &RawRate, name: &'static str) -> Result<NdArray, Error> {
    let coerce = |v: &Value| -> Result<NdArray, ArrayError> {
        let a = NdArray::from_value(v)?;
        a.check_finite()?;
        Ok(a)
    };
    coerce(field(raw, name)?).map_err(|source| Error::InvalidNumeric {
        field: name,
        source,
    })
}

fn axis(raw: &RawRate, name: &'static str, description: &'static str) -> Result<Vec<f64>, Error> {
    let a = array(raw, name)?;
    if a.ndim() != 1 {
        return Err(Error::invalid_rank(name, description, 1, a.ndim()));
    }
    Ok(a.into_vec())
}

fn table(
    raw: &RawRate,
    name: &'static str,
    axes: &'static str,
    expected: &[usize],
) -> Result<NdArray, Error> {
    let a = array(raw, name)?;
    if a.shape() != expected {
        return Err(Error::shape_mismatch(axes, name, expected.to_vec(), a.shape()));
    }
    Ok(a)
}

fn scalar(raw: &RawRate, name: &'static str, description: &'static str) -> Result<f64, Error> {
    let a = array(raw, name)?;
    if a.ndim() != 0 {
        return Err(Error::invalid_rank(name, description, 0, a.ndim()));
    }
    Ok(a.as_slice()[0])
}

fn stored<'a>(entry: &'a Value, name: &'static str) -> Result<&'a Value, EntryError> {
    entry
        .get(name)
        .ok_or_else(|| EntryError::new(name, "is missing"))
}

fn stored_array(entry: &Value, name: &'static str) -> Result<NdArray, EntryError> {
    NdArray::from_value(stored(entry, name)?).map_err(|e| EntryError::new(name, e.to_string()))
}

fn stored_list(entry: &Value, name: &'static str) -> Result<Vec<f64>, EntryError> {
    stored_array(entry, name).map(NdArray::into_vec)
}

fn stored_scalar(entry: &Value, name: &'static str) -> Result<f64, EntryError> {
    stored(entry, name)?
        .as_f64()
        .ok_or_else(|| EntryError::new(name, "is not a number"))
}

impl RateRecord for PecRate {
    fn validate(raw: &RawRate) -> Result<Self, Error> {
        let ne = axis(raw, "ne", "Electron density")?;
        let te = axis(raw, "te", "Electron temperature")?;
        let rate = table(raw, "rate", "ne, te", &[ne.len(), te.len()])?;
        Ok(Self { ne, te, rate })
    }

    fn to_entry(&self) -> Value {
        Value::Object(RawRate::from(self).into_map())
    }

    fn from_entry(entry: &Value) -> Result<Self, EntryError> {
        Ok(Self {
            ne: stored_list(entry, "ne")?,
            te: stored_list(entry, "te")?,
            rate: stored_array(entry, "rate")?,
        })
    }
}

impl RateRecord for ThermalCxRate {
    fn validate(raw: &RawRate) -> Result<Self, Error> {
        let ne = axis(raw, "ne", "Electron density")?;
        let te = axis(raw, "te", "Electron temperature")?;
        let td = axis(raw, "td", "Donor temperature")?;
        let rate = table(
            raw,
            "rate",
            "ne, te, td",
            &[ne.len(), te.len(), td.len()],
        )?;
        Ok(Self { ne, te, td, rate })
    }

    fn to_entry(&self) -> Value {
        Value::Object(RawRate::from(self).into_map())
    }

    fn from_entry(entry: &Value) -> Result<Self, EntryError> {
        Ok(Self {
            ne: stored_list(entry, "ne")?,
            te: stored_list(entry, "te")?,
            td: stored_list(entry, "td")?,
            rate: stored_array(entry, "rate")?,
        })
    }
}

impl RateRecord for BeamEmissionRate {
    fn validate(raw: &RawRate) -> Result<Self, Error> {
        let e = axis(raw, "e", "Beam energy")?;
        let n = axis(raw, "n", "Density")?;
        let t = axis(raw, "t", "Temperature")?;
        let sen = table(raw, "sen", "e, n", &[e.len(), n.len()])?;
        let st = table(raw, "st", "t", &[t.len()])?.into_vec();
        Ok(Self {
            e,
            n,
            t,
            sen,
            st,
            eref: scalar(raw, "eref", "Reference energy")?,
            nref: scalar(raw, "nref", "Reference density")?,
            tref: scalar(raw, "tref", "Reference temperature")?,
            sref: scalar(raw, "sref", "Reference rate")?,
        })
    }

    fn to_entry(&self) -> Value {
        Value::Object(RawRate::from(self).into_map())
    }

    fn from_entry(entry: &Value) -> Result<Self, EntryError> {
        Ok(Self {
            e: stored_list(entry, "e")?,
            n: stored_list(entry, "n")?,
            t: stored_list(entry, "t")?,
            sen: stored_array(entry, "sen")?,
            st: stored_list(entry, "st")?,
            eref: stored_scalar(entry, "eref")?,
            nref: stored_scalar(entry, "nref")?,
            tref: stored_scalar(entry, "tref")?,
            sref: stored_scalar(entry, "sref")?,
        })
    }
}
