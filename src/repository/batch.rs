use indexmap::IndexMap;

use super::address::RecordAddress;
use crate::model::rate::RawRate;
use crate::model::transition::Transition;

/// Rates for one document address, in insertion order.
#[derive(Debug, Clone)]
pub struct AddressBatch<A> {
    pub address: A,
    pub rates: Vec<(Transition, RawRate)>,
}

/// A multi-address update request.
///
/// Entries are grouped by each address's canonical key, so adding rates for
/// the same address twice appends to one group and produces one
/// read-modify-write of that document. Groups are processed in the order
/// their address was first inserted.
#[derive(Debug, Clone)]
pub struct UpdateBatch<A> {
    groups: IndexMap<String, AddressBatch<A>>,
}

impl<A> Default for UpdateBatch<A> {
    fn default() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }
}

impl<A: RecordAddress> UpdateBatch<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A batch holding a single rate.
    pub fn single(
        address: A,
        transition: impl Into<Transition>,
        rate: impl Into<RawRate>,
    ) -> Self {
        let mut batch = Self::new();
        batch.insert(address, transition, rate);
        batch
    }

    pub fn insert(
        &mut self,
        address: A,
        transition: impl Into<Transition>,
        rate: impl Into<RawRate>,
    ) -> &mut Self {
        let entry = (transition.into(), rate.into());
        self.groups
            .entry(address.canonical_key())
            .or_insert_with(|| AddressBatch {
                address,
                rates: Vec::new(),
            })
            .rates
            .push(entry);
        self
    }

    /// Number of distinct addresses.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddressBatch<A>> {
        self.groups.values()
    }
}
