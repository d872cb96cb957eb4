use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::types::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported species symbol: '{0}'")]
pub struct ParseSpeciesError(String);

/// A specific isotope of an element.
///
/// Isotopes carry their own symbol so that, for example, deuterium beams are
/// stored under `d/` rather than merged with hydrogen data under `h/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Isotope {
    name: &'static str,
    symbol: &'static str,
    element: Element,
    mass_number: u16,
}

impl Isotope {
    pub const PROTIUM: Isotope = Isotope::new("protium", "H1", Element::H, 1);
    pub const DEUTERIUM: Isotope = Isotope::new("deuterium", "D", Element::H, 2);
    pub const TRITIUM: Isotope = Isotope::new("tritium", "T", Element::H, 3);

    pub const fn new(
        name: &'static str,
        symbol: &'static str,
        element: Element,
        mass_number: u16,
    ) -> Self {
        Self {
            name,
            symbol,
            element,
            mass_number,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn mass_number(&self) -> u16 {
        self.mass_number
    }
}

/// The physical species a rate refers to: a natural element or one isotope.
///
/// Two species are equal only if they are the same physical species; an
/// isotope never compares equal to its parent element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    Element(Element),
    Isotope(Isotope),
}

impl Species {
    pub fn symbol(&self) -> &'static str {
        match self {
            Species::Element(e) => e.symbol(),
            Species::Isotope(i) => i.symbol(),
        }
    }

    /// Lowercase symbol used as a repository path segment.
    pub fn path_symbol(&self) -> String {
        self.symbol().to_lowercase()
    }

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        match self {
            Species::Element(e) => e.atomic_number(),
            Species::Isotope(i) => i.element().atomic_number(),
        }
    }

    pub fn element(&self) -> Element {
        match self {
            Species::Element(e) => *e,
            Species::Isotope(i) => i.element(),
        }
    }
}

impl From<Element> for Species {
    fn from(element: Element) -> Self {
        Species::Element(element)
    }
}

impl From<Isotope> for Species {
    fn from(isotope: Isotope) -> Self {
        Species::Isotope(isotope)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Species {
    type Err = ParseSpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for isotope in [Isotope::PROTIUM, Isotope::DEUTERIUM, Isotope::TRITIUM] {
            if s.eq_ignore_ascii_case(isotope.symbol()) || s.eq_ignore_ascii_case(isotope.name()) {
                return Ok(Species::Isotope(isotope));
            }
        }
        Element::from_str(s)
            .map(Species::Element)
            .map_err(|_| ParseSpeciesError(s.to_string()))
    }
}
