use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Sc,
    Ti,
    V,
    Cr,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Ga,
    Ge,
    As,
    Se,
    Br,
    Kr,
    Rb,
    Sr,
    Y,
    Zr,
    Nb,
    Mo,
    Tc,
    Ru,
    Rh,
    Pd,
    Ag,
    Cd,
    In,
    Sn,
    Sb,
    Te,
    I,
    Xe,
    Cs,
    Ba,
    La,
    Ce,
    Pr,
    Nd,
    Pm,
    Sm,
    Eu,
    Gd,
    Tb,
    Dy,
    Ho,
    Er,
    Tm,
    Yb,
    Lu,
    Hf,
    Ta,
    W,
    Re,
    Os,
    Ir,
    Pt,
    Au,
    Hg,
    Tl,
    Pb,
    Bi,
    Po,
    At,
    Rn,
    Fr,
    Ra,
    Ac,
    Th,
    Pa,
    U,
    Np,
    Pu,
    Am,
    Cm,
    Bk,
    Cf,
    Es,
    Fm,
    Md,
    No,
    Lr,
    Rf,
    Db,
    Sg,
    Bh,
    Hs,
    Mt,
    Ds,
    Rg,
    Cn,
    Nh,
    Fl,
    Mc,
    Lv,
    Ts,
    Og = 118,
}

impl Element {
    /// Every element, ordered by atomic number.
    pub const ALL: [Element; 118] = {
        use Element as E;
        [
            E::H, E::He, E::Li, E::Be, E::B, E::C, E::N, E::O, E::F, E::Ne, E::Na,
            E::Mg, E::Al, E::Si, E::P, E::S, E::Cl, E::Ar, E::K, E::Ca, E::Sc,
            E::Ti, E::V, E::Cr, E::Mn, E::Fe, E::Co, E::Ni, E::Cu, E::Zn, E::Ga,
            E::Ge, E::As, E::Se, E::Br, E::Kr, E::Rb, E::Sr, E::Y, E::Zr, E::Nb,
            E::Mo, E::Tc, E::Ru, E::Rh, E::Pd, E::Ag, E::Cd, E::In, E::Sn, E::Sb,
            E::Te, E::I, E::Xe, E::Cs, E::Ba, E::La, E::Ce, E::Pr, E::Nd, E::Pm,
            E::Sm, E::Eu, E::Gd, E::Tb, E::Dy, E::Ho, E::Er, E::Tm, E::Yb, E::Lu,
            E::Hf, E::Ta, E::W, E::Re, E::Os, E::Ir, E::Pt, E::Au, E::Hg, E::Tl,
            E::Pb, E::Bi, E::Po, E::At, E::Rn, E::Fr, E::Ra, E::Ac, E::Th, E::Pa,
            E::U, E::Np, E::Pu, E::Am, E::Cm, E::Bk, E::Cf, E::Es, E::Fm, E::Md,
            E::No, E::Lr, E::Rf, E::Db, E::Sg, E::Bh, E::Hs, E::Mt, E::Ds, E::Rg,
            E::Cn, E::Nh, E::Fl, E::Mc, E::Lv, E::Ts, E::Og,
        ]
    };

    /// Nuclear charge Z, which is also the fully stripped charge state.
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOLS[usize::from(self.atomic_number()) - 1]
    }
}

const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al",
    "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe",
    "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y",
    "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb",
    "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir",
    "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac",
    "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No",
    "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl",
    "Mc", "Lv", "Ts", "Og",
];

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    /// Symbols are matched case-insensitively, so both `"Ne"` and the
    /// repository path form `"ne"` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SYMBOLS
            .iter()
            .position(|symbol| symbol.eq_ignore_ascii_case(s))
            .map(|i| Element::ALL[i])
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn element_from_str_valid() {
        assert_eq!(Element::from_str("H").unwrap(), Element::H);
        assert_eq!(Element::from_str("He").unwrap(), Element::He);
        assert_eq!(Element::from_str("Fe").unwrap(), Element::Fe);
        assert_eq!(Element::from_str("Og").unwrap(), Element::Og);
    }

    #[test]
    fn element_from_str_accepts_path_case() {
        assert_eq!(Element::from_str("c").unwrap(), Element::C);
        assert_eq!(Element::from_str("ne").unwrap(), Element::Ne);
        assert_eq!(Element::from_str("NE").unwrap(), Element::Ne);
    }

    #[test]
    fn element_from_str_invalid() {
        let err = Element::from_str("Xx").unwrap_err();
        assert_eq!(err.to_string(), "invalid or unsupported element symbol: 'Xx'");

        let err = Element::from_str("").unwrap_err();
        assert_eq!(err.to_string(), "invalid or unsupported element symbol: ''");
    }

    #[test]
    fn element_symbol_display_and_atomic_number() {
        let el = Element::Na;
        assert_eq!(el.symbol(), "Na");
        assert_eq!(el.to_string(), "Na");
        assert_eq!(el.atomic_number(), 11u8);
        assert_eq!(Element::C.atomic_number(), 6);
        assert_eq!(Element::Og.atomic_number(), 118);
    }

    #[test]
    fn table_order_matches_atomic_numbers() {
        for (i, element) in Element::ALL.iter().enumerate() {
            assert_eq!(usize::from(element.atomic_number()), i + 1);
            assert_eq!(element.symbol().parse::<Element>().unwrap(), *element);
        }
    }
}
