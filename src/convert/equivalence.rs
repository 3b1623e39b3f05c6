use std::collections::HashMap;

use super::config::EquivalenceMode;
use crate::frc::{FrcDocument, SectionKind};
use crate::model::equivalence::{AutoEquivalence, Equivalence};

/// Equivalence classes read from `#equivalence` and `#auto_equivalence`.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceTable {
    explicit: HashMap<String, [String; 4]>,
    auto: HashMap<String, [String; 8]>,
    nonbond: HashMap<String, String>,
}

impl EquivalenceTable {
    /// Collects every equivalence line; later lines override earlier ones.
    ///
    /// Explicit lines are `ver ref type nonb bond angle torsion oop`; auto
    /// lines are `ver ref type nonb bond_inct bond angle_end angle_apex
    /// torsion_end torsion_center oop_end oop_center`.
    pub fn collect(document: &FrcDocument) -> Self {
        let mut table = Self::default();
        for line in document.section(SectionKind::Equivalence) {
            let t = &line.tokens;
            table.nonbond.insert(t[2].clone(), t[3].clone());
            table
                .explicit
                .insert(t[2].clone(), std::array::from_fn(|i| t[4 + i].clone()));
        }
        for line in document.section(SectionKind::AutoEquivalence) {
            let t = &line.tokens;
            table
                .auto
                .insert(t[2].clone(), std::array::from_fn(|i| t[4 + i].clone()));
        }
        table
    }

    /// Class under which `#nonbond` sections list this atom type.
    pub fn nonbond_class<'a>(&'a self, atom_type: &'a str) -> &'a str {
        self.nonbond
            .get(atom_type)
            .map(String::as_str)
            .unwrap_or(atom_type)
    }

    /// Builds the equivalence record for one atom type.
    ///
    /// Classes the file does not define are left empty.
    pub fn build(&self, atom_type: &str, mode: EquivalenceMode) -> Equivalence {
        let [bond, angle, dihedral, improper] =
            self.explicit.get(atom_type).cloned().unwrap_or_default();

        let auto = match mode {
            EquivalenceMode::Explicit => None,
            EquivalenceMode::WithAuto => {
                let [
                    bond_increment,
                    bond,
                    angle_end,
                    angle_center,
                    dihedral_end,
                    dihedral_center,
                    improper_end,
                    improper_center,
                ] = self.auto.get(atom_type).cloned().unwrap_or_default();
                Some(AutoEquivalence {
                    bond_increment,
                    bond,
                    angle_end,
                    angle_center,
                    dihedral_end,
                    dihedral_center,
                    improper_end,
                    improper_center,
                })
            }
        };

        Equivalence {
            atom_type: atom_type.to_string(),
            bond,
            angle,
            dihedral,
            improper,
            auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frc::parse_str;

    const TEXT: &str = "\
#equivalence cff91
!Ver Ref Type NonB Bond Angle Torsion OOP
 1.0  1  c3    c    c    c     c      c
 1.0  1  ho    h    hb   h     h      h

#auto_equivalence cff91_auto
 1.0  1  c3  c  c  c_  c_  c_  c_  c_  c_  c_
";

    #[test]
    fn explicit_mode_ignores_auto_classes() {
        let table = EquivalenceTable::collect(&parse_str(TEXT, "!>"));
        let eq = table.build("ho", EquivalenceMode::Explicit);
        assert_eq!(eq.to_string(), "ho,bhb,ah,dh,ih");
        assert!(eq.auto.is_none());
    }

    #[test]
    fn with_auto_mode_appends_auto_classes() {
        let table = EquivalenceTable::collect(&parse_str(TEXT, "!>"));
        let eq = table.build("c3", EquivalenceMode::WithAuto);
        assert_eq!(
            eq.to_string(),
            "c3,bc,ac,dc,ic,aqc,abc_,aaec_,aacc_,adec_,adcc_,aiec_,aicc_"
        );
    }

    #[test]
    fn undefined_classes_are_empty() {
        let table = EquivalenceTable::collect(&parse_str(TEXT, "!>"));
        let eq = table.build("ho", EquivalenceMode::WithAuto);
        assert_eq!(eq.bond, "hb");
        assert_eq!(eq.auto.unwrap(), AutoEquivalence::default());

        let unknown = table.build("zz", EquivalenceMode::Explicit);
        assert_eq!(unknown.to_string(), "zz,b,a,d,i");
    }

    #[test]
    fn nonbond_class_falls_back_to_type_name() {
        let table = EquivalenceTable::collect(&parse_str(TEXT, "!>"));
        assert_eq!(table.nonbond_class("c3"), "c");
        assert_eq!(table.nonbond_class("o"), "o");
    }
}
