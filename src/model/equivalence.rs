use std::fmt;

/// Equivalence classes an atom type belongs to.
///
/// FRC files map each atom type onto a class per interaction family, so a
/// handful of class names can parameterize many atom types. The record
/// renders to the fixed-order lookup token
/// `type,b<bond>,a<angle>,d<dihedral>,i<improper>`, followed by the eight
/// auto classes (`,aq..,ab..,aae..,aac..,ade..,adc..,aie..,aic..`) when they
/// are present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Equivalence {
    pub atom_type: String,
    pub bond: String,
    pub angle: String,
    pub dihedral: String,
    pub improper: String,
    pub auto: Option<AutoEquivalence>,
}

/// Auto-generalized equivalence classes from `#auto_equivalence`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AutoEquivalence {
    pub bond_increment: String,
    pub bond: String,
    pub angle_end: String,
    pub angle_center: String,
    pub dihedral_end: String,
    pub dihedral_center: String,
    pub improper_end: String,
    pub improper_center: String,
}

impl Equivalence {
    /// An equivalence that maps every family onto the type's own name.
    pub fn identity(atom_type: &str) -> Self {
        Self {
            atom_type: atom_type.to_string(),
            bond: atom_type.to_string(),
            angle: atom_type.to_string(),
            dihedral: atom_type.to_string(),
            improper: atom_type.to_string(),
            auto: None,
        }
    }

    /// Every class name this atom type can appear under in an interaction.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        let explicit = [
            &self.atom_type,
            &self.bond,
            &self.angle,
            &self.dihedral,
            &self.improper,
        ];
        let auto = self.auto.iter().flat_map(|a| {
            [
                &a.bond_increment,
                &a.bond,
                &a.angle_end,
                &a.angle_center,
                &a.dihedral_end,
                &a.dihedral_center,
                &a.improper_end,
                &a.improper_center,
            ]
        });
        explicit
            .into_iter()
            .chain(auto)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Equivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},b{},a{},d{},i{}",
            self.atom_type, self.bond, self.angle, self.dihedral, self.improper
        )?;
        if let Some(a) = &self.auto {
            write!(
                f,
                ",aq{},ab{},aae{},aac{},ade{},adc{},aie{},aic{}",
                a.bond_increment,
                a.bond,
                a.angle_end,
                a.angle_center,
                a.dihedral_end,
                a.dihedral_center,
                a.improper_end,
                a.improper_center
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carbon() -> Equivalence {
        Equivalence {
            atom_type: "c3".into(),
            bond: "c".into(),
            angle: "c".into(),
            dihedral: "c".into(),
            improper: "c3".into(),
            auto: None,
        }
    }

    #[test]
    fn renders_explicit_lookup_token() {
        assert_eq!(carbon().to_string(), "c3,bc,ac,dc,ic3");
    }

    #[test]
    fn renders_auto_classes_in_fixed_order() {
        let mut eq = carbon();
        eq.auto = Some(AutoEquivalence {
            bond_increment: "c".into(),
            bond: "c_".into(),
            angle_end: "c_".into(),
            angle_center: "c_".into(),
            dihedral_end: "c_".into(),
            dihedral_center: "c_".into(),
            improper_end: "c_".into(),
            improper_center: "c_".into(),
        });
        assert_eq!(
            eq.to_string(),
            "c3,bc,ac,dc,ic3,aqc,abc_,aaec_,aacc_,adec_,adcc_,aiec_,aicc_"
        );
    }

    #[test]
    fn identifiers_skip_empty_entries() {
        let mut eq = Equivalence::identity("o");
        eq.improper.clear();
        let ids: Vec<_> = eq.identifiers().collect();
        assert_eq!(ids, ["o", "o", "o", "o"]);
    }

    #[test]
    fn ordering_is_field_wise() {
        let a = Equivalence::identity("a");
        let b = Equivalence::identity("b");
        assert!(a < b);
        assert_eq!(a.clone(), a);
    }
}
