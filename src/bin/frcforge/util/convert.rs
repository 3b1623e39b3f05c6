use frc_forge::{
    AngleStyle as LibAngleStyle, BondStyle as LibBondStyle, DihedralStyle as LibDihedralStyle,
    EquivalenceMode as LibEquivalenceMode, ImproperStyle as LibImproperStyle,
    PairStyle as LibPairStyle,
};

use crate::cli;

impl From<cli::BondStyle> for LibBondStyle {
    fn from(style: cli::BondStyle) -> Self {
        match style {
            cli::BondStyle::Harmonic => LibBondStyle::Harmonic,
            cli::BondStyle::Class2 => LibBondStyle::Class2,
            cli::BondStyle::Morse => LibBondStyle::Morse,
        }
    }
}

impl From<cli::AngleStyle> for LibAngleStyle {
    fn from(style: cli::AngleStyle) -> Self {
        match style {
            cli::AngleStyle::Harmonic => LibAngleStyle::Harmonic,
            cli::AngleStyle::Class2 => LibAngleStyle::Class2,
        }
    }
}

impl From<cli::DihedralStyle> for LibDihedralStyle {
    fn from(style: cli::DihedralStyle) -> Self {
        match style {
            cli::DihedralStyle::Charmm => LibDihedralStyle::Charmm,
            cli::DihedralStyle::Class2 => LibDihedralStyle::Class2,
        }
    }
}

impl From<cli::ImproperStyle> for LibImproperStyle {
    fn from(style: cli::ImproperStyle) -> Self {
        match style {
            cli::ImproperStyle::Cvff => LibImproperStyle::Cvff,
            cli::ImproperStyle::Class2 => LibImproperStyle::Class2,
        }
    }
}

impl From<cli::PairStyle> for LibPairStyle {
    fn from(style: cli::PairStyle) -> Self {
        match style {
            cli::PairStyle::LjCut => LibPairStyle::LjCut,
            cli::PairStyle::Class2 => LibPairStyle::Class2,
        }
    }
}

impl From<cli::EquivalenceMode> for LibEquivalenceMode {
    fn from(mode: cli::EquivalenceMode) -> Self {
        match mode {
            cli::EquivalenceMode::Explicit => LibEquivalenceMode::Explicit,
            cli::EquivalenceMode::WithAuto => LibEquivalenceMode::WithAuto,
        }
    }
}
