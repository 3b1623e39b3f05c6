use super::error::Error;
use crate::frc;
use crate::model::key::Priority;

/// Resolves the priority of an interaction from its raw atom labels.
///
/// A label may end in `*<digits>`; every label that does must carry the
/// same number. Labels without a suffix leave the level at 0.
///
/// # Arguments
///
/// * `raw` - The atom labels exactly as written in the file.
/// * `auto` - Whether the entry comes from an auto-generalized section.
/// * `line` - Line number used in error messages.
///
/// # Errors
///
/// Returns [`Error::InconsistentPriority`] if two suffixes disagree, or a
/// parse error if a suffix does not fit in an `i64`.
pub fn resolve(raw: &[String], auto: bool, line: usize) -> Result<Priority, Error> {
    let mut level = None;
    for name in raw {
        let Some(digits) = suffix_digits(name) else {
            continue;
        };
        let suffix: i64 = digits.parse().map_err(|_| {
            frc::Error::parse(line, format!("priority suffix of '{name}' is out of range"))
        })?;
        match level {
            None => level = Some(suffix),
            Some(existing) if existing == suffix => {}
            Some(_) => return Err(Error::inconsistent_priority(raw, line)),
        }
    }
    Ok(Priority::new(auto, level.unwrap_or(0)))
}

/// The label without its `*<digits>` priority suffix.
pub fn base_label(name: &str) -> &str {
    match name.rsplit_once('*') {
        Some((base, _)) if suffix_digits(name).is_some() => base,
        _ => name,
    }
}

fn suffix_digits(name: &str) -> Option<&str> {
    let (_, digits) = name.rsplit_once('*')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn agreeing_suffixes_give_their_level() {
        let p = resolve(&raw(&["c4*2", "h1*2"]), false, 1).unwrap();
        assert_eq!(p, Priority::new(false, 2));
    }

    #[test]
    fn disagreeing_suffixes_are_rejected() {
        let err = resolve(&raw(&["c4*2", "h1*3"]), false, 9).unwrap_err();
        assert!(matches!(err, Error::InconsistentPriority { line: 9, .. }));
    }

    #[test]
    fn missing_suffix_defaults_to_zero() {
        let p = resolve(&raw(&["c", "h"]), true, 1).unwrap();
        assert_eq!(p, Priority::new(true, 0));
    }

    #[test]
    fn unsuffixed_names_do_not_conflict() {
        let p = resolve(&raw(&["c", "*3", "h*3"]), false, 1).unwrap();
        assert_eq!(p.level, 3);
    }

    #[test]
    fn bare_or_non_numeric_star_is_not_a_suffix() {
        assert_eq!(suffix_digits("*"), None);
        assert_eq!(suffix_digits("c*"), None);
        assert_eq!(suffix_digits("c*x1"), None);
        assert_eq!(suffix_digits("c*12"), Some("12"));
    }

    #[test]
    fn oversized_suffix_is_a_parse_error() {
        let err = resolve(&raw(&["c*99999999999999999999", "h"]), false, 4).unwrap_err();
        match err {
            Error::Read(read) => assert_eq!(read.line(), Some(4)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn base_label_strips_only_priority_suffix() {
        assert_eq!(base_label("c4*2"), "c4");
        assert_eq!(base_label("h*"), "h*");
        assert_eq!(base_label("cp"), "cp");
    }

    #[test]
    fn auto_ranks_below_explicit() {
        let explicit = resolve(&raw(&["c", "h"]), false, 1).unwrap();
        let auto = resolve(&raw(&["c*9", "h*9"]), true, 2).unwrap();
        assert!(explicit > auto);
    }
}
