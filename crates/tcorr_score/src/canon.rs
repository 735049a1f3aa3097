//! Hierarchical name canonicalization for structural grouping.
//!
//! Instances generated from the same RTL differ only in the numeric parts of
//! their hierarchical names (`u_core/lane_3/reg_12` vs `u_core/lane_7/reg_4`).
//! Replacing every maximal run of decimal digits with `*` in the abstracted
//! segments buckets such structurally equivalent entities under one canonical
//! key, so grouped correlation compares like against like instead of
//! individual instances.

use serde::{Deserialize, Serialize};

/// How many trailing hierarchy segments to digit-abstract.
///
/// `Trailing(n)` abstracts the last `n` segments and preserves the leading
/// ones verbatim (all of them are preserved when the name is shallower than
/// `n` — the preserved count clamps at zero). `All` is the unbounded
/// sentinel: every segment is abstracted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ShrinkDepth {
    /// Abstract every segment.
    All,
    /// Abstract only the last `n` segments.
    Trailing(usize),
}

impl ShrinkDepth {
    /// Maps the configuration encoding to a depth: `-1` means [`All`],
    /// any non-negative value means [`Trailing`].
    ///
    /// [`All`]: ShrinkDepth::All
    /// [`Trailing`]: ShrinkDepth::Trailing
    pub fn from_level(level: i64) -> Self {
        if level < 0 {
            ShrinkDepth::All
        } else {
            ShrinkDepth::Trailing(level as usize)
        }
    }
}

/// Canonicalizes a hierarchical name.
///
/// Splits on `/`, preserves the leading segments selected by `depth`
/// verbatim, and replaces every maximal run of decimal digits in the
/// remaining segments with `*`. Idempotent: canonicalizing a canonical key
/// returns it unchanged.
pub fn canonical_name(name: &str, depth: ShrinkDepth) -> String {
    let segments: Vec<&str> = name.split('/').collect();
    let keep = match depth {
        ShrinkDepth::All => 0,
        ShrinkDepth::Trailing(n) => segments.len().saturating_sub(n),
    };
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            if i < keep {
                (*segment).to_string()
            } else {
                wildcard_digits(segment)
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The canonical group key of an arc: canonicalized from- and to-names
/// joined with `-`.
pub fn arc_group_key(from: &str, to: &str, depth: ShrinkDepth) -> String {
    format!(
        "{}-{}",
        canonical_name(from, depth),
        canonical_name(to, depth)
    )
}

/// Replaces every maximal run of decimal digits with a single `*`.
fn wildcard_digits(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut in_digits = false;
    for c in segment.chars() {
        if c.is_ascii_digit() {
            if !in_digits {
                out.push('*');
                in_digits = true;
            }
        } else {
            out.push(c);
            in_digits = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abstracts_all_segments() {
        assert_eq!(
            canonical_name("u_core/lane_3/reg_12", ShrinkDepth::All),
            "u_core/lane_*/reg_*"
        );
    }

    #[test]
    fn preserves_leading_segments() {
        assert_eq!(
            canonical_name("u_core/lane_3/reg_12", ShrinkDepth::Trailing(1)),
            "u_core/lane_3/reg_*"
        );
        assert_eq!(
            canonical_name("u_core/lane_3/reg_12", ShrinkDepth::Trailing(2)),
            "u_core/lane_*/reg_*"
        );
    }

    #[test]
    fn depth_clamps_at_zero() {
        assert_eq!(
            canonical_name("a1/b2", ShrinkDepth::Trailing(5)),
            "a*/b*"
        );
    }

    #[test]
    fn digit_runs_collapse_to_one_star() {
        assert_eq!(wildcard_digits("reg_1024_q"), "reg_*_q");
        assert_eq!(wildcard_digits("x12y34"), "x*y*");
        assert_eq!(wildcard_digits("nodigits"), "nodigits");
    }

    #[test]
    fn bracketed_indices_keep_brackets() {
        // Only the digits are abstracted; bracket characters stay.
        assert_eq!(
            canonical_name("u_core/bus[12]", ShrinkDepth::All),
            "u_core/bus[*]"
        );
    }

    #[test]
    fn idempotent() {
        for name in [
            "u_core/lane_3/reg_12",
            "bus[12]/bit[3]",
            "a/b/c",
            "flat_name_99",
        ] {
            for depth in [ShrinkDepth::All, ShrinkDepth::Trailing(1), ShrinkDepth::Trailing(2)] {
                let once = canonical_name(name, depth);
                assert_eq!(canonical_name(&once, depth), once, "name {name}");
            }
        }
    }

    #[test]
    fn group_keys_equal_for_structural_twins() {
        let depth = ShrinkDepth::All;
        assert_eq!(
            arc_group_key("u/lane_1/a", "u/lane_1/b", depth),
            arc_group_key("u/lane_9/a", "u/lane_9/b", depth)
        );
    }

    #[test]
    fn from_level_mapping() {
        assert_eq!(ShrinkDepth::from_level(-1), ShrinkDepth::All);
        assert_eq!(ShrinkDepth::from_level(0), ShrinkDepth::Trailing(0));
        assert_eq!(ShrinkDepth::from_level(3), ShrinkDepth::Trailing(3));
    }
}
