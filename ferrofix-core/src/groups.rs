/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Repeating group definitions.
//!
//! A repeating group on the wire is a count field followed by that many
//! blocks, each beginning with the group's delimiter tag. The delimiter and
//! member set for every count tag are fixed by the protocol, so they live in
//! this static table.

use crate::field::Field;
use std::ops::Range;

/// Static definition of a repeating group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    /// Tag of the NumInGroup count field.
    pub count_tag: u32,
    /// Tag that opens every block.
    pub delimiter: u32,
    /// Tags that may appear inside a block (the delimiter included).
    pub members: &'static [u32],
}

/// Groups known to the core, FIX 4.4 numbering.
pub const GROUP_SPECS: &[GroupSpec] = &[
    // NoAllocs
    GroupSpec {
        count_tag: 78,
        delimiter: 79,
        members: &[79, 80],
    },
    // NoRelatedSym
    GroupSpec {
        count_tag: 146,
        delimiter: 55,
        members: &[55, 48, 22, 167],
    },
    // NoMDEntryTypes
    GroupSpec {
        count_tag: 267,
        delimiter: 269,
        members: &[269],
    },
    // NoMDEntries
    GroupSpec {
        count_tag: 268,
        delimiter: 269,
        members: &[269, 270, 271, 272, 273, 276, 279, 280, 336],
    },
    // NoContraBrokers
    GroupSpec {
        count_tag: 382,
        delimiter: 375,
        members: &[375, 337, 437, 438],
    },
    // NoPartyIDs
    GroupSpec {
        count_tag: 453,
        delimiter: 448,
        members: &[448, 447, 452],
    },
    // NoLegs
    GroupSpec {
        count_tag: 555,
        delimiter: 600,
        members: &[600, 624, 654],
    },
    // NoUnderlyings
    GroupSpec {
        count_tag: 711,
        delimiter: 311,
        members: &[311],
    },
];

/// Looks up the group definition for a count tag.
#[must_use]
pub fn group_spec(count_tag: u32) -> Option<&'static GroupSpec> {
    GROUP_SPECS.iter().find(|g| g.count_tag == count_tag)
}

/// Splits the fields following a count field into delimiter-initiated blocks.
///
/// `fields` is the slice immediately after the count field. Returns the block
/// ranges (relative to that slice) and the number of fields consumed. A block
/// runs from one delimiter occurrence up to the next delimiter or the first
/// tag outside the member set.
#[must_use]
pub fn split_blocks(spec: &GroupSpec, fields: &[Field]) -> (Vec<Range<usize>>, usize) {
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < fields.len() && fields[i].tag == spec.delimiter {
        let start = i;
        i += 1;
        while i < fields.len()
            && fields[i].tag != spec.delimiter
            && spec.members.contains(&fields[i].tag)
        {
            i += 1;
        }
        blocks.push(start..i);
    }
    (blocks, i)
}
