//! Relgen core library.
//!
//! Generates random finite binary relations that satisfy algebraic
//! properties such as reflexivity, symmetry or being a total order, and
//! analyses existing relations for the same properties.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
pub mod erdos;
mod error;
mod property;
mod registry;
mod relation;
mod report;
mod sampler;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{Generated, RelationBuilder, generate_relation},
    error::{RelgenError, RelgenErrorCode, Result},
    property::{Property, check_property, find_conflicts, find_missing, transitive_closure},
    registry::{BoundPredicate, FnPredicate, PropertySpec, PropertyToken, RelationPredicate},
    relation::{Element, FromIndex, Pair, PairSet, Relation, Universe},
    report::{PairGap, PropertyReport, PropertyStatus, REPORTED_PROPERTIES, ReportOptions},
    sampler::{
        DEFAULT_MAX_REJECTIONS, RejectionSampler, RejectionStats, Sample, TargetBounds,
    },
};
