//! domainforge - generate layered DDD Go services from OpenAPI and Protocol
//! Buffer definitions
//!
//! The pipeline is a pure, stateless transformation per invocation: a format
//! adapter normalizes the input document into a canonical domain model, the
//! generation orchestrator renders it through a fixed template sequence, and
//! the merge policy drops any candidate that would clobber a pre-existing
//! file at the destination.

#![deny(unsafe_code)]

pub mod adapters;
pub mod application;
pub mod domain;
pub mod generation;
pub mod infrastructure;
pub mod merge;
pub mod rendering;
