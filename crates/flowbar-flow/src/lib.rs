//! Flowbar Flow
//!
//! This crate provides the message flow model and its two compile passes.
//!
//! A [`MessageFlow`] owns one [`ProcessingNode`], which in turn owns the input
//! node and up to three output nodes (primary, alternate and failure). From that
//! wiring the flow compiles:
//! - a property document block (`CompiledMessageFlow`) listing configurable
//!   property overrides, via [`MessageFlow::compile_properties`]
//! - a topology document (`.msgflow`) describing the node graph, via
//!   [`MessageFlow::compile_topology`]
//!
//! Both passes are pure: compiling an unchanged flow twice yields identical output.
//! Incomplete wiring is rejected with a [`FlowError`] before any output is produced.

mod convert;
mod error;
mod flow;
mod node;
mod property;
mod topology;

pub use error::FlowError;
pub use flow::{MessageFlow, Wiring};
pub use node::{
  FlowNode, InputNode, MqInputNode, MqOutputNode, NodeType, OutputNode, ProcessingNode,
};
pub use property::{PropertyListing, PropertyOwner, PropertyRule, property_uri, render, render_rules};
pub use topology::Slot;
