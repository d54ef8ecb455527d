//! Interface descriptor model and signature parsing.

mod selector;
mod types;

use std::collections::BTreeMap;

use ethernity_core::{EventTopic, FunctionSelector};
use serde::{Deserialize, Serialize};

pub use selector::{parse_signature, parse_type, Param, ParsedSignature, MAX_NESTING};
pub use types::{canonical_elementary, ArrayDimension, Component, TypeDescriptor, TUPLE};

/// A recovered callable function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub selector: FunctionSelector,
    /// Signature string as stored in the database.
    pub signature: String,
    pub inputs: Vec<Param>,
}

impl Method {
    pub fn new(selector: FunctionSelector, signature: impl Into<String>, parsed: ParsedSignature) -> Self {
        Self {
            name: parsed.name,
            selector,
            signature: signature.into(),
            inputs: parsed.inputs,
        }
    }

    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }
}

/// A recovered log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub topic: EventTopic,
    pub signature: String,
    pub inputs: Vec<Param>,
}

impl Event {
    pub fn new(topic: EventTopic, signature: impl Into<String>, parsed: ParsedSignature) -> Self {
        Self {
            name: parsed.name,
            topic,
            signature: signature.into(),
            inputs: parsed.inputs,
        }
    }

    /// Inputs carried in topics rather than in the data section.
    pub fn indexed_inputs(&self) -> impl Iterator<Item = &Param> {
        self.inputs.iter().filter(|p| p.indexed)
    }
}

/// Interface recovered from a contract's bytecode.
///
/// Entries are keyed by name. Overloads collide: the entry inserted last
/// replaces any earlier one with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    pub methods: BTreeMap<String, Method>,
    pub events: BTreeMap<String, Event>,
}

impl InterfaceDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `method`, returning the entry it replaced.
    pub fn insert_method(&mut self, method: Method) -> Option<Method> {
        self.methods.insert(method.name.clone(), method)
    }

    /// Inserts `event`, returning the entry it replaced.
    pub fn insert_event(&mut self, event: Event) -> Option<Event> {
        self.events.insert(event.name.clone(), event)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.get(name)
    }

    /// Looks a method up by the selector it was recovered from.
    pub fn method_by_selector(&self, selector: FunctionSelector) -> Option<&Method> {
        self.methods.values().find(|m| m.selector == selector)
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.methods.len() + self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(selector: FunctionSelector, sig: &str) -> Method {
        Method::new(selector, sig, parse_signature(sig).unwrap())
    }

    #[test]
    fn last_write_wins() {
        let mut abi = InterfaceDescriptor::new();
        assert!(abi
            .insert_method(method([0x42, 0x84, 0x2e, 0x0e], "safeTransferFrom(address,address,uint256)"))
            .is_none());
        let replaced = abi.insert_method(method(
            [0xb8, 0x8d, 0x4f, 0xde],
            "safeTransferFrom(address,address,uint256,bytes)",
        ));
        assert_eq!(replaced.unwrap().selector, [0x42, 0x84, 0x2e, 0x0e]);
        assert_eq!(abi.methods.len(), 1);
        assert_eq!(abi.method("safeTransferFrom").unwrap().inputs.len(), 4);
        assert!(abi.method_by_selector([0x42, 0x84, 0x2e, 0x0e]).is_none());
        assert!(abi.method_by_selector([0xb8, 0x8d, 0x4f, 0xde]).is_some());
    }

    #[test]
    fn indexed_inputs() {
        let sig = "Transfer(address indexed,address indexed,uint256)";
        let event = Event::new(EventTopic::zero(), sig, parse_signature(sig).unwrap());
        assert_eq!(event.name, "Transfer");
        assert_eq!(event.indexed_inputs().count(), 2);
    }

    #[test]
    fn serializes_with_type_field() {
        let sig = "approve(address,uint256)";
        let mut abi = InterfaceDescriptor::new();
        abi.insert_method(Method::new([0x09, 0x5e, 0xa7, 0xb3], sig, parse_signature(sig).unwrap()));
        let json = serde_json::to_value(&abi).unwrap();
        let input = &json["methods"]["approve"]["inputs"][0];
        assert_eq!(input["type"]["base_type"], "address");
        assert_eq!(input["indexed"], false);
        assert!(json["events"].as_object().unwrap().is_empty());
    }
}
