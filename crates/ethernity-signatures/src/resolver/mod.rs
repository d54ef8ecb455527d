//! Builds an interface descriptor from bytecode and signature databases.

use std::path::Path;
use std::sync::Arc;

use ethernity_core::{EventTopic, FunctionSelector, Result, SignatureStore};
use tracing::{debug, warn};

use crate::abi::{parse_signature, Event, InterfaceDescriptor, Method, ParsedSignature};
use crate::config::ResolverConfig;
use crate::database::{lookup_event_signature, lookup_function_signature, JsonFileStore};
use crate::parser::parse_instructions;
use crate::scanner::{ContractSignatures, SignatureScanner};

/// Anything that can recover an interface from runtime bytecode.
pub trait AbiResolver: Send + Sync {
    fn resolve_contract_abi(&self, code: &[u8]) -> Result<InterfaceDescriptor>;
}

/// Decodes, scans and resolves `code` against the two databases.
///
/// Unknown selectors and malformed database entries are dropped silently;
/// the only error is a database that cannot be accessed.
pub fn resolve(
    code: &[u8],
    functions: &dyn SignatureStore,
    events: &dyn SignatureStore,
) -> Result<InterfaceDescriptor> {
    resolve_with_config(code, functions, events, &ResolverConfig::default())
}

pub fn resolve_with_config(
    code: &[u8],
    functions: &dyn SignatureStore,
    events: &dyn SignatureStore,
    config: &ResolverConfig,
) -> Result<InterfaceDescriptor> {
    let instructions = parse_instructions(code);
    let signatures = SignatureScanner::new(&config.idioms).scan(&instructions);
    resolve_signatures(&signatures, functions, events, config)
}

/// Resolves already scanned signatures.
pub fn resolve_signatures(
    signatures: &ContractSignatures,
    functions: &dyn SignatureStore,
    events: &dyn SignatureStore,
    config: &ResolverConfig,
) -> Result<InterfaceDescriptor> {
    if config.resolve_functions {
        functions.check_available()?;
    }
    if config.resolve_events {
        events.check_available()?;
    }

    let mut abi = InterfaceDescriptor::new();

    if config.resolve_functions {
        for selector in &signatures.function_selectors {
            if let Some(method) = resolve_method(functions, *selector)? {
                abi.insert_method(method);
            }
        }
    }

    if config.resolve_events {
        for topic in &signatures.event_topics {
            if let Some(event) = resolve_event(events, *topic)? {
                abi.insert_event(event);
            }
        }
    }

    debug!(
        "resolved {} methods and {} events from {} candidates",
        abi.methods.len(),
        abi.events.len(),
        signatures.function_selectors.len() + signatures.event_topics.len()
    );
    Ok(abi)
}

/// `Ok(None)` for unknown selectors and unparseable entries.
pub fn resolve_method(store: &dyn SignatureStore, selector: FunctionSelector) -> Result<Option<Method>> {
    let found = lookup_function_signature(store, &selector);
    Ok(parse_found(found, &selector)?.map(|(sig, parsed)| Method::new(selector, sig, parsed)))
}

/// `Ok(None)` for unknown topics and unparseable entries.
pub fn resolve_event(store: &dyn SignatureStore, topic: EventTopic) -> Result<Option<Event>> {
    let found = lookup_event_signature(store, topic.as_bytes());
    Ok(parse_found(found, topic.as_bytes())?.map(|(sig, parsed)| Event::new(topic, sig, parsed)))
}

fn parse_found(found: Result<Option<String>>, id: &[u8]) -> Result<Option<(String, ParsedSignature)>> {
    let key = hex::encode(id);
    let signature = match found {
        Ok(Some(sig)) => sig,
        Ok(None) => {
            debug!("0x{} not found in signature database", key);
            return Ok(None);
        }
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            warn!("lookup of 0x{} failed: {}", key, e);
            return Ok(None);
        }
    };

    match parse_signature(&signature) {
        Ok(parsed) => Ok(Some((signature, parsed))),
        Err(e) => {
            warn!("skipping malformed signature '{}' for 0x{}: {}", signature, key, e);
            Ok(None)
        }
    }
}

/// Resolver backed by a function store and an event store.
pub struct FourByteResolver {
    methods: Arc<dyn SignatureStore>,
    events: Arc<dyn SignatureStore>,
    config: ResolverConfig,
}

impl FourByteResolver {
    pub fn new(methods: Arc<dyn SignatureStore>, events: Arc<dyn SignatureStore>) -> Self {
        Self::with_config(methods, events, ResolverConfig::default())
    }

    pub fn with_config(
        methods: Arc<dyn SignatureStore>,
        events: Arc<dyn SignatureStore>,
        config: ResolverConfig,
    ) -> Self {
        Self { methods, events, config }
    }

    /// Loads both JSON databases up front; either one missing or malformed
    /// is [`Error::DatabaseUnavailable`](ethernity_core::Error::DatabaseUnavailable).
    pub fn from_json_files(methods: impl AsRef<Path>, events: impl AsRef<Path>) -> Result<Self> {
        let methods = JsonFileStore::open(methods.as_ref())?;
        let events = JsonFileStore::open(events.as_ref())?;
        debug!("signature databases loaded from {} and {}", methods.path().display(), events.path().display());
        Ok(Self::new(Arc::new(methods), Arc::new(events)))
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Canonical signature for a 4-byte selector, if known.
    pub fn method_signature(&self, selector: FunctionSelector) -> Result<Option<String>> {
        lookup_function_signature(self.methods.as_ref(), &selector)
    }

    /// Canonical signature for an event topic, if known.
    pub fn event_signature(&self, topic: EventTopic) -> Result<Option<String>> {
        lookup_event_signature(self.events.as_ref(), topic.as_bytes())
    }
}

impl AbiResolver for FourByteResolver {
    fn resolve_contract_abi(&self, code: &[u8]) -> Result<InterfaceDescriptor> {
        resolve_with_config(code, self.methods.as_ref(), self.events.as_ref(), &self.config)
    }
}
