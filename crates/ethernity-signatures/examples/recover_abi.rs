use std::env;

use anyhow::Context;
use ethernity_core::utils::decode_hex;
use ethernity_signatures::{find_contract_signatures, AbiResolver, FourByteResolver};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <BYTECODE_HEX|@FILE> <METHODS_JSON> <EVENTS_JSON>", args[0]);
        std::process::exit(1);
    }

    let input = match args[1].strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => args[1].clone(),
    };
    let code = decode_hex(input.trim())?;

    let candidates = find_contract_signatures(&code);
    println!("Selectors: {}", candidates.function_selectors_hex().join(", "));
    println!("Topics: {}", candidates.event_topics_hex().join(", "));

    let resolver = FourByteResolver::from_json_files(&args[2], &args[3])?;
    let abi = resolver.resolve_contract_abi(&code)?;
    println!("{}", serde_json::to_string_pretty(&abi)?);
    Ok(())
}
