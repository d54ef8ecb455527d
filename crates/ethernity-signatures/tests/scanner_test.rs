mod common;

use common::{erc20_bytecode, selector, topic, Asm, ERC20_FUNCTIONS, TRANSFER_EVENT};
use ethernity_core::EventTopic;
use ethernity_signatures::{find_contract_signatures, parse_instructions, Opcode, SignatureScanner};

#[test]
fn single_solc_dispatch() {
    let code = Asm::new().solc_dispatch([0xaa, 0xbb, 0xcc, 0xdd], 0x0042).build();
    let sigs = find_contract_signatures(&code);
    assert_eq!(sigs.function_selectors, vec![[0xaa, 0xbb, 0xcc, 0xdd]]);
    assert_eq!(sigs.function_selectors_hex(), vec!["0xaabbccdd"]);
    assert!(sigs.event_topics.is_empty());
}

#[test]
fn push3_selector_is_left_padded() {
    // solc drops the leading zero byte of 0x00fdd58e
    let code = Asm::new()
        .op(Opcode::DUP1)
        .push(&[0xfd, 0xd5, 0x8e])
        .op(Opcode::EQ)
        .push(&[0x01, 0x00])
        .op(Opcode::JUMPI)
        .build();
    assert_eq!(find_contract_signatures(&code).function_selectors, vec![[0x00, 0xfd, 0xd5, 0x8e]]);
}

#[test]
fn offset_push_width_is_not_inspected() {
    let code = Asm::new()
        .op(Opcode::DUP1)
        .push(&[0x12, 0x34, 0x56, 0x78])
        .op(Opcode::EQ)
        .push(&[0xff; 32])
        .op(Opcode::JUMPI)
        .build();
    let sigs = find_contract_signatures(&code);
    assert_eq!(sigs.function_selectors, vec![[0x12, 0x34, 0x56, 0x78]]);
}

#[test]
fn vyper_idioms() {
    let code = Asm::new()
        .push(&[0x70, 0xa0, 0x82, 0x31])
        .op(Opcode::DUP2)
        .op(Opcode::XOR)
        .push(&[0x00, 0x80])
        .op(Opcode::JUMPI)
        .push(&[0x18, 0x16, 0x0d, 0xdd])
        .push(&[0x00])
        .op(Opcode::MLOAD)
        .op(Opcode::EQ)
        .op(Opcode::ISZERO)
        .build();
    let sigs = find_contract_signatures(&code);
    assert_eq!(sigs.function_selectors, vec![[0x70, 0xa0, 0x82, 0x31], [0x18, 0x16, 0x0d, 0xdd]]);
}

#[test]
fn topic_is_taken_from_last_push32_before_log() {
    let t = [0x11u8; 32];
    let code = Asm::new()
        .push(&t)
        .push(&[0x20])
        .op(Opcode::CALLER)
        .op(Opcode::POP)
        .push(&[0x00])
        .op(Opcode::LOG1)
        .build();
    let sigs = find_contract_signatures(&code);
    assert_eq!(sigs.event_topics, vec![EventTopic::from(t)]);
}

#[test]
fn topic_survives_across_logs() {
    let t = [0x22u8; 32];
    let code = Asm::new()
        .emit(&t, Opcode::LOG2)
        .push(&[0x00])
        .op(Opcode::LOG0)
        .build();
    let sigs = find_contract_signatures(&code);
    assert_eq!(sigs.event_topics, vec![EventTopic::from(t), EventTopic::from(t)]);
}

#[test]
fn newer_push32_replaces_topic() {
    let (a, b) = ([0x0au8; 32], [0x0bu8; 32]);
    let code = Asm::new().emit(&a, Opcode::LOG1).emit(&b, Opcode::LOG4).build();
    let sigs = find_contract_signatures(&code);
    assert_eq!(sigs.event_topics, vec![EventTopic::from(a), EventTopic::from(b)]);
}

#[test]
fn log_without_prior_push32_emits_nothing() {
    let code = Asm::new().push(&[0x00]).push(&[0x00]).op(Opcode::LOG0).build();
    assert!(find_contract_signatures(&code).event_topics.is_empty());
}

#[test]
fn truncated_push32_is_not_a_topic() {
    let code = Asm::new().op(Opcode::LOG0).build();
    let mut code = code;
    code.push(Opcode::PUSH32.0);
    code.extend_from_slice(&[0x33; 10]);
    assert!(find_contract_signatures(&code).is_empty());
}

#[test]
fn duplicates_are_kept_in_order() {
    let code = Asm::new()
        .solc_dispatch([1, 2, 3, 4], 0x10)
        .solc_dispatch([5, 6, 7, 8], 0x20)
        .solc_dispatch([1, 2, 3, 4], 0x30)
        .build();
    let sigs = find_contract_signatures(&code);
    assert_eq!(sigs.function_selectors, vec![[1, 2, 3, 4], [5, 6, 7, 8], [1, 2, 3, 4]]);
}

#[test]
fn fewer_than_five_instructions() {
    let code = Asm::new().op(Opcode::DUP1).push(&[1, 2, 3, 4]).op(Opcode::EQ).push(&[0x10]).build();
    assert!(find_contract_signatures(&code).is_empty());
    assert!(find_contract_signatures(&[]).is_empty());
}

#[test]
fn erc20_candidates() {
    let sigs = SignatureScanner::default().scan(&parse_instructions(&erc20_bytecode()));
    let expected: Vec<[u8; 4]> = ERC20_FUNCTIONS.iter().map(|s| selector(s)).collect();
    assert_eq!(sigs.function_selectors, expected);
    assert_eq!(sigs.event_topics, vec![EventTopic::from(topic(TRANSFER_EVENT))]);
    assert_eq!(
        sigs.event_topics_hex(),
        vec!["0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"]
    );
    assert_eq!(sigs.candidates().count(), 7);
}
