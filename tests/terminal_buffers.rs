mod common;

use common::terminal;
use ndc_terminal::buffers::BufferError;

/// Test that a fresh terminal starts with nominal buffers.
#[test]
fn test_buffers_start_nominal() {
    let terminal = terminal();
    let buffers = terminal.buffers();

    assert_eq!(buffers.pin, "");
    assert_eq!(buffers.buffer_b, "");
    assert_eq!(buffers.buffer_c, "");
    assert_eq!(buffers.amount, "000000000000");
    assert_eq!(buffers.opcode, "        ");
    assert_eq!(buffers.fdk, "");
}

/// Test that the amount buffer is left-padded to twelve digits.
#[test]
fn test_set_amount_buffer_pads() {
    let mut terminal = terminal();
    terminal.set_amount_buffer(Some("15067")).unwrap();
    assert_eq!(terminal.buffers().amount, "000000015067");
}

/// Test that a missing amount is a no-op.
#[test]
fn test_set_amount_buffer_none_keeps_value() {
    let mut terminal = terminal();
    terminal.set_amount_buffer(Some("15067")).unwrap();
    terminal.set_amount_buffer(None).unwrap();
    assert_eq!(terminal.buffers().amount, "000000015067");
}

/// Test that a rejected amount leaves the buffer unchanged.
#[test]
fn test_set_amount_buffer_rejects_bad_values() {
    let mut terminal = terminal();
    terminal.set_amount_buffer(Some("42")).unwrap();

    assert_eq!(
        terminal.set_amount_buffer(Some("12a")),
        Err(BufferError::NonDigitAmount("12a".to_string()))
    );
    assert!(matches!(
        terminal.set_amount_buffer(Some("1234567890123")),
        Err(BufferError::AmountTooLong { .. })
    ));
    assert_eq!(terminal.buffers().amount, "000000000042");
}

/// Test that init_buffers restores every buffer and can be called repeatedly.
#[test]
fn test_init_buffers_resets() {
    let mut terminal = terminal();
    terminal.set_amount_buffer(Some("999")).unwrap();
    terminal.set_fdks_active_mask("255").unwrap();
    terminal.press_key('A').unwrap();
    assert_eq!(terminal.buffers().fdk, "A");

    terminal.init_buffers();
    terminal.init_buffers();

    assert_eq!(terminal.buffers().amount, "000000000000");
    assert_eq!(terminal.buffers().fdk, "");
    assert_eq!(terminal.buffers().opcode, "        ");
}
