//! End-to-end driver scenarios against a recording link

mod common;

use common::{button_event, RecordingLink, ACK, RESET};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use tuxctl_driver::{Button, Buttons, DisplayFrame, DriverError, TuxDriver};
use tuxctl_protocol::opcode;

type Driver = TuxDriver<NoopRawMutex, RecordingLink>;

fn driver() -> Driver {
    TuxDriver::new(RecordingLink::default())
}

fn drain(driver: &Driver) {
    while !driver.is_idle() {
        driver.on_packet(&ACK);
    }
}

#[test]
fn read_buttons_lifecycle() {
    let driver = driver();
    assert_eq!(driver.read_buttons(), Err(DriverError::NotReady));

    driver.initialize().unwrap();
    assert_eq!(driver.read_buttons(), Ok(Buttons::RELEASED));
}

#[test]
fn one_transmission_per_ack() {
    let driver = driver();
    driver.initialize().unwrap();
    driver
        .set_display(DisplayFrame::new([1, 2, 3, 4], 0xF, 0))
        .unwrap();
    assert_eq!(driver.link().count(), 1);

    for expected in 2..=4 {
        driver.on_packet(&ACK);
        assert_eq!(driver.link().count(), expected);
    }

    driver.on_packet(&ACK);
    assert!(driver.is_idle());
    assert_eq!(driver.link().count(), 4);

    // Stray acknowledgment: nothing sent, nothing changes
    driver.on_packet(&ACK);
    assert_eq!(driver.link().count(), 4);
    assert!(driver.is_idle());
}

#[test]
fn stale_display_never_sent() {
    let driver = driver();
    driver.initialize().unwrap();
    driver
        .set_display(DisplayFrame::new([1, 2, 3, 4], 0xF, 0))
        .unwrap();
    driver
        .set_display(DisplayFrame::new([5, 6, 7, 8], 0xF, 0))
        .unwrap();
    drain(&driver);

    let sent = driver.link().sent();
    assert_eq!(
        sent,
        vec![
            vec![opcode::RESET_DEV],
            vec![opcode::LED_USR],
            vec![opcode::BIOC_ON],
            vec![opcode::LED_SET, 0x0F, 0xAD, 0xED, 0x86, 0xEF],
        ]
    );
}

#[test]
fn display_while_idle_goes_out_immediately() {
    let driver = driver();
    driver.initialize().unwrap();
    drain(&driver);

    driver
        .set_display(DisplayFrame::new([0, 0, 0, 0], 0x1, 0x1))
        .unwrap();
    assert_eq!(
        driver.link().last(),
        Some(vec![opcode::LED_SET, 0x01, 0xE7 | 0x10])
    );
}

#[test]
fn button_events_swap_left_and_down() {
    let driver = driver();
    driver.initialize().unwrap();

    // Hardware "down" line held
    driver.on_packet(&button_event(0x0F, 0x0B));
    let buttons = driver.read_buttons().unwrap();
    assert_eq!(buttons.bits(), 0xDF);
    assert!(buttons.is_pressed(Button::Down));
    assert!(!buttons.is_pressed(Button::Left));

    // Start and C held
    driver.on_packet(&button_event(0x06, 0x0F));
    let buttons = driver.read_buttons().unwrap();
    assert_eq!(buttons.pressed().collect::<Vec<_>>(), vec![Button::Start, Button::C]);
}

#[test]
fn reset_recovers_display_once() {
    let driver = driver();
    driver.initialize().unwrap();
    let display = DisplayFrame::elapsed(158);
    driver.set_display(display).unwrap();
    drain(&driver);
    driver.on_packet(&button_event(0x0E, 0x0F));

    let before = driver.link().count();
    driver.on_packet(&RESET);
    driver.on_packet(&RESET);
    assert_eq!(driver.read_buttons(), Ok(Buttons::RELEASED));
    drain(&driver);

    let sent = driver.link().sent();
    let recovery = &sent[before..];
    assert_eq!(recovery.len(), 4);
    assert_eq!(recovery[0], vec![opcode::RESET_DEV]);
    assert_eq!(recovery[1], vec![opcode::LED_USR]);
    assert_eq!(recovery[2], vec![opcode::BIOC_ON]);
    assert_eq!(recovery[3].as_slice(), display.encode().as_bytes());
}

#[test]
fn second_reset_event_triggers_new_recovery() {
    let driver = driver();
    driver.initialize().unwrap();
    drain(&driver);

    for _ in 0..2 {
        driver.on_packet(&RESET);
        driver.on_packet(&RESET);
        drain(&driver);
    }

    // Initial burst plus two recoveries of four frames each
    assert_eq!(driver.link().count(), 3 + 4 + 4);
}

#[test]
fn unknown_packets_are_ignored() {
    let driver = driver();
    driver.initialize().unwrap();

    driver.on_packet(&[0x42, 0x80, 0x80]);
    driver.on_packet(&[opcode::ACK]);
    assert_eq!(driver.link().count(), 1);
    assert!(!driver.is_idle());
}

#[test]
fn packets_before_initialize_are_ignored() {
    let driver = driver();
    driver.on_packet(&RESET);
    driver.on_packet(&button_event(0x00, 0x00));

    assert_eq!(driver.link().count(), 0);
    assert_eq!(driver.read_buttons(), Err(DriverError::NotReady));
}

#[test]
fn reinitialize_waits_for_in_flight_frame() {
    let driver = driver();
    driver.initialize().unwrap();
    drain(&driver);
    let display = DisplayFrame::new([1, 2, 3, 4], 0xF, 0);
    driver.set_display(display).unwrap();

    driver.initialize().unwrap();
    assert_eq!(driver.link().count(), 4);

    // Acknowledging the display releases the new burst from the start
    driver.on_packet(&ACK);
    assert_eq!(driver.link().last(), Some(vec![opcode::RESET_DEV]));
    driver.on_packet(&ACK);
    assert_eq!(driver.link().last(), Some(vec![opcode::LED_USR]));
}

#[test]
fn initialize_twice_sends_one_reset_at_a_time() {
    let driver = driver();
    driver.initialize().unwrap();
    driver.initialize().unwrap();
    assert_eq!(driver.link().sent(), vec![vec![opcode::RESET_DEV]]);

    drain(&driver);
    assert_eq!(
        driver.link().sent(),
        vec![
            vec![opcode::RESET_DEV],
            vec![opcode::RESET_DEV],
            vec![opcode::LED_USR],
            vec![opcode::BIOC_ON],
        ]
    );
}
