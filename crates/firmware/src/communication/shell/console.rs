//! Console output and calibration progress binding
//!
//! [`ConsoleNotifier`] prints calibration progress on any `embedded_io::Write`
//! console, terminating each line with `\n\r`. On completion it prints the
//! per-axis gravity summary instead of the plain done message.
//!
//! [`ConsoleOutput`] is the shared transmit buffer the UART task drains with
//! [`take_console_output`]; it lets tasks without the UART handle write to
//! the console.

use core::cell::RefCell;
use core::convert::Infallible;
use core::fmt::Write as _;

use critical_section::Mutex;
use embedded_io::{ErrorType, Write};
use heapless::{Deque, String};
use quadfc_core::calibration::{CalibrationNotifier, GravityReadings, CALIBRATION_DONE_TEXT};

/// Console line terminator
pub const LINE_END: &str = "\n\r";

/// Shared transmit buffer size
const CONSOLE_TX_CAPACITY: usize = 512;

/// Summary text size
///
/// Fits three lines of `f32::MAX` (39 integer digits) at `{:.2}` and `{:.6}`
/// plus the done message, 340 bytes in total.
const SUMMARY_LEN: usize = 384;

/// Calibration notifier bound to a console writer
pub struct ConsoleNotifier<'a, W> {
    console: &'a mut W,
}

impl<'a, W: Write> ConsoleNotifier<'a, W> {
    pub fn new(console: &'a mut W) -> Self {
        Self { console }
    }

    fn write_text(&mut self, text: &str) {
        if self.console.write_all(text.as_bytes()).is_err() {
            crate::log_warn!("Console write failed");
        }
    }
}

impl<W: Write> CalibrationNotifier for ConsoleNotifier<'_, W> {
    fn notify(&mut self, text: &str) {
        self.write_text(text);
        self.write_text(LINE_END);
    }

    fn notify_complete(&mut self, readings: &GravityReadings) {
        self.write_text(&format_summary(readings));
    }
}

/// Completion summary as printed on the console
///
/// Positive readings with two decimals, negative readings with six.
pub fn format_summary(readings: &GravityReadings) -> String<SUMMARY_LEN> {
    let mut text = String::new();
    let written = write!(
        text,
        "{done}{end}x max:{:.2}, min:{:.6}{end}y max:{:.2}, min:{:.6}{end}z max:{:.2}, min:{:.6}{end}",
        readings.x_pos,
        readings.x_neg,
        readings.y_pos,
        readings.y_neg,
        readings.z_pos,
        readings.z_neg,
        done = CALIBRATION_DONE_TEXT,
        end = LINE_END,
    );
    if written.is_err() {
        crate::log_warn!("Calibration summary truncated");
    }
    text
}

static CONSOLE_TX: Mutex<RefCell<Deque<u8, CONSOLE_TX_CAPACITY>>> =
    Mutex::new(RefCell::new(Deque::new()));

/// Writer into the shared console transmit buffer
///
/// Never blocks; when the buffer is full the oldest bytes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl ErrorType for ConsoleOutput {
    type Error = Infallible;
}

impl Write for ConsoleOutput {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        critical_section::with(|cs| {
            let mut tx = CONSOLE_TX.borrow_ref_mut(cs);
            for byte in buf {
                if tx.is_full() {
                    tx.pop_front();
                }
                let _ = tx.push_back(*byte);
            }
        });
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Move pending console output into `buf`, returning the byte count
pub fn take_console_output(buf: &mut [u8]) -> usize {
    critical_section::with(|cs| {
        let mut tx = CONSOLE_TX.borrow_ref_mut(cs);
        let mut count = 0;
        for slot in buf.iter_mut() {
            match tx.pop_front() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        count
    })
}
