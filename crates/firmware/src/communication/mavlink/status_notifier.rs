//! MAVLink STATUSTEXT Notification System
//!
//! Central queue for STATUSTEXT messages to the Ground Control Station. The
//! calibration binding, command handler and parameter sink all report
//! through the `send_*()` functions; the telemetry router drains the queue
//! with [`take_pending_statustext_messages`].
//!
//! # Architecture
//!
//! - **Global Static**: one queue behind a critical-section mutex
//! - **Heapless Queue**: 16 messages, oldest dropped on overflow
//! - **MAVLink v2 Chunking**: messages up to 200 bytes split into 50-byte frames

use core::cell::RefCell;
use critical_section::Mutex;
use heapless::{Deque, String, Vec};
use mavlink::common::{MavSeverity, STATUSTEXT_DATA};

/// Maximum message length in bytes
const MAX_MESSAGE_LEN: usize = 200;

/// Queue capacity
const QUEUE_CAPACITY: usize = 16;

/// Text field size of a STATUSTEXT frame
const CHUNK_SIZE: usize = 50;

/// Maximum number of chunks per message (200 / 50)
const MAX_CHUNKS: usize = 4;

/// Maximum frames returned per drain
const MAX_FRAMES_PER_DRAIN: usize = 32;

/// Queued STATUSTEXT message with severity and text
#[derive(Debug)]
pub(crate) struct QueuedMessage {
    pub(crate) severity: MavSeverity,
    pub(crate) text: String<MAX_MESSAGE_LEN>,
}

/// Pending STATUSTEXT messages
pub struct StatusNotifier {
    queue: Deque<QueuedMessage, QUEUE_CAPACITY>,
    /// Id for the next multi-chunk message; 0 is reserved for single frames
    next_chunk_id: u16,
    dropped_count: u32,
}

impl StatusNotifier {
    const fn new() -> Self {
        Self {
            queue: Deque::new(),
            next_chunk_id: 1,
            dropped_count: 0,
        }
    }

    /// Enqueue a message, dropping the oldest one if the queue is full
    fn enqueue(&mut self, severity: MavSeverity, text: &str) {
        if text.len() > MAX_MESSAGE_LEN {
            crate::log_warn!(
                "STATUSTEXT truncated to {} bytes (was {} bytes)",
                MAX_MESSAGE_LEN,
                text.len()
            );
        }
        let text = truncate_to_char_boundary(text, MAX_MESSAGE_LEN);

        let mut buffer = String::new();
        // Cannot fail: text is at most MAX_MESSAGE_LEN bytes
        let _ = buffer.push_str(text);
        let message = QueuedMessage {
            severity,
            text: buffer,
        };

        if self.queue.is_full() {
            self.queue.pop_front();
            self.dropped_count += 1;
            crate::log_warn!(
                "STATUSTEXT queue full, dropped {} messages",
                self.dropped_count
            );
        }

        let _ = self.queue.push_back(message);
    }

    fn allocate_chunk_id(&mut self) -> u16 {
        let id = self.next_chunk_id;
        self.next_chunk_id = match id.wrapping_add(1) {
            0 => 1,
            next => next,
        };
        id
    }
}

/// Global StatusNotifier instance
static NOTIFIER: Mutex<RefCell<StatusNotifier>> = Mutex::new(RefCell::new(StatusNotifier::new()));

/// Longest prefix of `text` that fits in `max_len` bytes without splitting a char
fn truncate_to_char_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Send an ERROR severity message (severity 3)
///
/// Examples: "[cal] degenerate accel calibration"
pub fn send_error(text: &str) {
    send_statustext(MavSeverity::MAV_SEVERITY_ERROR, text);
}

/// Send a WARNING severity message (severity 4)
///
/// Examples: "Calibration busy"
pub fn send_warning(text: &str) {
    send_statustext(MavSeverity::MAV_SEVERITY_WARNING, text);
}

/// Send an INFORMATIONAL severity message (severity 6)
///
/// Calibration progress is reported at this level.
pub fn send_info(text: &str) {
    send_statustext(MavSeverity::MAV_SEVERITY_INFO, text);
}

/// Queue a STATUSTEXT message with an explicit severity
pub fn send_statustext(severity: MavSeverity, text: &str) {
    critical_section::with(|cs| {
        NOTIFIER.borrow_ref_mut(cs).enqueue(severity, text);
    });
}

/// Number of messages dropped on overflow since boot
pub fn dropped_count() -> u32 {
    critical_section::with(|cs| NOTIFIER.borrow_ref(cs).dropped_count)
}

/// Drain pending messages and convert them to STATUSTEXT frames
///
/// Called by the telemetry router. At most 32 frames are returned; messages
/// that do not fit stay queued for the next call.
pub fn take_pending_statustext_messages() -> Vec<STATUSTEXT_DATA, MAX_FRAMES_PER_DRAIN> {
    let mut result = Vec::new();

    critical_section::with(|cs| {
        let mut notifier = NOTIFIER.borrow_ref_mut(cs);
        while let Some(front) = notifier.queue.front() {
            let frames_needed = front.text.len().div_ceil(CHUNK_SIZE).max(1);
            if result.len() + frames_needed > result.capacity() {
                crate::log_debug!(
                    "STATUSTEXT drain full, {} messages pending",
                    notifier.queue.len()
                );
                break;
            }
            let Some(message) = notifier.queue.pop_front() else {
                break;
            };
            let chunk_id = if message.text.len() > CHUNK_SIZE {
                notifier.allocate_chunk_id()
            } else {
                0
            };
            for frame in chunk_message(message.severity, message.text.as_str(), chunk_id) {
                let _ = result.push(frame);
            }
        }
    });

    result
}

/// Split a message into STATUSTEXT frames
///
/// Messages of at most 50 bytes produce one frame with id 0. Longer
/// messages are split into 50-byte frames sharing `chunk_id` with sequential
/// `chunk_seq`; the last frame is zero padded.
pub(crate) fn chunk_message(
    severity: MavSeverity,
    text: &str,
    chunk_id: u16,
) -> Vec<STATUSTEXT_DATA, MAX_CHUNKS> {
    let bytes = &text.as_bytes()[..text.len().min(MAX_MESSAGE_LEN)];
    let id = if bytes.len() <= CHUNK_SIZE { 0 } else { chunk_id };
    let mut frames = Vec::new();

    if bytes.is_empty() {
        let _ = frames.push(frame(severity, &[], 0, 0));
        return frames;
    }

    for (seq, chunk) in bytes.chunks(CHUNK_SIZE).enumerate() {
        let _ = frames.push(frame(severity, chunk, id, seq as u8));
    }
    frames
}

fn frame(severity: MavSeverity, chunk: &[u8], id: u16, chunk_seq: u8) -> STATUSTEXT_DATA {
    let mut text = [0u8; CHUNK_SIZE];
    text[..chunk.len()].copy_from_slice(chunk);
    STATUSTEXT_DATA {
        severity,
        text: text.into(),
        id,
        chunk_seq,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serial_test::serial;

    /// Drain the raw queue without chunking
    pub(crate) fn drain_global_notifier() -> std::vec::Vec<(MavSeverity, std::string::String)> {
        critical_section::with(|cs| {
            let mut notifier = NOTIFIER.borrow_ref_mut(cs);
            core::iter::from_fn(|| notifier.queue.pop_front())
                .map(|m| (m.severity, std::string::String::from(m.text.as_str())))
                .collect()
        })
    }

    /// Reset queue, counters and chunk ids
    pub(crate) fn reset_notifier() {
        critical_section::with(|cs| {
            *NOTIFIER.borrow_ref_mut(cs) = StatusNotifier::new();
        });
    }

    fn frame_text(frame: &STATUSTEXT_DATA) -> std::string::String {
        let bytes: &[u8] = frame.text.as_ref();
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        std::string::String::from_utf8(bytes[..end].to_vec()).unwrap()
    }

    #[test]
    #[serial]
    fn test_enqueue_drain_cycle() {
        reset_notifier();

        send_info("[cal] calibration started: 2 accel");
        send_warning("Calibration busy");

        let messages = drain_global_notifier();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].0, MavSeverity::MAV_SEVERITY_INFO);
        assert_eq!(messages[0].1, "[cal] calibration started: 2 accel");
        assert_eq!(messages[1].0, MavSeverity::MAV_SEVERITY_WARNING);
    }

    #[test]
    #[serial]
    fn test_queue_overflow_drops_oldest() {
        reset_notifier();

        for i in 0..19 {
            send_info(&format!("Message {}", i));
        }

        let messages = drain_global_notifier();
        assert_eq!(messages.len(), 16);
        assert_eq!(messages[0].1, "Message 3");
        assert_eq!(messages[15].1, "Message 18");
        assert_eq!(dropped_count(), 3);
    }

    #[test]
    #[serial]
    fn test_truncation_to_200_bytes() {
        reset_notifier();

        send_error(&"A".repeat(201));

        let messages = drain_global_notifier();
        assert_eq!(messages[0].1.len(), 200);
    }

    #[test]
    #[serial]
    fn test_truncation_respects_char_boundary() {
        reset_notifier();

        // 199 ASCII bytes followed by a 3-byte char straddling the limit
        let text = format!("{}日", "A".repeat(199));
        send_info(&text);

        let messages = drain_global_notifier();
        assert_eq!(messages[0].1, "A".repeat(199));
    }

    #[test]
    #[serial]
    fn test_short_message_single_frame() {
        reset_notifier();

        send_info("[cal] front orientation detected");

        let frames = take_pending_statustext_messages();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].id, 0);
        assert_eq!(frames[0].chunk_seq, 0);
        assert_eq!(frame_text(&frames[0]), "[cal] front orientation detected");
    }

    #[test]
    #[serial]
    fn test_exactly_50_bytes_single_frame() {
        reset_notifier();

        send_info(&"A".repeat(50));

        let frames = take_pending_statustext_messages();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].id, 0);
    }

    #[test]
    #[serial]
    fn test_long_message_chunked() {
        reset_notifier();

        // 51 bytes
        let text = "[cal] right side done, rotate to a different side!";
        assert_eq!(text.len(), 51);
        send_info(text);

        let frames = take_pending_statustext_messages();
        assert_eq!(frames.len(), 2);
        assert_ne!(frames[0].id, 0);
        assert_eq!(frames[0].id, frames[1].id);
        assert_eq!(frames[0].chunk_seq, 0);
        assert_eq!(frames[1].chunk_seq, 1);
        assert_eq!(frame_text(&frames[1]), "!");
    }

    #[test]
    #[serial]
    fn test_chunk_ids_unique_and_skip_zero() {
        reset_notifier();
        critical_section::with(|cs| {
            NOTIFIER.borrow_ref_mut(cs).next_chunk_id = u16::MAX;
        });

        send_info(&"A".repeat(60));
        send_info(&"B".repeat(60));

        let frames = take_pending_statustext_messages();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].id, u16::MAX);
        assert_eq!(frames[2].id, 1);
    }

    #[test]
    #[serial]
    fn test_last_chunk_zero_padded() {
        let frames = chunk_message(MavSeverity::MAV_SEVERITY_INFO, &"C".repeat(75), 7);

        assert_eq!(frames.len(), 2);
        let bytes: &[u8] = frames[1].text.as_ref();
        assert_eq!(bytes.len(), CHUNK_SIZE);
        assert!(bytes[..25].iter().all(|b| *b == b'C'));
        assert!(bytes[25..].iter().all(|b| *b == 0));
    }

    #[test]
    #[serial]
    fn test_empty_message_single_frame() {
        let frames = chunk_message(MavSeverity::MAV_SEVERITY_INFO, "", 9);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].id, 0);
    }

    #[test]
    #[serial]
    fn test_drain_leaves_overflow_for_next_call() {
        reset_notifier();

        // 9 messages x 4 frames = 36 frames, only 8 messages fit in 32
        for _ in 0..9 {
            send_info(&"D".repeat(200));
        }

        let first = take_pending_statustext_messages();
        assert_eq!(first.len(), 32);
        let second = take_pending_statustext_messages();
        assert_eq!(second.len(), 4);
        assert!(take_pending_statustext_messages().is_empty());
    }
}
