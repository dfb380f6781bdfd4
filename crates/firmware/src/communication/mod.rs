//! Operator-facing communication
//!
//! - `mavlink`: ground-station link (commands, STATUSTEXT)
//! - `shell`: interactive serial console

pub mod mavlink;
pub mod shell;
