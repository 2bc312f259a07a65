//! Mock device implementations for testing and development.
//!
//! This module provides simulated peripherals that can be controlled
//! programmatically without requiring physical hardware. The emulator binary
//! uses them as its peripherals as well.

pub mod actuator;
pub mod clock;
pub mod display;
pub mod reader;
pub mod sink;

// Re-export commonly used types
pub use actuator::MockActuator;
pub use clock::ManualClock;
pub use display::VirtualLcd;
pub use reader::{MockCardReader, MockCardReaderHandle};
pub use sink::RecordingSink;
