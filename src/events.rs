//! Firmware event bus interface
//!
//! The bus itself belongs to the kernel. The config store consumes console
//! lines from it and publishes the reload broadcast through [`EventSink`].

/// Event kinds, for subscription lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ConsoleLineReceived,
    ConfigReload,
}

/// An event on the firmware bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// A complete line arrived on the serial console
    ConsoleLineReceived(&'a str),
    /// Every module should re-read its settings
    ConfigReload,
}

impl Event<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ConsoleLineReceived(_) => EventKind::ConsoleLineReceived,
            Event::ConfigReload => EventKind::ConfigReload,
        }
    }
}

/// Publishing side of the bus.
///
/// `publish` delivers to every subscriber before it returns.
pub trait EventSink {
    fn publish(&mut self, event: Event<'_>);
}
