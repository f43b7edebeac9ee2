//! # Component Identities
//!
//! Every subsystem that owns a named logger is listed in [`COMPONENT_NAMES`].
//! The logger name doubles as the log file name, so the table is append-only:
//! an index, once assigned, must keep meaning the same component across builds.
//! The table is shared with the other server components, which is why the RTSP
//! server sits at index 18 behind eighteen placeholder slots.

use crate::error::LoggingError;
use std::fmt;
use std::str::FromStr;

/// Logger names, indexed by [`ComponentId::index`].
pub const COMPONENT_NAMES: [&str; 19] = [
    "Dummy_Component_1",
    "Dummy_Component_2",
    "Dummy_Component_3",
    "Dummy_Component_4",
    "Dummy_Component_5",
    "Dummy_Component_6",
    "Dummy_Component_7",
    "Dummy_Component_8",
    "Dummy_Component_9",
    "Dummy_Component_10",
    "Dummy_Component_11",
    "Dummy_Component_12",
    "Dummy_Component_13",
    "Dummy_Component_14",
    "Dummy_Component_15",
    "Dummy_Component_16",
    "Dummy_Component_17",
    "Dummy_Component_18",
    "MainServer.RtspServer",
];

/// A logical subsystem with its own named logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ComponentId {
    DummyComponent1 = 0,
    DummyComponent2 = 1,
    DummyComponent3 = 2,
    DummyComponent4 = 3,
    DummyComponent5 = 4,
    DummyComponent6 = 5,
    DummyComponent7 = 6,
    DummyComponent8 = 7,
    DummyComponent9 = 8,
    DummyComponent10 = 9,
    DummyComponent11 = 10,
    DummyComponent12 = 11,
    DummyComponent13 = 12,
    DummyComponent14 = 13,
    DummyComponent15 = 14,
    DummyComponent16 = 15,
    DummyComponent17 = 16,
    DummyComponent18 = 17,
    /// The RTSP server.
    RtspServer = 18,
}

impl ComponentId {
    /// Every component in table order.
    pub const ALL: [ComponentId; 19] = [
        ComponentId::DummyComponent1,
        ComponentId::DummyComponent2,
        ComponentId::DummyComponent3,
        ComponentId::DummyComponent4,
        ComponentId::DummyComponent5,
        ComponentId::DummyComponent6,
        ComponentId::DummyComponent7,
        ComponentId::DummyComponent8,
        ComponentId::DummyComponent9,
        ComponentId::DummyComponent10,
        ComponentId::DummyComponent11,
        ComponentId::DummyComponent12,
        ComponentId::DummyComponent13,
        ComponentId::DummyComponent14,
        ComponentId::DummyComponent15,
        ComponentId::DummyComponent16,
        ComponentId::DummyComponent17,
        ComponentId::DummyComponent18,
        ComponentId::RtspServer,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Logger name of this component.
    pub const fn name(self) -> &'static str {
        COMPONENT_NAMES[self.index()]
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentId {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COMPONENT_NAMES
            .iter()
            .position(|name| *name == s)
            .and_then(Self::from_index)
            .ok_or_else(|| LoggingError::UnknownComponent(s.to_string()))
    }
}
