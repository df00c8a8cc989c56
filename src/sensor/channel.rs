//! # Channel Layout
//!
//! The rig has four knobs arranged around a center, each a 2-axis joystick.
//! Looking down on the assembly:
//!
//! ```text
//!        C            Y+
//!        |            .
//!   B ---+--- D   X- .. Z+ .. X+
//!        |            .
//!        A            Y-
//! ```
//!
//! The eight channels are stored in a fixed positional order that never
//! changes after acquisition:
//!
//! | Index | Channel |
//! |-------|---------|
//! | 0 | A.x |
//! | 1 | A.y |
//! | 2 | B.x |
//! | 3 | B.y |
//! | 4 | C.x |
//! | 5 | C.y |
//! | 6 | D.x |
//! | 7 | D.y |

use std::fmt;

/// Number of analog channels (4 knobs x 2 axes).
pub const CHANNEL_COUNT: usize = 8;

/// One value per channel, indexed by [`Channel::index`].
pub type Channels<T> = [T; CHANNEL_COUNT];

/// A physical joystick knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Knob {
    A,
    B,
    C,
    D,
}

/// Axis within a knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Logical analog input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Ax,
    Ay,
    Bx,
    By,
    Cx,
    Cy,
    Dx,
    Dy,
}

impl Channel {
    /// All channels in acquisition order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Ax,
        Channel::Ay,
        Channel::Bx,
        Channel::By,
        Channel::Cx,
        Channel::Cy,
        Channel::Dx,
        Channel::Dy,
    ];

    /// The X axes of all four knobs (translation Z / rotation X-Y group).
    pub const X_GROUP: [Channel; 4] = [Channel::Ax, Channel::Bx, Channel::Cx, Channel::Dx];

    /// The Y axes of all four knobs (rotation Z / translation X-Y group).
    pub const Y_GROUP: [Channel; 4] = [Channel::Ay, Channel::By, Channel::Cy, Channel::Dy];

    /// Position of this channel in a [`Channels`] array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn knob(self) -> Knob {
        match self {
            Channel::Ax | Channel::Ay => Knob::A,
            Channel::Bx | Channel::By => Knob::B,
            Channel::Cx | Channel::Cy => Knob::C,
            Channel::Dx | Channel::Dy => Knob::D,
        }
    }

    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Channel::Ax | Channel::Bx | Channel::Cx | Channel::Dx => Axis::X,
            Channel::Ay | Channel::By | Channel::Cy | Channel::Dy => Axis::Y,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = match self.axis() {
            Axis::X => 'x',
            Axis::Y => 'y',
        };
        write!(f, "{:?}.{}", self.knob(), axis)
    }
}

/// Formats one value per channel as `AX:   12 AY:    0 ...` for diagnostics.
pub fn format_channels<T: fmt::Display>(values: &Channels<T>) -> String {
    Channel::ALL
        .iter()
        .map(|ch| {
            let label = ch.to_string().replace('.', "").to_uppercase();
            format!("{}:{:>5}", label, values[ch.index()])
        })
        .collect::<Vec<_>>()
        .join(" ")
}
