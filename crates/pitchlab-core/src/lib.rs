//! Platform-free core of pitchlab: turntable rate math, tap tempo, the
//! persisted deck state, the cross-context message contract, and the frame
//! agent / relay / control surface that speak it.

pub mod agent;
pub mod constants;
pub mod error;
pub mod messages;
pub mod rate;
pub mod relay;
pub mod state;
pub mod surface;
pub mod tap;

pub use agent::{FrameAgent, MediaElement, MediaHost};
pub use error::{PitchLabError, Result};
pub use messages::{RateAck, Request, Response, StateReport};
pub use rate::*;
pub use relay::{fan_out, first_response, Receiver, Relay, TabInfo};
pub use state::{PitchState, Rpm};
pub use surface::ControlSurface;
pub use tap::TapBuffer;
